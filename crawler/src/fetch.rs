use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::FetchError;

/// Source of page bodies. The traversal only ever talks to this trait, so
/// tests can crawl an in-memory site.
pub trait Fetch {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url)
            .map_err(|source| FetchError::InvalidUrl { url: url.to_string(), source })?;
        let resp = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| FetchError::Transport { url: url.to_string(), source })?;
        if !resp.status().is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: resp.status().as_u16() });
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|source| FetchError::Body { url: url.to_string(), source })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::time::Instant;
    use tokio::net::TcpListener;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new("crawler-test", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn returns_body_on_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/top10/index.html")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<p>hello</p>")
            .expect(1)
            .create_async()
            .await;

        let body = fetcher().fetch(&format!("{}/top10/index.html", server.url())).await.unwrap();
        assert_eq!(body, "<p>hello</p>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing.html")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let err = fetcher().fetch(&format!("{}/missing.html", server.url())).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn unparsable_url_is_an_error() {
        let err = fetcher().fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn silent_server_times_out_as_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // accept connections and never answer them
        let silent = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let fetcher = HttpFetcher::new("crawler-test", Duration::from_millis(300)).unwrap();
        let started = Instant::now();
        let err = fetcher.fetch(&format!("http://{addr}/x")).await.unwrap_err();

        assert!(matches!(err, FetchError::Transport { .. }), "unexpected error: {err}");
        assert!(started.elapsed() < Duration::from_secs(5));
        silent.abort();
    }
}
