/// True when `link` carries its own http(s) scheme.
fn is_absolute(link: &str) -> bool {
    let lower = link.get(..8).unwrap_or(link).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Join relative links onto `base`. Absolute http(s) links pass through.
///
/// Exactly one slash separates base and link: a single trailing slash on
/// the base and a single leading slash on the link are dropped first.
pub fn resolve(links: &[String], base: &str) -> Vec<String> {
    let base = base.strip_suffix('/').unwrap_or(base);
    links
        .iter()
        .map(|link| {
            if is_absolute(link) {
                link.clone()
            } else {
                let rel = link.strip_prefix('/').unwrap_or(link);
                format!("{base}/{rel}")
            }
        })
        .collect()
}

/// Plain prefix test. No URL parsing: query strings, fragments and
/// trailing slashes are compared as written.
pub fn is_allowed(url: &str, allowed_prefix: &str) -> bool {
    url.starts_with(allowed_prefix)
}

/// The base/prefix pair a crawl is confined to.
#[derive(Debug, Clone)]
pub struct UrlScope {
    base_url: String,
    allowed_prefix: String,
}

impl UrlScope {
    pub fn new(base_url: &str, allowed_prefix: &str) -> Self {
        Self { base_url: base_url.to_string(), allowed_prefix: allowed_prefix.to_string() }
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        is_allowed(url, &self.allowed_prefix)
    }

    /// Resolve `links` and split them into (allowed, rejected count), keeping order.
    pub fn admit(&self, links: &[String]) -> (Vec<String>, usize) {
        let resolved = resolve(links, &self.base_url);
        let total = resolved.len();
        let allowed: Vec<String> = resolved.into_iter().filter(|u| self.is_allowed(u)).collect();
        let rejected = total - allowed.len();
        (allowed, rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn relative_links_join_with_single_slash() {
        let out = resolve(&strings(&["page2.html", "/abs/path"]), "https://example.com");
        assert_eq!(out, vec!["https://example.com/page2.html", "https://example.com/abs/path"]);
    }

    #[test]
    fn trailing_slash_on_base_is_not_doubled() {
        let out = resolve(&strings(&["/a"]), "https://example.com/");
        assert_eq!(out, vec!["https://example.com/a"]);
    }

    #[test]
    fn absolute_links_pass_through() {
        let out = resolve(&strings(&["https://other.org/x", "HTTP://Example.com/Y"]), "https://example.com");
        assert_eq!(out, vec!["https://other.org/x", "HTTP://Example.com/Y"]);
    }

    #[test]
    fn only_one_leading_slash_is_stripped() {
        // protocol-relative links are not understood; they resolve literally
        let out = resolve(&strings(&["//cdn.example.com/x.js"]), "https://example.com");
        assert_eq!(out, vec!["https://example.com//cdn.example.com/x.js"]);
    }

    #[test]
    fn prefix_test_over_matches_sibling_paths() {
        // known simplification: "top10" also admits "top100"
        assert!(is_allowed("https://site.io/top100/x.html", "https://site.io/top10"));
    }

    #[test]
    fn prefix_test_under_matches_missing_trailing_slash() {
        // known simplification: the prefix root without its slash is rejected
        assert!(!is_allowed("https://site.io/top10", "https://site.io/top10/"));
        assert!(is_allowed("https://site.io/top10/#frag", "https://site.io/top10/"));
        assert!(is_allowed("https://site.io/top10/?q=1", "https://site.io/top10/"));
    }

    #[test]
    fn scope_keeps_link_order() {
        let scope = UrlScope::new("https://site.io", "https://site.io/top10/");
        let (allowed, rejected) = scope.admit(&strings(&[
            "/top10/b.html",
            "https://elsewhere.org/",
            "top10/a.html",
            "mailto:someone@site.io",
        ]));
        assert_eq!(allowed, vec!["https://site.io/top10/b.html", "https://site.io/top10/a.html"]);
        assert_eq!(rejected, 2);
    }
}
