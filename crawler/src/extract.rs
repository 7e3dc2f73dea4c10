use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

lazy_static! {
    static ref STYLE_BLOCK: Regex = Regex::new(r"(?is)<style.*?>.*?</style>").expect("valid regex");
    static ref INLINE_STYLE: Regex = Regex::new(r#"(?i)style=["'][^"']*["']"#).expect("valid regex");
    static ref TAG: Regex = Regex::new(r"<[^>]*>").expect("valid regex");
    static ref SPACES: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref NOSCRIPT_TAG: Regex = Regex::new(r"(?i)</?noscript[^>]*>").expect("valid regex");
    static ref ANCHOR: Selector = Selector::parse("a[href]").expect("valid selector");
}

/// Text and outgoing link targets of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub text: String,
    pub links: Vec<String>,
}

/// Best-effort extraction; malformed markup degrades, it never fails.
///
/// Style blocks and inline style attributes are removed before anything
/// else so their content never reaches the text.
pub fn extract(raw: &str) -> Extracted {
    let without_blocks = STYLE_BLOCK.replace_all(raw, "");
    let html = INLINE_STYLE.replace_all(&without_blocks, "");

    let links = extract_links(&html);

    let stripped = TAG.replace_all(&html, " ");
    let text = SPACES.replace_all(&stripped, " ").trim().to_string();

    Extracted { text, links }
}

fn extract_links(html: &str) -> Vec<String> {
    // the parser keeps <noscript> content as raw text, hiding its anchors
    let unwrapped = NOSCRIPT_TAG.replace_all(html, "");
    let document = Html::parse_document(&unwrapped);
    document
        .select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}
