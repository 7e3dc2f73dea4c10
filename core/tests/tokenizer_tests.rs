use index_core::tokenizer::{normalize, Analyzer};

#[test]
fn it_cleans_words() {
    assert_eq!(normalize("Hello,"), "hello");
    assert_eq!(normalize("--well—known--"), "wellknown");
    assert_eq!(normalize("!!!"), "");
    assert_eq!(normalize("(Rust's)"), "rusts");
    assert_eq!(normalize("state-of-the-art"), "stateoftheart");
    assert_eq!(normalize("1990–2000"), "19902000");
}

#[test]
fn it_is_idempotent() {
    let samples = [
        "Hello,", "--well—known--", "!!!", "“quoted”", "café", "A.B.C.", "<tag>", "x–y—z", "", "   ", "MiXeD123",
        "İstanbul", "naïve-ly", "e.g.,",
    ];
    for s in samples {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
    }
}

#[test]
fn it_strips_non_ascii_letters() {
    // accented letters are dropped, not folded
    assert_eq!(normalize("café"), "caf");
}

#[test]
fn tokens_keep_document_order_and_drop_empties() {
    let analyzer = Analyzer::default();
    let terms: Vec<String> = analyzer.tokens("The quick — brown fox!  ...  jumps").collect();
    assert_eq!(terms, vec!["the", "quick", "brown", "fox", "jumps"]);
}

#[test]
fn stemming_applies_to_every_token() {
    let analyzer = Analyzer::new(true);
    assert!(analyzer.stems());
    let terms: Vec<String> = analyzer.tokens("Runners running ran").collect();
    assert_eq!(terms[1], "run");
}
