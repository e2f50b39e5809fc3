//! Whole-page reductions over the fixtures in `tests/fixtures`

use crate::common::{body, load_fixture, reduce};
use domreduce::{Reducer, EXTENDED_PIPELINE};

#[test]
fn test_landing_page_default_pipeline() {
    let page = load_fixture("landing.html");
    let (html, report) = reduce(&page, &[]);

    for gone in [
        "<script", "<style", "<meta", "<link", "<!--", "cookie", "data-analytics", "onclick",
        "data-sort", "aria-label", "<span", "<b>",
    ] {
        assert!(!html.contains(gone), "{gone} should be stripped");
    }

    // the footer menu repeats the header menu
    assert_eq!(html.matches("<nav").count(), 1);
    assert!(html.contains("<footer>"));

    // a hidden container with visible children is kept
    assert!(html.contains("Newsletter"));

    assert!(html.contains("<main id=\"content\">"));
    assert!(html.contains("class=\"lead a b c d e …\""));
    assert!(html.contains("<svg data-placeholder=\"1\" width=\"100%\" height=\"100%\"></svg>"));
    assert!(html.contains("<table class=\"prices\">"));

    assert!(report.reduced_char_len < report.total_char_len);
    assert!(report.reduced_token_size < report.raw_token_size);
    assert_eq!(report.steps.len(), 7);
}

#[test]
fn test_landing_page_collapses_wrappers() {
    let page = load_fixture("landing.html");
    let mut reducer = Reducer::new(page);
    reducer
        .reduce(&["parse", "strip-clutter", "simplify-attributes", "collapse-nesting"])
        .unwrap();
    let doc = reducer.document().unwrap();

    let parent_tag = |tag: &str| {
        let id = doc.elements_by_tag(&[tag])[0];
        doc.parent(id).and_then(|p| doc.tag_name(p)).map(str::to_string)
    };
    assert_eq!(parent_tag("h1").as_deref(), Some("section"));
    assert_eq!(parent_tag("main").as_deref(), Some("body"));

    let html = reducer.to_html().unwrap();
    assert!(body(&html).contains("<div><p>Newsletter</p><p>Sign up</p></div>"));
}

#[test]
fn test_landing_page_extended_pipeline() {
    let page = load_fixture("landing.html");
    let (html, report) = reduce(&page, EXTENDED_PIPELINE);

    assert!(html.contains(
        "<pre data-table=\"1\">| Tea | Price |\n| --- | --- |\n| Sencha | $12 |\n| Assam | $9 |</pre>"
    ));
    assert!(!html.contains("<table"));

    assert!(html.contains("<ul class=\"menu\">"));
    assert!(html.contains("<section class=\"hero\">"));
    assert!(html.contains("<h1>Loose-leaf tea, delivered</h1>"));
    assert!(!html.contains("px-6"));
    assert!(!html.contains("antialiased"));

    assert!(!html.contains("\n\n"));
    assert!(!html.contains("  "));

    let names: Vec<&str> = report.steps.iter().map(|s| s.step.as_str()).collect();
    assert_eq!(names, EXTENDED_PIPELINE);
}

#[test]
fn test_malformed_page_is_reduced() {
    let page = load_fixture("malformed.html");
    let mut reducer = Reducer::new(page);
    reducer.reduce(EXTENDED_PIPELINE).unwrap();

    assert!(!reducer.warnings().is_empty());
    let html = reducer.to_html().unwrap();
    assert!(html.contains("Unclosed paragraph"));
    assert!(html.contains("| a | b |\n| --- | --- |\n| c |  |"));
    assert!(html.contains("<li>two</li>"));
}
