//! Stage invariants over generated pages

use domreduce::{parse_html, Stage, StageRegistry};
use proptest::prelude::*;

const TAGS: &[&str] = &[
    "div", "span", "section", "article", "p", "b", "i", "nav", "ul", "ol", "li", "table", "tr",
    "td", "th", "dl", "dt", "dd", "figure", "figcaption",
];

/// Stages that rewrite structure as text or placeholders, which may lengthen the markup
const GROWING_STAGES: &[&str] = &[
    "tables-to-text",
    "css-tables-to-text",
    "lists-to-text",
    "definition-lists-to-text",
    "figures-to-text",
    "media-placeholders",
];

fn attributes() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "",
        "",
        " hidden",
        " style=\"display:none\"",
        " aria-hidden=\"true\"",
        " class=\"c1 c2 c3 c4 c5 c6 c7 c8\"",
        " class=\"flex px-4 md:hidden card\"",
        " data-x=\"1\"",
        " id=\"a\"",
        " style=\"display:table\"",
        " style=\"display:table-row\"",
        " style=\"display: table-cell\"",
    ])
}

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z ]{0,12}",
        1 => Just("<!-- note -->".to_string()),
        1 => Just("<img src=\"hero.png\" alt=\"hero\" width=\"800\" height=\"600\">".to_string()),
        1 => Just("<svg viewBox=\"0 0 10 10\"><path d=\"M0 0h10\"></path></svg>".to_string()),
        1 => Just("<script>track()</script>".to_string()),
        1 => Just("<span></span>".to_string()),
    ]
}

fn node() -> impl Strategy<Value = String> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        (
            prop::sample::select(TAGS),
            attributes(),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(tag, attrs, children)| format!("<{tag}{attrs}>{}</{tag}>", children.concat()))
    })
}

fn page() -> impl Strategy<Value = String> {
    prop::collection::vec(node(), 1..4).prop_map(|nodes| {
        format!(
            "<html><head><title>t</title></head><body>\n{}\n</body></html>",
            nodes.join("\n")
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_every_stage_is_idempotent(page in page()) {
        let registry = StageRegistry::with_defaults();
        for name in registry.list_stages() {
            let stage = registry.get(&name).unwrap();
            let mut doc = parse_html(&page);
            stage.apply(&mut doc);
            let once = doc.to_html().unwrap();
            stage.apply(&mut doc);
            let twice = doc.to_html().unwrap();
            prop_assert_eq!(once, twice, "{} is not idempotent", name);
        }
    }

    #[test]
    fn test_removal_stages_never_grow_the_markup(page in page()) {
        let registry = StageRegistry::with_defaults();
        for name in registry.list_stages() {
            if GROWING_STAGES.contains(&name.as_str()) {
                continue;
            }
            let stage = registry.get(&name).unwrap();
            let mut doc = parse_html(&page);
            let before = doc.to_html().unwrap().chars().count();
            stage.apply(&mut doc);
            let after = doc.to_html().unwrap().chars().count();
            prop_assert!(after <= before, "{} grew the markup from {} to {}", name, before, after);
        }
    }
}
