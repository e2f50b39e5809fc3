//! Pipeline behavior through the public API

use crate::common::{body, reduce};
use domreduce::{
    HeaderSeparator, Pipeline, ReduceError, Reducer, ReducerOptions, StageRegistry,
    DEFAULT_PIPELINE,
};

#[test]
fn test_unknown_stage_name_fails_before_output() {
    let mut reducer = Reducer::new("<p>x</p>");
    let result = reducer.reduce(&["parse_the_full_dom_into_a_dom_tree", "not_a_real_stage"]);

    match result {
        Err(err @ ReduceError::StageNotFound(_)) => {
            assert!(err.is_configuration_error());
            assert_eq!(err.to_string(), "Stage 'not_a_real_stage' not found");
        }
        other => panic!("Expected StageNotFound, got {:?}", other.map(|_| ())),
    }
    assert!(reducer.to_html().is_err());
    assert!(reducer.report().steps.is_empty());
}

#[test]
fn test_stage_before_parse_is_a_state_error() {
    let registry = StageRegistry::with_defaults();
    let pipeline = Pipeline::new(&registry, &["strip-clutter"]).unwrap();

    let mut reducer = Reducer::new("<p>x</p>");
    match reducer.run(&pipeline) {
        Err(ReduceError::Unparsed(stage)) => assert_eq!(stage, "strip-clutter"),
        _ => panic!("Expected Unparsed error"),
    }
}

#[test]
fn test_two_by_two_table() {
    let (html, _) = reduce(
        "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>",
        &["parse", "tables-to-text"],
    );
    assert_eq!(
        body(&html),
        "<pre data-table=\"1\">| A | B |\n| --- | --- |\n| 1 | 2 |</pre>"
    );
    assert!(!html.contains("<table"));
}

#[test]
fn test_hidden_leaf_and_hidden_container() {
    let (leaf, _) = reduce(
        "<div id=\"a\"><em style=\"display:none\">secret</em>shown</div>",
        &["parse", "strip-non-visual"],
    );
    assert_eq!(body(&leaf), "<div id=\"a\">shown</div>");

    let (container, _) = reduce(
        "<div id=\"a\"><em style=\"display:none\"><strong>inner</strong></em>shown</div>",
        &["parse", "strip-non-visual"],
    );
    assert!(container.contains("<strong>inner</strong>"));
}

#[test]
fn test_attribute_allow_list() {
    let mut reducer = Reducer::new(
        "<div class=\"c1 c2 c3 c4 c5 c6 c7 c8\" data-id=\"9\" style=\"color:red\" onclick=\"x()\">\
         <a href=\"/a\" target=\"_blank\" rel=\"noopener\" title=\"A\">a</a>\
         <img src=\"i.png\" alt=\"I\" loading=\"lazy\" role=\"presentation\"></div>",
    );
    reducer.reduce(&["parse", "simplify-attributes"]).unwrap();

    let allowed = ["id", "class", "href", "src", "alt", "title", "role"];
    let doc = reducer.document().unwrap();
    for id in doc.elements() {
        let element = doc.element(id).unwrap();
        for attr in &element.attrs {
            assert!(
                allowed.contains(&attr.name.as_str()),
                "unexpected attribute {} on {}",
                attr.name,
                element.name
            );
        }
    }

    let div = doc.elements_by_tag(&["div"])[0];
    let classes: Vec<&str> = doc.attr(div, "class").unwrap().split(' ').collect();
    assert_eq!(classes, vec!["c1", "c2", "c3", "c4", "c5", "c6", "…"]);
}

#[test]
fn test_duplicate_nav_keeps_first() {
    let (html, _) = reduce(
        "<nav id=\"header\"><a href=\"/\">Home</a> <a href=\"/docs\">Docs</a></nav>\
         <main>body</main>\
         <nav id=\"footer\"><a href=\"/\">HOME</a>\n  <a href=\"/docs\">docs</a></nav>",
        &["parse", "prune-duplicate-nav"],
    );
    assert_eq!(html.matches("<nav").count(), 1);
    assert!(html.contains("<nav id=\"header\">"));
}

#[test]
fn test_metrics_follow_execution_order() {
    let (html, report) = reduce(
        "<html><head><style>p { color: red }</style></head><body><!-- c --><p>x</p></body></html>",
        &[],
    );

    let names: Vec<&str> = report.steps.iter().map(|s| s.step.as_str()).collect();
    assert_eq!(names, DEFAULT_PIPELINE);

    for pair in report.steps.windows(2) {
        assert_eq!(pair[0].chars_after, pair[1].chars_before);
        assert_eq!(pair[0].tokens_after, pair[1].tokens_before);
    }
    for step in &report.steps {
        assert_eq!(
            step.char_delta,
            step.chars_after as i64 - step.chars_before as i64
        );
    }
    assert_eq!(report.steps[0].chars_before, report.total_char_len);
    assert_eq!(report.reduced_char_len, html.chars().count());
    assert_eq!(report.steps[1].step, "strip-clutter");
    assert!(report.steps[1].char_delta < 0);
}

#[test]
fn test_custom_options_flow_into_stages() {
    let options = ReducerOptions {
        allowed_attributes: vec!["data-keep".to_string()],
        header_separator: HeaderSeparator::Marked,
        ..ReducerOptions::default()
    };
    let registry = StageRegistry::with_options(&options);

    let mut reducer = Reducer::new(
        "<p data-keep=\"1\" id=\"x\">t</p><table><tr><td>1</td></tr><tr><td>2</td></tr></table>",
    );
    reducer
        .reduce_with(&registry, &["parse", "simplify-attributes", "tables-to-text"])
        .unwrap();
    let html = reducer.to_html().unwrap();
    assert!(html.contains("<p data-keep=\"1\">t</p>"));
    assert!(html.contains("| 1 |\n| 2 |"));
    assert!(!html.contains("---"));
}
