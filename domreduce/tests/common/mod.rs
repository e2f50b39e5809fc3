//! Shared helpers for the integration tests

use domreduce::{ReductionReport, Reducer};
use std::path::PathBuf;

/// Read an HTML page from `tests/fixtures`
pub fn load_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

/// Run `names` over `html` and return the reduced markup with its report
pub fn reduce(html: &str, names: &[&str]) -> (String, ReductionReport) {
    let mut reducer = Reducer::new(html);
    reducer.reduce(names).expect("pipeline should run");
    let output = reducer.to_html().expect("document should serialize");
    (output, reducer.report())
}

/// Markup between the `<body ...>` start tag and `</body>`
pub fn body(html: &str) -> &str {
    let start = html
        .find("<body")
        .and_then(|i| html[i..].find('>').map(|end| i + end + 1))
        .unwrap_or(0);
    let end = html.rfind("</body>").unwrap_or(html.len());
    &html[start..end]
}
