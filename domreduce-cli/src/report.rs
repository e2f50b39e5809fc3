//! Rendering of the per-step reduction report
//!
//! The report goes to stderr so that stdout only ever carries reduced markup.

use domreduce::ReductionReport;

/// How the report is printed after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsFormat {
    Text,
    Json,
    None,
}

impl StatsFormat {
    pub const NAMES: &'static [&'static str] = &["none", "text", "json"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(StatsFormat::Text),
            "json" => Some(StatsFormat::Json),
            "none" => Some(StatsFormat::None),
            _ => None,
        }
    }
}

/// Render `report` in `format`; `None` when nothing should be printed
pub fn render(report: &ReductionReport, format: StatsFormat) -> Result<Option<String>, serde_json::Error> {
    match format {
        StatsFormat::Text => Ok(Some(render_text(report))),
        StatsFormat::Json => render_json(report).map(Some),
        StatsFormat::None => Ok(None),
    }
}

pub fn render_json(report: &ReductionReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// A fixed-width table, one line per step, followed by the totals
pub fn render_text(report: &ReductionReport) -> String {
    let mut out = format!(
        "{:<28}{:>10}{:>10}{:>10}{:>10}\n",
        "step", "chars", "Δchars", "tokens", "Δtokens"
    );
    for step in &report.steps {
        out.push_str(&format!(
            "{:<28}{:>10}{:>10}{:>10}{:>10}\n",
            step.step,
            step.chars_after,
            format!("{:+}", step.char_delta),
            step.tokens_after,
            format!("{:+}", step.token_delta),
        ));
    }
    out.push_str(&format!(
        "total: {} -> {} chars ({:.1}%), {} -> {} tokens ({})\n",
        report.total_char_len,
        report.reduced_char_len,
        report.char_ratio() * 100.0,
        report.raw_token_size,
        report.reduced_token_size,
        report.token_counter,
    ));
    out
}
