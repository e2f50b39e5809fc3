//! Inline `style` attribute inspection
//!
//! Only the literal declarations on the element are considered; there is no cascade.

/// Split a style string into lower-cased `(property, value)` declarations
pub fn declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim().to_ascii_lowercase();
            if prop.is_empty() {
                return None;
            }
            let value = value.trim().to_ascii_lowercase();
            let value = value
                .strip_suffix("!important")
                .map(str::trim_end)
                .unwrap_or(&value)
                .to_string();
            Some((prop, value))
        })
        .collect()
}

/// Effective `display` value: the last declaration wins
pub fn display(style: &str) -> Option<String> {
    declarations(style)
        .into_iter()
        .filter(|(prop, _)| prop == "display")
        .map(|(_, value)| value)
        .last()
}

pub fn is_display_none(style: &str) -> bool {
    display(style).as_deref() == Some("none")
}

/// `display: table` or `display: inline-table`
pub fn is_display_table(style: &str) -> bool {
    matches!(display(style).as_deref(), Some("table" | "inline-table"))
}

pub fn is_display_table_row(style: &str) -> bool {
    display(style).as_deref() == Some("table-row")
}

pub fn is_display_table_cell(style: &str) -> bool {
    display(style).as_deref() == Some("table-cell")
}
