//! Tunables shared by the built-in stages

/// Attributes kept by `simplify-attributes` when no other list is configured
pub const DEFAULT_ALLOWED_ATTRIBUTES: &[&str] = &["id", "class", "href", "src", "alt", "title", "role"];

/// Token appended to a truncated class list
pub const CLASS_ELLIPSIS: &str = "…";

/// When a converted table gets a `| --- |` separator after its first row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderSeparator {
    /// Row one is always treated as the header
    #[default]
    Always,
    /// Only when the first row has `th` cells or sits inside `thead`
    Marked,
}

impl HeaderSeparator {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "always" => Some(HeaderSeparator::Always),
            "marked" => Some(HeaderSeparator::Marked),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderSeparator::Always => "always",
            HeaderSeparator::Marked => "marked",
        }
    }
}

/// Options for the stages built by [`crate::registry::StageRegistry::with_options`]
#[derive(Debug, Clone, PartialEq)]
pub struct ReducerOptions {
    pub allowed_attributes: Vec<String>,
    /// Class lists longer than this are truncated and get an ellipsis token
    pub max_class_tokens: usize,
    /// `data:image` sources longer than this are replaced by a placeholder
    pub data_uri_max_len: usize,
    /// Images whose declared width × height exceeds this are replaced by a placeholder
    pub max_image_area: u64,
    pub header_separator: HeaderSeparator,
    /// Row count above which `drop-large-table-row-ids` strips ids
    pub large_table_rows: usize,
}

impl Default for ReducerOptions {
    fn default() -> Self {
        ReducerOptions {
            allowed_attributes: DEFAULT_ALLOWED_ATTRIBUTES
                .iter()
                .map(|a| a.to_string())
                .collect(),
            max_class_tokens: 6,
            data_uri_max_len: 1500,
            max_image_area: 512 * 512,
            header_separator: HeaderSeparator::Always,
            large_table_rows: 10,
        }
    }
}
