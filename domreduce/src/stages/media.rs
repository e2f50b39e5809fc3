//! media-placeholders: swap inline SVG and heavy images for size-only stubs
//!
//! Placeholders are built as typed nodes, never by parsing a markup snippet:
//!
//!     <svg data-placeholder="1" width="…" height="…"></svg>
//!     <img data-placeholder="1" width="…" height="…">

use crate::dom::{text, Document, NodeId};
use crate::options::ReducerOptions;
use crate::stage::Stage;
use tracing::debug;

pub const PLACEHOLDER_ATTR: &str = "data-placeholder";

#[derive(Debug, Clone, Copy)]
pub struct MediaPlaceholders {
    pub data_uri_max_len: usize,
    pub max_image_area: u64,
}

impl MediaPlaceholders {
    pub fn new(data_uri_max_len: usize, max_image_area: u64) -> Self {
        MediaPlaceholders {
            data_uri_max_len,
            max_image_area,
        }
    }

    pub fn from_options(options: &ReducerOptions) -> Self {
        Self::new(options.data_uri_max_len, options.max_image_area)
    }

    /// Embedded `data:image` payload over the length limit, or declared area over the limit
    pub fn is_heavy_image(&self, doc: &Document, img: NodeId) -> bool {
        let src = doc.attr(img, "src").unwrap_or("");
        let big_data_uri = src.starts_with("data:image") && src.len() > self.data_uri_max_len;

        let dimension = |name: &str| doc.attr(img, name).map_or(0, text::leading_number);
        let big_dims = dimension("width").saturating_mul(dimension("height")) > self.max_image_area;

        big_data_uri || big_dims
    }
}

impl Default for MediaPlaceholders {
    fn default() -> Self {
        Self::from_options(&ReducerOptions::default())
    }
}

fn is_placeholder(doc: &Document, id: NodeId) -> bool {
    doc.attr(id, PLACEHOLDER_ATTR) == Some("1") && doc.children(id).is_empty()
}

/// Replace `target` with a `tag` stub carrying only its dimensions
fn replace_with_placeholder(doc: &mut Document, target: NodeId, tag: &str, default_size: &str) {
    let width = doc.attr(target, "width").unwrap_or(default_size).to_string();
    let height = doc.attr(target, "height").unwrap_or(default_size).to_string();
    let stub = doc.create_element(
        tag,
        vec![
            (PLACEHOLDER_ATTR, "1"),
            ("width", width.as_str()),
            ("height", height.as_str()),
        ],
    );
    doc.replace(target, stub);
}

impl Stage for MediaPlaceholders {
    fn name(&self) -> &str {
        "media-placeholders"
    }

    fn description(&self) -> &str {
        "Replace inline SVG and oversized images with size-only placeholders"
    }

    fn aliases(&self) -> &[&str] {
        &["reduce_large_inline_SVGs_or_images_to_lightweight_placeholders"]
    }

    fn apply(&self, doc: &mut Document) {
        let mut svgs = 0;
        for svg in doc.elements_by_tag(&["svg"]) {
            if !doc.is_attached(svg) || is_placeholder(doc, svg) {
                continue;
            }
            replace_with_placeholder(doc, svg, "svg", "100%");
            svgs += 1;
        }

        let mut images = 0;
        for img in doc.elements_by_tag(&["img"]) {
            if !doc.is_attached(img) || is_placeholder(doc, img) || !self.is_heavy_image(doc, img) {
                continue;
            }
            replace_with_placeholder(doc, img, "img", "auto");
            images += 1;
        }
        debug!(svgs, images, "replaced heavy media with placeholders");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::test_support::{apply_to_body, assert_idempotent};

    #[test]
    fn svg_keeps_only_dimensions() {
        let out = apply_to_body(
            &MediaPlaceholders::default(),
            "<body><svg width=\"800\" height=\"600\" viewBox=\"0 0 8 6\"><circle cx=\"50\" cy=\"50\" r=\"40\"></circle></svg><svg><path d=\"M0\"></path></svg></body>",
        );
        assert_eq!(
            out,
            "<svg data-placeholder=\"1\" width=\"800\" height=\"600\"></svg><svg data-placeholder=\"1\" width=\"100%\" height=\"100%\"></svg>"
        );
    }

    #[test]
    fn large_data_uri_image_is_replaced() {
        let src = format!("data:image/png;base64,{}", "A".repeat(2000));
        let out = apply_to_body(
            &MediaPlaceholders::default(),
            &format!("<body><img src=\"{src}\" alt=\"logo\"></body>"),
        );
        assert_eq!(
            out,
            "<img data-placeholder=\"1\" width=\"auto\" height=\"auto\">"
        );
    }

    #[test]
    fn large_declared_area_is_replaced() {
        let out = apply_to_body(
            &MediaPlaceholders::default(),
            "<body><img src=\"big.jpg\" width=\"1024px\" height=\"768\"></body>",
        );
        assert_eq!(
            out,
            "<img data-placeholder=\"1\" width=\"1024px\" height=\"768\">"
        );
    }

    #[test]
    fn small_images_are_untouched() {
        let html = "<body><img src=\"data:image/gif;base64,R0lGOD\"><img src=\"a.png\" width=\"512\" height=\"512\"><img src=\"b.png\" width=\"auto\"></body>";
        let out = apply_to_body(&MediaPlaceholders::default(), html);
        assert_eq!(
            out,
            "<img src=\"data:image/gif;base64,R0lGOD\"><img src=\"a.png\" width=\"512\" height=\"512\"><img src=\"b.png\" width=\"auto\">"
        );
    }

    #[test]
    fn thresholds_are_configurable() {
        let stage = MediaPlaceholders::new(10, 100);
        let out = apply_to_body(
            &stage,
            "<body><img src=\"a.png\" width=\"11\" height=\"10\"></body>",
        );
        assert!(out.contains(PLACEHOLDER_ATTR));
    }

    #[test]
    fn is_idempotent() {
        assert_idempotent(
            &MediaPlaceholders::default(),
            "<body><svg><g></g></svg><img width=\"2000\" height=\"2000\" src=\"x\"></body>",
        );
    }
}
