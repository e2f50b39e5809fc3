//! Attribute-level reductions
//!
//! - simplify-attributes: keep only an allow-list of attributes and cap long class lists
//! - strip-utility-classes: drop utility-framework class tokens (`px-4`, `md:flex`, `text-gray-500`)

use crate::dom::Document;
use crate::options::{ReducerOptions, CLASS_ELLIPSIS};
use crate::stage::Stage;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SimplifyAttributes {
    allowed: HashSet<String>,
    max_class_tokens: usize,
}

impl SimplifyAttributes {
    pub fn new<I, S>(allowed: I, max_class_tokens: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        SimplifyAttributes {
            allowed: allowed
                .into_iter()
                .map(|name| name.as_ref().to_ascii_lowercase())
                .collect(),
            max_class_tokens,
        }
    }

    pub fn from_options(options: &ReducerOptions) -> Self {
        Self::new(&options.allowed_attributes, options.max_class_tokens)
    }

    fn truncate_classes(&self, class: &str) -> Option<String> {
        let tokens: Vec<&str> = class.split_whitespace().collect();
        if tokens.len() <= self.max_class_tokens {
            return None;
        }
        let mut kept = tokens[..self.max_class_tokens].to_vec();
        kept.push(CLASS_ELLIPSIS);
        Some(kept.join(" "))
    }
}

impl Default for SimplifyAttributes {
    fn default() -> Self {
        Self::from_options(&ReducerOptions::default())
    }
}

impl Stage for SimplifyAttributes {
    fn name(&self) -> &str {
        "simplify-attributes"
    }

    fn description(&self) -> &str {
        "Keep only allow-listed attributes and cap long class lists"
    }

    fn aliases(&self) -> &[&str] {
        &["simplify_attributes"]
    }

    fn apply(&self, doc: &mut Document) {
        let mut dropped = 0;
        let mut truncated = 0;
        for id in doc.elements() {
            let Some(el) = doc.element_mut(id) else {
                continue;
            };
            let before = el.attrs.len();
            el.attrs
                .retain(|attr| self.allowed.contains(&attr.name.to_ascii_lowercase()));
            dropped += before - el.attrs.len();

            if let Some(class) = el.attr("class").and_then(|c| self.truncate_classes(c)) {
                el.set_attr("class", class);
                truncated += 1;
            }
        }
        debug!(dropped, truncated, "simplified attributes");
    }
}

/// Variant-prefixed tokens: `md:flex`, `hover:bg-blue-500`, `[&>*]:p-2`
static VARIANT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^:\s]+:\S+$").unwrap());

/// Utility prefixes followed by a recognizable value
static UTILITY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let sized = r"^-?(?:p[xytrblse]?|m[xytrblse]?|space-[xy]|gap(?:-[xy])?|w|h|min-w|min-h|max-w|max-h|size|inset(?:-[xy])?|top|right|bottom|left|z|basis|translate-[xy]|scroll-[mp][xytrbl]?|indent|leading|tracking|opacity|duration|delay|scale(?:-[xy])?|rotate|order|grow|shrink|columns|aspect|line-clamp)-(?:\d+(?:\.\d+)?|\d+/\d+|px|auto|full|screen|min|max|fit|none|normal|tight|tighter|snug|relaxed|loose|wide|wider|widest|xs|sm|md|lg|xl|\dxl|prose|svh|dvh|lvh|square|video|\[[^\]\s]+\])$";
    let palette = r"^(?:text|bg|border(?:-[xytrbl])?|ring(?:-offset)?|outline|divide(?:-[xy])?|from|via|to|fill|stroke|decoration|accent|caret|placeholder|shadow)-(?:(?:inherit|current|transparent|black|white|slate|gray|zinc|neutral|stone|red|orange|amber|yellow|lime|green|emerald|teal|cyan|sky|blue|indigo|violet|purple|fuchsia|pink|rose)(?:-\d{2,3})?(?:/\d{1,3})?|\d+|xs|sm|base|md|lg|xl|\dxl|left|center|right|justify|start|end|none|inner|solid|dashed|dotted|double|\[[^\]\s]+\])$";
    let keyword = r"^(?:font-(?:thin|extralight|light|normal|medium|semibold|bold|extrabold|black|sans|serif|mono)|rounded(?:-[trblse]{1,2})?(?:-(?:none|sm|md|lg|xl|\dxl|full))?|flex-(?:row|col|wrap|nowrap|1|auto|initial|none)(?:-reverse)?|grid-(?:cols|rows)-(?:\d+|none)|(?:col|row)-(?:span|start|end)-(?:\d+|full|auto)|justify-(?:start|end|center|between|around|evenly|items-\w+|self-\w+)|items-(?:start|end|center|baseline|stretch)|self-(?:auto|start|end|center|stretch)|content-(?:start|end|center|between|around|evenly)|place-(?:content|items|self)-\w+|overflow(?:-[xy])?-(?:auto|hidden|visible|scroll|clip)|object-(?:contain|cover|fill|none|scale-down|center|top|bottom)|cursor-\w+|select-(?:none|text|all|auto)|pointer-events-(?:none|auto)|transition(?:-\w+)?|ease-(?:linear|in|out|in-out)|animate-\w+|whitespace-\w+|break-(?:words|all|normal|keep)|align-\w+|drop-shadow(?:-\w+)?|blur(?:-\w+)?|backdrop-[\w-]+|list-(?:none|disc|decimal|inside|outside)|underline-offset-\w+|snap-\w+|touch-\w+)$";
    [sized, palette, keyword]
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
});

/// Bare layout/typography utilities
const BARE_UTILITIES: &[&str] = &[
    "flex", "inline-flex", "grid", "inline-grid", "block", "inline-block", "inline", "hidden",
    "contents", "flow-root", "static", "fixed", "absolute", "relative", "sticky", "visible",
    "invisible", "truncate", "italic", "not-italic", "underline", "overline", "line-through",
    "no-underline", "uppercase", "lowercase", "capitalize", "normal-case", "antialiased",
    "subpixel-antialiased", "sr-only", "not-sr-only", "container", "shadow", "rounded", "border",
    "ring", "outline", "transition", "transform", "grow", "shrink", "isolate",
];

pub fn is_utility_class(token: &str) -> bool {
    BARE_UTILITIES.contains(&token)
        || VARIANT.is_match(token)
        || UTILITY_PATTERNS.iter().any(|re| re.is_match(token))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StripUtilityClasses;

impl Stage for StripUtilityClasses {
    fn name(&self) -> &str {
        "strip-utility-classes"
    }

    fn description(&self) -> &str {
        "Drop utility-framework class tokens, keeping semantic class names"
    }

    fn aliases(&self) -> &[&str] {
        &["strip_tailwind_utility_classes"]
    }

    fn apply(&self, doc: &mut Document) {
        let mut dropped = 0;
        for id in doc.elements() {
            let Some(el) = doc.element_mut(id) else {
                continue;
            };
            let Some(class) = el.attr("class") else {
                continue;
            };
            let tokens: Vec<&str> = class.split_whitespace().collect();
            let kept: Vec<&str> = tokens
                .iter()
                .copied()
                .filter(|token| !is_utility_class(token))
                .collect();
            if kept.len() == tokens.len() {
                continue;
            }
            dropped += tokens.len() - kept.len();
            if kept.is_empty() {
                el.remove_attr("class");
            } else {
                let class = kept.join(" ");
                el.set_attr("class", class);
            }
        }
        debug!(dropped, "stripped utility classes");
    }
}
