//! Pipeline construction and execution
//!
//! A [`Pipeline`] is an ordered list of steps resolved eagerly against a
//! [`StageRegistry`]: an unknown name fails construction, so nothing ever runs
//! from a half-valid configuration.
//!
//! A [`Reducer`] is one reduction session over one input. It owns the raw markup,
//! the parsed document (once `parse` has run) and the metrics collected so far.

use crate::dom::{parse_html, serialize_document, Document};
use crate::error::ReduceError;
use crate::metrics::{ApproxTokenCounter, MetricsCollector, ReductionReport, TokenCounter};
use crate::registry::{StageRegistry, PARSE_ALIAS, PARSE_STEP};
use crate::stage::Stage;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Steps run when no pipeline is configured
pub const DEFAULT_PIPELINE: &[&str] = &[
    "parse",
    "strip-clutter",
    "strip-non-visual",
    "simplify-attributes",
    "collapse-nesting",
    "prune-duplicate-nav",
    "media-placeholders",
];

/// Default pipeline plus utility-class stripping, table conversion and whitespace minification
pub const EXTENDED_PIPELINE: &[&str] = &[
    "parse",
    "strip-clutter",
    "strip-non-visual",
    "simplify-attributes",
    "strip-utility-classes",
    "collapse-nesting",
    "prune-duplicate-nav",
    "tables-to-text",
    "drop-large-table-row-ids",
    "media-placeholders",
    "minify-whitespace",
];

/// One resolved pipeline entry
#[derive(Clone)]
pub enum Step {
    /// (Re)build the document from the raw markup
    Parse,
    Stage(Arc<dyn Stage>),
}

impl Step {
    pub fn name(&self) -> &str {
        match self {
            Step::Parse => PARSE_STEP,
            Step::Stage(stage) => stage.name(),
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step({})", self.name())
    }
}

/// An ordered, validated list of steps
#[derive(Debug, Clone)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    /// Resolve every name against `registry`; the first unknown name is an error
    pub fn new<S: AsRef<str>>(registry: &StageRegistry, names: &[S]) -> Result<Self, ReduceError> {
        let steps = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                if name == PARSE_STEP || name == PARSE_ALIAS {
                    Ok(Step::Parse)
                } else {
                    registry.get(name).map(Step::Stage)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Pipeline { steps })
    }

    /// The default pipeline resolved against `registry`
    pub fn default_for(registry: &StageRegistry) -> Result<Self, ReduceError> {
        Self::new(registry, DEFAULT_PIPELINE)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// A reduction session over one input document
pub struct Reducer {
    raw_html: String,
    document: Option<Document>,
    metrics: MetricsCollector,
}

impl Reducer {
    /// Start a session with the approximate token counter
    pub fn new(raw_html: impl Into<String>) -> Self {
        Self::with_token_counter(raw_html, Arc::new(ApproxTokenCounter::default()))
    }

    pub fn with_token_counter(raw_html: impl Into<String>, counter: Arc<dyn TokenCounter>) -> Self {
        let raw_html = raw_html.into();
        let metrics = MetricsCollector::new(counter, &raw_html);
        Reducer {
            raw_html,
            document: None,
            metrics,
        }
    }

    pub fn raw_html(&self) -> &str {
        &self.raw_html
    }

    pub fn is_parsed(&self) -> bool {
        self.document.is_some()
    }

    /// Parse the raw markup, replacing any previously parsed document
    pub fn parse(&mut self) -> Result<&mut Self, ReduceError> {
        let doc = parse_html(&self.raw_html);
        let html = serialize_document(&doc)?;
        self.document = Some(doc);
        self.record(PARSE_STEP, &html);
        Ok(self)
    }

    /// Apply one stage to the parsed document
    pub fn apply(&mut self, stage: &dyn Stage) -> Result<&mut Self, ReduceError> {
        let doc = self
            .document
            .as_mut()
            .ok_or_else(|| ReduceError::Unparsed(stage.name().to_string()))?;
        stage.apply(doc);
        let html = doc.to_html()?;
        self.record(stage.name(), &html);
        Ok(self)
    }

    /// Run every step of `pipeline` in order
    pub fn run(&mut self, pipeline: &Pipeline) -> Result<&mut Self, ReduceError> {
        for step in pipeline.steps() {
            match step {
                Step::Parse => self.parse()?,
                Step::Stage(stage) => self.apply(stage.as_ref())?,
            };
        }
        let report = self.metrics.report();
        info!(
            steps = pipeline.len(),
            chars_before = report.total_char_len,
            chars_after = report.reduced_char_len,
            tokens_before = report.raw_token_size,
            tokens_after = report.reduced_token_size,
            "reduction finished"
        );
        Ok(self)
    }

    /// Run the named steps with the default registry; an empty list runs [`DEFAULT_PIPELINE`]
    pub fn reduce(&mut self, names: &[&str]) -> Result<&mut Self, ReduceError> {
        self.reduce_with(&StageRegistry::with_defaults(), names)
    }

    /// Run the named steps resolved against `registry`; an empty list runs [`DEFAULT_PIPELINE`]
    pub fn reduce_with<S: AsRef<str>>(
        &mut self,
        registry: &StageRegistry,
        names: &[S],
    ) -> Result<&mut Self, ReduceError> {
        let pipeline = if names.is_empty() {
            Pipeline::default_for(registry)?
        } else {
            Pipeline::new(registry, names)?
        };
        self.run(&pipeline)
    }

    /// Serialize the current tree
    pub fn to_html(&self) -> Result<String, ReduceError> {
        self.document()?.to_html()
    }

    pub fn document(&self) -> Result<&Document, ReduceError> {
        self.document
            .as_ref()
            .ok_or_else(|| ReduceError::Unparsed("serialize".to_string()))
    }

    pub fn document_mut(&mut self) -> Result<&mut Document, ReduceError> {
        self.document
            .as_mut()
            .ok_or_else(|| ReduceError::Unparsed("serialize".to_string()))
    }

    /// Parser recovery messages (empty before parsing)
    pub fn warnings(&self) -> &[String] {
        self.document
            .as_ref()
            .map(Document::warnings)
            .unwrap_or_default()
    }

    pub fn report(&self) -> ReductionReport {
        self.metrics.report()
    }

    fn record(&mut self, step: &str, html: &str) {
        let stats = self.metrics.record(step, html);
        debug!(
            step,
            chars = stats.chars_after,
            char_delta = stats.char_delta,
            tokens = stats.tokens_after,
            token_delta = stats.token_delta,
            "step finished"
        );
    }
}
