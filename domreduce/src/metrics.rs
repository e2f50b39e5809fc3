//! Size bookkeeping for a reduction run
//!
//! Every step of a run is measured on the serialized markup: character length
//! (Unicode scalar values) and an approximate token count. The collector keeps the
//! baseline taken on the raw input and one [`ReductionStats`] entry per step, in
//! execution order.

use serde::Serialize;
use std::sync::Arc;

#[cfg(feature = "tiktoken")]
use crate::error::ReduceError;

/// Counts tokens in a text blob. Must be deterministic for a given text.
pub trait TokenCounter: Send + Sync {
    /// Short identifier shown in reports ("approx", "cl100k")
    fn name(&self) -> &str;

    fn count(&self, text: &str) -> usize;
}

/// Character-ratio estimate: `ceil(chars / chars_per_token)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxTokenCounter {
    pub chars_per_token: f64,
}

impl ApproxTokenCounter {
    pub fn new(chars_per_token: f64) -> Self {
        ApproxTokenCounter { chars_per_token }
    }
}

impl Default for ApproxTokenCounter {
    fn default() -> Self {
        ApproxTokenCounter::new(4.0)
    }
}

impl TokenCounter for ApproxTokenCounter {
    fn name(&self) -> &str {
        "approx"
    }

    fn count(&self, text: &str) -> usize {
        let chars = text.chars().count();
        if self.chars_per_token <= 0.0 {
            return chars;
        }
        (chars as f64 / self.chars_per_token).ceil() as usize
    }
}

/// Exact counts with the cl100k_base BPE encoding
#[cfg(feature = "tiktoken")]
pub struct Cl100kTokenCounter {
    bpe: tiktoken_rs::CoreBPE,
}

#[cfg(feature = "tiktoken")]
impl Cl100kTokenCounter {
    pub fn new() -> Result<Self, ReduceError> {
        let bpe = tiktoken_rs::cl100k_base()
            .map_err(|e| ReduceError::Tokenizer(format!("failed to load cl100k_base: {e}")))?;
        Ok(Cl100kTokenCounter { bpe })
    }
}

#[cfg(feature = "tiktoken")]
impl TokenCounter for Cl100kTokenCounter {
    fn name(&self) -> &str {
        "cl100k"
    }

    fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

/// Before/after sizes of one pipeline step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReductionStats {
    pub step: String,
    pub chars_before: usize,
    pub chars_after: usize,
    /// `chars_after - chars_before`; negative when the step shrank the markup
    pub char_delta: i64,
    pub tokens_before: usize,
    pub tokens_after: usize,
    pub token_delta: i64,
}

/// Aggregate result of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReductionReport {
    pub token_counter: String,
    pub total_char_len: usize,
    pub raw_token_size: usize,
    pub reduced_char_len: usize,
    pub reduced_token_size: usize,
    pub steps: Vec<ReductionStats>,
}

impl ReductionReport {
    pub fn char_delta(&self) -> i64 {
        delta(self.total_char_len, self.reduced_char_len)
    }

    pub fn token_delta(&self) -> i64 {
        delta(self.raw_token_size, self.reduced_token_size)
    }

    /// Reduced size as a fraction of the raw size (1.0 for empty input)
    pub fn char_ratio(&self) -> f64 {
        if self.total_char_len == 0 {
            return 1.0;
        }
        self.reduced_char_len as f64 / self.total_char_len as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Measurement {
    chars: usize,
    tokens: usize,
}

/// Records one [`ReductionStats`] per step against a running measurement
pub struct MetricsCollector {
    counter: Arc<dyn TokenCounter>,
    baseline: Measurement,
    current: Measurement,
    steps: Vec<ReductionStats>,
}

impl MetricsCollector {
    /// Start a collection, taking the baseline on the raw markup
    pub fn new(counter: Arc<dyn TokenCounter>, raw: &str) -> Self {
        let baseline = Measurement {
            chars: raw.chars().count(),
            tokens: counter.count(raw),
        };
        MetricsCollector {
            counter,
            baseline,
            current: baseline,
            steps: Vec::new(),
        }
    }

    pub fn counter(&self) -> &dyn TokenCounter {
        self.counter.as_ref()
    }

    /// Measure `serialized` and record it as the result of `step`
    pub fn record(&mut self, step: &str, serialized: &str) -> &ReductionStats {
        let after = Measurement {
            chars: serialized.chars().count(),
            tokens: self.counter.count(serialized),
        };
        let before = std::mem::replace(&mut self.current, after);
        self.steps.push(ReductionStats {
            step: step.to_string(),
            chars_before: before.chars,
            chars_after: after.chars,
            char_delta: delta(before.chars, after.chars),
            tokens_before: before.tokens,
            tokens_after: after.tokens,
            token_delta: delta(before.tokens, after.tokens),
        });
        &self.steps[self.steps.len() - 1]
    }

    pub fn steps(&self) -> &[ReductionStats] {
        &self.steps
    }

    pub fn report(&self) -> ReductionReport {
        ReductionReport {
            token_counter: self.counter.name().to_string(),
            total_char_len: self.baseline.chars,
            raw_token_size: self.baseline.tokens,
            reduced_char_len: self.current.chars,
            reduced_token_size: self.current.tokens,
            steps: self.steps.clone(),
        }
    }
}

fn delta(before: usize, after: usize) -> i64 {
    after as i64 - before as i64
}
