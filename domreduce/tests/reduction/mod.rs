//! End-to-end reduction tests
//!
//! Pipelines run through the public `Reducer` API, from raw markup to reduced markup.

mod pages;
mod pipeline;
mod properties;
