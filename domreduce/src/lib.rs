//! Token-oriented HTML reduction
//!
//!     This crate shrinks a full HTML document into a smaller one that keeps its visual and
//!     structural meaning, for consumers that pay per token (language models, mostly). It removes
//!     what never renders, compresses verbose structure and rewrites tables, lists, definition
//!     lists and figures as compact text, measuring the size of the markup after every step.
//!
//!     This is a pure lib, that is, it powers domreduce-cli but is shell agnostic: no code here
//!     prints, reads environment variables or touches the filesystem.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── stage.rs                # Stage trait definition
//!     ├── registry.rs             # StageRegistry for discovery and selection
//!     ├── pipeline.rs             # Pipeline (validated step list) and Reducer (session)
//!     ├── metrics.rs              # token counters and per-step size records
//!     ├── options.rs              # stage tunables
//!     ├── dom                     # arena document, html5ever parse/serialize adapters
//!     └── stages                  # built-in stages, one concern per file
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── common                  # fixture loading, run-and-serialize helpers
//!     ├── reduction
//!     │   ├── pages.rs            # whole fixture pages through the named pipelines
//!     │   ├── pipeline.rs         # one behavior per test through the public API
//!     │   └── properties.rs       # proptest: idempotence and size monotonicity
//!     └── fixtures
//!         └── <page>.html
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Document Model
//!
//!     html5ever does the parsing and serializing; the reducer itself works on an arena tree
//!     (./dom/document.rs) where nodes are addressed by copyable ids. Stages snapshot the ids they
//!     want to touch, then mutate: detached subtrees stay in the arena as orphans, so ids taken
//!     before a mutation never dangle.
//!
//! Stages
//!
//!     Stage specific behavior is implemented with the Stage trait, see ./stage.rs. A stage has a
//!     name, optional aliases and an apply() that mutates the document in place. Stages are total:
//!     an empty table or a list without items is skipped, never an error.
//!     - Stage trait: Uniform interface for all transformations
//!     - StageRegistry: Centralized discovery and selection of stages
//!     - Stage implementations: ./stages/<concern>.rs
//!
//! Pipelines
//!
//!     A pipeline is a list of stage names. It is resolved eagerly: one unknown name and nothing
//!     runs. `parse` is a built-in step rather than a stage, since it creates the document the
//!     stages operate on.
//!
//!     ```ignore
//!     let mut reducer = Reducer::new(html);
//!     reducer.reduce(&[])?;              // default pipeline
//!     let reduced = reducer.to_html()?;
//!     let report = reducer.report();     // sizes before/after every step
//!     ```

pub mod dom;
pub mod error;
pub mod metrics;
pub mod options;
pub mod pipeline;
pub mod registry;
pub mod stage;
pub mod stages;

pub use dom::{parse_html, Document, NodeData, NodeId};
pub use error::ReduceError;
#[cfg(feature = "tiktoken")]
pub use metrics::Cl100kTokenCounter;
pub use metrics::{ApproxTokenCounter, ReductionReport, ReductionStats, TokenCounter};
pub use options::{HeaderSeparator, ReducerOptions};
pub use pipeline::{Pipeline, Reducer, Step, DEFAULT_PIPELINE, EXTENDED_PIPELINE};
pub use registry::StageRegistry;
pub use stage::Stage;
