//! Stage registry for stage discovery and selection
//!
//! This module provides a centralized registry for all available stages.
//! Stages are registered under their canonical identifier and can be retrieved
//! by that identifier or by any of their aliases.

use crate::error::ReduceError;
use crate::options::ReducerOptions;
use crate::stage::Stage;
use crate::stages;
use std::collections::HashMap;
use std::sync::Arc;

/// Identifier of the built-in parse step
pub const PARSE_STEP: &str = "parse";

/// Long-form alias of the parse step
pub const PARSE_ALIAS: &str = "parse_the_full_dom_into_a_dom_tree";

/// Registry of reduction stages
///
/// # Examples
///
/// ```ignore
/// let mut registry = StageRegistry::new();
/// registry.register(MyStage);
///
/// let stage = registry.get("my-stage")?;
/// stage.apply(&mut doc);
/// ```
pub struct StageRegistry {
    stages: HashMap<String, Arc<dyn Stage>>,
    aliases: HashMap<String, String>,
}

impl StageRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        StageRegistry {
            stages: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Register a stage
    ///
    /// If a stage with the same name already exists, it will be replaced.
    pub fn register<S: Stage + 'static>(&mut self, stage: S) {
        let name = stage.name().to_string();
        for alias in stage.aliases() {
            self.aliases.insert(alias.to_string(), name.clone());
        }
        self.stages.insert(name, Arc::new(stage));
    }

    /// Canonical identifier for a name or alias
    pub fn resolve(&self, name: &str) -> Option<&str> {
        if let Some((canonical, _)) = self.stages.get_key_value(name) {
            return Some(canonical.as_str());
        }
        self.aliases.get(name).map(String::as_str)
    }

    /// Get a stage by name or alias
    pub fn get(&self, name: &str) -> Result<Arc<dyn Stage>, ReduceError> {
        self.resolve(name)
            .and_then(|canonical| self.stages.get(canonical))
            .cloned()
            .ok_or_else(|| ReduceError::StageNotFound(name.to_string()))
    }

    /// Check if a stage exists under this name or alias
    pub fn has(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// List all registered stage identifiers (sorted)
    pub fn list_stages(&self) -> Vec<String> {
        let mut names: Vec<_> = self.stages.keys().cloned().collect();
        names.sort();
        names
    }

    /// `(identifier, description)` pairs, sorted by identifier
    pub fn describe(&self) -> Vec<(String, String)> {
        self.list_stages()
            .into_iter()
            .map(|name| {
                let description = self.stages[&name].description().to_string();
                (name, description)
            })
            .collect()
    }

    /// Create a registry with the built-in stages configured from `options`
    pub fn with_options(options: &ReducerOptions) -> Self {
        let mut registry = Self::new();

        registry.register(stages::StripClutter);
        registry.register(stages::StripNonVisual);
        registry.register(stages::SimplifyAttributes::from_options(options));
        registry.register(stages::StripUtilityClasses);
        registry.register(stages::CollapseNesting);
        registry.register(stages::PruneDuplicateNav);
        registry.register(stages::TablesToText::new(options.header_separator));
        registry.register(stages::DefinitionListsToText);
        registry.register(stages::ListsToText);
        registry.register(stages::FiguresToText);
        registry.register(stages::CssTablesToText::new(options.header_separator));
        registry.register(stages::DropLargeTableRowIds::new(options.large_table_rows));
        registry.register(stages::MediaPlaceholders::from_options(options));
        registry.register(stages::MinifyWhitespace);

        registry
    }

    /// Create a registry with the built-in stages and default options
    pub fn with_defaults() -> Self {
        Self::with_options(&ReducerOptions::default())
    }
}

impl Default for StageRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
