//! Per-invocation state shared by every command: resolved config, the
//! loaded catalog and the persisted selection/purchased sets.

use anyhow::{Context, Result};
use larder_core::aggregate::Aggregation;
use larder_core::capabilities::detect_capabilities;
use larder_core::config::{EffectiveConfig, resolve_config};
use larder_core::export::ExportActions;
use larder_core::{Catalog, FileStore, Persistence, aggregate};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::output::OutputMode;
use crate::platform;

/// Global path flags that override config.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub catalog: Option<PathBuf>,
    pub store: Option<PathBuf>,
    pub format: Option<OutputMode>,
    pub json: bool,
}

pub struct Planner {
    pub config: EffectiveConfig,
    pub catalog: Catalog,
    pub persistence: Persistence<FileStore>,
}

impl Planner {
    /// Resolve config without loading the catalog.
    pub fn config(project_root: &Path, overrides: &Overrides) -> Result<EffectiveConfig> {
        let mut config = resolve_config(
            project_root,
            overrides.format.map(OutputMode::as_str),
            overrides.json,
        )?;
        if let Some(path) = &overrides.catalog {
            config.catalog = project_root.join(path);
        }
        if let Some(path) = &overrides.store {
            config.store = project_root.join(path);
        }
        Ok(config)
    }

    pub fn open(project_root: &Path, overrides: &Overrides) -> Result<Self> {
        let config = Self::config(project_root, overrides)?;
        let catalog = Catalog::load(&config.catalog)
            .with_context(|| format!("loading recipes from {}", config.catalog.display()))?;
        let persistence = Persistence::new(FileStore::new(&config.store));
        debug!(
            catalog = %config.catalog.display(),
            store = %config.store.display(),
            recipes = catalog.len(),
            "planner opened"
        );
        Ok(Self {
            config,
            catalog,
            persistence,
        })
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_resolved(&self.config.resolved_output)
    }

    /// Aggregation for the stored selection.
    pub fn aggregation(&self) -> Result<Aggregation> {
        let selection = self.persistence.selected_recipe_ids()?;
        Ok(aggregate(&selection, self.catalog.cards()))
    }

    pub fn export_actions(&self) -> ExportActions {
        let caps = detect_capabilities(&self.config.commands);
        platform::export_actions(&self.config, &caps)
    }
}
