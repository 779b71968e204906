use std::sync::Arc;

use resume_export::ExportSettings;

use crate::config::Config;
use crate::storage::{MemoryResumeStore, ResumeStorage};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn ResumeStorage>,
    /// Renderer settings; every export request gets its own exporter built from these
    pub export_settings: Arc<ExportSettings>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, export_settings: ExportSettings) -> Self {
        Self {
            storage: Arc::new(MemoryResumeStore::new()),
            export_settings: Arc::new(export_settings),
            config,
        }
    }
}
