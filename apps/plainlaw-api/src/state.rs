//! Application state for the PlainLaw API
//!
//! Holds the shared model-service handle. The handle is constructed once at
//! startup and is read-only afterwards, so requests can invoke it
//! concurrently without coordination.

use std::sync::Arc;

use plainlaw_core::ModelService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Pretrained-model inference client
    pub models: Arc<dyn ModelService>,
}

impl AppState {
    pub fn new(models: Arc<dyn ModelService>) -> Self {
        Self { models }
    }
}
