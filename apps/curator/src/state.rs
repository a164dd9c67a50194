use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::curation::models::StudentSample;
use crate::curation::store::ExampleStore;
use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The curated set. Handlers mutate it only through `ExampleStore` methods.
    pub store: Arc<RwLock<ExampleStore>>,
    /// Student samples loaded once at startup; read-only.
    pub samples: Arc<Vec<StudentSample>>,
    pub llm: Arc<dyn CompletionProvider>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        store: ExampleStore,
        samples: Vec<StudentSample>,
        llm: Arc<dyn CompletionProvider>,
        config: Config,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            samples: Arc::new(samples),
            llm,
            config,
        }
    }
}
