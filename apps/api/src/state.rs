use std::sync::Arc;

use tokio::sync::Mutex;

use crate::chat::wizard::ChatWizard;
use crate::config::Config;
use crate::context::store::ZcvStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ZcvStore>,
    /// Discovery-session progress; lives beside the store, not inside it,
    /// and is never mirrored.
    pub chat: Arc<Mutex<ChatWizard>>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: ZcvStore, config: Config) -> Self {
        let wizard = ChatWizard::new(config.chat_seed);
        Self {
            store: Arc::new(store),
            chat: Arc::new(Mutex::new(wizard)),
            config,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// In-memory mirror, zero delays and a fixed chat seed.
    pub fn for_tests() -> Self {
        let mirror = Arc::new(crate::persistence::MemoryStore::default());
        let config = Config::for_tests(std::path::PathBuf::from("unused.json"));
        Self::new(ZcvStore::new(mirror), config)
    }
}
