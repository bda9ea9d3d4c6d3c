use crate::config::Config;
use crate::logger::Logger;
use crate::models::session::SessionStore;
use crate::repositories::registros::RecordStore;

/// The application's shared state.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Config,
    /// The file-backed record store.
    pub store: RecordStore,
    /// The in-memory session store.
    pub sessions: SessionStore,
    /// The dual-file application logger.
    pub logger: Logger,
}

impl AppState {
    /// Creates a new `AppState`. Nothing touches the filesystem here; the
    /// store file and log directory come into being on first use.
    pub fn new(config: &Config) -> Self {
        let logger = Logger::new(&config.log_dir);
        let store = RecordStore::new(&config.data_file, logger.clone());
        let sessions = SessionStore::new(config.session_ttl_minutes);
        tracing::info!("✅ AppState initialized");

        Self {
            config: config.clone(),
            store,
            sessions,
            logger,
        }
    }
}
