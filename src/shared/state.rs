use crate::core::config::AppConfig;
use crate::shared::utils::DbPool;

/// Shared per-process state handed to every handler. The pool is the only
/// store handle in the process; requests hold no other shared mutable state.
#[derive(Clone)]
pub struct AppState {
    pub conn: DbPool,
    pub config: AppConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("conn", &"DbPool")
            .field("config", &self.config)
            .finish()
    }
}
