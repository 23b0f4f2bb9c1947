use crate::config::Settings;
use crate::store::DateStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: DateStore,
    pub settings: Arc<Settings>,
    /// Bearer token required by the write routes. `None` rejects all
    /// writes; it never appears in `/api/settings`.
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(store: DateStore, settings: Settings, admin_token: Option<String>) -> Self {
        Self {
            store,
            settings: Arc::new(settings),
            admin_token: admin_token.map(Arc::from),
        }
    }
}
