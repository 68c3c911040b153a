use std::sync::Arc;

use crate::gate::AuthGate;

pub struct AppState {
    /// The request classifier, immutable after startup and safe to share
    /// across concurrent invocations without locking
    pub gate: Arc<AuthGate>,
}
