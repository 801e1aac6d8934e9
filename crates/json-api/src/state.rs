//! State

use std::sync::Arc;

use fernwood_app::context::AppContext;

/// Shared by every request through the depot.
#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
