//! Depot helper extensions.

use std::any::Any;

use fernwood_app::auth::AuthUser;
use salvo::prelude::{Depot, StatusError};

const AUTH_USER_DEPOT_KEY: &str = "auth_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_auth_user(&mut self, user: AuthUser);

    fn auth_user_or_401(&self) -> Result<&AuthUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_auth_user(&mut self, user: AuthUser) {
        self.insert(AUTH_USER_DEPOT_KEY, user);
    }

    fn auth_user_or_401(&self) -> Result<&AuthUser, StatusError> {
        self.get::<AuthUser>(AUTH_USER_DEPOT_KEY)
            .map_err(|_ignored| StatusError::unauthorized().brief("Not signed in"))
    }
}
