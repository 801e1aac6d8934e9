//! Report Errors

use fernwood_app::domain::reports::ReportsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: ReportsServiceError) -> StatusError {
    error!("failed to build report: {error}");

    StatusError::internal_server_error()
}
