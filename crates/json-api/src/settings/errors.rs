//! Settings Errors

use fernwood_app::domain::settings::SettingsServiceError;
use salvo::http::StatusError;

pub(crate) fn into_status_error(error: SettingsServiceError) -> StatusError {
    match error {
        SettingsServiceError::TaxRate(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        SettingsServiceError::NoPaymentMethods => {
            StatusError::bad_request().brief("At least one payment method must stay enabled")
        }
        SettingsServiceError::UnsupportedCurrency { expected, found } => StatusError::bad_request()
            .brief(format!("The store trades in {expected}, not {found}")),
        SettingsServiceError::MissingRequiredData(field) => {
            StatusError::bad_request().brief(format!("Store {field} is required"))
        }
    }
}
