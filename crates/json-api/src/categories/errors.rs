//! Category Errors

use fernwood_app::domain::categories::CategoriesServiceError;
use salvo::http::StatusError;

pub(crate) fn into_status_error(error: CategoriesServiceError) -> StatusError {
    match error {
        CategoriesServiceError::NotFound => StatusError::not_found().brief("Category not found"),
        CategoriesServiceError::SlugTaken(slug) => {
            StatusError::conflict().brief(format!("Slug {slug} is already in use"))
        }
        CategoriesServiceError::MissingRequiredData(field) => {
            StatusError::bad_request().brief(format!("Category {field} is required"))
        }
    }
}
