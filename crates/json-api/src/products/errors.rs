//! Product Errors

use fernwood_app::domain::products::ProductsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A product with that SKU already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::MissingRequiredData(field) => {
            StatusError::bad_request().brief(format!("Product {field} is required"))
        }
        ProductsServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Product price is out of range")
        }
        ProductsServiceError::Catalog(source) => {
            error!("failed to build catalog: {source}");

            StatusError::internal_server_error()
        }
        ProductsServiceError::Storage(source) => {
            error!("failed to persist products: {source}");

            StatusError::internal_server_error()
        }
    }
}
