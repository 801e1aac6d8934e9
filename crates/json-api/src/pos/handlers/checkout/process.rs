//! Process Payment Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    observability::record_sale,
    pos::errors::into_status_error,
    state::State,
    transactions::TransactionResponse,
};

/// Settled sale
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SaleResponse {
    pub transaction: TransactionResponse,

    /// Plain text receipt
    pub receipt: String,
}

/// Process Payment Handler
///
/// Takes the payment, records the transaction and clears the register. Every payment method waits
/// out the configured processing delay before settling, and the sale still settles if the client
/// goes away meanwhile. Stock on hand is not touched.
#[endpoint(
    tags("pos"),
    summary = "Process Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Sale settled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cash tendered is below the total"),
        (status_code = StatusCode::CONFLICT, description = "Checkout not ready"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SaleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cashier = depot.auth_user_or_401()?;

    let sale = state
        .app
        .pos
        .process_payment(cashier)
        .await
        .map_err(into_status_error)?;

    record_sale(sale.transaction.payment_method, sale.transaction.total);

    Ok(Json(SaleResponse {
        transaction: sale.transaction.into(),
        receipt: sale.receipt,
    }))
}
