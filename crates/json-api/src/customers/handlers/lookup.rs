//! Customer Lookup Handler
//!
//! The till's search box for attaching a customer to a sale.

use std::sync::Arc;

use fernwood_app::domain::customers::models::{Customer, CustomerFilter};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{customers::errors::into_status_error, extensions::*, state::State};

/// Most matches returned to the till.
const LOOKUP_LIMIT: usize = 10;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerMatch {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub loyalty_points: u64,
}

impl From<Customer> for CustomerMatch {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            loyalty_points: customer.loyalty_points,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerLookupResponse {
    pub customers: Vec<CustomerMatch>,
}

/// Customer Lookup Handler
///
/// Matches `q` against name, email or phone.
#[endpoint(
    tags("pos"),
    summary = "Look Up Customers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CustomerLookupResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = CustomerFilter {
        search: q.into_inner(),
        status: None,
    };

    let customers = state
        .app
        .customers
        .list_customers(&filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CustomerLookupResponse {
        customers: customers
            .into_iter()
            .take(LOOKUP_LIMIT)
            .map(Into::into)
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use fernwood_app::domain::customers::models::CustomerStatus;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{CASHIER, Mocks};

    use super::{super::tests::make_customer, *};

    #[tokio::test]
    async fn test_lookup_caps_matches() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .customers
            .expect_list_customers()
            .once()
            .withf(|filter| filter.search.as_deref() == Some("0244"))
            .return_once(|_| {
                Ok((1..=15)
                    .map(|n| make_customer(&n.to_string(), "Ama Mensah", CustomerStatus::Active))
                    .collect())
            });

        let response: CustomerLookupResponse =
            TestClient::get("http://example.com/customers/lookup?q=0244")
                .send(&mocks.service(
                    CASHIER,
                    Router::with_path("customers/lookup").get(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(response.customers.len(), LOOKUP_LIMIT);
        assert_eq!(
            response.customers.first().map(|customer| customer.id.as_str()),
            Some("1")
        );

        Ok(())
    }
}
