//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    domain::orders::{
        errors::OrdersServiceError,
        models::{Order, OrderFilter, OrderStatus},
    },
    listing::{matches_any, search_needle},
};

#[derive(Debug, Default)]
pub struct InMemoryOrdersService {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrdersService {
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }
}

#[async_trait]
impl OrdersService for InMemoryOrdersService {
    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, OrdersServiceError> {
        let needle = search_needle(filter.search.as_deref());

        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .iter()
            .filter(|order| {
                matches_any(needle.as_deref(), &[order.id.as_str(), order.customer.as_str()])
            })
            .filter(|order| filter.status.is_none_or(|status| order.status == status))
            .cloned()
            .collect();

        orders.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

        Ok(orders)
    }

    async fn get_order(&self, id: &str) -> Result<Order, OrdersServiceError> {
        self.orders
            .read()
            .await
            .iter()
            .find(|order| order.id.eq_ignore_ascii_case(id))
            .cloned()
            .ok_or(OrdersServiceError::NotFound)
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut orders = self.orders.write().await;

        let order = orders
            .iter_mut()
            .find(|order| order.id.eq_ignore_ascii_case(id))
            .ok_or(OrdersServiceError::NotFound)?;

        if order.status.is_terminal() && order.status != status {
            return Err(OrdersServiceError::Closed(order.status));
        }

        let previous = order.status;
        order.status = status;

        info!(from = %previous, to = %status, "order status changed");

        Ok(order.clone())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Orders matching the filter, newest first.
    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, OrdersServiceError>;

    async fn get_order(&self, id: &str) -> Result<Order, OrdersServiceError>;

    /// Move an open order to a new status. Delivered and cancelled orders stay put.
    async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}
