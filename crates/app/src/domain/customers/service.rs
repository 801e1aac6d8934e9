//! Customers service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    domain::{
        customers::{
            errors::CustomersServiceError,
            models::{
                Customer, CustomerFilter, CustomerStatus, CustomerUpdate, MINOR_UNITS_PER_POINT,
                NewCustomer,
            },
        },
        next_sequence_id,
    },
    listing::{matches_any, search_needle},
};

#[derive(Debug, Default)]
pub struct InMemoryCustomersService {
    customers: RwLock<Vec<Customer>>,
}

impl InMemoryCustomersService {
    #[must_use]
    pub fn new(customers: Vec<Customer>) -> Self {
        Self {
            customers: RwLock::new(customers),
        }
    }
}

#[async_trait]
impl CustomersService for InMemoryCustomersService {
    async fn list_customers(
        &self,
        filter: &CustomerFilter,
    ) -> Result<Vec<Customer>, CustomersServiceError> {
        let needle = search_needle(filter.search.as_deref());

        Ok(self
            .customers
            .read()
            .await
            .iter()
            .filter(|customer| {
                matches_any(
                    needle.as_deref(),
                    &[
                        customer.name.as_str(),
                        customer.email.as_str(),
                        customer.phone.as_str(),
                    ],
                )
            })
            .filter(|customer| filter.status.is_none_or(|status| customer.status == status))
            .cloned()
            .collect())
    }

    async fn get_customer(&self, id: &str) -> Result<Customer, CustomersServiceError> {
        self.customers
            .read()
            .await
            .iter()
            .find(|customer| customer.id == id)
            .cloned()
            .ok_or(CustomersServiceError::NotFound)
    }

    #[tracing::instrument(skip(self, customer))]
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<Customer, CustomersServiceError> {
        let name = required(&customer.name, "name")?;
        let email = required(&customer.email, "email")?.to_lowercase();

        let mut customers = self.customers.write().await;

        if customers.iter().any(|existing| existing.email.eq_ignore_ascii_case(&email)) {
            return Err(CustomersServiceError::EmailTaken);
        }

        let created = Customer {
            id: next_sequence_id("", 1, customers.iter().map(|existing| existing.id.as_str())),
            name,
            email,
            phone: customer.phone.trim().to_string(),
            orders: 0,
            total_spent: 0,
            loyalty_points: 0,
            last_purchase: None,
            status: customer.status,
        };

        customers.push(created.clone());

        info!(customer = %created.id, "customer created");

        Ok(created)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update_customer(
        &self,
        id: &str,
        update: CustomerUpdate,
    ) -> Result<Customer, CustomersServiceError> {
        let mut customers = self.customers.write().await;

        let email = update
            .email
            .as_deref()
            .map(|email| required(email, "email").map(|email| email.to_lowercase()))
            .transpose()?;

        if let Some(email) = email.as_deref() {
            let taken = customers
                .iter()
                .any(|other| other.id != id && other.email.eq_ignore_ascii_case(email));

            if taken {
                return Err(CustomersServiceError::EmailTaken);
            }
        }

        let name = update.name.as_deref().map(|name| required(name, "name")).transpose()?;

        let customer = customers
            .iter_mut()
            .find(|customer| customer.id == id)
            .ok_or(CustomersServiceError::NotFound)?;

        if let Some(name) = name {
            customer.name = name;
        }

        if let Some(email) = email {
            customer.email = email;
        }

        if let Some(phone) = update.phone {
            customer.phone = phone.trim().to_string();
        }

        if let Some(status) = update.status {
            customer.status = status;
        }

        info!("customer updated");

        Ok(customer.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_customer(&self, id: &str) -> Result<(), CustomersServiceError> {
        let mut customers = self.customers.write().await;
        let before = customers.len();

        customers.retain(|customer| customer.id != id);

        if customers.len() == before {
            return Err(CustomersServiceError::NotFound);
        }

        info!("customer deleted");

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn record_purchase(
        &self,
        id: &str,
        amount: u64,
        on: Date,
    ) -> Result<Customer, CustomersServiceError> {
        let mut customers = self.customers.write().await;

        let customer = customers
            .iter_mut()
            .find(|customer| customer.id == id)
            .ok_or(CustomersServiceError::NotFound)?;

        customer.orders = customer.orders.saturating_add(1);
        customer.total_spent = customer.total_spent.saturating_add(amount);
        customer.loyalty_points = customer
            .loyalty_points
            .saturating_add(amount / MINOR_UNITS_PER_POINT);
        customer.last_purchase = Some(on);

        if customer.status == CustomerStatus::New {
            customer.status = CustomerStatus::Active;
        }

        Ok(customer.clone())
    }
}

fn required(value: &str, field: &'static str) -> Result<String, CustomersServiceError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(CustomersServiceError::MissingRequiredData(field));
    }

    Ok(trimmed.to_string())
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Customers matching the filter. Also backs the cashier's customer lookup.
    async fn list_customers(
        &self,
        filter: &CustomerFilter,
    ) -> Result<Vec<Customer>, CustomersServiceError>;

    async fn get_customer(&self, id: &str) -> Result<Customer, CustomersServiceError>;

    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<Customer, CustomersServiceError>;

    async fn update_customer(
        &self,
        id: &str,
        update: CustomerUpdate,
    ) -> Result<Customer, CustomersServiceError>;

    async fn delete_customer(&self, id: &str) -> Result<(), CustomersServiceError>;

    /// Credit a settled sale: order count, spend, loyalty points and last purchase date.
    ///
    /// New customers become active on their first purchase.
    async fn record_purchase(
        &self,
        id: &str,
        amount: u64,
        on: Date,
    ) -> Result<Customer, CustomersServiceError>;
}
