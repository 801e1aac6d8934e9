//! Suppliers service.

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    domain::{
        next_sequence_id,
        suppliers::{
            errors::SuppliersServiceError,
            models::{NewSupplier, Supplier, SupplierFilter, SupplierUpdate},
        },
    },
    listing::{matches_any, search_needle},
};

const SUPPLIER_ID_PREFIX: &str = "SUP-";

#[derive(Debug, Default)]
pub struct InMemorySuppliersService {
    suppliers: RwLock<Vec<Supplier>>,
}

impl InMemorySuppliersService {
    #[must_use]
    pub fn new(suppliers: Vec<Supplier>) -> Self {
        Self {
            suppliers: RwLock::new(suppliers),
        }
    }
}

#[async_trait]
impl SuppliersService for InMemorySuppliersService {
    async fn list_suppliers(
        &self,
        filter: &SupplierFilter,
    ) -> Result<Vec<Supplier>, SuppliersServiceError> {
        let needle = search_needle(filter.search.as_deref());

        Ok(self
            .suppliers
            .read()
            .await
            .iter()
            .filter(|supplier| {
                matches_any(
                    needle.as_deref(),
                    &[
                        supplier.name.as_str(),
                        supplier.contact_person.as_str(),
                        supplier.email.as_str(),
                        supplier.phone.as_str(),
                    ],
                )
            })
            .filter(|supplier| filter.status.is_none_or(|status| supplier.status == status))
            .cloned()
            .collect())
    }

    async fn get_supplier(&self, id: &str) -> Result<Supplier, SuppliersServiceError> {
        self.suppliers
            .read()
            .await
            .iter()
            .find(|supplier| supplier.id == id)
            .cloned()
            .ok_or(SuppliersServiceError::NotFound)
    }

    #[tracing::instrument(skip(self, supplier), fields(name = %supplier.name))]
    async fn create_supplier(
        &self,
        supplier: NewSupplier,
    ) -> Result<Supplier, SuppliersServiceError> {
        let name = supplier.name.trim().to_string();

        if name.is_empty() {
            return Err(SuppliersServiceError::MissingRequiredData("name"));
        }

        let mut suppliers = self.suppliers.write().await;

        let created = Supplier {
            id: next_sequence_id(
                SUPPLIER_ID_PREFIX,
                3,
                suppliers.iter().map(|existing| existing.id.as_str()),
            ),
            name,
            contact_person: supplier.contact_person.trim().to_string(),
            email: supplier.email.trim().to_lowercase(),
            phone: supplier.phone.trim().to_string(),
            address: supplier.address.trim().to_string(),
            products: 0,
            status: supplier.status,
            last_order: None,
        };

        suppliers.push(created.clone());

        info!(supplier = %created.id, "supplier created");

        Ok(created)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update_supplier(
        &self,
        id: &str,
        update: SupplierUpdate,
    ) -> Result<Supplier, SuppliersServiceError> {
        if update.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(SuppliersServiceError::MissingRequiredData("name"));
        }

        let mut suppliers = self.suppliers.write().await;

        let supplier = suppliers
            .iter_mut()
            .find(|supplier| supplier.id == id)
            .ok_or(SuppliersServiceError::NotFound)?;

        if let Some(name) = update.name {
            supplier.name = name.trim().to_string();
        }

        if let Some(contact_person) = update.contact_person {
            supplier.contact_person = contact_person.trim().to_string();
        }

        if let Some(email) = update.email {
            supplier.email = email.trim().to_lowercase();
        }

        if let Some(phone) = update.phone {
            supplier.phone = phone.trim().to_string();
        }

        if let Some(address) = update.address {
            supplier.address = address.trim().to_string();
        }

        if let Some(products) = update.products {
            supplier.products = products;
        }

        if let Some(status) = update.status {
            supplier.status = status;
        }

        if update.last_order.is_some() {
            supplier.last_order = update.last_order;
        }

        info!("supplier updated");

        Ok(supplier.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_supplier(&self, id: &str) -> Result<(), SuppliersServiceError> {
        let mut suppliers = self.suppliers.write().await;
        let before = suppliers.len();

        suppliers.retain(|supplier| supplier.id != id);

        if suppliers.len() == before {
            return Err(SuppliersServiceError::NotFound);
        }

        info!("supplier deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait SuppliersService: Send + Sync {
    async fn list_suppliers(
        &self,
        filter: &SupplierFilter,
    ) -> Result<Vec<Supplier>, SuppliersServiceError>;

    async fn get_supplier(&self, id: &str) -> Result<Supplier, SuppliersServiceError>;

    /// Creates a supplier with the next free `SUP-` id.
    async fn create_supplier(
        &self,
        supplier: NewSupplier,
    ) -> Result<Supplier, SuppliersServiceError>;

    async fn update_supplier(
        &self,
        id: &str,
        update: SupplierUpdate,
    ) -> Result<Supplier, SuppliersServiceError>;

    async fn delete_supplier(&self, id: &str) -> Result<(), SuppliersServiceError>;
}
