//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod stock;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use fernwood::products::ProductId;
    use fernwood_app::domain::products::models::Product;

    pub(super) fn make_product(id: &str, stock: u32) -> Product {
        Product {
            id: ProductId::from(id),
            name: "Modern Sofa Set".to_string(),
            sku: "SOFA-001".to_string(),
            category: "living-room".to_string(),
            price: 129_999,
            stock,
            image_url: None,
        }
    }
}
