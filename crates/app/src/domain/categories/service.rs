//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    domain::{
        categories::{
            errors::CategoriesServiceError,
            models::{Category, CategoryFilter, CategoryUpdate, NewCategory, slugify},
        },
        next_sequence_id,
    },
    listing::{matches_any, search_needle},
};

#[derive(Debug, Default)]
pub struct InMemoryCategoriesService {
    categories: RwLock<Vec<Category>>,
}

impl InMemoryCategoriesService {
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: RwLock::new(categories),
        }
    }
}

#[async_trait]
impl CategoriesService for InMemoryCategoriesService {
    async fn list_categories(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<Category>, CategoriesServiceError> {
        let needle = search_needle(filter.search.as_deref());

        Ok(self
            .categories
            .read()
            .await
            .iter()
            .filter(|category| {
                matches_any(
                    needle.as_deref(),
                    &[
                        category.name.as_str(),
                        category.slug.as_str(),
                        category.description.as_str(),
                    ],
                )
            })
            .filter(|category| filter.status.is_none_or(|status| category.status == status))
            .cloned()
            .collect())
    }

    async fn get_category(&self, id: &str) -> Result<Category, CategoriesServiceError> {
        self.categories
            .read()
            .await
            .iter()
            .find(|category| category.id == id)
            .cloned()
            .ok_or(CategoriesServiceError::NotFound)
    }

    #[tracing::instrument(skip(self, category), fields(name = %category.name))]
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CategoriesServiceError> {
        let name = category.name.trim().to_string();

        if name.is_empty() {
            return Err(CategoriesServiceError::MissingRequiredData("name"));
        }

        let slug = resolve_slug(category.slug.as_deref(), &name)?;
        let mut categories = self.categories.write().await;

        ensure_slug_free(&categories, &slug, None)?;

        let created = Category {
            id: next_sequence_id("", 1, categories.iter().map(|existing| existing.id.as_str())),
            name,
            slug,
            description: category.description.trim().to_string(),
            product_count: 0,
            status: category.status,
            featured: category.featured,
            image_url: category.image_url,
        };

        categories.push(created.clone());

        info!(category = %created.id, "category created");

        Ok(created)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update_category(
        &self,
        id: &str,
        update: CategoryUpdate,
    ) -> Result<Category, CategoriesServiceError> {
        let mut categories = self.categories.write().await;

        let current = categories
            .iter()
            .find(|category| category.id == id)
            .ok_or(CategoriesServiceError::NotFound)?;

        let name = match update.name.as_deref().map(str::trim) {
            Some("") => return Err(CategoriesServiceError::MissingRequiredData("name")),
            Some(name) => name.to_string(),
            None => current.name.clone(),
        };

        let slug = match update.slug.as_deref() {
            Some(slug) => resolve_slug(Some(slug), &name)?,
            None => current.slug.clone(),
        };

        ensure_slug_free(&categories, &slug, Some(id))?;

        let category = categories
            .iter_mut()
            .find(|category| category.id == id)
            .ok_or(CategoriesServiceError::NotFound)?;

        category.name = name;
        category.slug = slug;

        if let Some(description) = update.description {
            category.description = description.trim().to_string();
        }

        if let Some(status) = update.status {
            category.status = status;
        }

        if let Some(featured) = update.featured {
            category.featured = featured;
        }

        if update.image_url.is_some() {
            category.image_url = update.image_url;
        }

        info!("category updated");

        Ok(category.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_category(&self, id: &str) -> Result<(), CategoriesServiceError> {
        let mut categories = self.categories.write().await;
        let before = categories.len();

        categories.retain(|category| category.id != id);

        if categories.len() == before {
            return Err(CategoriesServiceError::NotFound);
        }

        info!("category deleted");

        Ok(())
    }
}

fn resolve_slug(requested: Option<&str>, name: &str) -> Result<String, CategoriesServiceError> {
    let slug = match requested.map(str::trim) {
        Some(slug) if !slug.is_empty() => slugify(slug),
        _ => slugify(name),
    };

    if slug.is_empty() {
        return Err(CategoriesServiceError::MissingRequiredData("slug"));
    }

    Ok(slug)
}

fn ensure_slug_free(
    categories: &[Category],
    slug: &str,
    except: Option<&str>,
) -> Result<(), CategoriesServiceError> {
    let taken = categories
        .iter()
        .any(|category| category.slug == slug && Some(category.id.as_str()) != except);

    if taken {
        return Err(CategoriesServiceError::SlugTaken(slug.to_string()));
    }

    Ok(())
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Categories matching the filter, in creation order.
    async fn list_categories(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<Category>, CategoriesServiceError>;

    async fn get_category(&self, id: &str) -> Result<Category, CategoriesServiceError>;

    /// Creates a category, generating the slug from the name when none is given.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CategoriesServiceError>;

    async fn update_category(
        &self,
        id: &str,
        update: CategoryUpdate,
    ) -> Result<Category, CategoriesServiceError>;

    async fn delete_category(&self, id: &str) -> Result<(), CategoriesServiceError>;
}
