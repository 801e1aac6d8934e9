//! Category Models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    #[default]
    Active,
    Archived,
}

/// Category Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub product_count: u32,
    pub status: CategoryStatus,
    pub featured: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// New Category Model
///
/// A blank slug is generated from the name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewCategory {
    pub name: String,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: CategoryStatus,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub image_url: Option<String>,
}

/// Category Update Model
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub status: Option<CategoryStatus>,
    pub featured: Option<bool>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Matched against name, slug and description
    pub search: Option<String>,
    pub status: Option<CategoryStatus>,
}

/// URL slug for a category name: lowercase ASCII words joined by single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Outdoor & Garden  Sets "), "outdoor-garden-sets");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("Café Chairs"), "caf-chairs");
    }

    #[test]
    fn slugify_of_symbols_is_empty() {
        assert_eq!(slugify("&&"), "");
    }
}
