//! Category types for product organization.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// URL-friendly slug, derived from the name (unique).
    pub slug: String,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Category {
    /// Create a new category. The slug is derived from the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let now = crate::current_timestamp();
        Self {
            id: CategoryId::generate(),
            slug: slugify(&name),
            name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rename the category, re-deriving the slug.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.slug = slugify(&self.name);
        self.updated_at = crate::current_timestamp();
    }
}

/// Derive a URL-friendly slug from a display name.
///
/// Lowercases, maps runs of non-alphanumeric characters to single hyphens,
/// and trims leading/trailing hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true;
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
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
    fn test_category_slug_derived_from_name() {
        let cat = Category::new("Gaming Laptops");
        assert_eq!(cat.slug, "gaming-laptops");
    }

    #[test]
    fn test_rename_rederives_slug() {
        let mut cat = Category::new("Phones");
        cat.rename("Smart Phones");
        assert_eq!(cat.name, "Smart Phones");
        assert_eq!(cat.slug, "smart-phones");
    }

    #[test]
    fn test_slugify_collapses_punctuation() {
        assert_eq!(slugify("  TVs & Audio!  "), "tvs-audio");
        assert_eq!(slugify("Home---Office"), "home-office");
    }
}
