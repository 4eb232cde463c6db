use std::collections::HashSet;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::errors::DomainError;

/// Longest name or slug the catalog tables accept.
pub const MAX_NAME_CHARS: usize = 255;

/// The slice of a category embedded in every product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub original_price: Option<BigDecimal>,
    pub description: String,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub category: CategoryRef,
    pub featured: bool,
    pub bestseller: bool,
    pub is_new: bool,
    pub rating: f64,
    pub reviews: i32,
}

/// A product as submitted for creation; the category is named by id.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: BigDecimal,
    pub original_price: Option<BigDecimal>,
    pub description: String,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub category_id: Uuid,
    pub featured: bool,
    pub bestseller: bool,
    pub is_new: bool,
    pub rating: f64,
    pub reviews: i32,
}

/// Partial product update. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<BigDecimal>,
    pub original_price: Option<BigDecimal>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub category_id: Option<Uuid>,
    pub featured: Option<bool>,
    pub bestseller: Option<bool>,
    pub is_new: Option<bool>,
    pub rating: Option<f64>,
    pub reviews: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub image: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub slug: Option<String>,
}

impl Category {
    pub fn from_draft(id: Uuid, draft: CategoryDraft) -> Result<Self, DomainError> {
        Category {
            id,
            name: draft.name,
            image: draft.image,
            slug: draft.slug,
        }
        .normalized()
    }

    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(slug) = patch.slug {
            self.slug = slug;
        }
    }

    /// Validates the fields and returns them in stored form.
    pub fn normalized(mut self) -> Result<Self, DomainError> {
        self.name = short_text("name", &self.name)?;
        self.image = required("image", &self.image)?;
        self.slug = short_text("slug", &self.slug)?;
        if !self
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::InvalidRequest(format!(
                "slug '{}' may only contain lowercase letters, digits and '-'",
                self.slug
            )));
        }
        Ok(self)
    }

    pub fn reference(&self) -> CategoryRef {
        CategoryRef {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }
}

impl Product {
    pub fn from_draft(
        id: Uuid,
        draft: ProductDraft,
        category: CategoryRef,
    ) -> Result<Self, DomainError> {
        Product {
            id,
            name: draft.name,
            price: draft.price,
            original_price: draft.original_price,
            description: draft.description,
            images: draft.images,
            sizes: draft.sizes,
            colors: draft.colors,
            category,
            featured: draft.featured,
            bestseller: draft.bestseller,
            is_new: draft.is_new,
            rating: draft.rating,
            reviews: draft.reviews,
        }
        .normalized()
    }

    /// Copies the set fields of `patch`. `category_id` is ignored here; the
    /// caller resolves it to a [`CategoryRef`].
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(original_price) = patch.original_price {
            self.original_price = Some(original_price);
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(sizes) = patch.sizes {
            self.sizes = sizes;
        }
        if let Some(colors) = patch.colors {
            self.colors = colors;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(bestseller) = patch.bestseller {
            self.bestseller = bestseller;
        }
        if let Some(is_new) = patch.is_new {
            self.is_new = is_new;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(reviews) = patch.reviews {
            self.reviews = reviews;
        }
    }

    /// Validates the fields and returns them in stored form: trimmed name,
    /// prices at two decimal places.
    pub fn normalized(mut self) -> Result<Self, DomainError> {
        self.name = short_text("name", &self.name)?;
        required("description", &self.description)?;
        self.price = money("price", &self.price)?;
        self.original_price = self
            .original_price
            .as_ref()
            .map(|price| money("original_price", price))
            .transpose()?;
        labels("sizes", &self.sizes)?;
        labels("colors", &self.colors)?;
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(DomainError::InvalidRequest(
                "rating must be between 0 and 5".to_string(),
            ));
        }
        if self.reviews < 0 {
            return Err(DomainError::InvalidRequest(
                "reviews must not be negative".to_string(),
            ));
        }
        Ok(self)
    }

    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Rejects a size/color pair the product is not sold in.
    pub fn check_variant(&self, size: &str, color: &str) -> Result<(), DomainError> {
        if !self.offers_size(size) {
            return Err(DomainError::InvalidRequest(format!(
                "size '{}' is not available for product {}",
                size, self.id
            )));
        }
        if !self.offers_color(color) {
            return Err(DomainError::InvalidRequest(format!(
                "color '{}' is not available for product {}",
                color, self.id
            )));
        }
        Ok(())
    }
}

fn required(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidRequest(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

fn short_text(field: &str, value: &str) -> Result<String, DomainError> {
    let value = required(field, value)?;
    if value.chars().count() > MAX_NAME_CHARS {
        return Err(DomainError::InvalidRequest(format!(
            "{} must be at most {} characters",
            field, MAX_NAME_CHARS
        )));
    }
    Ok(value)
}

/// Amounts are stored as NUMERIC(10, 2).
fn money(field: &str, value: &BigDecimal) -> Result<BigDecimal, DomainError> {
    let cents = value.with_scale(2);
    if &cents != value {
        return Err(DomainError::InvalidRequest(format!(
            "{} must have at most two decimal places",
            field
        )));
    }
    if cents < BigDecimal::from(0) {
        return Err(DomainError::InvalidRequest(format!(
            "{} must not be negative",
            field
        )));
    }
    if cents >= BigDecimal::from(100_000_000) {
        return Err(DomainError::InvalidRequest(format!("{} is too large", field)));
    }
    Ok(cents)
}

fn labels(field: &str, values: &[String]) -> Result<(), DomainError> {
    if values.is_empty() {
        return Err(DomainError::InvalidRequest(format!(
            "{} must list at least one option",
            field
        )));
    }
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(DomainError::InvalidRequest(format!(
            "{} must not contain blank labels",
            field
        )));
    }
    let distinct: HashSet<&String> = values.iter().collect();
    if distinct.len() != values.len() {
        return Err(DomainError::InvalidRequest(format!(
            "{} must not repeat a label",
            field
        )));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::fixtures::{self, product};
    use super::*;

    #[test]
    fn check_variant_accepts_listed_size_and_color() {
        let p = product("Air Max Pulse", &["9", "10"], &["Black", "White"]);
        assert!(p.check_variant("10", "White").is_ok());
    }

    #[test]
    fn check_variant_rejects_unknown_size() {
        let p = product("Air Max Pulse", &["9", "10"], &["Black"]);
        let err = p.check_variant("13", "Black").unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(msg) if msg.contains("size '13'")));
    }

    #[test]
    fn check_variant_rejects_unknown_color() {
        let p = product("Air Max Pulse", &["9"], &["Black"]);
        let err = p.check_variant("9", "Pink").unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(msg) if msg.contains("color 'Pink'")));
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "  Gel-Kayano 30 ".to_string(),
            price: BigDecimal::from(160),
            original_price: None,
            description: "Stability trainer".to_string(),
            images: vec![],
            sizes: vec!["9".to_string(), "10".to_string()],
            colors: vec!["Blue".to_string()],
            category_id: fixtures::running().id,
            featured: false,
            bestseller: false,
            is_new: true,
            rating: 0.0,
            reviews: 0,
        }
    }

    #[test]
    fn draft_is_trimmed_and_priced_in_cents() {
        let p = Product::from_draft(Uuid::new_v4(), draft(), fixtures::running()).unwrap();
        assert_eq!(p.name, "Gel-Kayano 30");
        assert_eq!(p.price.to_string(), "160.00");
    }

    #[test]
    fn sub_cent_prices_are_rejected() {
        let mut d = draft();
        d.price = BigDecimal::from_str("12.345").unwrap();
        let err = Product::from_draft(Uuid::new_v4(), d, fixtures::running()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(m) if m.contains("two decimal")));
    }

    #[test]
    fn negative_price_and_empty_sizes_are_rejected() {
        let mut d = draft();
        d.price = BigDecimal::from(-1);
        assert!(Product::from_draft(Uuid::new_v4(), d, fixtures::running()).is_err());

        let mut d = draft();
        d.sizes.clear();
        assert!(Product::from_draft(Uuid::new_v4(), d, fixtures::running()).is_err());

        let mut d = draft();
        d.colors = vec!["Blue".to_string(), "Blue".to_string()];
        assert!(Product::from_draft(Uuid::new_v4(), d, fixtures::running()).is_err());
    }

    #[test]
    fn overlong_name_is_rejected() {
        let mut d = draft();
        d.name = "x".repeat(MAX_NAME_CHARS + 1);
        assert!(Product::from_draft(Uuid::new_v4(), d, fixtures::running()).is_err());
    }

    #[test]
    fn patch_keeps_unset_fields() {
        let mut p = product("Air Max Pulse", &["9"], &["Black"]);
        let before = p.clone();
        p.apply(ProductPatch {
            price: Some(BigDecimal::from(120)),
            featured: Some(true),
            ..ProductPatch::default()
        });
        let p = p.normalized().unwrap();

        assert_eq!(p.price.to_string(), "120.00");
        assert!(p.featured);
        assert_eq!(p.name, before.name);
        assert_eq!(p.sizes, before.sizes);
    }

    #[test]
    fn category_slug_must_be_url_safe() {
        let draft = |slug: &str| CategoryDraft {
            name: "Trail".to_string(),
            image: "/images/categories/trail.jpg".to_string(),
            slug: slug.to_string(),
        };
        assert!(Category::from_draft(Uuid::new_v4(), draft("trail-running")).is_ok());
        assert!(Category::from_draft(Uuid::new_v4(), draft("Trail Running")).is_err());
        assert!(Category::from_draft(Uuid::new_v4(), draft("")).is_err());
    }

    #[test]
    fn size_labels_are_compared_exactly() {
        let p = product("Air Max Pulse", &["9"], &["Black"]);
        assert!(!p.offers_size("9.0"));
        assert!(!p.offers_color("black"));
    }
}
