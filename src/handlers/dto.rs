use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cart::CartItemView;
use crate::domain::catalog::{
    Category, CategoryDraft, CategoryPatch, CategoryRef, Product, ProductDraft, ProductPatch,
};
use crate::domain::errors::DomainError;
use crate::domain::wishlist::WishlistItemView;

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "149.99"
    pub price: String,
    pub original_price: Option<String>,
    pub description: String,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub category: CategorySummary,
    pub featured: bool,
    pub bestseller: bool,
    pub is_new: bool,
    pub rating: f64,
    pub reviews: i32,
}

impl From<CategoryRef> for CategorySummary {
    fn from(c: CategoryRef) -> Self {
        CategorySummary {
            id: c.id,
            name: c.name,
            slug: c.slug,
        }
    }
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        CategoryResponse {
            id: c.id,
            name: c.name,
            image: c.image,
            slug: c.slug,
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name,
            price: p.price.to_string(),
            original_price: p.original_price.map(|price| price.to_string()),
            description: p.description,
            images: p.images,
            sizes: p.sizes,
            colors: p.colors,
            category: p.category.into(),
            featured: p.featured,
            bestseller: p.bestseller,
            is_new: p.is_new,
            rating: p.rating,
            reviews: p.reviews,
        }
    }
}

// ── Catalog admin ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    /// Decimal string with at most two places, e.g. "149.99"
    pub price: String,
    pub original_price: Option<String>,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub category_id: Uuid,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: i32,
}

/// Fields left out keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<String>,
    pub original_price: Option<String>,
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

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub image: String,
    pub slug: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub slug: Option<String>,
}

fn parse_price(field: &str, raw: &str) -> Result<BigDecimal, DomainError> {
    BigDecimal::from_str(raw.trim()).map_err(|_| {
        DomainError::InvalidRequest(format!("{} must be a decimal number, got '{}'", field, raw))
    })
}

impl TryFrom<CreateProductRequest> for ProductDraft {
    type Error = DomainError;

    fn try_from(req: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductDraft {
            price: parse_price("price", &req.price)?,
            original_price: req
                .original_price
                .as_deref()
                .map(|raw| parse_price("original_price", raw))
                .transpose()?,
            name: req.name,
            description: req.description,
            images: req.images,
            sizes: req.sizes,
            colors: req.colors,
            category_id: req.category_id,
            featured: req.featured,
            bestseller: req.bestseller,
            is_new: req.is_new,
            rating: req.rating,
            reviews: req.reviews,
        })
    }
}

impl TryFrom<UpdateProductRequest> for ProductPatch {
    type Error = DomainError;

    fn try_from(req: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductPatch {
            price: req
                .price
                .as_deref()
                .map(|raw| parse_price("price", raw))
                .transpose()?,
            original_price: req
                .original_price
                .as_deref()
                .map(|raw| parse_price("original_price", raw))
                .transpose()?,
            name: req.name,
            description: req.description,
            images: req.images,
            sizes: req.sizes,
            colors: req.colors,
            category_id: req.category_id,
            featured: req.featured,
            bestseller: req.bestseller,
            is_new: req.is_new,
            rating: req.rating,
            reviews: req.reviews,
        })
    }
}

impl From<CreateCategoryRequest> for CategoryDraft {
    fn from(req: CreateCategoryRequest) -> Self {
        CategoryDraft {
            name: req.name,
            image: req.image,
            slug: req.slug,
        }
    }
}

impl From<UpdateCategoryRequest> for CategoryPatch {
    fn from(req: UpdateCategoryRequest) -> Self {
        CategoryPatch {
            name: req.name,
            image: req.image,
            slug: req.slug,
        }
    }
}

// ── Cart ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    pub size: String,
    pub color: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    pub size: String,
    pub color: String,
    /// New quantity; zero or less removes the line.
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartLineParams {
    pub size: String,
    pub color: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartItemResponse {
    /// `null` when the product is no longer in the catalog.
    pub product: Option<ProductResponse>,
    pub product_id: Uuid,
    pub quantity: i32,
    pub size: String,
    pub color: String,
}

impl From<CartItemView> for CartItemResponse {
    fn from(v: CartItemView) -> Self {
        CartItemResponse {
            product: v.product.map(ProductResponse::from),
            product_id: v.product_id,
            quantity: v.quantity,
            size: v.size,
            color: v.color,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConfirmationResponse {
    pub success: bool,
    pub message: String,
}

// ── Wishlist ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddToWishlistRequest {
    pub product_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WishlistItemResponse {
    /// `null` when the product is no longer in the catalog.
    pub product: Option<ProductResponse>,
    pub product_id: Uuid,
    pub date_added: String,
}

impl From<WishlistItemView> for WishlistItemResponse {
    fn from(v: WishlistItemView) -> Self {
        WishlistItemResponse {
            product: v.product.map(ProductResponse::from),
            product_id: v.product_id,
            date_added: v.date_added.to_rfc3339(),
        }
    }
}

pub fn into_responses<T, R: From<T>>(items: Vec<T>) -> Vec<R> {
    items.into_iter().map(R::from).collect()
}
