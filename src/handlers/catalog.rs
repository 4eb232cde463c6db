use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

use crate::domain::catalog::{ProductDraft, ProductPatch};

use super::dto::{
    into_responses, CategoryResponse, ConfirmationResponse, CreateCategoryRequest,
    CreateProductRequest, ProductResponse, UpdateCategoryRequest, UpdateProductRequest,
};
use super::identity::CurrentAdmin;

/// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products, by name", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn list_products(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let products = web::block(move || state.catalog.list_products()).await??;
    Ok(HttpResponse::Ok().json(into_responses::<_, ProductResponse>(products)))
}

/// GET /api/products/featured
#[utoipa::path(
    get,
    path = "/api/products/featured",
    responses(
        (status = 200, description = "Featured products", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn list_featured_products(
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let products = web::block(move || state.catalog.list_featured_products()).await??;
    Ok(HttpResponse::Ok().json(into_responses::<_, ProductResponse>(products)))
}

/// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, description = "Malformed product id"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let product = web::block(move || state.catalog.get_product(id)).await??;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories, by name", body = Vec<CategoryResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = web::block(move || state.catalog.list_categories()).await??;
    Ok(HttpResponse::Ok().json(into_responses::<_, CategoryResponse>(categories)))
}

/// GET /api/categories/{slug}
#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    params(("slug" = String, Path, description = "Category slug, e.g. `running`")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let category = web::block(move || state.catalog.get_category_by_slug(&slug)).await??;
    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

/// GET /api/categories/{id}/products
#[utoipa::path(
    get,
    path = "/api/categories/{id}/products",
    params(("id" = Uuid, Path, description = "Category UUID")),
    responses(
        (status = 200, description = "Products in the category", body = Vec<ProductResponse>),
        (status = 400, description = "Malformed category id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn list_category_products(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let category_id = path.into_inner();
    let products =
        web::block(move || state.catalog.list_products_by_category(category_id)).await??;
    Ok(HttpResponse::Ok().json(into_responses::<_, ProductResponse>(products)))
}

// ── Admin ────────────────────────────────────────────────────────────────────

/// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    params(
        ("X-User-Id" = Uuid, Header, description = "Caller's user id"),
        ("X-User-Role" = String, Header, description = "Must be `admin`"),
    ),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product or unknown category"),
        (status = 401, description = "Missing or malformed user id"),
        (status = 403, description = "Caller is not an admin"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "admin"
)]
pub async fn create_product(
    state: web::Data<AppState>,
    admin: CurrentAdmin,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let draft = ProductDraft::try_from(body.into_inner())?;
    let product = web::block(move || state.catalog.create_product(draft)).await??;
    log::debug!("Admin {} created product {}", admin.0, product.id);
    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// PUT /api/products/{id}
///
/// Partial update: fields left out of the body keep their value.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product UUID"),
        ("X-User-Id" = Uuid, Header, description = "Caller's user id"),
        ("X-User-Role" = String, Header, description = "Must be `admin`"),
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product after the update", body = ProductResponse),
        (status = 400, description = "Invalid field or unknown category"),
        (status = 401, description = "Missing or malformed user id"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "admin"
)]
pub async fn update_product(
    state: web::Data<AppState>,
    _admin: CurrentAdmin,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let patch = ProductPatch::try_from(body.into_inner())?;
    let product = web::block(move || state.catalog.update_product(id, patch)).await??;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// DELETE /api/products/{id}
///
/// Cart and wishlist lines for the product stay and render with
/// `product: null`.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product UUID"),
        ("X-User-Id" = Uuid, Header, description = "Caller's user id"),
        ("X-User-Role" = String, Header, description = "Must be `admin`"),
    ),
    responses(
        (status = 200, description = "Product removed", body = ConfirmationResponse),
        (status = 401, description = "Missing or malformed user id"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "admin"
)]
pub async fn delete_product(
    state: web::Data<AppState>,
    _admin: CurrentAdmin,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.catalog.delete_product(id)).await??;
    Ok(HttpResponse::Ok().json(ConfirmationResponse {
        success: true,
        message: "Product removed".to_string(),
    }))
}

/// POST /api/categories
#[utoipa::path(
    post,
    path = "/api/categories",
    params(
        ("X-User-Id" = Uuid, Header, description = "Caller's user id"),
        ("X-User-Role" = String, Header, description = "Must be `admin`"),
    ),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid name, image or slug"),
        (status = 401, description = "Missing or malformed user id"),
        (status = 403, description = "Caller is not an admin"),
        (status = 409, description = "Slug already taken"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "admin"
)]
pub async fn create_category(
    state: web::Data<AppState>,
    admin: CurrentAdmin,
    body: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let draft = body.into_inner().into();
    let category = web::block(move || state.catalog.create_category(draft)).await??;
    log::debug!("Admin {} created category {}", admin.0, category.slug);
    Ok(HttpResponse::Created().json(CategoryResponse::from(category)))
}

/// PUT /api/categories/{id}
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category UUID"),
        ("X-User-Id" = Uuid, Header, description = "Caller's user id"),
        ("X-User-Role" = String, Header, description = "Must be `admin`"),
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category after the update", body = CategoryResponse),
        (status = 400, description = "Invalid name, image or slug"),
        (status = 401, description = "Missing or malformed user id"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Slug already taken"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "admin"
)]
pub async fn update_category(
    state: web::Data<AppState>,
    _admin: CurrentAdmin,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let patch = body.into_inner().into();
    let category = web::block(move || state.catalog.update_category(id, patch)).await??;
    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

/// DELETE /api/categories/{id}
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category UUID"),
        ("X-User-Id" = Uuid, Header, description = "Caller's user id"),
        ("X-User-Role" = String, Header, description = "Must be `admin`"),
    ),
    responses(
        (status = 200, description = "Category removed", body = ConfirmationResponse),
        (status = 400, description = "Category still has products"),
        (status = 401, description = "Missing or malformed user id"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "admin"
)]
pub async fn delete_category(
    state: web::Data<AppState>,
    _admin: CurrentAdmin,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.catalog.delete_category(id)).await??;
    Ok(HttpResponse::Ok().json(ConfirmationResponse {
        success: true,
        message: "Category removed".to_string(),
    }))
}
