use utoipa::OpenApi;

use crate::handlers::{cart, catalog, dto, wishlist};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "Per-user carts and wishlists over an admin-maintained product catalog"
    ),
    paths(
        cart::get_cart,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_from_cart,
        cart::clear_cart,
        wishlist::get_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist,
        catalog::list_products,
        catalog::list_featured_products,
        catalog::get_product,
        catalog::list_categories,
        catalog::get_category,
        catalog::list_category_products,
        catalog::create_product,
        catalog::update_product,
        catalog::delete_product,
        catalog::create_category,
        catalog::update_category,
        catalog::delete_category,
    ),
    components(schemas(
        dto::CategorySummary,
        dto::CategoryResponse,
        dto::ProductResponse,
        dto::CreateProductRequest,
        dto::UpdateProductRequest,
        dto::CreateCategoryRequest,
        dto::UpdateCategoryRequest,
        dto::AddToCartRequest,
        dto::UpdateCartItemRequest,
        dto::CartItemResponse,
        dto::ConfirmationResponse,
        dto::AddToWishlistRequest,
        dto::WishlistItemResponse,
    )),
    tags(
        (name = "cart", description = "Shopping cart of the calling user"),
        (name = "wishlist", description = "Saved products of the calling user"),
        (name = "catalog", description = "Products and categories"),
        (name = "admin", description = "Catalog maintenance; requires the admin role"),
    )
)]
pub struct ApiDoc;
