use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::cart::{Cart, CartItemView, LineKey};
use crate::domain::catalog::Product;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartRepository, CatalogRepository};

pub struct CartService<C, R> {
    catalog: C,
    carts: R,
}

impl<C: CatalogRepository, R: CartRepository> CartService<C, R> {
    pub fn new(catalog: C, carts: R) -> Self {
        Self { catalog, carts }
    }

    pub fn get_cart(&self, user_id: Uuid) -> Result<Vec<CartItemView>, DomainError> {
        let cart = self.carts.load(user_id)?;
        self.render(cart)
    }

    /// Adds units of a product variant; repeated adds of the same variant
    /// accumulate on one line.
    pub fn add_to_cart(
        &self,
        user_id: Uuid,
        key: LineKey,
        quantity: i32,
    ) -> Result<Vec<CartItemView>, DomainError> {
        if quantity < 1 {
            return Err(DomainError::InvalidRequest(
                "quantity must be at least 1".to_string(),
            ));
        }
        let product = self
            .catalog
            .find_product(key.product_id)?
            .ok_or_else(DomainError::product_not_found)?;
        product.check_variant(&key.size, &key.color)?;

        log::debug!(
            "Adding {} x {} ({}/{}) to cart of user {}",
            quantity,
            key.product_id,
            key.size,
            key.color,
            user_id
        );
        let cart = self
            .carts
            .update(user_id, &mut |cart| cart.add(key.clone(), quantity))?;
        self.render(cart)
    }

    /// Sets a line's quantity; zero or less removes the line.
    pub fn update_cart_item(
        &self,
        user_id: Uuid,
        key: LineKey,
        quantity: i32,
    ) -> Result<Vec<CartItemView>, DomainError> {
        let cart = self
            .carts
            .update(user_id, &mut |cart| cart.set_quantity(&key, quantity))?;
        self.render(cart)
    }

    pub fn remove_from_cart(
        &self,
        user_id: Uuid,
        key: LineKey,
    ) -> Result<Vec<CartItemView>, DomainError> {
        let cart = self.carts.update(user_id, &mut |cart| {
            if !cart.remove(&key) {
                log::debug!("Cart of user {} has no line for {:?}", user_id, key);
            }
            Ok(())
        })?;
        self.render(cart)
    }

    pub fn clear_cart(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.carts.update(user_id, &mut |cart| {
            cart.clear();
            Ok(())
        })?;
        log::info!("Cleared cart of user {}", user_id);
        Ok(())
    }

    fn render(&self, cart: Cart) -> Result<Vec<CartItemView>, DomainError> {
        let ids: Vec<Uuid> = cart.items().iter().map(|l| l.product_id).collect();
        let products = index_by_id(self.catalog.find_products(&ids)?);

        Ok(cart
            .into_items()
            .into_iter()
            .map(|line| CartItemView {
                product: products.get(&line.product_id).cloned(),
                product_id: line.product_id,
                size: line.size,
                color: line.color,
                quantity: line.quantity,
            })
            .collect())
    }
}

pub(crate) fn index_by_id(products: Vec<Product>) -> HashMap<Uuid, Product> {
    products.into_iter().map(|p| (p.id, p)).collect()
}
