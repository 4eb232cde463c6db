use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::{Cart, CartLineItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartMutation, CartRepository};
use crate::schema::{cart_items, carts};

use super::models::{CartItemRow, NewCartItemRow, NewCartRow};
use super::position;

pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn ensure_cart(conn: &mut PgConnection, user_id: Uuid) -> QueryResult<()> {
    diesel::insert_into(carts::table)
        .values(&NewCartRow { user_id })
        .on_conflict_do_nothing()
        .execute(conn)?;
    Ok(())
}

fn read_lines(conn: &mut PgConnection, user_id: Uuid) -> QueryResult<Cart> {
    let rows = cart_items::table
        .filter(cart_items::user_id.eq(user_id))
        .order(cart_items::position.asc())
        .select(CartItemRow::as_select())
        .load(conn)?;

    Ok(Cart::from_items(
        rows.into_iter()
            .map(|r| CartLineItem {
                product_id: r.product_id,
                size: r.size,
                color: r.color,
                quantity: r.quantity,
            })
            .collect(),
    ))
}

impl CartRepository for DieselCartRepository {
    fn load(&self, user_id: Uuid) -> Result<Cart, DomainError> {
        let mut conn = self.pool.get()?;
        ensure_cart(&mut conn, user_id)?;
        Ok(read_lines(&mut conn, user_id)?)
    }

    fn update(&self, user_id: Uuid, mutation: CartMutation<'_>) -> Result<Cart, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Materialise the cart row and hold its lock until commit;
            //    concurrent updates for this user queue here.
            ensure_cart(conn, user_id)?;
            carts::table
                .find(user_id)
                .select(carts::user_id)
                .for_update()
                .first::<Uuid>(conn)?;

            // 2. Apply the mutation to the current lines.
            let mut cart = read_lines(conn, user_id)?;
            mutation(&mut cart)?;

            // 3. Rewrite the lines in order.
            diesel::delete(cart_items::table.filter(cart_items::user_id.eq(user_id)))
                .execute(conn)?;
            let rows = cart
                .items()
                .iter()
                .enumerate()
                .map(|(idx, line)| -> Result<NewCartItemRow, DomainError> {
                    Ok(NewCartItemRow {
                        id: Uuid::new_v4(),
                        user_id,
                        product_id: line.product_id,
                        size: &line.size,
                        color: &line.color,
                        quantity: line.quantity,
                        position: position(idx)?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if !rows.is_empty() {
                diesel::insert_into(cart_items::table)
                    .values(&rows)
                    .execute(conn)?;
            }
            diesel::update(carts::table.find(user_id))
                .set(carts::updated_at.eq(chrono::Utc::now()))
                .execute(conn)?;

            Ok(cart)
        })
        .inspect_err(|e| {
            if let DomainError::Internal(msg) = e {
                log::error!("Cart update for user {} failed: {}", user_id, msg);
            }
        })
    }
}
