use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::{WishlistMutation, WishlistRepository};
use crate::domain::wishlist::{Wishlist, WishlistEntry};
use crate::schema::{wishlist_items, wishlists};

use super::models::{NewWishlistItemRow, NewWishlistRow, WishlistItemRow};
use super::position;

pub struct DieselWishlistRepository {
    pool: DbPool,
}

impl DieselWishlistRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn ensure_wishlist(conn: &mut PgConnection, user_id: Uuid) -> QueryResult<()> {
    diesel::insert_into(wishlists::table)
        .values(&NewWishlistRow { user_id })
        .on_conflict_do_nothing()
        .execute(conn)?;
    Ok(())
}

fn read_entries(conn: &mut PgConnection, user_id: Uuid) -> QueryResult<Wishlist> {
    let rows = wishlist_items::table
        .filter(wishlist_items::user_id.eq(user_id))
        .order(wishlist_items::position.asc())
        .select(WishlistItemRow::as_select())
        .load(conn)?;

    Ok(Wishlist::from_entries(
        rows.into_iter()
            .map(|r| WishlistEntry {
                product_id: r.product_id,
                date_added: r.date_added,
            })
            .collect(),
    ))
}

impl WishlistRepository for DieselWishlistRepository {
    fn load(&self, user_id: Uuid) -> Result<Wishlist, DomainError> {
        let mut conn = self.pool.get()?;
        ensure_wishlist(&mut conn, user_id)?;
        Ok(read_entries(&mut conn, user_id)?)
    }

    fn update(
        &self,
        user_id: Uuid,
        mutation: WishlistMutation<'_>,
    ) -> Result<Wishlist, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            ensure_wishlist(conn, user_id)?;
            wishlists::table
                .find(user_id)
                .select(wishlists::user_id)
                .for_update()
                .first::<Uuid>(conn)?;

            let before = read_entries(conn, user_id)?;
            let mut wishlist = before.clone();
            mutation(&mut wishlist)?;
            if wishlist == before {
                return Ok(wishlist);
            }

            diesel::delete(wishlist_items::table.filter(wishlist_items::user_id.eq(user_id)))
                .execute(conn)?;
            let rows = wishlist
                .entries()
                .iter()
                .enumerate()
                .map(|(idx, entry)| -> Result<NewWishlistItemRow, DomainError> {
                    Ok(NewWishlistItemRow {
                        id: Uuid::new_v4(),
                        user_id,
                        product_id: entry.product_id,
                        date_added: entry.date_added,
                        position: position(idx)?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if !rows.is_empty() {
                diesel::insert_into(wishlist_items::table)
                    .values(&rows)
                    .execute(conn)?;
            }
            diesel::update(wishlists::table.find(user_id))
                .set(wishlists::updated_at.eq(chrono::Utc::now()))
                .execute(conn)?;

            Ok(wishlist)
        })
        .inspect_err(|e| {
            if let DomainError::Internal(msg) = e {
                log::error!("Wishlist update for user {} failed: {}", user_id, msg);
            }
        })
    }
}
