//! Demo catalog used to populate an empty store.
//!
//! Ids are fixed so that a seeded database and the in-memory catalog agree.

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::catalog::{Category, CategoryRef, Product};

const RUNNING: u128 = 0x60d2_1b46_67d0_d899_2e61_0c85;
const CASUAL: u128 = 0x60d2_1b46_67d0_d899_2e61_0c86;
const BASKETBALL: u128 = 0x60d2_1b46_67d0_d899_2e61_0c87;
const SKATEBOARDING: u128 = 0x60d2_1b46_67d0_d899_2e61_0c88;

fn cents(amount: i64) -> BigDecimal {
    BigDecimal::new(amount.into(), 2)
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn demo_categories() -> Vec<Category> {
    [
        (RUNNING, "Running", "running"),
        (CASUAL, "Casual", "casual"),
        (BASKETBALL, "Basketball", "basketball"),
        (SKATEBOARDING, "Skateboarding", "skateboarding"),
    ]
    .into_iter()
    .map(|(id, name, slug)| Category {
        id: Uuid::from_u128(id),
        name: name.to_string(),
        image: format!("/images/categories/{}.jpg", slug),
        slug: slug.to_string(),
    })
    .collect()
}

struct DemoProduct {
    seq: u128,
    name: &'static str,
    price: i64,
    original_price: Option<i64>,
    description: &'static str,
    sizes: &'static [&'static str],
    colors: &'static [&'static str],
    category: u128,
    featured: bool,
    bestseller: bool,
    is_new: bool,
    rating: f64,
    reviews: i32,
}

const DEMO_PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        seq: 1,
        name: "Air Max Pulse",
        price: 14999,
        original_price: None,
        description: "Textile-wrapped midsole with a heel Air unit for all-day cushioning.",
        sizes: &["7", "8", "9", "10", "11", "12"],
        colors: &["Black", "White", "Grey"],
        category: RUNNING,
        featured: true,
        bestseller: true,
        is_new: false,
        rating: 4.8,
        reviews: 124,
    },
    DemoProduct {
        seq: 2,
        name: "UltraBoost 22",
        price: 18999,
        original_price: None,
        description: "Boost cushioning under a sock-like knit upper.",
        sizes: &["7", "8", "9", "10", "11"],
        colors: &["Black", "Blue", "Red"],
        category: RUNNING,
        featured: true,
        bestseller: false,
        is_new: false,
        rating: 4.7,
        reviews: 89,
    },
    DemoProduct {
        seq: 3,
        name: "Classic Leather",
        price: 7999,
        original_price: None,
        description: "Soft leather upper on a low-cut everyday silhouette.",
        sizes: &["6", "7", "8", "9", "10", "11", "12"],
        colors: &["White", "Black", "Cream"],
        category: CASUAL,
        featured: false,
        bestseller: true,
        is_new: false,
        rating: 4.6,
        reviews: 206,
    },
    DemoProduct {
        seq: 4,
        name: "Stan Smith",
        price: 8999,
        original_price: Some(11000),
        description: "Clean leather tennis shoe with perforated stripes.",
        sizes: &["6", "7", "8", "9", "10", "11", "12"],
        colors: &["White/Green", "White/Navy", "Black/White"],
        category: CASUAL,
        featured: false,
        bestseller: false,
        is_new: true,
        rating: 4.9,
        reviews: 312,
    },
    DemoProduct {
        seq: 5,
        name: "Jordan 1 Retro High",
        price: 16999,
        original_price: None,
        description: "High-top leather basketball shoe with Air cushioning.",
        sizes: &["7", "8", "9", "10", "11", "12", "13"],
        colors: &["University Blue", "Chicago", "Shadow"],
        category: BASKETBALL,
        featured: true,
        bestseller: true,
        is_new: false,
        rating: 4.9,
        reviews: 428,
    },
    DemoProduct {
        seq: 6,
        name: "Old Skool",
        price: 6999,
        original_price: None,
        description: "Canvas and suede skate shoe with a waffle outsole.",
        sizes: &["6", "7", "8", "9", "10", "11", "12"],
        colors: &["Black/White", "Navy/White", "Red/White"],
        category: SKATEBOARDING,
        featured: false,
        bestseller: false,
        is_new: true,
        rating: 4.7,
        reviews: 254,
    },
];

pub fn demo_products() -> Vec<Product> {
    let categories = demo_categories();
    DEMO_PRODUCTS
        .iter()
        .filter_map(|demo| {
            let category = categories
                .iter()
                .find(|c| c.id == Uuid::from_u128(demo.category))?;
            Some(Product {
                id: Uuid::from_u128((0x5eed_u128 << 64) | demo.seq),
                name: demo.name.to_string(),
                price: cents(demo.price),
                original_price: demo.original_price.map(cents),
                description: demo.description.to_string(),
                images: vec![format!(
                    "/images/products/{}.png",
                    demo.name.to_lowercase().replace(' ', "-")
                )],
                sizes: labels(demo.sizes),
                colors: labels(demo.colors),
                category: CategoryRef {
                    id: category.id,
                    name: category.name.clone(),
                    slug: category.slug.clone(),
                },
                featured: demo.featured,
                bestseller: demo.bestseller,
                is_new: demo.is_new,
                rating: demo.rating,
                reviews: demo.reviews,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_product_resolves_its_category() {
        assert_eq!(demo_products().len(), DEMO_PRODUCTS.len());
    }

    #[test]
    fn product_ids_and_variants_are_unique() {
        let products = demo_products();
        let ids: HashSet<Uuid> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), products.len());

        for p in &products {
            assert!(!p.sizes.is_empty() && !p.colors.is_empty());
            let sizes: HashSet<&String> = p.sizes.iter().collect();
            let colors: HashSet<&String> = p.colors.iter().collect();
            assert_eq!(sizes.len(), p.sizes.len(), "duplicate size in {}", p.name);
            assert_eq!(colors.len(), p.colors.len(), "duplicate color in {}", p.name);
        }
    }

    #[test]
    fn prices_keep_two_decimal_places() {
        let pulse = demo_products()
            .into_iter()
            .find(|p| p.name == "Air Max Pulse")
            .expect("seeded product");
        assert_eq!(pulse.price.to_string(), "149.99");
    }
}
