use crate::models::{NewProduct, Product};

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200";

static SAMPLES: &[(&str, &str, f64)] = &[
    ("Sample Product 1", "This is a sample product description", 29.99),
    ("Sample Product 2", "Another sample product description", 49.99),
];

/// Records loaded into the store at startup.
pub fn sample_products() -> Vec<Product> {
    SAMPLES
        .iter()
        .map(|&(title, description, price)| {
            Product::create(NewProduct {
                title: title.to_string(),
                image: PLACEHOLDER_IMAGE.to_string(),
                description: description.to_string(),
                price,
            })
        })
        .collect()
}
