use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{Product, ProductInput};
use crate::validation::{validate, validate_create, Mode};

/// The product collection, in insertion order. Sole owner and mutator of
/// every stored record; callers share it behind a single lock.
#[derive(Debug, Default)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn create(&mut self, input: &ProductInput) -> AppResult<Product> {
        let fields = validate_create(input).map_err(rejected)?;
        let product = Product::create(fields);
        self.products.push(product.clone());
        Ok(product)
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> AppResult<&Product> {
        self.position(id).map(|idx| &self.products[idx])
    }

    /// Fails with not-found before looking at the payload.
    pub fn update(&mut self, id: &str, input: &ProductInput) -> AppResult<Product> {
        let idx = self.position(id)?;
        let changes = validate(input, Mode::Update).map_err(rejected)?;
        let product = &mut self.products[idx];
        product.apply(changes);
        Ok(product.clone())
    }

    pub fn delete(&mut self, id: &str) -> AppResult<Product> {
        let idx = self.position(id)?;
        Ok(self.products.remove(idx))
    }

    // Linear scan; ids are compared in their canonical hyphenated form.
    fn position(&self, id: &str) -> AppResult<usize> {
        self.products
            .iter()
            .position(|p| p.id.to_string() == id)
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }
}

fn rejected(errors: Vec<String>) -> AppError {
    debug!(?errors, "Validation failed");
    AppError::Validation(errors)
}
