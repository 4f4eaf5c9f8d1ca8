use super::product::{Product, ProductId};
use std::collections::HashSet;

/// Products the user has starred. Independent of the cart.
#[derive(Debug, Clone, Default)]
pub struct FavoritesSet {
    products: HashSet<ProductId>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, product: &Product) -> bool {
        self.products.contains(&product.id)
    }

    /// Flips the favorite flag and returns the new state.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.products.remove(&product.id) {
            false
        } else {
            self.products.insert(product.id.clone());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<ProductId> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self {
            products: iter.into_iter().collect(),
        }
    }
}
