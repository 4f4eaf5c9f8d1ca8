use crate::domain::cart::CartState;
use crate::domain::favorites::FavoritesSet;
use crate::domain::money::MoneyFormatter;
use crate::domain::product::Product;

/// What one list row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub index: usize,
    pub name: String,
    pub price: String,
    pub image_url: String,
    pub favorited: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActionKind {
    Remove,
    ToggleFavorite,
}

/// A row action resolved to the product it targets, handed to the owner of
/// the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Remove(Product),
    ToggleFavorite(Product),
}

/// Binds the cart's items to list rows.
#[derive(Debug, Clone, Default)]
pub struct CartListPresenter {
    formatter: MoneyFormatter,
}

impl CartListPresenter {
    pub fn new(formatter: MoneyFormatter) -> Self {
        Self { formatter }
    }

    pub fn row_count(&self, cart: &CartState) -> usize {
        cart.len()
    }

    pub fn row(&self, cart: &CartState, favorites: &FavoritesSet, index: usize) -> Option<CartRow> {
        cart.get(index).map(|product| CartRow {
            index,
            name: product.name.clone(),
            price: self.formatter.format(product.price),
            image_url: product.image_url.clone(),
            favorited: favorites.contains(product),
        })
    }

    pub fn rows(&self, cart: &CartState, favorites: &FavoritesSet) -> Vec<CartRow> {
        (0..self.row_count(cart))
            .filter_map(|index| self.row(cart, favorites, index))
            .collect()
    }

    /// Resolves a tap on row `index`. Out-of-range rows yield `None`.
    pub fn action(&self, cart: &CartState, index: usize, kind: RowActionKind) -> Option<RowAction> {
        let product = cart.get(index)?.clone();
        Some(match kind {
            RowActionKind::Remove => RowAction::Remove(product),
            RowActionKind::ToggleFavorite => RowAction::ToggleFavorite(product),
        })
    }

    /// Removes `product` from the cart and returns the row index to delete.
    ///
    /// The index is looked up before the cart mutation. If the cart no longer
    /// holds the product nothing is removed and no row index is returned.
    pub fn remove_row(&self, cart: &mut CartState, product: &Product) -> Option<usize> {
        let index = cart.position(product)?;
        cart.remove_item(product).then_some(index)
    }

    pub fn toggle_favorite(&self, favorites: &mut FavoritesSet, product: &Product) -> bool {
        favorites.toggle(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_with(items: &[(&str, i64)]) -> CartState {
        let mut cart = CartState::default();
        for (id, price) in items {
            cart.add_item(Product::new(*id, format!("Print {id}"), *price, format!("https://img/{id}")));
        }
        cart
    }

    #[test]
    fn test_rows_reflect_cart_and_favorites() {
        let cart = cart_with(&[("a", 1000), ("b", 2599)]);
        let mut favorites = FavoritesSet::new();
        favorites.toggle(&cart.items()[1]);
        let presenter = CartListPresenter::default();

        let rows = presenter.rows(&cart, &favorites);

        assert_eq!(presenter.row_count(&cart), 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Print a");
        assert_eq!(rows[0].price, "$10.00");
        assert!(!rows[0].favorited);
        assert_eq!(rows[1].price, "$25.99");
        assert_eq!(rows[1].image_url, "https://img/b");
        assert!(rows[1].favorited);
    }

    #[test]
    fn test_row_out_of_range() {
        let cart = cart_with(&[("a", 1000)]);
        let presenter = CartListPresenter::default();
        assert!(presenter.row(&cart, &FavoritesSet::new(), 1).is_none());
        assert!(presenter.action(&cart, 5, RowActionKind::Remove).is_none());
    }

    #[test]
    fn test_remove_row_reports_first_index() {
        let mut cart = cart_with(&[("a", 100), ("b", 200), ("b", 200)]);
        let presenter = CartListPresenter::default();
        let target = cart.items()[1].clone();

        assert_eq!(presenter.remove_row(&mut cart, &target), Some(1));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_remove_row_of_missing_item_is_refused() {
        let mut cart = cart_with(&[("a", 100)]);
        let presenter = CartListPresenter::default();
        let gone = cart.items()[0].clone();
        cart.remove_item(&gone);

        assert_eq!(presenter.remove_row(&mut cart, &gone), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_action_resolves_product() {
        let cart = cart_with(&[("a", 100), ("b", 200)]);
        let presenter = CartListPresenter::default();

        let action = presenter.action(&cart, 1, RowActionKind::ToggleFavorite);
        assert_eq!(action, Some(RowAction::ToggleFavorite(cart.items()[1].clone())));
    }

    #[test]
    fn test_toggle_favorite() {
        let cart = cart_with(&[("a", 100)]);
        let mut favorites = FavoritesSet::new();
        let presenter = CartListPresenter::default();

        assert!(presenter.toggle_favorite(&mut favorites, &cart.items()[0]));
        assert!(presenter.row(&cart, &favorites, 0).unwrap().favorited);
    }
}
