use crate::domain::product::Product;
use crate::error::{CheckoutError, Result};
use std::io::Read;

/// Reads cart products from a CSV source with an `id,name,price,image_url`
/// header. Prices are integer minor units.
pub struct ProductReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ProductReader<R> {
    /// Creates a new `ProductReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes products, one
    /// `Result` per row so a bad row does not stop the rest. Rows with a
    /// negative price are rejected.
    pub fn products(self) -> impl Iterator<Item = Result<Product>> {
        self.reader.into_deserialize().map(|result| {
            let product: Product = result?;
            if product.price.is_negative() {
                return Err(CheckoutError::InvalidAmount(format!(
                    "price of {} must not be negative, got {}",
                    product.id,
                    product.price.minor_units()
                )));
            }
            Ok(product)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;

    #[test]
    fn test_reader_valid_stream() {
        let data = "id, name, price, image_url\np1, Poster, 1000, https://img/p1.png\np2, Mug, 2500, ";
        let reader = ProductReader::new(data.as_bytes());
        let results: Vec<Result<Product>> = reader.products().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.id.as_str(), "p1");
        assert_eq!(first.price, Money::from_minor(1000));
        assert_eq!(first.image_url, "https://img/p1.png");
        assert!(results[1].as_ref().unwrap().image_url.is_empty());
    }

    #[test]
    fn test_reader_malformed_price() {
        let data = "id, name, price, image_url\np1, Poster, 10.00, \np2, Mug, 2500, ";
        let reader = ProductReader::new(data.as_bytes());
        let results: Vec<Result<Product>> = reader.products().collect();

        assert!(matches!(results[0], Err(CheckoutError::Csv(_))));
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_reader_rejects_negative_price() {
        let data = "id, name, price, image_url\np1, Refund, -5000, \np2, Mug, 0, ";
        let reader = ProductReader::new(data.as_bytes());
        let results: Vec<Result<Product>> = reader.products().collect();

        assert!(matches!(results[0], Err(CheckoutError::InvalidAmount(_))));
        assert_eq!(results[1].as_ref().unwrap().price, Money::ZERO);
    }
}
