#![allow(dead_code)]

use printbeat::domain::product::Product;
use rand::Rng;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub fn generate_cart_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["id", "name", "price", "image_url"])?;

    for i in 1..=rows {
        wtr.write_record([
            format!("p{i}"),
            format!("Print {i}"),
            "100".to_string(),
            String::new(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// A product drawn from a small catalog so repeats happen often.
pub fn random_product<R: Rng>(rng: &mut R) -> Product {
    let n: u32 = rng.gen_range(0..8);
    let price: i64 = rng.gen_range(0..50_000);
    Product::new(format!("p{n}"), format!("Print {n}"), price, "")
}
