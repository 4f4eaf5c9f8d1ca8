pub mod product_reader;
pub mod summary_writer;
