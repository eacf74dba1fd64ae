pub mod csv_reader;

pub use csv_reader::{clean_text, decode_bytes, ColumnMap, CsvReader};
