pub mod cli;
pub mod config;
pub mod error;
pub mod geodesy;
pub mod html;
pub mod models;
pub mod processors;
pub mod readers;
pub mod server;
pub mod utils;
pub mod writers;

pub use error::{ConverterError, Result};
