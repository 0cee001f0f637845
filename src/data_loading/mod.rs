pub mod table; // Tabuľka so stĺpcami
pub mod data_loader; // Strategy trait
pub mod csv_data_loader; // CSV implementation of strategy
pub mod factory; // Factory for loaders

pub use table::{Column, Table};
pub use data_loader::DataLoader;
pub use csv_data_loader::CsvDataLoader;
pub use factory::DataLoaderFactory;
