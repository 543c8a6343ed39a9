pub mod catalog;
pub mod loaders;
pub mod naming;

pub use catalog::{Article, Batch, Journal};
pub use loaders::{load_catalog, parse_catalog};
pub use naming::{artifact_file_name, journal_dir, sanitize_file_name};
