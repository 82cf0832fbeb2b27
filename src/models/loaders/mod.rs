pub mod document_loader;

pub use document_loader::{list_work_items, read_document, InputListing};
