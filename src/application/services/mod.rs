//! Application services

pub mod store;

pub use store::WritableXmlStore;
