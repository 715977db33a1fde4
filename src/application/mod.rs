//! Application layer: serialization and the write-through store
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod serializer;
pub mod services;
pub mod writer;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use serializer::DocumentSerializer;
pub use writer::{ConfigurationWriter, WriterOptions, XmlConfigurationWriter};
