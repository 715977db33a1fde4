//! Write-through XML persistence for flat configuration mappings.
//!
//! A [`ConfigMap`](domain::ConfigMap) of colon-delimited keys (`logging:level`)
//! is folded into a tree of elements and written as a complete XML document:
//!
//! ```
//! use xmlcfg::application::{ConfigurationWriter, WriterOptions, XmlConfigurationWriter};
//! use xmlcfg::domain::ConfigMap;
//!
//! let mut data = ConfigMap::new();
//! data.insert("logging:level".into(), "debug".into());
//!
//! let writer = XmlConfigurationWriter::new(WriterOptions {
//!     write_comment: false,
//!     ..WriterOptions::default()
//! });
//! let xml = String::from_utf8(writer.render(&data).unwrap()).unwrap();
//! assert!(xml.contains("<level>debug</level>"));
//! ```
//!
//! [`WritableXmlStore`](application::services::WritableXmlStore) keeps the
//! mapping in memory and rewrites its file on every `set`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
