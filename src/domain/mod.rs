//! Domain layer: key paths, the configuration tree and its builder
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod path;

pub use arena::{ConfigNode, ConfigTree};
pub use builder::{TreeBuilder, DEFAULT_ROOT_NAME};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use path::{
    combine, is_element_name, parent_path, section_key, segments, split_key, KEY_DELIMITER,
};
