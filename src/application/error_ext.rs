//! `io::Result` adapters attaching the resource location to failures.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

pub trait IoResultExt<T> {
    /// Failure reading a file the application depends on (e.g. settings).
    ///
    /// ```ignore
    /// std::fs::read_to_string(&path).with_path_context("read config", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Failure persisting a document to its backing file.
    fn or_resource_write(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{action} {}", path.display()),
            source: Box::new(e),
        })
    }

    fn or_resource_write(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::resource_write(path.display(), e))
    }
}
