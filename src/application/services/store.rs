//! Write-through configuration store
//!
//! Every mutation rewrites the complete backing document.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::writer::ConfigurationWriter;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{segments, ConfigMap};
use crate::infrastructure::traits::StreamProvider;

/// In-memory configuration mapping persisted to a single XML file.
///
/// `set` takes `&mut self` and is not internally synchronized; callers sharing
/// a store across threads must wrap it (e.g. in a `Mutex`).
///
/// A failed `set` keeps the new value in memory. The file is then either
/// unchanged (failure before the handle was opened) or truncated and partially
/// written. There is no temp-file-and-rename step.
pub struct WritableXmlStore {
    path: PathBuf,
    data: ConfigMap,
    writer: Arc<dyn ConfigurationWriter>,
    streams: Arc<dyn StreamProvider>,
}

impl WritableXmlStore {
    /// Create an empty store backed by `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        writer: Arc<dyn ConfigurationWriter>,
        streams: Arc<dyn StreamProvider>,
    ) -> Self {
        Self {
            path: path.into(),
            data: ConfigMap::new(),
            writer,
            streams,
        }
    }

    /// Seed the mapping, e.g. with data loaded by an external reader.
    ///
    /// Nothing is written until the next `set` or `flush`.
    pub fn with_data(mut self, data: ConfigMap) -> Self {
        self.data = data;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &ConfigMap {
        &self.data
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Insert or overwrite `key`, then rewrite the backing file from the
    /// complete mapping.
    ///
    /// # Errors
    /// - `Domain(InvalidKey)` for an empty or malformed key; the mapping is
    ///   left unchanged
    /// - `ResourceWrite` if the file cannot be opened or written; the mapping
    ///   already holds the new value
    #[instrument(level = "debug", skip(self, value), fields(path = %self.path.display()))]
    pub fn set(&mut self, key: &str, value: &str) -> ApplicationResult<()> {
        segments(key)?;
        self.data.insert(key.to_string(), value.to_string());
        debug!("set: key={}, entries={}", key, self.data.len());
        self.persist()
    }

    /// Rewrite the backing file from the current mapping.
    pub fn flush(&self) -> ApplicationResult<()> {
        self.persist()
    }

    fn persist(&self) -> ApplicationResult<()> {
        let document = self.writer.render(&self.data)?;

        let mut stream = self
            .streams
            .writable_stream(&self.path)
            .or_resource_write(&self.path)?;
        stream
            .write_all(&document)
            .and_then(|()| stream.flush())
            .or_resource_write(&self.path)?;

        info!(
            "persisted {} entries ({} bytes) to {}",
            self.data.len(),
            document.len(),
            self.path.display()
        );
        Ok(())
    }
}
