//! Service container for dependency injection
//!
//! Wires up the writer, the stream provider and stores.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::WritableXmlStore;
use crate::application::{ConfigurationWriter, XmlConfigurationWriter};
use crate::config::Settings;
use crate::infrastructure::traits::{FileStreamProvider, StreamProvider};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Mapping → document writer
    pub writer: Arc<dyn ConfigurationWriter>,

    /// Backing resource access
    pub streams: Arc<dyn StreamProvider>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let writer = Arc::new(XmlConfigurationWriter::new(settings.writer_options()));
        Self::with_deps(settings, writer, Arc::new(FileStreamProvider))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        writer: Arc<dyn ConfigurationWriter>,
        streams: Arc<dyn StreamProvider>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            writer,
            streams,
        }
    }

    /// Create an empty write-through store for `path`.
    pub fn store(&self, path: impl Into<PathBuf>) -> WritableXmlStore {
        WritableXmlStore::new(path, Arc::clone(&self.writer), Arc::clone(&self.streams))
    }
}
