//! Configuration writer: flat mapping in, XML document out.

use std::io::Write;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::serializer::DocumentSerializer;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{ConfigMap, FormatOptions, TreeBuilder, DEFAULT_ROOT_NAME};
use crate::infrastructure::traits::{ElementWriterFactory, XmlWriterFactory};

/// Options recognized by [`XmlConfigurationWriter`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WriterOptions {
    /// Emit the provenance comment with the generation timestamp
    pub write_comment: bool,
    /// Name of the synthetic top-level element
    pub root_name: String,
    /// Indentation and newline settings
    pub format: FormatOptions,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            write_comment: true,
            root_name: DEFAULT_ROOT_NAME.to_string(),
            format: FormatOptions::default(),
        }
    }
}

/// A service capable of writing configuration data as a document to a stream.
pub trait ConfigurationWriter: Send + Sync {
    /// Write `data` to `stream`.
    ///
    /// Both arguments are checked before anything is written; `None` for
    /// either fails with `ApplicationError::InvalidArgument`.
    fn write(
        &self,
        stream: Option<&mut dyn Write>,
        data: Option<&ConfigMap>,
    ) -> ApplicationResult<()>;

    /// Serialize the mapping into an in-memory document.
    fn render(&self, data: &ConfigMap) -> ApplicationResult<Vec<u8>> {
        let mut buf = Vec::new();
        let dest: &mut dyn Write = &mut buf;
        self.write(Some(dest), Some(data))?;
        Ok(buf)
    }
}

/// Builds a tree from the mapping and serializes it as XML.
pub struct XmlConfigurationWriter {
    options: WriterOptions,
    builder: TreeBuilder,
    serializer: DocumentSerializer,
    factory: Arc<dyn ElementWriterFactory>,
}

impl Default for XmlConfigurationWriter {
    fn default() -> Self {
        Self::new(WriterOptions::default())
    }
}

impl XmlConfigurationWriter {
    pub fn new(options: WriterOptions) -> Self {
        Self::with_factory(options, Arc::new(XmlWriterFactory))
    }

    /// Create a writer with a custom element writer factory (for testing).
    pub fn with_factory(options: WriterOptions, factory: Arc<dyn ElementWriterFactory>) -> Self {
        let builder = TreeBuilder::new(options.root_name.clone());
        let serializer = DocumentSerializer::new(options.write_comment, options.format.clone());
        Self {
            options,
            builder,
            serializer,
            factory,
        }
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }
}

impl ConfigurationWriter for XmlConfigurationWriter {
    #[instrument(level = "debug", skip_all)]
    fn write(
        &self,
        stream: Option<&mut dyn Write>,
        data: Option<&ConfigMap>,
    ) -> ApplicationResult<()> {
        let stream = stream
            .ok_or_else(|| ApplicationError::InvalidArgument("stream must not be absent".into()))?;
        let data = data
            .ok_or_else(|| ApplicationError::InvalidArgument("data must not be absent".into()))?;

        let tree = self.builder.build(data)?;
        debug!("write: entries={}, nodes={}", data.len(), tree.len());

        let mut writer = self
            .factory
            .create(stream, &self.options.format)
            .map_err(|e| {
                ApplicationError::InvalidArgument(format!("a valid element writer is needed: {e}"))
            })?;

        self.serializer
            .serialize(&tree, writer.as_mut())
            .map_err(|e| ApplicationError::resource_write("stream", e))
    }
}
