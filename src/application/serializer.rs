//! Document serializer: writes a [`ConfigTree`] through an [`ElementWriter`].

use std::io;

use chrono::Local;
use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::{ConfigTree, FormatOptions};
use crate::infrastructure::traits::ElementWriter;

/// Depth-first writer for configuration trees.
///
/// Each element is written as start tag, all children, then its own text,
/// then the end tag. Text therefore follows child elements for nodes that
/// have both.
#[derive(Debug, Clone)]
pub struct DocumentSerializer {
    write_comment: bool,
    format: FormatOptions,
}

impl Default for DocumentSerializer {
    fn default() -> Self {
        Self::new(true, FormatOptions::default())
    }
}

impl DocumentSerializer {
    pub fn new(write_comment: bool, format: FormatOptions) -> Self {
        Self {
            write_comment,
            format,
        }
    }

    pub fn write_comment(&self) -> bool {
        self.write_comment
    }

    pub fn format(&self) -> &FormatOptions {
        &self.format
    }

    /// Write the complete document: declaration, optional generation
    /// comment, the element tree and the end marker.
    #[instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
    pub fn serialize(&self, tree: &ConfigTree, writer: &mut dyn ElementWriter) -> io::Result<()> {
        writer.start_document()?;

        if self.write_comment {
            writer.write_comment(&generation_comment())?;
        }

        self.write_node(tree, tree.root(), writer)?;

        writer.end_document()?;
        debug!("document written");
        Ok(())
    }

    fn write_node(
        &self,
        tree: &ConfigTree,
        idx: Index,
        writer: &mut dyn ElementWriter,
    ) -> io::Result<()> {
        let Some(node) = tree.get_node(idx) else {
            return Ok(());
        };

        writer.start_element(&node.name)?;

        for &child in &node.children {
            self.write_node(tree, child, writer)?;
        }

        if let Some(value) = node.value.as_deref().filter(|v| !v.is_empty()) {
            writer.write_text(&self.format.normalize_text(value))?;
        }

        writer.end_element(&node.name)
    }
}

/// Provenance comment placed at the top of generated documents.
pub fn generation_comment() -> String {
    format!(
        "Auto generated by {} on {}",
        env!("CARGO_PKG_NAME"),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}
