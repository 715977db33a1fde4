//! I/O boundary traits for testability
//!
//! These traits abstract the markup writer and the backing resource, allowing
//! the serializer and the store to be tested with in-memory implementations.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::domain::FormatOptions;
use crate::infrastructure::xml::XmlElementWriter;

/// Low-level markup writer used by the document serializer.
pub trait ElementWriter {
    /// Write the document start marker (XML declaration).
    fn start_document(&mut self) -> io::Result<()>;

    /// Finish the document and flush buffered output.
    fn end_document(&mut self) -> io::Result<()>;

    /// Open an element.
    fn start_element(&mut self, name: &str) -> io::Result<()>;

    /// Close the most recently opened element.
    fn end_element(&mut self, name: &str) -> io::Result<()>;

    /// Write escaped text content.
    fn write_text(&mut self, text: &str) -> io::Result<()>;

    /// Write a comment.
    fn write_comment(&mut self, text: &str) -> io::Result<()>;
}

/// Creates element writers for a destination stream.
pub trait ElementWriterFactory: Send + Sync {
    /// Build a writer over `dest` using the given formatting.
    fn create<'w>(
        &self,
        dest: &'w mut dyn Write,
        format: &FormatOptions,
    ) -> io::Result<Box<dyn ElementWriter + 'w>>;
}

/// Hands out writable handles for physical resource locations.
pub trait StreamProvider: Send + Sync {
    /// Open `path` for writing; prior content is discarded.
    fn writable_stream(&self, path: &Path) -> io::Result<Box<dyn Write>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// quick-xml backed element writer factory.
#[derive(Debug, Default)]
pub struct XmlWriterFactory;

impl ElementWriterFactory for XmlWriterFactory {
    fn create<'w>(
        &self,
        dest: &'w mut dyn Write,
        format: &FormatOptions,
    ) -> io::Result<Box<dyn ElementWriter + 'w>> {
        Ok(Box::new(XmlElementWriter::new(dest, format)?))
    }
}

/// Real filesystem stream provider (truncate-and-overwrite).
///
/// Missing files are created; missing parent directories are not.
#[derive(Debug, Default)]
pub struct FileStreamProvider;

impl StreamProvider for FileStreamProvider {
    fn writable_stream(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
