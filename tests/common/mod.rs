//! Shared fakes for integration tests.
#![allow(dead_code)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use xmlcfg::application::WriterOptions;
use xmlcfg::domain::{ConfigMap, FormatOptions};
use xmlcfg::infrastructure::traits::{ElementWriter, ElementWriterFactory, StreamProvider};

/// Build an ordered mapping from literal pairs.
pub fn config_map(pairs: &[(&str, &str)]) -> ConfigMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Writer options without the timestamp comment, for byte-exact checks.
pub fn options_without_comment() -> WriterOptions {
    WriterOptions {
        write_comment: false,
        ..WriterOptions::default()
    }
}

// ============================================================
// Recording element writer
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    StartDocument,
    EndDocument,
    Start(String),
    End(String),
    Text(String),
    Comment(String),
}

pub struct RecordingWriter {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingWriter {
    fn record(&self, call: Call) -> io::Result<()> {
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl ElementWriter for RecordingWriter {
    fn start_document(&mut self) -> io::Result<()> {
        self.record(Call::StartDocument)
    }

    fn end_document(&mut self) -> io::Result<()> {
        self.record(Call::EndDocument)
    }

    fn start_element(&mut self, name: &str) -> io::Result<()> {
        self.record(Call::Start(name.to_string()))
    }

    fn end_element(&mut self, name: &str) -> io::Result<()> {
        self.record(Call::End(name.to_string()))
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.record(Call::Text(text.to_string()))
    }

    fn write_comment(&mut self, text: &str) -> io::Result<()> {
        self.record(Call::Comment(text.to_string()))
    }
}

/// Factory handing out [`RecordingWriter`]s that share one call log.
#[derive(Default)]
pub struct RecordingFactory {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub created: AtomicUsize,
    pub last_format: Mutex<Option<FormatOptions>>,
}

impl RecordingFactory {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ElementWriterFactory for RecordingFactory {
    fn create<'w>(
        &self,
        _dest: &'w mut dyn Write,
        format: &FormatOptions,
    ) -> io::Result<Box<dyn ElementWriter + 'w>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        *self.last_format.lock().unwrap() = Some(format.clone());
        Ok(Box::new(RecordingWriter {
            calls: Arc::clone(&self.calls),
        }))
    }
}

/// Factory that cannot construct a writer.
#[derive(Debug, Default)]
pub struct BrokenFactory;

impl ElementWriterFactory for BrokenFactory {
    fn create<'w>(
        &self,
        _dest: &'w mut dyn Write,
        _format: &FormatOptions,
    ) -> io::Result<Box<dyn ElementWriter + 'w>> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "no writer"))
    }
}

// ============================================================
// Stream providers
// ============================================================

/// Writer appending to a shared buffer.
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory resource with truncate-on-open semantics.
#[derive(Default)]
pub struct MemoryStreamProvider {
    pub content: Arc<Mutex<Vec<u8>>>,
    pub opened: Mutex<Vec<PathBuf>>,
}

impl MemoryStreamProvider {
    pub fn content(&self) -> String {
        String::from_utf8(self.content.lock().unwrap().clone()).unwrap()
    }

    pub fn open_count(&self) -> usize {
        self.opened.lock().unwrap().len()
    }
}

impl StreamProvider for MemoryStreamProvider {
    fn writable_stream(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        self.opened.lock().unwrap().push(path.to_path_buf());
        self.content.lock().unwrap().clear();
        Ok(Box::new(SharedBuffer(Arc::clone(&self.content))))
    }
}

/// Resource that can never be opened.
#[derive(Debug, Default)]
pub struct FailingStreamProvider;

impl StreamProvider for FailingStreamProvider {
    fn writable_stream(&self, _path: &Path) -> io::Result<Box<dyn Write>> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

/// Resource that opens but fails after accepting a few bytes.
#[derive(Default)]
pub struct PartialWriteStreamProvider {
    pub content: Arc<Mutex<Vec<u8>>>,
}

struct PartialWriter {
    content: Arc<Mutex<Vec<u8>>>,
    budget: usize,
}

impl Write for PartialWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        let n = buf.len().min(self.budget);
        self.content.lock().unwrap().extend_from_slice(&buf[..n]);
        self.budget -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl StreamProvider for PartialWriteStreamProvider {
    fn writable_stream(&self, _path: &Path) -> io::Result<Box<dyn Write>> {
        self.content.lock().unwrap().clear();
        Ok(Box::new(PartialWriter {
            content: Arc::clone(&self.content),
            budget: 10,
        }))
    }
}
