//! quick-xml implementation of [`ElementWriter`].

use std::io::{self, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::domain::{is_element_name, FormatOptions};
use crate::infrastructure::traits::ElementWriter;

/// Writes elements as UTF-8 XML through quick-xml.
///
/// An element closed without any content is written as `<name></name>` on a
/// single line, also when indenting.
pub struct XmlElementWriter<W: Write> {
    writer: Writer<W>,
    /// Last start tag has no content yet
    open_empty: bool,
}

impl<W: Write> XmlElementWriter<W> {
    /// Create a writer over `inner`.
    ///
    /// # Errors
    /// `InvalidInput` if indentation is enabled with a non-ASCII-whitespace
    /// indent character.
    pub fn new(inner: W, format: &FormatOptions) -> io::Result<Self> {
        let writer = if format.indent {
            let indent_char = u8::try_from(format.indent_char)
                .ok()
                .filter(u8::is_ascii_whitespace)
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("unsupported indent character: {:?}", format.indent_char),
                    )
                })?;
            Writer::new_with_indent(inner, indent_char, format.indent_size)
        } else {
            Writer::new(inner)
        };
        Ok(Self {
            writer,
            open_empty: false,
        })
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> ElementWriter for XmlElementWriter<W> {
    fn start_document(&mut self) -> io::Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
    }

    fn end_document(&mut self) -> io::Result<()> {
        self.writer.get_mut().flush()
    }

    fn start_element(&mut self, name: &str) -> io::Result<()> {
        check_name(name)?;
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        self.open_empty = true;
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> io::Result<()> {
        check_name(name)?;
        if std::mem::take(&mut self.open_empty) {
            // keeps the indenter from breaking the line before the end tag
            self.writer.write_event(Event::Text(BytesText::new("")))?;
        }
        self.writer.write_event(Event::End(BytesEnd::new(name)))
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.open_empty = false;
        self.writer.write_event(Event::Text(BytesText::new(text)))
    }

    fn write_comment(&mut self, text: &str) -> io::Result<()> {
        self.open_empty = false;
        // "--" is not allowed inside XML comments
        let text = text.replace("--", "- -");
        self.writer
            .write_event(Event::Comment(BytesText::from_escaped(text)))
    }
}

fn check_name(name: &str) -> io::Result<()> {
    if is_element_name(name) {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid element name: {name:?}"),
        ))
    }
}
