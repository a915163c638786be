use crate::{DataBlock, Error};

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Writer;

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const INDENT: &[u8] = b"  ";

/// Indenting XML writer with a raw byte escape hatch for the appended section.
///
/// Every element is written on its own line, indented by two spaces per open parent. The
/// writer remembers which elements are open so that [`close_element`](Self::close_element)
/// always emits the matching end tag.
///
/// Attribute values are written as given, without escaping. The writer is only ever fed
/// identifiers and numbers, so callers must not pass names containing `"`, `<` or `&`.
pub struct XmlWriter<W: Write> {
    writer: Writer<W>,
    elements: Vec<String>,
}

impl XmlWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path` and write to it through a buffer.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Create {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(XmlWriter::new(BufWriter::new(file)))
    }
}

impl<W: Write> XmlWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new(inner),
            elements: Vec::new(),
        }
    }

    /// number of currently open elements
    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    /// Write `<name a="b" ...>` on its own line and open a new nesting level.
    pub fn open_element(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), Error> {
        self.indent()?;
        self.writer
            .write_event(Event::Start(start_tag(name, attributes)))?;
        self.newline()?;

        self.elements.push(name.to_string());
        Ok(())
    }

    /// Close the most recently opened element.
    ///
    /// # Panics
    ///
    /// If no element is open. Balanced open / close calls are a precondition of the writer.
    pub fn close_element(&mut self) -> Result<(), Error> {
        let name = match self.elements.pop() {
            Some(name) => name,
            None => panic!("close_element called without an open element"),
        };

        self.indent()?;
        self.writer
            .write_event(Event::End(BytesEnd::new(name.as_str())))?;
        self.newline()?;
        Ok(())
    }

    /// Write a self closing `<name a="b" .../>` line.
    pub fn inline_element(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), Error> {
        self.indent()?;
        self.writer
            .write_event(Event::Empty(start_tag(name, attributes)))?;
        self.newline()?;
        Ok(())
    }

    /// Write free text, optionally indented to the current depth and followed by a newline.
    pub fn write_content(
        &mut self,
        content: &str,
        use_indent: bool,
        add_newline: bool,
    ) -> Result<(), Error> {
        if use_indent {
            self.indent()?;
        }
        self.writer.inner().write_all(content.as_bytes())?;
        if add_newline {
            self.newline()?;
        }
        Ok(())
    }

    /// Write bytes to the output verbatim.
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.writer.inner().write_all(bytes)?;
        Ok(())
    }

    /// write the `DataArray` header for a block whose bytes start at `offset` in
    /// the appended section
    pub fn write_data_array(&mut self, block: &DataBlock, offset: u32) -> Result<(), Error> {
        let components = block.components().to_string();
        let offset = offset.to_string();

        let mut attributes = Vec::with_capacity(5);
        if !block.name().is_empty() {
            attributes.push(("Name", block.name()));
        }
        if block.components() != 0 {
            attributes.push(("NumberOfComponents", components.as_str()));
        }
        attributes.push(("type", block.data_type().as_str()));
        attributes.push(("format", "appended"));
        attributes.push(("offset", offset.as_str()));

        self.inline_element("DataArray", &attributes)
    }

    /// Flush everything written so far and hand back the underlying writer.
    pub fn finish(self) -> Result<W, Error> {
        let mut inner = self.writer.into_inner();
        inner.flush()?;
        Ok(inner)
    }

    fn indent(&mut self) -> Result<(), Error> {
        let inner = self.writer.inner();
        for _ in 0..self.elements.len() {
            inner.write_all(INDENT)?;
        }
        Ok(())
    }

    fn newline(&mut self) -> Result<(), Error> {
        self.writer.inner().write_all(b"\n")?;
        Ok(())
    }
}

fn start_tag<'a>(name: &'a str, attributes: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for (key, value) in attributes {
        // raw attribute: the value is not escaped
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Borrowed(value.as_bytes()),
        });
    }
    start
}
