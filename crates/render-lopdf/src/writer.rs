use lopdf::{Dictionary, Object, ObjectId, Stream, dictionary};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Counts bytes so object offsets can be recorded without `Seek`.
struct CountingWriter<W: Write> {
    inner: W,
    position: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.position += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Writes a PDF file body object by object.
///
/// Objects are buffered and emitted in id order by [`finish`](Self::finish),
/// followed by the cross-reference table and trailer. The output only needs
/// `Write`, so it can feed a channel directly.
pub struct StreamingPdfWriter<W: Write> {
    writer: CountingWriter<W>,
    offsets: BTreeMap<u32, u64>,
    max_id: u32,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    info_id: Option<ObjectId>,
    buffered_objects: BTreeMap<ObjectId, Object>,
}

impl<W: Write> StreamingPdfWriter<W> {
    pub fn new(writer: W, version: &str, font_dict: Dictionary) -> io::Result<Self> {
        let mut writer = CountingWriter { inner: writer, position: 0 };
        writer.write_all(format!("%PDF-{}\n%\u{e2}\u{e3}\u{cf}\u{d3}\n", version).as_bytes())?;

        let mut buffered_objects = BTreeMap::new();
        let resources_id = (1, 0);
        let pages_id = (2, 0);
        let catalog_id = (3, 0);

        buffered_objects.insert(resources_id, dictionary! { "Font" => font_dict }.into());

        Ok(Self {
            writer,
            offsets: BTreeMap::new(),
            max_id: 3,
            catalog_id,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            info_id: None,
            buffered_objects,
        })
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.max_id += 1;
        (self.max_id, 0)
    }

    pub fn buffer_object(&mut self, object: Object) -> ObjectId {
        let id = self.new_object_id();
        self.buffered_objects.insert(id, object);
        id
    }

    pub fn buffer_object_at_id(&mut self, id: ObjectId, object: Object) {
        if id.0 > self.max_id {
            self.max_id = id.0;
        }
        self.buffered_objects.insert(id, object);
    }

    /// Buffers an already encoded content stream.
    pub fn buffer_content_stream(&mut self, content: Vec<u8>) -> ObjectId {
        let stream = Stream::new(dictionary! {}, content);
        self.buffer_object(Object::Stream(stream))
    }

    pub fn set_page_ids(&mut self, page_ids: Vec<ObjectId>) {
        self.page_ids = page_ids;
    }

    pub fn set_info(&mut self, info: Dictionary) {
        let id = self.buffer_object(info.into());
        self.info_id = Some(id);
    }

    pub fn finish(mut self) -> io::Result<W> {
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.buffer_object_at_id(self.pages_id, pages_dict.into());

        let catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        self.buffer_object_at_id(self.catalog_id, catalog_dict.into());

        let objects = std::mem::take(&mut self.buffered_objects);
        for (id, object) in &objects {
            self.offsets.insert(id.0, self.writer.position);
            write!(self.writer, "{} {} obj\n", id.0, id.1)?;
            internal_writer::write_object(&mut self.writer, object)?;
            writeln!(self.writer, "\nendobj")?;
        }

        let xref_start = self.writer.position;
        let size = self.max_id + 1;
        internal_writer::write_xref(&mut self.writer, &self.offsets, size)?;

        let mut trailer = dictionary! { "Size" => size as i64, "Root" => self.catalog_id };
        if let Some(info_id) = self.info_id {
            trailer.set("Info", info_id);
        }
        writeln!(self.writer, "trailer")?;
        internal_writer::write_dictionary(&mut self.writer, &trailer)?;
        writeln!(self.writer, "\nstartxref")?;
        writeln!(self.writer, "{}", xref_start)?;
        write!(self.writer, "%%EOF")?;

        self.writer.flush()?;
        Ok(self.writer.inner)
    }
}

mod internal_writer {
    use super::*;
    use lopdf::StringFormat;

    pub fn write_object(writer: &mut dyn Write, object: &Object) -> io::Result<()> {
        match object {
            Object::Null => writer.write_all(b"null"),
            Object::Boolean(b) => writer.write_all(if *b { b"true" } else { b"false" }),
            Object::Integer(i) => write!(writer, "{}", i),
            Object::Real(r) => write!(writer, "{:.3}", r),
            Object::Name(n) => {
                writer.write_all(b"/")?;
                writer.write_all(n)
            }
            Object::String(s, format) => match format {
                StringFormat::Literal => {
                    writer.write_all(b"(")?;
                    for &byte in s {
                        if byte == b'(' || byte == b')' || byte == b'\\' {
                            writer.write_all(b"\\")?;
                        }
                        writer.write_all(&[byte])?;
                    }
                    writer.write_all(b")")
                }
                StringFormat::Hexadecimal => {
                    write!(writer, "<{}>", s.iter().map(|b| format!("{:02X}", b)).collect::<String>())
                }
            },
            Object::Array(arr) => {
                writer.write_all(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        writer.write_all(b" ")?;
                    }
                    write_object(writer, obj)?;
                }
                writer.write_all(b"]")
            }
            Object::Dictionary(dict) => write_dictionary(writer, dict),
            Object::Stream(stream) => {
                let mut dict = stream.dict.clone();
                dict.set("Length", stream.content.len() as i64);
                write_dictionary(writer, &dict)?;
                writer.write_all(b"\nstream\n")?;
                writer.write_all(&stream.content)?;
                writer.write_all(b"\nendstream")
            }
            Object::Reference(id) => write!(writer, "{} {} R", id.0, id.1),
        }
    }

    pub fn write_dictionary(writer: &mut dyn Write, dict: &Dictionary) -> io::Result<()> {
        writer.write_all(b"<<")?;
        let sorted_keys: BTreeMap<_, _> = dict.iter().collect();
        for (key, value) in sorted_keys {
            writer.write_all(b"/")?;
            writer.write_all(key)?;
            writer.write_all(b" ")?;
            write_object(writer, value)?;
            writer.write_all(b" ")?;
        }
        writer.write_all(b">>")
    }

    /// Writes a single cross-reference section covering ids `0..size`.
    /// Ids without a recorded offset are marked free.
    pub fn write_xref(writer: &mut dyn Write, offsets: &BTreeMap<u32, u64>, size: u32) -> io::Result<()> {
        writeln!(writer, "xref")?;
        writeln!(writer, "0 {}", size)?;
        writeln!(writer, "0000000000 65535 f ")?;
        for id in 1..size {
            match offsets.get(&id) {
                Some(offset) => writeln!(writer, "{:010} {:05} n ", offset, 0)?,
                None => writeln!(writer, "0000000000 65535 f ")?,
            }
        }
        Ok(())
    }
}
