// src/xml.rs
//! Feed serializer.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <inventory>
//!   <vehicle>
//!     <VIN>…</VIN>
//!     …
//!     <ImageURLs>
//!       <Image>…</Image>
//!     </ImageURLs>
//!     …
//!   </vehicle>
//! </inventory>
//! ```
//! Every record writes every element, in a fixed order, empty or not.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::data::{Element, VehicleRecord, IMAGE_ELEMENT};

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
pub const ROOT_ELEMENT: &str = "inventory";
pub const VEHICLE_ELEMENT: &str = "vehicle";

/// Streams `<vehicle>` elements into any writer.
pub struct FeedWriter<W: Write> {
    writer: W,
    vehicle_count: usize,
}

impl FeedWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and write the document prologue.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> FeedWriter<W> {
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{XML_DECLARATION}")?;
        writeln!(writer, "<{ROOT_ELEMENT}>")?;
        Ok(Self { writer, vehicle_count: 0 })
    }

    pub fn add_vehicle(&mut self, record: &VehicleRecord) -> io::Result<()> {
        writeln!(self.writer, "  <{VEHICLE_ELEMENT}>")?;
        for (name, element) in record.elements() {
            match element {
                Element::Text(value) => {
                    writeln!(self.writer, "    <{name}>{}</{name}>", escape_xml(&value))?;
                }
                Element::Images(urls) if urls.is_empty() => {
                    writeln!(self.writer, "    <{name}></{name}>")?;
                }
                Element::Images(urls) => {
                    writeln!(self.writer, "    <{name}>")?;
                    for url in urls {
                        writeln!(self.writer, "      <{IMAGE_ELEMENT}>{}</{IMAGE_ELEMENT}>", escape_xml(url))?;
                    }
                    writeln!(self.writer, "    </{name}>")?;
                }
            }
        }
        writeln!(self.writer, "  </{VEHICLE_ELEMENT}>")?;
        self.vehicle_count += 1;
        Ok(())
    }

    /// Close the root element and flush. Returns the number of vehicles written.
    pub fn finish(mut self) -> io::Result<usize> {
        writeln!(self.writer, "</{ROOT_ELEMENT}>")?;
        self.writer.flush()?;
        Ok(self.vehicle_count)
    }
}

/// Serialize a whole record list.
pub fn write_feed<W: Write>(writer: W, records: &[VehicleRecord]) -> io::Result<usize> {
    let mut feed = FeedWriter::new(writer)?;
    for record in records {
        feed.add_vehicle(record)?;
    }
    feed.finish()
}

/// Serialize to an in-memory string.
pub fn to_xml_string(records: &[VehicleRecord]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_feed(&mut buf, records);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Trim, drop characters XML 1.0 cannot carry, escape the five markup characters.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.trim().chars().filter(|c| is_xml_char(*c)) {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}
