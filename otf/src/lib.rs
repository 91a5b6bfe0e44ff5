//! A minimal reader for sfnt based fonts (TrueType, OpenType and TrueType Collections) that
//! extracts the naming information of a font without parsing any glyph data.

mod tables;
mod utils;

use std::convert::TryFrom;
use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt};
use tables::collection::{CollectionHeader, TTC_TAG};
use tables::offset::{OffsetTable, TableRecord};
use tables::{FontData, FontTable};

pub use tables::name::{name_id, platform_id, NameEntry, NameTable};
pub use tables::offset::SfntVersion;

#[derive(Debug, PartialEq, Clone)]
pub struct OpenTypeFont {
    sfnt_version: SfntVersion,
    name_table: NameTable,
}

impl OpenTypeFont {
    pub fn new(sfnt_version: SfntVersion, name_table: NameTable) -> Self {
        OpenTypeFont {
            sfnt_version,
            name_table,
        }
    }

    /// Parses a single font. Use [`FontCollection`] for `.ttc` files.
    pub fn from_slice(data: impl AsRef<[u8]>) -> Result<Self, io::Error> {
        let data = data.as_ref();
        if is_collection(data) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Data is a font collection, not a single font",
            ));
        }
        Self::unpack_at(&mut Cursor::new(data), 0)
    }

    fn unpack_at<R: AsRef<[u8]>>(cursor: &mut Cursor<R>, offset: u32) -> Result<Self, io::Error> {
        cursor.set_position(u64::from(offset));
        let offset_table = OffsetTable::unpack(cursor)?;

        Ok(OpenTypeFont {
            sfnt_version: offset_table.sfnt_version,
            name_table: offset_table.unpack_required_table(cursor)?,
        })
    }

    pub fn sfnt_version(&self) -> SfntVersion {
        self.sfnt_version
    }

    /// All decodable names with the given name id, in the order they appear in the font.
    pub fn names(&self, name_id: u16) -> Vec<NameEntry> {
        self.name_table.entries_for(name_id)
    }

    pub fn family_names(&self) -> Vec<NameEntry> {
        self.names(name_id::FAMILY_NAME)
    }

    pub fn full_names(&self) -> Vec<NameEntry> {
        self.names(name_id::FULL_NAME)
    }

    pub fn post_script_name(&self) -> Option<String> {
        self.names(name_id::POST_SCRIPT_NAME)
            .into_iter()
            .map(|entry| entry.name)
            .find(|name| !name.is_empty())
    }

    /// Note: only writes the tables known to this library.
    pub fn to_writer(&self, mut wr: impl io::Write) -> Result<(), io::Error> {
        let data = self.pack_at(0)?;
        wr.write_all(&data)?;
        Ok(())
    }

    /// Packs the font assuming its offset table will be located at `base` within the file.
    fn pack_at(&self, base: usize) -> Result<Vec<u8>, io::Error> {
        let mut writer = FontWriter::new(base, 1);
        writer.pack(&self.name_table)?;
        writer.finish(self.sfnt_version)
    }
}

/// A TrueType Collection (`.ttc`) containing one or more fonts that may share tables.
#[derive(Debug)]
pub struct FontCollection<'a> {
    data: &'a [u8],
    header: CollectionHeader,
}

impl<'a> FontCollection<'a> {
    pub fn from_slice(data: &'a [u8]) -> Result<Self, io::Error> {
        let header = CollectionHeader::unpack(&mut Cursor::new(data))?;
        Ok(FontCollection { data, header })
    }

    /// Number of fonts in the collection.
    pub fn len(&self) -> usize {
        self.header.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.header.offsets.is_empty()
    }

    /// Parses the font at the zero-based `index`.
    pub fn font(&self, index: usize) -> Result<OpenTypeFont, io::Error> {
        let offset = self.header.offsets.get(index).copied().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Font index {} out of range, collection contains {} fonts",
                    index,
                    self.len()
                ),
            )
        })?;
        OpenTypeFont::unpack_at(&mut Cursor::new(self.data), offset)
    }

    /// Writes `fonts` as a version 1.0 collection. Tables are not shared between fonts.
    pub fn write(fonts: &[OpenTypeFont], mut wr: impl io::Write) -> Result<(), io::Error> {
        let mut base = CollectionHeader::len_for(fonts.len());
        let mut offsets = Vec::with_capacity(fonts.len());
        let mut faces = Vec::with_capacity(fonts.len());
        for font in fonts {
            offsets.push(to_u32(base)?);
            let data = font.pack_at(base)?;
            base += data.len();
            faces.push(data);
        }

        CollectionHeader::new(offsets).pack(&mut wr)?;
        for data in faces {
            wr.write_all(&data)?;
        }
        Ok(())
    }
}

/// Whether `data` starts with the `ttcf` tag of a font collection.
pub fn is_collection(data: &[u8]) -> bool {
    Cursor::new(data).read_u32::<BigEndian>().ok() == Some(TTC_TAG)
}

struct FontWriter {
    /// Position of the offset table within the resulting file.
    base: usize,
    num_tables: usize,
    tables: Vec<TableRecord>,
    buffer: Vec<u8>,
}

impl FontWriter {
    fn new(base: usize, num_tables: usize) -> Self {
        FontWriter {
            base,
            num_tables,
            tables: Vec::with_capacity(num_tables),
            buffer: Vec::new(),
        }
    }

    fn offset_table_len(&self) -> usize {
        12 + self.num_tables * 16
    }

    fn pack<T: FontTable>(&mut self, table: &T) -> Result<(), io::Error> {
        if self.tables.len() == self.num_tables {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "Cannot write another table, already wrote {} tables",
                    self.tables.len()
                ),
            ));
        }

        let start = self.buffer.len();
        table.pack(&mut self.buffer)?;
        let len = self.buffer.len() - start;
        // align to 4 bytes
        self.buffer.resize(start + (len + 3) / 4 * 4, 0);
        self.tables.push(TableRecord {
            tag: T::name().to_string(),
            check_sum: check_sum(&self.buffer[start..]),
            offset: to_u32(self.base + self.offset_table_len() + start)?,
            length: to_u32(len)?,
        });

        Ok(())
    }

    fn finish(self, sfnt_version: SfntVersion) -> Result<Vec<u8>, io::Error> {
        if self.tables.len() != self.num_tables {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "Expected {} tables, but only wrote {}",
                    self.num_tables,
                    self.tables.len()
                ),
            ));
        }

        let mut tables = self.tables;
        tables.sort_by(|a, b| a.tag.cmp(&b.tag));
        let offset_table = OffsetTable::new(sfnt_version, tables);

        let mut data = Vec::with_capacity(self.buffer.len() + 12 + offset_table.tables.len() * 16);
        offset_table.pack(&mut data)?;
        data.extend_from_slice(&self.buffer);
        Ok(data)
    }
}

fn to_u32(n: usize) -> Result<u32, io::Error> {
    u32::try_from(n)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Font exceeds 4GiB"))
}

fn check_sum(mut data: impl io::Read) -> u32 {
    let mut sum = 0u32;
    while let Ok(n) = data.read_u32::<BigEndian>() {
        sum = sum.wrapping_add(n);
    }
    sum
}
