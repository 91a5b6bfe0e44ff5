use std::convert::TryFrom;
use std::io::{self, Cursor, Read};

use crate::tables::{FontData, FontTable};
use crate::utils::limit_read::LimitRead;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

/// This table contains a dictionary of all font tables included in the file.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/otff
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6.html
#[derive(Debug, PartialEq)]
pub struct OffsetTable {
    /// OpenType fonts that contain TrueType outlines should use the value of 0x00010000. OpenType
    /// fonts containing CFF data (version 1 or 2) should use 0x4F54544F ('OTTO', when
    /// re-interpreted as a Tag).
    pub(crate) sfnt_version: SfntVersion,
    /// Number of tables.
    pub(crate) num_tables: u16,
    /// (Maximum power of 2 <= numTables) x 16.
    pub(crate) search_range: u16,
    /// Log2(maximum power of 2 <= numTables).
    pub(crate) entry_selector: u16,
    /// NumTables x 16-searchRange.
    pub(crate) range_shift: u16,
    /// Table records of the font. Should be ordered ascending by their tag, which is not relied
    /// upon when looking tables up.
    pub(crate) tables: Vec<TableRecord>,
}

impl OffsetTable {
    pub(crate) fn new(sfnt_version: SfntVersion, tables: Vec<TableRecord>) -> Self {
        let num_tables = u16::try_from(tables.len()).ok().unwrap_or(u16::MAX);
        let (search_range, entry_selector, range_shift) = binary_search_params(num_tables);
        OffsetTable {
            sfnt_version,
            num_tables,
            search_range,
            entry_selector,
            range_shift,
            tables,
        }
    }

    pub fn get_table_record(&self, tag: &str) -> Option<&TableRecord> {
        self.tables.iter().find(|r| r.tag == tag)
    }

    pub fn unpack_table<T, R>(&self, cursor: &mut Cursor<R>) -> Result<Option<T>, io::Error>
    where
        R: AsRef<[u8]>,
        T: FontTable,
    {
        let record = match self.get_table_record(T::name()) {
            Some(record) => record,
            None => return Ok(None),
        };

        let len = cursor.get_ref().as_ref().len() as u64;
        let end = u64::from(record.offset) + u64::from(record.length);
        if end > len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "{} table exceeds font data ({} > {} bytes)",
                    T::name(),
                    end,
                    len
                ),
            ));
        }

        cursor.set_position(u64::from(record.offset));
        let mut limit_read = LimitRead::new(cursor.by_ref(), record.length as usize);
        Ok(Some(T::unpack(&mut limit_read)?))
    }

    pub fn unpack_required_table<T, R>(&self, cursor: &mut Cursor<R>) -> Result<T, io::Error>
    where
        R: AsRef<[u8]>,
        T: FontTable,
    {
        self.unpack_table::<T, R>(cursor)?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::Other, format!("{} table missing", T::name()))
        })
    }
}

impl FontData for OffsetTable {
    fn unpack<R: io::Read>(mut rd: &mut R) -> Result<Self, io::Error> {
        let sfnt_version = SfntVersion::unpack(&mut rd)?;
        let num_tables = rd.read_u16::<BigEndian>()?;
        let search_range = rd.read_u16::<BigEndian>()?;
        let entry_selector = rd.read_u16::<BigEndian>()?;
        let range_shift = rd.read_u16::<BigEndian>()?;

        let mut tables = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            tables.push(TableRecord::unpack(&mut rd)?);
        }

        Ok(OffsetTable {
            sfnt_version,
            num_tables,
            search_range,
            entry_selector,
            range_shift,
            tables,
        })
    }

    fn pack<W: io::Write>(&self, mut wr: &mut W) -> Result<(), io::Error> {
        self.sfnt_version.pack(&mut wr)?;
        wr.write_u16::<BigEndian>(self.num_tables)?;
        wr.write_u16::<BigEndian>(self.search_range)?;
        wr.write_u16::<BigEndian>(self.entry_selector)?;
        wr.write_u16::<BigEndian>(self.range_shift)?;
        for table in &self.tables {
            table.pack(&mut wr)?;
        }
        Ok(())
    }
}

/// Returns `(search_range, entry_selector, range_shift)` for the given number of tables.
fn binary_search_params(num_tables: u16) -> (u16, u16, u16) {
    if num_tables == 0 {
        return (0, 0, 0);
    }
    let mut entry_selector = 0u16;
    while 2u32.pow(u32::from(entry_selector) + 1) <= u32::from(num_tables) {
        entry_selector += 1;
    }
    let search_range = 2u16.pow(u32::from(entry_selector)) * 16;
    let range_shift = num_tables * 16 - search_range;
    (search_range, entry_selector, range_shift)
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SfntVersion {
    TrueType,
    CFF,
    /// Legacy Apple TrueType tag (`true`).
    AppleTrueType,
}

impl SfntVersion {
    pub(crate) fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0x00010000 => Some(SfntVersion::TrueType),
            0x4F54544F => Some(SfntVersion::CFF),
            0x74727565 => Some(SfntVersion::AppleTrueType),
            _ => None,
        }
    }

    fn tag(self) -> u32 {
        match self {
            SfntVersion::TrueType => 0x00010000,
            SfntVersion::CFF => 0x4F54544F,
            SfntVersion::AppleTrueType => 0x74727565,
        }
    }
}

impl FontData for SfntVersion {
    fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, io::Error> {
        let v = rd.read_u32::<BigEndian>()?;
        SfntVersion::from_tag(v).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("Unknown sfnt_version {:#010x}", v),
            )
        })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_u32::<BigEndian>(self.tag())?;
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
pub struct TableRecord {
    pub(crate) tag: String,
    pub(crate) check_sum: u32,
    pub(crate) offset: u32,
    pub(crate) length: u32,
}

impl FontData for TableRecord {
    fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, io::Error> {
        let mut tag = [0; 4];
        rd.read_exact(&mut tag)?;
        Ok(TableRecord {
            tag: String::from_utf8_lossy(&tag).to_string(),
            check_sum: rd.read_u32::<BigEndian>()?,
            offset: rd.read_u32::<BigEndian>()?,
            length: rd.read_u32::<BigEndian>()?,
        })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        let mut tag = [b' '; 4];
        for (dst, src) in tag.iter_mut().zip(self.tag.bytes()) {
            *dst = src;
        }
        wr.write_all(&tag)?;
        wr.write_u32::<BigEndian>(self.check_sum)?;
        wr.write_u32::<BigEndian>(self.offset)?;
        wr.write_u32::<BigEndian>(self.length)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tables::name::{NameEntry, NameTable};
    use crate::OpenTypeFont;
    use pretty_assertions::assert_eq;

    fn font_data() -> Vec<u8> {
        let name_table =
            NameTable::from_entries(&[NameEntry::windows(1033, 4, "Test Sans")]).unwrap();
        let mut data = Vec::new();
        OpenTypeFont::new(SfntVersion::TrueType, name_table)
            .to_writer(&mut data)
            .unwrap();
        data
    }

    #[test]
    fn test_offset_table_encode_decode() {
        let data = font_data();
        let table = OffsetTable::unpack(&mut Cursor::new(&data[..])).unwrap();
        assert_eq!(table.sfnt_version, SfntVersion::TrueType);
        assert_eq!(table.num_tables, 1);
        assert_eq!(table.search_range, 16);
        assert_eq!(table.entry_selector, 0);
        assert_eq!(table.range_shift, 0);

        let record = table.get_table_record("name").expect("name table missing");
        assert_eq!(record.offset, 12 + 16);
        assert!(table.get_table_record("glyf").is_none());

        // re-pack and compare
        let mut buffer = Vec::new();
        table.pack(&mut buffer).unwrap();
        assert_eq!(
            OffsetTable::unpack(&mut Cursor::new(&buffer[..])).unwrap(),
            table
        );
    }

    #[test]
    fn test_binary_search_params() {
        assert_eq!(binary_search_params(1), (16, 0, 0));
        assert_eq!(binary_search_params(10), (128, 3, 32));
        assert_eq!(binary_search_params(17), (256, 4, 16));
    }

    #[test]
    fn test_unknown_sfnt_version() {
        let data = b"wOFF\0\0\0\0\0\0\0\0".to_vec();
        let err = OffsetTable::unpack(&mut Cursor::new(&data[..])).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_table_out_of_bounds() {
        let mut data = font_data();
        data.truncate(40);
        let mut cursor = Cursor::new(&data[..]);
        let table = OffsetTable::unpack(&mut cursor).unwrap();
        let err = table
            .unpack_required_table::<NameTable, _>(&mut cursor)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
