use std::convert::TryFrom;
use std::io;

use super::{FontData, FontTable};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

/// Name IDs used when looking up font names.
/// See https://docs.microsoft.com/en-us/typography/opentype/spec/name#name-ids
pub mod name_id {
    pub const FAMILY_NAME: u16 = 1;
    pub const FULL_NAME: u16 = 4;
    pub const POST_SCRIPT_NAME: u16 = 6;
}

pub mod platform_id {
    pub const UNICODE: u16 = 0;
    pub const MACINTOSH: u16 = 1;
    pub const WINDOWS: u16 = 3;
}

/// This table includes human-readable names for features and settings, copyright notices,
/// font names, style names, and other information related to the font.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/name
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6name.html
#[derive(Debug, PartialEq, Clone)]
pub enum NameTable {
    Format0(Format0NameTable),
    Format1(Format1NameTable),
}

impl NameTable {
    /// Builds a format 0 table from decoded entries. Strings of the Macintosh platform are stored
    /// as Mac Roman (unmappable characters become `?`), all others as UTF-16BE.
    pub fn from_entries(entries: &[NameEntry]) -> Result<Self, io::Error> {
        let mut sorted = entries.to_vec();
        sorted.sort_by_key(|e| (e.platform_id, e.encoding_id, e.language_id, e.name_id));

        let mut name_records = Vec::with_capacity(sorted.len());
        let mut string_data = Vec::new();
        for entry in &sorted {
            let encoded = encode_name(entry.platform_id, &entry.name);
            let offset = u16::try_from(string_data.len()).map_err(|_| storage_overflow())?;
            let length = u16::try_from(encoded.len()).map_err(|_| storage_overflow())?;
            string_data.extend_from_slice(&encoded);
            name_records.push(NameRecord {
                platform_id: entry.platform_id,
                encoding_id: entry.encoding_id,
                language_id: entry.language_id,
                name_id: entry.name_id,
                length,
                offset,
            });
        }

        Ok(NameTable::Format0(Format0NameTable {
            name_records,
            string_data,
        }))
    }

    fn parts(&self) -> (&[NameRecord], &[u8]) {
        match self {
            NameTable::Format0(t) => (&t.name_records, &t.string_data),
            NameTable::Format1(t) => (&t.name_records, &t.string_data),
        }
    }

    /// All decodable entries, in table order.
    pub fn entries(&self) -> Vec<NameEntry> {
        let (records, storage) = self.parts();
        records
            .iter()
            .filter_map(|r| r.decode(storage))
            .collect()
    }

    /// All decodable entries for the given name id, in table order.
    pub fn entries_for(&self, name_id: u16) -> Vec<NameEntry> {
        let (records, storage) = self.parts();
        records
            .iter()
            .filter(|r| r.name_id == name_id)
            .filter_map(|r| r.decode(storage))
            .collect()
    }
}

impl FontTable for NameTable {
    fn name() -> &'static str {
        "name"
    }
}

impl FontData for NameTable {
    fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, io::Error> {
        let format = rd.read_u16::<BigEndian>()?;
        match format {
            0 => Ok(NameTable::Format0(Format0NameTable::unpack(rd)?)),
            1 => Ok(NameTable::Format1(Format1NameTable::unpack(rd)?)),
            _ => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("Invalid NAME table format {}", format),
            )),
        }
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        match self {
            NameTable::Format0(table) => {
                // format
                wr.write_u16::<BigEndian>(0)?;
                table.pack(wr)?;
            }
            NameTable::Format1(table) => {
                // format
                wr.write_u16::<BigEndian>(1)?;
                table.pack(wr)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Format0NameTable {
    /// The name records.
    name_records: Vec<NameRecord>,
    /// Storage area for the actual string data, starting at the table's string offset.
    string_data: Vec<u8>,
}

impl FontData for Format0NameTable {
    fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, io::Error> {
        let count = rd.read_u16::<BigEndian>()?;
        let offset = rd.read_u16::<BigEndian>()?;
        let mut name_records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            name_records.push(NameRecord::unpack(rd)?);
        }
        let header_len = 6 + 12 * usize::from(count);
        let string_data = read_storage(rd, header_len, offset)?;
        Ok(Format0NameTable {
            name_records,
            string_data,
        })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        let count = u16::try_from(self.name_records.len()).map_err(|_| storage_overflow())?;
        let offset = u16::try_from(6 + 12 * self.name_records.len())
            .map_err(|_| storage_overflow())?;
        wr.write_u16::<BigEndian>(count)?;
        wr.write_u16::<BigEndian>(offset)?;
        for record in &self.name_records {
            record.pack(wr)?;
        }
        wr.write_all(&self.string_data)?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Format1NameTable {
    /// The name records.
    name_records: Vec<NameRecord>,
    /// The language-tag records.
    lang_tag_records: Vec<LangTagRecord>,
    /// Storage area for the actual string data, starting at the table's string offset.
    string_data: Vec<u8>,
}

impl FontData for Format1NameTable {
    fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, io::Error> {
        let count = rd.read_u16::<BigEndian>()?;
        let offset = rd.read_u16::<BigEndian>()?;
        let mut name_records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            name_records.push(NameRecord::unpack(rd)?);
        }

        let lang_tag_count = rd.read_u16::<BigEndian>()?;
        let mut lang_tag_records = Vec::with_capacity(lang_tag_count as usize);
        for _ in 0..lang_tag_count {
            lang_tag_records.push(LangTagRecord::unpack(rd)?);
        }
        let header_len = 6 + 12 * usize::from(count) + 2 + 4 * usize::from(lang_tag_count);
        let string_data = read_storage(rd, header_len, offset)?;
        Ok(Format1NameTable {
            name_records,
            lang_tag_records,
            string_data,
        })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        let count = u16::try_from(self.name_records.len()).map_err(|_| storage_overflow())?;
        let lang_tag_count =
            u16::try_from(self.lang_tag_records.len()).map_err(|_| storage_overflow())?;
        let offset = u16::try_from(
            6 + 12 * self.name_records.len() + 2 + 4 * self.lang_tag_records.len(),
        )
        .map_err(|_| storage_overflow())?;
        wr.write_u16::<BigEndian>(count)?;
        wr.write_u16::<BigEndian>(offset)?;
        for record in &self.name_records {
            record.pack(wr)?;
        }
        wr.write_u16::<BigEndian>(lang_tag_count)?;
        for record in &self.lang_tag_records {
            record.pack(wr)?;
        }
        wr.write_all(&self.string_data)?;
        Ok(())
    }
}

/// Reads the remainder of the table and returns the storage area that starts `offset` bytes
/// after the start of the table, `header_len` bytes of which have already been consumed.
fn read_storage<R: io::Read>(rd: &mut R, header_len: usize, offset: u16) -> io::Result<Vec<u8>> {
    let mut rest = Vec::new();
    rd.read_to_end(&mut rest)?;
    let skip = usize::from(offset).checked_sub(header_len).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "NAME string storage offset {} overlaps its records (header is {} bytes)",
                offset, header_len
            ),
        )
    })?;
    if skip > rest.len() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "NAME string storage starts beyond the end of the table",
        ));
    }
    rest.drain(..skip);
    Ok(rest)
}

fn storage_overflow() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        "NAME table exceeds 16-bit offsets",
    )
}

#[derive(Debug, PartialEq, Clone)]
pub struct NameRecord {
    /// Platform ID,
    platform_id: u16,
    /// Platform-specific encoding ID.
    encoding_id: u16,
    /// Language ID.
    language_id: u16,
    /// Name ID.
    name_id: u16,
    /// String length (in bytes).
    length: u16,
    /// String offset from start of storage area (in bytes).
    offset: u16,
}

impl NameRecord {
    fn decode(&self, storage: &[u8]) -> Option<NameEntry> {
        let start = usize::from(self.offset);
        let end = start + usize::from(self.length);
        let bytes = storage.get(start..end)?;
        let name = decode_name(self.platform_id, self.encoding_id, bytes)?;
        Some(NameEntry {
            platform_id: self.platform_id,
            encoding_id: self.encoding_id,
            language_id: self.language_id,
            name_id: self.name_id,
            name,
        })
    }
}

impl FontData for NameRecord {
    fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, io::Error> {
        Ok(NameRecord {
            platform_id: rd.read_u16::<BigEndian>()?,
            encoding_id: rd.read_u16::<BigEndian>()?,
            language_id: rd.read_u16::<BigEndian>()?,
            name_id: rd.read_u16::<BigEndian>()?,
            length: rd.read_u16::<BigEndian>()?,
            offset: rd.read_u16::<BigEndian>()?,
        })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_u16::<BigEndian>(self.platform_id)?;
        wr.write_u16::<BigEndian>(self.encoding_id)?;
        wr.write_u16::<BigEndian>(self.language_id)?;
        wr.write_u16::<BigEndian>(self.name_id)?;
        wr.write_u16::<BigEndian>(self.length)?;
        wr.write_u16::<BigEndian>(self.offset)?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct LangTagRecord {
    /// Language-tag string length (in bytes)
    length: u16,
    /// Language-tag string offset from start of storage area (in bytes).
    offset: u16,
}

impl FontData for LangTagRecord {
    fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, io::Error> {
        Ok(LangTagRecord {
            length: rd.read_u16::<BigEndian>()?,
            offset: rd.read_u16::<BigEndian>()?,
        })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_u16::<BigEndian>(self.length)?;
        wr.write_u16::<BigEndian>(self.offset)?;
        Ok(())
    }
}

/// A decoded name record.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NameEntry {
    pub platform_id: u16,
    pub encoding_id: u16,
    /// Windows LCID (e.g. 1033 for en-US, 2052 for zh-CN) or Macintosh language code.
    pub language_id: u16,
    pub name_id: u16,
    pub name: String,
}

impl NameEntry {
    /// An entry for the Windows platform with Unicode BMP encoding.
    pub fn windows<S: Into<String>>(language_id: u16, name_id: u16, name: S) -> Self {
        NameEntry {
            platform_id: platform_id::WINDOWS,
            encoding_id: 1,
            language_id,
            name_id,
            name: name.into(),
        }
    }

    /// An entry for the Macintosh platform with Roman encoding.
    pub fn macintosh<S: Into<String>>(language_id: u16, name_id: u16, name: S) -> Self {
        NameEntry {
            platform_id: platform_id::MACINTOSH,
            encoding_id: 0,
            language_id,
            name_id,
            name: name.into(),
        }
    }
}

fn decode_name(platform_id: u16, encoding_id: u16, bytes: &[u8]) -> Option<String> {
    match platform_id {
        platform_id::UNICODE | platform_id::WINDOWS => {
            if bytes.len() % 2 != 0 {
                return None;
            }
            let units = bytes
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect::<Vec<_>>();
            String::from_utf16(&units).ok()
        }
        platform_id::MACINTOSH if encoding_id == 0 => Some(
            bytes
                .iter()
                .map(|&b| {
                    if b < 0x80 {
                        char::from(b)
                    } else {
                        MAC_ROMAN_HIGH[usize::from(b - 0x80)]
                    }
                })
                .collect(),
        ),
        // other Macintosh scripts are decoded lossily as Latin-1
        platform_id::MACINTOSH => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        _ => None,
    }
}

fn encode_name(platform_id: u16, name: &str) -> Vec<u8> {
    if platform_id == platform_id::MACINTOSH {
        name.chars()
            .map(|ch| {
                if ch.is_ascii() {
                    ch as u8
                } else {
                    MAC_ROMAN_HIGH
                        .iter()
                        .position(|&c| c == ch)
                        .map(|i| 0x80 + i as u8)
                        .unwrap_or(b'?')
                }
            })
            .collect()
    } else {
        name.encode_utf16().flat_map(u16::to_be_bytes).collect()
    }
}

/// Mac OS Roman code points 0x80..=0xFF.
const MAC_ROMAN_HIGH: [char; 128] = [
    'Ä', 'Å', 'Ç', 'É', 'Ñ', 'Ö', 'Ü', 'á', 'à', 'â', 'ä', 'ã', 'å', 'ç', 'é', 'è', //
    'ê', 'ë', 'í', 'ì', 'î', 'ï', 'ñ', 'ó', 'ò', 'ô', 'ö', 'õ', 'ú', 'ù', 'û', 'ü', //
    '†', '°', '¢', '£', '§', '•', '¶', 'ß', '®', '©', '™', '´', '¨', '≠', 'Æ', 'Ø', //
    '∞', '±', '≤', '≥', '¥', 'µ', '∂', '∑', '∏', 'π', '∫', 'ª', 'º', 'Ω', 'æ', 'ø', //
    '¿', '¡', '¬', '√', 'ƒ', '≈', '∆', '«', '»', '…', '\u{a0}', 'À', 'Ã', 'Õ', 'Œ', 'œ', //
    '–', '—', '“', '”', '‘', '’', '÷', '◊', 'ÿ', 'Ÿ', '⁄', '€', '‹', '›', 'ﬁ', 'ﬂ', //
    '‡', '·', '‚', '„', '‰', 'Â', 'Ê', 'Á', 'Ë', 'È', 'Í', 'Î', 'Ï', 'Ì', 'Ó', 'Ô', //
    '\u{f8ff}', 'Ò', 'Ú', 'Û', 'Ù', 'ı', 'ˆ', '˜', '¯', '˘', '˙', '˚', '¸', '˝', '˛', 'ˇ', //
];
