use std::convert::TryFrom;
use std::io;

use super::FontData;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

pub(crate) const TTC_TAG: u32 = 0x74746366; // 'ttcf'

/// Header of a font collection file. It lists where the offset table of each contained font
/// starts.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/otff#font-collections
#[derive(Debug, PartialEq)]
pub struct CollectionHeader {
    pub(crate) major_version: u16,
    pub(crate) minor_version: u16,
    /// Offsets (from the beginning of the file) to the offset table of each font.
    pub(crate) offsets: Vec<u32>,
    /// Only present in version 2.0 headers: tag, length and offset of the DSIG table.
    pub(crate) dsig: Option<(u32, u32, u32)>,
}

impl CollectionHeader {
    pub(crate) fn new(offsets: Vec<u32>) -> Self {
        CollectionHeader {
            major_version: 1,
            minor_version: 0,
            offsets,
            dsig: None,
        }
    }

    /// Size of a version 1.0 header for `num_fonts` fonts.
    pub(crate) fn len_for(num_fonts: usize) -> usize {
        12 + 4 * num_fonts
    }
}

impl FontData for CollectionHeader {
    fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, io::Error> {
        let tag = rd.read_u32::<BigEndian>()?;
        if tag != TTC_TAG {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Expected ttcf tag, got {:#010x}", tag),
            ));
        }
        let major_version = rd.read_u16::<BigEndian>()?;
        let minor_version = rd.read_u16::<BigEndian>()?;
        let num_fonts = rd.read_u32::<BigEndian>()?;
        // num_fonts is untrusted until the offsets were actually read
        let mut offsets = Vec::with_capacity(num_fonts.min(1024) as usize);
        for _ in 0..num_fonts {
            offsets.push(rd.read_u32::<BigEndian>()?);
        }
        let dsig = if major_version >= 2 {
            Some((
                rd.read_u32::<BigEndian>()?,
                rd.read_u32::<BigEndian>()?,
                rd.read_u32::<BigEndian>()?,
            ))
        } else {
            None
        };

        Ok(CollectionHeader {
            major_version,
            minor_version,
            offsets,
            dsig,
        })
    }

    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        wr.write_u32::<BigEndian>(TTC_TAG)?;
        wr.write_u16::<BigEndian>(self.major_version)?;
        wr.write_u16::<BigEndian>(self.minor_version)?;
        let num_fonts = u32::try_from(self.offsets.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Too many fonts"))?;
        wr.write_u32::<BigEndian>(num_fonts)?;
        for offset in &self.offsets {
            wr.write_u32::<BigEndian>(*offset)?;
        }
        if let Some((tag, length, offset)) = self.dsig {
            wr.write_u32::<BigEndian>(tag)?;
            wr.write_u32::<BigEndian>(length)?;
            wr.write_u32::<BigEndian>(offset)?;
        }
        Ok(())
    }
}
