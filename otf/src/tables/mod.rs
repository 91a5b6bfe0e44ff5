pub mod collection;
pub mod name;
pub mod offset;

use std::io;

pub trait FontData: Sized {
    fn unpack<R: io::Read>(rd: &mut R) -> Result<Self, io::Error>;
    fn pack<W: io::Write>(&self, wr: &mut W) -> Result<(), io::Error>;
}

/// A top-level table referenced from the offset table by its tag.
pub trait FontTable: FontData {
    fn name() -> &'static str;
}
