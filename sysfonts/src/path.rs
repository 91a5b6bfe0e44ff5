use std::convert::Infallible;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// The font file formats names are extracted from.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FontKind {
    TrueType,
    OpenType,
    Collection,
}

impl FontKind {
    /// Determines the kind by the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ttf" => Some(FontKind::TrueType),
            "otf" => Some(FontKind::OpenType),
            "ttc" => Some(FontKind::Collection),
            _ => None,
        }
    }
}

/// Location of a font: a file, plus the zero-based face index for fonts inside a collection.
///
/// Displayed (and serialized) as `path` or `path,index`, the form PDF libraries accept for
/// collection faces.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct FontPath {
    path: PathBuf,
    index: Option<u32>,
}

impl FontPath {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FontPath {
            path: path.into(),
            index: None,
        }
    }

    pub fn collection_face<P: Into<PathBuf>>(path: P, index: u32) -> Self {
        FontPath {
            path: path.into(),
            index: Some(index),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn index(&self) -> Option<u32> {
        self.index
    }
}

impl fmt::Display for FontPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if let Some(index) = self.index {
            write!(f, ",{}", index)?;
        }
        Ok(())
    }
}

impl FromStr for FontPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(pos) = s.rfind(',') {
            let (path, index) = (&s[..pos], &s[pos + 1..]);
            if let (false, Ok(index)) = (path.is_empty(), index.parse::<u32>()) {
                return Ok(FontPath::collection_face(path, index));
            }
        }
        Ok(FontPath::new(s))
    }
}

impl Serialize for FontPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
