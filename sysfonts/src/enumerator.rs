use std::collections::HashMap;
use std::convert::TryFrom;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, trace};
use otf::{FontCollection, OpenTypeFont};

use crate::error::Error;
use crate::font_dir::system_font_dir;
use crate::names::display_names;
use crate::path::{FontKind, FontPath};
use crate::source::FontSource;

/// Builds the mapping of font display names to font files from the entries of a [`FontSource`].
///
/// Enumeration is best effort: entries whose file is missing, unreadable or not a parsable font
/// are logged and skipped.
pub struct FontEnumerator<S: FontSource> {
    source: S,
    font_dir: PathBuf,
    include_family_name: bool,
}

pub struct FontEnumeratorBuilder<S: FontSource> {
    source: S,
    font_dir: Option<PathBuf>,
    include_family_name: bool,
}

impl<S> FontEnumerator<S>
where
    S: FontSource,
{
    pub fn builder(source: S) -> FontEnumeratorBuilder<S> {
        FontEnumeratorBuilder::new(source)
    }

    /// Enumerates all fonts of the source. When multiple fonts resolve to the same display name,
    /// the one listed last by the source wins.
    pub fn enumerate(&self) -> HashMap<String, FontPath> {
        let mut fonts = HashMap::with_capacity(50);
        for entry in self.source.entries() {
            let path = self.resolve(&entry.file);
            if FontKind::from_path(&path).is_none() {
                trace!("Ignoring {:?}, not a supported font file", entry.name);
                continue;
            }

            match read_font_names(&path, self.include_family_name) {
                Ok(names) => {
                    for (name, font_path) in names {
                        trace!("{} -> {}", name, font_path);
                        fonts.insert(name, font_path);
                    }
                }
                Err(err) => debug!("Skipping {:?}: {}", entry.name, err),
            }
        }

        info!("Found {} fonts", fonts.len());
        fonts
    }

    /// Bare file names are relative to the font directory, anything containing a path separator
    /// is used as is.
    fn resolve(&self, file: &str) -> PathBuf {
        if file.contains('\\') || file.contains('/') {
            PathBuf::from(file)
        } else {
            self.font_dir.join(file)
        }
    }
}

impl<S> FontEnumeratorBuilder<S>
where
    S: FontSource,
{
    pub fn new(source: S) -> Self {
        FontEnumeratorBuilder {
            source,
            font_dir: None,
            include_family_name: false,
        }
    }

    /// Overrides the directory bare file names are resolved against (the system font directory
    /// by default).
    pub fn with_font_dir<P: Into<PathBuf>>(mut self, font_dir: P) -> Self {
        self.font_dir = Some(font_dir.into());
        self
    }

    /// Whether to also list fonts by their family name in addition to their full name.
    pub fn include_family_name(mut self, include: bool) -> Self {
        self.include_family_name = include;
        self
    }

    pub fn build(self) -> FontEnumerator<S> {
        FontEnumerator {
            source: self.source,
            font_dir: self.font_dir.unwrap_or_else(system_font_dir),
            include_family_name: self.include_family_name,
        }
    }
}

/// Reads the display names of the font file at `path`. Each face of a collection is returned
/// with its own `path,index` location. Faces of a collection that fail to parse are skipped.
pub fn read_font_names(
    path: &Path,
    include_family_name: bool,
) -> Result<Vec<(String, FontPath)>, Error> {
    let kind = FontKind::from_path(path)
        .ok_or_else(|| Error::UnsupportedFile(path.to_path_buf()))?;

    let data = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let font_err = |source| Error::Font {
        path: path.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    // some .ttf files are collections, so decide by content instead of extension
    let is_collection = otf::is_collection(&data);
    if is_collection != (kind == FontKind::Collection) {
        debug!(
            "{} has a {:?} extension but is {}",
            path.display(),
            kind,
            if is_collection { "a font collection" } else { "a single font" }
        );
    }
    if is_collection {
        let collection = FontCollection::from_slice(&data).map_err(font_err)?;
        for index in 0..collection.len() {
            let font = match collection.font(index) {
                Ok(font) => font,
                Err(err) => {
                    debug!("Skipping face {} of {}: {}", index, path.display(), err);
                    continue;
                }
            };
            let face = match u32::try_from(index) {
                Ok(face) => FontPath::collection_face(path, face),
                Err(_) => break,
            };
            for name in display_names(&font, include_family_name) {
                names.push((name, face.clone()));
            }
        }
    } else {
        let font = OpenTypeFont::from_slice(&data).map_err(font_err)?;
        for name in display_names(&font, include_family_name) {
            names.push((name, FontPath::new(path)));
        }
    }

    Ok(names)
}
