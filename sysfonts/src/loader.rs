//! Temporarily makes font files available to GDI without installing them. Fonts are added as
//! private resources (`FR_PRIVATE`), so they are only visible to the current process and are
//! gone once it exits.

use std::ffi::OsStr;
use std::iter;
use std::os::windows::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use windows::core::PCWSTR;
use windows::Win32::Graphics::Gdi::{AddFontResourceExW, RemoveFontResourceExW, FR_PRIVATE};

use crate::error::Error;

fn to_wide(s: &OsStr) -> Vec<u16> {
    s.encode_wide().chain(iter::once(0)).collect()
}

/// Adds the fonts of the file at `path` as private font resources. Returns the number of fonts
/// added, `0` on failure.
pub fn load_font<P: AsRef<Path>>(path: P) -> i32 {
    let name = to_wide(path.as_ref().as_os_str());
    // SAFETY: `name` is a NUL-terminated UTF-16 string that outlives the call
    unsafe { AddFontResourceExW(PCWSTR(name.as_ptr()), FR_PRIVATE, None) }
}

/// Removes private font resources previously added with [`load_font`]. Returns non-zero on
/// success.
pub fn remove_font<P: AsRef<Path>>(path: P) -> i32 {
    let name = to_wide(path.as_ref().as_os_str());
    // SAFETY: see `load_font`
    unsafe { RemoveFontResourceExW(PCWSTR(name.as_ptr()), FR_PRIVATE.0, None).0 }
}

/// A font file registered with GDI for as long as the value lives.
#[derive(Debug)]
pub struct PrivateFont {
    path: PathBuf,
    count: i32,
}

impl PrivateFont {
    pub fn load<P: Into<PathBuf>>(path: P) -> Result<Self, Error> {
        let path = path.into();
        let count = load_font(&path);
        if count == 0 {
            return Err(Error::FontNotLoaded(path));
        }
        debug!("Loaded {} font(s) from {}", count, path.display());
        Ok(PrivateFont { path, count })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of fonts GDI added from the file.
    pub fn count(&self) -> i32 {
        self.count
    }
}

impl Drop for PrivateFont {
    fn drop(&mut self) {
        if remove_font(&self.path) == 0 {
            warn!("Failed to remove font resource {}", self.path.display());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_wide() {
        assert_eq!(to_wide(OsStr::new("a.ttf")), vec![97, 46, 116, 116, 102, 0]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.ttf");
        assert_eq!(load_font(&path), 0);
        assert_eq!(remove_font(&path), 0);
        match PrivateFont::load(&path) {
            Err(Error::FontNotLoaded(p)) => assert_eq!(p, path),
            other => panic!("Expected FontNotLoaded, got {:?}", other),
        }
    }
}
