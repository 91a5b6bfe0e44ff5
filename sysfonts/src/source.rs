use std::fs;
use std::path::PathBuf;

use log::debug;

/// A registered font: the name it was registered under and the file it points to. The file may
/// be a bare file name relative to the system font directory.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FontEntry {
    pub name: String,
    pub file: String,
}

impl FontEntry {
    pub fn new<N: Into<String>, F: Into<String>>(name: N, file: F) -> Self {
        FontEntry {
            name: name.into(),
            file: file.into(),
        }
    }
}

/// Provides the registered fonts to enumerate. Entries later in the list take precedence over
/// earlier ones when they resolve to the same display name.
pub trait FontSource {
    fn entries(&self) -> Vec<FontEntry>;
}

impl FontSource for Vec<FontEntry> {
    fn entries(&self) -> Vec<FontEntry> {
        self.clone()
    }
}

impl<S: FontSource + ?Sized> FontSource for &S {
    fn entries(&self) -> Vec<FontEntry> {
        (**self).entries()
    }
}

/// Lists every file of a directory (not recursively), ordered by file name.
#[derive(Debug, Clone)]
pub struct DirectoryFontSource {
    dir: PathBuf,
}

impl DirectoryFontSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        DirectoryFontSource { dir: dir.into() }
    }
}

impl FontSource for DirectoryFontSource {
    fn entries(&self) -> Vec<FontEntry> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(err) => {
                debug!("Cannot list font directory {}: {}", self.dir.display(), err);
                return Vec::new();
            }
        };

        let mut entries = read_dir
            .filter_map(|entry| entry.ok())
            // `is_file` follows symlinks
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let file = entry.path().into_os_string().into_string().ok()?;
                Some(FontEntry { name, file })
            })
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

#[cfg(windows)]
pub use registry::RegistryFontSource;

#[cfg(windows)]
mod registry {
    use log::debug;
    use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ};
    use winreg::types::FromRegValue;
    use winreg::RegKey;

    use super::{FontEntry, FontSource};

    const FONTS_KEY: &str = r"SOFTWARE\Microsoft\Windows NT\CurrentVersion\Fonts";

    /// The fonts registered in the machine-wide font list, followed by the ones registered for
    /// the current user.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct RegistryFontSource;

    impl RegistryFontSource {
        pub fn new() -> Self {
            RegistryFontSource
        }
    }

    impl FontSource for RegistryFontSource {
        fn entries(&self) -> Vec<FontEntry> {
            let mut entries = Vec::with_capacity(256);
            let hives = [
                ("HKEY_LOCAL_MACHINE", HKEY_LOCAL_MACHINE),
                ("HKEY_CURRENT_USER", HKEY_CURRENT_USER),
            ];
            for (hive_name, hive) in hives.iter() {
                let root = RegKey::predef(*hive);
                let key = match root.open_subkey_with_flags(FONTS_KEY, KEY_READ) {
                    Ok(key) => key,
                    Err(err) => {
                        debug!("Cannot open {}\\{}: {}", hive_name, FONTS_KEY, err);
                        continue;
                    }
                };

                for value in key.enum_values() {
                    let (name, value) = match value {
                        Ok(value) => value,
                        Err(err) => {
                            debug!("Cannot read value in {}\\{}: {}", hive_name, FONTS_KEY, err);
                            continue;
                        }
                    };
                    match String::from_reg_value(&value) {
                        Ok(file) if !file.is_empty() => entries.push(FontEntry { name, file }),
                        // not a string value or empty
                        _ => continue,
                    }
                }
            }
            entries
        }
    }

}

#[cfg(test)]
mod test {
    use std::fs::File;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vec_source() {
        let entries = vec![
            FontEntry::new("Arial (TrueType)", "arial.ttf"),
            FontEntry::new("SimSun & NSimSun (TrueType)", "simsun.ttc"),
        ];
        assert_eq!((&entries).entries(), entries);
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("b.ttf")).unwrap();
        File::create(dir.path().join("a.otf")).unwrap();
        fs::create_dir(dir.path().join("c.ttc")).unwrap();

        let entries = DirectoryFontSource::new(dir.path()).entries();
        assert_eq!(
            entries,
            vec![
                FontEntry::new("a.otf", dir.path().join("a.otf").to_str().unwrap()),
                FontEntry::new("b.ttf", dir.path().join("b.ttf").to_str().unwrap()),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_source_follows_symlinks() {
        use std::os::unix::fs::symlink;

        let store = tempfile::tempdir().unwrap();
        File::create(store.path().join("DejaVuSans.ttf")).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("DejaVuSans.ttf");
        symlink(store.path().join("DejaVuSans.ttf"), &link).unwrap();
        symlink(store.path().join("missing.ttf"), dir.path().join("dangling.ttf")).unwrap();

        let entries = DirectoryFontSource::new(dir.path()).entries();
        assert_eq!(
            entries,
            vec![FontEntry::new("DejaVuSans.ttf", link.to_str().unwrap())]
        );
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectoryFontSource::new(dir.path().join("missing"));
        assert!(source.entries().is_empty());
    }
}
