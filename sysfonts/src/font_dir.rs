use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

const DEFAULT_FONT_DIR: &str = r"C:\Windows\Fonts";

/// The directory bare font file names in the registry are relative to: `%SystemRoot%\Fonts`,
/// falling back to `%windir%\Fonts` and finally `C:\Windows\Fonts`.
pub fn system_font_dir() -> PathBuf {
    font_dir_from(env::var_os("SystemRoot"), env::var_os("windir"))
}

fn font_dir_from(system_root: Option<OsString>, windir: Option<OsString>) -> PathBuf {
    system_root
        .filter(|root| !root.is_empty())
        .or_else(|| windir.filter(|root| !root.is_empty()))
        .map(|root| PathBuf::from(root).join("Fonts"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FONT_DIR))
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prefers_system_root() {
        assert_eq!(
            font_dir_from(Some("D:/Win".into()), Some("E:/Win".into())),
            Path::new("D:/Win").join("Fonts")
        );
    }

    #[test]
    fn test_falls_back_to_windir() {
        assert_eq!(
            font_dir_from(Some("".into()), Some("E:/Win".into())),
            Path::new("E:/Win").join("Fonts")
        );
        assert_eq!(
            font_dir_from(None, Some("E:/Win".into())),
            Path::new("E:/Win").join("Fonts")
        );
    }

    #[test]
    fn test_default() {
        assert_eq!(font_dir_from(None, None), PathBuf::from(DEFAULT_FONT_DIR));
    }
}
