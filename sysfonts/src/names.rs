//! Picks the name a font is listed under from the localized names of its `name` table.

use otf::{NameEntry, OpenTypeFont};

/// Windows language id of Simplified Chinese (zh-CN).
pub const LANG_ZH_CN: u16 = 2052;
/// Windows language id of US English (en-US).
pub const LANG_EN_US: u16 = 1033;
/// Macintosh language code of English.
pub const LANG_MAC_ENGLISH: u16 = 0;

const PREFERRED_LANGUAGES: [u16; 3] = [LANG_ZH_CN, LANG_EN_US, LANG_MAC_ENGLISH];

/// Selects the display name: the first Simplified Chinese name, else the first US English
/// name, else the first Macintosh English name, else the first name. Empty names are ignored.
pub fn select_display_name(entries: &[NameEntry]) -> Option<&str> {
    let candidates = || entries.iter().filter(|e| !e.name.is_empty());
    PREFERRED_LANGUAGES
        .iter()
        .find_map(|&lang| candidates().find(|e| e.language_id == lang))
        .or_else(|| candidates().next())
        .map(|e| e.name.as_str())
}

/// The names `font` is listed under: its family name if requested, followed by its full name.
pub fn display_names(font: &OpenTypeFont, include_family_name: bool) -> Vec<String> {
    let mut names = Vec::with_capacity(2);
    if include_family_name {
        if let Some(name) = select_display_name(&font.family_names()) {
            names.push(name.to_string());
        }
    }
    if let Some(name) = select_display_name(&font.full_names()) {
        names.push(name.to_string());
    }
    names
}

#[cfg(test)]
mod test {
    use super::*;
    use otf::{name_id, NameTable, SfntVersion};
    use pretty_assertions::assert_eq;

    fn full_name(language_id: u16, name: &str) -> NameEntry {
        NameEntry::windows(language_id, name_id::FULL_NAME, name)
    }

    #[test]
    fn test_prefers_simplified_chinese() {
        let entries = vec![
            NameEntry::macintosh(0, name_id::FULL_NAME, "SimHei"),
            full_name(1033, "SimHei"),
            full_name(1028, "黑體"),
            full_name(2052, "黑体"),
        ];
        assert_eq!(select_display_name(&entries), Some("黑体"));
    }

    #[test]
    fn test_falls_back_to_us_english() {
        let entries = vec![
            NameEntry::macintosh(0, name_id::FULL_NAME, "Arial Mac"),
            full_name(1031, "Arial Deutsch"),
            full_name(1033, "Arial"),
        ];
        assert_eq!(select_display_name(&entries), Some("Arial"));
    }

    #[test]
    fn test_falls_back_to_mac_english() {
        let entries = vec![
            full_name(1036, "Police"),
            NameEntry::macintosh(0, name_id::FULL_NAME, "Font"),
        ];
        assert_eq!(select_display_name(&entries), Some("Font"));
    }

    #[test]
    fn test_falls_back_to_first_name() {
        let entries = vec![full_name(1041, "ＭＳ ゴシック"), full_name(1042, "돋움")];
        assert_eq!(select_display_name(&entries), Some("ＭＳ ゴシック"));
    }

    #[test]
    fn test_ignores_empty_names() {
        let entries = vec![full_name(2052, ""), full_name(1041, "Meiryo")];
        assert_eq!(select_display_name(&entries), Some("Meiryo"));
        assert_eq!(select_display_name(&[full_name(1033, "")]), None);
        assert_eq!(select_display_name(&[]), None);
    }

    #[test]
    fn test_display_names() {
        let name_table = NameTable::from_entries(&[
            NameEntry::windows(1033, name_id::FAMILY_NAME, "Microsoft YaHei"),
            NameEntry::windows(2052, name_id::FAMILY_NAME, "微软雅黑"),
            NameEntry::windows(1033, name_id::FULL_NAME, "Microsoft YaHei Bold"),
        ])
        .unwrap();
        let font = OpenTypeFont::new(SfntVersion::TrueType, name_table);

        assert_eq!(display_names(&font, false), vec!["Microsoft YaHei Bold"]);
        assert_eq!(
            display_names(&font, true),
            vec!["微软雅黑", "Microsoft YaHei Bold"]
        );
    }

    #[test]
    fn test_mac_script_name_only() {
        let name_table = NameTable::from_entries(&[NameEntry {
            platform_id: otf::platform_id::MACINTOSH,
            encoding_id: 25, // Simplified Chinese
            language_id: 33,
            name_id: name_id::FULL_NAME,
            name: "SimHei".to_string(),
        }])
        .unwrap();
        let font = OpenTypeFont::new(SfntVersion::TrueType, name_table);

        assert_eq!(display_names(&font, false), vec!["SimHei"]);
    }
}
