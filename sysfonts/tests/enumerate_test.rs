use std::fs::{self, File};

use otf::{name_id, FontCollection, NameEntry, NameTable, OpenTypeFont, SfntVersion};
use pretty_assertions::assert_eq;
use sysfonts::{read_font_names, DirectoryFontSource, FontEnumerator, FontPath};

fn font(entries: &[NameEntry]) -> OpenTypeFont {
    OpenTypeFont::new(
        SfntVersion::CFF,
        NameTable::from_entries(entries).unwrap(),
    )
}

#[test]
fn enumerates_font_directory() {
    let dir = tempfile::tempdir().unwrap();

    let heiti = dir.path().join("simhei.ttf");
    font(&[
        NameEntry::macintosh(0, name_id::FULL_NAME, "SimHei"),
        NameEntry::windows(1033, name_id::FULL_NAME, "SimHei"),
        NameEntry::windows(2052, name_id::FULL_NAME, "黑体"),
    ])
    .to_writer(File::create(&heiti).unwrap())
    .unwrap();

    let source_han = dir.path().join("SourceHanSans.TTC");
    FontCollection::write(
        &[
            font(&[NameEntry::windows(1033, name_id::FULL_NAME, "Source Han Sans SC")]),
            font(&[NameEntry::macintosh(0, name_id::FULL_NAME, "Source Han Sans TC")]),
        ],
        File::create(&source_han).unwrap(),
    )
    .unwrap();

    fs::write(dir.path().join("readme.txt"), "not a font").unwrap();
    fs::write(dir.path().join("empty.otf"), "").unwrap();

    let fonts = FontEnumerator::builder(DirectoryFontSource::new(dir.path()))
        .build()
        .enumerate();

    let mut fonts = fonts
        .into_iter()
        .map(|(name, path)| (name, path.to_string()))
        .collect::<Vec<_>>();
    fonts.sort();
    assert_eq!(
        fonts,
        vec![
            (
                "Source Han Sans SC".to_string(),
                format!("{},0", source_han.display())
            ),
            (
                "Source Han Sans TC".to_string(),
                format!("{},1", source_han.display())
            ),
            ("黑体".to_string(), heiti.display().to_string()),
        ]
    );
}

#[test]
fn reads_names_of_single_font() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arial.ttf");
    font(&[
        NameEntry::windows(1033, name_id::FAMILY_NAME, "Arial"),
        NameEntry::windows(1033, name_id::FULL_NAME, "Arial Bold"),
    ])
    .to_writer(File::create(&path).unwrap())
    .unwrap();

    assert_eq!(
        read_font_names(&path, true).unwrap(),
        vec![
            ("Arial".to_string(), FontPath::new(&path)),
            ("Arial Bold".to_string(), FontPath::new(&path)),
        ]
    );
}

#[cfg(unix)]
#[test]
fn enumerates_symlinked_fonts() {
    use std::os::unix::fs::symlink;

    let store = tempfile::tempdir().unwrap();
    let target = store.path().join("DejaVuSans.ttf");
    font(&[NameEntry::windows(1033, name_id::FULL_NAME, "DejaVu Sans")])
        .to_writer(File::create(&target).unwrap())
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let link = dir.path().join("DejaVuSans.ttf");
    symlink(&target, &link).unwrap();

    let fonts = FontEnumerator::builder(DirectoryFontSource::new(dir.path()))
        .build()
        .enumerate();
    assert_eq!(fonts.len(), 1);
    assert_eq!(fonts["DejaVu Sans"], FontPath::new(&link));
}
