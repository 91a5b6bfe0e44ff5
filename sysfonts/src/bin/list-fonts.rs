use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use sysfonts::{DirectoryFontSource, FontEnumerator, FontPath, FontSource};

/// Lists installed fonts by display name together with the font file they are stored in.
#[derive(Parser, Debug)]
#[command(name = "list-fonts", version)]
struct Args {
    /// Also list fonts by their family name
    #[arg(long)]
    family: bool,

    /// Enumerate the font files of a directory instead of the installed fonts
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Directory bare font file names are relative to (defaults to the system font directory)
    #[arg(long, value_name = "DIR")]
    font_dir: Option<PathBuf>,

    /// Print a JSON object instead of tab separated lines
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let fonts = match &args.dir {
        Some(dir) => enumerate(DirectoryFontSource::new(dir), &args),
        None => installed_fonts(&args)?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_fonts(&mut out, fonts, args.json)?;
    out.flush()?;

    Ok(())
}

/// Writes the fonts sorted by name, either as `name<TAB>path` lines or as a JSON object.
fn write_fonts<W: Write>(
    mut out: W,
    fonts: HashMap<String, FontPath>,
    json: bool,
) -> anyhow::Result<()> {
    let fonts = fonts.into_iter().collect::<BTreeMap<_, _>>();
    if json {
        serde_json::to_writer_pretty(&mut out, &fonts)?;
        writeln!(out)?;
    } else {
        for (name, path) in &fonts {
            writeln!(out, "{}\t{}", name, path)?;
        }
    }
    Ok(())
}

fn enumerate<S: FontSource>(source: S, args: &Args) -> HashMap<String, FontPath> {
    let mut builder = FontEnumerator::builder(source).include_family_name(args.family);
    if let Some(font_dir) = &args.font_dir {
        builder = builder.with_font_dir(font_dir);
    }
    builder.build().enumerate()
}

#[cfg(windows)]
fn installed_fonts(args: &Args) -> anyhow::Result<HashMap<String, FontPath>> {
    Ok(enumerate(sysfonts::RegistryFontSource::new(), args))
}

#[cfg(not(windows))]
fn installed_fonts(_: &Args) -> anyhow::Result<HashMap<String, FontPath>> {
    anyhow::bail!("Installed fonts can only be listed on Windows, use --dir <DIR> instead")
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fonts() -> HashMap<String, FontPath> {
        let mut fonts = HashMap::new();
        fonts.insert("宋体".to_string(), FontPath::collection_face("fonts/simsun.ttc", 0));
        fonts.insert("Arial".to_string(), FontPath::new("fonts/arial.ttf"));
        fonts.insert("新宋体".to_string(), FontPath::collection_face("fonts/simsun.ttc", 1));
        fonts
    }

    #[test]
    fn test_write_lines() {
        let mut out = Vec::new();
        write_fonts(&mut out, fonts(), false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Arial\tfonts/arial.ttf\n宋体\tfonts/simsun.ttc,0\n新宋体\tfonts/simsun.ttc,1\n"
        );
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_fonts(&mut out, fonts(), true).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with("}\n"));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&out).unwrap(),
            serde_json::json!({
                "Arial": "fonts/arial.ttf",
                "宋体": "fonts/simsun.ttc,0",
                "新宋体": "fonts/simsun.ttc,1",
            })
        );
        let arial = out.find("Arial").unwrap();
        let songti = out.find("宋体").unwrap();
        assert!(arial < songti);
    }
}
