use std::env;
use std::fs;
use std::io;

use otf::{FontCollection, OpenTypeFont};

fn print_names(font: &OpenTypeFont) {
    println!("  sfnt version: {:?}", font.sfnt_version());
    for entry in font.full_names() {
        println!(
            "  [{}/{}/{}] {}",
            entry.platform_id, entry.encoding_id, entry.language_id, entry.name
        );
    }
}

fn main() -> Result<(), io::Error> {
    let path = env::args()
        .nth(1)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Usage: names <font file>"))?;
    let data = fs::read(&path)?;

    if otf::is_collection(&data) {
        let collection = FontCollection::from_slice(&data)?;
        for index in 0..collection.len() {
            println!("{},{}", path, index);
            print_names(&collection.font(index)?);
        }
    } else {
        println!("{}", path);
        print_names(&OpenTypeFont::from_slice(&data)?);
    }

    Ok(())
}
