//! Discovers the fonts installed on a system and maps their display names to font files, e.g.
//! to find a font file to embed into a PDF for a font name used by a document.
//!
//! ```no_run
//! # #[cfg(windows)]
//! # fn main() {
//! let fonts = sysfonts::installed_fonts(false);
//! if let Some(path) = fonts.get("微软雅黑") {
//!     println!("{}", path); // e.g. C:\Windows\Fonts\msyh.ttc,0
//! }
//! # }
//! # #[cfg(not(windows))]
//! # fn main() {}
//! ```

mod enumerator;
mod error;
mod font_dir;
#[cfg(windows)]
pub mod loader;
mod names;
mod path;
mod source;

#[cfg(windows)]
use std::collections::HashMap;

pub use enumerator::{read_font_names, FontEnumerator, FontEnumeratorBuilder};
pub use error::Error;
pub use font_dir::system_font_dir;
pub use names::{display_names, select_display_name};
pub use path::{FontKind, FontPath};
#[cfg(windows)]
pub use source::RegistryFontSource;
pub use source::{DirectoryFontSource, FontEntry, FontSource};

/// Lists the fonts registered machine-wide and for the current user, keyed by display name.
/// With `include_family_name`, fonts are also listed by their family name.
#[cfg(windows)]
pub fn installed_fonts(include_family_name: bool) -> HashMap<String, FontPath> {
    FontEnumerator::builder(RegistryFontSource::new())
        .include_family_name(include_family_name)
        .build()
        .enumerate()
}
