use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error reading font file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error parsing font {}: {source}", .path.display())]
    Font {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a TrueType, OpenType or TrueType Collection file", .0.display())]
    UnsupportedFile(PathBuf),
    #[error("No font resources were added from {}", .0.display())]
    FontNotLoaded(PathBuf),
}
