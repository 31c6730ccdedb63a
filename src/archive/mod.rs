mod reader;
mod structures;

pub use reader::ZipArchive;
pub use structures::{ArchiveEntry, CompressionMethod};
