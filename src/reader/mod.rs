mod lines;
mod reader;
mod source;

pub use lines::Lines;
pub use reader::{LineReader, DEFAULT_CHUNK_SIZE};
pub use source::{ByteSource, FdSource};
