//! Incremental line-oriented reading from raw file descriptors.
//!
//! A [`LineReader`] returns successive delimiter-terminated lines from an
//! open descriptor, buffering bytes read past the end of the current line
//! in a per-descriptor carry-over served first on the next call.
//!
//! ```no_run
//! use std::os::unix::io::AsRawFd;
//!
//! let file = std::fs::File::open("access.log")?;
//! let mut reader = fdlines::LineReader::new();
//!
//! while let Some(line) = reader.next_line(file.as_raw_fd())? {
//!     print!("{}", String::from_utf8_lossy(&line));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod reader;

pub use error::{Error, ErrorKind, Result};
pub use reader::{ByteSource, FdSource, LineReader, Lines, DEFAULT_CHUNK_SIZE};
