use std::collections::HashMap;
use std::os::unix::io::RawFd;

use memchr::memchr;

use super::lines::Lines;
use super::source::{ByteSource, FdSource};
use crate::error::{Error, Result};

/// Upper bound on the bytes requested per underlying read call.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Incremental line reader over raw file descriptors.
///
/// Bytes read past the end of a line are kept in a per-descriptor
/// carry-over buffer and served first on the next call, so interleaved
/// reads from several descriptors never mix up each other's leftovers.
/// The descriptors themselves are not owned: the caller opens and closes
/// them, and tells the reader to drop its state via [`LineReader::close`].
pub struct LineReader {
    source: Box<dyn ByteSource>,
    carry: HashMap<RawFd, Vec<u8>>,
    chunk_size: usize,
    delim: u8,
}

impl LineReader {
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self::with_source(Box::new(FdSource), chunk_size)
    }

    pub fn with_source(source: Box<dyn ByteSource>, chunk_size: usize) -> Self {
        Self {
            source,
            carry: HashMap::new(),
            chunk_size,
            delim: b'\n',
        }
    }

    /// Split on `delim` instead of `b'\n'`. Only single-byte ASCII values
    /// are valid; anything above 0x7f fails every subsequent call.
    pub fn delimiter(mut self, delim: u8) -> Self {
        self.delim = delim;
        self
    }

    /// Registers a fresh, empty carry-over for `fd`, dropping any stale
    /// leftovers from a previous use of the same descriptor number.
    pub fn open(&mut self, fd: RawFd) -> Result<()> {
        if fd < 0 {
            return Err(Error::invalid_argument(format!(
                "negative stream handle {}",
                fd
            )));
        }
        self.carry.insert(fd, Vec::new());
        Ok(())
    }

    /// Releases the carry-over for `fd`. The descriptor itself is left
    /// alone.
    pub fn close(&mut self, fd: RawFd) {
        self.carry.remove(&fd);
    }

    /// Returns the next line from `fd`: everything up to and including the
    /// first delimiter, or the unterminated tail of the stream right
    /// before EOF. `Ok(None)` means end of stream and stays `Ok(None)` on
    /// repeated calls. Any error drops the descriptor's carry-over, so a
    /// retry starts from whatever position the last successful read left
    /// the stream at.
    pub fn next_line(&mut self, fd: RawFd) -> Result<Option<Vec<u8>>> {
        if let Err(err) = self.validate(fd) {
            self.carry.remove(&fd);
            return Err(err);
        }

        // Taken out of the map up front: every early return below must
        // leave the carry-over released.
        let mut acc = self.carry.remove(&fd).unwrap_or_default();
        let mut chunk = alloc_chunk(self.chunk_size)?;

        loop {
            if memchr(self.delim, &acc).is_some() {
                break;
            }

            match self.source.read_chunk(fd, &mut chunk) {
                Ok(0) => break, // EOF
                Ok(n) => append(&mut acc, &chunk[..n])?,
                Err(err) => {
                    return Err(Error::read(format!(
                        "read failed on stream handle {}",
                        fd
                    ))
                    .with_source(err));
                }
            }
        }

        if acc.is_empty() {
            return Ok(None);
        }

        match memchr(self.delim, &acc) {
            Some(i) => {
                // The suffix goes back into the map even when empty: an
                // empty carry-over is not the same as no carry-over.
                let rest = acc.split_off(i + 1);
                self.carry.insert(fd, rest);
                Ok(Some(acc))
            }
            None => Ok(Some(acc)),
        }
    }

    /// Iterator over the remaining lines of `fd`, fused after the first
    /// error or end of stream.
    pub fn lines(&mut self, fd: RawFd) -> Lines<'_> {
        Lines::new(self, fd)
    }

    fn validate(&self, fd: RawFd) -> Result<()> {
        if fd < 0 {
            return Err(Error::invalid_argument(format!(
                "negative stream handle {}",
                fd
            )));
        }
        if self.chunk_size == 0 {
            return Err(Error::invalid_argument("chunk size must be positive"));
        }
        if self.delim > 0x7f {
            return Err(Error::invalid_argument(format!(
                "delimiter {:#04x} is outside the single-byte range",
                self.delim
            )));
        }
        Ok(())
    }
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

fn alloc_chunk(chunk_size: usize) -> Result<Vec<u8>> {
    let mut chunk = Vec::new();
    chunk
        .try_reserve_exact(chunk_size)
        .map_err(|e| Error::allocation("couldn't allocate the chunk buffer").with_source(e))?;
    chunk.resize(chunk_size, 0);
    Ok(chunk)
}

fn append(acc: &mut Vec<u8>, bytes: &[u8]) -> Result<()> {
    acc.try_reserve(bytes.len())
        .map_err(|e| Error::allocation("couldn't grow the carry-over buffer").with_source(e))?;
    acc.extend_from_slice(bytes);
    Ok(())
}
