use std::os::unix::io::RawFd;

use super::reader::LineReader;
use crate::error::Result;

/// Iterator over the remaining lines of one descriptor. Yields nothing
/// more after end of stream or the first error.
pub struct Lines<'a> {
    reader: &'a mut LineReader,
    fd: RawFd,
    done: bool,
}

impl<'a> Lines<'a> {
    pub(super) fn new(reader: &'a mut LineReader, fd: RawFd) -> Self {
        Self {
            reader,
            fd,
            done: false,
        }
    }
}

impl<'a> std::iter::Iterator for Lines<'a> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.next_line(self.fd) {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    use crate::reader::ByteSource;

    struct OneShotSource {
        data: Vec<u8>,
        fail_after: bool,
        calls: usize,
    }

    impl ByteSource for OneShotSource {
        fn read_chunk(&mut self, _fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
            self.calls += 1;
            match self.calls {
                1 => {
                    buf[..self.data.len()].copy_from_slice(&self.data);
                    Ok(self.data.len())
                }
                _ if self.fail_after => Err(io::Error::from(io::ErrorKind::Other)),
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn test_lines_drained_to_end() {
        let source = OneShotSource {
            data: b"a\nb\n".to_vec(),
            fail_after: false,
            calls: 0,
        };
        let mut reader = LineReader::with_source(Box::new(source), 64);

        let lines: Vec<_> = reader.lines(3).collect::<Result<_>>().unwrap();
        assert_eq!(vec![b"a\n".to_vec(), b"b\n".to_vec()], lines);
    }

    #[test]
    fn test_lines_fused_after_error() {
        let source = OneShotSource {
            data: b"complete\nhanging".to_vec(),
            fail_after: true,
            calls: 0,
        };
        let mut reader = LineReader::with_source(Box::new(source), 64);
        let mut lines = reader.lines(3);

        assert!(matches!(lines.next(), Some(Ok(_))));
        assert!(matches!(lines.next(), Some(Err(_))));
        assert!(lines.next().is_none());
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_lines_empty_stream() {
        let source = OneShotSource {
            data: Vec::new(),
            fail_after: false,
            calls: 0,
        };
        let mut reader = LineReader::with_source(Box::new(source), 64);

        assert!(reader.lines(3).next().is_none());
    }
}
