use std::io;
use std::os::unix::io::RawFd;

/// One read(2)-shaped pull of up to `buf.len()` bytes from a stream handle.
/// `Ok(0)` means end of stream.
pub trait ByteSource {
    fn read_chunk(&mut self, fd: RawFd, buf: &mut [u8]) -> io::Result<usize>;
}

/// Reads straight from the descriptor. Blocks per the descriptor's own
/// semantics (a pipe with no data blocks the caller).
pub struct FdSource;

impl ByteSource for FdSource {
    fn read_chunk(&mut self, fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let ret = unsafe { libc::read(fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len()) };
            if ret >= 0 {
                return Ok(ret as usize);
            }

            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(err);
            }
        }
    }
}
