use std::io::{ErrorKind, Read, Write};

/// The capability set a session drives: pull available input, push output.
///
/// `pull` must not block waiting for data. Returning `Ok(0)` means "nothing
/// right now", not end of stream.
pub trait ByteLink {
    /// Copy whatever bytes are available into `buf` and return the count.
    fn pull(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;

    /// Push a single byte.
    fn push_byte(&mut self, byte: u8) -> std::io::Result<()>;

    /// Push a whole buffer. Falls back to one `push_byte` per byte.
    fn push_buffer(&mut self, buf: &[u8]) -> std::io::Result<()> {
        for byte in buf {
            self.push_byte(*byte)?;
        }
        Ok(())
    }

    /// Flush anything the link buffers internally.
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<L: ByteLink + ?Sized> ByteLink for &mut L {
    fn pull(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        (**self).pull(buf)
    }

    fn push_byte(&mut self, byte: u8) -> std::io::Result<()> {
        (**self).push_byte(byte)
    }

    fn push_buffer(&mut self, buf: &[u8]) -> std::io::Result<()> {
        (**self).push_buffer(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        (**self).flush()
    }
}

impl<L: ByteLink + ?Sized> ByteLink for Box<L> {
    fn pull(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        (**self).pull(buf)
    }

    fn push_byte(&mut self, byte: u8) -> std::io::Result<()> {
        (**self).push_byte(byte)
    }

    fn push_buffer(&mut self, buf: &[u8]) -> std::io::Result<()> {
        (**self).push_buffer(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        (**self).flush()
    }
}

/// Link type of a session that has no link attached.
///
/// Never produces input and refuses output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLink;

impl ByteLink for NullLink {
    fn pull(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(0)
    }

    fn push_byte(&mut self, _byte: u8) -> std::io::Result<()> {
        Err(std::io::Error::from(ErrorKind::NotConnected))
    }
}

/// Adapts any `Read + Write` stream into a [`ByteLink`].
///
/// The stream should be configured with a short read timeout or
/// non-blocking mode; `WouldBlock` and `TimedOut` are reported as zero
/// bytes available.
pub struct StreamLink<T> {
    inner: T,
}

impl<T: Read + Write> StreamLink<T> {
    /// Wrap a stream.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the link and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + Write> ByteLink for StreamLink<T> {
    fn pull(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        loop {
            match self.inner.read(buf) {
                Ok(n) => return Ok(n),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err)
                    if err.kind() == ErrorKind::WouldBlock || err.kind() == ErrorKind::TimedOut =>
                {
                    return Ok(0)
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn push_byte(&mut self, byte: u8) -> std::io::Result<()> {
        self.push_buffer(&[byte])
    }

    fn push_buffer(&mut self, buf: &[u8]) -> std::io::Result<()> {
        let mut offset = 0usize;
        while offset < buf.len() {
            match self.inner.write(&buf[offset..]) {
                Ok(0) => return Err(std::io::Error::from(ErrorKind::WriteZero)),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}

impl<T> std::fmt::Debug for StreamLink<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamLink").finish_non_exhaustive()
    }
}
