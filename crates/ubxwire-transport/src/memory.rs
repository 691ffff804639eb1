use bytes::{Buf, BytesMut};

use crate::traits::ByteLink;

type Responder = Box<dyn FnMut(&[u8]) -> Vec<u8> + Send>;

/// In-memory link.
///
/// Inbound bytes are queued with [`MemoryLink::inject`]; everything pushed
/// is captured and can be drained with [`MemoryLink::take_sent`]. An optional
/// responder simulates the peer: on every flush it sees the bytes pushed
/// since the previous flush and returns bytes to queue as inbound.
pub struct MemoryLink {
    inbound: BytesMut,
    sent: Vec<u8>,
    unflushed: usize,
    max_pull: usize,
    responder: Option<Responder>,
}

impl MemoryLink {
    /// Create an empty link.
    pub fn new() -> Self {
        Self {
            inbound: BytesMut::new(),
            sent: Vec::new(),
            unflushed: 0,
            max_pull: usize::MAX,
            responder: None,
        }
    }

    /// Create a link with bytes already waiting to be pulled.
    pub fn with_inbound(bytes: &[u8]) -> Self {
        let mut link = Self::new();
        link.inject(bytes);
        link
    }

    /// Attach a simulated peer.
    pub fn with_responder<F>(mut self, responder: F) -> Self
    where
        F: FnMut(&[u8]) -> Vec<u8> + Send + 'static,
    {
        self.responder = Some(Box::new(responder));
        self
    }

    /// Limit how many bytes a single `pull` hands out.
    pub fn with_max_pull(mut self, max_pull: usize) -> Self {
        self.max_pull = max_pull.max(1);
        self
    }

    /// Queue bytes for the next pulls.
    pub fn inject(&mut self, bytes: &[u8]) {
        self.inbound.extend_from_slice(bytes);
    }

    /// Bytes still waiting to be pulled.
    pub fn pending(&self) -> usize {
        self.inbound.len()
    }

    /// All bytes pushed so far.
    pub fn sent(&self) -> &[u8] {
        &self.sent
    }

    /// Drain the captured output.
    pub fn take_sent(&mut self) -> Vec<u8> {
        self.unflushed = 0;
        std::mem::take(&mut self.sent)
    }
}

impl Default for MemoryLink {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteLink for MemoryLink {
    fn pull(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inbound.len().min(buf.len()).min(self.max_pull);
        buf[..n].copy_from_slice(&self.inbound[..n]);
        self.inbound.advance(n);
        Ok(n)
    }

    fn push_byte(&mut self, byte: u8) -> std::io::Result<()> {
        self.sent.push(byte);
        self.unflushed += 1;
        Ok(())
    }

    fn push_buffer(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.sent.extend_from_slice(buf);
        self.unflushed += buf.len();
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let start = self.sent.len() - self.unflushed;
        self.unflushed = 0;
        if let Some(responder) = self.responder.as_mut() {
            let reply = responder(&self.sent[start..]);
            if !reply.is_empty() {
                tracing::trace!(bytes = reply.len(), "memory link queued reply");
                self.inbound.extend_from_slice(&reply);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for MemoryLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLink")
            .field("inbound", &self.inbound.len())
            .field("sent", &self.sent.len())
            .field("responder", &self.responder.is_some())
            .finish()
    }
}
