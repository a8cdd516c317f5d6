//! Byte sinks for exercising encode failure paths.

use std::io::{self, Write};

/// A sink that accepts `capacity` bytes and then fails every write.
#[derive(Debug, Default)]
pub struct FailingSink {
    pub written: Vec<u8>,
    capacity: usize,
}

impl FailingSink {
    /// Fails on the very first write.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Accepts up to `capacity` bytes before failing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            written: Vec::new(),
            capacity,
        }
    }
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.capacity.saturating_sub(self.written.len());
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "sink is full"));
        }
        let n = room.min(buf.len());
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
