//! In-memory capture of formatted tracing output.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// Collects every formatted event into a shared buffer
#[derive(Clone, Default)]
pub struct CapturedLogs {
    sink: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Route events on this thread into the buffer until the guard drops.
    ///
    /// Only valid with the current-thread runtime `#[tokio::test]` uses.
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.sink.lock().unwrap()).into_owned()
    }

    /// Lines mentioning `needle`
    pub fn lines_with(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = EventBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        EventBuffer {
            buf: Vec::with_capacity(256),
            sink: Arc::clone(&self.sink),
        }
    }
}

/// Per-event buffer appended to the sink on drop
pub struct EventBuffer {
    buf: Vec<u8>,
    sink: Arc<Mutex<Vec<u8>>>,
}

impl Write for EventBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for EventBuffer {
    fn drop(&mut self) {
        if let Ok(mut sink) = self.sink.lock() {
            sink.extend_from_slice(&self.buf);
        }
    }
}
