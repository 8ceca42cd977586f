//! Browser console logging.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};
use wasm_bindgen::JsValue;

/// Default filter for the page.
const DEFAULT_FILTER: &str = "info";

/// Writer factory sending each formatted event to the browser console.
#[derive(Debug, Clone, Copy, Default)]
struct BrowserConsole;

/// One formatted event, flushed to the console when dropped.
#[derive(Debug)]
struct ConsoleLine {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        let message = JsValue::from_str(text.trim_end());

        match self.level {
            Level::ERROR => web_sys::console::error_1(&message),
            Level::WARN => web_sys::console::warn_1(&message),
            Level::INFO => web_sys::console::info_1(&message),
            _ => web_sys::console::debug_1(&message),
        }
    }
}

impl<'a> MakeWriter<'a> for BrowserConsole {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleLine {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Install a `tracing` subscriber writing to the browser console.
pub fn init() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(DEFAULT_FILTER))
        .with_writer(BrowserConsole)
        .with_ansi(false)
        .without_time()
        .with_target(true)
        .try_init();

    if let Err(error) = result {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Failed to install logging: {error}"
        )));
    }
}
