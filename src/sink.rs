//! Where rendered results and user notifications go.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::Builder;

/// Append-only receiver of rendered result items.
pub trait ResultSink {
    fn extend_results(&mut self, items: &[String]) -> io::Result<()>;
}

/// User-facing alert channel.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

impl ResultSink for Vec<String> {
    fn extend_results(&mut self, items: &[String]) -> io::Result<()> {
        self.extend_from_slice(items);
        Ok(())
    }
}

impl Notifier for Vec<String> {
    fn alert(&mut self, message: &str) {
        self.push(message.to_owned());
    }
}

/// Writes each item on its own line.
pub struct StdoutSink<W: Write = io::Stdout> {
    out: W,
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> StdoutSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ResultSink for StdoutSink<W> {
    fn extend_results(&mut self, items: &[String]) -> io::Result<()> {
        for item in items {
            writeln!(self.out, "{item}")?;
        }
        self.out.flush()
    }
}

/// Prints alerts to stderr.
#[derive(Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Collects items and publishes them to `path` in one atomic step.
///
/// Nothing is written until [`commit`](Self::commit); the destination is
/// either the old file or the complete new one, never a partial write.
pub struct FileSink {
    path: PathBuf,
    wrap: bool,
    items: Vec<String>,
}

impl FileSink {
    /// With `wrap`, the items are enclosed in `<ul id="sheets_list">`.
    pub fn new(path: impl Into<PathBuf>, wrap: bool) -> Self {
        Self {
            path: path.into(),
            wrap,
            items: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stage the collected items next to the destination, then rename over it.
    pub fn commit(self) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // Same directory keeps the rename on one filesystem.
        let mut stage = Builder::new().prefix(".stage.").tempfile_in(dir)?;
        if self.wrap {
            writeln!(stage, "<ul id=\"sheets_list\">")?;
        }
        for item in &self.items {
            writeln!(stage, "{item}")?;
        }
        if self.wrap {
            writeln!(stage, "</ul>")?;
        }
        stage.as_file().sync_all()?;

        stage.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl ResultSink for FileSink {
    fn extend_results(&mut self, items: &[String]) -> io::Result<()> {
        self.items.extend_from_slice(items);
        Ok(())
    }
}
