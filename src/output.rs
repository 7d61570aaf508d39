//! Output sinks: stdout, or append-to-file when `--output` is set.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Where rendered records go. File output appends, so repeated invocations
/// against the same file accumulate.
pub enum Sink {
    Stdout(io::Stdout),
    File(File),
}

impl Sink {
    pub fn stdout() -> Self {
        Self::Stdout(io::stdout())
    }

    pub fn file(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .with_context(|| format!("failed to open output file {}", path.display()))?;
        Ok(Self::File(file))
    }

    /// Write one rendered record, ensuring it ends with a newline.
    pub fn write_record(&mut self, rendered: &str) -> Result<()> {
        let writer: &mut dyn Write = match self {
            Self::Stdout(stdout) => stdout,
            Self::File(file) => file,
        };
        writer.write_all(rendered.as_bytes())?;
        if !rendered.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Default output file name: the log group with `/` flattened to `-`, plus
/// the invocation time so successive runs do not collide.
pub fn default_output_file(log_group: &str, unix_seconds: i64) -> PathBuf {
    PathBuf::from(format!(
        "logs{}-{}.txt",
        log_group.replace('/', "-"),
        unix_seconds
    ))
}
