//! Reading inputs and writing reports.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

/// Report destination: the `--output` file when given, stdout otherwise.
pub struct Output {
    writer: Box<dyn Write>,
    target: String,
}

impl Output {
    /// Writes `value` as pretty JSON to `output_path` or stdout.
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
    {
        Self::from_output_path(output_path)?.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let Some(path) = output_path else {
            return Ok(Self {
                writer: Box::new(io::stdout().lock()),
                target: "stdout".to_owned(),
            });
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self {
            writer: Box::new(BufWriter::new(file)),
            target: path.display().to_string(),
        })
    }

    /// `stdout` or the output file path, for error messages.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_writer_pretty(&mut self.writer, value)
            .with_context(|| format!("Failed to write JSON to {}", self.target))?;
        writeln!(self.writer)
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("Failed to finish writing {}", self.target))?;
        debug!(output = %self.target, "report written");
        Ok(())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Reads a JSON input file; `kind` names the file in error messages.
pub fn read_json_file<T, P>(kind: &str, path: P) -> anyhow::Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {kind} file: {}", path.display()))?;
    let value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {kind} file as JSON: {}", path.display()))?;
    debug!(kind, path = %path.display(), "loaded input file");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_names_the_file_kind() {
        let err = read_json_file::<serde_json::Value, _>("hero catalog", "no/such/heroes.json")
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("Failed to open hero catalog file: "), "{message}");
        assert!(message.contains("heroes.json"), "{message}");
    }

    #[test]
    fn test_output_to_missing_directory_fails() {
        let err = Output::from_output_path(Some(PathBuf::from("no/such/dir/report.json")))
            .err()
            .unwrap();
        assert!(format!("{err}").contains("report.json"));
    }
}
