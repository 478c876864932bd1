use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use sweepstats_analysis::config::AnalyticsConfig;

use crate::schema::dataset::SessionDump;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn save_text(text: &str, output_path: Option<PathBuf>) -> anyhow::Result<()> {
        let mut output = Output::from_output_path(output_path)?;
        writeln!(&mut output, "{text}")
            .with_context(|| format!("Failed to write text to {}", output.display_path()))?;
        output
            .flush()
            .with_context(|| format!("Failed to flush output to {}", output.display_path()))?;
        Ok(())
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read a session dump saved from the game service
///
/// # Errors
///
/// Returns error if file cannot be opened or is neither a record array nor a
/// snapshot object
pub fn read_session_dump_file<P>(path: P) -> anyhow::Result<SessionDump>
where
    P: AsRef<Path>,
{
    read_json_file("session dump", path)
}

/// Read analytics settings from a JSON file
///
/// Missing fields take their default values.
pub fn read_config_file<P>(path: P) -> anyhow::Result<AnalyticsConfig>
where
    P: AsRef<Path>,
{
    read_json_file("analytics config", path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_read_config_file_fills_defaults() {
        let path = std::env::temp_dir().join(format!(
            "sweepstats-config-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"showTrend": false}"#).unwrap();
        let config = read_config_file(&path);
        fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert!(!config.show_trend);
        assert_eq!(config.histogram_widths, AnalyticsConfig::default().histogram_widths);
    }

    #[test]
    fn test_missing_file_names_its_kind() {
        let path = std::env::temp_dir().join("sweepstats-does-not-exist.json");
        let error = read_session_dump_file(&path).unwrap_err();
        assert!(error.to_string().starts_with("Failed to open session dump file"));
    }
}
