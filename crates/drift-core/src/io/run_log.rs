use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::consts::{LOG_HEADER, LOG_HOUR_PREFIX};
use crate::error::{DriftError, Result};
use crate::frame::RegistrationRecord;

/// Append-only CSV log of one batch run.
///
/// Layout: the header, then per non-empty hour an `Hour <h>` line followed
/// by one `<file>,<real>,<imaginary>,<x>,<y>` row per candidate.
pub struct RunLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl RunLog {
    /// Create (truncating) the log at `path` and write the header.
    pub fn create(path: &Path) -> Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "{LOG_HEADER}")?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_hour(&mut self, hour: u8) -> Result<()> {
        writeln!(self.writer, "{LOG_HOUR_PREFIX}{hour}")?;
        Ok(())
    }

    pub fn write_record(&mut self, record: &RegistrationRecord) -> Result<()> {
        writeln!(
            self.writer,
            "{},{:.2},{:.2},{},{}",
            record.source.display(),
            record.peak.re,
            record.peak.im,
            record.shift.dx,
            record.shift.dy
        )?;
        Ok(())
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and close the log.
    pub fn finish(mut self) -> Result<()> {
        self.flush()
    }
}

/// One parsed line of a run log.
#[derive(Clone, Debug, PartialEq)]
pub enum LogLine {
    Header,
    Hour(u8),
    Row(LogRow),
}

/// One registration row of a run log.
#[derive(Clone, Debug, PartialEq)]
pub struct LogRow {
    pub file: String,
    pub real: f64,
    pub imaginary: f64,
    pub x: i64,
    pub y: i64,
}

/// Read and parse a run log from disk.
pub fn read_log(path: &Path) -> Result<Vec<LogLine>> {
    parse_log(&fs::read_to_string(path)?)
}

/// Parse run log text. The first line must be the header.
pub fn parse_log(text: &str) -> Result<Vec<LogLine>> {
    let mut lines = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let err = |message: String| DriftError::LogFormat { line, message };

        if idx == 0 {
            if raw != LOG_HEADER {
                return Err(err(format!("expected header `{LOG_HEADER}`, got `{raw}`")));
            }
            lines.push(LogLine::Header);
            continue;
        }

        if let Some(hour) = raw.strip_prefix(LOG_HOUR_PREFIX) {
            let hour = hour
                .parse::<u8>()
                .map_err(|_| err(format!("invalid hour `{hour}`")))?;
            lines.push(LogLine::Hour(hour));
            continue;
        }

        // The file column may itself contain commas, so split from the right.
        let fields: Vec<&str> = raw.rsplitn(5, ',').collect();
        let [y, x, imaginary, real, file] = fields[..] else {
            return Err(err(format!("expected 5 fields, got `{raw}`")));
        };
        lines.push(LogLine::Row(LogRow {
            file: file.to_string(),
            real: real
                .parse::<f64>()
                .map_err(|_| err(format!("invalid real part `{real}`")))?,
            imaginary: imaginary
                .parse::<f64>()
                .map_err(|_| err(format!("invalid imaginary part `{imaginary}`")))?,
            x: x.parse::<i64>().map_err(|_| err(format!("invalid x `{x}`")))?,
            y: y.parse::<i64>().map_err(|_| err(format!("invalid y `{y}`")))?,
        }));
    }

    if lines.is_empty() {
        return Err(DriftError::LogFormat {
            line: 1,
            message: "empty log".into(),
        });
    }

    Ok(lines)
}
