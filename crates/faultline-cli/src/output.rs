//! Output formatting for CLI commands.
//!
//! Supports text (human-readable) and JSON output formats.

use std::io::Write;

use faultline_core::LogKind;
use serde::Serialize;

use crate::cli::Format;
use crate::error::{CliError, Result};

/// Output formatter that handles both text and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<()>
    where
        W: Write,
        T: Serialize + TextDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Text => {
                value.write_text(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String>
    where
        T: Serialize + TextDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Text)
    }
}

/// Trait for types that can be rendered as human-readable text.
pub trait TextDisplay {
    /// Write the value as human-readable text.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_text<W: Write>(&self, writer: &mut W) -> Result<()>;
}

/// Result of the `detect` command.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    /// Inspected file.
    pub file: String,
    /// Detected kind.
    pub kind: LogKind,
}

impl TextDisplay for Detection {
    fn write_text<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}: {}", self.file, self.kind)?;
        Ok(())
    }
}
