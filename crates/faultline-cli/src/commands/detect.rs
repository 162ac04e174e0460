//! Detect command implementation.

use std::io::Write;
use std::path::Path;

use faultline_core::{decode_utf8, LogKind};

use crate::error::Result;
use crate::output::{Detection, OutputFormat};

/// Handler for the detect command.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectCommand;

impl DetectCommand {
    /// Creates a new detect command handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Executes the detect command.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not UTF-8.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        file: &Path,
    ) -> Result<()> {
        let bytes = tokio::fs::read(file).await?;
        let text = decode_utf8(&bytes)?;

        let detection = Detection {
            file: file.display().to_string(),
            kind: LogKind::detect(text),
        };
        format.write(out, &detection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use crate::error::CliError;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn detects_pipeline_log() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[jenkins] build #42 started").unwrap();
        writeln!(file, "docker push failed during deploy").unwrap();

        let mut out = Vec::new();
        DetectCommand::new()
            .execute(&mut out, &OutputFormat::new(Format::Json), file.path())
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["kind"], "pipeline");
    }

    #[tokio::test]
    async fn rejects_binary_input() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0x00, 0xfe]).unwrap();

        let mut out = Vec::new();
        let err = DetectCommand::new()
            .execute(&mut out, &OutputFormat::default(), file.path())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
    }
}
