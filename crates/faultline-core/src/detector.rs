//! Log-kind detection from buffer content.
//!
//! The detected kind is a display label; it never changes how a buffer is
//! analyzed.

use serde::{Deserialize, Serialize};

/// Broad family a log buffer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// Hardware and firmware telemetry.
    Firmware,
    /// CI/CD build and deployment output.
    Pipeline,
    /// Test-runner output.
    Testing,
    /// Anything else.
    #[default]
    General,
}

/// Minimum keyword score a kind needs before it beats `General`.
const MIN_KIND_SCORE: usize = 3;

/// Kinds with their indicator keywords. Ties resolve to the earlier kind.
static KIND_KEYWORDS: &[(LogKind, &[&str])] = &[
    (
        LogKind::Firmware,
        &[
            "vrm",
            "voltage",
            "thermal",
            "ecc",
            "memory",
            "cpu",
            "bios",
            "dimm",
            "sensors",
            "temperature",
        ],
    ),
    (
        LogKind::Pipeline,
        &[
            "build", "deploy", "pipeline", "azure", "jenkins", "docker", "npm", "maven", "gradle",
        ],
    ),
    (
        LogKind::Testing,
        &[
            "test", "assert", "pytest", "jest", "junit", "spec", "mock", "fixture",
        ],
    ),
];

impl LogKind {
    /// Detects the kind of a whole buffer.
    ///
    /// Each kind scores one point per distinct indicator keyword present
    /// anywhere in the text.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let lower = text.to_lowercase();

        let mut best = (Self::General, 0usize);
        for (kind, keywords) in KIND_KEYWORDS {
            let score = keywords.iter().filter(|k| lower.contains(*k)).count();
            if score > best.1 {
                best = (*kind, score);
            }
        }

        if best.1 >= MIN_KIND_SCORE {
            best.0
        } else {
            Self::General
        }
    }

    /// Returns the lowercase label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Firmware => "firmware",
            Self::Pipeline => "pipeline",
            Self::Testing => "testing",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for LogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
