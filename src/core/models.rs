// src/core/models.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// --- Shared Types ---

/// The `source` recorded for `<script>` elements that carry no `src` attribute.
pub const INLINE_SCRIPT_SOURCE: &str = "inline-script";

// An enumeration representing the severity level of a finding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

// --- Script Classifier Models ---

/// One risk signal attached to a `<script>` element.
///
/// Serialized as its tag string (e.g. `"tracker"`,
/// `"outdated-library:jquery-1.8.3.min.js:CVE-2011-4969"`), so a report's
/// `reasons` sequence is a plain list of tags on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptReason {
    InsecureTransport,
    SuspiciousKeyword,
    Tracker,
    MaliciousPattern,
    ObfuscatedEval,
    DocumentWrite,
    UnsafeTimerString,
    HighEntropy,
    OutdatedLibrary { library: String, advisory: String },
}

impl ScriptReason {
    /// The stable code used to look this reason up in the knowledge base.
    pub fn code(&self) -> &'static str {
        match self {
            ScriptReason::InsecureTransport => "insecure-transport",
            ScriptReason::SuspiciousKeyword => "suspicious-keyword",
            ScriptReason::Tracker => "tracker",
            ScriptReason::MaliciousPattern => "malicious-pattern",
            ScriptReason::ObfuscatedEval => "obfuscated-eval",
            ScriptReason::DocumentWrite => "document-write",
            ScriptReason::UnsafeTimerString => "unsafe-timer-string",
            ScriptReason::HighEntropy => "high-entropy",
            ScriptReason::OutdatedLibrary { .. } => "outdated-library",
        }
    }
}

impl fmt::Display for ScriptReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptReason::OutdatedLibrary { library, advisory } => {
                write!(f, "outdated-library:{}:{}", library, advisory)
            }
            other => f.write_str(other.code()),
        }
    }
}

impl FromStr for ScriptReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix("outdated-library:") {
            let (library, advisory) = rest
                .split_once(':')
                .ok_or_else(|| format!("malformed outdated-library tag: {}", s))?;
            return Ok(ScriptReason::OutdatedLibrary {
                library: library.to_string(),
                advisory: advisory.to_string(),
            });
        }
        match s {
            "insecure-transport" => Ok(ScriptReason::InsecureTransport),
            "suspicious-keyword" => Ok(ScriptReason::SuspiciousKeyword),
            "tracker" => Ok(ScriptReason::Tracker),
            "malicious-pattern" => Ok(ScriptReason::MaliciousPattern),
            "obfuscated-eval" => Ok(ScriptReason::ObfuscatedEval),
            "document-write" => Ok(ScriptReason::DocumentWrite),
            "unsafe-timer-string" => Ok(ScriptReason::UnsafeTimerString),
            "high-entropy" => Ok(ScriptReason::HighEntropy),
            _ => Err(format!("unknown finding tag: {}", s)),
        }
    }
}

impl Serialize for ScriptReason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScriptReason {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

/// A `<script>` element that produced at least one finding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptRecord {
    pub source: String,
    pub reasons: Vec<ScriptReason>,
}

// --- Form / Iframe Classifier Models ---

// One record per offending element; clean elements produce no record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormFinding {
    pub action: String,
    pub warning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IframeFinding {
    pub src: String,
    pub warning: String,
}

// --- Header Classifier Models ---

/// Disposition of the Content-Security-Policy response header.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CspDisposition {
    Missing,
    PresentWeak,
    PresentOk,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CspStatus {
    pub status: CspDisposition,
    pub note: String,
}

// --- Main Report ---

/// The aggregate result of one page scan. Built once, immutable afterwards,
/// and serializable as a flat JSON document with every field always present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub url: String,
    /// Script elements with at least one finding.
    pub scripts: Vec<ScriptRecord>,
    /// Every external script encountered, flagged or not.
    pub script_inventory: Vec<String>,
    pub tracker_sources: Vec<String>,
    pub malicious_sources: Vec<String>,
    /// External scripts loaded over plaintext HTTP from an encrypted page.
    pub mixed_content_sources: Vec<String>,
    /// Document-wide plaintext resource references, any element type. May
    /// disagree with `mixed_content_sources`; both are kept.
    pub mixed_content_elements: Vec<String>,
    pub form_findings: Vec<FormFinding>,
    pub iframe_findings: Vec<IframeFinding>,
    pub csp_status: CspStatus,
    pub cdn_guess: String,
    pub score: u8,
    pub suggested_csp: String,
    /// Set only when the page could not be retrieved at all.
    pub error: Option<String>,
}

impl AnalysisReport {
    /// The degraded report shape for scans that never obtained a document:
    /// zero score, empty findings, the failure message in `error`.
    pub fn failure(url: &str, message: String) -> Self {
        Self {
            url: url.to_string(),
            scripts: Vec::new(),
            script_inventory: Vec::new(),
            tracker_sources: Vec::new(),
            malicious_sources: Vec::new(),
            mixed_content_sources: Vec::new(),
            mixed_content_elements: Vec::new(),
            form_findings: Vec::new(),
            iframe_findings: Vec::new(),
            csp_status: CspStatus {
                status: CspDisposition::Missing,
                note: String::new(),
            },
            cdn_guess: "Unknown".to_string(),
            score: 0,
            suggested_csp: String::new(),
            error: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_tags_round_trip() {
        let reasons = vec![
            ScriptReason::Tracker,
            ScriptReason::HighEntropy,
            ScriptReason::OutdatedLibrary {
                library: "jquery-1.8.3.min.js".to_string(),
                advisory: "CVE-2011-4969".to_string(),
            },
        ];
        for reason in reasons {
            let tag = reason.to_string();
            let parsed: ScriptReason = tag.parse().unwrap();
            assert_eq!(parsed, reason);
        }
    }

    #[test]
    fn outdated_library_tag_format() {
        let reason = ScriptReason::OutdatedLibrary {
            library: "lodash.js".to_string(),
            advisory: "Prototype pollution vulnerabilities".to_string(),
        };
        assert_eq!(
            reason.to_string(),
            "outdated-library:lodash.js:Prototype pollution vulnerabilities"
        );
        assert_eq!(reason.code(), "outdated-library");
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!("definitely-not-a-tag".parse::<ScriptReason>().is_err());
        assert!("outdated-library:missing-advisory".parse::<ScriptReason>().is_err());
    }

    #[test]
    fn report_json_round_trip() {
        let report = AnalysisReport {
            url: "https://example.com/".to_string(),
            scripts: vec![ScriptRecord {
                source: "http://ads.example.com/gtm.js".to_string(),
                reasons: vec![ScriptReason::InsecureTransport, ScriptReason::SuspiciousKeyword],
            }],
            script_inventory: vec!["http://ads.example.com/gtm.js".to_string()],
            tracker_sources: Vec::new(),
            malicious_sources: Vec::new(),
            mixed_content_sources: vec!["http://ads.example.com/gtm.js".to_string()],
            mixed_content_elements: vec!["http://ads.example.com/gtm.js".to_string()],
            form_findings: vec![FormFinding {
                action: "[empty]".to_string(),
                warning: "Form has no action".to_string(),
            }],
            iframe_findings: Vec::new(),
            csp_status: CspStatus {
                status: CspDisposition::Missing,
                note: "No Content-Security-Policy header set".to_string(),
            },
            cdn_guess: "Unknown".to_string(),
            score: 60,
            suggested_csp: "default-src 'self';\n".to_string(),
            error: None,
        };

        let json = serde_json::to_string(&report).unwrap();
        let back: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn failure_report_shape() {
        let report = AnalysisReport::failure("https://down.example.com", "timed out".to_string());
        assert_eq!(report.score, 0);
        assert!(report.scripts.is_empty());
        assert!(report.script_inventory.is_empty());
        assert!(report.suggested_csp.is_empty());
        assert_eq!(report.error.as_deref(), Some("timed out"));
    }
}
