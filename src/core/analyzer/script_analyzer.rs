// src/core/analyzer/script_analyzer.rs

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::core::analyzer::entropy::shannon_entropy;
use crate::core::models::{INLINE_SCRIPT_SOURCE, ScriptReason, ScriptRecord};
use crate::core::rules::RuleSet;

/// Inline scripts at or below this length are never entropy-tested.
const ENTROPY_MIN_LEN: usize = 100;
/// Bits per character above which inline content counts as statistically random.
const ENTROPY_THRESHOLD: f64 = 4.0;

// Statically compiled patterns for the inline-script checks. `eval` combined
// with a decoder is the classic encoded-payload shape; a quote right after a
// timer call means the scheduled argument is a string, not a function.
static RE_ENCODED_PAYLOAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(unescape|fromCharCode|\\x)").unwrap());
static RE_DOCUMENT_WRITE: Lazy<Regex> = Lazy::new(|| Regex::new(r"document\.write\(").unwrap());
static RE_TIMER_STRING_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(setTimeout|setInterval)\s*\(\s*['"]"#).unwrap());

/// Everything the script classifier learns about a document's `<script>` elements.
#[derive(Debug, Default)]
pub struct ScriptAnalysis {
    /// Scripts with at least one finding; clean scripts are dropped from here.
    pub scripts: Vec<ScriptRecord>,
    /// Every script with a resolvable `src`, finding or not. Downstream
    /// membership tests (tracker/malicious/mixed-content) and the CSP
    /// synthesizer operate on this inventory.
    pub inventory: Vec<String>,
    pub tracker_sources: Vec<String>,
    pub malicious_sources: Vec<String>,
    pub mixed_content_sources: Vec<String>,
}

/// Classifies every `<script>` element of the document.
///
/// External scripts are resolved against the page URL and matched against the
/// rule tables; inline scripts are treated as opaque text and run through the
/// pattern and entropy checks.
pub fn analyze_scripts(document: &Html, page_url: &Url, rules: &RuleSet) -> ScriptAnalysis {
    let mut analysis = ScriptAnalysis::default();
    let selector = match Selector::parse("script") {
        Ok(selector) => selector,
        Err(_) => return analysis,
    };
    let page_is_encrypted = page_url.scheme() == "https";

    for element in document.select(&selector) {
        let src = element.value().attr("src").unwrap_or_default();
        if !src.is_empty() {
            let resolved = resolve_script_src(page_url, src);
            let mut reasons = Vec::new();

            let plaintext = resolved.starts_with("http://");
            if plaintext {
                reasons.push(ScriptReason::InsecureTransport);
                if page_is_encrypted {
                    analysis.mixed_content_sources.push(resolved.clone());
                }
            }

            let lowered = resolved.to_lowercase();
            if rules
                .suspicious_keywords
                .iter()
                .any(|keyword| lowered.contains(keyword.as_str()))
            {
                reasons.push(ScriptReason::SuspiciousKeyword);
            }

            if rules
                .tracker_domains
                .iter()
                .any(|domain| resolved.contains(domain.as_str()))
            {
                reasons.push(ScriptReason::Tracker);
                analysis.tracker_sources.push(resolved.clone());
            }

            if rules
                .malicious_patterns
                .iter()
                .any(|pattern| resolved.contains(pattern.as_str()))
            {
                reasons.push(ScriptReason::MaliciousPattern);
                analysis.malicious_sources.push(resolved.clone());
            }

            for entry in &rules.outdated_libraries {
                if resolved.contains(entry.library.as_str()) {
                    reasons.push(ScriptReason::OutdatedLibrary {
                        library: entry.library.clone(),
                        advisory: entry.advisory.clone(),
                    });
                }
            }

            analysis.inventory.push(resolved.clone());
            if !reasons.is_empty() {
                debug!(source = %resolved, reasons = reasons.len(), "External script flagged.");
                analysis.scripts.push(ScriptRecord {
                    source: resolved,
                    reasons,
                });
            }
        } else {
            let content: String = element.text().collect();
            let mut reasons = Vec::new();

            if content.contains("eval") && RE_ENCODED_PAYLOAD.is_match(&content) {
                reasons.push(ScriptReason::ObfuscatedEval);
            }
            if RE_DOCUMENT_WRITE.is_match(&content) {
                reasons.push(ScriptReason::DocumentWrite);
            }
            if RE_TIMER_STRING_ARG.is_match(&content) {
                reasons.push(ScriptReason::UnsafeTimerString);
            }
            if content.chars().count() > ENTROPY_MIN_LEN {
                if let Ok(bits) = shannon_entropy(&content) {
                    if bits > ENTROPY_THRESHOLD {
                        reasons.push(ScriptReason::HighEntropy);
                    }
                }
            }
            if rules
                .malicious_patterns
                .iter()
                .any(|pattern| content.contains(pattern.as_str()))
            {
                reasons.push(ScriptReason::MaliciousPattern);
                analysis
                    .malicious_sources
                    .push(INLINE_SCRIPT_SOURCE.to_string());
            }

            if !reasons.is_empty() {
                debug!(reasons = reasons.len(), "Inline script flagged.");
                analysis.scripts.push(ScriptRecord {
                    source: INLINE_SCRIPT_SOURCE.to_string(),
                    reasons,
                });
            }
        }
    }

    analysis
}

// Standard base-URL resolution: relative paths join the document URL,
// protocol-relative URLs inherit the page scheme. A src that cannot be
// resolved is kept as written.
fn resolve_script_src(page_url: &Url, src: &str) -> String {
    match page_url.join(src) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => src.to_string(),
    }
}
