// src/core/analyzer/header_analyzer.rs

use reqwest::header::{HeaderMap, SERVER};
use tracing::{debug, warn};

use crate::core::models::{CspDisposition, CspStatus};
use crate::core::rules::RuleSet;

/// Derives the Content-Security-Policy disposition from the response headers.
///
/// Absent header: `missing`. Present but carrying the `'unsafe-inline'`
/// token: `present-weak` (the policy exists but re-opens the XSS door it was
/// meant to close). Anything else: `present-ok`.
pub fn analyze_csp_header(headers: &HeaderMap) -> CspStatus {
    match headers.get("content-security-policy") {
        None => {
            debug!("CSP header not found.");
            CspStatus {
                status: CspDisposition::Missing,
                note: "No Content-Security-Policy header set".to_string(),
            }
        }
        Some(value) => {
            let value = match value.to_str() {
                Ok(value) => value,
                Err(_) => {
                    warn!("CSP header found but contained invalid UTF-8.");
                    // Presence without readable content still counts as a policy.
                    "[Invalid UTF-8]"
                }
            };
            if value.contains("'unsafe-inline'") {
                CspStatus {
                    status: CspDisposition::PresentWeak,
                    note: "CSP contains 'unsafe-inline'".to_string(),
                }
            } else {
                CspStatus {
                    status: CspDisposition::PresentOk,
                    note: "CSP is set".to_string(),
                }
            }
        }
    }
}

/// Best-effort CDN guess from the Server header and the script inventory.
/// One case-insensitive substring probe per known vendor; never authoritative.
pub fn guess_cdn(headers: &HeaderMap, inventory: &[String], rules: &RuleSet) -> String {
    let server = headers
        .get(SERVER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_lowercase();

    for signature in &rules.cdn_signatures {
        if server.contains(signature.needle.as_str())
            || inventory
                .iter()
                .any(|src| src.to_lowercase().contains(signature.needle.as_str()))
        {
            return signature.vendor.clone();
        }
    }
    "Unknown".to_string()
}
