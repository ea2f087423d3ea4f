//! This module acts as the central "brain" of the scanner.
//! It contains a static, read-only database of every finding the engine can
//! emit, complete with detailed, human-readable explanations and remediation
//! steps. Making this data-driven allows for easy updates and maintenance of
//! the scanner's intelligence.

use crate::core::models::Severity;
use std::fmt;

/// Defines the high-level categories for security findings.
/// This is used to group related issues together in the user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FindingCategory {
    /// Findings attached to `<script>` elements, external or inline.
    Script,
    /// Findings on other document content (forms, iframes, mixed resources).
    Document,
    /// Findings derived from the HTTP response headers or the fetch itself.
    Http,
}

/// Implements the `Display` trait to provide a human-friendly name for each category.
impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingCategory::Script => write!(f, "Script Analysis"),
            FindingCategory::Document => write!(f, "Document Content"),
            FindingCategory::Http => write!(f, "HTTP Response"),
        }
    }
}

/// A struct that holds all the detailed, human-readable information about a
/// specific finding: its severity, an explanation of the risk, and the steps
/// to remediate it.
pub struct FindingDetail {
    /// A unique, machine-readable identifier for the finding (e.g., "mixed-content").
    pub code: &'static str,
    /// A short, human-readable title for the finding.
    pub title: &'static str,
    /// The category this finding belongs to.
    pub category: FindingCategory,
    /// The severity level of the finding (e.g., Critical, Warning, Info).
    pub severity: Severity,
    /// A detailed but easy-to-understand explanation of what the finding means and why it's a problem.
    pub description: &'static str,
    /// Clear, actionable steps the user can take to fix the issue.
    pub remediation: &'static str,
}

/// The centralized, static knowledge base of all possible findings.
static FINDINGS: &[FindingDetail] = &[
    // --- Scripts: Third-Party Code & Inline Behavior ---
    FindingDetail {
        code: "insecure-transport",
        title: "Script Loaded Over HTTP",
        category: FindingCategory::Script,
        severity: Severity::Warning,
        description: "This script is requested over plaintext HTTP. Anyone on the network path can read or rewrite it in transit, which hands an attacker full code execution in your visitors' browsers.",
        remediation: "Serve the script over HTTPS. If the provider does not support HTTPS, replace it; a script you cannot fetch securely is not worth embedding."
    },
    FindingDetail {
        code: "suspicious-keyword",
        title: "Suspicious Keyword in Script URL",
        category: FindingCategory::Script,
        severity: Severity::Info,
        description: "The script URL matches a keyword commonly associated with advertising, tracking, beacons or session recording. This is a broad, informational signal rather than evidence of wrongdoing.",
        remediation: "Review whether this third-party service is still needed and what data it collects. Remove integrations that no longer pay for the privacy they cost."
    },
    FindingDetail {
        code: "tracker",
        title: "Known Tracking Domain",
        category: FindingCategory::Script,
        severity: Severity::Warning,
        description: "This script is served from a well-known analytics or advertising domain. It can follow your visitors across sites and typically loads further third-party code at its own discretion.",
        remediation: "Confirm the tracker is intentional, disclose it in your privacy policy, and prefer self-hosted or consent-gated analytics where possible."
    },
    FindingDetail {
        code: "malicious-pattern",
        title: "Malicious Code Signature",
        category: FindingCategory::Script,
        severity: Severity::Critical,
        description: "The script matches a signature associated with cryptomining, payment skimming or deliberately obfuscated malware. Treat the page as compromised until proven otherwise.",
        remediation: "Remove the script immediately, audit how it was introduced (compromised dependency, CMS plugin, injected storage), and rotate any credentials the page handles."
    },
    FindingDetail {
        code: "outdated-library",
        title: "Outdated JavaScript Library",
        category: FindingCategory::Script,
        severity: Severity::Warning,
        description: "The page loads a library version with published vulnerabilities. Exploits for these versions are public and routinely scanned for by attackers.",
        remediation: "Upgrade to the latest supported release of the library, or remove it if unused. Pin versions through your build instead of hotlinking ancient CDN files."
    },
    FindingDetail {
        code: "obfuscated-eval",
        title: "Obfuscated eval() Usage",
        category: FindingCategory::Script,
        severity: Severity::Critical,
        description: "Inline code combines eval() with a decoder such as unescape() or fromCharCode(). Legitimate code rarely needs to decode itself before running; malware almost always does.",
        remediation: "Identify where this inline block comes from and remove it. If it is your own code, refactor away from eval(); a strict CSP will refuse to run it anyway."
    },
    FindingDetail {
        code: "document-write",
        title: "document.write() Usage",
        category: FindingCategory::Script,
        severity: Severity::Warning,
        description: "document.write() injects markup directly into the page as it parses. It is a classic injection vector and blocks rendering; third-party snippets using it can rewrite your entire page.",
        remediation: "Replace document.write() with DOM insertion APIs (createElement/append) or template rendering. Most vendors offer async snippet variants without it."
    },
    FindingDetail {
        code: "unsafe-timer-string",
        title: "Timer With String Argument",
        category: FindingCategory::Script,
        severity: Severity::Warning,
        description: "setTimeout or setInterval is called with a string as its first argument. The string is compiled and executed like eval(), so attacker-influenced data in it becomes code execution.",
        remediation: "Pass a function reference to the timer instead of a string. This removes the implicit eval and usually makes the code shorter."
    },
    FindingDetail {
        code: "high-entropy",
        title: "High-Entropy Inline Script",
        category: FindingCategory::Script,
        severity: Severity::Warning,
        description: "The character distribution of this inline script is close to random, which is typical of packed, encoded or obfuscated payloads. It is a statistical signal, not proof.",
        remediation: "Establish the provenance of the block. Minified first-party bundles are fine; unexplained encoded blobs you did not ship deserve an incident review."
    },
    // --- Document Content: Forms, Frames & Mixed Resources ---
    FindingDetail {
        code: "form-action-missing",
        title: "Form Without Action",
        category: FindingCategory::Document,
        severity: Severity::Info,
        description: "A form on the page declares no action, so submission behavior is defined entirely by script. If that script is compromised or missing, the data's destination is unpredictable.",
        remediation: "Declare an explicit HTTPS action on every form, even when a script intercepts the submit event, so there is always a safe default destination."
    },
    FindingDetail {
        code: "form-action-insecure",
        title: "Insecure Form Submission",
        category: FindingCategory::Document,
        severity: Severity::Warning,
        description: "This form submits to a plaintext HTTP endpoint. Everything the user types, including credentials and personal data, crosses the network unencrypted.",
        remediation: "Point the form action at an HTTPS endpoint and redirect the HTTP endpoint permanently. Browsers already warn users before submitting to plaintext targets."
    },
    FindingDetail {
        code: "iframe-third-party",
        title: "Third-Party Iframe",
        category: FindingCategory::Document,
        severity: Severity::Info,
        description: "The page embeds content from a different origin. The embedded document controls its own frame and can run scripts, show prompts and set cookies under its own origin.",
        remediation: "Embed only origins you trust, sandbox the iframe with the 'sandbox' attribute, and restrict what it may do via 'allow' permissions."
    },
    FindingDetail {
        code: "mixed-content",
        title: "Mixed Content Resource",
        category: FindingCategory::Document,
        severity: Severity::Warning,
        description: "An element on this encrypted page references a resource over plaintext HTTP. Browsers block some mixed content outright and silently weaken the lock indicator for the rest.",
        remediation: "Load every subresource over HTTPS. Most CDNs serve the same path on both schemes, so usually only the URL prefix needs to change."
    },
    // --- HTTP Response: Policy Headers & Retrieval ---
    FindingDetail {
        code: "csp-missing",
        title: "CSP Header Missing",
        category: FindingCategory::Http,
        severity: Severity::Warning,
        description: "Content-Security-Policy (CSP) is a powerful security layer that helps prevent attacks like Cross-Site Scripting (XSS) and data injection by defining which resources a browser is allowed to load.",
        remediation: "Implement a Content-Security-Policy header that defines trusted sources for scripts, styles, and other assets. The suggested policy in this report is a starting point, not a final ruleset."
    },
    FindingDetail {
        code: "csp-unsafe-inline",
        title: "CSP Allows 'unsafe-inline'",
        category: FindingCategory::Http,
        severity: Severity::Warning,
        description: "The CSP header is present but permits inline scripts via 'unsafe-inline'. This re-opens the main XSS vector that CSP exists to close, so the policy provides little practical protection.",
        remediation: "Move inline scripts into external files and remove 'unsafe-inline', or switch to nonce- or hash-based allowances for the few blocks that must stay inline."
    },
    FindingDetail {
        code: "fetch-failed",
        title: "Page Could Not Be Retrieved",
        category: FindingCategory::Http,
        severity: Severity::Critical,
        description: "The scanner could not fetch the target page, so no content analysis took place. The server might be down, unreachable, or blocking automated requests.",
        remediation: "Verify that the target is online and accessible from the public internet, then scan again. Check for firewalls or bot protection that might be rejecting the scanner."
    },
];

/// Retrieves the full detail for a given finding code from the static knowledge base.
///
/// # Arguments
///
/// * `code` - The machine-readable code for the finding.
///
/// # Returns
///
/// An `Option` containing a reference to the `FindingDetail` if the code is found,
/// or `None` if the code does not exist in the knowledge base.
pub fn get_finding_detail(code: &str) -> Option<&'static FindingDetail> {
    FINDINGS.iter().find(|finding| finding.code == code)
}
