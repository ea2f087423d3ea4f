// src/core/rules.rs

//! The rule data that drives the classifiers: tracker domains, malicious
//! signatures, suspicious URL keywords, known-vulnerable library versions and
//! CDN fingerprints. The tables are plain data with no behavior; a `RuleSet`
//! is built once and injected into the engine at construction, so rule
//! updates never touch classifier logic.

use serde::{Deserialize, Serialize};

// Well-known analytics/ad domains. Deliberately narrow: matches here feed the
// score penalty and the CSP analytics placeholder.
static TRACKER_DOMAINS: &[&str] = &[
    "googletagmanager.com",
    "google-analytics.com",
    "facebook.net",
    "hotjar.com",
    "mixpanel.com",
    "doubleclick.net",
    "segment.io",
];

// Cryptojacking, skimmer and obfuscation signatures, matched against both
// script URLs and inline script text.
static MALICIOUS_PATTERNS: &[&str] = &[
    "coinhive",
    "cryptojacking",
    "skimmer",
    "jquery.fake",
    "obfuscated.js",
    "base64,eval",
    "evil.js",
    "suspicious.min.js",
];

// Broad net over trackers, CDNs, beacons and session recorders. A hit here is
// informational only and never affects the score.
static SUSPICIOUS_KEYWORDS: &[&str] = &[
    "ads",
    "tracker",
    "spy",
    "click",
    "analytics",
    "pixel",
    "adservice",
    "googletagmanager",
    "doubleclick",
    "facebook.net",
    "gtm.js",
    "heatmap",
    "track.js",
    "affiliate",
    "beacon",
    "logger",
    "sessionrecording",
    "mouseflow",
    "hotjar",
    "mixpanel",
    "segment",
    "optimizely",
    "cdn-cgi",
    "clarity",
    "crazyegg",
    "clicktale",
    "sentry",
    "newrelic",
    "datadog",
];

// Known vulnerable or deprecated library versions, keyed by the filename
// substring they ship under.
static OUTDATED_LIBRARIES: &[(&str, &str)] = &[
    ("jquery-1.8.3.min.js", "CVE-2011-4969"),
    ("jquery-1.12.4.js", "CVE-2020-11022, CVE-2020-11023"),
    ("angular-1.2.0.js", "CVE-2018-3741"),
    ("angular-1.6.0.js", "CVE-2019-7609"),
    ("bootstrap-3.3.7.js", "CVE-2018-14041"),
    ("bootstrap-3.4.0.js", "CVE-2019-8331"),
    ("moment.js", "Deprecated - known vulnerabilities"),
    ("lodash.js", "Prototype pollution vulnerabilities"),
    ("underscore.js", "CVE-2021-23358"),
    ("handlebars.js", "CVE-2019-19919"),
];

// CDN fingerprints checked against the Server header and the script
// inventory. One substring probe per vendor.
static CDN_SIGNATURES: &[(&str, &str)] = &[("cloudflare", "Cloudflare")];

/// A library version with a published advisory against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryAdvisory {
    pub library: String,
    pub advisory: String,
}

/// A vendor signature for the CDN guess.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnSignature {
    pub needle: String,
    pub vendor: String,
}

/// The immutable rule data one engine instance classifies with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    pub tracker_domains: Vec<String>,
    pub suspicious_keywords: Vec<String>,
    pub malicious_patterns: Vec<String>,
    pub outdated_libraries: Vec<LibraryAdvisory>,
    pub cdn_signatures: Vec<CdnSignature>,
}

impl RuleSet {
    /// The rule tables shipped with the scanner.
    pub fn builtin() -> Self {
        Self {
            tracker_domains: owned(TRACKER_DOMAINS),
            suspicious_keywords: owned(SUSPICIOUS_KEYWORDS),
            malicious_patterns: owned(MALICIOUS_PATTERNS),
            outdated_libraries: OUTDATED_LIBRARIES
                .iter()
                .map(|(library, advisory)| LibraryAdvisory {
                    library: (*library).to_string(),
                    advisory: (*advisory).to_string(),
                })
                .collect(),
            cdn_signatures: CDN_SIGNATURES
                .iter()
                .map(|(needle, vendor)| CdnSignature {
                    needle: (*needle).to_string(),
                    vendor: (*vendor).to_string(),
                })
                .collect(),
        }
    }
}

fn owned(table: &[&str]) -> Vec<String> {
    table.iter().map(|entry| (*entry).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_populated() {
        let rules = RuleSet::builtin();
        assert_eq!(rules.tracker_domains.len(), 7);
        assert_eq!(rules.malicious_patterns.len(), 8);
        assert_eq!(rules.outdated_libraries.len(), 10);
        assert!(rules.suspicious_keywords.len() > 20);
        assert!(!rules.cdn_signatures.is_empty());
    }

    #[test]
    fn tracker_table_is_subset_of_suspicious_coverage() {
        // The narrow tracker table and the broad keyword list are maintained
        // independently; this pins the invariant that the big three stay in
        // both so a tracker hit always carries the keyword tag as well.
        let rules = RuleSet::builtin();
        for domain in ["googletagmanager", "doubleclick", "facebook.net"] {
            assert!(rules.suspicious_keywords.iter().any(|k| k == domain));
            assert!(rules.tracker_domains.iter().any(|d| d.contains(domain)));
        }
    }
}
