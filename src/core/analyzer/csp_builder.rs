// src/core/analyzer/csp_builder.rs

use std::collections::BTreeSet;
use url::Url;

/// Stand-in token emitted instead of enumerating every tracker host.
pub const ANALYTICS_PLACEHOLDER: &str = "analytics-src";
/// Token emitted when the page carries scripts that should be blocked outright.
pub const BLOCK_ALL_TOKEN: &str = "'none'";

/// Proposes a minimal, additive Content-Security-Policy for the page.
///
/// The allow-set is the distinct hosts of every external script in the
/// inventory. Trackers collapse into the single `analytics-src` placeholder
/// rather than one entry per vendor; malicious findings add the literal
/// `'none'` token. Real browsers reject `'none'` combined with host tokens on
/// one line; the shape is kept as-is for parity with existing reports.
pub fn build_suggested_csp(inventory: &[String], has_trackers: bool, has_malicious: bool) -> String {
    // BTreeSet keeps the emitted policy stable across runs.
    let mut sources: BTreeSet<String> = BTreeSet::new();

    for entry in inventory {
        let Ok(parsed) = Url::parse(entry) else {
            continue;
        };
        let Some(host) = parsed.host_str() else {
            continue;
        };
        let host = match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        sources.insert(host);
    }

    if has_trackers {
        sources.insert(ANALYTICS_PLACEHOLDER.to_string());
    }
    if has_malicious {
        sources.insert(BLOCK_ALL_TOKEN.to_string());
    }

    let mut policy = String::from("default-src 'self';\n");
    if !sources.is_empty() {
        policy.push_str("script-src 'self' ");
        policy.push_str(&sources.into_iter().collect::<Vec<_>>().join(" "));
        policy.push(';');
    }
    policy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_external_host_yields_the_two_line_policy() {
        let inventory = vec!["https://cdn.example.com/app.js".to_string()];
        assert_eq!(
            build_suggested_csp(&inventory, false, false),
            "default-src 'self';\nscript-src 'self' cdn.example.com;"
        );
    }

    #[test]
    fn no_external_scripts_yields_only_default_src() {
        assert_eq!(build_suggested_csp(&[], false, false), "default-src 'self';\n");
    }

    #[test]
    fn duplicate_hosts_collapse_and_sort() {
        let inventory = vec![
            "https://b.example.com/one.js".to_string(),
            "https://a.example.com/two.js".to_string(),
            "https://b.example.com/three.js".to_string(),
        ];
        assert_eq!(
            build_suggested_csp(&inventory, false, false),
            "default-src 'self';\nscript-src 'self' a.example.com b.example.com;"
        );
    }

    #[test]
    fn explicit_ports_are_preserved() {
        let inventory = vec!["https://cdn.example.com:8443/app.js".to_string()];
        assert_eq!(
            build_suggested_csp(&inventory, false, false),
            "default-src 'self';\nscript-src 'self' cdn.example.com:8443;"
        );
    }

    #[test]
    fn trackers_collapse_into_the_analytics_placeholder() {
        let inventory = vec!["https://www.googletagmanager.com/gtag/js".to_string()];
        let policy = build_suggested_csp(&inventory, true, false);
        assert!(policy.contains(ANALYTICS_PLACEHOLDER));
        assert!(policy.contains("www.googletagmanager.com"));
    }

    #[test]
    fn malicious_findings_add_the_none_token() {
        let inventory = vec!["https://bad.example.com/evil.js".to_string()];
        let policy = build_suggested_csp(&inventory, false, true);
        assert_eq!(
            policy,
            "default-src 'self';\nscript-src 'self' 'none' bad.example.com;"
        );
    }
}
