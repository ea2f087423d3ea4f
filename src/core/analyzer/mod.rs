// src/core/analyzer/mod.rs

// Public interface of the analysis engine. Each sub-analyzer is a pure
// function over the parsed document and headers; this module wires them
// together and owns the aggregate report.
pub mod content_analyzer;
pub mod csp_builder;
pub mod entropy;
pub mod header_analyzer;
pub mod score;
pub mod script_analyzer;

use reqwest::header::HeaderMap;
use scraper::Html;
use tracing::{error, info};
use url::Url;

use crate::core::fetcher;
use crate::core::models::{AnalysisReport, CspDisposition};
use crate::core::rules::RuleSet;

use self::content_analyzer::ContainmentHostMatcher;

/// The page security analysis engine: a pure classification core over an
/// already-fetched document. Holds the immutable ruleset injected at
/// construction; no global state, no I/O.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    rules: RuleSet,
}

impl AnalysisEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Classifies one fetched page into the aggregate report.
    ///
    /// Deterministic: identical `(url, document, headers)` inputs yield
    /// byte-identical reports. Never fails on well-formed input; absent
    /// attributes are finding branches, not errors.
    pub fn analyze(&self, url: &Url, document: &Html, headers: &HeaderMap) -> AnalysisReport {
        let page_host = url.host_str().unwrap_or_default();
        let page_is_encrypted = url.scheme() == "https";

        let scripts = script_analyzer::analyze_scripts(document, url, &self.rules);
        let form_findings = content_analyzer::analyze_forms(document);
        let iframe_findings =
            content_analyzer::analyze_iframes(document, page_host, &ContainmentHostMatcher);
        let csp_status = header_analyzer::analyze_csp_header(headers);
        let mixed_content_elements =
            content_analyzer::detect_mixed_content(document, page_is_encrypted);
        let cdn_guess = header_analyzer::guess_cdn(headers, &scripts.inventory, &self.rules);

        let has_trackers = !scripts.tracker_sources.is_empty();
        let has_malicious = !scripts.malicious_sources.is_empty();
        let score = score::compute_score(
            has_malicious,
            !scripts.mixed_content_sources.is_empty(),
            csp_status.status == CspDisposition::Missing,
            has_trackers,
        );
        let suggested_csp =
            csp_builder::build_suggested_csp(&scripts.inventory, has_trackers, has_malicious);

        info!(url = %url, score, flagged = scripts.scripts.len(), "Page analysis finished.");

        AnalysisReport {
            url: url.to_string(),
            scripts: scripts.scripts,
            script_inventory: scripts.inventory,
            tracker_sources: scripts.tracker_sources,
            malicious_sources: scripts.malicious_sources,
            mixed_content_sources: scripts.mixed_content_sources,
            mixed_content_elements,
            form_findings,
            iframe_findings,
            csp_status,
            cdn_guess,
            score,
            suggested_csp,
            error: None,
        }
    }
}

/// Fetches `target` and runs the engine over the delivered document.
///
/// The fetch boundary is where failures stop: a page that was never retrieved
/// degrades into the error-shaped report instead of propagating upward.
pub async fn run_page_scan(target: &str, engine: &AnalysisEngine) -> AnalysisReport {
    info!(target, "Starting page scan.");
    match fetcher::fetch_page(target).await {
        Ok(page) => engine.analyze(&page.url, &page.document, &page.headers),
        Err(e) => {
            error!(target, error = %e, "Page fetch failed.");
            AnalysisReport::failure(target, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CspDisposition, ScriptReason};
    use reqwest::header::HeaderValue;

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(RuleSet::builtin())
    }

    fn analyze(html: &str, url: &str, headers: &HeaderMap) -> AnalysisReport {
        let document = Html::parse_document(html);
        engine().analyze(&Url::parse(url).unwrap(), &document, headers)
    }

    fn csp_headers(policy: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("content-security-policy", HeaderValue::from_static(policy));
        headers
    }

    #[test]
    fn plaintext_ad_script_on_encrypted_page() {
        // One http:// ad script on an https page with a strict CSP: the only
        // penalty left is the mixed-content one.
        let report = analyze(
            r#"<html><head>
                 <script src="http://ads.example.com/gtm.js"></script>
               </head></html>"#,
            "https://mysite.com/",
            &csp_headers("default-src 'self'"),
        );

        assert_eq!(
            report.mixed_content_sources,
            vec!["http://ads.example.com/gtm.js".to_string()]
        );
        assert!(report.tracker_sources.is_empty());
        let record = &report.scripts[0];
        assert!(record.reasons.contains(&ScriptReason::SuspiciousKeyword));
        assert_eq!(report.score, 80);
    }

    #[test]
    fn missing_csp_is_penalized_exactly_once() {
        let report = analyze(
            r#"<script src="https://www.googletagmanager.com/gtag/js"></script>"#,
            "https://mysite.com/",
            &HeaderMap::new(),
        );
        assert_eq!(report.csp_status.status, CspDisposition::Missing);
        // 100 - 20 (no CSP) - 10 (tracker); nothing compounds
        assert_eq!(report.score, 70);
    }

    #[test]
    fn weak_csp_counts_as_present_for_scoring() {
        let report = analyze(
            "<html></html>",
            "https://mysite.com/",
            &csp_headers("script-src 'unsafe-inline'"),
        );
        assert_eq!(report.csp_status.status, CspDisposition::PresentWeak);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn cross_origin_iframe_is_reported_and_same_site_is_not() {
        let report = analyze(
            r#"<iframe src="https://evil.example.net/x"></iframe>
               <iframe src="https://mysite.com/widget"></iframe>"#,
            "https://mysite.com/",
            &csp_headers("default-src 'self'"),
        );
        assert_eq!(report.iframe_findings.len(), 1);
        assert_eq!(report.iframe_findings[0].src, "https://evil.example.net/x");
    }

    #[test]
    fn suggested_csp_for_one_external_host() {
        let report = analyze(
            r#"<script src="https://cdn.example.com/app.js"></script>"#,
            "https://mysite.com/",
            &csp_headers("default-src 'self'"),
        );
        assert_eq!(
            report.suggested_csp,
            "default-src 'self';\nscript-src 'self' cdn.example.com;"
        );
    }

    #[test]
    fn worst_case_page_bottoms_out_additively() {
        // malicious + mixed content + no CSP + tracker: 100-40-20-20-10
        let report = analyze(
            r#"<script src="http://bad.mysite.com/evil.js"></script>
               <script src="https://www.google-analytics.com/analytics.js"></script>"#,
            "https://mysite.com/",
            &HeaderMap::new(),
        );
        assert_eq!(report.score, 10);
    }

    #[test]
    fn analysis_is_idempotent() {
        let html = r#"<script src="http://ads.example.com/track.js"></script>
                      <script>document.write('x');</script>
                      <form></form>"#;
        let document = Html::parse_document(html);
        let url = Url::parse("https://mysite.com/").unwrap();
        let headers = HeaderMap::new();

        let engine = engine();
        let first = engine.analyze(&url, &document, &headers);
        let second = engine.analyze(&url, &document, &headers);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn score_stays_within_bounds() {
        let pages = [
            "<html></html>",
            r#"<script src="http://bad.example.com/evil.js"></script>"#,
            r#"<script>eval(unescape('%61'));</script><form action="http://x.com/f"></form>"#,
        ];
        for html in pages {
            let report = analyze(html, "https://mysite.com/", &HeaderMap::new());
            assert!(report.score <= 100);
        }
    }

    #[test]
    fn injected_ruleset_overrides_the_builtin_tables() {
        let mut rules = RuleSet::builtin();
        rules.tracker_domains = vec!["my-custom-tracker.test".to_string()];

        let engine = AnalysisEngine::new(rules);
        let document = Html::parse_document(
            r#"<script src="https://my-custom-tracker.test/t.js"></script>
               <script src="https://www.googletagmanager.com/gtag/js"></script>"#,
        );
        let report = engine.analyze(
            &Url::parse("https://mysite.com/").unwrap(),
            &document,
            &HeaderMap::new(),
        );
        assert_eq!(
            report.tracker_sources,
            vec!["https://my-custom-tracker.test/t.js".to_string()]
        );
    }

    #[test]
    fn membership_lists_are_subsets_of_the_inventory() {
        let report = analyze(
            r#"<script src="http://ads.example.com/gtm.js"></script>
               <script src="https://www.doubleclick.net/tag.js"></script>
               <script src="https://bad.example.com/skimmer.js"></script>
               <script src="https://cdn.example.com/app.js"></script>"#,
            "https://mysite.com/",
            &HeaderMap::new(),
        );
        for source in report
            .tracker_sources
            .iter()
            .chain(&report.malicious_sources)
            .chain(&report.mixed_content_sources)
        {
            assert!(report.script_inventory.contains(source));
        }
        assert_eq!(report.script_inventory.len(), 4);
    }
}
