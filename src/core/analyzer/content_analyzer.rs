// src/core/analyzer/content_analyzer.rs

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::core::models::{FormFinding, IframeFinding};

/// The `action` recorded for forms that declare none.
pub const EMPTY_FORM_ACTION: &str = "[empty]";

/// Decides whether an embedded frame belongs to the page's own site.
///
/// The shipped policy is substring containment on hostnames, which is
/// imprecise on subdomains, punycode and lookalike domains. It sits behind
/// this trait so a stricter suffix-matching policy can be swapped in without
/// touching the iframe classifier.
pub trait HostMatcher {
    fn same_site(&self, page_host: &str, embed_host: &str) -> bool;
}

/// Default matcher: the embed is same-site when its host contains the page host.
pub struct ContainmentHostMatcher;

impl HostMatcher for ContainmentHostMatcher {
    fn same_site(&self, page_host: &str, embed_host: &str) -> bool {
        embed_host.contains(page_host)
    }
}

/// Flags forms that declare no action, or submit over plaintext HTTP.
/// Forms with an HTTPS or relative action produce no finding.
pub fn analyze_forms(document: &Html) -> Vec<FormFinding> {
    let mut findings = Vec::new();
    let selector = match Selector::parse("form") {
        Ok(selector) => selector,
        Err(_) => return findings,
    };

    for element in document.select(&selector) {
        let action = element.value().attr("action").unwrap_or_default();
        if action.is_empty() {
            findings.push(FormFinding {
                action: EMPTY_FORM_ACTION.to_string(),
                warning: "Form has no action".to_string(),
            });
        } else if action.starts_with("http:") {
            findings.push(FormFinding {
                action: action.to_string(),
                warning: "Insecure form action using HTTP".to_string(),
            });
        }
    }
    findings
}

/// Flags iframes embedding content from a different site. Only absolute
/// http/https sources are considered; relative embeds are same-site by
/// construction.
pub fn analyze_iframes(
    document: &Html,
    page_host: &str,
    matcher: &dyn HostMatcher,
) -> Vec<IframeFinding> {
    let mut findings = Vec::new();
    let selector = match Selector::parse("iframe") {
        Ok(selector) => selector,
        Err(_) => return findings,
    };

    for element in document.select(&selector) {
        let src = element.value().attr("src").unwrap_or_default();
        if src.is_empty() {
            continue;
        }
        let Ok(parsed) = Url::parse(src) else {
            continue;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            continue;
        }
        let Some(embed_host) = parsed.host_str() else {
            continue;
        };
        if !matcher.same_site(page_host, embed_host) {
            debug!(src, "Cross-origin iframe found.");
            findings.push(IframeFinding {
                src: src.to_string(),
                warning: "Third-party iframe from external domain".to_string(),
            });
        }
    }
    findings
}

/// Collects every plaintext `src`/`href` reference in the document,
/// regardless of element type. Mixed content only exists relative to an
/// encrypted page, so a plaintext page yields nothing.
pub fn detect_mixed_content(document: &Html, page_is_encrypted: bool) -> Vec<String> {
    let mut mixed = Vec::new();
    if !page_is_encrypted {
        return mixed;
    }
    let selector = match Selector::parse("[src], [href]") {
        Ok(selector) => selector,
        Err(_) => return mixed,
    };

    for element in document.select(&selector) {
        let value = element
            .value()
            .attr("src")
            .or_else(|| element.value().attr("href"));
        if let Some(value) = value {
            if value.starts_with("http:") {
                mixed.push(value.to_string());
            }
        }
    }
    mixed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forms_without_action_or_with_plaintext_action_are_flagged() {
        let document = Html::parse_document(
            r#"<form></form>
               <form action="http://example.com/login"></form>
               <form action="https://example.com/login"></form>
               <form action="/login"></form>"#,
        );
        let findings = analyze_forms(&document);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].action, EMPTY_FORM_ACTION);
        assert_eq!(findings[0].warning, "Form has no action");
        assert_eq!(findings[1].action, "http://example.com/login");
        assert_eq!(findings[1].warning, "Insecure form action using HTTP");
    }

    #[test]
    fn cross_origin_iframe_is_flagged() {
        let document =
            Html::parse_document(r#"<iframe src="https://evil.example.net/x"></iframe>"#);
        let findings = analyze_iframes(&document, "mysite.com", &ContainmentHostMatcher);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].src, "https://evil.example.net/x");
    }

    #[test]
    fn same_site_and_subdomain_iframes_pass() {
        let document = Html::parse_document(
            r#"<iframe src="https://mysite.com/widget"></iframe>
               <iframe src="https://cdn.mysite.com/player"></iframe>"#,
        );
        let findings = analyze_iframes(&document, "mysite.com", &ContainmentHostMatcher);
        assert!(findings.is_empty());
    }

    #[test]
    fn relative_and_non_http_iframes_are_ignored() {
        let document = Html::parse_document(
            r#"<iframe src="/local"></iframe>
               <iframe src="about:blank"></iframe>
               <iframe></iframe>"#,
        );
        let findings = analyze_iframes(&document, "mysite.com", &ContainmentHostMatcher);
        assert!(findings.is_empty());
    }

    #[test]
    fn mixed_content_spans_element_types() {
        let document = Html::parse_document(
            r#"<img src="http://cdn.example.com/logo.png">
               <link href="http://cdn.example.com/style.css">
               <a href="https://example.com/safe">ok</a>"#,
        );
        let mixed = detect_mixed_content(&document, true);
        assert_eq!(
            mixed,
            vec![
                "http://cdn.example.com/logo.png".to_string(),
                "http://cdn.example.com/style.css".to_string(),
            ]
        );
    }

    #[test]
    fn plaintext_pages_have_no_mixed_content() {
        let document = Html::parse_document(r#"<img src="http://cdn.example.com/logo.png">"#);
        assert!(detect_mixed_content(&document, false).is_empty());
    }
}
