// src/app.rs

use chrono::Utc;
use ratatui::widgets::ListState;

use crate::core::analyzer::content_analyzer::EMPTY_FORM_ACTION;
use crate::core::knowledge_base;
use crate::core::models::{AnalysisReport, CspDisposition, ScriptReason, Severity};

pub enum ExportStatus {
    Idle,
    Success(String),
    Error(String),
}

pub enum AppState {
    Idle,
    Scanning,
    Finished,
}

/// One row of the findings list: the knowledge-base code plus the concrete
/// element (URL, form action, header note) the finding points at.
#[derive(Debug, Clone)]
pub struct FindingEntry {
    pub code: &'static str,
    pub subject: String,
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    pub score: u8,
    pub critical_issues: usize,
    pub warning_issues: usize,
    pub csp_ok: bool,
    pub no_mixed_content: bool,
    pub no_malicious: bool,
    pub no_trackers: bool,
}

pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    pub input: String,
    pub report: Option<AnalysisReport>,
    pub summary: ScanSummary,
    pub all_findings: Vec<FindingEntry>,
    pub findings_state: ListState,
    pub export_status: ExportStatus,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            state: AppState::Idle,
            input: String::new(),
            report: None,
            summary: ScanSummary::default(),
            all_findings: Vec::new(),
            findings_state: ListState::default(),
            export_status: ExportStatus::Idle,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input = String::new();
        self.report = None;
        self.summary = ScanSummary::default();
        self.all_findings = Vec::new();
        self.findings_state = ListState::default();
        self.export_status = ExportStatus::Idle;
    }

    pub fn select_next(&mut self) {
        if self.all_findings.is_empty() {
            return;
        }
        let next = match self.findings_state.selected() {
            Some(index) if index + 1 < self.all_findings.len() => index + 1,
            Some(index) => index,
            None => 0,
        };
        self.findings_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.all_findings.is_empty() {
            return;
        }
        let previous = match self.findings_state.selected() {
            Some(index) => index.saturating_sub(1),
            None => 0,
        };
        self.findings_state.select(Some(previous));
    }

    /// Installs a finished report: flattens it into the findings list and
    /// derives the summary panel data.
    pub fn finish_scan(&mut self, report: AnalysisReport) {
        self.all_findings = collect_findings(&report);
        self.summary = build_summary(&report, &self.all_findings);
        self.findings_state = ListState::default();
        if !self.all_findings.is_empty() {
            self.findings_state.select(Some(0));
        }
        self.report = Some(report);
        self.state = AppState::Finished;
    }

    /// Writes the current report as pretty JSON into the data directory.
    pub fn export_report(&mut self) {
        let Some(report) = &self.report else {
            return;
        };
        let directory = crate::logging::get_data_dir();
        if let Err(e) = std::fs::create_dir_all(&directory) {
            self.export_status = ExportStatus::Error(e.to_string());
            return;
        }
        let filename = format!("pageshield-report-{}.json", Utc::now().format("%Y%m%d-%H%M%S"));
        let path = directory.join(filename);
        match serde_json::to_string_pretty(report) {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => {
                    self.export_status = ExportStatus::Success(path.display().to_string());
                }
                Err(e) => self.export_status = ExportStatus::Error(e.to_string()),
            },
            Err(e) => self.export_status = ExportStatus::Error(e.to_string()),
        }
    }
}

/// Flattens a report into one list entry per finding, in report order.
fn collect_findings(report: &AnalysisReport) -> Vec<FindingEntry> {
    let mut findings = Vec::new();

    if let Some(message) = &report.error {
        findings.push(FindingEntry {
            code: "fetch-failed",
            subject: message.clone(),
        });
        return findings;
    }

    for record in &report.scripts {
        for reason in &record.reasons {
            let subject = match reason {
                ScriptReason::OutdatedLibrary { library, advisory } => {
                    format!("{} ({}: {})", record.source, library, advisory)
                }
                _ => record.source.clone(),
            };
            findings.push(FindingEntry {
                code: reason.code(),
                subject,
            });
        }
    }

    for form in &report.form_findings {
        let code = if form.action == EMPTY_FORM_ACTION {
            "form-action-missing"
        } else {
            "form-action-insecure"
        };
        findings.push(FindingEntry {
            code,
            subject: form.action.clone(),
        });
    }

    for iframe in &report.iframe_findings {
        findings.push(FindingEntry {
            code: "iframe-third-party",
            subject: iframe.src.clone(),
        });
    }

    for url in &report.mixed_content_elements {
        findings.push(FindingEntry {
            code: "mixed-content",
            subject: url.clone(),
        });
    }

    match report.csp_status.status {
        CspDisposition::Missing => findings.push(FindingEntry {
            code: "csp-missing",
            subject: report.csp_status.note.clone(),
        }),
        CspDisposition::PresentWeak => findings.push(FindingEntry {
            code: "csp-unsafe-inline",
            subject: report.csp_status.note.clone(),
        }),
        CspDisposition::PresentOk => {}
    }

    findings
}

fn build_summary(report: &AnalysisReport, findings: &[FindingEntry]) -> ScanSummary {
    let mut criticals = 0;
    let mut warnings = 0;
    for entry in findings {
        match knowledge_base::get_finding_detail(entry.code).map(|detail| detail.severity) {
            Some(Severity::Critical) => criticals += 1,
            Some(Severity::Warning) => warnings += 1,
            _ => {}
        }
    }

    ScanSummary {
        score: report.score,
        critical_issues: criticals,
        warning_issues: warnings,
        csp_ok: report.csp_status.status == CspDisposition::PresentOk,
        no_mixed_content: report.mixed_content_sources.is_empty()
            && report.mixed_content_elements.is_empty(),
        no_malicious: report.malicious_sources.is_empty(),
        no_trackers: report.tracker_sources.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analyzer::AnalysisEngine;
    use crate::core::rules::RuleSet;
    use reqwest::header::HeaderMap;
    use scraper::Html;
    use url::Url;

    fn report_for(html: &str) -> AnalysisReport {
        let engine = AnalysisEngine::new(RuleSet::builtin());
        let document = Html::parse_document(html);
        engine.analyze(
            &Url::parse("https://mysite.com/").unwrap(),
            &document,
            &HeaderMap::new(),
        )
    }

    #[test]
    fn findings_flatten_one_entry_per_reason() {
        let report = report_for(
            r#"<script src="https://www.hotjar.com/h.js"></script>
               <form action="http://x.example.com/f"></form>"#,
        );
        let findings = collect_findings(&report);
        let codes: Vec<&str> = findings.iter().map(|entry| entry.code).collect();
        // tracker script carries the suspicious-keyword tag too, then the
        // form and the missing CSP header follow in report order
        assert_eq!(
            codes,
            vec![
                "suspicious-keyword",
                "tracker",
                "form-action-insecure",
                "csp-missing"
            ]
        );
    }

    #[test]
    fn failed_scans_collapse_to_a_single_fetch_finding() {
        let report = AnalysisReport::failure("https://down.example.com", "timed out".to_string());
        let findings = collect_findings(&report);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, "fetch-failed");
        assert_eq!(findings[0].subject, "timed out");
    }

    #[test]
    fn summary_counts_follow_knowledge_base_severities() {
        let report = report_for(r#"<script src="https://bad.example.com/evil.js"></script>"#);
        let findings = collect_findings(&report);
        let summary = build_summary(&report, &findings);
        assert_eq!(summary.score, report.score);
        assert_eq!(summary.critical_issues, 1); // the malicious pattern
        assert!(!summary.no_malicious);
        assert!(summary.no_trackers);
    }
}
