// src/ui/widgets/report_view.rs

use crate::app::{App, AppState};
use crate::core::knowledge_base;
use crate::core::models::Severity;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Renders the main report panel: the findings list on top, and a detail
/// pane below that explains the selected finding and shows the suggested
/// Content-Security-Policy.
pub fn render_report_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Analysis Report (Navigate with ↑ ↓)");

    if !matches!(app.state, AppState::Finished) {
        let content = match app.state {
            AppState::Idle => {
                Paragraph::new("Scan results will appear here...").alignment(Alignment::Center)
            }
            AppState::Scanning => Paragraph::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(Color::Cyan)),
                Span::raw("Scanning... Please wait."),
            ]))
            .alignment(Alignment::Center),
            _ => Paragraph::new(""),
        };
        frame.render_widget(content.block(main_block), area);
        return;
    }

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(0)])
        .split(inner_area);

    let items: Vec<ListItem> = app
        .all_findings
        .iter()
        .map(|finding| {
            let Some(detail) = knowledge_base::get_finding_detail(finding.code) else {
                return ListItem::new(Line::from(finding.code));
            };

            let category_prefix = format!("[{}] ", detail.category);
            let title_style = match detail.severity {
                Severity::Critical => Style::default().fg(Color::Red),
                Severity::Warning => Style::default().fg(Color::Yellow),
                Severity::Info => Style::default().fg(Color::Cyan),
            };

            let line = Line::from(vec![
                Span::styled(category_prefix, Style::default().fg(Color::DarkGray)),
                Span::styled(detail.title, title_style),
                Span::styled(
                    format!("  {}", finding.subject),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let findings_list = List::new(items)
        .block(Block::default())
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(findings_list, chunks[0], &mut app.findings_state);

    let detail_block = Block::default().borders(Borders::TOP).title("Details");
    let mut text = Vec::new();

    if let Some(selected_index) = app.findings_state.selected() {
        if let Some(selected_finding) = app.all_findings.get(selected_index) {
            if let Some(detail) = knowledge_base::get_finding_detail(selected_finding.code) {
                text.push(Line::from(""));
                text.push(Line::from("WHAT IT IS:".yellow().bold()));
                text.push(Line::from(detail.description));
                text.push(Line::from(""));
                text.push(Line::from("HOW TO FIX:".yellow().bold()));
                text.push(Line::from(detail.remediation));
                text.push(Line::from(""));
                text.push(Line::from(vec![
                    Span::styled("AFFECTED: ", Style::new().yellow().bold()),
                    Span::raw(selected_finding.subject.clone()),
                ]));
            }
        }
    } else {
        text.push(Line::from(""));
        text.push(Line::from(
            "✓ EXCELLENT SECURITY POSTURE".bold().fg(Color::Green),
        ));
        text.push(Line::from(""));
        text.push(Line::from(
            "No issues were found during the scan of this page.",
        ));
    }

    // The synthesized policy is always visible under the finding details.
    if let Some(report) = &app.report {
        if !report.suggested_csp.is_empty() {
            text.push(Line::from(""));
            text.push(Line::from("SUGGESTED CSP:".yellow().bold()));
            for policy_line in report.suggested_csp.lines() {
                text.push(Line::from(Span::styled(
                    policy_line.to_string(),
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
    }

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(detail_block);
    frame.render_widget(paragraph, chunks[1]);
}
