// src/main.rs

use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;

mod app;
mod core;
mod logging;
mod ui;

use app::{App, AppState};
use crate::core::analyzer::{AnalysisEngine, run_page_scan};
use crate::core::models::AnalysisReport;
use crate::core::rules::RuleSet;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut app = App::new();
    let engine = AnalysisEngine::new(RuleSet::builtin());
    let (tx, mut rx) = mpsc::channel(1);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(&mut app, &engine, &tx)?;
        }

        if let Ok(report) = rx.try_recv() {
            app.finish_scan(report);
        }
    }

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

/// Single event handler, dispatching on the application state.
fn handle_events(
    app: &mut App,
    engine: &AnalysisEngine,
    tx: &mpsc::Sender<AnalysisReport>,
) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            match app.state {
                AppState::Idle => handle_idle_input(app, engine, key.code, tx),
                AppState::Finished => handle_finished_input(app, key.code),
                AppState::Scanning => {
                    if key.code == KeyCode::Char('q') {
                        app.quit();
                    }
                }
            }
        }
    }
    Ok(())
}

/// Handles input while the app is waiting for a target URL.
fn handle_idle_input(
    app: &mut App,
    engine: &AnalysisEngine,
    key_code: KeyCode,
    tx: &mpsc::Sender<AnalysisReport>,
) {
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Enter => {
            if app.input.is_empty() {
                return;
            }
            app.state = AppState::Scanning;
            let raw_input = app.input.clone();
            // Bare domains get the encrypted scheme by default.
            let target = if !raw_input.starts_with("http://") && !raw_input.starts_with("https://")
            {
                format!("https://{}", raw_input)
            } else {
                raw_input
            };

            let tx_clone = tx.clone();
            let engine = engine.clone();
            tokio::spawn(async move {
                let report = run_page_scan(&target, &engine).await;
                let _ = tx_clone.send(report).await;
            });
        }
        _ => {}
    }
}

/// Handles input while the report is displayed.
fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('n') => app.reset(), // 'N' for a new scan
        KeyCode::Char('e') => app.export_report(),
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        _ => {}
    }
}
