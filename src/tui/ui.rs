use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::constants::{UI_REFRESH_INTERVAL_MS, UI_SCROLL_LINES};
use crate::runtime::SendOutcome;
use crate::tui::input::{InputAction, InputHandler};
use crate::tui::render::render_ui;
use crate::tui::App;

/// Run the terminal UI
pub async fn run_ui(mut app: App) -> Result<()> {
    // Check if we have an interactive terminal
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        eprintln!("❌ kgchat requires an interactive terminal.");
        eprintln!("   Use --prompt for one-shot queries from scripts.");
        return Err(anyhow::anyhow!("No interactive terminal available"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Completed sends come back from spawned tasks through this channel
    let (tx, mut rx) = mpsc::unbounded_channel::<SendOutcome>();

    let res = run_app(&mut terminal, &mut app, tx, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tx: mpsc::UnboundedSender<SendOutcome>,
    rx: &mut mpsc::UnboundedReceiver<SendOutcome>,
) -> Result<()> {
    let input = InputHandler::new();

    while app.running {
        // Every frame renders from a fresh snapshot
        let view = app.view();
        terminal.draw(|f| render_ui(f, app, &view))?;

        if event::poll(Duration::from_millis(UI_REFRESH_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_action(app, input.handle_key(key), &tx);
                }
            }
        }

        // Apply finished sends
        while let Ok(outcome) = rx.try_recv() {
            app.handle_outcome(outcome);
        }
    }

    Ok(())
}

fn handle_action(app: &mut App, action: InputAction, tx: &mpsc::UnboundedSender<SendOutcome>) {
    match action {
        InputAction::Submit => {
            if let Some(pending) = app.submit() {
                let controller = app.controller().clone();
                let tx = tx.clone();
                debug!("spawning {} for {}", pending.request_id, pending.session_id);

                // The task owns the captured session id; selection changes
                // made meanwhile do not affect where the reply lands
                tokio::spawn(async move {
                    let outcome = controller.complete_send(pending).await;
                    let _ = tx.send(outcome);
                });
            }
        }
        InputAction::Insert(c) => app.input.push(c),
        InputAction::Delete => {
            app.input.pop();
        }
        InputAction::NewSession => app.new_session(),
        InputAction::NextSession => app.select_next(),
        InputAction::PreviousSession => app.select_previous(),
        InputAction::ScrollUp => app.scroll_up(UI_SCROLL_LINES),
        InputAction::ScrollDown => app.scroll_down(UI_SCROLL_LINES),
        InputAction::ToggleSidebar => app.toggle_sidebar(),
        InputAction::Quit => app.quit(),
        InputAction::None => {}
    }
}
