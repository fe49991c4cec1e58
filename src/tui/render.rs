use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::session::{ChatView, MessageRole, Session};
use crate::tui::app::App;

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App, view: &ChatView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints::<&[Constraint]>(
            [
                Constraint::Length(2), // Header
                Constraint::Min(5),    // Main content
                Constraint::Length(3), // Input
                Constraint::Length(1), // Status bar
            ]
            .as_ref(),
        )
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let content_chunks = if app.show_sidebar {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints::<&[Constraint]>([Constraint::Percentage(25), Constraint::Percentage(75)].as_ref())
            .split(chunks[1])
    } else {
        std::rc::Rc::new([Rect::default(), chunks[1]])
    };

    if app.show_sidebar {
        render_sidebar(frame, content_chunks[0], app, view);
    }

    match view.current_session() {
        Some(session) => render_chat(frame, content_chunks[1], app, &session),
        None => render_welcome(frame, content_chunks[1]),
    }

    render_input(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);
}

/// Render the header
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            "Knowledge Graph Chat",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            app.state.config.gateway.base_url.as_str(),
            Style::default().fg(Color::Green),
        ),
    ];
    if let Some(user) = app.state.chat().user() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(user.name.as_str(), Style::default().fg(Color::Gray)));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

/// Render the session list
fn render_sidebar(frame: &mut Frame, area: Rect, app: &App, view: &ChatView) {
    let items: Vec<ListItem> = view
        .sessions()
        .iter()
        .map(|session| {
            let is_current = view.current.as_deref() == Some(session.id.as_str());
            let style = if is_current {
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let pending = app.controller().pending_for(&session.id);
            let mut title = vec![Span::styled(session.title.clone(), style)];
            if pending > 0 {
                title.push(Span::styled(" …", Style::default().fg(Color::Yellow)));
            }

            ListItem::new(vec![
                Line::from(title),
                Line::from(Span::styled(
                    format!(
                        "  {} | {} messages",
                        session.created_at.format("%Y-%m-%d"),
                        session.messages.len()
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Chats [{}] ", view.sessions().len()))
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(list, area);
}

/// Render the screen shown before any session exists or is selected
fn render_welcome(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to Knowledge Graph Chat",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press Ctrl+N to start a new chat, or just type a question."),
    ];
    let welcome = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default());
    frame.render_widget(welcome, area);
}

/// Render the transcript of the current session
fn render_chat(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
    let mut lines = Vec::new();

    for msg in session.messages.iter() {
        let role_color = match msg.role {
            MessageRole::User => Color::Blue,
            MessageRole::Bot => Color::Green,
        };

        let mut header = vec![Span::styled(
            format!("[{}]", msg.role.label()),
            Style::default().fg(role_color).add_modifier(Modifier::BOLD),
        )];
        if app.show_timestamps {
            header.push(Span::styled(
                format!(" {}", msg.timestamp.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(header));

        for line in msg.content.lines() {
            lines.push(Line::from(line.to_string()));
        }
        lines.push(Line::from(""));
    }

    if app.controller().pending_for(&session.id) > 0 {
        lines.push(Line::from(Span::styled(
            "Waiting for reply...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let block = Block::default()
        .title(format!(" {} ", session.title))
        .borders(Borders::NONE);
    // The title takes a row of its own, so size the scroll against the inner area
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chat = Paragraph::new(lines).wrap(Wrap { trim: false });
    let total = chat.line_count(inner.width).min(u16::MAX as usize) as u16;
    let top = scroll_top(total, inner.height, app.scroll_offset);

    frame.render_widget(chat.scroll((top, 0)), inner);
}

/// Render the input line
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Message "),
    );
    frame.render_widget(input, area);

    // Cursor after the typed text
    let cursor_x = area.x + 1 + app.input.chars().count() as u16;
    frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let pending = app.controller().pending_total();
    let mut spans = Vec::new();

    if pending > 0 {
        spans.push(Span::styled(
            format!(" {} pending ", pending),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
        spans.push(Span::raw(" "));
    }

    match &app.status_message {
        Some(status) => spans.push(Span::styled(status.as_str(), Style::default().fg(Color::Yellow))),
        None => spans.push(Span::styled(
            "Enter: send | Ctrl+N: new chat | Tab/Shift+Tab: switch | Ctrl+B: sidebar | Esc: quit",
            Style::default().fg(Color::DarkGray),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// First visible row so the transcript sticks to the bottom, minus the
/// user's scroll-back
fn scroll_top(total: u16, height: u16, scroll_back: u16) -> u16 {
    total.saturating_sub(height).saturating_sub(scroll_back)
}
