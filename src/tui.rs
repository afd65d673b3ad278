#![cfg(feature = "tui")]

use crate::notify::{ChannelNotifier, Notification, Variant};
use crate::service::CodeGeneration;
use crate::session::{GenerationSession, SharedService};
use anyhow::Context;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

const TOAST_TTL: Duration = Duration::from_secs(4);

struct Toast {
    note: Notification,
    shown_at: Instant,
}

struct View {
    input: String,
    output: String,
    toast: Option<Toast>,
}

pub async fn run_tui(service: SharedService, provider: Option<String>) -> anyhow::Result<()> {
    let (notifier, mut note_rx) = ChannelNotifier::new();
    let session = Arc::new(GenerationSession::new(service, Arc::new(notifier)));

    session.load_providers().await;
    if let Some(id) = provider {
        session.set_selected_provider(id);
    }

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alt screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let (ev_tx, mut ev_rx) = mpsc::unbounded_channel::<Event>();
    std::thread::spawn(move || loop {
        match crossterm::event::read() {
            Ok(ev) => {
                if ev_tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let (res_tx, mut res_rx) = mpsc::unbounded_channel::<Option<CodeGeneration>>();

    let mut view = View {
        input: String::new(),
        output: "Type a prompt and press Enter. Tab cycles providers. Commands: /reload, /provider <id>, /quit"
            .to_string(),
        toast: None,
    };

    let mut ticker = tokio::time::interval(Duration::from_millis(33));

    let res = loop {
        tokio::select! {
            _ = ticker.tick() => {
                if view.toast.as_ref().is_some_and(|t| t.shown_at.elapsed() > TOAST_TTL) {
                    view.toast = None;
                }
                if let Err(e) = draw(&mut terminal, &session, &view) {
                    break Err(e);
                }
            }
            Some(ev) = ev_rx.recv() => {
                if let Event::Key(key) = ev {
                    if handle_key(key, &mut view, &session, &res_tx) {
                        break Ok(());
                    }
                }
            }
            Some(note) = note_rx.recv() => {
                view.toast = Some(Toast { note, shown_at: Instant::now() });
            }
            Some(result) = res_rx.recv() => {
                if let Some(generation) = result {
                    view.output = generation.code;
                }
            }
        }
    };

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn local_note(view: &mut View, text: impl Into<String>) {
    view.toast = Some(Toast {
        note: Notification::new("codegen", text, Variant::Default),
        shown_at: Instant::now(),
    });
}

fn cycle_provider(session: &GenerationSession) {
    let providers = session.providers();
    if providers.is_empty() {
        return;
    }
    let selected = session.selected_provider();
    let next = providers
        .iter()
        .position(|p| p.id == selected)
        .map_or(0, |i| (i + 1) % providers.len());
    session.set_selected_provider(providers[next].id.clone());
}

fn handle_key(
    key: KeyEvent,
    view: &mut View,
    session: &Arc<GenerationSession>,
    res_tx: &mpsc::UnboundedSender<Option<CodeGeneration>>,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Tab => cycle_provider(session),
        KeyCode::Char(c) => view.input.push(c),
        KeyCode::Backspace => {
            view.input.pop();
        }
        KeyCode::Enter => {
            let msg = std::mem::take(&mut view.input);
            let trimmed = msg.trim();

            if trimmed == "/quit" {
                return true;
            }
            if trimmed == "/reload" {
                let session = session.clone();
                tokio::spawn(async move { session.load_providers().await });
                return false;
            }
            if trimmed == "/provider" {
                local_note(view, "usage: /provider <id>");
                return false;
            }
            if let Some(id) = trimmed.strip_prefix("/provider ") {
                session.set_selected_provider(id.trim());
                return false;
            }
            if trimmed.is_empty() {
                return false;
            }

            if session.is_busy() {
                local_note(view, "generation in progress; wait for completion");
                return false;
            }

            let session = session.clone();
            let tx = res_tx.clone();
            tokio::spawn(async move {
                let out = session.generate_code(msg).await;
                let _ = tx.send(out);
            });
        }
        _ => {}
    }

    false
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &GenerationSession,
    view: &View,
) -> anyhow::Result<()> {
    let providers = session.providers();
    let selected = session.selected_provider();
    let busy = session.is_busy();

    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(f.area());

        let mut bar: Vec<Span> = Vec::new();
        for p in &providers {
            let style = if p.id == selected {
                Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default()
            };
            bar.push(Span::styled(format!(" {} ", p.label()), style));
            bar.push(Span::raw(" "));
        }
        if !selected.is_empty() && !providers.iter().any(|p| p.id == selected) {
            bar.push(Span::styled(format!(" {selected} (unlisted) "), Style::default().add_modifier(Modifier::ITALIC)));
        }
        let bar = Paragraph::new(Line::from(bar))
            .block(Block::default().borders(Borders::ALL).title("providers"));

        let title = if busy { "codegen: generating..." } else { "codegen" };
        let output = Paragraph::new(view.output.clone())
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false });

        let toast = match &view.toast {
            Some(t) => {
                let style = match t.note.variant {
                    Variant::Default => Style::default().fg(Color::Green),
                    Variant::Destructive => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                };
                Paragraph::new(Line::styled(format!("{}: {}", t.note.title, t.note.description), style))
            }
            None => Paragraph::new(""),
        };

        let input_w = Paragraph::new(view.input.clone())
            .block(Block::default().borders(Borders::ALL).title("prompt"));

        f.render_widget(bar, chunks[0]);
        f.render_widget(output, chunks[1]);
        f.render_widget(toast, chunks[2]);
        f.render_widget(input_w, chunks[3]);

        let x = chunks[3].x + 1 + view.input.chars().count() as u16;
        let y = chunks[3].y + 1;
        f.set_cursor_position((x.min(chunks[3].x + chunks[3].width.saturating_sub(2)), y));
    })?;
    Ok(())
}
