//! # Accordion Demo
//!
//! A FAQ built from a single [`Accordion`]:
//! - single or multiple mode, chosen on the command line
//! - optional controlled mode, where this app owns the open state and feeds
//!   each `Changed` notification back
//! - keyboard navigation with wraparound and an animated open/close
//!
//! Run with: `cargo run --example accordion -- --multiple --log-file pleat.log`

use clap::Parser;
use pleat::crossterm::event::{self, KeyCode, KeyModifiers};
use pleat::ratatui::layout::{Constraint, Layout};
use pleat::ratatui::style::{Color, Style};
use pleat::ratatui::text::{Line, Span};
use pleat::ratatui::widgets::{Block, Borders, Paragraph};
use pleat::ratatui::{DefaultTerminal, Frame};
use pleat::widgets::accordion::{self, Accordion, AccordionOptions};
use pleat::widgets::key::KeyMap;
use pleat::widgets::{AccordionItem, AccordionState, IconPosition};
use pleat::{Command, Component, TerminalEvent};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "accordion", about = "Collapsible FAQ panels in the terminal")]
struct Args {
    /// Allow several panels open at once.
    #[arg(long)]
    multiple: bool,

    /// Panel opened at start (single mode only).
    #[arg(long)]
    initial_item: Option<usize>,

    /// Let the app own the open state instead of the accordion.
    #[arg(long)]
    controlled: bool,

    /// Draw the chevron on the right edge.
    #[arg(long)]
    icon_right: bool,

    /// Keep the chevron pointing right while a panel is open.
    #[arg(long)]
    no_icon_rotation: bool,

    /// Open/close animation length in milliseconds.
    #[arg(long, default_value_t = 200)]
    transition_ms: u64,

    /// Write debug logs to this file (the terminal is busy drawing).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

struct App {
    faq: Accordion,
    controlled: bool,
    changes: usize,
    last_state: Option<AccordionState>,
}

enum Msg {
    Faq(accordion::Message),
    Quit,
}

impl App {
    fn new(args: &Args) -> Result<Self, Box<dyn std::error::Error>> {
        let mut options = AccordionOptions::default()
            .with_id("faq")
            .with_multiple(args.multiple)
            .with_transition_duration(Duration::from_millis(args.transition_ms))
            .with_disable_icon_rotation(args.no_icon_rotation)
            .with_icon_position(if args.icon_right {
                IconPosition::Right
            } else {
                IconPosition::Left
            });
        if let Some(index) = args.initial_item {
            options = options.with_initial_item(index);
        }
        if args.controlled {
            options = options.with_state(AccordionState::empty(args.multiple));
        }

        let mut faq = Accordion::new(items(), options)?
            .with_block(Block::default().borders(Borders::ALL).title(" FAQ "));
        faq.focus();
        Ok(Self {
            faq,
            controlled: args.controlled,
            changes: 0,
            last_state: None,
        })
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Faq(accordion::Message::Changed(state)) => {
                self.changes += 1;
                tracing::info!(?state, "faq changed");
                if self.controlled {
                    if let Err(err) = self.faq.set_state(state.clone()) {
                        tracing::warn!(%err, "rejected state");
                    }
                }
                self.last_state = Some(state);
                Command::none()
            }
            Msg::Faq(m) => self.faq.update(m).map(Msg::Faq),
            Msg::Quit => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [body, status, help] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.faq.view(frame, body);

        let mode = if self.controlled { "controlled" } else { "uncontrolled" };
        let last = match &self.last_state {
            Some(state) => format!("{:?}", state.open_indices()),
            None => "-".to_string(),
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!(" {mode} "),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                ),
                Span::raw(format!(" changes: {}  last: {last}", self.changes)),
            ])),
            status,
        );

        let mut help_line = self.faq.key_bindings().help_line();
        help_line.spans.push(Span::raw("  "));
        help_line.spans.push(Span::styled("q", Style::default().fg(Color::Cyan)));
        help_line.spans.push(Span::raw(" quit"));
        frame.render_widget(Paragraph::new(help_line), help);
    }
}

fn items() -> Vec<AccordionItem> {
    vec![
        AccordionItem::new(
            "How long does shipping take?",
            "Orders leave the warehouse within two business days.\n\
             Tracking numbers arrive by email.",
        ),
        AccordionItem::new(
            "Can I return an item?",
            "Returns are free for 30 days.\nItems must be unused and in their original packaging.",
        ),
        AccordionItem::new(
            "Is there a warranty?",
            "Two years on all hardware, covering manufacturing defects.",
        ),
        AccordionItem::new(
            "Do you ship internationally?",
            "Yes, to 40 countries.\nDuties are calculated at checkout.\nDelivery takes 5-10 days.",
        ),
    ]
}

fn map_event(ev: TerminalEvent) -> Option<Msg> {
    let key = ev.key_press()?;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Msg::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Msg::Quit),
        _ => Some(Msg::Faq(accordion::Message::KeyPress(key))),
    }
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> std::io::Result<()> {
    loop {
        terminal.draw(|frame| app.view(frame))?;

        let timeout = if app.faq.is_animating(Instant::now()) {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(250)
        };
        if !event::poll(timeout)? {
            continue;
        }
        let Some(msg) = map_event(TerminalEvent::from(event::read()?)) else {
            continue;
        };
        if matches!(msg, Msg::Quit) {
            return Ok(());
        }

        // Deliver notifications until the app stops producing new ones
        let mut pending = vec![msg];
        while let Some(msg) = pending.pop() {
            let mut produced = app.update(msg).into_messages();
            produced.reverse();
            pending.extend(produced);
        }
    }
}

fn init_logging(path: Option<&PathBuf>) -> std::io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let mut app = App::new(&args)?;
    let mut terminal = pleat::ratatui::init();
    let result = run(&mut terminal, &mut app);
    pleat::ratatui::restore();
    result?;

    println!("{} change(s)", app.changes);
    Ok(())
}
