//! Presenter console
//!
//! A second-screen view that drives a running player over the control
//! socket. Shows the slide list, current and next slide previews, speaker
//! notes and a countdown timer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tracing::warn;

use super::app::status_footer::{render_footer, render_status_bar};
use super::app::App;
use super::theme::Theme;
use super::timer::{parse_clock, CountdownTimer};
use super::ui::{centered_fixed, console_layout};
use super::widgets::CanvasView;
use crate::canvas::{Renderable, Size};
use crate::control::Client;
use crate::deck::{Deck, HandoutView, SlideTheme, SlideView};
use crate::player::PositionReport;

/// Screen size assumed until the player reports its own.
const DEFAULT_SCREEN: Size = Size::new(80, 25);

/// Console UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Editing the timer value
    SetTimer,
    Help,
}

/// What a key press asks of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Next,
    Prev,
    Jump(usize),
    Quit,
}

/// Everything the console shows, independent of the terminal.
#[derive(Debug, Clone)]
pub struct ConsoleState {
    titles: Vec<String>,
    position: PositionReport,
    screen: Size,
    selected: usize,
    mode: Mode,
    timer: CountdownTimer,
    timer_default: Duration,
    timer_entry: String,
    message: Option<String>,
}

impl ConsoleState {
    pub fn new(titles: Vec<String>, timer_minutes: u64) -> Self {
        let timer_default = Duration::from_secs(timer_minutes * 60);
        Self {
            titles,
            position: PositionReport::default(),
            screen: DEFAULT_SCREEN,
            selected: 0,
            mode: Mode::Normal,
            timer: CountdownTimer::new(timer_default),
            timer_default,
            timer_entry: String::new(),
            message: None,
        }
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn set_titles(&mut self, titles: Vec<String>) {
        self.titles = titles;
        self.selected = self.selected.min(self.titles.len().saturating_sub(1));
    }

    pub fn position(&self) -> &PositionReport {
        &self.position
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn screen(&self) -> Size {
        self.screen
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Take a position reported by the player. Moving to another slide
    /// also moves the list selection.
    pub fn apply_position(&mut self, report: PositionReport) {
        if report.index != self.position.index {
            if let Some(index) = report.index {
                self.selected = index;
            }
        }
        self.position = report;
        self.message = None;
    }

    pub fn apply_screen(&mut self, size: Size) {
        self.screen = size;
    }

    /// `current / total`, 1-based; `0 / n` before the first slide.
    pub fn position_text(&self) -> String {
        format!("{} / {}", self.position.wire_index() + 1, self.titles.len())
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Action {
        if key.kind == KeyEventKind::Release {
            return Action::None;
        }
        match self.mode {
            Mode::Normal => self.handle_normal_key(key, now),
            Mode::SetTimer => {
                self.handle_timer_key(key, now);
                Action::None
            }
            Mode::Help => {
                self.mode = Mode::Normal;
                Action::None
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent, now: Instant) -> Action {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                self.timer.toggle(now);
                Action::None
            }
            KeyCode::Right | KeyCode::PageDown => Action::Next,
            KeyCode::Left | KeyCode::PageUp => Action::Prev,
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                if self.selected + 1 < self.titles.len() {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::Enter if !self.titles.is_empty() => Action::Jump(self.selected),
            KeyCode::Char('t') => {
                self.timer_entry = short_clock(self.timer_default);
                self.mode = Mode::SetTimer;
                Action::None
            }
            KeyCode::Char('?') => {
                self.mode = Mode::Help;
                Action::None
            }
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }

    fn handle_timer_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                match parse_clock(&self.timer_entry) {
                    Some(total) => {
                        self.timer.set(total, now);
                        self.message = None;
                    }
                    None => self.message = Some(format!("Invalid time '{}'", self.timer_entry)),
                }
                self.mode = Mode::Normal;
            }
            KeyCode::Backspace => {
                self.timer_entry.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == ':' => self.timer_entry.push(c),
            _ => {}
        }
    }
}

/// `MM:SS`, hours folded into minutes.
fn short_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Presenter console application.
pub struct ConsoleApp {
    app: App,
    client: Client,
    state: ConsoleState,
    deck: Option<Deck>,
    slide_theme: SlideTheme,
    theme: Theme,
    poll_interval: Duration,
}

impl ConsoleApp {
    /// Connect the console to a player. With a deck, the console shows
    /// previews and notes; without one only titles are available.
    pub fn new(
        client: Client,
        deck: Option<Deck>,
        light: bool,
        timer_minutes: u64,
        poll_interval: Duration,
    ) -> Result<Self> {
        let app = App::new(Duration::from_millis(100))?;
        let titles = deck.as_ref().map(Deck::titles).unwrap_or_default();
        Ok(Self {
            app,
            client,
            state: ConsoleState::new(titles, timer_minutes),
            deck,
            slide_theme: SlideTheme::select(light),
            theme: Theme::select(light),
            poll_interval,
        })
    }

    /// Run until the presenter quits.
    #[cfg(not(tarpaulin_include))]
    pub fn run(&mut self) -> Result<()> {
        if self.deck.is_none() {
            match self.client.list() {
                Ok(titles) => self.state.set_titles(titles),
                Err(e) => self.report(e),
            }
        }
        self.poll();
        let mut last_poll = Instant::now();

        loop {
            let state = &self.state;
            let deck = self.deck.as_ref();
            let (slide_theme, theme) = (&self.slide_theme, &self.theme);
            self.app
                .draw(|frame| render_console(frame, state, deck, slide_theme, theme))?;

            if let Some(Event::Key(key)) = self.app.next_event()? {
                let action = self.state.handle_key(key, Instant::now());
                if action == Action::Quit {
                    break;
                }
                self.perform(action);
            }

            if last_poll.elapsed() >= self.poll_interval {
                self.poll();
                last_poll = Instant::now();
            }
        }
        self.app.restore()
    }

    fn perform(&mut self, action: Action) {
        let result = match action {
            Action::Next => self.client.next(),
            Action::Prev => self.client.prev(),
            Action::Jump(index) => self.client.jump(index),
            Action::None | Action::Quit => return,
        };
        match result {
            Ok(report) => self.state.apply_position(report),
            Err(e) => self.report(e),
        }
    }

    fn poll(&mut self) {
        if let Err(e) = self.client.size().map(|size| self.state.apply_screen(size)) {
            self.report(e);
            return;
        }
        match self.client.current() {
            Ok(report) => self.state.apply_position(report),
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, error: anyhow::Error) {
        warn!(error = %error, "presenter request failed");
        self.state.set_message(error.to_string());
    }
}

/// Draw the whole console for `state`.
pub fn render_console(
    frame: &mut Frame,
    state: &ConsoleState,
    deck: Option<&Deck>,
    slide_theme: &SlideTheme,
    theme: &Theme,
) {
    let area = frame.area();
    let screen = state.screen();
    let (left, right, footer) = console_layout(area, screen.cols as u16);

    let notes = deck
        .zip(state.position().index)
        .and_then(|(deck, index)| deck.get(index))
        .filter(|slide| slide.handout().is_some());
    let list_area = match notes {
        Some(slide) => {
            let natural = HandoutView::new(slide, slide_theme).natural_size();
            let height = (natural.rows as u16 + 2).min(left.height / 2);
            let notes_area = Rect::new(left.x, left.bottom() - height, left.width, height);
            let inner = bordered(frame, notes_area, " Notes ", theme);
            let canvas = HandoutView::new(slide, slide_theme).render(Size::new(inner.width as usize, inner.height as usize));
            frame.render_widget(CanvasView::new(&canvas), inner);
            Rect::new(left.x, left.y, left.width, left.height - height)
        }
        None => left,
    };
    render_slide_list(frame, list_area, state, theme);

    match deck {
        Some(deck) => render_previews(frame, right, state, deck, slide_theme, theme),
        None => {
            let inner = bordered(frame, right, " Preview ", theme);
            let hint = Paragraph::new("Open the console with the deck file to see previews")
                .style(theme.text_secondary_style())
                .wrap(Wrap { trim: true });
            frame.render_widget(hint, inner);
        }
    }

    let timer = state.timer().display(Instant::now());
    render_status_bar(frame, footer, theme, &state.position_text(), state.message(), &timer);

    match state.mode() {
        Mode::SetTimer => render_timer_dialog(frame, area, &state.timer_entry, theme),
        Mode::Help => render_help(frame, area, theme),
        Mode::Normal => {}
    }
}

fn bordered(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.text_secondary_style())
        .title(title.to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn render_slide_list(frame: &mut Frame, area: Rect, state: &ConsoleState, theme: &Theme) {
    let current = state.position().index;
    let items: Vec<ListItem> = state
        .titles()
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let mut style = theme.text_style();
            if Some(i) == current {
                style = theme.accent_style().add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(Span::styled(format!("{:<2} {}", i + 1, title), style)))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Slides "))
        .highlight_style(theme.highlight_style());
    let mut list_state = ListState::default();
    if !state.titles().is_empty() {
        list_state.select(Some(state.selected()));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_previews(
    frame: &mut Frame,
    area: Rect,
    state: &ConsoleState,
    deck: &Deck,
    slide_theme: &SlideTheme,
    theme: &Theme,
) {
    let screen = state.screen();
    let height = (screen.rows as u16).saturating_add(2);
    let current_area = Rect::new(area.x, area.y, area.width, height.min(area.height));
    let next_area = Rect::new(
        area.x,
        area.y + current_area.height,
        area.width,
        height.min(area.height - current_area.height),
    );

    let position = state.position();
    let current = position.index.and_then(|i| deck.get(i));
    let next = deck.get(position.index.map_or(0, |i| i + 1));

    for (slide, depth, region, title) in [
        (current, position.depth, current_area, " Current "),
        (next, 0, next_area, " Next "),
    ] {
        if region.height == 0 {
            continue;
        }
        let inner = bordered(frame, region, title, theme);
        if let Some(slide) = slide {
            let canvas = SlideView::new(slide, depth, slide_theme).render(screen);
            frame.render_widget(CanvasView::new(&canvas), inner);
        }
    }
}

fn render_timer_dialog(frame: &mut Frame, area: Rect, entry: &str, theme: &Theme) {
    let modal = centered_fixed(30, 6, area);
    frame.render_widget(Clear, modal);
    let lines = vec![
        Line::from(vec![
            Span::styled("Timer: ", theme.text_style()),
            Span::styled(entry.to_string(), theme.accent_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Enter: set | Esc: cancel", theme.text_secondary_style())),
    ];
    let dialog = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.accent_style())
            .title(" Timer "),
    );
    frame.render_widget(dialog, modal);
}

fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let modal = centered_fixed(40, 9, area);
    frame.render_widget(Clear, modal);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent_style())
        .title(" Help ");
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let rows = [
        ("→ / PgDn", "next"),
        ("← / PgUp", "previous"),
        ("↑ / ↓ Enter", "jump to slide"),
        ("space / x", "start or stop timer"),
        ("t", "set timer"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{:<12}", key), theme.accent_style()),
                Span::styled(desc.to_string(), theme.text_style()),
            ])
        })
        .collect();
    let hint_area = Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1.min(inner.height));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
    render_footer(frame, hint_area, theme, &[("any key", "close")]);
}
