pub mod helm;

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use chrono::Datelike;
use crossterm::{
    event::{
        self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::{
    config::{self, SimConfig},
    core::SimulationState,
    render,
    starfield::Starfield,
    types::{CalendarSnapshot, ColorId, FrameInput, Viewpoint},
};

use helm::Thrust;

// Legacy terminals never report key releases; a key counts as held this long
// after its last press or auto-repeat.
const LEGACY_HOLD: Duration = Duration::from_millis(550);

type Term = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Quit,
    StuckAtHorizon,
}

pub fn run(config: SimConfig) -> Result<RunOutcome, Box<dyn Error>> {
    let mut state = SimulationState::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let reports_release = supports_keyboard_enhancement().unwrap_or(false);
    if reports_release {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    log::info!("key release reporting: {}", reports_release);
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = run_loop(&mut terminal, &mut state, reports_release);
    shutdown_terminal(&mut terminal, reports_release)?;
    outcome
}

fn run_loop(
    terminal: &mut Term,
    state: &mut SimulationState,
    reports_release: bool,
) -> Result<RunOutcome, Box<dyn Error>> {
    let mut ui_state = UiState::new(reports_release);
    let frame_interval = Duration::from_secs_f32(config::DT);
    let mut clock = FrameClock::new(Instant::now());

    loop {
        let now = Instant::now();
        let elapsed_ms = clock.elapsed_ms(now);

        while event::poll(Duration::from_millis(0))? {
            if let CrosstermEvent::Key(key) = event::read()? {
                if ui_state.keys.handle(key, now) {
                    return Ok(RunOutcome::Quit);
                }
            }
        }

        let thrust = Thrust::from_keys(
            ui_state.keys.right.is_down(now, reports_release),
            ui_state.keys.left.is_down(now, reports_release),
        );
        let displacement = helm::displacement(thrust, state.ship_position());
        state.tick(&FrameInput {
            elapsed_ms,
            displacement,
            toggle_down: ui_state.keys.toggle.sample(now, reports_release),
        });
        ui_state.stars.advance(displacement, state.regime());

        let snapshot = state.snapshot();
        terminal.draw(|frame| {
            let size = frame.size();
            let calendar_rows = snapshot.earth.lines.len().max(snapshot.ship.lines.len());
            let calendar_height = calendar_rows as u16 + 2;
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(3),
                    Constraint::Length(calendar_height),
                    Constraint::Length(3),
                ])
                .split(size);

            let header = Paragraph::new(vec![
                Line::from(Span::styled(
                    snapshot.viewpoint.banner(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(snapshot.readout.to_string()),
            ])
            .block(Block::default().borders(Borders::ALL).title("horizon-twins"));
            frame.render_widget(header, chunks[0]);

            let viewport = render::Viewport {
                width: chunks[1].width.saturating_sub(2),
                height: chunks[1].height.saturating_sub(2),
            };
            render::draw(&snapshot, &ui_state.stars, viewport, &mut ui_state.framebuf);
            let scene = Paragraph::new(framebuffer_lines(&ui_state.framebuf))
                .block(Block::default().borders(Borders::ALL).title("Space"));
            frame.render_widget(scene, chunks[1]);

            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[2]);
            let earth = Paragraph::new(calendar_lines(&snapshot.earth)).block(calendar_block(
                "Earth",
                snapshot.viewpoint == Viewpoint::EarthView,
            ));
            frame.render_widget(earth, columns[0]);
            let ship = Paragraph::new(calendar_lines(&snapshot.ship)).block(calendar_block(
                "Spaceship",
                snapshot.viewpoint == Viewpoint::ShipView,
            ));
            frame.render_widget(ship, columns[1]);

            let footer = Paragraph::new("←→: fly | Tab: switch observer | q: quit")
                .block(Block::default().borders(Borders::ALL).title("Controls"));
            frame.render_widget(footer, chunks[3]);
        })?;

        if snapshot.terminal {
            return Ok(RunOutcome::StuckAtHorizon);
        }

        std::thread::sleep(frame_interval.saturating_sub(now.elapsed()));
    }
}

fn shutdown_terminal(terminal: &mut Term, reports_release: bool) -> Result<(), Box<dyn Error>> {
    if reports_release {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Whole milliseconds since the previous frame, measured against a fixed start so
/// sub-millisecond remainders carry over instead of being lost each frame.
#[derive(Debug)]
struct FrameClock {
    start: Instant,
    fed_ms: u64,
}

impl FrameClock {
    fn new(start: Instant) -> Self {
        Self { start, fed_ms: 0 }
    }

    fn elapsed_ms(&mut self, now: Instant) -> u64 {
        let total = now.saturating_duration_since(self.start).as_millis() as u64;
        let step = total.saturating_sub(self.fed_ms);
        self.fed_ms = total;
        step
    }
}

struct UiState {
    framebuf: render::FrameBuffer,
    stars: Starfield,
    keys: Keys,
}

impl UiState {
    fn new(reports_release: bool) -> Self {
        Self {
            framebuf: render::FrameBuffer::new(0, 0),
            stars: Starfield::new(),
            keys: Keys::new(reports_release),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct KeyHold {
    down: bool,
    last_seen: Option<Instant>,
    // Set when a fresh press lands inside the legacy hold window.
    restart: bool,
}

impl KeyHold {
    fn press(&mut self, now: Instant) {
        self.down = true;
        self.last_seen = Some(now);
    }

    /// A distinct press while the key still counts as held: the next sample
    /// reads as released so the press after it is seen as a new one.
    fn tap(&mut self, now: Instant) {
        if self.is_down(now, false) {
            self.restart = true;
        }
        self.press(now);
    }

    fn sample(&mut self, now: Instant, reports_release: bool) -> bool {
        if std::mem::take(&mut self.restart) {
            return false;
        }
        self.is_down(now, reports_release)
    }

    fn release(&mut self) {
        self.down = false;
        self.last_seen = None;
        self.restart = false;
    }

    fn is_down(&self, now: Instant, reports_release: bool) -> bool {
        if reports_release {
            self.down
        } else {
            self.last_seen
                .is_some_and(|seen| now.duration_since(seen) < LEGACY_HOLD)
        }
    }
}

#[derive(Debug)]
struct Keys {
    toggle: KeyHold,
    left: KeyHold,
    right: KeyHold,
    reports_release: bool,
}

impl Keys {
    fn new(reports_release: bool) -> Self {
        Self {
            toggle: KeyHold::default(),
            left: KeyHold::default(),
            right: KeyHold::default(),
            reports_release,
        }
    }

    /// Returns true when the user asked to quit.
    fn handle(&mut self, key: KeyEvent, now: Instant) -> bool {
        let legacy = !self.reports_release;
        let hold = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return key.kind == KeyEventKind::Press,
            KeyCode::Tab => &mut self.toggle,
            KeyCode::Left => &mut self.left,
            KeyCode::Right => &mut self.right,
            _ => return false,
        };
        match key.kind {
            KeyEventKind::Release => hold.release(),
            // Only the observer switch needs separate taps; arrows just keep flying.
            KeyEventKind::Press if legacy && key.code == KeyCode::Tab => hold.tap(now),
            KeyEventKind::Press | KeyEventKind::Repeat => hold.press(now),
        }
        // Without release events the opposite arrow would stay held for LEGACY_HOLD.
        if legacy && key.kind != KeyEventKind::Release {
            match key.code {
                KeyCode::Left => self.right.release(),
                KeyCode::Right => self.left.release(),
                _ => {}
            }
        }
        false
    }
}

fn calendar_block(title: &'static str, active: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if active {
        block.border_style(Style::default().fg(Color::Yellow))
    } else {
        block
    }
}

/// Calendar lines with today's number written back into its blanked cell, highlighted.
fn calendar_lines(calendar: &CalendarSnapshot) -> Vec<Line<'static>> {
    let today = format!("{:>2}", calendar.date.day());
    calendar
        .lines
        .iter()
        .enumerate()
        .map(|(row, line)| match calendar.today_cell {
            Some((r, col)) if r == row && line.len() >= col + 2 => Line::from(vec![
                Span::raw(line[..col].to_string()),
                Span::styled(
                    today.clone(),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(line[col + 2..].to_string()),
            ]),
            _ => Line::from(line.clone()),
        })
        .collect()
}

fn framebuffer_lines(framebuf: &render::FrameBuffer) -> Vec<Line<'static>> {
    (0..framebuf.height())
        .map(|y| {
            let spans: Vec<Span> = (0..framebuf.width())
                .map(|x| {
                    let cell = framebuf.get(x, y);
                    Span::styled(cell.ch.to_string(), Style::default().fg(color_for(cell.color)))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn color_for(color: ColorId) -> Color {
    match color {
        ColorId::White => Color::White,
        ColorId::Grey => Color::Gray,
        ColorId::Yellow => Color::LightYellow,
        ColorId::LightBlue => Color::LightBlue,
        ColorId::SkyBlue => Color::Cyan,
        ColorId::Purple => Color::Magenta,
        ColorId::Pink => Color::LightRed,
        ColorId::Red => Color::Red,
    }
}
