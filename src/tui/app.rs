//! Application loop and overlay routing.
//!
//! One thread owns the engine. Each pass waits for a key until the next
//! tick is due, handles whatever arrived, and fires the tick if its time
//! has come. A key press and a tick therefore never overlap.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use jiff::Timestamp;
use ratatui::{DefaultTerminal, Frame};

use crate::command::Command;
use crate::config::Config;
use crate::engine::Engine;
use crate::fleet::Fleet;
use crate::render::motion_controls_enabled;

use super::Dashboard;
use super::screens::{GoalForm, popup_area, render_detail, render_fleet, render_notifications};

/// Which panel sits on top of the fleet screen.
///
/// The detail view is not here: it follows the fleet's selection.
enum Overlay {
    None,
    Notifications { cursor: usize },
    Goal(GoalForm),
}

/// What a key press asks the loop to do.
#[derive(Debug, PartialEq)]
enum Action {
    Quit,
    Dispatch(Command),
    /// Dispatch, and close the goal form only if the command was accepted.
    SubmitGoal(Command),
    Nothing,
}

/// UI-only state: list cursor and open overlay.
struct App {
    cursor: usize,
    overlay: Overlay,
}

/// Runs the TUI event loop until the user quits.
pub fn run(config: &Config) -> io::Result<()> {
    let fleet = Fleet::seeded(Timestamp::now()).with_preferences(config.preferences());
    let engine = Engine::new(fleet, config.rng(), Dashboard::default());
    tracing::info!(interval_ms = config.tick_interval_ms, "dashboard started");

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, engine, config.tick_interval());
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    mut engine: Engine<Dashboard>,
    period: Duration,
) -> io::Result<()> {
    let mut app = App {
        cursor: 0,
        overlay: Overlay::None,
    };
    let mut next_tick = Instant::now() + period;

    loop {
        terminal.draw(|frame| app.render(frame, &engine))?;

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match app.on_key(key, &mut engine) {
                Action::Quit => return Ok(()),
                Action::Dispatch(command) => {
                    // Rejections are shown by the dashboard itself.
                    let _ = engine.dispatch(&command);
                }
                Action::SubmitGoal(command) => {
                    if engine.dispatch(&command).is_ok() {
                        app.overlay = Overlay::None;
                    }
                }
                Action::Nothing => {}
            }
        }

        if Instant::now() >= next_tick {
            engine.tick();
            next_tick = Instant::now() + period;
        }
    }
}

impl App {
    fn render(&mut self, frame: &mut Frame, engine: &Engine<Dashboard>) {
        let dashboard = engine.renderer();
        self.clamp_cursors(dashboard);

        render_fleet(frame, dashboard, engine.fleet().preferences(), self.cursor);

        if let Some(robot) = dashboard.detail() {
            render_detail(frame, robot);
        }
        match &self.overlay {
            Overlay::None => {}
            Overlay::Notifications { cursor } => render_notifications(frame, dashboard, *cursor),
            Overlay::Goal(form) => form.render(frame),
        }
        if let Some(message) = dashboard.error() {
            render_error(frame, message);
        }
    }

    /// Keep cursors inside lists that may have shrunk since the last sync.
    fn clamp_cursors(&mut self, dashboard: &Dashboard) {
        self.cursor = self.cursor.min(dashboard.robots().len().saturating_sub(1));
        if let Overlay::Notifications { cursor } = &mut self.overlay {
            *cursor = (*cursor).min(dashboard.notifications().len().saturating_sub(1));
        }
    }

    fn on_key(&mut self, key: KeyEvent, engine: &mut Engine<Dashboard>) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        // A validation message must be acknowledged before anything else.
        if engine.renderer().error().is_some() {
            engine.renderer_mut().dismiss_error();
            return Action::Nothing;
        }

        if matches!(self.overlay, Overlay::None) {
            return self.on_fleet_key(key.code, engine);
        }

        let dashboard = engine.renderer();
        match &mut self.overlay {
            Overlay::Goal(form) => match key.code {
                KeyCode::Esc => {
                    self.overlay = Overlay::None;
                    Action::Nothing
                }
                KeyCode::Enter => Action::SubmitGoal(form.to_command()),
                KeyCode::Tab | KeyCode::Down => {
                    form.on_next_field();
                    Action::Nothing
                }
                KeyCode::BackTab | KeyCode::Up => {
                    form.on_previous_field();
                    Action::Nothing
                }
                KeyCode::Left => {
                    form.on_left();
                    Action::Nothing
                }
                KeyCode::Right => {
                    form.on_right();
                    Action::Nothing
                }
                KeyCode::Backspace => {
                    form.on_backspace();
                    Action::Nothing
                }
                KeyCode::Char(c) => {
                    form.on_char(c);
                    Action::Nothing
                }
                _ => Action::Nothing,
            },
            Overlay::Notifications { cursor } => match key.code {
                KeyCode::Esc | KeyCode::Char('n') => {
                    self.overlay = Overlay::None;
                    Action::Nothing
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    *cursor = cursor.saturating_sub(1);
                    Action::Nothing
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if *cursor + 1 < dashboard.notifications().len() {
                        *cursor += 1;
                    }
                    Action::Nothing
                }
                KeyCode::Char('d') => dashboard
                    .notifications()
                    .get(*cursor)
                    .map_or(Action::Nothing, |n| {
                        Action::Dispatch(Command::DismissNotification { id: n.id })
                    }),
                KeyCode::Char('c') if !dashboard.notifications().is_empty() => {
                    Action::Dispatch(Command::ClearAllNotifications)
                }
                KeyCode::Char('q') => Action::Quit,
                _ => Action::Nothing,
            },
            Overlay::None => Action::Nothing,
        }
    }

    fn on_fleet_key(&mut self, code: KeyCode, engine: &Engine<Dashboard>) -> Action {
        let dashboard = engine.renderer();
        let prefs = engine.fleet().preferences();

        // With the detail view open, robot controls act on the shown robot.
        let target = dashboard
            .detail()
            .or_else(|| dashboard.robots().get(self.cursor));

        match code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc if dashboard.detail().is_some() => Action::Dispatch(Command::CloseDetail),
            KeyCode::Up | KeyCode::Char('k') if dashboard.detail().is_none() => {
                self.cursor = self.cursor.saturating_sub(1);
                Action::Nothing
            }
            KeyCode::Down | KeyCode::Char('j') if dashboard.detail().is_none() => {
                if self.cursor + 1 < dashboard.robots().len() {
                    self.cursor += 1;
                }
                Action::Nothing
            }
            KeyCode::Enter if dashboard.detail().is_none() => {
                target.map_or(Action::Nothing, |r| {
                    Action::Dispatch(Command::Select {
                        robot_id: r.id.clone(),
                    })
                })
            }
            KeyCode::Char('s') => Action::Dispatch(Command::SetSort {
                sort: prefs.sort.next(),
            }),
            KeyCode::Char('f') => Action::Dispatch(Command::SetFilter {
                filter: prefs.filter.next(),
            }),
            KeyCode::Char('p') => match target {
                Some(r) if motion_controls_enabled(r) => Action::Dispatch(Command::Pause {
                    robot_id: r.id.clone(),
                }),
                _ => Action::Nothing,
            },
            KeyCode::Char('r') => match target {
                Some(r) if motion_controls_enabled(r) => Action::Dispatch(Command::Resume {
                    robot_id: r.id.clone(),
                }),
                _ => Action::Nothing,
            },
            KeyCode::Char('e') => target.map_or(Action::Nothing, |r| {
                Action::Dispatch(Command::EmergencyStop {
                    robot_id: r.id.clone(),
                })
            }),
            KeyCode::Char('g') => {
                let ids = engine.fleet().robots().iter().map(|r| r.id.clone()).collect();
                self.overlay = Overlay::Goal(GoalForm::new(ids, target.map(|r| r.id.as_str())));
                Action::Nothing
            }
            KeyCode::Char('n') => {
                self.overlay = Overlay::Notifications { cursor: 0 };
                Action::Nothing
            }
            _ => Action::Nothing,
        }
    }
}

fn render_error(frame: &mut Frame, message: &str) {
    use ratatui::style::{Color, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Clear, Padding, Paragraph};

    let width = (message.chars().count() as u16).saturating_add(8);
    let area = popup_area(frame.area(), width, 4);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(message, Style::default().fg(Color::Red))),
            Line::from(Span::styled("press any key", Style::default().fg(Color::DarkGray))),
        ])
        .block(Block::bordered().padding(Padding::horizontal(2))),
        area,
    );
}
