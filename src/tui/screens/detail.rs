//! Robot detail view: telemetry, minimap, task history and controls.

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Padding, Paragraph},
};

use crate::model::Robot;
use crate::render::motion_controls_enabled;
use crate::view::format::{
    BatteryTier, battery_label, clock_time, compass, format_eta, minimap_cell, point,
    status_badge,
};

use super::fleet::status_color;
use super::{battery_color, popup_area};

const MAP_WIDTH: u16 = 31;
const MAP_HEIGHT: u16 = 11;

pub fn render_detail(frame: &mut Frame, robot: &Robot) {
    let area = popup_area(frame.area(), 76, 30);
    frame.render_widget(Clear, area);

    let (label, icon) = status_badge(robot.status);
    let block = Block::bordered()
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", robot.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{icon} {label} "),
                Style::default().fg(status_color(robot.status)),
            ),
        ]))
        .padding(Padding::new(2, 2, 1, 0));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(MAP_HEIGHT), // telemetry + minimap
        Constraint::Length(1),
        Constraint::Min(0),    // task history
        Constraint::Length(1), // controls
    ])
    .split(inner);
    let top = Layout::horizontal([Constraint::Min(0), Constraint::Length(MAP_WIDTH + 2)])
        .split(rows[0]);

    let muted = Style::default().fg(Color::DarkGray);
    let tier = BatteryTier::of(robot.battery);
    let telemetry = vec![
        Line::from(vec![
            Span::styled("Battery   ", muted),
            Span::styled(
                format!("{} {}", tier.icon(), battery_label(robot.battery)),
                Style::default().fg(battery_color(tier)),
            ),
        ]),
        Line::from(vec![
            Span::styled("ETA       ", muted),
            Span::raw(format_eta(robot.eta)),
        ]),
        Line::from(vec![
            Span::styled("Heading   ", muted),
            Span::raw(format!("{} ({:.0}°)", compass(robot.heading), robot.heading)),
        ]),
        Line::from(vec![
            Span::styled("Speed     ", muted),
            Span::raw(format!("{:.1}", robot.speed)),
        ]),
        Line::from(vec![
            Span::styled("Position  ", muted),
            Span::raw(point(robot.position)),
        ]),
        Line::from(vec![
            Span::styled("Goal      ", muted),
            Span::raw(point(robot.goal)),
        ]),
        Line::default(),
        Line::from(Span::styled("Current task", muted)),
        Line::from(Span::raw(robot.current_task.clone())),
    ];
    frame.render_widget(Paragraph::new(telemetry), top[0]);
    frame.render_widget(
        Paragraph::new(minimap(robot)).block(Block::bordered().border_style(muted)),
        top[1],
    );

    let mut history = vec![Line::from(Span::styled("Task history", muted))];
    history.extend(robot.task_history.iter().map(|task| {
        Line::from(vec![
            Span::styled(format!("{}  ", clock_time(task.timestamp)), muted),
            Span::raw(format!("{:<36}", task.task)),
            Span::styled(task.status.as_str(), muted),
        ])
    }));
    frame.render_widget(Paragraph::new(history), rows[2]);

    let (motion, motion_style) = if motion_controls_enabled(robot) {
        ("p pause  r resume", Style::default().fg(Color::Gray))
    } else {
        ("p pause  r resume (disabled)", muted)
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(motion, motion_style),
            Span::styled("  e e-stop", Style::default().fg(Color::Red)),
            Span::styled("  g goal  esc close", muted),
        ])),
        rows[3],
    );
}

/// Character-grid map with the robot (●) and its goal (◎).
fn minimap(robot: &Robot) -> Vec<Line<'static>> {
    let robot_cell = minimap_cell(robot.position, MAP_WIDTH, MAP_HEIGHT - 2);
    let goal_cell = minimap_cell(robot.goal, MAP_WIDTH, MAP_HEIGHT - 2);

    (0..MAP_HEIGHT - 2)
        .map(|row| {
            let spans: Vec<Span> = (0..MAP_WIDTH)
                .map(|col| {
                    if (col, row) == robot_cell {
                        Span::styled("●", Style::default().fg(Color::Blue))
                    } else if (col, row) == goal_cell {
                        Span::styled("◎", Style::default().fg(Color::Green))
                    } else {
                        Span::styled("·", Style::default().fg(Color::DarkGray))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
