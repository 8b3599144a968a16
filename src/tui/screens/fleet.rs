//! Fleet screen: header, robot list and key help.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Padding, Paragraph};

use crate::model::{Preferences, Robot, RobotStatus};
use crate::tui::Dashboard;
use crate::view::format::{
    BatteryTier, battery_label, compass, format_eta, notification_count, status_badge,
};

use super::battery_color;

const HELP: &str = " ↑↓ navigate  ⏎ details  s sort  f filter  p pause  r resume  e e-stop  \
                    g goal  n notifications  q quit";

/// Draw the main screen. `cursor` indexes the derived robot list.
pub fn render_fleet(frame: &mut Frame, dashboard: &Dashboard, prefs: Preferences, cursor: usize) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(3), // title
        Constraint::Length(1), // separator
        Constraint::Min(0),    // robots
        Constraint::Length(1), // help
    ])
    .split(area);

    let muted = Style::default().fg(Color::DarkGray);
    let normal = Style::default().fg(Color::Gray);
    let highlight = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    // Title, preferences and notification count.
    let title = Paragraph::new(Line::from(vec![
        Span::styled("fleetdeck", highlight),
        Span::styled(
            format!(
                "   sort: {}  filter: {}",
                prefs.sort.as_str(),
                prefs.filter.as_str()
            ),
            normal,
        ),
        Span::styled(
            format!("   🔔 {}", notification_count(dashboard.notifications().len())),
            muted,
        ),
    ]))
    .block(Block::default().padding(Padding::new(2, 0, 1, 0)));
    frame.render_widget(title, chunks[0]);

    let sep = Paragraph::new(Line::from(Span::styled(
        "─".repeat(area.width.saturating_sub(4) as usize),
        muted,
    )))
    .block(Block::default().padding(Padding::new(2, 2, 0, 0)));
    frame.render_widget(sep, chunks[1]);

    if dashboard.robots().is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No robots match the current filter",
            muted,
        )))
        .block(Block::default().padding(Padding::new(2, 2, 1, 0)));
        frame.render_widget(empty, chunks[2]);
    } else {
        let items: Vec<ListItem> = dashboard
            .robots()
            .iter()
            .enumerate()
            .map(|(i, robot)| {
                let selected = i == cursor;
                robot_card(robot, selected, if selected { highlight } else { normal })
            })
            .collect();
        let list = List::new(items).block(Block::default().padding(Padding::new(2, 2, 1, 0)));
        frame.render_widget(list, chunks[2]);
    }

    let help = Paragraph::new(Line::from(Span::styled(HELP, muted)));
    frame.render_widget(help, chunks[3]);
}

fn robot_card(robot: &Robot, selected: bool, style: Style) -> ListItem<'static> {
    let muted = Style::default().fg(Color::DarkGray);
    let (label, icon) = status_badge(robot.status);
    let tier = BatteryTier::of(robot.battery);
    let pointer = if selected { "› " } else { "  " };

    let header = Line::from(vec![
        Span::styled(pointer, style),
        Span::styled(format!("{:<12}", robot.name), style),
        Span::styled(
            format!("{icon} {label:<12}"),
            Style::default().fg(status_color(robot.status)),
        ),
        Span::styled(
            format!("{} {:>4}", tier.icon(), battery_label(robot.battery)),
            Style::default().fg(battery_color(tier)),
        ),
        Span::styled(
            format!(
                "   ⏱ {}   {}   ({:.1}, {:.1}) → ({:.0}, {:.0})",
                format_eta(robot.eta),
                compass(robot.heading),
                robot.position.x,
                robot.position.y,
                robot.goal.x,
                robot.goal.y,
            ),
            muted,
        ),
    ]);
    let task = Line::from(vec![
        Span::raw("    "),
        Span::styled(robot.current_task.clone(), muted),
    ]);

    ListItem::new(vec![header, task])
}

pub(super) fn status_color(status: RobotStatus) -> Color {
    match status {
        RobotStatus::Online => Color::Green,
        RobotStatus::Offline => Color::DarkGray,
        RobotStatus::Error => Color::Red,
        RobotStatus::Maintenance => Color::Yellow,
    }
}
