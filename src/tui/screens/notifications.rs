//! Notification panel: the feed, with dismiss and clear-all.

use jiff::Timestamp;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, Padding, Paragraph},
};

use crate::model::NotificationKind;
use crate::tui::Dashboard;
use crate::view::format::{notification_count, notification_icon, relative_time};

use super::popup_area;

pub fn render_notifications(frame: &mut Frame, dashboard: &Dashboard, cursor: usize) {
    let area = popup_area(frame.area(), 72, 16);
    frame.render_widget(Clear, area);

    let notifications = dashboard.notifications();
    let block = Block::bordered()
        .title(format!(" {} ", notification_count(notifications.len())))
        .padding(Padding::new(1, 1, 0, 0));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);
    let muted = Style::default().fg(Color::DarkGray);

    if notifications.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled("No notifications", muted)));
        frame.render_widget(empty, rows[0]);
    } else {
        let now = Timestamp::now();
        let items: Vec<ListItem> = notifications
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let style = if i == cursor {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(kind_color(n.kind))
                };
                let pointer = if i == cursor { "› " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(pointer, style),
                    Span::raw(format!("{} ", notification_icon(n.kind))),
                    Span::styled(n.message.clone(), style),
                    Span::styled(format!("  {}", relative_time(n.timestamp, now)), muted),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items), rows[0]);
    }

    // Clear-all is only offered when there is something to clear.
    let help = if notifications.is_empty() {
        " esc close"
    } else {
        " ↑↓ navigate  d dismiss  c clear all  esc close"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(help, muted))),
        rows[1],
    );
}

fn kind_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Info => Color::Blue,
        NotificationKind::Success => Color::Green,
        NotificationKind::Warning => Color::Yellow,
        NotificationKind::Error => Color::Red,
    }
}
