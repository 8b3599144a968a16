//! Screen rendering and input handling.

mod detail;
mod fleet;
mod goal;
mod notifications;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Color;

use crate::view::format::BatteryTier;

pub use detail::render_detail;
pub use fleet::render_fleet;
pub use goal::GoalForm;
pub use notifications::render_notifications;

/// A `width` × `height` rectangle centred in `area`, shrunk to fit.
pub(super) fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn battery_color(tier: BatteryTier) -> Color {
    match tier {
        BatteryTier::High => Color::Green,
        BatteryTier::Medium => Color::Yellow,
        BatteryTier::Low => Color::Red,
    }
}
