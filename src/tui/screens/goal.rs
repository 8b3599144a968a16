//! Set Goal form: pick a robot, enter coordinates and a task.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Padding, Paragraph},
};

use crate::command::Command;

use super::popup_area;

/// Which field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Robot,
    X,
    Y,
    Task,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Self::Robot => Self::X,
            Self::X => Self::Y,
            Self::Y => Self::Task,
            Self::Task => Self::Robot,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Robot => Self::Task,
            Self::X => Self::Robot,
            Self::Y => Self::X,
            Self::Task => Self::Y,
        }
    }
}

/// The goal form, driven key by key.
///
/// The robot field is a picker over the fleet's ids; the rest are free text.
/// Nothing is validated here; the command handler does that on submit.
pub struct GoalForm {
    field: Field,
    robot_ids: Vec<String>,
    /// Index into `robot_ids`; `None` means nothing picked yet.
    robot: Option<usize>,
    x: String,
    y: String,
    task: String,
}

impl GoalForm {
    /// A blank form, with `preselect` picked if it is one of `robot_ids`.
    pub fn new(robot_ids: Vec<String>, preselect: Option<&str>) -> Self {
        let robot = preselect.and_then(|id| robot_ids.iter().position(|r| r == id));
        Self {
            field: Field::Robot,
            robot_ids,
            robot,
            x: String::new(),
            y: String::new(),
            task: String::new(),
        }
    }

    pub fn on_char(&mut self, c: char) {
        if let Some(input) = self.input_mut() {
            input.push(c);
        }
    }

    pub fn on_backspace(&mut self) {
        match self.input_mut() {
            Some(input) => {
                input.pop();
            }
            None => self.robot = None,
        }
    }

    pub fn on_next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn on_previous_field(&mut self) {
        self.field = self.field.previous();
    }

    /// Cycle the robot picker forward.
    pub fn on_right(&mut self) {
        if self.field != Field::Robot || self.robot_ids.is_empty() {
            return;
        }
        self.robot = Some(self.robot.map_or(0, |i| (i + 1) % self.robot_ids.len()));
    }

    /// Cycle the robot picker backward.
    pub fn on_left(&mut self) {
        if self.field != Field::Robot || self.robot_ids.is_empty() {
            return;
        }
        let last = self.robot_ids.len() - 1;
        self.robot = Some(self.robot.map_or(last, |i| i.checked_sub(1).unwrap_or(last)));
    }

    /// The command this form currently describes.
    pub fn to_command(&self) -> Command {
        Command::SetGoal {
            robot_id: self.robot_id().unwrap_or_default().to_string(),
            x: self.x.clone(),
            y: self.y.clone(),
            task: self.task.clone(),
        }
    }

    fn robot_id(&self) -> Option<&str> {
        self.robot
            .and_then(|i| self.robot_ids.get(i))
            .map(String::as_str)
    }

    fn input_mut(&mut self) -> Option<&mut String> {
        match self.field {
            Field::Robot => None,
            Field::X => Some(&mut self.x),
            Field::Y => Some(&mut self.y),
            Field::Task => Some(&mut self.task),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = popup_area(frame.area(), 60, 12);
        frame.render_widget(Clear, area);

        let block = Block::bordered()
            .title(" Set Goal ")
            .padding(Padding::new(2, 2, 1, 0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1), // robot
            Constraint::Length(1), // x
            Constraint::Length(1), // y
            Constraint::Length(1), // task
            Constraint::Min(0),
            Constraint::Length(1), // help
        ])
        .split(inner);

        let robot = self.robot_id().unwrap_or("‹ select a robot ›");
        self.render_field(frame, rows[0], Field::Robot, "Robot", robot);
        self.render_field(frame, rows[1], Field::X, "Goal X", &self.x);
        self.render_field(frame, rows[2], Field::Y, "Goal Y", &self.y);
        self.render_field(frame, rows[3], Field::Task, "Task", &self.task);

        let help = Paragraph::new(Line::from(Span::styled(
            "tab next  ←→ pick robot  ⏎ set goal  esc cancel",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(help, rows[5]);
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, field: Field, label: &str, value: &str) {
        let focused = self.field == field;
        let label_style = if focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if focused && field != Field::Robot { "▏" } else { "" };
        let line = Line::from(vec![
            Span::styled(if focused { "› " } else { "  " }, label_style),
            Span::styled(format!("{label:<8}"), label_style),
            Span::raw(value.to_string()),
            Span::styled(cursor, Style::default().fg(Color::Blue)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> Vec<String> {
        vec!["robot-maid".into(), "robot-milo".into()]
    }

    #[test]
    fn fills_fields_in_order() {
        let mut form = GoalForm::new(ids(), Some("robot-milo"));
        form.on_char('z'); // robot field ignores text
        form.on_next_field();
        form.on_char('1');
        form.on_char('0');
        form.on_next_field();
        form.on_char('7');
        form.on_next_field();
        for c in "Deliver package".chars() {
            form.on_char(c);
        }

        assert_eq!(
            form.to_command(),
            Command::SetGoal {
                robot_id: "robot-milo".into(),
                x: "10".into(),
                y: "7".into(),
                task: "Deliver package".into(),
            }
        );
    }

    #[test]
    fn picker_cycles_and_clears() {
        let mut form = GoalForm::new(ids(), None);
        assert!(form.robot_id().is_none());

        form.on_right();
        assert_eq!(form.robot_id(), Some("robot-maid"));
        form.on_right();
        assert_eq!(form.robot_id(), Some("robot-milo"));
        form.on_right();
        assert_eq!(form.robot_id(), Some("robot-maid"));
        form.on_left();
        assert_eq!(form.robot_id(), Some("robot-milo"));

        form.on_backspace();
        assert!(form.robot_id().is_none());
    }

    #[test]
    fn unpicked_robot_submits_empty_id() {
        let form = GoalForm::new(ids(), Some("robot-ghost"));
        let Command::SetGoal { robot_id, .. } = form.to_command() else {
            panic!("expected a goal command");
        };
        assert!(robot_id.is_empty());
    }

    #[test]
    fn backspace_edits_focused_text() {
        let mut form = GoalForm::new(ids(), None);
        form.on_previous_field(); // wraps to task
        form.on_char('a');
        form.on_char('b');
        form.on_backspace();
        let Command::SetGoal { task, .. } = form.to_command() else {
            panic!("expected a goal command");
        };
        assert_eq!(task, "a");
    }
}
