use crate::ui::style::{Color, Style};
use crate::wizard::StepStatus;

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub description: Style,
    pub label: Style,
    pub focused: Style,
    pub hint: Style,
    pub error: Style,
    pub notice: Style,
    pub done: Style,
    pub active: Style,
    pub blocked: Style,
    pub pending: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            title: Style::new().with_bold(),
            description: Style::new().with_color(Color::DarkGrey),
            label: Style::new(),
            focused: Style::new().with_color(Color::Cyan).with_bold(),
            hint: Style::new().with_color(Color::DarkGrey),
            error: Style::new().with_color(Color::Red).with_bold(),
            notice: Style::new().with_color(Color::Green).with_bold(),
            done: Style::new().with_color(Color::Green),
            active: Style::new().with_color(Color::Cyan).with_bold(),
            blocked: Style::new().with_color(Color::Yellow).with_bold(),
            pending: Style::new().with_color(Color::DarkGrey),
        }
    }

    pub fn status(&self, status: StepStatus) -> Style {
        match status {
            StepStatus::Done => self.done,
            StepStatus::Active => self.active,
            StepStatus::Blocked => self.blocked,
            StepStatus::Pending => self.pending,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
