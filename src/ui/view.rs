use crate::panel::{FieldView, PanelView};
use crate::terminal::CursorPos;
use crate::ui::span::{Span, SpanLine, line_width};
use crate::ui::theme::Theme;
use crate::wizard::StepStatus;

const FOOTER: &str = "Enter continue  Tab next field  Alt+N jump to step  Ctrl+R start over  Esc exit";

/// Lines ready for the terminal, plus where the caret belongs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

impl Frame {
    fn push(&mut self, line: SpanLine) {
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(Vec::new());
    }
}

pub fn panel_frame(view: &PanelView, focus: usize, theme: &Theme) -> Frame {
    let mut frame = Frame::default();

    frame.push(vec![
        Span::styled(view.wizard.to_uppercase(), theme.title),
        Span::styled(
            format!("  step {} of {}", view.index + 1, view.total),
            theme.description,
        ),
    ]);
    frame.push(stepper_line(view, theme));
    frame.blank();
    frame.push(vec![Span::styled(view.title, theme.title)]);
    if !view.description.is_empty() {
        frame.push(vec![Span::styled(view.description, theme.description)]);
    }
    frame.blank();

    for (index, field) in view.fields.iter().enumerate() {
        let focused = index == focus;
        let line = field_line(field, focused, theme);
        if focused && !picks_from_options(field) {
            frame.cursor = Some(CursorPos {
                col: line_width(&line).min(u16::MAX as usize) as u16,
                row: frame.lines.len().min(u16::MAX as usize) as u16,
            });
        }
        frame.push(line);
        if let Some(error) = &field.error {
            frame.push(vec![Span::styled(format!("    ! {error}"), theme.error)]);
        }
        if focused {
            if !field.choices.is_empty() {
                frame.push(vec![Span::styled(
                    format!("    {}  (Left/Right to change)", field.choices.join(" / ")),
                    theme.hint,
                )]);
            } else if let Some(hint) = field.hint {
                frame.push(vec![Span::styled(format!("    accepts {hint}"), theme.hint)]);
            }
        }
    }

    if let Some(note) = view.note {
        frame.blank();
        frame.push(vec![Span::styled(note, theme.hint)]);
    }
    if let Some(message) = &view.blocked {
        frame.blank();
        frame.push(vec![Span::styled(format!("! {message}"), theme.blocked)]);
    }
    for message in &view.step_errors {
        frame.push(vec![Span::styled(format!("! {message}"), theme.error)]);
    }

    frame.blank();
    frame.push(vec![Span::styled(FOOTER, theme.hint)]);
    frame
}

/// Frame for states with no step panel: a finished submission or a hand-off.
pub fn notice_frame(title: &str, body: &[String], theme: &Theme) -> Frame {
    let mut frame = Frame::default();
    frame.push(vec![Span::styled(title.to_string(), theme.notice)]);
    frame.blank();
    for line in body {
        frame.push(vec![Span::new(line.clone())]);
    }
    frame.blank();
    frame.push(vec![Span::styled("Ctrl+R start another  Esc exit", theme.hint)]);
    frame
}

fn stepper_line(view: &PanelView, theme: &Theme) -> SpanLine {
    let mut line = Vec::with_capacity(view.stepper.len() * 2);
    for (index, item) in view.stepper.iter().enumerate() {
        if index > 0 {
            line.push(Span::styled(" > ", theme.pending));
        }
        let marker = match item.status {
            StepStatus::Done => "x",
            StepStatus::Active => "*",
            StepStatus::Blocked => "!",
            StepStatus::Pending => " ",
        };
        line.push(Span::styled(
            format!("[{marker}] {} {}", index + 1, item.title),
            theme.status(item.status),
        ));
    }
    line
}

fn field_line(field: &FieldView, focused: bool, theme: &Theme) -> SpanLine {
    let prefix = if focused { "> " } else { "  " };
    let label_style = if focused { theme.focused } else { theme.label };
    let required = if field.required { " *" } else { "" };
    vec![
        Span::styled(format!("{prefix}{}{required}: ", field.label), label_style),
        Span::new(field.value.clone()),
    ]
}

/// Choice-like inputs are changed with arrow keys and never show a caret.
fn picks_from_options(field: &FieldView) -> bool {
    matches!(field.kind, "choice" | "yes_no" | "checkbox")
}
