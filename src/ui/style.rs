#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Reset,
    DarkGrey,
    Red,
    Green,
    Yellow,
    Cyan,
    White,
}

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::DarkGrey => "dark_grey",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }
}
