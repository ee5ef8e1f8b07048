pub mod frame_json;
pub mod span;
pub mod style;
pub mod theme;
pub mod view;

pub use theme::Theme;
pub use view::{Frame, notice_frame, panel_frame};
