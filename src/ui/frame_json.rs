use crate::ui::span::plain_text;
use crate::ui::view::Frame;

/// Frame as JSON for headless snapshots: styled spans per line plus the
/// plain text, so diffs stay readable.
pub fn frame_to_json(frame: &Frame) -> serde_json::Value {
    let cursor = frame.cursor.map(|c| {
        serde_json::json!({
            "row": c.row,
            "col": c.col,
        })
    });

    let lines = frame
        .lines
        .iter()
        .map(|line| {
            serde_json::json!({
                "text": plain_text(line),
                "spans": line
                    .iter()
                    .map(|span| {
                        serde_json::json!({
                            "text": span.text,
                            "color": span.style.color.map(|color| color.name()),
                            "bold": span.style.bold,
                        })
                    })
                    .collect::<Vec<_>>(),
            })
        })
        .collect::<Vec<_>>();

    serde_json::json!({
        "cursor": cursor,
        "lines": lines,
    })
}
