use crate::commands::popup::PopupSurface;
use crate::view::{ElementId, PopupView};
use std::io::Write;

/// Prints `[element-id] text` for every element whose text changed since the
/// previous frame, so incremental loads read top to bottom.
pub struct TextSurface<W: Write> {
    out: W,
    last: Option<PopupView>,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PopupSurface for TextSurface<W> {
    fn render(&mut self, view: &PopupView) {
        for id in ElementId::ALL {
            let text = view.element_text(id);
            let unchanged = self
                .last
                .as_ref()
                .is_some_and(|last| last.element_text(id) == text);
            if unchanged {
                continue;
            }
            let _ = writeln!(self.out, "[{}] {}", id.as_str(), text);
        }
        let _ = self.out.flush();
        self.last = Some(view.clone());
    }
}

/// One JSON object per frame, one frame per line.
pub struct JsonSurface<W: Write> {
    out: W,
}

impl<W: Write> JsonSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PopupSurface for JsonSurface<W> {
    fn render(&mut self, view: &PopupView) {
        let _ = writeln!(self.out, "{}", view.to_elements());
        let _ = self.out.flush();
    }
}

/// Either surface, picked at startup from the configured output format.
pub enum AnySurface<W: Write> {
    Text(TextSurface<W>),
    Json(JsonSurface<W>),
}

impl<W: Write> PopupSurface for AnySurface<W> {
    fn render(&mut self, view: &PopupView) {
        match self {
            AnySurface::Text(surface) => surface.render(view),
            AnySurface::Json(surface) => surface.render(view),
        }
    }
}
