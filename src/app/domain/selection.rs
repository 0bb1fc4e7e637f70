use super::workspace::{BufferKind, WorkspaceState};

/// Highlighted text inside one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub source_kind: BufferKind,
    pub text: String,
}

impl Selection {
    pub fn new(source_kind: BufferKind, text: impl Into<String>) -> Self {
        Self {
            source_kind,
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Captured {
    selection: Selection,
    generation: u64,
}

/// Tracks the active buffer and the last selection made in it.
///
/// A selection is only reported while the active kind and the buffer's edit
/// generation are the ones it was captured with.
#[derive(Debug, Clone)]
pub struct SelectionTracker {
    active: BufferKind,
    captured: Option<Captured>,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::new(BufferKind::Markup)
    }
}

impl SelectionTracker {
    pub fn new(active: BufferKind) -> Self {
        Self {
            active,
            captured: None,
        }
    }

    pub fn active(&self) -> BufferKind {
        self.active
    }

    pub fn set_active(&mut self, kind: BufferKind) {
        if kind != self.active {
            self.active = kind;
            self.captured = None;
        }
    }

    /// Record a selection by char offsets into the active buffer, like a
    /// textarea's `selectionStart..selectionEnd`. Offsets are clamped and may
    /// be given in either order.
    pub fn select_range(&mut self, state: &WorkspaceState, start: usize, end: usize) {
        let buffer = state.buffer(self.active);
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        let text: String = buffer.content.chars().skip(lo).take(hi - lo).collect();
        self.capture(text, buffer.generation);
    }

    /// Record an explicit selection text in the active buffer.
    pub fn select_text(&mut self, state: &WorkspaceState, text: impl Into<String>) {
        let generation = state.buffer(self.active).generation;
        self.capture(text.into(), generation);
    }

    pub fn clear(&mut self) {
        self.captured = None;
    }

    /// The current selection, or an empty one when nothing valid is selected.
    pub fn current(&self, state: &WorkspaceState) -> Selection {
        match &self.captured {
            Some(c)
                if c.selection.source_kind == self.active
                    && state.buffer(self.active).generation == c.generation =>
            {
                c.selection.clone()
            }
            _ => Selection::new(self.active, String::new()),
        }
    }

    fn capture(&mut self, text: String, generation: u64) {
        self.captured = Some(Captured {
            selection: Selection::new(self.active, text),
            generation,
        });
    }
}
