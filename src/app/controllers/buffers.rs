use serde::Serialize;
use serde_json::Value;

use crate::app::domain::workspace::default_content;
use crate::app::domain::{BufferKind, WorkspaceState};
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::storage::{Storage, WORKSPACE_KEY};

/// Owns the workspace and writes it back to storage after every change.
pub struct BufferStore<S: Storage> {
    storage: S,
    state: WorkspaceState,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedWorkspace<'a> {
    markup: &'a str,
    style: &'a str,
    script: &'a str,
    component_mode: bool,
    markup_name: &'a str,
    style_name: &'a str,
    script_name: &'a str,
}

fn content_field(kind: BufferKind) -> &'static str {
    match kind {
        BufferKind::Markup => "markup",
        BufferKind::Style => "style",
        BufferKind::Script => "script",
    }
}

fn name_field(kind: BufferKind) -> &'static str {
    match kind {
        BufferKind::Markup => "markupName",
        BufferKind::Style => "styleName",
        BufferKind::Script => "scriptName",
    }
}

impl<S: Storage> BufferStore<S> {
    /// Hydrate from storage. Nothing stored, or nothing readable, gives the
    /// built-in defaults.
    pub fn open(storage: S) -> Self {
        let state = hydrate(storage.get(WORKSPACE_KEY).as_deref());
        Self { storage, state }
    }

    pub fn get(&self) -> &WorkspaceState {
        &self.state
    }

    pub fn snapshot(&self) -> WorkspaceState {
        self.state.clone()
    }

    pub fn set(&mut self, kind: BufferKind, content: impl Into<String>) {
        self.state.buffer_mut(kind).replace(content.into());
        self.persist();
    }

    pub fn set_all(&mut self, markup: String, style: String, script: String) {
        self.state.replace_all(markup, style, script);
        self.persist();
    }

    pub fn set_mode(&mut self, component_mode: bool) {
        self.state.component_mode = component_mode;
        self.persist();
    }

    pub fn set_display_name(&mut self, kind: BufferKind, name: impl Into<String>) {
        self.state.buffer_mut(kind).display_name = name.into();
        self.persist();
    }

    /// Append `text` on a new line.
    pub fn append(&mut self, kind: BufferKind, text: &str) {
        let buffer = self.state.buffer_mut(kind);
        let content = format!("{}\n{}", buffer.content, text);
        buffer.replace(content);
        self.persist();
    }

    /// Empty all three buffers; names and mode stay.
    pub fn clear(&mut self) {
        self.set_all(String::new(), String::new(), String::new());
    }

    /// Write the current state now, reporting failures.
    pub fn flush(&mut self) -> Result<()> {
        let json = serialize(&self.state)?;
        self.storage.set(WORKSPACE_KEY, &json)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "failed to persist workspace");
        }
    }
}

pub fn serialize(state: &WorkspaceState) -> Result<String> {
    let record = PersistedWorkspace {
        markup: &state.markup.content,
        style: &state.style.content,
        script: &state.script.content,
        component_mode: state.component_mode,
        markup_name: &state.markup.display_name,
        style_name: &state.style.display_name,
        script_name: &state.script.display_name,
    };
    Ok(serde_json::to_string(&record)?)
}

/// Rebuild a workspace from its stored record, field by field.
pub fn hydrate(raw: Option<&str>) -> WorkspaceState {
    let mut state = WorkspaceState::default();
    let Some(raw) = raw else {
        return state;
    };

    let record = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(record)) => record,
        Ok(_) => {
            tracing::warn!("stored workspace is not an object, using defaults");
            return state;
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse stored workspace, using defaults");
            return state;
        }
    };

    for kind in BufferKind::ALL {
        let buffer = state.buffer_mut(kind);
        buffer.content = match record.get(content_field(kind)) {
            Some(Value::String(s)) => s.clone(),
            _ => default_content(kind).to_string(),
        };
        if let Some(Value::String(name)) = record.get(name_field(kind)) {
            if !name.trim().is_empty() {
                buffer.display_name = name.clone();
            }
        }
    }
    if let Some(Value::Bool(mode)) = record.get("componentMode") {
        state.component_mode = *mode;
    }

    state
}
