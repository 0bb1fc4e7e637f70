use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::controllers::explain::{EXPLAIN_FAILED, EXPLAIN_PENDING, NO_EXPLANATION};
use super::controllers::{
    BufferStore, ExplainError, ExplainOrchestrator, GenerationError, GenerationOrchestrator,
    PreviewController, RequestSequencer, StatusBoard, Ticket,
};
use super::domain::{BufferKind, EditorSettings, ModelChoice, SelectionTracker, Theme, WorkspaceState};
use super::infrastructure::error::Result;
use super::infrastructure::storage::Storage;
use super::services::ai_client::AiClient;
use super::services::archive::{self, ExportError};
use super::services::composer::ComposedDocument;
use super::services::import::{self, ImportError, ImportedFile};
use super::services::snippets::{self, Snippet};

pub const STATUS_THINKING: &str = "Thinking deeply...";
pub const STATUS_PROCESSING: &str = "Processing...";
pub const STATUS_UPDATED: &str = "Workspace updated";
pub const STATUS_SNIPPET_ADDED: &str = "Snippet added";
pub const STATUS_CLEARED: &str = "Workspace cleared";
pub const STATUS_EXPORTING: &str = "Exporting...";
pub const STATUS_EXPORTED: &str = "Project exported";

/// A generation that has been validated and ticketed but not yet answered.
#[derive(Debug, Clone)]
pub struct PendingGeneration {
    pub ticket: Ticket,
    pub instruction: String,
    pub snapshot: WorkspaceState,
    pub model: ModelChoice,
}

impl PendingGeneration {
    /// Perform the blocking service call for this request.
    pub fn run(&self, client: impl AiClient) -> std::result::Result<WorkspaceState, GenerationError> {
        GenerationOrchestrator::new(client, self.model.clone())
            .generate(&self.instruction, &self.snapshot)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Applied,
    /// A newer request was issued after this one.
    Discarded,
    Failed(GenerationError),
}

/// Coordinates the buffer store, preview, status line and AI orchestrators.
pub struct Editor<S: Storage> {
    pub store: BufferStore<S>,
    pub selection: SelectionTracker,
    pub preview: PreviewController,
    pub status: StatusBoard,
    pub settings: EditorSettings,
    /// Natural-language change request, cleared after a successful generation.
    pub instruction: String,
    pub deep_reasoning: bool,
    /// Contents of the explanation panel, `None` while closed.
    pub explanation: Option<String>,
    pub theme: Theme,
    sequencer: RequestSequencer,
}

impl<S: Storage> Editor<S> {
    pub fn new(storage: S, settings: EditorSettings) -> Self {
        let theme = Theme::load(&storage);
        let store = BufferStore::open(storage);
        let status = StatusBoard::new(Duration::from_millis(settings.status_timeout_ms));
        Self {
            store,
            selection: SelectionTracker::default(),
            preview: PreviewController::new(),
            status,
            deep_reasoning: settings.deep_reasoning,
            settings,
            instruction: String::new(),
            explanation: None,
            theme,
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn workspace(&self) -> &WorkspaceState {
        self.store.get()
    }

    pub fn document(&mut self) -> &ComposedDocument {
        self.preview.document(self.store.get())
    }

    /// Replace one buffer as the user typing into it would.
    pub fn edit(&mut self, kind: BufferKind, content: impl Into<String>) {
        self.store.set(kind, content);
    }

    pub fn set_component_mode(&mut self, enabled: bool) {
        self.store.set_mode(enabled);
    }

    pub fn focus(&mut self, kind: BufferKind) {
        self.selection.set_active(kind);
    }

    pub fn tick(&mut self, now: Instant) {
        self.status.expire(now);
    }

    /// Validate the instruction and ticket a new request.
    pub fn begin_generation(
        &mut self,
        now: Instant,
    ) -> std::result::Result<PendingGeneration, GenerationError> {
        let instruction = self.instruction.trim();
        if instruction.is_empty() {
            let err = GenerationError::EmptyInstruction;
            self.status.post_error(err.user_message(), now);
            return Err(err);
        }

        let pending = PendingGeneration {
            ticket: self.sequencer.issue(),
            instruction: instruction.to_string(),
            snapshot: self.store.snapshot(),
            model: self.settings.generation_model(self.deep_reasoning),
        };
        let progress = if self.deep_reasoning {
            STATUS_THINKING
        } else {
            STATUS_PROCESSING
        };
        self.status.post_progress(progress, now);
        tracing::debug!(ticket = pending.ticket.value(), "generation started");
        Ok(pending)
    }

    /// Apply or reject a generation result. Results for superseded tickets
    /// never touch the buffers.
    pub fn finish_generation(
        &mut self,
        ticket: Ticket,
        result: std::result::Result<WorkspaceState, GenerationError>,
        now: Instant,
    ) -> GenerationOutcome {
        if !self.sequencer.is_current(ticket) {
            tracing::info!(ticket = ticket.value(), "discarding stale generation result");
            return GenerationOutcome::Discarded;
        }

        match result {
            Ok(next) => {
                self.store.set_all(
                    next.markup.content,
                    next.style.content,
                    next.script.content,
                );
                self.preview.refresh();
                self.instruction.clear();
                self.status.post_status(STATUS_UPDATED, now);
                GenerationOutcome::Applied
            }
            Err(e) => {
                tracing::error!(error = %e, "generation failed");
                self.status.post_error(e.user_message(), now);
                GenerationOutcome::Failed(e)
            }
        }
    }

    /// Begin, call and finish in one blocking step.
    pub fn generate(&mut self, client: impl AiClient) -> GenerationOutcome {
        let pending = match self.begin_generation(Instant::now()) {
            Ok(pending) => pending,
            Err(e) => return GenerationOutcome::Failed(e),
        };
        let result = pending.run(client);
        self.finish_generation(pending.ticket, result, Instant::now())
    }

    /// Explain the current selection into the explanation panel.
    /// With nothing selected this does nothing.
    pub fn explain(&mut self, client: impl AiClient) -> std::result::Result<&str, ExplainError> {
        let selection = self.selection.current(self.store.get());
        if selection.text.trim().is_empty() {
            return Err(ExplainError::NothingSelected);
        }

        self.explanation = Some(EXPLAIN_PENDING.to_string());
        let orchestrator = ExplainOrchestrator::new(
            client,
            self.settings.fast_model.clone(),
            self.settings.explain_language.clone(),
        );
        let (text, outcome) = match orchestrator.explain(&selection) {
            Ok(text) if text.trim().is_empty() => (NO_EXPLANATION.to_string(), Ok(())),
            Ok(text) => (text, Ok(())),
            Err(e) => {
                tracing::error!(error = %e, "explanation failed");
                (EXPLAIN_FAILED.to_string(), Err(e))
            }
        };
        let shown = self.explanation.insert(text);
        outcome.map(|()| shown.as_str())
    }

    pub fn close_explanation(&mut self) {
        self.explanation = None;
    }

    /// Load a file into a buffer, taking over its name.
    pub fn import(
        &mut self,
        path: &Path,
        kind: Option<BufferKind>,
        now: Instant,
    ) -> std::result::Result<BufferKind, ImportError> {
        let file = match import::import_file(path, kind) {
            Ok(file) => file,
            Err(e) => {
                self.status.post_error(e.user_message(), now);
                return Err(e);
            }
        };
        Ok(self.apply_import(file, now))
    }

    pub fn apply_import(&mut self, file: ImportedFile, now: Instant) -> BufferKind {
        let ImportedFile {
            kind,
            name,
            content,
            enables_component_mode,
        } = file;
        tracing::info!(%kind, name = %name, "buffer loaded from file");

        self.store.set(kind, content);
        self.store.set_display_name(kind, name.clone());
        if enables_component_mode {
            self.store.set_mode(true);
        }
        self.preview.refresh();
        self.status.post_status(format!("Loaded {}", name), now);
        kind
    }

    /// Write the project archive to `path`.
    pub fn export_to(&mut self, path: &Path, now: Instant) -> std::result::Result<PathBuf, ExportError> {
        self.status.post_progress(STATUS_EXPORTING, now);
        let written = archive::export_zip(self.store.get()).and_then(|bytes| {
            fs::write(path, bytes)?;
            Ok(path.to_path_buf())
        });
        match &written {
            Ok(path) => {
                tracing::info!(path = %path.display(), "project exported");
                self.status.post_status(STATUS_EXPORTED, now);
            }
            Err(e) => self.status.post_error(e.user_message(), now),
        }
        written
    }

    /// Append a library snippet to the active buffer.
    pub fn insert_snippet(&mut self, label: &str, now: Instant) -> Option<&'static Snippet> {
        let snippet = snippets::find(label)?;
        self.store.append(self.selection.active(), snippet.content);
        self.status.post_status(STATUS_SNIPPET_ADDED, now);
        Some(snippet)
    }

    pub fn clear(&mut self, now: Instant) {
        self.store.clear();
        self.selection.clear();
        self.status.post_status(STATUS_CLEARED, now);
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        theme.save(self.store.storage_mut())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}
