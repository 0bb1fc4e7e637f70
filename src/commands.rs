//! Subcommand handlers. Each one opens the persisted workspace, applies one
//! editor operation and prints the outcome.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tri_pad::app::controllers::preview::{PreviewController, preview_dir};
use tri_pad::app::controllers::{ExplainError, GenerationError, NoticeKind};
use tri_pad::app::services::archive::{DEFAULT_ARCHIVE_NAME, ExportError};
use tri_pad::app::services::import::ImportError;
use tri_pad::app::services::snippets::{self, SNIPPETS};
use tri_pad::app::services::text_ops::parse_range;
use tri_pad::app::{
    AppError, BufferKind, EditorSettings, FileStorage, GeminiClient, GenerationOutcome, Theme,
};

use crate::cli::{Command, ExplainArgs, ModeArg, SetArgs, ThemeArg};

type Editor = tri_pad::app::Editor<FileStorage>;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Explain(#[from] ExplainError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("{0}")]
    Usage(String),
}

impl CommandError {
    pub fn user_message(&self) -> String {
        match self {
            Self::App(e @ AppError::Settings(_)) => e.to_string(),
            Self::App(e) => format!("{} {}", e.user_message(), e),
            Self::Generation(e) => e.user_message(),
            Self::Explain(e) => e.user_message().to_string(),
            Self::Import(e) => e.user_message(),
            Self::Export(e) => e.user_message(),
            Self::Usage(message) => message.clone(),
        }
    }
}

impl From<io::Error> for CommandError {
    fn from(e: io::Error) -> Self {
        Self::App(AppError::Io(e))
    }
}

pub fn run(command: Command, data_dir: Option<PathBuf>) -> Result<(), CommandError> {
    let settings = EditorSettings::load();
    let storage = match data_dir.or_else(|| settings.data_dir.as_ref().map(PathBuf::from)) {
        Some(dir) => FileStorage::new(dir),
        None => FileStorage::platform_default(),
    };
    tracing::debug!(root = %storage.root().display(), "opening workspace");
    let mut editor = Editor::new(storage, settings);

    match command {
        Command::Show { kind } => show(&editor, kind),
        Command::Set(args) => set(&mut editor, args),
        Command::Name { kind, name } => {
            editor.store.set_display_name(kind, name);
            Ok(())
        }
        Command::Mode { mode } => {
            editor.set_component_mode(matches!(mode, ModeArg::Component));
            Ok(())
        }
        Command::Compose { out } => compose(&mut editor, out.as_deref()),
        Command::Preview { no_open } => preview(&mut editor, no_open),
        Command::Generate { instruction, fast } => generate(&mut editor, instruction, fast),
        Command::Explain(args) => explain(&mut editor, args),
        Command::Export { out } => {
            let out = out.unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE_NAME));
            let written = editor.export_to(&out, Instant::now())?;
            println!("{}", written.display());
            Ok(())
        }
        Command::Import { path, kind } => {
            editor.import(&path, kind, Instant::now())?;
            report_status(&editor);
            Ok(())
        }
        Command::Snippets => {
            for snippet in &SNIPPETS {
                println!("{:<14} {}", snippet.label, snippet.kind);
            }
            Ok(())
        }
        Command::Snippet { label, kind } => snippet(&mut editor, &label, kind),
        Command::Clear => {
            editor.clear(Instant::now());
            report_status(&editor);
            Ok(())
        }
        Command::Theme { choice } => theme(&mut editor, choice),
    }
}

fn show(editor: &Editor, kind: Option<BufferKind>) -> Result<(), CommandError> {
    let state = editor.workspace();
    if let Some(kind) = kind {
        let mut stdout = io::stdout().lock();
        stdout.write_all(state.content(kind).as_bytes())?;
        writeln!(stdout)?;
        return Ok(());
    }

    for buffer in state.buffers() {
        println!(
            "{:<4} {:<16} {} chars",
            buffer.kind.language_label(),
            buffer.display_name,
            buffer.content.chars().count()
        );
    }
    println!(
        "mode: {}",
        if state.component_mode { "component" } else { "plain" }
    );
    println!("theme: {}", editor.theme.as_str());
    Ok(())
}

fn set(editor: &mut Editor, args: SetArgs) -> Result<(), CommandError> {
    let content = match (args.text, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(&path)?,
        (None, None) => return Err(CommandError::Usage("pass --text or --file".to_string())),
    };
    editor.edit(args.kind, content);
    Ok(())
}

fn compose(editor: &mut Editor, out: Option<&Path>) -> Result<(), CommandError> {
    let html = editor.document().html.clone();
    match out {
        Some(path) => fs::write(path, html)?,
        None => print!("{}", html),
    }
    Ok(())
}

fn preview(editor: &mut Editor, no_open: bool) -> Result<(), CommandError> {
    let doc = editor.document().clone();
    let host = PreviewController::write_surface(&preview_dir(), &doc)?;
    println!("{}", host.display());
    if !no_open {
        open::that(&host)?;
    }
    Ok(())
}

fn generate(editor: &mut Editor, instruction: String, fast: bool) -> Result<(), CommandError> {
    if fast {
        editor.deep_reasoning = false;
    }
    let client = GeminiClient::from_settings(&editor.settings)?;
    editor.instruction = instruction;

    match editor.generate(&client) {
        GenerationOutcome::Applied => {
            report_status(editor);
            Ok(())
        }
        GenerationOutcome::Discarded => Ok(()),
        GenerationOutcome::Failed(e) => Err(e.into()),
    }
}

fn explain(editor: &mut Editor, args: ExplainArgs) -> Result<(), CommandError> {
    editor.focus(args.kind);
    match (args.text, args.range) {
        (Some(text), _) => editor.selection.select_text(editor.store.get(), text),
        (None, Some(range)) => {
            let (start, end) = parse_range(&range).ok_or_else(|| {
                CommandError::Usage(format!("invalid range '{}', expected START..END", range))
            })?;
            editor.selection.select_range(editor.store.get(), start, end);
        }
        (None, None) => return Err(CommandError::Usage("pass --text or --range".to_string())),
    }

    let client = GeminiClient::from_settings(&editor.settings)?;
    let text = editor.explain(&client)?;
    println!("{}", text);
    Ok(())
}

fn snippet(editor: &mut Editor, label: &str, kind: Option<BufferKind>) -> Result<(), CommandError> {
    let found = snippets::find(label)
        .ok_or_else(|| CommandError::Usage(format!("no snippet named '{}'", label)))?;
    editor.focus(kind.unwrap_or(found.kind));
    editor.insert_snippet(found.label, Instant::now());
    report_status(editor);
    Ok(())
}

fn theme(editor: &mut Editor, choice: Option<ThemeArg>) -> Result<(), CommandError> {
    let theme = match choice {
        None => editor.theme,
        Some(ThemeArg::Toggle) => editor.toggle_theme()?,
        Some(ThemeArg::Dark) => {
            editor.set_theme(Theme::Dark)?;
            Theme::Dark
        }
        Some(ThemeArg::Light) => {
            editor.set_theme(Theme::Light)?;
            Theme::Light
        }
    };
    println!("{}", theme.as_str());
    Ok(())
}

fn report_status(editor: &Editor) {
    if let Some(notice) = editor.status.current() {
        if notice.kind == NoticeKind::Status {
            println!("{}", notice.text);
        }
    }
}
