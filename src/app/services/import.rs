use std::fs;
use std::path::Path;

use thiserror::Error;

use super::text_ops::{extension_of, extract_filename};
use crate::app::domain::BufferKind;

/// Extensions that mark a file as React component source.
const COMPONENT_EXTENSIONS: [&str; 2] = ["jsx", "tsx"];

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not a UTF-8 text file")]
    NotText(String),

    #[error("cannot tell which buffer {0} belongs to; pass a kind")]
    UnknownKind(String),
}

impl ImportError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Read { path, .. } => format!("Could not read {}", extract_filename(path)),
            Self::NotText(name) => format!("{} is not a text file", name),
            Self::UnknownKind(name) => format!("Choose a buffer for {}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedFile {
    pub kind: BufferKind,
    /// File name, becomes the buffer's display name.
    pub name: String,
    pub content: String,
    /// The caller must switch on component mode before recomposing.
    pub enables_component_mode: bool,
}

pub fn import_file(path: &Path, kind: Option<BufferKind>) -> Result<ImportedFile, ImportError> {
    let display = path.to_string_lossy().to_string();
    let bytes = fs::read(path).map_err(|source| ImportError::Read {
        path: display.clone(),
        source,
    })?;
    let name = extract_filename(&display);
    let content = String::from_utf8(bytes).map_err(|_| ImportError::NotText(name.clone()))?;
    imported(name, content, kind)
}

/// Classify already-read text the same way `import_file` does.
pub fn imported(
    name: String,
    content: String,
    kind: Option<BufferKind>,
) -> Result<ImportedFile, ImportError> {
    let ext = extension_of(&name);
    let kind = match kind {
        Some(kind) => kind,
        None => ext
            .as_deref()
            .and_then(BufferKind::from_extension)
            .ok_or_else(|| ImportError::UnknownKind(name.clone()))?,
    };
    let enables_component_mode = ext
        .as_deref()
        .is_some_and(|e| COMPONENT_EXTENSIONS.contains(&e));

    tracing::debug!(%name, %kind, enables_component_mode, "file imported");
    Ok(ImportedFile {
        kind,
        name,
        content,
        enables_component_mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_infers_kind_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.css");
        fs::write(&path, "a{color:red}").unwrap();

        let file = import_file(&path, None).unwrap();
        assert_eq!(file.kind, BufferKind::Style);
        assert_eq!(file.name, "theme.css");
        assert_eq!(file.content, "a{color:red}");
        assert!(!file.enables_component_mode);
    }

    #[test]
    fn test_jsx_enables_component_mode() {
        let file = imported("App.JSX".to_string(), "x".to_string(), None).unwrap();
        assert_eq!(file.kind, BufferKind::Script);
        assert!(file.enables_component_mode);
    }

    #[test]
    fn test_explicit_kind_wins_and_tsx_still_flags() {
        let file = imported("widget.tsx".to_string(), "x".to_string(), Some(BufferKind::Markup)).unwrap();
        assert_eq!(file.kind, BufferKind::Markup);
        assert!(file.enables_component_mode);
    }

    #[test]
    fn test_unknown_extension_needs_kind() {
        let err = imported("notes.md".to_string(), "x".to_string(), None).unwrap_err();
        assert!(matches!(err, ImportError::UnknownKind(_)));
        assert!(imported("notes.md".to_string(), "x".to_string(), Some(BufferKind::Markup)).is_ok());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = import_file(Path::new("/definitely/not/here.html"), None).unwrap_err();
        assert!(matches!(err, ImportError::Read { .. }));
        assert_eq!(err.user_message(), "Could not read here.html");
    }

    #[test]
    fn test_binary_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.html");
        fs::write(&path, [0xffu8, 0xfe, 0x00, 0x80]).unwrap();
        assert!(matches!(import_file(&path, None), Err(ImportError::NotText(_))));
    }
}
