use std::io::{Cursor, Write};

use thiserror::Error;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::app::domain::WorkspaceState;

/// File name offered for the exported project.
pub const DEFAULT_ARCHIVE_NAME: &str = "ai_optimized_web_project.zip";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error while exporting: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    pub fn user_message(&self) -> String {
        format!("Export failed: {}", self)
    }
}

/// Package every non-empty buffer under its display name.
pub fn export_zip(state: &WorkspaceState) -> Result<Vec<u8>, ExportError> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));

    let mut entries = 0;
    for buffer in state.buffers() {
        if buffer.is_empty() {
            continue;
        }
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        writer.start_file(buffer.display_name.as_str(), options)?;
        writer.write_all(buffer.content.as_bytes())?;
        entries += 1;
    }

    let bytes = writer.finish()?.into_inner();
    tracing::debug!(entries, bytes = bytes.len(), "workspace archive built");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn entries(bytes: &[u8]) -> Vec<(String, String)> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut content = String::new();
                file.read_to_string(&mut content).unwrap();
                (file.name().to_string(), content)
            })
            .collect()
    }

    #[test]
    fn test_empty_style_is_omitted() {
        let state = WorkspaceState::new("<p>hi</p>", "", "go()", false);
        let files = entries(&export_zip(&state).unwrap());
        assert_eq!(
            files,
            vec![
                ("index.html".to_string(), "<p>hi</p>".to_string()),
                ("script.js".to_string(), "go()".to_string()),
            ]
        );
    }

    #[test]
    fn test_entries_use_display_names() {
        let mut state = WorkspaceState::new("a", "b", "c", true);
        state.script.display_name = "App.jsx".to_string();
        let names: Vec<String> = entries(&export_zip(&state).unwrap())
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["index.html", "style.css", "App.jsx"]);
    }

    #[test]
    fn test_all_empty_gives_valid_empty_archive() {
        let bytes = export_zip(&WorkspaceState::empty()).unwrap();
        assert!(entries(&bytes).is_empty());
    }
}
