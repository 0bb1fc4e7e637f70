use std::fs;
use std::path::{Path, PathBuf};

use crate::app::domain::WorkspaceState;
use crate::app::infrastructure::error::Result;
use crate::app::services::composer::{self, ComposedDocument, ReloadToken};
use crate::app::services::text_ops::escape_attribute;

/// Sandbox permissions granted to the framed document.
pub const SANDBOX_PERMISSIONS: &str = "allow-scripts allow-forms allow-same-origin";

pub const HOST_PAGE_NAME: &str = "preview.html";
pub const DOCUMENT_NAME: &str = "document.html";

pub struct PreviewController {
    token: ReloadToken,
    cached: Option<(WorkspaceState, ComposedDocument)>,
}

impl Default for PreviewController {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewController {
    pub fn new() -> Self {
        Self {
            token: ReloadToken::default(),
            cached: None,
        }
    }

    pub fn token(&self) -> ReloadToken {
        self.token
    }

    /// Force the next document to be treated as new.
    pub fn refresh(&mut self) -> ReloadToken {
        self.token = self.token.next();
        tracing::debug!(token = self.token.value(), "preview reload requested");
        self.token
    }

    /// Composed document for `state`, recomposed only when the state or the
    /// reload token changed since the last call.
    pub fn document(&mut self, state: &WorkspaceState) -> &ComposedDocument {
        let token = self.token;
        if self
            .cached
            .as_ref()
            .is_some_and(|(snapshot, doc)| snapshot != state || doc.revision != token.value())
        {
            self.cached = None;
        }
        let (_, doc) = self.cached.get_or_insert_with(|| {
            let doc = composer::compose(state, token);
            tracing::debug!(bytes = doc.html.len(), revision = doc.revision, "document composed");
            (state.clone(), doc)
        });
        doc
    }

    /// Write the document and its sandboxed host page into `dir`.
    /// Returns the host page path.
    pub fn write_surface(dir: &Path, doc: &ComposedDocument) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join(DOCUMENT_NAME), &doc.html)?;

        let host_path = dir.join(HOST_PAGE_NAME);
        fs::write(&host_path, host_page(doc))?;
        tracing::info!(path = %host_path.display(), "preview surface written");
        Ok(host_path)
    }
}

/// Default location for the preview surface.
pub fn preview_dir() -> PathBuf {
    std::env::temp_dir().join("tripad-preview")
}

pub fn host_page(doc: &ComposedDocument) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>Preview</title>\n\
         <style>html,body{{margin:0;height:100%;background:#fff}}iframe{{border:0;width:100%;height:100%}}</style>\n\
         </head>\n<body>\n<!-- revision {} -->\n<iframe title=\"preview\" sandbox=\"{}\" srcdoc=\"{}\"></iframe>\n</body>\n</html>\n",
        doc.revision,
        SANDBOX_PERMISSIONS,
        escape_attribute(&doc.html)
    )
}
