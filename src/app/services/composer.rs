//! Turns the three buffers into one HTML document for the preview surface.
//!
//! Composition is a pure function of the workspace snapshot and the reload
//! token. Three shapes come out of it:
//!
//! - a fixed placeholder when every buffer is blank,
//! - a React harness when component mode is on (Babel transpiles the script
//!   buffer in the browser, an import map resolves `react`/`react-dom`),
//! - otherwise either the markup itself, when it is already a full document,
//!   with style and script injected, or a synthesized document around it.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::app::domain::{BufferKind, WorkspaceState};

pub const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
pub const BABEL_STANDALONE_CDN: &str = "https://unpkg.com/@babel/standalone/babel.min.js";
pub const REACT_ESM: &str = "https://esm.sh/react@18.2.0";
pub const REACT_DOM_CLIENT_ESM: &str = "https://esm.sh/react-dom@18.2.0/client";
pub const LUCIDE_REACT_ESM: &str = "https://esm.sh/lucide-react";

/// Element id the component harness renders into.
pub const MOUNT_ID: &str = "root";

pub const PLACEHOLDER_DOCUMENT: &str = "<html><body style=\"background:#020617;color:#94a3b8;display:flex;justify-content:center;align-items:center;height:100vh;margin:0;font-family:sans-serif;direction:rtl;\"><div>بانتظار ملفاتك...</div></body></html>";

static FULL_DOCUMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<html").expect("static pattern"));

static MOUNT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"id\s*=\s*["']root["']"#).expect("static pattern"));

/// Opaque counter; a new value forces the preview to reload even when the
/// composed text is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ReloadToken(u64);

impl ReloadToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedDocument {
    pub html: String,
    pub revision: u64,
}

impl ComposedDocument {
    pub fn is_placeholder(&self) -> bool {
        self.html == PLACEHOLDER_DOCUMENT
    }
}

pub fn compose(state: &WorkspaceState, token: ReloadToken) -> ComposedDocument {
    ComposedDocument {
        html: compose_html(
            state.content(BufferKind::Markup),
            state.content(BufferKind::Style),
            state.content(BufferKind::Script),
            state.component_mode,
        ),
        revision: token.value(),
    }
}

pub fn compose_html(markup: &str, style: &str, script: &str, component_mode: bool) -> String {
    let markup = markup.trim();
    let style = style.trim();
    let script = script.trim();

    if markup.is_empty() && style.is_empty() && script.is_empty() {
        return PLACEHOLDER_DOCUMENT.to_string();
    }

    if component_mode {
        return component_document(markup, style, script);
    }

    if is_full_document(markup) {
        inject_into_document(markup, style, script)
    } else {
        synthesize_document(markup, style, script)
    }
}

/// Markup counts as a full document when it opens an `<html` tag anywhere.
pub fn is_full_document(markup: &str) -> bool {
    FULL_DOCUMENT.is_match(markup)
}

pub fn has_mount_marker(markup: &str) -> bool {
    MOUNT_MARKER.is_match(markup)
}

fn style_block(style: &str) -> String {
    if style.is_empty() {
        String::new()
    } else {
        format!("<style>{}</style>", style)
    }
}

fn script_block(script: &str) -> String {
    if script.is_empty() {
        String::new()
    } else {
        format!("<script>{}</script>", script)
    }
}

/// Splice style before `</head>` and script before `</body>`, skipping
/// whichever text the document already contains verbatim. The check is a
/// substring test, so reformatted copies are not recognised.
fn inject_into_document(markup: &str, style: &str, script: &str) -> String {
    let mut combined = markup.to_string();

    if !style.is_empty() && !combined.contains(style) {
        combined = combined.replacen("</head>", &format!("{}</head>", style_block(style)), 1);
    }
    if !script.is_empty() && !combined.contains(script) {
        combined = combined.replacen("</body>", &format!("{}</body>", script_block(script)), 1);
    }

    combined
}

fn synthesize_document(markup: &str, style: &str, script: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"ar\" dir=\"rtl\"><head><meta charset=\"UTF-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\
         <script src=\"{tailwind}\"></script>{style}</head><body>{markup}{script}</body></html>",
        tailwind = TAILWIND_CDN,
        style = style_block(style),
        markup = markup,
        script = script_block(script),
    )
}

fn component_document(markup: &str, style: &str, script: &str) -> String {
    let mount = if has_mount_marker(markup) {
        markup.to_string()
    } else {
        format!("<div id=\"{}\"></div>", MOUNT_ID)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="ar" dir="rtl">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <script src="{tailwind}"></script>
    <script src="{babel}"></script>
    <script type="importmap">
    {{
      "imports": {{
        "react": "{react}",
        "react-dom": "{react_dom}",
        "lucide-react": "{lucide}"
      }}
    }}
    </script>
    <style>
      body {{ margin: 0; min-height: 100vh; }}
      {style}
    </style>
  </head>
  <body>
    {mount}
    <script type="text/babel" data-type="module">
      import React from 'react';
      import {{ createRoot }} from 'react-dom';
      try {{
        {script}
        if (typeof App !== 'undefined') {{
          const root = createRoot(document.getElementById('{mount_id}'));
          root.render(<App />);
        }}
      }} catch (err) {{
        document.getElementById('{mount_id}').innerHTML = '<div style="color:red;padding:20px;font-family:monospace;direction:ltr;">React Error: ' + err.message + '</div>';
      }}
    </script>
  </body>
</html>
"#,
        tailwind = TAILWIND_CDN,
        babel = BABEL_STANDALONE_CDN,
        react = REACT_ESM,
        react_dom = REACT_DOM_CLIENT_ESM,
        lucide = LUCIDE_REACT_ESM,
        style = style,
        mount = mount,
        script = script,
        mount_id = MOUNT_ID,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(markup: &str, style: &str, script: &str, component_mode: bool) -> String {
        compose(
            &WorkspaceState::new(markup, style, script, component_mode),
            ReloadToken::default(),
        )
        .html
    }

    #[test]
    fn test_blank_buffers_yield_placeholder_in_both_modes() {
        assert_eq!(doc("", "", "", false), PLACEHOLDER_DOCUMENT);
        assert_eq!(doc("  \n", "\t", " ", true), PLACEHOLDER_DOCUMENT);
    }

    #[test]
    fn test_fragment_gets_synthesized_document() {
        let html = doc("<p>hi</p>", "", "", false);
        assert!(html.starts_with("<!DOCTYPE html><html lang=\"ar\" dir=\"rtl\">"));
        assert!(html.contains("<body><p>hi</p></body>"));
        assert!(html.contains(TAILWIND_CDN));
        assert!(!html.contains("<style>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_fragment_with_style_and_script() {
        let html = doc(" <p>hi</p> ", "p{color:red}\n", "alert(1)", false);
        assert!(html.contains("<style>p{color:red}</style></head>"));
        assert!(html.contains("<body><p>hi</p><script>alert(1)</script></body>"));
    }

    #[test]
    fn test_style_injected_before_head_close() {
        let html = doc(
            "<html><head></head><body></body></html>",
            "b{color:red}",
            "",
            false,
        );
        assert_eq!(
            html,
            "<html><head><style>b{color:red}</style></head><body></body></html>"
        );
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_full_document_detection_is_case_insensitive() {
        let html = doc("<!doctype html><HTML><head></head><body>x</body></HTML>", "", "go()", false);
        assert!(!html.contains("<!DOCTYPE html><html lang"));
        assert!(html.contains("<script>go()</script></body>"));
    }

    #[test]
    fn test_html_tag_anywhere_counts() {
        let html = doc("<!-- wrapper --><div><html><body></body></html></div>", "", "x()", false);
        assert!(html.starts_with("<!-- wrapper -->"));
        assert!(html.contains("<script>x()</script></body>"));
    }

    #[test]
    fn test_injection_does_not_duplicate_existing_content() {
        let first = doc("<html><head></head><body></body></html>", "b{}", "run()", false);
        // Markup regenerated to include its own style and script
        let second = doc(&first, "b{}", "run()", false);
        assert_eq!(first, second);
        assert_eq!(second.matches("<style>").count(), 1);
        assert_eq!(second.matches("<script>").count(), 1);
    }

    #[test]
    fn test_composition_is_deterministic() {
        let state = WorkspaceState::new("<html><head></head><body></body></html>", "b{}", "run()", false);
        assert_eq!(compose(&state, ReloadToken::new(3)), compose(&state, ReloadToken::new(3)));
    }

    #[test]
    fn test_substring_guard_is_approximate() {
        // The script text happens to appear inside the markup already
        let html = doc("<html><head></head><body><p>run()</p></body></html>", "", "run()", false);
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_missing_head_close_drops_style() {
        let html = doc("<html><body></body></html>", "b{}", "", false);
        assert_eq!(html, "<html><body></body></html>");
    }

    #[test]
    fn test_component_mode_harness() {
        let html = doc("", "h1{}", "function App() { return <h1>Hi</h1>; }", true);
        assert!(html.contains(BABEL_STANDALONE_CDN));
        assert!(html.contains("\"react-dom\": \"https://esm.sh/react-dom@18.2.0/client\""));
        assert!(html.contains("h1{}"));
        assert!(html.contains("<script type=\"text/babel\" data-type=\"module\">"));
        assert!(html.contains("if (typeof App !== 'undefined')"));
        assert!(html.contains("React Error: "));
        assert_eq!(html.matches("id=\"root\"").count(), 1);
        assert_eq!(html.matches("try {").count(), 1);
    }

    #[test]
    fn test_component_mode_without_marker_uses_empty_mount() {
        let html = doc("<p>ignored</p>", "", "const x = 1;", true);
        assert!(html.contains("<div id=\"root\"></div>"));
        assert!(!html.contains("<p>ignored</p>"));
    }

    #[test]
    fn test_component_mode_with_marker_embeds_markup() {
        let markup = "<main class=\"app\"><div id=\"root\">loading</div></main>";
        let html = doc(markup, "", "const x = 1;", true);
        assert!(html.contains(markup));
        assert!(!html.contains("<div id=\"root\"></div>"));
        assert_eq!(html.matches("id=\"root\"").count(), 1);
        assert_eq!(html.matches("try {").count(), 1);
    }

    #[test]
    fn test_component_mode_never_injects_plain_tags() {
        let html = doc("<html><head></head><body></body></html>", "", "x", true);
        assert!(html.contains("<div id=\"root\"></div>"));
        assert!(!html.contains("<script>x</script>"));
    }

    #[test]
    fn test_revision_follows_token() {
        let state = WorkspaceState::new("<p>a</p>", "", "", false);
        let a = compose(&state, ReloadToken::new(1));
        let b = compose(&state, ReloadToken::new(1).next());
        assert_eq!(a.html, b.html);
        assert_eq!(b.revision, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_mount_marker_accepts_single_quotes() {
        assert!(has_mount_marker("<div id='root'></div>"));
        assert!(has_mount_marker("<div id = \"root\"></div>"));
        assert!(!has_mount_marker("<div id=\"rooted\"></div>"));
    }
}
