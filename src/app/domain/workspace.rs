use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three editable buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferKind {
    Markup,
    Style,
    Script,
}

impl BufferKind {
    pub const ALL: [BufferKind; 3] = [BufferKind::Markup, BufferKind::Style, BufferKind::Script];

    /// Key used for this buffer in AI responses.
    pub fn wire_key(self) -> &'static str {
        match self {
            BufferKind::Markup => "html",
            BufferKind::Style => "css",
            BufferKind::Script => "js",
        }
    }

    /// Upper-case language label used in prompts.
    pub fn language_label(self) -> &'static str {
        match self {
            BufferKind::Markup => "HTML",
            BufferKind::Style => "CSS",
            BufferKind::Script => "JS",
        }
    }

    pub fn default_display_name(self) -> &'static str {
        match self {
            BufferKind::Markup => "index.html",
            BufferKind::Style => "style.css",
            BufferKind::Script => "script.js",
        }
    }

    /// Guess the buffer kind from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<BufferKind> {
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Some(BufferKind::Markup),
            "css" => Some(BufferKind::Style),
            "js" | "mjs" | "jsx" | "ts" | "tsx" => Some(BufferKind::Script),
            _ => None,
        }
    }
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_key())
    }
}

impl FromStr for BufferKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" | "markup" => Ok(BufferKind::Markup),
            "css" | "style" => Ok(BufferKind::Style),
            "js" | "script" => Ok(BufferKind::Script),
            other => Err(format!("unknown buffer '{}' (expected html, css or js)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    pub kind: BufferKind,
    pub content: String,
    pub display_name: String,
    /// Bumped on every mutation; selections remember the value they saw.
    pub generation: u64,
}

impl Buffer {
    pub fn new(kind: BufferKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            display_name: kind.default_display_name().to_string(),
            generation: 0,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub(crate) fn replace(&mut self, content: String) {
        self.content = content;
        self.generation += 1;
    }
}

/// The three buffers plus the component-mode flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceState {
    pub markup: Buffer,
    pub style: Buffer,
    pub script: Buffer,
    /// Script buffer holds React/JSX source to be transpiled in the browser.
    pub component_mode: bool,
}

impl WorkspaceState {
    /// Workspace with the given contents and default display names.
    pub fn new(
        markup: impl Into<String>,
        style: impl Into<String>,
        script: impl Into<String>,
        component_mode: bool,
    ) -> Self {
        Self {
            markup: Buffer::new(BufferKind::Markup, markup),
            style: Buffer::new(BufferKind::Style, style),
            script: Buffer::new(BufferKind::Script, script),
            component_mode,
        }
    }

    pub fn empty() -> Self {
        Self::new("", "", "", false)
    }

    pub fn buffer(&self, kind: BufferKind) -> &Buffer {
        match kind {
            BufferKind::Markup => &self.markup,
            BufferKind::Style => &self.style,
            BufferKind::Script => &self.script,
        }
    }

    pub fn buffer_mut(&mut self, kind: BufferKind) -> &mut Buffer {
        match kind {
            BufferKind::Markup => &mut self.markup,
            BufferKind::Style => &mut self.style,
            BufferKind::Script => &mut self.script,
        }
    }

    pub fn buffers(&self) -> [&Buffer; 3] {
        [&self.markup, &self.style, &self.script]
    }

    pub fn content(&self, kind: BufferKind) -> &str {
        &self.buffer(kind).content
    }

    /// Replace all three contents at once. Names and mode are kept.
    pub fn replace_all(&mut self, markup: String, style: String, script: String) {
        self.markup.replace(markup);
        self.style.replace(style);
        self.script.replace(script);
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new(DEFAULT_MARKUP, DEFAULT_STYLE, DEFAULT_SCRIPT, false)
    }
}

pub const DEFAULT_MARKUP: &str = "<!-- المحتوى يظهر هنا -->\n<div class=\"p-8 text-center\">\n  <h1 class=\"text-4xl font-bold mb-4\">أهلاً بك في المحرر الذكي</h1>\n  <p class=\"text-lg opacity-80 text-gray-400\">ارفع ملفاتك أو ابدأ بكتابة الوصف للتعديل</p>\n</div>";

pub const DEFAULT_STYLE: &str = "body { background-color: #0f172a; color: white; transition: all 0.3s; }";

pub const DEFAULT_SCRIPT: &str = "console.log(\"المحرر جاهز!\");";

pub fn default_content(kind: BufferKind) -> &'static str {
    match kind {
        BufferKind::Markup => DEFAULT_MARKUP,
        BufferKind::Style => DEFAULT_STYLE,
        BufferKind::Script => DEFAULT_SCRIPT,
    }
}
