use crate::app::domain::{Selection, WorkspaceState};

pub const GENERATION_SYSTEM_INSTRUCTION: &str = "You are a World-Class Fullstack Engineer.
You will be given three web project files (HTML, CSS, and JS).
The user will request modifications.
Analyze the existing code across all files and update them to satisfy the request.

RULES:
1. ALWAYS return FULL content for \"html\", \"css\", and \"js\".
2. If \"React Mode\" is active, \"js\" contains JSX/React component code.
3. Use modern, accessible, and responsive practices (Tailwind CSS is available).
4. Ensure cross-file consistency.
5. Output ONLY a valid JSON object matching the schema.
6. If a file is missing or not needed, return it as empty string but keep the key.
7. Language should remain Arabic for UI elements if already in Arabic.";

/// Placeholder written in place of an empty buffer.
pub const EMPTY_BUFFER_MARKER: &str = "empty";

/// User content block for a generation request.
pub fn generation_content(instruction: &str, state: &WorkspaceState) -> String {
    let mut content = format!(
        "USER REQUEST: \"{}\"\nREACT MODE: {}\n\nCURRENT FILES:\n",
        instruction,
        if state.component_mode { "ENABLED" } else { "DISABLED" }
    );
    for buffer in state.buffers() {
        let body = if buffer.content.is_empty() {
            EMPTY_BUFFER_MARKER
        } else {
            buffer.content.as_str()
        };
        content.push_str(&format!("- {}: {}\n", buffer.display_name, body));
    }
    content
}

pub fn explain_system_instruction(language: &str) -> String {
    format!(
        "You are a professional software engineer. Explain code concisely in {}. Use markdown.",
        language
    )
}

pub fn explain_content(selection: &Selection, language: &str) -> String {
    format!(
        "Explain the following {} code in {} clearly. Focus on functionality. Code:\n\n{}",
        selection.source_kind.language_label(),
        language,
        selection.text
    )
}
