//! CLI argument definitions for tripad.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tri_pad::app::BufferKind;

#[derive(Parser)]
#[command(
    name = "tripad",
    version,
    about = "Three-buffer web editor with a live preview and AI-assisted rewriting",
    long_about = "Edit a small web project as three buffers (markup, style, script),\n\
                  preview the composed page, and let a language model rewrite all\n\
                  three from a plain-language instruction."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Directory holding the persisted workspace (default: platform data dir).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print one buffer, or a summary of the workspace.
    Show {
        #[arg(value_name = "KIND")]
        kind: Option<BufferKind>,
    },

    /// Replace a buffer's content.
    Set(SetArgs),

    /// Rename a buffer (used for prompts and export).
    Name {
        #[arg(value_name = "KIND")]
        kind: BufferKind,
        name: String,
    },

    /// Switch between component (React) and plain mode.
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },

    /// Print the composed preview document.
    Compose {
        /// Write to a file instead of stdout.
        #[arg(long = "out", value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Write the sandboxed preview page and open it in the browser.
    Preview {
        #[arg(long = "no-open")]
        no_open: bool,
    },

    /// Rewrite all three buffers from an instruction.
    Generate {
        instruction: String,

        /// Use the fast model without extended reasoning.
        #[arg(long = "fast")]
        fast: bool,
    },

    /// Explain a piece of one buffer.
    Explain(ExplainArgs),

    /// Export the non-empty buffers as a ZIP archive.
    Export {
        #[arg(long = "out", value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Load a file into a buffer.
    Import {
        path: PathBuf,

        /// Target buffer (default: guessed from the extension).
        #[arg(long = "kind", value_name = "KIND")]
        kind: Option<BufferKind>,
    },

    /// List the snippet library.
    Snippets,

    /// Append a library snippet to a buffer.
    Snippet {
        label: String,

        /// Target buffer (default: the snippet's own kind).
        #[arg(long = "kind", value_name = "KIND")]
        kind: Option<BufferKind>,
    },

    /// Empty all three buffers.
    Clear,

    /// Show or change the colour theme.
    Theme {
        #[arg(value_enum)]
        choice: Option<ThemeArg>,
    },
}

#[derive(Args)]
#[command(group(clap::ArgGroup::new("source").required(true).args(["text", "file"])))]
pub struct SetArgs {
    #[arg(value_name = "KIND")]
    pub kind: BufferKind,

    #[arg(long = "text")]
    pub text: Option<String>,

    /// Read the content from a file.
    #[arg(long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
#[command(group(clap::ArgGroup::new("selection").required(true).args(["text", "range"])))]
pub struct ExplainArgs {
    #[arg(value_name = "KIND")]
    pub kind: BufferKind,

    /// The selected text.
    #[arg(long = "text")]
    pub text: Option<String>,

    /// Char offsets into the buffer, as START..END.
    #[arg(long = "range", value_name = "A..B")]
    pub range: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Component,
    Plain,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
    Toggle,
}
