pub mod buffers;
pub mod explain;
pub mod generation;
pub mod preview;
pub mod sequencer;
pub mod status;

pub use buffers::BufferStore;
pub use explain::{ExplainError, ExplainOrchestrator};
pub use generation::{GenerationError, GenerationOrchestrator};
pub use preview::PreviewController;
pub use sequencer::{RequestSequencer, Ticket};
pub use status::{Notice, NoticeKind, StatusBoard};
