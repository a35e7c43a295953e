//! Board access: capability decoding, register sessions and handles.

pub mod capabilities;
pub mod handle;
pub mod session;

pub use capabilities::BoardCapabilities;
pub use handle::{BoardHandle, BoardSummary, ChromaSubsampling};
pub use session::RegisterSession;
