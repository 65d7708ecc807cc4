//! preview-io
//!
//! Sequential groups of closeable streams, and previews that peek at the
//! head of a stream while still handing back the whole thing.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod config;
pub mod types;
pub mod utils;

pub mod telemetry;

// Stream layers
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::PreviewConfig;
    pub use crate::stream::{
        preview, preview_all, preview_fill, CloseableStream, Member, Preview, Previewed,
        SequentialStreamGroup,
    };
    pub use crate::types::StreamError;
}
