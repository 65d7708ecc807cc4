//! stream: closeable stream groups and replayable previews.
//!
//! `group` is the leaf; `preview` builds on it.

pub mod closeable;
pub mod replay;
pub mod group;
pub mod preview;
pub mod io;

pub use closeable::{CloseableStream, FileStream, NopClose};
pub use replay::ReplayBuffer;
pub use group::{Member, ReadOutcome, ReadStatus, SequentialStreamGroup};
pub use preview::{
    preview,
    preview_all,
    preview_all_with,
    preview_fill,
    preview_with,
    Preview,
    PreviewError,
    Previewed,
};
pub use io::{open_input, InputSource};
