//! Encoded streams: line-oriented character I/O over raw byte sources and
//! sinks.

mod input;
mod output;
mod raw;


pub use input::EncodedInput;
pub use output::EncodedOutput;
pub use raw::{IoInput, IoOutput, RawInput, RawOutput};
