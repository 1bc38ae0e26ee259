//! linewrap - wrap text to a display width, from files, stdin, or the
//! command line
//!
//! Each unit of text (inline `--text` fragments first, then positional
//! files, `-` meaning stdin) is wrapped independently and streamed to stdout
//! or an output file.

pub mod config;
pub mod encoding;
pub mod escape;
pub mod output;
pub mod run;
pub mod wrap;

pub use config::{Indent, Overflow, Settings};
pub use encoding::Encoding;
pub use output::Output;
pub use run::run;
pub use wrap::{WrapOptions, Wrapper};
