//! medical-note-cue: audio cue tone plus a spoken medical note.

pub mod config;
pub mod sequence;
pub mod speech;
pub mod tone;

#[cfg(test)]
pub(crate) mod test_support;

pub use sequence::{run_sequence, RunReport};
