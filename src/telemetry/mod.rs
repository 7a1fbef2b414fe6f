//! Interaction telemetry: the editor block mirror, structural fingerprints and the
//! per-exercise session record.

mod arena;
#[cfg(test)]
mod arena_test;
mod fingerprint;
mod recorder;
#[cfg(test)]
mod recorder_test;
mod summary;

pub use arena::BlockArena;
pub use fingerprint::{code_structure, code_structure_to_string, program_structure};
pub use recorder::Recorder;
pub use summary::SessionSummary;
