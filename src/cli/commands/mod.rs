//! CLI command implementations.

mod config;
mod digest;
mod doctor;
mod summarize;
mod transcribe;

pub use config::run_config;
pub use digest::run_digest;
pub use doctor::run_doctor;
pub use summarize::run_summarize;
pub use transcribe::run_transcribe;
