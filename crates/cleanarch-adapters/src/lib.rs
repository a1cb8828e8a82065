//! Infrastructure adapters for CleanArch.
//!
//! This crate implements the ports defined in `cleanarch-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod process;
pub mod toolchain;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{RecordingCommandRunner, SystemCommandRunner};
pub use toolchain::{DEFAULT_PROGRAM, DotnetToolchain};
