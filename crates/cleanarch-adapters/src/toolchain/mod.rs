//! Toolchain adapters.

mod dotnet;

pub use dotnet::{DEFAULT_PROGRAM, DotnetToolchain};
