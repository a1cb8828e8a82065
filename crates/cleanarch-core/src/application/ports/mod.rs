//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `cleanarch-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `CommandRunner`: External process execution
//!   - `Toolchain`: Solution/project generation commands
//!   - `Filesystem`: File operations
//!   - `ScaffoldObserver`: Step progress (implemented by the CLI's output layer)
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    CommandOutput, CommandRunner, CommandSpec, Filesystem, ScaffoldObserver, SilentObserver,
    Toolchain,
};

#[cfg(test)]
pub use output::{MockFilesystem, MockToolchain};
