//! Application services (use case orchestration).

pub mod executor;
pub mod scaffold_service;

pub use executor::ScaffoldExecutor;
pub use scaffold_service::ScaffoldService;
