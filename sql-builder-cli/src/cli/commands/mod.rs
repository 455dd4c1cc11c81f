//! Subcommand definitions and their handlers

pub mod amend;
pub mod defaults;
pub mod mapping;
pub mod refresh;

pub use amend::{AmendCommands, AmendStep};
pub use mapping::{MappingCommands, MappingStep};
pub use refresh::{RefreshCommands, ReportFormat};
