//! Turn operator-entered identifiers into copy-pasteable SQL
//!
//! - [`ingest`] reads codes from CSV / spreadsheet bytes or pasted text and
//!   classifies them.
//! - [`sql`] holds the template builders for the refresh EXEC call, the
//!   mapping wizard and the amendment flow.
//!
//! Nothing here connects to a database; every call is a pure transformation.

pub mod cli;
pub mod config;
pub mod constants;
pub mod ingest;
pub mod sql;
