//! SQL template builders
//!
//! Every builder is a pure function: same input, byte-identical output.
//! Required inputs are validated before any text is produced, and values are
//! interpolated literally (no quote escaping).

mod error;

pub mod amendment;
pub mod mapping;
pub mod refresh;

pub use amendment::{AmendmentRequest, build_full_flow, build_post_check, build_pre_check, build_update};
pub use error::BuildError;
pub use mapping::{
    MappingRequest, build_all_steps, build_clone_config_row, build_config_check,
    build_config_lookup_existing, build_insert_map, build_lookup_query,
};
pub use refresh::{ProcedureTable, RefreshRequest, build_refresh_sql, build_refresh_sql_with};
