//! Fixed tables shared by the ingestion pipeline and the SQL builders

/// Built-in refresh families and the stored procedure each one calls.
///
/// Order matters: it is the order families are listed in error messages and
/// in `sql-builder defaults`.
pub const STORED_PROCEDURES: &[(&str, &str)] = &[
    (
        "Global Plus",
        "[ServiceBroker].[crm_MSCRM].[Entity_Process_Log__ManualInsert_GlobalPlus]",
    ),
    (
        "IMIX",
        "[ServiceBroker].[crm_MSCRM].[Entity_Process_Log__ManualInsert_IMIX]",
    ),
];

/// Target types offered by default (custom types are appended after these)
pub const DEFAULT_TARGET_TYPES: &[&str] = &[
    "Contact",
    "Account",
    "CustomerAddress",
    "ft_Product",
    "ProductAffiliations",
];

/// Body of the identifier pattern; anchored by `CodePattern`
pub const CODE_PATTERN: &str = r"[A-Za-z0-9_\-]+";

// Mapping workflow
pub const MAPPING_TABLE: &str = "Aurora.IMIX.TransactionTypes_TransactionTypeExternal_Map";
pub const MAPPING_CONFIG_TABLE: &str = "Aurora.IMIX.TransactionTypes_TransactionTypeExternal_Config";
pub const MAPPING_PROC: &str = "Aurora.IMIX.TransactionTypes_InsertMap";

/// Columns copied when cloning a config row. The first one is the key column
/// that gets overwritten with the new code.
pub const CONFIG_COLUMNS: &[&str] = &[
    "TransactionTypeExternal",
    "TransactionType",
    "TransferType",
    "Shares",
    "TDW_Description",
    "TDW_SourceTable",
];

// Amendments workflow
pub const CRM_TRANSACTIONS_TABLE: &str = "ClientTransactions.mba.transactions";
pub const CRM_CONTRIBUTIONS_TABLE: &str = "ClientTransactions.mba.transactions_contribution";

/// Fields operators usually amend; any other column name is accepted too
pub const CRM_UPDATABLE_FIELDS: &[&str] = &["Narrative2", "TransactionTypeExternal"];

/// How many valid codes the refresh command previews
pub const PREVIEW_COUNT: usize = 25;
