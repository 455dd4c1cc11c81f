//! EXEC builder for the API refresh stored procedures
//!
//! Output is pasted straight into a SQL client, so the layout is fixed:
//!
//! ```text
//! EXEC <procedure>
//!     @EntityCodes = 'A,B',
//!     @TargetTypes = 'Contact,Account';
//! ```
//!
//! With `debug` a trailing `@debug = 1;` line is added and the
//! `@TargetTypes` line ends with a comma instead.

use indexmap::IndexMap;

use super::BuildError;
use crate::constants::STORED_PROCEDURES;

/// Refresh family -> fully-qualified stored procedure name, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureTable {
    procedures: IndexMap<String, String>,
}

impl Default for ProcedureTable {
    fn default() -> Self {
        Self {
            procedures: STORED_PROCEDURES
                .iter()
                .map(|(family, proc)| (family.to_string(), proc.to_string()))
                .collect(),
        }
    }
}

impl ProcedureTable {
    /// Built-in table extended with `extra` entries.
    ///
    /// An extra entry with a built-in key replaces that procedure in place;
    /// new keys are appended in the order given.
    pub fn with_extra<'a, I>(extra: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut table = Self::default();
        for (family, proc) in extra {
            table.procedures.insert(family.clone(), proc.clone());
        }
        table
    }

    pub fn get(&self, family: &str) -> Option<&str> {
        self.procedures.get(family).map(String::as_str)
    }

    pub fn contains(&self, family: &str) -> bool {
        self.procedures.contains_key(family)
    }

    /// Family names in display order
    pub fn families(&self) -> Vec<String> {
        self.procedures.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.procedures.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Look up the procedure for `family`, failing with the allowed set
    pub fn resolve(&self, family: &str) -> Result<&str, BuildError> {
        self.get(family).ok_or_else(|| BuildError::UnknownFamily {
            family: family.to_string(),
            allowed: self.families(),
        })
    }
}

/// Inputs for one refresh EXEC statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshRequest {
    pub codes: Vec<String>,
    pub family: String,
    pub target_types: Vec<String>,
    pub debug: bool,
}

impl RefreshRequest {
    pub fn new(codes: Vec<String>, family: impl Into<String>, target_types: Vec<String>, debug: bool) -> Self {
        Self {
            codes,
            family: family.into(),
            target_types,
            debug,
        }
    }

    /// Build the EXEC statement against a specific procedure table
    pub fn build(&self, procedures: &ProcedureTable) -> Result<String, BuildError> {
        build_refresh_sql_with(procedures, &self.codes, &self.family, &self.target_types, self.debug)
    }
}

/// Build the EXEC statement using the built-in procedure table
pub fn build_refresh_sql<S: AsRef<str>, T: AsRef<str>>(
    codes: &[S],
    family: &str,
    target_types: &[T],
    debug: bool,
) -> Result<String, BuildError> {
    build_refresh_sql_with(&ProcedureTable::default(), codes, family, target_types, debug)
}

/// Build the EXEC statement, resolving `family` in `procedures`
pub fn build_refresh_sql_with<S: AsRef<str>, T: AsRef<str>>(
    procedures: &ProcedureTable,
    codes: &[S],
    family: &str,
    target_types: &[T],
    debug: bool,
) -> Result<String, BuildError> {
    let codes = clean_list(codes);
    if codes.is_empty() {
        return Err(BuildError::NoCodes);
    }
    let target_types = clean_list(target_types);
    if target_types.is_empty() {
        return Err(BuildError::NoTargetTypes);
    }
    let procedure = procedures.resolve(family)?;

    let codes_str = codes.join(",");
    let types_str = target_types.join(",");

    let mut lines = vec![
        format!("EXEC {}", procedure),
        format!("    @EntityCodes = '{}',", codes_str),
    ];
    if debug {
        lines.push(format!("    @TargetTypes = '{}',", types_str));
        lines.push("    @debug = 1;".to_string());
    } else {
        lines.push(format!("    @TargetTypes = '{}';", types_str));
    }

    log::info!("Generated refresh SQL ({} codes, debug={})", codes.len(), debug);
    Ok(lines.join("\n"))
}

/// Trim entries and drop blanks
fn clean_list<S: AsRef<str>>(items: &[S]) -> Vec<&str> {
    items
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODES: &[&str] = &["CODE1", "CODE2", "CODE3"];
    const TYPES: &[&str] = &["Contact", "Account", "CustomerAddress"];

    #[test]
    fn test_global_plus_no_debug() {
        let sql = build_refresh_sql(CODES, "Global Plus", TYPES, false).unwrap();
        let expected = "EXEC [ServiceBroker].[crm_MSCRM].[Entity_Process_Log__ManualInsert_GlobalPlus]\n\
                        \x20   @EntityCodes = 'CODE1,CODE2,CODE3',\n\
                        \x20   @TargetTypes = 'Contact,Account,CustomerAddress';";
        assert_eq!(sql, expected);
    }

    #[test]
    fn test_imix_with_debug() {
        let sql = build_refresh_sql(CODES, "IMIX", TYPES, true).unwrap();
        let expected = "EXEC [ServiceBroker].[crm_MSCRM].[Entity_Process_Log__ManualInsert_IMIX]\n\
                        \x20   @EntityCodes = 'CODE1,CODE2,CODE3',\n\
                        \x20   @TargetTypes = 'Contact,Account,CustomerAddress',\n\
                        \x20   @debug = 1;";
        assert_eq!(sql, expected);
    }

    #[test]
    fn test_debug_adds_exactly_one_line() {
        let plain = build_refresh_sql(CODES, "IMIX", TYPES, false).unwrap();
        let debug = build_refresh_sql(CODES, "IMIX", TYPES, true).unwrap();
        assert_eq!(debug.lines().count(), plain.lines().count() + 1);
        assert!(!plain.contains("@debug"));
        assert_eq!(debug.matches("@debug").count(), 1);
    }

    #[test]
    fn test_deterministic_output() {
        let a = build_refresh_sql(CODES, "Global Plus", TYPES, false).unwrap();
        let b = build_refresh_sql(CODES, "Global Plus", TYPES, false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_code_single_type() {
        let sql = build_refresh_sql(&["ONLY"], "Global Plus", &["Contact"], false).unwrap();
        assert!(sql.contains("@EntityCodes = 'ONLY'"));
        assert!(sql.contains("@TargetTypes = 'Contact';"));
    }

    #[test]
    fn test_combined_target_types() {
        let sql = build_refresh_sql(&["X"], "IMIX", &["Contact", "Account", "CustomType"], false).unwrap();
        assert!(sql.contains("@TargetTypes = 'Contact,Account,CustomType';"));
    }

    #[test]
    fn test_no_codes() {
        let codes: &[&str] = &[];
        let err = build_refresh_sql(codes, "IMIX", &["Contact"], false).unwrap_err();
        assert_eq!(err, BuildError::NoCodes);
        assert!(err.to_string().contains("No codes"));
    }

    #[test]
    fn test_no_target_types() {
        let types: &[&str] = &[];
        let err = build_refresh_sql(&["A"], "IMIX", types, false).unwrap_err();
        assert_eq!(err, BuildError::NoTargetTypes);
        assert!(err.to_string().contains("No target types"));
    }

    #[test]
    fn test_blank_codes_rejected() {
        assert_eq!(
            build_refresh_sql(&["  "], "IMIX", &["Contact"], false).unwrap_err(),
            BuildError::NoCodes
        );
        assert_eq!(
            build_refresh_sql(&["", " \t"], "IMIX", &["Contact"], false).unwrap_err(),
            BuildError::NoCodes
        );
    }

    #[test]
    fn test_blank_target_types_rejected() {
        assert_eq!(
            build_refresh_sql(&["A"], "IMIX", &[""], false).unwrap_err(),
            BuildError::NoTargetTypes
        );
        assert_eq!(
            build_refresh_sql(&["A"], "IMIX", &[" "], false).unwrap_err(),
            BuildError::NoTargetTypes
        );
    }

    #[test]
    fn test_blank_entries_dropped_and_rest_trimmed() {
        let sql = build_refresh_sql(&[" A ", "", "B"], "IMIX", &["Contact ", " ", "Account"], false).unwrap();
        assert!(sql.contains("@EntityCodes = 'A,B',"));
        assert!(sql.contains("@TargetTypes = 'Contact,Account';"));
    }

    #[test]
    fn test_unknown_family() {
        let err = build_refresh_sql(&["A"], "BadFamily", &["Contact"], false).unwrap_err();
        assert!(err.to_string().contains("Unknown refresh family 'BadFamily'"));
        assert!(err.to_string().contains("Global Plus, IMIX"));
    }

    #[test]
    fn test_trailing_semicolon() {
        for debug in [true, false] {
            let sql = build_refresh_sql(&["A"], "IMIX", &["Contact"], debug).unwrap();
            assert!(sql.trim_end().ends_with(';'));
        }
    }

    #[test]
    fn test_extra_families() {
        let mut extra = IndexMap::new();
        extra.insert("Sandbox".to_string(), "[Dev].[dbo].[Refresh_Sandbox]".to_string());
        extra.insert("IMIX".to_string(), "[Other].[dbo].[Refresh_IMIX]".to_string());
        let table = ProcedureTable::with_extra(&extra);

        assert_eq!(table.families(), vec!["Global Plus", "IMIX", "Sandbox"]);
        assert_eq!(table.get("IMIX"), Some("[Other].[dbo].[Refresh_IMIX]"));

        let request = RefreshRequest::new(vec!["A".into()], "Sandbox", vec!["Contact".into()], false);
        let sql = request.build(&table).unwrap();
        assert!(sql.starts_with("EXEC [Dev].[dbo].[Refresh_Sandbox]\n"));
    }
}
