//! Command-line interface

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{AmendCommands, MappingCommands, RefreshCommands};

#[derive(Parser, Debug)]
#[command(name = "sql-builder")]
#[command(version, about = "Generate copy-pasteable SQL for API refresh, mapping and amendment workflows", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (overrides SQL_BUILDER_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the EXEC statement that refreshes API entity caches
    Refresh(RefreshCommands),

    /// Build the transaction-type mapping wizard SQL
    Mapping(MappingCommands),

    /// Build pre-check / UPDATE / post-check SQL for transaction amendments
    Amend(AmendCommands),

    /// Show refresh families, default target types and suggested fields
    Defaults,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use super::commands::{AmendStep, MappingStep, ReportFormat};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_refresh() {
        let cli = Cli::try_parse_from([
            "sql-builder",
            "refresh",
            "codes.xlsx",
            "--family",
            "IMIX",
            "--types",
            "Contact,Account",
            "--custom-types",
            "CustomType",
            "--debug",
            "--report",
            "json",
        ])
        .unwrap();

        let Commands::Refresh(args) = cli.command else {
            panic!("expected refresh command");
        };
        assert_eq!(args.file, Some(PathBuf::from("codes.xlsx")));
        assert_eq!(args.family.as_deref(), Some("IMIX"));
        assert_eq!(args.types, Some(vec!["Contact".to_string(), "Account".to_string()]));
        assert_eq!(args.custom_types.as_deref(), Some("CustomType"));
        assert!(args.debug);
        assert!(!args.no_dedupe);
        assert_eq!(args.report, ReportFormat::Json);
    }

    #[test]
    fn test_parse_mapping_step() {
        let cli = Cli::try_parse_from([
            "sql-builder",
            "mapping",
            "--source-id",
            "348",
            "--code",
            "CACR0",
            "--existing",
            "SCSHS",
            "--step",
            "clone",
        ])
        .unwrap();

        let Commands::Mapping(args) = cli.command else {
            panic!("expected mapping command");
        };
        assert_eq!(args.step, MappingStep::Clone);
        assert_eq!(args.existing.as_deref(), Some("SCSHS"));
    }

    #[test]
    fn test_parse_amend_fields() {
        let cli = Cli::try_parse_from([
            "sql-builder",
            "amend",
            "--ref",
            "IMIX.CT.1",
            "--ref",
            "IMIX.CT.2",
            "--set",
            "Narrative2=Employer Contribution",
            "--set",
            "TransactionTypeExternal=EMPLOYER",
        ])
        .unwrap();

        let Commands::Amend(args) = cli.command else {
            panic!("expected amend command");
        };
        assert_eq!(args.refs, vec!["IMIX.CT.1", "IMIX.CT.2"]);
        assert_eq!(
            args.set,
            vec![
                ("Narrative2".to_string(), "Employer Contribution".to_string()),
                ("TransactionTypeExternal".to_string(), "EMPLOYER".to_string()),
            ]
        );
        assert_eq!(args.step, AmendStep::Full);
    }

    #[test]
    fn test_amend_set_requires_equals() {
        let result = Cli::try_parse_from(["sql-builder", "amend", "--ref", "X", "--set", "Narrative2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sql-builder", "defaults", "--verbose", "--no-color"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(matches!(cli.command, Commands::Defaults));
    }
}
