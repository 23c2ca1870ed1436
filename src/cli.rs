use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flatdb")]
#[command(about = "Flat-file record store with fixed-length text schemas", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// 作用域相关的全局参数
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Use local configuration (./.flatdb)
    #[arg(short, long, global = true)]
    pub local: bool,

    /// Use global configuration (~/.flatdb)
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Storage directory holding the database files (overrides config)
    #[arg(long, global = true, env = "FLATDB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Initialize flatdb configuration (optional, defaults apply without it)")]
    Init,

    #[command(about = "Create a new database")]
    Create {
        /// Database name
        name: String,

        /// Field definition as NAME:MAX_LEN[:numeric], repeatable; prompts when omitted
        #[arg(short = 'f', long = "field")]
        fields: Vec<String>,
    },

    #[command(about = "List all databases")]
    List,

    #[command(about = "Display all records of a database as a table")]
    Show {
        /// Database name
        name: String,

        /// Print records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Add a record")]
    Add {
        /// Database name
        name: String,

        /// Field value as FIELD=VALUE, repeatable; missing fields are prompted
        #[arg(short = 's', long = "set")]
        values: Vec<String>,
    },

    #[command(about = "Edit a record")]
    Edit {
        /// Database name
        name: String,

        /// Record number (starting at 1)
        record: usize,

        /// Replacement as FIELD=VALUE, repeatable; prompts for every field when omitted
        #[arg(short = 's', long = "set")]
        values: Vec<String>,
    },

    #[command(about = "Delete a record")]
    Remove {
        /// Database name
        name: String,

        /// Record number (starting at 1)
        record: usize,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    #[command(about = "Delete a whole database (DANGEROUS operation)")]
    Drop {
        /// Database name
        name: String,

        /// Skip confirmation prompt (use with caution)
        #[arg(short, long)]
        force: bool,
    },

    #[command(about = "Interactive menu")]
    Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::parse_from([
            "flatdb", "create", "students", "-f", "name:20", "-f", "rollNo:5:numeric", "--local",
        ]);

        assert!(cli.scope.local);
        match cli.command {
            Commands::Create { name, fields } => {
                assert_eq!(name, "students");
                assert_eq!(fields, vec!["name:20", "rollNo:5:numeric"]);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_parse_edit() {
        let cli = Cli::parse_from(["flatdb", "edit", "students", "2", "-s", "name=Bea"]);

        match cli.command {
            Commands::Edit { name, record, values } => {
                assert_eq!(name, "students");
                assert_eq!(record, 2);
                assert_eq!(values, vec!["name=Bea"]);
            }
            _ => panic!("expected edit"),
        }
    }
}
