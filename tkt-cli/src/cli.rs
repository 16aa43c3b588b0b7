//! Command-line arguments and database selection

use clap::Parser;
use std::path::PathBuf;
use tkt_common::config::{resolve_database_path, TomlConfig};

/// Command-line arguments for tkt
///
/// `TKT_DATABASE` is not bound to an argument; [`resolve_database_path`]
/// reads it along with the other sources.
#[derive(Parser, Debug)]
#[command(name = "tkt")]
#[command(about = "Event ticketing record-keeper")]
#[command(version)]
pub struct Args {
    /// SQLite database file (overrides TKT_DATABASE and config)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log filter for stderr output (overrides RUST_LOG and config)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use a throwaway in-memory database
    #[arg(long, conflicts_with = "db")]
    pub in_memory: bool,
}

/// Where the session's records live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    Memory,
    File(PathBuf),
}

impl Args {
    pub fn database_target(&self, config: &TomlConfig) -> DatabaseTarget {
        if self.in_memory {
            return DatabaseTarget::Memory;
        }
        DatabaseTarget::File(resolve_database_path(self.db.as_deref(), config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_conflicts_with_explicit_db() {
        let err = Args::try_parse_from(["tkt", "--in-memory", "--db", "/tmp/x.db"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_explicit_db_is_used() {
        let args = Args::try_parse_from(["tkt", "--db", "/srv/tkt/events.db"]).unwrap();
        assert_eq!(
            args.database_target(&TomlConfig::default()),
            DatabaseTarget::File(PathBuf::from("/srv/tkt/events.db"))
        );
    }
}
