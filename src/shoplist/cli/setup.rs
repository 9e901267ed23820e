use clap::{Parser, Subcommand};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "shoplist", bin_name = "shoplist", version = get_version())]
#[command(about = "A persisted shopping list for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an item to the top of the list
    #[command(alias = "a")]
    Add {
        /// Name of the item (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// List items, active first
    #[command(alias = "ls")]
    List {
        /// Hide completed items
        #[arg(long)]
        active: bool,
    },

    /// Mark items as completed, or reopen completed ones
    #[command(alias = "x")]
    Done {
        /// Indexes or a name (e.g. 1 3 c2, 2-4, "oat milk")
        #[arg(required = true, num_args = 1..)]
        items: Vec<String>,
    },

    /// Delete items
    #[command(alias = "rm")]
    Delete {
        /// Indexes or a name (e.g. 1 3 c2, 2-4, "oat milk")
        #[arg(required = true, num_args = 1..)]
        items: Vec<String>,
    },

    /// Show the recurring countdown
    Counter {
        /// Record a completion now
        #[arg(long)]
        done: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., storage-key)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

/// Route `log` output to stderr. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "shoplist=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_joins_words() {
        let cli = Cli::parse_from(["shoplist", "add", "oat", "milk"]);
        match cli.command {
            Some(Commands::Add { name }) => assert_eq!(name.join(" "), "oat milk"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["shoplist"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn aliases_resolve() {
        let cli = Cli::parse_from(["shoplist", "x", "c1"]);
        assert!(matches!(cli.command, Some(Commands::Done { .. })));
        let cli = Cli::parse_from(["shoplist", "rm", "2", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Delete { .. })));
    }

    #[test]
    fn done_requires_items() {
        assert!(Cli::try_parse_from(["shoplist", "done"]).is_err());
    }
}
