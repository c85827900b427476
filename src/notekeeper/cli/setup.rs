use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
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
#[command(name = "notekeeper", bin_name = "notekeeper", version = get_version())]
#[command(about = "Keep short notes, pinned ones first", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the note collection and config
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes, pinned first, one page at a time
    #[command(alias = "ls")]
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Add a note
    #[command(alias = "n")]
    Add {
        /// Title of the note (required)
        title: String,

        /// Short line shown under the title
        #[arg(short, long, default_value = "")]
        tagline: String,

        /// Note body
        #[arg(short, long, default_value = "")]
        body: String,
    },

    /// Change a note's title, tagline or body
    #[command(alias = "e")]
    Edit {
        /// Note id (a unique prefix is enough)
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        tagline: Option<String>,

        #[arg(short, long)]
        body: Option<String>,
    },

    /// Show a note in full
    #[command(alias = "v")]
    View {
        /// Note id (a unique prefix is enough)
        id: String,
    },

    /// Pin or unpin a note
    #[command(alias = "p")]
    Pin {
        /// Note id (a unique prefix is enough)
        id: String,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note id (a unique prefix is enough)
        id: String,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (page-size, collection)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_options() {
        let cli = Cli::try_parse_from(["notekeeper", "add", "Groceries", "-b", "milk"]).unwrap();
        match cli.command {
            Some(Commands::Add {
                title,
                tagline,
                body,
            }) => {
                assert_eq!(title, "Groceries");
                assert_eq!(tagline, "");
                assert_eq!(body, "milk");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn list_defaults_to_first_page() {
        let cli = Cli::try_parse_from(["notekeeper", "ls"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { page: 1 })));
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["notekeeper", "--data-dir", "/tmp/x"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
