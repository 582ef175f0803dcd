use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "markz",
    bin_name = "markz",
    version = get_version(),
    disable_help_subcommand = true,
    after_help = "Items are FILE or FILE:LINE, relative to the current directory.\nRunning markz with no command lists bookmarks."
)]
#[command(about = "Line bookmarks for your workspace", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Workspace root (defaults to the nearest directory with .git or .markz)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub root: Option<PathBuf>,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Bookmark a line
    #[command(alias = "a", display_order = 1)]
    Add {
        /// File to bookmark
        file: PathBuf,

        /// Line number (1-based)
        line: u32,
    },

    /// Remove bookmarks (FILE:LINE) or whole files (FILE)
    #[command(alias = "rm", display_order = 2)]
    Remove {
        #[arg(required = true, num_args = 1.., value_name = "ITEM")]
        items: Vec<String>,
    },

    /// List bookmarks grouped by file
    #[command(alias = "ls", display_order = 3)]
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Re-read every bookmarked line and list the result
    #[command(display_order = 4)]
    Refresh,

    /// Print FILE:LINE of a bookmark, for handing to an editor
    #[command(display_order = 5)]
    Open {
        #[arg(value_name = "ITEM")]
        item: String,
    },

    /// Print the absolute path of a bookmarked file
    #[command(display_order = 6)]
    Reveal {
        #[arg(value_name = "ITEM")]
        item: String,
    },

    /// Print the location of the bookmarks document
    #[command(display_order = 7)]
    Path,

    /// Watch bookmarked files and print refreshed labels as they change
    #[command(display_order = 8)]
    Watch,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = parse(&["markz"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn add_parses_file_and_line() {
        let cli = parse(&["markz", "add", "src/main.rs", "12"]);
        assert_eq!(
            cli.command,
            Some(Commands::Add {
                file: PathBuf::from("src/main.rs"),
                line: 12
            })
        );
    }

    #[test]
    fn add_rejects_non_numeric_line() {
        assert!(Cli::try_parse_from(["markz", "add", "a.txt", "x"]).is_err());
    }

    #[test]
    fn remove_alias_and_multiple_items() {
        let cli = parse(&["markz", "rm", "a.txt:1", "b.txt"]);
        assert_eq!(
            cli.command,
            Some(Commands::Remove {
                items: vec!["a.txt:1".to_string(), "b.txt".to_string()]
            })
        );
        assert!(Cli::try_parse_from(["markz", "remove"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["markz", "list", "--json", "--root", "/ws", "-v"]);
        assert_eq!(cli.command, Some(Commands::List { json: true }));
        assert_eq!(cli.root, Some(PathBuf::from("/ws")));
        assert!(cli.verbose);
    }
}
