use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the module installer.
#[derive(Parser, Debug)]
#[command(
    name = "psmod",
    about = "Install PowerShell modules from a local source tree",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Ask before each file-system change
    #[arg(long, global = true, conflicts_with = "dry_run")]
    pub confirm_each: bool,

    /// Settings document location
    #[arg(long, global = true, env = "PSMOD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory modules are installed into
    #[arg(long, global = true, env = "PSMOD_MODULE_ROOT")]
    pub module_root: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store the directory holding module source trees
    SetCodePath(SetCodePathOpts),
    /// Print the stored code path
    GetCodePath,
    /// Install a module into the user module directory
    Install(InstallOpts),
    /// Save a module (not implemented)
    Save(StubOpts),
    /// Show a module (not implemented)
    Show(StubOpts),
    /// Run a module's Pester tests
    Test(TestOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetCodePath(_) => "set-code-path",
            Self::GetCodePath => "get-code-path",
            Self::Install(_) => "install",
            Self::Save(_) => "save",
            Self::Show(_) => "show",
            Self::Test(_) => "test",
            Self::Version => "version",
        }
    }
}

/// Options for the `set-code-path` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SetCodePathOpts {
    /// Directory containing module source trees
    pub path: PathBuf,
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct InstallOpts {
    /// Module to install from the code path (defaults to the current directory)
    pub name: Option<String>,

    /// Replace an existing install of the same version
    #[arg(short, long)]
    pub force: bool,
}

/// Options for the unimplemented `save` and `show` subcommands.
#[derive(Parser, Debug, Clone)]
pub struct StubOpts {
    /// Module name
    pub name: Option<String>,
}

/// Options for the `test` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct TestOpts {
    /// Module to test
    pub name: String,

    /// Run only tests with this name (repeatable)
    #[arg(long = "test-name")]
    pub test_names: Vec<String>,

    /// Run only tests with this tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_install_without_name() {
        let cli = Cli::parse_from(["psmod", "install"]);
        assert!(
            matches!(&cli.command, Command::Install(opts) if opts.name.is_none() && !opts.force)
        );
    }

    #[test]
    fn parse_install_with_name_and_force() {
        let cli = Cli::parse_from(["psmod", "install", "Foo", "-f"]);
        assert!(matches!(&cli.command, Command::Install(_)), "Expected Install command");
        if let Command::Install(opts) = cli.command {
            assert_eq!(opts.name.as_deref(), Some("Foo"));
            assert!(opts.force);
        }
    }

    #[test]
    fn parse_dry_run_short() {
        let cli = Cli::parse_from(["psmod", "-d", "install"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_dry_run_after_subcommand() {
        let cli = Cli::parse_from(["psmod", "install", "--dry-run"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_confirm_each() {
        let cli = Cli::parse_from(["psmod", "--confirm-each", "install"]);
        assert!(cli.global.confirm_each);
    }

    #[test]
    fn dry_run_conflicts_with_confirm_each() {
        let res = Cli::try_parse_from(["psmod", "-d", "--confirm-each", "install"]);
        assert!(res.is_err());
    }

    #[test]
    fn parse_set_code_path() {
        let cli = Cli::parse_from(["psmod", "set-code-path", "/src/modules"]);
        assert!(matches!(&cli.command, Command::SetCodePath(_)));
        if let Command::SetCodePath(opts) = cli.command {
            assert_eq!(opts.path, PathBuf::from("/src/modules"));
        }
    }

    #[test]
    fn set_code_path_requires_argument() {
        assert!(Cli::try_parse_from(["psmod", "set-code-path"]).is_err());
    }

    #[test]
    fn parse_get_code_path() {
        let cli = Cli::parse_from(["psmod", "get-code-path"]);
        assert!(matches!(cli.command, Command::GetCodePath));
    }

    #[test]
    fn parse_stubs() {
        let save = Cli::parse_from(["psmod", "save", "Foo"]);
        assert!(matches!(save.command, Command::Save(_)));
        let show = Cli::parse_from(["psmod", "show"]);
        assert!(matches!(show.command, Command::Show(_)));
    }

    #[test]
    fn parse_test_filters() {
        let cli = Cli::parse_from([
            "psmod",
            "test",
            "Foo",
            "--test-name",
            "adds",
            "--test-name",
            "removes",
            "--tag",
            "fast",
        ]);
        assert!(matches!(&cli.command, Command::Test(_)));
        if let Command::Test(opts) = cli.command {
            assert_eq!(opts.name, "Foo");
            assert_eq!(opts.test_names, vec!["adds", "removes"]);
            assert_eq!(opts.tags, vec!["fast"]);
        }
    }

    #[test]
    fn test_requires_module_name() {
        assert!(Cli::try_parse_from(["psmod", "test"]).is_err());
    }

    #[test]
    fn parse_overrides() {
        let cli = Cli::parse_from([
            "psmod",
            "--config",
            "/tmp/s.json",
            "--module-root",
            "/tmp/mods",
            "install",
        ]);
        assert_eq!(cli.global.config, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(cli.global.module_root, Some(PathBuf::from("/tmp/mods")));
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["psmod", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["psmod", "-v", "install"]);
        assert!(cli.verbose);
    }

    #[test]
    fn command_names() {
        assert_eq!(Cli::parse_from(["psmod", "install"]).command.name(), "install");
        assert_eq!(
            Cli::parse_from(["psmod", "get-code-path"]).command.name(),
            "get-code-path"
        );
    }
}
