//! CLI argument parsing for noaqh-dev.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// noaqh-dev: Prompt distribution CLI and MCP companion for AI coding assistants.
///
/// Prompts are markdown files generated from the tool's own templates:
/// - `generate` renders them into the intermediate prompts directory
/// - `install` fans them out to assistant tool directories
/// - `serve` exposes the same content over MCP
#[derive(Parser, Debug)]
#[command(name = "noaqh-dev")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for noaqh-dev.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install prompt files into assistant tool directories.
    ///
    /// Copies the generated prompts to every built-in target (codex, claude,
    /// codex-skills, claude-skills), or to one named target. A failing
    /// target is reported and the rest still run.
    Install(InstallArgs),

    /// Generate the installable prompt set.
    ///
    /// Copies static templates (rewriting path placeholders) and runs the
    /// dynamic prompt generators into the intermediate prompts directory.
    Generate(GenerateArgs),

    /// Check whether the remote branch has commits the local one lacks.
    ///
    /// Fetches the remote branch and prints the ahead count with an update
    /// hint, or an up-to-date message.
    CheckUpdate(CheckUpdateArgs),

    /// Run lint and agent review over changed files.
    ///
    /// Collects the changed files for the selected scope, runs oxlint and
    /// biome over them, then asks the agent CLI for a prose review.
    Review(ReviewArgs),

    /// Serve the prompt tools over MCP on stdio.
    ///
    /// Speaks JSON-RPC 2.0, one message per line, until stdin closes.
    Serve,
}

/// Arguments for the `install` command.
#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Source directory of generated prompts. Defaults to the tool's own
    /// prompts directory.
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Destination directory. Defaults to each target's own destination.
    #[arg(long)]
    pub dest_dir: Option<PathBuf>,

    /// Filename prefix for flat targets (default "n-").
    #[arg(long)]
    pub prefix: Option<String>,

    /// Install into a single named target (codex, claude, codex-skills,
    /// claude-skills) instead of all of them.
    #[arg(long)]
    pub target: Option<String>,
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Static template directory. Defaults to the tool's template/prompts.
    #[arg(long)]
    pub template_dir: Option<PathBuf>,

    /// Output directory for generated prompts. Defaults to the tool's
    /// prompts directory.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the `check-update` command.
#[derive(Parser, Debug)]
pub struct CheckUpdateArgs {
    /// Remote to fetch from.
    #[arg(long, default_value = "origin")]
    pub remote: String,

    /// Branch to compare against its remote-tracking counterpart.
    #[arg(long, default_value = "main")]
    pub branch: String,

    /// Repository to check. Defaults to the current directory.
    #[arg(long)]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the `review` command.
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// Base branch for the diff range.
    #[arg(long, default_value = "main")]
    pub base: String,

    /// Review only working tree and index changes, ignoring branch history.
    #[arg(long)]
    pub uncommitted_only: bool,

    /// Lint the whole tree instead of just the changed files.
    #[arg(long)]
    pub all_files: bool,

    /// Skip the lint wrappers.
    #[arg(long)]
    pub no_lint: bool,

    /// Skip the agent review.
    #[arg(long)]
    pub no_agent: bool,

    /// Agent command line to invoke for the review.
    #[arg(long, default_value = crate::review::agent::DEFAULT_AGENT_COMMAND)]
    pub agent: String,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_install_minimal() {
        let cli = Cli::try_parse_from(["noaqh-dev", "install"]).unwrap();
        if let Command::Install(args) = cli.command {
            assert!(args.source_dir.is_none());
            assert!(args.dest_dir.is_none());
            assert!(args.prefix.is_none());
            assert!(args.target.is_none());
        } else {
            panic!("Expected Install command");
        }
    }

    #[test]
    fn parse_install_full() {
        let cli = Cli::try_parse_from([
            "noaqh-dev",
            "install",
            "--source-dir",
            "/tmp/prompts",
            "--dest-dir",
            "/tmp/out",
            "--prefix",
            "x-",
            "--target",
            "codex",
        ])
        .unwrap();
        if let Command::Install(args) = cli.command {
            assert_eq!(args.source_dir, Some(PathBuf::from("/tmp/prompts")));
            assert_eq!(args.dest_dir, Some(PathBuf::from("/tmp/out")));
            assert_eq!(args.prefix.as_deref(), Some("x-"));
            assert_eq!(args.target.as_deref(), Some("codex"));
        } else {
            panic!("Expected Install command");
        }
    }

    #[test]
    fn parse_generate() {
        let cli = Cli::try_parse_from([
            "noaqh-dev",
            "generate",
            "--template-dir",
            "/tmp/templates",
            "--output-dir",
            "/tmp/prompts",
        ])
        .unwrap();
        if let Command::Generate(args) = cli.command {
            assert_eq!(args.template_dir, Some(PathBuf::from("/tmp/templates")));
            assert_eq!(args.output_dir, Some(PathBuf::from("/tmp/prompts")));
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn parse_check_update_defaults() {
        let cli = Cli::try_parse_from(["noaqh-dev", "check-update"]).unwrap();
        if let Command::CheckUpdate(args) = cli.command {
            assert_eq!(args.remote, "origin");
            assert_eq!(args.branch, "main");
            assert!(args.cwd.is_none());
        } else {
            panic!("Expected CheckUpdate command");
        }
    }

    #[test]
    fn parse_check_update_custom_remote() {
        let cli = Cli::try_parse_from([
            "noaqh-dev",
            "check-update",
            "--remote",
            "upstream",
            "--branch",
            "develop",
        ])
        .unwrap();
        if let Command::CheckUpdate(args) = cli.command {
            assert_eq!(args.remote, "upstream");
            assert_eq!(args.branch, "develop");
        } else {
            panic!("Expected CheckUpdate command");
        }
    }

    #[test]
    fn parse_review_defaults() {
        let cli = Cli::try_parse_from(["noaqh-dev", "review"]).unwrap();
        if let Command::Review(args) = cli.command {
            assert_eq!(args.base, "main");
            assert!(!args.uncommitted_only);
            assert!(!args.all_files);
            assert!(!args.no_lint);
            assert!(!args.no_agent);
            assert_eq!(args.agent, "claude");
        } else {
            panic!("Expected Review command");
        }
    }

    #[test]
    fn parse_review_flags() {
        let cli = Cli::try_parse_from([
            "noaqh-dev",
            "review",
            "--base",
            "develop",
            "--uncommitted-only",
            "--all-files",
            "--no-lint",
            "--no-agent",
            "--agent",
            "claude --model sonnet",
        ])
        .unwrap();
        if let Command::Review(args) = cli.command {
            assert_eq!(args.base, "develop");
            assert!(args.uncommitted_only);
            assert!(args.all_files);
            assert!(args.no_lint);
            assert!(args.no_agent);
            assert_eq!(args.agent, "claude --model sonnet");
        } else {
            panic!("Expected Review command");
        }
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["noaqh-dev", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["noaqh-dev", "frobnicate"]).is_err());
    }
}
