//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--verbose` / `-v`: Enable debug logging
//! - `--timeout` / `-t <secs>`: How long `ring` waits for a selection
//! - `--state-file <path>`: Ring state file to use
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

/// bring - Navigate a ring of recently visited git branches
#[derive(Parser, Debug)]
#[command(name = "bring")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if bring was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Seconds to wait for an interactive selection
    #[arg(short, long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Ring state file (overrides the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(
        long = "interactive",
        global = true,
        conflicts_with = "no_interactive"
    )]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set AND stdin is a TTY
    pub fn interactive(&self) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            std::io::stdin().is_terminal()
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check out a branch and add it to the ring
    #[command(
        name = "push",
        long_about = "Check out a branch and add it to the ring.\n\n\
            All arguments are passed to `git checkout` unchanged. The branch that \
            ends up checked out is inserted right after the current ring entry, or \
            selected if the ring already holds it.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Visit an existing branch
    bring push feature/login

    # Create a branch and remember where you came from
    bring push -b fix/typo"
    )]
    Push {
        /// Arguments for git checkout
        #[arg(
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "CHECKOUT_ARGS"
        )]
        args: Vec<String>,
    },

    /// Drop the current branch from the ring and go back
    #[command(
        name = "pop",
        long_about = "Remove the current branch from the ring and check out the \
            entry before it. The branch itself is not deleted.\n\n\
            Fails if the ring is empty."
    )]
    Pop,

    /// Check out the next branch in the ring
    Next,

    /// Check out the previous branch in the ring
    Prev,

    /// Print the current ring entry
    Curr,

    /// Show the ring and optionally jump to or delete entries
    #[command(
        name = "ring",
        long_about = "Show every branch in the ring with its ahead/behind status.\n\n\
            In an interactive terminal, bring then waits (see --timeout) for a \
            selection: a number checks out that entry, `d` followed by numbers \
            removes entries from the ring.",
        after_help = "\
SELECTION EXAMPLES:
    3        check out entry 3
    d 1 4    remove entries 1 and 4
    D2       remove entry 2"
    )]
    Ring,

    /// Remove ring entries whose branches no longer exist
    Clean,

    /// Run the built-in ring self-check
    Test,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for bring.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    bring completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    bring completion zsh >> ~/.zshrc

    # Fish
    bring completion fish > ~/.config/fish/completions/bring.fish

    # PowerShell
    bring completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
