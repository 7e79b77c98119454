//! # giddy
//!
//! **giddy** is a thin, friendly wrapper around the git CLI.
//!
//! Features:
//! - `giddy head` shows the branch, its upstream, pending changes and recent commits
//! - `giddy commit` records a commit, GPG-signed when a key is configured
//! - `giddy checkout` switches branches, defaulting to the previous one
//! - `giddy branch` creates a new branch from the current commit
//! - `giddy push` pushes the current branch, working out the right remote on first push
//! - `giddy gui` launches git's GUI
//!
//! This CLI is built with [clap](https://docs.rs/clap).

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use giddy::{
    GitCli, GitError, TerminalPrompt, cmd_branch, cmd_checkout, cmd_commit, cmd_gui, cmd_head,
    cmd_push, ensure_installed, load_settings,
};

/// Command-line interface definition.
///
/// Parsed using `clap` derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "giddy",
    version,
    about = "giddy - a thin, friendly wrapper around the git CLI",
    arg_required_else_help = true
)]
struct Cli {
    /// Echo every spawned git command line to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

/// Available subcommands.
///
/// Each variant corresponds to a subcommand of `giddy`.
#[derive(Subcommand, Debug)]
enum Cmd {
    /// Show the current branch, its upstream, pending changes and recent commits
    Head,
    /// Record a commit
    Commit {
        /// Commit message; omit to compose one in git's editor
        #[arg(short, long)]
        message: Option<String>,
        /// GPG sign the commit (enabled iff a signing key is configured)
        #[arg(long, overrides_with = "no_sign")]
        sign: bool,
        /// Do not GPG sign the commit
        #[arg(long)]
        no_sign: bool,
        /// Amend the previous commit
        #[arg(long, overrides_with = "no_amend")]
        amend: bool,
        /// Do not amend
        #[arg(long)]
        no_amend: bool,
    },
    /// Check out a branch (the previous one when omitted)
    Checkout {
        /// Branch to check out
        branch: Option<String>,
    },
    /// Create a new branch from the current commit
    Branch {
        /// Name of the branch to create
        name: String,
    },
    /// Push the current branch, configuring its upstream when needed
    Push {
        /// Remote to push to; omit to use (or work out) the usual one
        remote: Option<String>,
    },
    /// Launch git gui
    Gui,
}

/// CLI entry point.
///
/// Runs the selected subcommand and converts its outcome into an exit
/// code via [`report`].
fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

/// Parse arguments, wire up the git client and dispatch.
fn run() -> Result<()> {
    let cli = Cli::parse();

    ensure_installed()?;
    let cwd = env::current_dir().context("cannot determine current directory")?;
    let git = GitCli::new(cwd).verbose(cli.verbose);
    let settings = load_settings()?;

    match cli.cmd {
        Cmd::Head => cmd_head(&git, &settings),
        Cmd::Commit {
            message,
            sign,
            no_sign,
            amend,
            no_amend,
        } => {
            // flag pairs: the one given last wins, sign defaults on
            let sign = sign || !no_sign;
            let amend = amend && !no_amend;
            cmd_commit(&git, message.as_deref(), sign, amend)
        }
        Cmd::Checkout { branch } => cmd_checkout(&git, branch.as_deref()),
        Cmd::Branch { name } => cmd_branch(&git, &name),
        Cmd::Push { remote } => cmd_push(&git, &TerminalPrompt, &settings, remote.as_deref()),
        Cmd::Gui => cmd_gui(&git),
    }
}

/// Turn a failed run into the process exit code.
///
/// "No commits yet" is informational and exits 0. A git subcommand that
/// exited non-zero is reported with its command line, and its own exit
/// code is passed through. Everything else exits 1.
fn report(err: &anyhow::Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(git_err) = cause.downcast_ref::<GitError>() {
            return match git_err {
                GitError::NoCommits => {
                    println!("There are no commits yet in this repository.");
                    ExitCode::SUCCESS
                }
                GitError::CommandFailed { command, code, .. } => {
                    eprintln!(
                        "{}: exited with code {}",
                        command.yellow(),
                        code.to_string().red().bold()
                    );
                    ExitCode::from(u8::try_from(*code).unwrap_or(1))
                }
            };
        }
    }
    eprintln!("{} {:#}", "error:".red().bold(), err);
    ExitCode::FAILURE
}
