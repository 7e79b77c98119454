use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::{CommitRequest, DiffScope, DiffStat, Git, GitError, LogRange, TrackingRef};

const GIT: &str = "git";

/// Confirm the git executable is reachable before any dispatch.
///
/// # Errors
/// Returns an error naming the missing binary when git is not on PATH.
pub fn ensure_installed() -> Result<()> {
    which::which(GIT)
        .map(|_| ())
        .context("`git` not found on PATH (is git installed?)")
}

/// The real backend: spawns `git` subcommands in the repository the
/// process was started in.
///
/// Uses the git CLI rather than a libgit2 binding so credentials, hooks
/// and transport behave exactly as the user's own git does, and so child
/// exit codes can propagate back to the shell unchanged.
///
/// Two spawn modes, per the queries/passthroughs split:
/// - [`GitCli::capture`] pipes and trims stdout for internal queries,
///   keeping stderr away from the terminal;
/// - [`GitCli::run`] inherits the caller's stdio for user-facing
///   subcommands (push, checkout, log, commit, gui).
pub struct GitCli {
    cwd: PathBuf,
    verbose: bool,
}

impl GitCli {
    /// A client rooted at `cwd`. The directory is the explicit repository
    /// context for every spawned command; nothing else reads process state.
    pub fn new(cwd: PathBuf) -> GitCli {
        GitCli {
            cwd,
            verbose: false,
        }
    }

    /// Echo each git command line to stderr before running it.
    pub fn verbose(mut self, verbose: bool) -> GitCli {
        self.verbose = verbose;
        self
    }

    fn command_line(args: &[&str]) -> String {
        format!("{} {}", GIT, args.join(" "))
    }

    fn trace(&self, args: &[&str]) {
        if self.verbose {
            eprintln!("{}", format!("+ {}", Self::command_line(args)).dimmed());
        }
    }

    /// Run a query, returning stdout trimmed of surrounding whitespace.
    /// stderr is piped (never shown) and retained in the failure for
    /// classification.
    fn capture(&self, args: &[&str]) -> Result<String> {
        self.trace(args);
        let output = Command::new(GIT)
            .args(args)
            .current_dir(&self.cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("failed to execute {}", Self::command_line(args)))?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: Self::command_line(args),
                code: output.status.code().unwrap_or(1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run an optional query: a failing child means "nothing there".
    fn capture_optional(&self, args: &[&str]) -> Option<String> {
        self.capture(args).ok().filter(|out| !out.is_empty())
    }

    /// Run a user-facing subcommand with inherited stdio, so git's own
    /// output, colors, pager and editor all reach the terminal.
    fn run(&self, args: &[&str]) -> Result<()> {
        self.trace(args);
        let status = Command::new(GIT)
            .args(args)
            .current_dir(&self.cwd)
            .status()
            .with_context(|| format!("failed to execute {}", Self::command_line(args)))?;

        if !status.success() {
            return Err(GitError::CommandFailed {
                command: Self::command_line(args),
                code: status.code().unwrap_or(1),
                stderr: String::new(),
            }
            .into());
        }

        Ok(())
    }
}

/// stderr markers git emits when HEAD has no commit behind it. The exact
/// wording shifted across git versions, hence the list.
fn is_unborn_head(stderr: &str) -> bool {
    ["unknown revision", "ambiguous argument", "Needed a single revision"]
        .iter()
        .any(|marker| stderr.contains(marker))
}

impl Git for GitCli {
    fn current_branch(&self) -> Result<String> {
        match self.capture(&["rev-parse", "--abbrev-ref", "HEAD"]) {
            Ok(name) => Ok(name),
            Err(err) => {
                if let Some(GitError::CommandFailed { stderr, .. }) =
                    err.downcast_ref::<GitError>()
                    && is_unborn_head(stderr)
                {
                    return Err(GitError::NoCommits.into());
                }
                Err(err)
            }
        }
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        let out = self.capture(&["for-each-ref", "--format=%(refname:short)", "refs/heads"])?;
        Ok(out.lines().map(|line| line.to_string()).collect())
    }

    fn upstream(&self, branch: &str) -> Result<Option<TrackingRef>> {
        let rev = format!("{}@{{upstream}}", branch);
        Ok(self
            .capture_optional(&["rev-parse", "--abbrev-ref", &rev])
            .and_then(|short_ref| TrackingRef::parse(&short_ref)))
    }

    fn remotes(&self) -> Result<Vec<String>> {
        let out = self.capture_optional(&["remote"]).unwrap_or_default();
        Ok(out.lines().map(|line| line.to_string()).collect())
    }

    fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.run(&["remote", "add", name, url])
    }

    fn toplevel(&self) -> Result<PathBuf> {
        let path = self.capture(&["rev-parse", "--show-toplevel"])?;
        Ok(PathBuf::from(path))
    }

    fn diff_stat(&self, scope: DiffScope) -> Result<Option<DiffStat>> {
        let args: &[&str] = match scope {
            DiffScope::Worktree => &["diff", "--shortstat"],
            DiffScope::Staged => &["diff", "--shortstat", "--staged"],
        };
        Ok(DiffStat::parse(&self.capture(args)?))
    }

    fn signing_key(&self) -> Result<Option<String>> {
        Ok(self.capture_optional(&["config", "--get", "user.signingkey"]))
    }

    fn show_log(&self, range: &LogRange) -> Result<()> {
        match range {
            LogRange::Latest => self.run(&["log", "--format=format:%aN: %s", "-1"]),
            LogRange::Since(base) => {
                let rev_range = format!("{}..HEAD", base);
                self.run(&["log", "--format=format:%aN: %s", &rev_range])
            }
        }
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", "-u", remote, branch])
    }

    fn checkout(&self, target: &str) -> Result<()> {
        self.run(&["checkout", target])
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.run(&["checkout", "-b", name])
    }

    fn commit(&self, request: &CommitRequest) -> Result<()> {
        let mut args = vec!["commit"];
        if request.amend {
            args.push("--amend");
        }
        if request.sign {
            args.push("-S");
        } else {
            args.push("--no-gpg-sign");
        }
        if let Some(message) = &request.message {
            args.push("-m");
            args.push(message);
        }
        self.run(&args)
    }

    fn launch_gui(&self) -> Result<()> {
        self.run(&["gui"])
    }
}
