//! Git integration layer.
//!
//! This module defines the narrow client interface (`Git`) the rest of the
//! crate talks to, plus the typed results crossing that boundary. The only
//! real implementation (`cli`) shells out to the `git` executable; commands
//! and the upstream resolver stay testable against an in-memory fake.
//!
//! String splitting of git's output is confined to this module. Everything
//! leaving it is typed: absent or malformed data is `None`, never a sentinel
//! string.

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use regex::Regex;
use thiserror::Error;

mod cli;
#[cfg(test)]
pub(crate) mod fake;

pub use cli::{GitCli, ensure_installed};

/// Failures the top level tells apart when choosing an exit code.
///
/// Everything else travels as a plain `anyhow` error and exits 1.
#[derive(Debug, Error)]
pub enum GitError {
    /// The repository has no history yet; reported and treated as success.
    #[error("there are no commits yet in this repository")]
    NoCommits,
    /// A child process exited non-zero. The whole program exits with the
    /// same code, naming the command that failed.
    #[error("{command}: exited with code {code}")]
    CommandFailed {
        command: String,
        code: i32,
        /// Captured stderr, kept for classification only; never shown raw.
        stderr: String,
    },
}

/// A branch's upstream tracking link, split out of the short ref
/// (`origin/feature/x` → remote `origin`, branch `feature/x`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingRef {
    pub remote: String,
    pub branch: String,
}

impl TrackingRef {
    /// Split a short upstream ref on its first `/`. A ref without a
    /// separator is malformed and yields `None`.
    pub fn parse(short_ref: &str) -> Option<TrackingRef> {
        let (remote, branch) = short_ref.split_once('/')?;
        if remote.is_empty() || branch.is_empty() {
            return None;
        }
        Some(TrackingRef {
            remote: remote.to_string(),
            branch: branch.to_string(),
        })
    }
}

/// Which diff `diff_stat` summarizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffScope {
    /// Unstaged changes in the working tree.
    Worktree,
    /// Changes already staged in the index.
    Staged,
}

/// Typed form of a `git diff --shortstat` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffStat {
    pub files_changed: u32,
    pub insertions: u32,
    pub deletions: u32,
}

impl DiffStat {
    /// Parse git's one-line summary, e.g.
    /// `3 files changed, 10 insertions(+), 2 deletions(-)`.
    /// An empty or unrecognized line means a clean diff.
    pub fn parse(line: &str) -> Option<DiffStat> {
        let re = Regex::new(
            r"(\d+) files? changed(?:, (\d+) insertions?\(\+\))?(?:, (\d+) deletions?\(-\))?",
        )
        .unwrap();
        let caps = re.captures(line.trim())?;
        let group = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str().parse().unwrap_or(0))
                .unwrap_or(0)
        };
        Some(DiffStat {
            files_changed: group(1),
            insertions: group(2),
            deletions: group(3),
        })
    }
}

impl fmt::Display for DiffStat {
    /// Render in git's own wording, plural forms included.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: u32| if n == 1 { "" } else { "s" };
        write!(
            f,
            "{} file{} changed",
            self.files_changed,
            plural(self.files_changed)
        )?;
        if self.insertions > 0 {
            write!(f, ", {} insertion{}(+)", self.insertions, plural(self.insertions))?;
        }
        if self.deletions > 0 {
            write!(f, ", {} deletion{}(-)", self.deletions, plural(self.deletions))?;
        }
        Ok(())
    }
}

/// Revision range for the `head` summary log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRange {
    /// Just the most recent commit (`-1`).
    Latest,
    /// Everything since the named base branch (`<base>..HEAD`).
    Since(String),
}

/// What a `commit` invocation should do. Signing is already resolved:
/// `true` means pass `-S`, `false` means pass `--no-gpg-sign`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub message: Option<String>,
    pub amend: bool,
    pub sign: bool,
}

/// The version-control client the commands are written against.
///
/// Queries return typed results; mutations and user-facing subcommands
/// stream git's own output to the terminal. The two optional queries
/// (`upstream`, `remotes`) deliberately treat child failure as absence.
pub trait Git {
    /// Name of the branch HEAD points at.
    ///
    /// # Errors
    /// `GitError::NoCommits` when the repository has no history yet.
    fn current_branch(&self) -> Result<String>;

    /// Short names of all local branches, in `for-each-ref` order.
    fn local_branches(&self) -> Result<Vec<String>>;

    /// The tracking link of `branch`, when one is configured and
    /// well-formed. Absence is an expected condition, not a failure.
    fn upstream(&self, branch: &str) -> Result<Option<TrackingRef>>;

    /// Configured remote names, in `git remote` order. A repository
    /// without remotes (or a failing query) yields an empty list.
    fn remotes(&self) -> Result<Vec<String>>;

    /// Register a new remote. The one durable write in the program.
    fn add_remote(&self, name: &str, url: &str) -> Result<()>;

    /// Absolute path of the working-tree root.
    fn toplevel(&self) -> Result<PathBuf>;

    /// Summary of the requested diff; `None` when clean.
    fn diff_stat(&self, scope: DiffScope) -> Result<Option<DiffStat>>;

    /// The configured `user.signingkey`, when one exists.
    fn signing_key(&self) -> Result<Option<String>>;

    /// Stream `git log` for the given range to the terminal.
    fn show_log(&self, range: &LogRange) -> Result<()>;

    /// `git push -u <remote> <branch>`, streaming to the terminal.
    fn push(&self, remote: &str, branch: &str) -> Result<()>;

    /// Switch branches (`git checkout <target>`).
    fn checkout(&self, target: &str) -> Result<()>;

    /// Create a branch from the current commit and switch to it.
    fn create_branch(&self, name: &str) -> Result<()>;

    /// Record a commit per the prepared request.
    fn commit(&self, request: &CommitRequest) -> Result<()>;

    /// Launch git's graphical interface.
    fn launch_gui(&self) -> Result<()>;
}
