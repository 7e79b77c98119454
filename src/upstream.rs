//! Upstream resolution: decide which remote a push should target when the
//! current branch does not say.
//!
//! The branches a repository already pushes somewhere are the best signal
//! for where new work should go, so tracking links are tallied first.
//! Only when the repository has no remotes at all does the resolver turn
//! to the user.

use std::io::{self, Write};

use anyhow::{Context, Result, bail};

use crate::git::Git;
use crate::settings::Settings;

/// Where a resolved remote came from. `push` tells the user which stage
/// of the fallback chain produced the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The remote most local branches already push to.
    UsualUpstream,
    /// No branch tracks anything, but remotes exist; the first one listed.
    FirstConfigured,
    /// Nothing was configured; a remote was created interactively.
    Created { url: String },
}

/// A resolved push target and its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub remote: String,
    pub source: Source,
}

/// One-question interactive input, behind a trait so the resolver's
/// decision tree runs in tests against scripted answers.
pub trait Prompt {
    /// Ask a question and return the trimmed reply, or `None` once the
    /// input stream is closed (C-D).
    ///
    /// # Errors
    /// Returns an error when the terminal cannot be written or read.
    fn ask(&self, question: &str) -> Result<Option<String>>;
}

/// Prompt implementation reading replies from stdin.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&self, question: &str) -> Result<Option<String>> {
        print!("{}: ", question);
        io::stdout().flush().context("failed to flush stdout")?;
        let mut line = String::new();
        let read = io::stdin()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// The remote most local branches push to, if any branch pushes anywhere.
///
/// Each branch with a usable tracking link casts one vote for its remote;
/// the highest count wins. Ties go to the remote seen first in branch
/// order, which keeps the answer stable across runs. Branches without a
/// tracking link are skipped.
pub fn usual_upstream(git: &dyn Git) -> Result<Option<String>> {
    let mut tally: Vec<(String, usize)> = Vec::new();
    for branch in git.local_branches()? {
        let Some(tracking) = git.upstream(&branch)? else {
            continue;
        };
        match tally.iter_mut().find(|(name, _)| *name == tracking.remote) {
            Some((_, count)) => *count += 1,
            None => tally.push((tracking.remote, 1)),
        }
    }

    let mut winner: Option<(String, usize)> = None;
    for (remote, count) in tally {
        let beats = winner
            .as_ref()
            .map(|(_, best)| count > *best)
            .unwrap_or(true);
        if beats {
            winner = Some((remote, count));
        }
    }
    Ok(winner.map(|(remote, _)| remote))
}

/// Decide where the current branch should push when it does not say.
///
/// Three stages, each tried in turn: the remote local history already
/// favors, then the first configured remote, then interactive creation of
/// one under the configured default name.
///
/// # Errors
/// - Returns an error if input is closed at the prompt.
/// - Returns an error if registering the new remote fails.
pub fn resolve_upstream(
    git: &dyn Git,
    prompt: &dyn Prompt,
    settings: &Settings,
) -> Result<Resolution> {
    if let Some(remote) = usual_upstream(git)? {
        return Ok(Resolution {
            remote,
            source: Source::UsualUpstream,
        });
    }

    if let Some(first) = git.remotes()?.into_iter().next() {
        return Ok(Resolution {
            remote: first,
            source: Source::FirstConfigured,
        });
    }

    println!("I couldn't find an upstream to push to.");
    let reply = loop {
        match prompt.ask("GitHub username, upstream URL (or C-D to abort)")? {
            None => bail!("aborted: no upstream configured"),
            Some(reply) if reply.is_empty() => continue,
            Some(reply) => break reply,
        }
    };

    // A bare account handle becomes a host URL; anything with a separator
    // already is one.
    let url = if reply.contains('/') {
        reply
    } else {
        format!("{}{}/{}", settings.host_template, reply, repo_name(git)?)
    };

    git.add_remote(&settings.default_remote, &url)?;
    Ok(Resolution {
        remote: settings.default_remote.clone(),
        source: Source::Created { url },
    })
}

/// Directory name of the working-tree root, used as the repository name
/// when synthesizing a remote URL.
fn repo_name(git: &dyn Git) -> Result<String> {
    let top = git.toplevel()?;
    let name = top
        .file_name()
        .context("working tree root has no directory name")?;
    Ok(name.to_string_lossy().into_owned())
}
