use anyhow::Result;
use colored::Colorize;

use crate::git::{DiffScope, Git, LogRange};
use crate::settings::Settings;

/// Show information about the current working tree.
///
/// Prints the current branch and where it pushes, a one-line summary of
/// unstaged and staged changes (only when there are any), and the recent
/// history: commits unique to the feature branch, or just the latest
/// commit when already on the base branch.
///
/// # Errors
/// - Returns [`crate::git::GitError::NoCommits`] in a repository without
///   history.
/// - Returns an error if any underlying git query fails.
pub fn cmd_head(git: &dyn Git, settings: &Settings) -> Result<()> {
    let branch = git.current_branch()?;

    match git.upstream(&branch)? {
        Some(tracking) => println!(
            "Branch: {} pushes to {}",
            branch.yellow(),
            tracking.remote.yellow()
        ),
        None => {
            println!("Branch: {}", branch.yellow());
            println!("No upstream configured.");
        }
    }

    if let Some(dirty) = git.diff_stat(DiffScope::Worktree)? {
        println!("dirty:  {}", dirty);
    }
    if let Some(staged) = git.diff_stat(DiffScope::Staged)? {
        println!("staged: {}", staged);
    }

    let range = match base_branch(git, settings)? {
        Some(base) if base != branch => {
            println!("Commits on this feature branch:");
            LogRange::Since(base)
        }
        _ => LogRange::Latest,
    };
    git.show_log(&range)
}

/// The branch feature work is measured against: the configured one when
/// set, otherwise the first of `main`, `master` that exists locally.
fn base_branch(git: &dyn Git, settings: &Settings) -> Result<Option<String>> {
    if let Some(base) = &settings.base_branch {
        return Ok(Some(base.clone()));
    }
    let branches = git.local_branches()?;
    Ok(["main", "master"]
        .iter()
        .find(|name| branches.iter().any(|branch| branch == *name))
        .map(|name| name.to_string()))
}
