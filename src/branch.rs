use anyhow::Result;

use crate::git::Git;

/// Create a new branch from the current commit and switch to it
/// (`git checkout -b`).
///
/// # Errors
/// Returns an error if the branch cannot be created, e.g. when a branch
/// of that name already exists.
pub fn cmd_branch(git: &dyn Git, name: &str) -> Result<()> {
    git.create_branch(name)
}
