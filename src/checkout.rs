use anyhow::Result;

use crate::git::Git;

/// Check out a branch.
///
/// With no branch given, `-` is checked out, which git reads as the
/// previously checked-out branch.
///
/// # Errors
/// Returns an error if the underlying `git checkout` fails.
pub fn cmd_checkout(git: &dyn Git, branch: Option<&str>) -> Result<()> {
    git.checkout(branch.unwrap_or("-"))
}
