use anyhow::Result;

use crate::git::Git;

/// Launch `git gui`, blocking until it exits.
///
/// # Errors
/// Returns an error if `git gui` fails to start or exits non-zero.
pub fn cmd_gui(git: &dyn Git) -> Result<()> {
    git.launch_gui()
}
