use anyhow::Result;

use crate::git::{CommitRequest, Git};

/// Record a commit.
///
/// stdio is inherited, so omitting the message opens git's editor as
/// usual. Signing is on by default but only requested from git when a
/// signing key is actually configured; otherwise `--no-gpg-sign` is
/// passed explicitly so a stale `commit.gpgsign` setting cannot fail
/// the commit.
///
/// # Errors
/// Returns an error if the underlying `git commit` fails (including the
/// user closing the editor without a message).
pub fn cmd_commit(git: &dyn Git, message: Option<&str>, sign: bool, amend: bool) -> Result<()> {
    let sign = sign && git.signing_key()?.is_some();
    git.commit(&CommitRequest {
        message: message.map(|text| text.to_string()),
        amend,
        sign,
    })
}
