use anyhow::Result;
use colored::Colorize;

use crate::git::Git;
use crate::settings::Settings;
use crate::upstream::{Prompt, Resolution, Source, resolve_upstream};

/// Push the current branch to a remote, configuring the upstream as a
/// side effect (`git push -u`).
///
/// A remote named on the command line wins outright. Otherwise the
/// branch's own tracking remote is used. A branch that tracks nothing
/// goes through upstream resolution, and the stage that produced the
/// answer is reported before pushing.
///
/// # Errors
/// - Returns [`crate::git::GitError::NoCommits`] in a repository without
///   history.
/// - Returns an error if resolution is aborted or the push itself fails.
pub fn cmd_push(
    git: &dyn Git,
    prompt: &dyn Prompt,
    settings: &Settings,
    remote: Option<&str>,
) -> Result<()> {
    let branch = git.current_branch()?;

    let remote = match remote {
        Some(named) => named.to_string(),
        None => match git.upstream(&branch)? {
            Some(tracking) => tracking.remote,
            None => {
                println!("No upstream configured.");
                let resolution = resolve_upstream(git, prompt, settings)?;
                announce(&resolution);
                resolution.remote
            }
        },
    };

    git.push(&remote, &branch)
}

/// Tell the user which stage of the fallback chain picked the remote.
fn announce(resolution: &Resolution) {
    match &resolution.source {
        Source::UsualUpstream => {
            println!(
                "Pushing to your usual remote: {}",
                resolution.remote.yellow()
            );
        }
        Source::FirstConfigured => {
            println!(
                "No tracking branches yet; pushing to the first configured remote: {}",
                resolution.remote.yellow()
            );
        }
        Source::Created { url } => {
            println!(
                "Created remote {} pointing to {}",
                resolution.remote.yellow(),
                url.yellow()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::fake::FakeGit;
    use crate::upstream::testing::ScriptedPrompt;

    #[test]
    fn named_remote_wins_without_any_resolution() {
        let mut git = FakeGit::new();
        git.current = "feature".to_string();
        git.track("feature", "origin");

        let prompt = ScriptedPrompt::new(&[]);
        cmd_push(&git, &prompt, &Settings::default(), Some("fork")).unwrap();

        let recorded = git.recorded.borrow();
        assert_eq!(
            recorded.pushes,
            vec![("fork".to_string(), "feature".to_string())]
        );
        assert!(recorded.upstream_queries.is_empty());
        assert_eq!(recorded.branch_listings, 0);
    }

    #[test]
    fn tracked_branch_pushes_to_its_own_remote() {
        let mut git = FakeGit::new();
        git.current = "feature".to_string();
        git.branches = vec!["main".to_string(), "feature".to_string()];
        git.track("feature", "fork");
        git.track("main", "origin");

        let prompt = ScriptedPrompt::new(&[]);
        cmd_push(&git, &prompt, &Settings::default(), None).unwrap();

        let recorded = git.recorded.borrow();
        assert_eq!(
            recorded.pushes,
            vec![("fork".to_string(), "feature".to_string())]
        );
        // the tracking link answered; no tally over all branches
        assert_eq!(recorded.branch_listings, 0);
        assert_eq!(recorded.upstream_queries, vec!["feature"]);
    }

    #[test]
    fn untracked_branch_pushes_to_the_usual_remote() {
        let mut git = FakeGit::new();
        git.current = "feature".to_string();
        git.branches = vec![
            "main".to_string(),
            "other".to_string(),
            "feature".to_string(),
        ];
        git.track("main", "origin");
        git.track("other", "origin");

        let prompt = ScriptedPrompt::new(&[]);
        cmd_push(&git, &prompt, &Settings::default(), None).unwrap();

        let recorded = git.recorded.borrow();
        assert_eq!(
            recorded.pushes,
            vec![("origin".to_string(), "feature".to_string())]
        );
        assert_eq!(recorded.branch_listings, 1);
    }

    #[test]
    fn interactive_creation_pushes_to_the_new_remote() {
        let mut git = FakeGit::new();
        git.current = "main".to_string();
        git.toplevel = std::path::PathBuf::from("/work/proj");

        let prompt = ScriptedPrompt::new(&[Some("alice")]);
        cmd_push(&git, &prompt, &Settings::default(), None).unwrap();

        let recorded = git.recorded.borrow();
        assert_eq!(
            recorded.added_remotes,
            vec![(
                "origin".to_string(),
                "git@github.com:alice/proj".to_string()
            )]
        );
        assert_eq!(
            recorded.pushes,
            vec![("origin".to_string(), "main".to_string())]
        );
    }

    #[test]
    fn aborted_resolution_pushes_nothing() {
        let git = FakeGit::new();

        let prompt = ScriptedPrompt::new(&[None]);
        let err = cmd_push(&git, &prompt, &Settings::default(), None).unwrap_err();
        assert!(err.to_string().contains("aborted"));
        assert!(git.recorded.borrow().pushes.is_empty());
    }

    #[test]
    fn repository_without_commits_pushes_nothing() {
        let mut git = FakeGit::new();
        git.unborn = true;

        let prompt = ScriptedPrompt::new(&[]);
        let err = cmd_push(&git, &prompt, &Settings::default(), None).unwrap_err();
        assert!(
            err.downcast_ref::<crate::git::GitError>()
                .is_some_and(|git_err| matches!(git_err, crate::git::GitError::NoCommits))
        );
        assert!(git.recorded.borrow().pushes.is_empty());
    }
}
