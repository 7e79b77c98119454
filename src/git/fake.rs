//! In-memory `Git` implementation for unit tests. Queries answer from
//! plain fields; mutations are recorded for assertions instead of
//! touching any repository.

use std::cell::RefCell;
use std::path::PathBuf;

use anyhow::Result;

use super::{CommitRequest, DiffScope, DiffStat, Git, GitError, LogRange, TrackingRef};

pub(crate) struct FakeGit {
    pub current: String,
    pub branches: Vec<String>,
    /// Branch name to its tracking link. Branches without an entry have
    /// no (or an unusable) upstream.
    pub upstreams: Vec<(String, TrackingRef)>,
    pub remotes: Vec<String>,
    pub toplevel: PathBuf,
    pub signing: Option<String>,
    pub worktree: Option<DiffStat>,
    pub staged: Option<DiffStat>,
    /// When set, the repository pretends to have no commits yet.
    pub unborn: bool,
    pub recorded: RefCell<Recorded>,
}

/// Everything a command asked the fake to do.
#[derive(Default)]
pub(crate) struct Recorded {
    pub branch_listings: usize,
    pub upstream_queries: Vec<String>,
    pub added_remotes: Vec<(String, String)>,
    pub pushes: Vec<(String, String)>,
    pub checkouts: Vec<String>,
    pub created_branches: Vec<String>,
    pub commits: Vec<CommitRequest>,
    pub logs: Vec<LogRange>,
    pub gui_launches: usize,
}

impl FakeGit {
    pub fn new() -> FakeGit {
        FakeGit {
            current: "main".to_string(),
            branches: vec!["main".to_string()],
            upstreams: Vec::new(),
            remotes: Vec::new(),
            toplevel: PathBuf::from("/work/sample"),
            signing: None,
            worktree: None,
            staged: None,
            unborn: false,
            recorded: RefCell::default(),
        }
    }

    /// Register `branch` as tracking `remote/<branch>`.
    pub fn track(&mut self, branch: &str, remote: &str) {
        self.upstreams.push((
            branch.to_string(),
            TrackingRef {
                remote: remote.to_string(),
                branch: branch.to_string(),
            },
        ));
    }
}

impl Git for FakeGit {
    fn current_branch(&self) -> Result<String> {
        if self.unborn {
            return Err(GitError::NoCommits.into());
        }
        Ok(self.current.clone())
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        self.recorded.borrow_mut().branch_listings += 1;
        Ok(self.branches.clone())
    }

    fn upstream(&self, branch: &str) -> Result<Option<TrackingRef>> {
        self.recorded
            .borrow_mut()
            .upstream_queries
            .push(branch.to_string());
        Ok(self
            .upstreams
            .iter()
            .find(|(name, _)| name.as_str() == branch)
            .map(|(_, tracking)| tracking.clone()))
    }

    fn remotes(&self) -> Result<Vec<String>> {
        Ok(self.remotes.clone())
    }

    fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.recorded
            .borrow_mut()
            .added_remotes
            .push((name.to_string(), url.to_string()));
        Ok(())
    }

    fn toplevel(&self) -> Result<PathBuf> {
        Ok(self.toplevel.clone())
    }

    fn diff_stat(&self, scope: DiffScope) -> Result<Option<DiffStat>> {
        Ok(match scope {
            DiffScope::Worktree => self.worktree,
            DiffScope::Staged => self.staged,
        })
    }

    fn signing_key(&self) -> Result<Option<String>> {
        Ok(self.signing.clone())
    }

    fn show_log(&self, range: &LogRange) -> Result<()> {
        self.recorded.borrow_mut().logs.push(range.clone());
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.recorded
            .borrow_mut()
            .pushes
            .push((remote.to_string(), branch.to_string()));
        Ok(())
    }

    fn checkout(&self, target: &str) -> Result<()> {
        self.recorded
            .borrow_mut()
            .checkouts
            .push(target.to_string());
        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.recorded
            .borrow_mut()
            .created_branches
            .push(name.to_string());
        Ok(())
    }

    fn commit(&self, request: &CommitRequest) -> Result<()> {
        self.recorded.borrow_mut().commits.push(request.clone());
        Ok(())
    }

    fn launch_gui(&self) -> Result<()> {
        self.recorded.borrow_mut().gui_launches += 1;
        Ok(())
    }
}
