//! Crate entry point for **giddy**.
//!
//! This library provides the internal implementation for the `giddy` CLI.
//! Each submodule encapsulates one responsibility (one module per verb,
//! plus the git client boundary, upstream resolution and configuration).
//! The `pub use` re-exports make selected commands accessible directly from the crate root.
//!
//! This file is primarily intended for developers hacking on `giddy`.

mod branch;
mod checkout;
mod commit;
mod git;
mod gui;
mod head;
mod push;
mod settings;
mod upstream;

/// Re-export commonly used types and commands so they can be accessed from `giddy::*`.
pub use branch::cmd_branch;
pub use checkout::cmd_checkout;
pub use commit::cmd_commit;
pub use git::{Git, GitCli, GitError, ensure_installed};
pub use gui::cmd_gui;
pub use head::cmd_head;
pub use push::cmd_push;
pub use settings::{Settings, config_path, load_settings};
pub use upstream::{Prompt, TerminalPrompt};
