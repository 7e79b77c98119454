use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs};

/// Top-level configuration structure loaded from `config.toml`.
///
/// Every field has a default, so running without a config file is the
/// normal case. The file tweaks how remotes are addressed and which
/// branch counts as the base of feature work.
///
/// Example TOML:
/// ```toml
/// host_template  = "git@github.com:"
/// default_remote = "origin"
/// base_branch    = "main"
/// ```
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Prefix for building a remote URL out of a bare handle.
    #[serde(default = "default_host_template")]
    pub host_template: String,
    /// Remote name used when one has to be created.
    #[serde(default = "default_remote")]
    pub default_remote: String,
    /// Base branch for history summaries. When unset, the repository is
    /// probed for `main`, then `master`.
    #[serde(default)]
    pub base_branch: Option<String>,
}

fn default_host_template() -> String {
    "git@github.com:".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            host_template: default_host_template(),
            default_remote: default_remote(),
            base_branch: None,
        }
    }
}

/// Resolve where `config.toml` lives.
///
/// `GIDDY_CONFIG` overrides everything; otherwise the file sits under
/// `$XDG_CONFIG_HOME/giddy/` (falling back to `~/.config/giddy/`).
pub fn config_path() -> PathBuf {
    if let Some(explicit) = env::var_os("GIDDY_CONFIG") {
        return PathBuf::from(explicit);
    }
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env::var_os("HOME").unwrap_or_default()).join(".config"));
    base.join("giddy").join("config.toml")
}

/// Load `config.toml` into a [`Settings`] structure.
///
/// A missing file yields the defaults. A file that exists but cannot be
/// read or parsed is an error; the message includes the resolved path.
///
/// # Errors
/// - Returns an error if the file exists but cannot be read.
/// - Returns an error if parsing the TOML fails.
pub fn load_settings() -> Result<Settings> {
    let path = config_path();
    let txt = match fs::read_to_string(&path) {
        Ok(txt) => txt,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    let settings: Settings =
        toml::from_str(&txt).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(settings)
}
