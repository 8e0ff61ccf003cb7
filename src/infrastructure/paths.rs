//! Path helpers for configuration and catalog locations.
//!
//! Directories follow the XDG layout: `$XDG_CONFIG_HOME/healthconnect` and
//! `$XDG_DATA_HOME/healthconnect`, falling back to `~/.config` and `~/.local/share`.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "healthconnect";

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and every path when `HOME` is unset, are
/// returned as given.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, home_dir().as_deref())
}

/// [`expand_tilde`] with an explicit home directory.
///
/// # Examples
///
/// ```
/// use healthconnect::infrastructure::paths::expand_tilde_with;
/// use std::path::{Path, PathBuf};
///
/// let home = Some(Path::new("/home/ana"));
/// assert_eq!(expand_tilde_with("~/catalogs/doctors.json", home), PathBuf::from("/home/ana/catalogs/doctors.json"));
/// assert_eq!(expand_tilde_with("~", home), PathBuf::from("/home/ana"));
/// assert_eq!(expand_tilde_with("/srv/doctors.json", home), PathBuf::from("/srv/doctors.json"));
/// ```
#[must_use]
pub fn expand_tilde_with(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(rest.trim_start_matches('/')),
        _ => PathBuf::from(path),
    }
}

/// Directory holding `config.toml`.
#[must_use]
pub fn get_config_dir() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Directory where catalog files live unless the config says otherwise.
#[must_use]
pub fn get_data_dir() -> Option<PathBuf> {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

/// `<config dir>/config.toml`, when a config dir can be determined.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|h| h.join(home_fallback)))
        .map(|base| base.join(APP_DIR))
}
