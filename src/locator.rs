//! Discovery of the wkhtmltopdf executable and its optional `xvfb-run` wrapper.
//!
//! Each executable is looked for, in order:
//! - next to the currently running program
//! - in the directories on the `PATH`
//! - in the directory named by its environment variable
//!
//! Results are cached for the lifetime of the process, so moving wkhtmltopdf in a running
//! program has no effect once it has been found. [`set_path`] and [`set_wrapper`] seed the
//! cache directly and skip the search; [`reset_paths`] forgets everything.

use crate::{Error, Result};
use parking_lot::{const_mutex, Mutex};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Name of the rendering executable
pub const WKHTMLTOPDF: &str = "wkhtmltopdf";
/// Directory searched for [`WKHTMLTOPDF`] when it isn't found anywhere else
pub const WKHTMLTOPDF_PATH_ENV: &str = "WKHTMLTOPDF_PATH";
/// Name of the optional virtual display wrapper
pub const WRAPPER: &str = "xvfb-run";
/// Directory searched for [`WRAPPER`] when it isn't found anywhere else
pub const WRAPPER_PATH_ENV: &str = "WKHTMLTOPDF_WRAPPER_PATH";

/// What has been found or set so far
struct Cache {
    /// Empty until wkhtmltopdf has been found or set
    main: String,
    /// Set by [`set_path`]: the wrapper is then only used when set explicitly
    pinned: bool,
    /// `None` until the wrapper has been looked for or set; an empty string once it is
    /// known to be absent
    wrapper: Option<String>,
}

impl Cache {
    fn command(&self) -> String {
        match self.wrapper.as_deref() {
            Some(wrapper) if !wrapper.is_empty() => format!("{wrapper} {}", self.main),
            _ => self.main.clone(),
        }
    }
}

static CACHE: Mutex<Cache> = const_mutex(Cache {
    main: String::new(),
    pinned: false,
    wrapper: None,
});

/// Use `path` for wkhtmltopdf from now on, without searching for it or for the wrapper.
/// A wrapper is only added when it is also given with [`set_wrapper`].
pub fn set_path<S: Into<String>>(path: S) {
    let mut cache = CACHE.lock();
    cache.main = path.into();
    cache.pinned = !cache.main.is_empty();
}

/// The cached path to wkhtmltopdf, empty if it hasn't been found or set yet
pub fn get_path() -> String {
    CACHE.lock().main.clone()
}

/// Use `path` as the wrapper command from now on, without searching for it. An empty
/// `path` disables the wrapper.
pub fn set_wrapper<S: Into<String>>(path: S) {
    CACHE.lock().wrapper = Some(path.into());
}

/// The cached wrapper command, empty if there is none or it hasn't been looked for yet
pub fn get_wrapper() -> String {
    CACHE.lock().wrapper.clone().unwrap_or_default()
}

/// Forget every cached path so the next resolution searches again
pub fn reset_paths() {
    let mut cache = CACHE.lock();
    cache.main.clear();
    cache.pinned = false;
    cache.wrapper = None;
}

/// Resolve the full command used to run wkhtmltopdf: `"<wrapper> <wkhtmltopdf>"` when a
/// wrapper is available, otherwise just the path to wkhtmltopdf.
///
/// Failing to find wkhtmltopdf is an error, failing to find the wrapper is not. Nothing is
/// searched for once [`set_path`] has been called.
pub fn resolve_command() -> Result<String> {
    resolve_with(
        &Locator::from_env(WKHTMLTOPDF_PATH_ENV),
        &Locator::from_env(WRAPPER_PATH_ENV),
    )
}

fn resolve_with(main: &Locator, wrapper: &Locator) -> Result<String> {
    let mut cache = CACHE.lock();
    if cache.main.is_empty() {
        let found = main.find(WKHTMLTOPDF)?;
        cache.main = found.to_string_lossy().into_owned();
    }
    if cache.wrapper.is_none() && !cache.pinned {
        cache.wrapper = Some(match wrapper.find(WRAPPER) {
            Ok(path) => path.to_string_lossy().into_owned(),
            Err(e) => {
                log::debug!("Running without a wrapper: {e}");
                String::new()
            }
        });
    }

    let command = cache.command();
    log::info!("Using wkhtmltopdf command `{command}`");
    Ok(command)
}

/// The command made of whatever is cached right now, without searching. Empty while
/// wkhtmltopdf hasn't been found or set.
pub(crate) fn cached_command() -> String {
    let cache = CACHE.lock();
    if cache.main.is_empty() {
        return String::new();
    }
    cache.command()
}

/// The places one executable is searched for
#[derive(Debug, Clone, Default)]
pub struct Locator {
    /// Directory of the running program
    pub program_dir: Option<PathBuf>,
    /// A `PATH`-style list of directories
    pub search_path: Option<OsString>,
    /// Directory taken from the executable's environment variable
    pub env_dir: Option<PathBuf>,
}

impl Locator {
    /// Search the real environment, falling back to the directory in `env_var`
    pub fn from_env(env_var: &str) -> Locator {
        Locator {
            program_dir: std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
            search_path: std::env::var_os("PATH"),
            env_dir: std::env::var_os(env_var)
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Find `command`, returning the absolute path of the first match
    pub fn find(&self, command: &str) -> Result<PathBuf> {
        let dirs = self
            .program_dir
            .iter()
            .cloned()
            .chain(self.search_path.iter().flat_map(std::env::split_paths))
            .chain(self.env_dir.iter().cloned());

        for dir in dirs {
            if dir.as_os_str().is_empty() {
                continue;
            }
            if let Some(path) = candidates(&dir, command)
                .into_iter()
                .find(|path| is_executable(path))
            {
                return Ok(std::path::absolute(&path).unwrap_or(path));
            }
        }

        Err(Error::NotFound {
            command: command.to_string(),
        })
    }
}

#[cfg(not(windows))]
fn candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
    vec![dir.join(command)]
}

#[cfg(windows)]
fn candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
    if Path::new(command).extension().is_some() {
        return vec![dir.join(command)];
    }
    std::env::var("PATHEXT")
        .unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string())
        .split(';')
        .filter(|ext| !ext.is_empty())
        .map(|ext| dir.join(format!("{command}{}", ext.to_lowercase())))
        .collect()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Serialises tests that touch the process-wide cache. Every unit test calling
/// [`set_path`], [`set_wrapper`], [`reset_paths`] or resolving a command must hold it.
#[cfg(test)]
pub(crate) static CACHE_LOCK: Mutex<()> = const_mutex(());
