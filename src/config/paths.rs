use std::{
  env,
  fs,
  path::{
    Path,
    PathBuf,
  },
};

/// Resolved configuration locations for hovertint.
#[derive(Debug, Clone)]
pub struct ConfigPaths
{
  pub root:   PathBuf,
  pub entry:  PathBuf,
  pub exists: bool,
}

impl ConfigPaths
{
  /// Paths rooted at an explicit directory (`--config-dir`).
  pub fn at(root: impl Into<PathBuf>) -> Self
  {
    let root = root.into();
    let entry = root.join("init.lua");
    let exists = fs::metadata(&entry).map(|m| m.is_file()).unwrap_or(false);
    Self { root, entry, exists }
  }
}

/// Discover the effective configuration directory and entry point.
///
/// Checks `HOVERTINT_CONFIG_DIR`, then `XDG_CONFIG_HOME/hovertint`.
///
/// Platform-specific fallbacks:
/// - Unix: `~/.config/hovertint`
/// - Windows: `%LOCALAPPDATA%\\hovertint`, then `%APPDATA%\\hovertint`, then
///   `%USERPROFILE%\\.config\\hovertint`
pub fn discover_config_paths() -> std::io::Result<ConfigPaths>
{
  let root = if let Some(over) = non_empty_env("HOVERTINT_CONFIG_DIR")
  {
    PathBuf::from(over)
  }
  else if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME")
  {
    Path::new(&xdg).join("hovertint")
  }
  else
  {
    platform_root()
  };
  Ok(ConfigPaths::at(root))
}

fn non_empty_env(key: &str) -> Option<String>
{
  env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(windows)]
fn platform_root() -> PathBuf
{
  for key in ["LOCALAPPDATA", "APPDATA"]
  {
    if let Some(dir) = non_empty_env(key)
    {
      return Path::new(&dir).join("hovertint");
    }
  }
  match non_empty_env("USERPROFILE")
  {
    Some(up) => Path::new(&up).join(".config").join("hovertint"),
    None => Path::new(".config").join("hovertint"),
  }
}

#[cfg(not(windows))]
fn platform_root() -> PathBuf
{
  match non_empty_env("HOME")
  {
    Some(home) => Path::new(&home).join(".config").join("hovertint"),
    None => Path::new(".config").join("hovertint"),
  }
}
