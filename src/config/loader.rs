use std::{
  cell::RefCell,
  fs,
  io,
  rc::Rc,
};

use super::{
  Config,
  ConfigPaths,
  LuaEngine,
};

/// Run the built-in defaults, then `init.lua` when it exists.
pub fn load_config(paths: &ConfigPaths) -> io::Result<Config>
{
  let user = if paths.exists
  {
    let code = fs::read_to_string(&paths.entry)
      .map_err(|e| io_err(format!("read init.lua failed: {e}")))?;
    Some((code, paths.entry.to_string_lossy().to_string()))
  }
  else
  {
    crate::trace::log(format!(
      "[lua] no config at {}, using defaults",
      paths.entry.display()
    ));
    None
  };
  run_config(user.as_ref().map(|(code, name)| (code.as_str(), name.as_str())))
}

/// Like [`load_config`] but with the user configuration given inline.
pub fn load_config_from_code(code: &str) -> io::Result<Config>
{
  run_config(Some((code, "inline init.lua")))
}

fn run_config(user: Option<(&str, &str)>) -> io::Result<Config>
{
  let engine = LuaEngine::new().map_err(|e| io_err(format!("lua init failed: {e}")))?;
  let lua = engine.lua();

  let config_acc = Rc::new(RefCell::new(Config::default()));
  super::install_hovertint_api(lua, Rc::clone(&config_acc))
    .map_err(|e| io_err(format!("hovertint api install failed: {e}")))?;

  crate::trace::log("[lua] exec builtin/defaults.lua");
  lua
    .load(super::BUILTIN_DEFAULTS_LUA)
    .set_name("builtin/defaults.lua")
    .exec()
    .map_err(|e| {
      crate::trace::log(format!("[lua] defaults.lua error: {e}"));
      io_err(format!("defaults.lua execution failed: {e}"))
    })?;

  if let Some((code, name)) = user
  {
    crate::trace::log(format!("[lua] exec user config: {name}"));
    lua.load(code).set_name(name).exec().map_err(|e| {
      crate::trace::log(format!("[lua] user config error ({name}): {e}"));
      io_err(format!("{name} execution failed: {e}"))
    })?;
  }

  let cfg = config_acc.borrow().clone();
  Ok(cfg)
}

fn io_err(msg: String) -> io::Error
{
  io::Error::other(msg)
}
