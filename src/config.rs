//! Loading the Lua configuration.
//!
//! Users configure hovertint from `init.lua` through the `hovertint` table.
//! This module discovers the config directory, runs the built-in defaults
//! followed by the user file in a sandboxed Lua state, and returns a typed
//! [`Config`]. Tests use [`load_config_from_code`] to fabricate
//! configurations inline.

mod api;
mod loader;
mod lua_engine;
mod paths;
mod types;

pub(crate) use api::install_hovertint_api;
pub use loader::{
  load_config,
  load_config_from_code,
};
pub use lua_engine::LuaEngine;
pub use paths::{
  ConfigPaths,
  discover_config_paths,
};
pub use types::{
  ColorschemeSetting,
  Config,
  DEFAULT_COLORSCHEME,
  resolve_named_colorscheme,
};

const BUILTIN_DEFAULTS_LUA: &str = include_str!("config/lua/defaults.lua");
