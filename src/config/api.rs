use mlua::{
  Error as LuaError,
  Lua,
  Table,
  Value,
};
use std::{
  cell::RefCell,
  io,
  rc::Rc,
};

use super::{
  ColorschemeSetting,
  Config,
};
use crate::{
  color::ColorSpec,
  host::Colorscheme,
};

/// Install the `hovertint` table: `config`, `trace`, `getenv`. Any other
/// `hovertint.*` call raises "unknown hovertint function".
pub(crate) fn install_hovertint_api(
  lua: &Lua,
  config_acc: Rc<RefCell<Config>>,
) -> io::Result<()>
{
  let globals = lua.globals();
  let api: Table = lua.create_table().map_err(|e| io::Error::other(e.to_string()))?;

  // hovertint.config(tbl): merge fields into the Config accumulator
  let acc = Rc::clone(&config_acc);
  let config_fn = lua
    .create_function(move |_, tbl: Value| {
      let t = match tbl
      {
        Value::Table(t) => t,
        other =>
        {
          return Err(LuaError::RuntimeError(format!(
            "hovertint.config expects a table, got {}",
            other.type_name()
          )));
        }
      };
      let mut cfg = acc.try_borrow_mut().map_err(|e| LuaError::RuntimeError(e.to_string()))?;
      merge_config_table(&t, &mut cfg)?;
      Ok(true)
    })
    .map_err(|e| io::Error::other(e.to_string()))?;
  api.set("config", config_fn).map_err(|e| io::Error::other(e.to_string()))?;

  let getenv_fn = lua
    .create_function(|_, (name, default): (String, Option<String>)| {
      Ok(std::env::var(&name).ok().or(default))
    })
    .map_err(|e| io::Error::other(e.to_string()))?;
  api.set("getenv", getenv_fn).map_err(|e| io::Error::other(e.to_string()))?;

  let trace_fn = lua
    .create_function(|_, text: String| {
      crate::trace::log(format!("[lua] {text}"));
      Ok(true)
    })
    .map_err(|e| io::Error::other(e.to_string()))?;
  api.set("trace", trace_fn).map_err(|e| io::Error::other(e.to_string()))?;

  // Unknown function guard at config time
  let mt = lua.create_table().map_err(|e| io::Error::other(e.to_string()))?;
  let idx = lua
    .create_function(move |lua, (_tbl, key): (Table, Value)| {
      let name = match key
      {
        Value::String(s) => s.to_string_lossy(),
        other => format!("{:?}", other),
      };
      lua.create_function(move |_, ()| -> mlua::Result<()> {
        Err(LuaError::RuntimeError(format!("unknown hovertint function: {}", name)))
      })
    })
    .map_err(|e| io::Error::other(e.to_string()))?;
  mt.set("__index", idx).map_err(|e| io::Error::other(e.to_string()))?;
  api.set_metatable(Some(mt)).map_err(|e| io::Error::other(e.to_string()))?;
  globals.set("hovertint", api).map_err(|e| io::Error::other(e.to_string()))?;
  Ok(())
}

fn merge_config_table(
  t: &Table,
  cfg: &mut Config,
) -> Result<(), LuaError>
{
  match t.get::<Value>("colorscheme")?
  {
    Value::Nil =>
    {}
    Value::String(s) =>
    {
      cfg.colorscheme = Some(ColorschemeSetting::Named(s.to_string_lossy()));
    }
    Value::Table(cs) =>
    {
      let name = cs.get::<Option<String>>("name")?.unwrap_or_else(|| "custom".to_string());
      let mut scheme = Colorscheme::new(name, color_field(&cs, "normal_bg", "colorscheme.normal_bg")?);
      scheme.normal_fg = color_field(&cs, "normal_fg", "colorscheme.normal_fg")?;
      cfg.colorscheme = Some(ColorschemeSetting::Custom(scheme));
    }
    other =>
    {
      return Err(LuaError::RuntimeError(format!(
        "colorscheme must be a name or a table, got {}",
        other.type_name()
      )));
    }
  }

  if let Some(h) = table_field(t, "highlight")?
  {
    if let Some(c) = color_field(&h, "hovered_buffer", "highlight.hovered_buffer")?
    {
      cfg.hover.hovered_buffer = Some(c);
    }
    if let Some(c) = color_field(
      &h,
      "hovered_buffer_in_same_directory",
      "highlight.hovered_buffer_in_same_directory",
    )?
    {
      cfg.hover.hovered_buffer_in_same_directory = Some(c);
    }
    if let Some(b) = bool_field(&h, "same_directory", "highlight.same_directory")?
    {
      cfg.hover.highlight_same_directory = b;
    }
  }

  if let Some(tu) = table_field(t, "tuning")?
  {
    if let Some(v) = number_field(&tu, "step", "tuning.step")?
    {
      cfg.hover.tuning.step = v;
    }
    if let Some(v) = number_field(&tu, "luminance_threshold", "tuning.luminance_threshold")?
    {
      cfg.hover.tuning.luminance_threshold = v;
    }
    cfg.hover.tuning = cfg.hover.tuning.clamped();
  }
  Ok(())
}

fn color_field(
  t: &Table,
  key: &str,
  field: &str,
) -> Result<Option<ColorSpec>, LuaError>
{
  match t.get::<Option<String>>(key)?
  {
    None => Ok(None),
    Some(s) => ColorSpec::parse(&s)
      .map(Some)
      .ok_or_else(|| LuaError::RuntimeError(format!("invalid color '{s}' for {field}"))),
  }
}

fn type_error(
  field: &str,
  expected: &str,
  got: &Value,
) -> LuaError
{
  LuaError::RuntimeError(format!("{field} must be {expected}, got {}", got.type_name()))
}

fn table_field(
  t: &Table,
  key: &str,
) -> Result<Option<Table>, LuaError>
{
  match t.get::<Value>(key)?
  {
    Value::Nil => Ok(None),
    Value::Table(tbl) => Ok(Some(tbl)),
    other => Err(type_error(key, "a table", &other)),
  }
}

fn bool_field(
  t: &Table,
  key: &str,
  field: &str,
) -> Result<Option<bool>, LuaError>
{
  match t.get::<Value>(key)?
  {
    Value::Nil => Ok(None),
    Value::Boolean(b) => Ok(Some(b)),
    other => Err(type_error(field, "a boolean", &other)),
  }
}

fn number_field(
  t: &Table,
  key: &str,
  field: &str,
) -> Result<Option<f64>, LuaError>
{
  match t.get::<Value>(key)?
  {
    Value::Nil => Ok(None),
    Value::Integer(i) => Ok(Some(i as f64)),
    Value::Number(n) => Ok(Some(n)),
    other => Err(type_error(field, "a number", &other)),
  }
}
