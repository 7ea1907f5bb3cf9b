use crate::{
  host::{
    Colorscheme,
    builtin_colorscheme,
  },
  hover::HoverConfig,
};

/// Fallback when no (or an unknown) colourscheme is configured.
pub const DEFAULT_COLORSCHEME: &str = "night";

#[derive(Debug, Clone, PartialEq)]
/// Colourscheme selection from Lua: a built-in name or an inline definition.
pub enum ColorschemeSetting
{
  Named(String),
  Custom(Colorscheme),
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Top-level configuration composed from Lua input.
pub struct Config
{
  pub colorscheme: Option<ColorschemeSetting>,
  pub hover:       HoverConfig,
}

impl Config
{
  /// The colourscheme to start the session with.
  pub fn resolve_colorscheme(&self) -> Colorscheme
  {
    let name = match &self.colorscheme
    {
      Some(ColorschemeSetting::Custom(cs)) => return cs.clone(),
      Some(ColorschemeSetting::Named(n)) => n.as_str(),
      None => DEFAULT_COLORSCHEME,
    };
    resolve_named_colorscheme(name)
  }
}

/// Built-in colourscheme by name; unknown names fall back to the default.
pub fn resolve_named_colorscheme(name: &str) -> Colorscheme
{
  if let Some(cs) = builtin_colorscheme(name)
  {
    return cs;
  }
  crate::trace::log(format!(
    "[config] unknown colorscheme '{name}', using {DEFAULT_COLORSCHEME}"
  ));
  builtin_colorscheme(DEFAULT_COLORSCHEME)
    .unwrap_or_else(|| Colorscheme::new(DEFAULT_COLORSCHEME, None))
}
