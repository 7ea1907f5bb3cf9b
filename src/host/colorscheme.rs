use crate::color::ColorSpec;

#[derive(Debug, Clone, PartialEq)]
pub struct Colorscheme
{
  pub name:      String,
  pub normal_bg: Option<ColorSpec>,
  pub normal_fg: Option<ColorSpec>,
}

impl Colorscheme
{
  pub fn new(
    name: impl Into<String>,
    normal_bg: Option<ColorSpec>,
  ) -> Self
  {
    Self { name: name.into(), normal_bg, normal_fg: None }
  }
}

/// (name, normal background, normal foreground)
pub const BUILTIN_COLORSCHEMES: &[(&str, ColorSpec, ColorSpec)] = &[
  ("night", ColorSpec::rgb(0x1a, 0x1b, 0x26), ColorSpec::rgb(0xc0, 0xca, 0xf5)),
  ("storm", ColorSpec::rgb(0x24, 0x28, 0x3b), ColorSpec::rgb(0xc0, 0xca, 0xf5)),
  ("moon", ColorSpec::rgb(0x22, 0x24, 0x36), ColorSpec::rgb(0xc8, 0xd3, 0xf5)),
  ("day", ColorSpec::rgb(0xe1, 0xe2, 0xe7), ColorSpec::rgb(0x37, 0x60, 0xbf)),
];

pub fn builtin_colorscheme(name: &str) -> Option<Colorscheme>
{
  let low = name.trim().to_ascii_lowercase();
  BUILTIN_COLORSCHEMES.iter().find(|(n, _, _)| *n == low).map(|(n, bg, fg)| {
    Colorscheme {
      name:      (*n).to_string(),
      normal_bg: Some(*bg),
      normal_fg: Some(*fg),
    }
  })
}
