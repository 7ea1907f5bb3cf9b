//! Colour values and the luminance arithmetic used to derive hover colours.
//!
//! Everything here is pure: parsing, RGB resolution, WCAG relative
//! luminance, and the lighten/darken steps. The lighten/darken helpers
//! always move at least one channel by one unit, so a derived colour is
//! strictly brighter (or darker) than its base whenever that is possible.

use std::fmt;

use ratatui::style::Color;

mod palette;

pub use palette::{
  indexed_rgb,
  to_rgb,
};

/// Relative luminance below which a background counts as dark.
pub const DEFAULT_LUMINANCE_THRESHOLD: f64 = 0.179;

/// Fraction of the distance to white (dark schemes) or black (light schemes)
/// that a derived hover colour moves away from the normal background.
pub const DEFAULT_STEP: f64 = 0.15;

/// Base used for derivation when the colourscheme leaves the normal
/// background unset (terminal default).
pub const FALLBACK_BACKGROUND: Color = Color::Rgb(0, 0, 0);

/// Colourscheme classification by normal-background luminance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme
{
  Dark,
  Light,
}

impl fmt::Display for Scheme
{
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result
  {
    match self
    {
      Scheme::Dark => f.write_str("dark"),
      Scheme::Light => f.write_str("light"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Tunable constants of the default hover colour derivation.
pub struct Tuning
{
  pub step:                f64,
  pub luminance_threshold: f64,
}

impl Default for Tuning
{
  fn default() -> Self
  {
    Self { step: DEFAULT_STEP, luminance_threshold: DEFAULT_LUMINANCE_THRESHOLD }
  }
}

impl Tuning
{
  /// Clamp both values into ranges where the contrast direction holds:
  /// a threshold strictly inside (0, 1) keeps black dark and white light,
  /// and a positive step always moves a channel.
  pub fn clamped(self) -> Self
  {
    let step = if self.step.is_finite() { self.step } else { DEFAULT_STEP };
    let threshold = if self.luminance_threshold.is_finite()
    {
      self.luminance_threshold
    }
    else
    {
      DEFAULT_LUMINANCE_THRESHOLD
    };
    Self {
      step:                step.clamp(0.01, 1.0),
      luminance_threshold: threshold.clamp(0.01, 0.99),
    }
  }
}

/// An opaque colour attached to a window background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorSpec(Color);

impl ColorSpec
{
  pub const fn rgb(
    r: u8,
    g: u8,
    b: u8,
  ) -> Self
  {
    Self(Color::Rgb(r, g, b))
  }

  /// Parse a colour name or `#rrggbb`. `reset` is not a colour value here.
  pub fn parse(s: &str) -> Option<Self>
  {
    match parse_color(s)?
    {
      Color::Reset => None,
      c => Some(Self(c)),
    }
  }

  pub fn color(&self) -> Color
  {
    self.0
  }

  pub fn to_rgb(&self) -> Option<(u8, u8, u8)>
  {
    to_rgb(self.0)
  }

  pub fn luminance(&self) -> Option<f64>
  {
    self.to_rgb().map(relative_luminance)
  }
}

impl From<Color> for ColorSpec
{
  fn from(c: Color) -> Self
  {
    Self(c)
  }
}

impl fmt::Display for ColorSpec
{
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result
  {
    match self.0
    {
      Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
      Color::Indexed(i) => write!(f, "color{i}"),
      Color::Reset => f.write_str("reset"),
      other => f.write_str(&format!("{other:?}").to_ascii_lowercase()),
    }
  }
}

pub fn parse_color(s: &str) -> Option<Color>
{
  let low = s.trim().to_ascii_lowercase();
  match low.as_str()
  {
    "black" => Some(Color::Black),
    "red" => Some(Color::Red),
    "green" => Some(Color::Green),
    "yellow" => Some(Color::Yellow),
    "blue" => Some(Color::Blue),
    "magenta" | "purple" => Some(Color::Magenta),
    "cyan" => Some(Color::Cyan),
    "gray" | "grey" => Some(Color::Gray),
    "darkgray" | "darkgrey" => Some(Color::DarkGray),
    "lightred" => Some(Color::LightRed),
    "lightgreen" => Some(Color::LightGreen),
    "lightyellow" => Some(Color::LightYellow),
    "lightblue" => Some(Color::LightBlue),
    "lightmagenta" => Some(Color::LightMagenta),
    "lightcyan" => Some(Color::LightCyan),
    "white" => Some(Color::White),
    "reset" | "none" => Some(Color::Reset),
    _ => parse_hex_rgb(&low),
  }
}

fn parse_hex_rgb(s: &str) -> Option<Color>
{
  let t = s.strip_prefix('#')?;
  if t.len() != 6 || !t.is_ascii()
  {
    return None;
  }
  let r = u8::from_str_radix(&t[0..2], 16).ok()?;
  let g = u8::from_str_radix(&t[2..4], 16).ok()?;
  let b = u8::from_str_radix(&t[4..6], 16).ok()?;
  Some(Color::Rgb(r, g, b))
}

/// WCAG 2 relative luminance in `[0, 1]`.
pub fn relative_luminance((r, g, b): (u8, u8, u8)) -> f64
{
  fn linear(c: u8) -> f64
  {
    let c = c as f64 / 255.0;
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
  }
  0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
}

pub fn classify(
  rgb: (u8, u8, u8),
  threshold: f64,
) -> Scheme
{
  if relative_luminance(rgb) < threshold { Scheme::Dark } else { Scheme::Light }
}

/// Move every channel `step` of the way towards 255, at least one unit.
pub fn lighten(
  (r, g, b): (u8, u8, u8),
  step: f64,
) -> (u8, u8, u8)
{
  let up = |c: u8| {
    let room = 255 - c;
    if room == 0
    {
      return c;
    }
    let delta = (room as f64 * step).ceil().clamp(1.0, room as f64) as u8;
    c + delta
  };
  (up(r), up(g), up(b))
}

/// Move every channel `step` of the way towards 0, at least one unit.
pub fn darken(
  (r, g, b): (u8, u8, u8),
  step: f64,
) -> (u8, u8, u8)
{
  let down = |c: u8| {
    if c == 0
    {
      return c;
    }
    let delta = (c as f64 * step).ceil().clamp(1.0, c as f64) as u8;
    c - delta
  };
  (down(r), down(g), down(b))
}

/// Derive a contrasting colour from `base`: lighter on dark backgrounds,
/// darker on light ones. An unresolvable base uses [`FALLBACK_BACKGROUND`].
pub fn derive_contrasting(
  base: Option<ColorSpec>,
  tuning: Tuning,
) -> (Scheme, ColorSpec)
{
  let tuning = tuning.clamped();
  let rgb = base
    .and_then(|c| c.to_rgb())
    .or_else(|| to_rgb(FALLBACK_BACKGROUND))
    .unwrap_or((0, 0, 0));
  let scheme = classify(rgb, tuning.luminance_threshold);
  let (r, g, b) = match scheme
  {
    Scheme::Dark => lighten(rgb, tuning.step),
    Scheme::Light => darken(rgb, tuning.step),
  };
  (scheme, ColorSpec::rgb(r, g, b))
}
