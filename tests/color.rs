use hovertint::color::{
  ColorSpec,
  Scheme,
  Tuning,
  classify,
  darken,
  derive_contrasting,
  indexed_rgb,
  lighten,
  parse_color,
  relative_luminance,
  to_rgb,
};
use proptest::prelude::*;
use ratatui::style::Color;

#[test]
fn parse_color_named_and_hex()
{
  assert_eq!(parse_color("red"), Some(Color::Red));
  assert_eq!(parse_color("Gray"), Some(Color::Gray));
  assert_eq!(parse_color("darkgrey"), Some(Color::DarkGray));
  assert_eq!(parse_color("LightBlue"), Some(Color::LightBlue));
  assert_eq!(parse_color("#00ff00"), Some(Color::Rgb(0, 255, 0)));
  assert_eq!(parse_color("#ABCDEF"), Some(Color::Rgb(0xAB, 0xCD, 0xEF)));
  assert_eq!(parse_color("  #1a1b26 "), Some(Color::Rgb(0x1a, 0x1b, 0x26)));
  assert_eq!(parse_color("reset"), Some(Color::Reset));
  assert_eq!(parse_color("not-a-color"), None);
  assert_eq!(parse_color("#123"), None);
  assert_eq!(parse_color("#gg0000"), None);
}

#[test]
fn color_spec_rejects_reset_and_displays_hex()
{
  assert_eq!(ColorSpec::parse("none"), None);
  let c = ColorSpec::parse("#1A1B26").expect("hex");
  assert_eq!(c.to_string(), "#1a1b26");
  assert_eq!(ColorSpec::parse("darkgray").map(|c| c.to_string()).as_deref(), Some("darkgray"));
  // Display output parses back to the same colour
  let named = ColorSpec::parse("lightmagenta").expect("named");
  assert_eq!(ColorSpec::parse(&named.to_string()), Some(named));
}

#[test]
fn palette_resolves_ansi_and_indexed()
{
  assert_eq!(to_rgb(Color::Reset), None);
  assert_eq!(to_rgb(Color::Black), Some((0, 0, 0)));
  assert_eq!(to_rgb(Color::White), Some((255, 255, 255)));
  assert_eq!(indexed_rgb(16), (0, 0, 0));
  assert_eq!(indexed_rgb(196), (255, 0, 0));
  assert_eq!(indexed_rgb(231), (255, 255, 255));
  assert_eq!(indexed_rgb(232), (8, 8, 8));
  assert_eq!(indexed_rgb(255), (238, 238, 238));
  assert_eq!(to_rgb(Color::Indexed(9)), to_rgb(Color::LightRed));
}

#[test]
fn luminance_extremes_and_weights()
{
  assert!(relative_luminance((0, 0, 0)).abs() < 1e-9);
  assert!((relative_luminance((255, 255, 255)) - 1.0).abs() < 1e-9);
  let red = relative_luminance((255, 0, 0));
  let green = relative_luminance((0, 255, 0));
  let blue = relative_luminance((0, 0, 255));
  assert!(green > red && red > blue);
  let mid = relative_luminance((127, 127, 127));
  assert!(mid > 0.1 && mid < 0.3, "mid gray luminance was {mid}");
}

#[test]
fn classify_builtin_backgrounds()
{
  let threshold = Tuning::default().luminance_threshold;
  assert_eq!(classify((0x1a, 0x1b, 0x26), threshold), Scheme::Dark);
  assert_eq!(classify((0x24, 0x28, 0x3b), threshold), Scheme::Dark);
  assert_eq!(classify((0xe1, 0xe2, 0xe7), threshold), Scheme::Light);
  assert_eq!(classify((0, 0, 0), threshold), Scheme::Dark);
  assert_eq!(classify((255, 255, 255), threshold), Scheme::Light);
}

#[test]
fn lighten_and_darken_move_every_channel_that_can_move()
{
  assert_eq!(lighten((0x1a, 0x1b, 0x26), 0.15), (0x3d, 0x3e, 0x47));
  assert_eq!(darken((0xe1, 0xe2, 0xe7), 0.15), (0xbf, 0xc0, 0xc4));
  // tiny steps still move by one unit
  assert_eq!(lighten((10, 254, 255), 0.001), (11, 255, 255));
  assert_eq!(darken((0, 1, 200), 0.001), (0, 0, 199));
  // saturated channels stay put
  assert_eq!(lighten((255, 255, 255), 0.5), (255, 255, 255));
  assert_eq!(darken((0, 0, 0), 0.5), (0, 0, 0));
}

#[test]
fn derive_uses_fallback_for_unset_background()
{
  let (scheme, derived) = derive_contrasting(None, Tuning::default());
  assert_eq!(scheme, Scheme::Dark);
  assert!(derived.luminance().unwrap_or(0.0) > 0.0);
}

#[test]
fn tuning_is_clamped_into_working_range()
{
  let t = Tuning { step: 7.0, luminance_threshold: 0.0 }.clamped();
  assert_eq!(t.step, 1.0);
  assert_eq!(t.luminance_threshold, 0.01);
  let t = Tuning { step: f64::NAN, luminance_threshold: 2.0 }.clamped();
  assert_eq!(t.step, Tuning::default().step);
  assert_eq!(t.luminance_threshold, 0.99);
}

proptest! {
  #[test]
  fn derived_color_improves_contrast(
    r in any::<u8>(),
    g in any::<u8>(),
    b in any::<u8>(),
    step in 0.0f64..2.0,
    threshold in -1.0f64..2.0,
  ) {
    let base = ColorSpec::rgb(r, g, b);
    let tuning = Tuning { step, luminance_threshold: threshold };
    let (scheme, derived) = derive_contrasting(Some(base), tuning);
    let base_lum = relative_luminance((r, g, b));
    let derived_lum = derived.luminance().expect("rgb");
    match scheme
    {
      Scheme::Dark => prop_assert!(derived_lum > base_lum, "{derived} not lighter than {base}"),
      Scheme::Light => prop_assert!(derived_lum < base_lum, "{derived} not darker than {base}"),
    }
  }
}
