use std::env;

use hovertint::{
  color::{
    ColorSpec,
    Tuning,
  },
  config::{
    ColorschemeSetting,
    ConfigPaths,
    DEFAULT_COLORSCHEME,
    discover_config_paths,
    load_config,
    load_config_from_code,
    resolve_named_colorscheme,
  },
};

fn with_env<T>(
  k: &str,
  v: Option<&str>,
  f: impl FnOnce() -> T,
) -> T
{
  let old = env::var(k).ok();
  unsafe {
    match v
    {
      Some(val) => env::set_var(k, val),
      None => env::remove_var(k),
    }
  }
  let out = f();
  unsafe {
    match old
    {
      Some(s) => env::set_var(k, s),
      None => env::remove_var(k),
    }
  }
  out
}

#[test]
fn defaults_apply_without_user_config()
{
  let cfg = load_config_from_code("").unwrap();
  assert_eq!(cfg.colorscheme, Some(ColorschemeSetting::Named(DEFAULT_COLORSCHEME.to_string())));
  assert_eq!(cfg.hover.hovered_buffer, None);
  assert_eq!(cfg.hover.hovered_buffer_in_same_directory, None);
  assert!(!cfg.hover.highlight_same_directory);
  assert_eq!(cfg.hover.tuning, Tuning::default());
  assert_eq!(cfg.resolve_colorscheme().name, "night");
}

#[test]
fn user_config_overrides_defaults()
{
  let code = r##"
    hovertint.config({
      colorscheme = "day",
      highlight = {
        hovered_buffer = "#303030",
        hovered_buffer_in_same_directory = "darkgray",
        same_directory = true,
      },
      tuning = { step = 0.3 },
    })
  "##;
  let cfg = load_config_from_code(code).unwrap();
  assert_eq!(cfg.colorscheme, Some(ColorschemeSetting::Named("day".to_string())));
  assert_eq!(cfg.hover.hovered_buffer, ColorSpec::parse("#303030"));
  assert_eq!(cfg.hover.hovered_buffer_in_same_directory, ColorSpec::parse("darkgray"));
  assert!(cfg.hover.highlight_same_directory);
  assert_eq!(cfg.hover.tuning.step, 0.3);
  assert_eq!(cfg.hover.tuning.luminance_threshold, Tuning::default().luminance_threshold);
  assert_eq!(cfg.resolve_colorscheme().name, "day");
}

#[test]
fn config_calls_merge()
{
  let code = r#"
    hovertint.config({ highlight = { same_directory = true } })
    hovertint.config({ colorscheme = "moon" })
  "#;
  let cfg = load_config_from_code(code).unwrap();
  assert!(cfg.hover.highlight_same_directory);
  assert_eq!(cfg.resolve_colorscheme().name, "moon");
}

#[test]
fn custom_colorscheme_table()
{
  let code = r##"
    hovertint.config({
      colorscheme = { name = "paper", normal_bg = "#f0f0f0", normal_fg = "black" },
    })
  "##;
  let cfg = load_config_from_code(code).unwrap();
  let cs = cfg.resolve_colorscheme();
  assert_eq!(cs.name, "paper");
  assert_eq!(cs.normal_bg, ColorSpec::parse("#f0f0f0"));
  assert_eq!(cs.normal_fg, ColorSpec::parse("black"));
}

#[test]
fn tuning_is_clamped()
{
  let cfg =
    load_config_from_code("hovertint.config({ tuning = { step = 5, luminance_threshold = 0 } })")
      .unwrap();
  assert_eq!(cfg.hover.tuning.step, 1.0);
  assert_eq!(cfg.hover.tuning.luminance_threshold, 0.01);
}

#[test]
fn unknown_colorscheme_falls_back()
{
  assert_eq!(resolve_named_colorscheme("solarized").name, DEFAULT_COLORSCHEME);
  assert_eq!(resolve_named_colorscheme("DAY").name, "day");
}

#[test]
fn invalid_color_is_an_error()
{
  let err = load_config_from_code(
    "hovertint.config({ highlight = { hovered_buffer = 'notacolor' } })",
  )
  .unwrap_err();
  let msg = err.to_string();
  assert!(msg.contains("inline init.lua execution failed"), "{msg}");
  assert!(msg.contains("invalid color 'notacolor' for highlight.hovered_buffer"), "{msg}");
}

#[test]
fn wrongly_typed_sections_are_errors()
{
  let cases = [
    ("hovertint.config({ highlight = 'x' })", "highlight must be a table, got string"),
    ("hovertint.config({ tuning = 3 })", "tuning must be a table, got integer"),
    ("hovertint.config({ tuning = { step = 'big' } })", "tuning.step must be a number, got string"),
    (
      "hovertint.config({ tuning = { luminance_threshold = true } })",
      "tuning.luminance_threshold must be a number, got boolean",
    ),
    (
      "hovertint.config({ highlight = { same_directory = 'yes' } })",
      "highlight.same_directory must be a boolean, got string",
    ),
  ];
  for (code, want) in cases
  {
    let msg = load_config_from_code(code).unwrap_err().to_string();
    assert!(msg.contains(want), "{code}: {msg}");
  }
  let cfg = load_config_from_code("hovertint.config({ tuning = { step = 1 } })").unwrap();
  assert_eq!(cfg.hover.tuning.step, 1.0);
}

#[test]
fn config_requires_a_table()
{
  let err = load_config_from_code("hovertint.config('night')").unwrap_err();
  assert!(err.to_string().contains("hovertint.config expects a table, got string"));
}

#[test]
fn unknown_api_function_is_an_error()
{
  let err = load_config_from_code("hovertint.nope()").unwrap_err();
  assert!(err.to_string().contains("unknown hovertint function: nope"));
  // the guard only covers missing names
  assert!(load_config_from_code("assert(hovertint.trace('ok') == true)").is_ok());
}

#[test]
fn sandbox_has_no_io_or_os()
{
  assert!(load_config_from_code("io.write('x')").is_err());
  assert!(load_config_from_code("os.exit(1)").is_err());
  assert!(load_config_from_code("local s = string.format('%d', math.floor(1.5))").is_ok());
}

#[test]
fn getenv_falls_back_to_default()
{
  let code = r#"
    hovertint.trace("picking colorscheme")
    hovertint.config({ colorscheme = hovertint.getenv("HOVERTINT_TEST_UNSET_SCHEME", "storm") })
  "#;
  let cfg = load_config_from_code(code).unwrap();
  assert_eq!(cfg.resolve_colorscheme().name, "storm");
}

#[test]
fn load_config_reads_init_lua_from_root()
{
  let tmp = tempfile::tempdir().unwrap();
  let paths = ConfigPaths::at(tmp.path());
  assert!(!paths.exists);
  assert_eq!(load_config(&paths).unwrap().resolve_colorscheme().name, "night");

  std::fs::write(tmp.path().join("init.lua"), "hovertint.config({ colorscheme = 'storm' })")
    .unwrap();
  let paths = ConfigPaths::at(tmp.path());
  assert!(paths.exists);
  assert_eq!(paths.entry, tmp.path().join("init.lua"));
  assert_eq!(load_config(&paths).unwrap().resolve_colorscheme().name, "storm");
}

#[test]
fn load_config_names_the_failing_file()
{
  let tmp = tempfile::tempdir().unwrap();
  std::fs::write(tmp.path().join("init.lua"), "hovertint.config(").unwrap();
  let err = load_config(&ConfigPaths::at(tmp.path())).unwrap_err();
  assert!(err.to_string().contains("init.lua"));
}

// Env-mutating checks share one test so they cannot race each other.
#[test]
#[cfg(not(windows))]
fn discover_config_paths_env_precedence()
{
  let tmp = tempfile::tempdir().unwrap();
  let dir = tmp.path().join("conf");
  std::fs::create_dir_all(&dir).unwrap();
  let res = with_env("HOVERTINT_CONFIG_DIR", Some(dir.to_str().unwrap()), || {
    discover_config_paths().unwrap()
  });
  assert_eq!(res.root, dir);
  assert_eq!(res.entry, dir.join("init.lua"));
  assert!(!res.exists);

  let xdg = tmp.path().join("xdg");
  std::fs::create_dir_all(&xdg).unwrap();
  let res = with_env("HOVERTINT_CONFIG_DIR", None, || {
    with_env("XDG_CONFIG_HOME", Some(xdg.to_str().unwrap()), || discover_config_paths().unwrap())
  });
  assert_eq!(res.root, xdg.join("hovertint"));
  assert_eq!(res.entry, xdg.join("hovertint").join("init.lua"));
}
