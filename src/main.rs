use std::{
  env,
  fs::File,
  io::{
    self,
    BufReader,
  },
  path::PathBuf,
};

use hovertint::{
  app::App,
  config::{
    self,
    ColorschemeSetting,
    ConfigPaths,
  },
  events,
  runtime,
  trace,
};

fn print_version()
{
  println!("hovertint {}", env!("CARGO_PKG_VERSION"));
}

fn print_help()
{
  println!(
    "Usage: hovertint [OPTIONS] [FILE]...\n\n\
     Options:\n\
       -h, --help              Show this help and exit\n\
       -V, --version           Show version and exit\n\
           --events FILE       Read file-manager events from FILE ('-' for stdin)\n\
           --colorscheme NAME  Start with colorscheme NAME (night, storm, moon, day)\n\
           --config-dir DIR    Use DIR as the config root\n\
           --trace[=FILE]      Enable tracing to FILE (default /tmp/hovertint-trace.log)\n\
     Keys:\n\
       j/k, Tab/S-Tab          Move the hover between windows\n\
       Esc                     Clear the hover\n\
       c                       Cycle colorschemes\n\
       q                       Quit\n"
  );
}

fn missing_value(opt: &str) -> !
{
  eprintln!("hovertint: {opt} requires a value");
  print_help();
  std::process::exit(2);
}

fn absolute(path: PathBuf) -> PathBuf
{
  if let Ok(canon) = std::fs::canonicalize(&path)
  {
    return canon;
  }
  if path.is_absolute()
  {
    return path;
  }
  env::current_dir().map(|cwd| cwd.join(&path)).unwrap_or(path)
}

fn main() -> Result<(), Box<dyn std::error::Error>>
{
  trace::install_panic_hook();

  // Minimal argument parsing
  let mut args = env::args().skip(1);
  let mut files: Vec<PathBuf> = Vec::new();
  let mut events_src: Option<String> = None;
  let mut colorscheme: Option<String> = None;
  let mut config_dir: Option<PathBuf> = None;
  while let Some(a) = args.next()
  {
    match a.as_str()
    {
      "-h" | "--help" =>
      {
        print_help();
        return Ok(());
      }
      "-V" | "--version" =>
      {
        print_version();
        return Ok(());
      }
      s if s == "--trace" || s.starts_with("--trace=") =>
      {
        unsafe { env::set_var("HOVERTINT_TRACE", "1") };
        if let Some((_, file)) = s.split_once('=')
          && !file.is_empty()
        {
          unsafe { env::set_var("HOVERTINT_TRACE_FILE", file) };
        }
      }
      "--events" => events_src = Some(args.next().unwrap_or_else(|| missing_value("--events"))),
      s if s.starts_with("--events=") => events_src = s.split_once('=').map(|(_, v)| v.to_string()),
      "--colorscheme" =>
      {
        colorscheme = Some(args.next().unwrap_or_else(|| missing_value("--colorscheme")))
      }
      s if s.starts_with("--colorscheme=") =>
      {
        colorscheme = s.split_once('=').map(|(_, v)| v.to_string())
      }
      "--config-dir" =>
      {
        config_dir = Some(PathBuf::from(args.next().unwrap_or_else(|| missing_value("--config-dir"))))
      }
      s if s.starts_with("--config-dir=") =>
      {
        config_dir = s.split_once('=').map(|(_, v)| PathBuf::from(v))
      }
      "--" =>
      {
        files.extend(args.by_ref().map(PathBuf::from));
        break;
      }
      s if s.starts_with('-') && s != "-" =>
      {
        eprintln!("hovertint: unknown option: {}", s);
        print_help();
        std::process::exit(2);
      }
      other => files.push(PathBuf::from(other)),
    }
  }

  if trace::enabled()
  {
    trace::log(format!("[main] starting hovertint, tracing to {}", trace::trace_path().display()));
  }
  let paths = match config_dir
  {
    Some(dir) => ConfigPaths::at(dir),
    None => config::discover_config_paths()?,
  };
  let mut cfg = config::load_config(&paths)?;
  if let Some(name) = colorscheme
  {
    cfg.colorscheme = Some(ColorschemeSetting::Named(name));
  }

  let files: Vec<PathBuf> = files.into_iter().map(absolute).collect();
  let mut app = App::new(&cfg, &files);

  match events_src.as_deref()
  {
    Some("-") =>
    {
      let (rx, _reader) = events::spawn_reader(BufReader::new(io::stdin()))?;
      app.attach_events(rx);
    }
    Some(path) =>
    {
      let file = File::open(path).map_err(|e| {
        io::Error::new(e.kind(), format!("open events '{path}': {e}"))
      })?;
      let (rx, _reader) = events::spawn_reader(BufReader::new(file))?;
      app.attach_events(rx);
    }
    None =>
    {}
  }

  if let Err(e) = runtime::run_app(&mut app)
  {
    trace::log_error("[error] runtime::run_app:", &*e);
    return Err(e);
  }
  Ok(())
}
