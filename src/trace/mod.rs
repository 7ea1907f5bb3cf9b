//! Opt-in trace log.
//!
//! Enabled by `HOVERTINT_TRACE` (any value other than empty or `0`). Lines
//! are appended to `HOVERTINT_TRACE_FILE`, else `$TMPDIR/hovertint-trace.log`,
//! else `/tmp/hovertint-trace.log`. Every line carries a local timestamp and
//! a `[component]` tag supplied by the caller.

use std::{
  error::Error,
  fs::OpenOptions,
  io::Write,
  path::PathBuf,
};

pub fn enabled() -> bool
{
  std::env::var("HOVERTINT_TRACE").map(|v| !v.is_empty() && v != "0").unwrap_or(false)
}

/// Where trace lines go when tracing is on.
pub fn trace_path() -> PathBuf
{
  if let Ok(fp) = std::env::var("HOVERTINT_TRACE_FILE")
    && !fp.is_empty()
  {
    return PathBuf::from(fp);
  }
  let dir = std::env::var("TMPDIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("/tmp"));
  dir.join("hovertint-trace.log")
}

pub fn log<S: AsRef<str>>(s: S)
{
  if !enabled()
  {
    return;
  }
  let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
  let line = format!("{stamp} {}\n", s.as_ref());
  let _ = OpenOptions::new()
    .create(true)
    .append(true)
    .open(trace_path())
    .and_then(|mut f| f.write_all(line.as_bytes()));
}

/// Log `err` and each of its sources on one line.
pub fn log_error(
  tag: &str,
  err: &dyn Error,
)
{
  if !enabled()
  {
    return;
  }
  let mut line = format!("{tag} {err}");
  let mut source = err.source();
  while let Some(cause) = source
  {
    line.push_str(": ");
    line.push_str(&cause.to_string());
    source = cause.source();
  }
  log(line);
}

/// Log panics with location and backtrace, and drop out of raw mode and the
/// alternate screen so the message is readable.
pub fn install_panic_hook()
{
  std::panic::set_hook(Box::new(|info| {
    let msg = info
      .payload()
      .downcast_ref::<&str>()
      .map(|s| s.to_string())
      .or_else(|| info.payload().downcast_ref::<String>().cloned())
      .unwrap_or_else(|| "<non-string panic payload>".to_string());
    let loc = info
      .location()
      .map(|l| format!("{}:{}", l.file(), l.line()))
      .unwrap_or_else(|| "<unknown>".to_string());
    log(format!("[panic] {msg} @ {loc}"));
    log(format!("[panic] backtrace:\n{}", std::backtrace::Backtrace::force_capture()));
    let _ = crossterm::terminal::disable_raw_mode();
    let mut out = std::io::stdout();
    let _ = crossterm::execute!(out, crossterm::terminal::LeaveAlternateScreen);
    eprintln!("hovertint panicked: {msg} @ {loc}");
  }));
}
