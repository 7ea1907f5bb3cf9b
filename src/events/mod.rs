//! Inbound events from the file manager.
//!
//! The file manager prints one event per line as
//! `kind,receiver,sender,body` where `body` is JSON, e.g.
//! `hover,0,1700000000,{"url":"/tmp/a.txt"}`. A reader thread parses the
//! stream into a channel; the owner of the [`HoverHighlighter`] drains it
//! with [`pump`] and handles each event to completion before the next.

use std::{
  io::{
    self,
    BufRead,
  },
  path::{
    Path,
    PathBuf,
  },
  sync::mpsc::{
    self,
    Receiver,
    TryRecvError,
  },
  thread::{
    self,
    JoinHandle,
  },
};

use serde::Deserialize;

use crate::{
  host::{
    BufferId,
    EditorHost,
  },
  hover::{
    HoverChanged,
    HoverHighlighter,
    Outcome,
  },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileManagerEvent
{
  /// The hovered entry changed; `None` when the cursor is on nothing.
  Hover
  {
    url: Option<PathBuf>,
  },
  Cd
  {
    url: PathBuf,
  },
  /// The file manager session ended.
  Close,
  Other
  {
    kind: String,
  },
}

#[derive(Debug, thiserror::Error)]
pub enum EventParseError
{
  #[error("event line has no {0} field")]
  MissingField(&'static str),
  #[error("bad {kind} body: {source}")]
  BadBody
  {
    kind:   String,
    #[source]
    source: serde_json::Error,
  },
}

#[derive(Debug, Deserialize)]
struct UrlBody
{
  #[serde(default)]
  url: Option<PathBuf>,
}

/// Parse one event line. Blank lines yield `Ok(None)`.
pub fn parse_event_line(line: &str) -> Result<Option<FileManagerEvent>, EventParseError>
{
  let line = line.trim_end_matches(['\r', '\n']);
  if line.trim().is_empty()
  {
    return Ok(None);
  }
  let mut parts = line.splitn(4, ',');
  let kind = parts.next().unwrap_or_default().trim();
  let _receiver = parts.next().ok_or(EventParseError::MissingField("receiver"))?;
  let _sender = parts.next().ok_or(EventParseError::MissingField("sender"))?;
  let body = parts.next().unwrap_or_default().trim();

  let url_body = |kind: &str| -> Result<UrlBody, EventParseError> {
    if body.is_empty() || body == "null"
    {
      return Ok(UrlBody { url: None });
    }
    serde_json::from_str(body)
      .map_err(|source| EventParseError::BadBody { kind: kind.to_string(), source })
  };

  let ev = match kind
  {
    "hover" => FileManagerEvent::Hover { url: url_body(kind)?.url },
    "cd" => FileManagerEvent::Cd {
      url: url_body(kind)?.url.ok_or(EventParseError::MissingField("url"))?,
    },
    "close" | "quit" => FileManagerEvent::Close,
    other => FileManagerEvent::Other { kind: other.to_string() },
  };
  Ok(Some(ev))
}

/// Read events from `reader` on a background thread. A `Close` is sent when
/// the stream ends.
pub fn spawn_reader<R>(reader: R) -> io::Result<(Receiver<FileManagerEvent>, JoinHandle<()>)>
where
  R: BufRead + Send + 'static,
{
  let (tx, rx) = mpsc::channel();
  let handle = thread::Builder::new().name("hovertint-events".to_string()).spawn(move || {
    for line in reader.lines()
    {
      let line = match line
      {
        Ok(l) => l,
        Err(e) =>
        {
          crate::trace::log_error("[events] read error:", &e);
          break;
        }
      };
      match parse_event_line(&line)
      {
        Ok(Some(ev)) =>
        {
          if tx.send(ev).is_err()
          {
            return;
          }
        }
        Ok(None) =>
        {}
        Err(e) => crate::trace::log_error(&format!("[events] skipping '{line}':"), &e),
      }
    }
    crate::trace::log("[events] stream ended");
    let _ = tx.send(FileManagerEvent::Close);
  })?;
  Ok((rx, handle))
}

/// Map a file-manager event onto the hover state machine's input.
/// Events that do not move the hover yield `None`.
pub fn translate<H>(
  event: &FileManagerEvent,
  host: &H,
) -> Option<HoverChanged>
where
  H: EditorHost + ?Sized,
{
  match event
  {
    FileManagerEvent::Hover { url: Some(path) } => Some(HoverChanged(buffer_for_url(path, host))),
    FileManagerEvent::Hover { url: None } | FileManagerEvent::Close => Some(HoverChanged::none()),
    FileManagerEvent::Cd { .. } | FileManagerEvent::Other { .. } => None,
  }
}

// Buffers are opened by canonical path; the file manager may report the
// same file through a symlink.
fn buffer_for_url<H>(
  path: &Path,
  host: &H,
) -> Option<BufferId>
where
  H: EditorHost + ?Sized,
{
  host.buffer_for_path(path).or_else(|| {
    let canon = std::fs::canonicalize(path).ok()?;
    host.buffer_for_path(&canon)
  })
}

#[derive(Debug, Default)]
pub struct Pumped
{
  pub outcomes: Vec<Outcome>,
  /// The session closed or the sender went away.
  pub closed:   bool,
}

/// Handle every event currently queued on `rx`, in order.
pub fn pump<H>(
  rx: &Receiver<FileManagerEvent>,
  highlighter: &mut HoverHighlighter,
  host: &mut H,
) -> Pumped
where
  H: EditorHost + ?Sized,
{
  let mut pumped = Pumped::default();
  loop
  {
    let ev = match rx.try_recv()
    {
      Ok(ev) => ev,
      Err(TryRecvError::Empty) => break,
      Err(TryRecvError::Disconnected) =>
      {
        pumped.closed = true;
        break;
      }
    };
    if ev == FileManagerEvent::Close
    {
      pumped.closed = true;
    }
    if let Some(change) = translate(&ev, &*host)
    {
      pumped.outcomes.push(highlighter.on_hover_changed(host, change));
    }
  }
  pumped
}
