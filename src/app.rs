//! Session state shared by the terminal front end and integration tests.
//!
//! [`App`] owns the editor session ([`SessionHost`]), the hover state
//! machine, and the receiving end of the file-manager event channel. The
//! binary drives it from the runtime loop; tests construct one directly and
//! feed it events or keys.

use std::{
  path::PathBuf,
  sync::mpsc::Receiver,
};

use crate::{
  color::Scheme,
  config::{
    Config,
    resolve_named_colorscheme,
  },
  events::{
    self,
    FileManagerEvent,
  },
  host::{
    BUILTIN_COLORSCHEMES,
    BufferId,
    Colorscheme,
    EditorHost,
    SessionHost,
  },
  hover::{
    HoverChanged,
    HoverHighlighter,
    Outcome,
    host_scheme,
  },
};

const MAX_MESSAGES: usize = 100;

pub struct App
{
  pub host:              SessionHost,
  pub highlighter:       HoverHighlighter,
  pub force_full_redraw: bool,
  events:                Option<Receiver<FileManagerEvent>>,
  messages:              Vec<String>,
  colorschemes:          Vec<Colorscheme>,
  scheme_idx:            usize,
}

impl App
{
  /// Open `files` in a fresh session configured by `config`.
  pub fn new(
    config: &Config,
    files: &[PathBuf],
  ) -> Self
  {
    let mut host = SessionHost::new(config.resolve_colorscheme());
    for f in files
    {
      host.open(f.clone());
    }
    Self::with_host(host, config)
  }

  pub fn with_host(
    host: SessionHost,
    config: &Config,
  ) -> Self
  {
    let active = host.colorscheme().clone();
    let mut colorschemes = vec![active.clone()];
    for (name, _, _) in BUILTIN_COLORSCHEMES
    {
      if *name != active.name
      {
        colorschemes.push(resolve_named_colorscheme(name));
      }
    }
    Self {
      host,
      highlighter: HoverHighlighter::new(config.hover.clone()),
      force_full_redraw: false,
      events: None,
      messages: Vec::new(),
      colorschemes,
      scheme_idx: 0,
    }
  }

  pub fn attach_events(
    &mut self,
    rx: Receiver<FileManagerEvent>,
  )
  {
    self.events = Some(rx);
  }

  pub fn events_attached(&self) -> bool
  {
    self.events.is_some()
  }

  /// Handle every queued file-manager event. Returns how many moved the
  /// hover.
  pub fn pump_events(&mut self) -> usize
  {
    let Some(rx) = self.events.as_ref()
    else
    {
      return 0;
    };
    let pumped = events::pump(rx, &mut self.highlighter, &mut self.host);
    let handled = pumped.outcomes.len();
    for outcome in pumped.outcomes
    {
      self.record(outcome);
    }
    if pumped.closed
    {
      self.events = None;
      self.add_message("file manager closed");
    }
    handled
  }

  /// Move the hover directly, bypassing the event stream.
  pub fn hover(
    &mut self,
    target: Option<BufferId>,
  )
  {
    let outcome = self.highlighter.on_hover_changed(&mut self.host, HoverChanged(target));
    self.record(outcome);
  }

  pub fn clear_hover(&mut self)
  {
    self.hover(None);
  }

  /// Step the hover through the open buffers, wrapping at either end.
  pub fn move_hover(
    &mut self,
    delta: isize,
  )
  {
    let order = self.host.buffers();
    if order.is_empty()
    {
      return;
    }
    let len = order.len() as isize;
    let next = match self.highlighter.state().hovered().and_then(|b| order.iter().position(|o| *o == b))
    {
      Some(idx) => (idx as isize + delta).rem_euclid(len),
      None if delta >= 0 => 0,
      None => len - 1,
    };
    self.hover(Some(order[next as usize]));
  }

  /// Wipe a buffer from the session, dropping any hover bookkeeping for it.
  pub fn close_buffer(
    &mut self,
    buffer: BufferId,
  ) -> bool
  {
    let removed = self.host.wipe(buffer);
    if removed
    {
      self.highlighter.forget_buffer(buffer);
    }
    removed
  }

  /// Switch to the next colourscheme and repaint the hover.
  pub fn cycle_colorscheme(&mut self)
  {
    if self.colorschemes.is_empty()
    {
      return;
    }
    self.scheme_idx = (self.scheme_idx + 1) % self.colorschemes.len();
    let next = self.colorschemes[self.scheme_idx].clone();
    self.set_colorscheme(next);
  }

  pub fn set_colorscheme(
    &mut self,
    colorscheme: Colorscheme,
  )
  {
    self.host.set_colorscheme(colorscheme);
    let outcome = self.highlighter.on_colorscheme_changed(&mut self.host);
    self.record(outcome);
    self.force_full_redraw = true;
  }

  pub fn scheme(&self) -> Scheme
  {
    host_scheme(self.highlighter.config(), &self.host)
  }

  pub fn hovered_name(&self) -> Option<String>
  {
    self.highlighter.state().hovered().and_then(|b| self.host.buffer_name(b))
  }

  pub fn messages(&self) -> &[String]
  {
    &self.messages
  }

  pub fn last_message(&self) -> Option<&str>
  {
    self.messages.last().map(String::as_str)
  }

  pub fn add_message(
    &mut self,
    msg: &str,
  )
  {
    let m = msg.trim().to_string();
    if m.is_empty()
    {
      return;
    }
    self.messages.push(m);
    if self.messages.len() > MAX_MESSAGES
    {
      let _ = self.messages.drain(0..self.messages.len() - MAX_MESSAGES);
    }
    self.force_full_redraw = true;
  }

  fn record(
    &mut self,
    outcome: Outcome,
  )
  {
    for d in &outcome.diagnostics
    {
      self.add_message(&d.to_string());
    }
  }
}
