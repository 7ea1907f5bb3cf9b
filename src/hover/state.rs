use std::path::{
  Path,
  PathBuf,
};

use super::{
  HoverChanged,
  HoverConfig,
  resolve_hover_color,
  resolve_same_directory_color,
};
use crate::{
  color::ColorSpec,
  host::{
    BufferId,
    EditorHost,
    HostError,
  },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPhase
{
  Idle,
  Hovering(BufferId),
}

/// A buffer we painted, with the background to put back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Painted
{
  buffer:   BufferId,
  previous: Option<ColorSpec>,
}

#[derive(Debug, Clone, Default)]
pub struct HoverState
{
  hovered:         Option<Painted>,
  // false while the hover colour has not reached the host yet
  applied:         bool,
  siblings:        Vec<Painted>,
  pending_restore: Vec<Painted>,
}

impl HoverState
{
  pub fn phase(&self) -> HoverPhase
  {
    match self.hovered
    {
      Some(p) => HoverPhase::Hovering(p.buffer),
      None => HoverPhase::Idle,
    }
  }

  pub fn hovered(&self) -> Option<BufferId>
  {
    self.hovered.map(|p| p.buffer)
  }

  /// Background captured when the hovered buffer became hovered.
  pub fn previous_color(&self) -> Option<Option<ColorSpec>>
  {
    self.hovered.map(|p| p.previous)
  }

  /// True when the hovered buffer is recorded but its colour failed to apply.
  pub fn apply_pending(&self) -> bool
  {
    self.hovered.is_some() && !self.applied
  }

  pub fn siblings(&self) -> Vec<BufferId>
  {
    self.siblings.iter().map(|p| p.buffer).collect()
  }

  /// Buffers whose restore failed and will be retried on the next event.
  pub fn pending_restores(&self) -> Vec<BufferId>
  {
    self.pending_restore.iter().map(|p| p.buffer).collect()
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Visible effects of one transition.
pub struct Outcome
{
  pub restored:         Vec<BufferId>,
  pub applied:          Option<(BufferId, ColorSpec)>,
  pub painted_siblings: Vec<BufferId>,
  pub diagnostics:      Vec<HostError>,
}

impl Outcome
{
  pub fn is_noop(&self) -> bool
  {
    self.restored.is_empty()
      && self.applied.is_none()
      && self.painted_siblings.is_empty()
      && self.diagnostics.is_empty()
  }
}

/// Owner of the session's hover state.
#[derive(Debug, Clone, Default)]
pub struct HoverHighlighter
{
  state:  HoverState,
  config: HoverConfig,
}

impl HoverHighlighter
{
  pub fn new(config: HoverConfig) -> Self
  {
    Self { state: HoverState::default(), config }
  }

  pub fn config(&self) -> &HoverConfig
  {
    &self.config
  }

  pub fn state(&self) -> &HoverState
  {
    &self.state
  }

  pub fn phase(&self) -> HoverPhase
  {
    self.state.phase()
  }

  /// Move the hover to `event`'s target.
  ///
  /// The previous target is restored before the new one is painted. A target
  /// the host no longer knows is treated as "nothing hovered". Host failures
  /// are returned as diagnostics; the state still records the intended
  /// target so the next event can retry.
  pub fn on_hover_changed<H>(
    &mut self,
    host: &mut H,
    event: HoverChanged,
  ) -> Outcome
  where
    H: EditorHost + ?Sized,
  {
    let mut out = Outcome::default();
    self.retry_restores(host, &mut out);

    let target = match event.0
    {
      Some(b) if host.buffer_exists(b) => Some(b),
      Some(b) =>
      {
        crate::trace::log(format!("[hover] {b} is gone, treating as no hover"));
        None
      }
      None => None,
    };

    if let Some(cur) = self.state.hovered
      && Some(cur.buffer) == target
    {
      if !self.state.applied
      {
        crate::trace::log(format!("[hover] retry apply on {}", cur.buffer));
        self.apply_hover(host, cur.buffer, &mut out);
      }
      return out;
    }

    self.release(host, &mut out);

    let Some(target) = target
    else
    {
      return out;
    };

    let previous = match self.take_pending(target)
    {
      Some(p) => p.previous,
      None => match host.window_background(target)
      {
        Ok(bg) => bg,
        Err(e) =>
        {
          crate::trace::log(format!("[hover] capture failed: {e}"));
          out.diagnostics.push(e);
          return out;
        }
      },
    };
    self.state.hovered = Some(Painted { buffer: target, previous });
    self.state.applied = false;
    self.apply_hover(host, target, &mut out);
    if self.config.highlight_same_directory
    {
      self.paint_siblings(host, target, &mut out);
    }
    out
  }

  /// The host wiped `buffer`; drop it without restoring anything.
  pub fn forget_buffer(
    &mut self,
    buffer: BufferId,
  ) -> bool
  {
    let mut found = false;
    if self.state.hovered.is_some_and(|p| p.buffer == buffer)
    {
      self.state.hovered = None;
      self.state.applied = false;
      found = true;
    }
    let before = self.state.siblings.len() + self.state.pending_restore.len();
    self.state.siblings.retain(|p| p.buffer != buffer);
    self.state.pending_restore.retain(|p| p.buffer != buffer);
    found |= before != self.state.siblings.len() + self.state.pending_restore.len();
    if found
    {
      crate::trace::log(format!("[hover] forgot {buffer}"));
    }
    found
  }

  /// Repaint after a colourscheme switch. Captured backgrounds are kept.
  pub fn on_colorscheme_changed<H>(
    &mut self,
    host: &mut H,
  ) -> Outcome
  where
    H: EditorHost + ?Sized,
  {
    let mut out = Outcome::default();
    let Some(cur) = self.state.hovered
    else
    {
      return out;
    };
    self.apply_hover(host, cur.buffer, &mut out);
    if !self.state.siblings.is_empty()
    {
      let color = resolve_same_directory_color(&self.config, &*host);
      for p in self.state.siblings.clone()
      {
        match host.set_window_background(p.buffer, Some(&color))
        {
          Ok(()) => out.painted_siblings.push(p.buffer),
          Err(e) => out.diagnostics.push(e),
        }
      }
    }
    out
  }

  fn apply_hover<H>(
    &mut self,
    host: &mut H,
    buffer: BufferId,
    out: &mut Outcome,
  ) where
    H: EditorHost + ?Sized,
  {
    let color = resolve_hover_color(&self.config, &*host);
    match host.set_window_background(buffer, Some(&color))
    {
      Ok(()) =>
      {
        crate::trace::log(format!("[hover] {buffer} -> {color}"));
        self.state.applied = true;
        out.applied = Some((buffer, color));
      }
      Err(e) =>
      {
        crate::trace::log(format!("[hover] apply failed: {e}"));
        self.state.applied = false;
        out.diagnostics.push(e);
      }
    }
  }

  fn paint_siblings<H>(
    &mut self,
    host: &mut H,
    target: BufferId,
    out: &mut Outcome,
  ) where
    H: EditorHost + ?Sized,
  {
    let Some(dir) = parent_dir(host.buffer_path(target))
    else
    {
      return;
    };
    let color = resolve_same_directory_color(&self.config, &*host);
    for buffer in host.buffers()
    {
      if buffer == target || parent_dir(host.buffer_path(buffer)).as_ref() != Some(&dir)
      {
        continue;
      }
      let previous = match self.take_pending(buffer)
      {
        Some(p) => p.previous,
        None => match host.window_background(buffer)
        {
          Ok(bg) => bg,
          Err(e) =>
          {
            out.diagnostics.push(e);
            continue;
          }
        },
      };
      match host.set_window_background(buffer, Some(&color))
      {
        Ok(()) =>
        {
          self.state.siblings.push(Painted { buffer, previous });
          out.painted_siblings.push(buffer);
        }
        Err(e) =>
        {
          // nothing reached the host, so there is nothing to restore
          out.diagnostics.push(e);
        }
      }
    }
  }

  fn release<H>(
    &mut self,
    host: &mut H,
    out: &mut Outcome,
  ) where
    H: EditorHost + ?Sized,
  {
    let mut painted: Vec<Painted> = self.state.hovered.take().into_iter().collect();
    painted.append(&mut self.state.siblings);
    self.state.applied = false;
    for p in painted
    {
      self.restore(host, p, out);
    }
  }

  fn retry_restores<H>(
    &mut self,
    host: &mut H,
    out: &mut Outcome,
  ) where
    H: EditorHost + ?Sized,
  {
    for p in std::mem::take(&mut self.state.pending_restore)
    {
      crate::trace::log(format!("[hover] retry restore on {}", p.buffer));
      self.restore(host, p, out);
    }
  }

  fn restore<H>(
    &mut self,
    host: &mut H,
    p: Painted,
    out: &mut Outcome,
  ) where
    H: EditorHost + ?Sized,
  {
    match host.set_window_background(p.buffer, p.previous.as_ref())
    {
      Ok(()) => out.restored.push(p.buffer),
      Err(HostError::UnknownBuffer(b)) =>
      {
        crate::trace::log(format!("[hover] {b} vanished before restore"));
      }
      Err(e) =>
      {
        crate::trace::log(format!("[hover] restore failed: {e}"));
        out.diagnostics.push(e);
        self.state.pending_restore.push(p);
      }
    }
  }

  fn take_pending(
    &mut self,
    buffer: BufferId,
  ) -> Option<Painted>
  {
    let idx = self.state.pending_restore.iter().position(|p| p.buffer == buffer)?;
    Some(self.state.pending_restore.remove(idx))
  }
}

fn parent_dir(path: Option<PathBuf>) -> Option<PathBuf>
{
  path.as_deref().and_then(Path::parent).map(Path::to_path_buf)
}
