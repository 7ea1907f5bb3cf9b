use std::path::{
  Path,
  PathBuf,
};

use super::{
  BufferId,
  Colorscheme,
  EditorHost,
  HostError,
};
use crate::color::ColorSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u32);

#[derive(Debug, Clone)]
struct BufferEntry
{
  id:   BufferId,
  path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One editor window and the background it was explicitly given, if any.
pub struct Window
{
  pub id:         WindowId,
  pub buffer:     BufferId,
  pub background: Option<ColorSpec>,
}

/// In-memory editor session: buffers keyed by path, windows showing them,
/// and the active colourscheme.
#[derive(Debug, Clone)]
pub struct SessionHost
{
  buffers:     Vec<BufferEntry>,
  windows:     Vec<Window>,
  colorscheme: Colorscheme,
  next_buffer: u32,
  next_window: u32,
}

impl SessionHost
{
  pub fn new(colorscheme: Colorscheme) -> Self
  {
    Self {
      buffers: Vec::new(),
      windows: Vec::new(),
      colorscheme,
      next_buffer: 1,
      next_window: 1000,
    }
  }

  /// Open `path` in a new window, or return the buffer already showing it.
  pub fn open(
    &mut self,
    path: impl Into<PathBuf>,
  ) -> BufferId
  {
    let path = path.into();
    if let Some(existing) = self.buffer_for_path(&path)
    {
      return existing;
    }
    let id = BufferId(self.next_buffer);
    self.next_buffer += 1;
    self.buffers.push(BufferEntry { id, path });
    self.push_window(id);
    id
  }

  /// Open another window on an existing buffer. The new window inherits the
  /// background of the buffer's existing windows.
  pub fn split(
    &mut self,
    buffer: BufferId,
  ) -> Option<WindowId>
  {
    if !self.buffer_exists(buffer)
    {
      return None;
    }
    let inherited = self.windows.iter().find(|w| w.buffer == buffer).and_then(|w| w.background);
    let id = self.push_window(buffer);
    if let Some(w) = self.windows.iter_mut().find(|w| w.id == id)
    {
      w.background = inherited;
    }
    Some(id)
  }

  /// Remove a buffer and every window showing it.
  pub fn wipe(
    &mut self,
    buffer: BufferId,
  ) -> bool
  {
    let before = self.buffers.len();
    self.buffers.retain(|b| b.id != buffer);
    self.windows.retain(|w| w.buffer != buffer);
    self.buffers.len() != before
  }

  pub fn colorscheme(&self) -> &Colorscheme
  {
    &self.colorscheme
  }

  pub fn set_colorscheme(
    &mut self,
    colorscheme: Colorscheme,
  )
  {
    crate::trace::log(format!("[session] colorscheme -> {}", colorscheme.name));
    self.colorscheme = colorscheme;
  }

  pub fn windows(&self) -> &[Window]
  {
    &self.windows
  }

  /// What a window actually renders: its own background, else the normal one.
  pub fn effective_background(
    &self,
    window: &Window,
  ) -> Option<ColorSpec>
  {
    window.background.or(self.colorscheme.normal_bg)
  }

  /// Effective backgrounds of every window showing `buffer`.
  pub fn rendered_backgrounds(
    &self,
    buffer: BufferId,
  ) -> Vec<Option<ColorSpec>>
  {
    self
      .windows
      .iter()
      .filter(|w| w.buffer == buffer)
      .map(|w| self.effective_background(w))
      .collect()
  }

  pub fn buffer_name(
    &self,
    buffer: BufferId,
  ) -> Option<String>
  {
    self.buffer_path(buffer).map(|p| {
      p.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| p.display().to_string())
    })
  }

  fn push_window(
    &mut self,
    buffer: BufferId,
  ) -> WindowId
  {
    let id = WindowId(self.next_window);
    self.next_window += 1;
    self.windows.push(Window { id, buffer, background: None });
    id
  }
}

impl EditorHost for SessionHost
{
  fn normal_background(&self) -> Option<ColorSpec>
  {
    self.colorscheme.normal_bg
  }

  fn buffer_exists(
    &self,
    buffer: BufferId,
  ) -> bool
  {
    self.buffers.iter().any(|b| b.id == buffer)
  }

  fn buffer_path(
    &self,
    buffer: BufferId,
  ) -> Option<PathBuf>
  {
    self.buffers.iter().find(|b| b.id == buffer).map(|b| b.path.clone())
  }

  fn buffer_for_path(
    &self,
    path: &Path,
  ) -> Option<BufferId>
  {
    self.buffers.iter().find(|b| b.path == path).map(|b| b.id)
  }

  fn buffers(&self) -> Vec<BufferId>
  {
    self.buffers.iter().map(|b| b.id).collect()
  }

  fn window_background(
    &self,
    buffer: BufferId,
  ) -> Result<Option<ColorSpec>, HostError>
  {
    if !self.buffer_exists(buffer)
    {
      return Err(HostError::UnknownBuffer(buffer));
    }
    Ok(self.windows.iter().find(|w| w.buffer == buffer).and_then(|w| w.background))
  }

  fn set_window_background(
    &mut self,
    buffer: BufferId,
    color: Option<&ColorSpec>,
  ) -> Result<(), HostError>
  {
    if !self.buffer_exists(buffer)
    {
      return Err(HostError::UnknownBuffer(buffer));
    }
    for w in self.windows.iter_mut().filter(|w| w.buffer == buffer)
    {
      w.background = color.copied();
    }
    Ok(())
  }
}
