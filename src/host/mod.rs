//! The editor side of the bridge.
//!
//! [`EditorHost`] is the seam the hover state machine talks through. A real
//! editor integration implements it over its own window/buffer API; the
//! crate ships [`SessionHost`], an in-memory editor session used by the
//! terminal front end and the tests.

use std::{
  fmt,
  path::{
    Path,
    PathBuf,
  },
};

use crate::color::ColorSpec;

mod colorscheme;
mod session;

pub use colorscheme::{
  BUILTIN_COLORSCHEMES,
  Colorscheme,
  builtin_colorscheme,
};
pub use session::{
  SessionHost,
  Window,
  WindowId,
};

/// Editor buffer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u32);

impl fmt::Display for BufferId
{
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result
  {
    write!(f, "buffer {}", self.0)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError
{
  #[error("{0} does not exist")]
  UnknownBuffer(BufferId),
  #[error("editor rejected background for {buffer}: {reason}")]
  Rejected
  {
    buffer: BufferId,
    reason: String,
  },
}

/// Operations the hover state machine needs from the editor.
///
/// A window background of `None` means the window follows the
/// colourscheme's normal background.
pub trait EditorHost
{
  /// Background of the active colourscheme's normal highlight.
  fn normal_background(&self) -> Option<ColorSpec>;

  fn buffer_exists(
    &self,
    buffer: BufferId,
  ) -> bool;

  fn buffer_path(
    &self,
    buffer: BufferId,
  ) -> Option<PathBuf>;

  fn buffer_for_path(
    &self,
    path: &Path,
  ) -> Option<BufferId>;

  fn buffers(&self) -> Vec<BufferId>;

  fn window_background(
    &self,
    buffer: BufferId,
  ) -> Result<Option<ColorSpec>, HostError>;

  /// Apply `color` to every window showing `buffer`.
  fn set_window_background(
    &mut self,
    buffer: BufferId,
    color: Option<&ColorSpec>,
  ) -> Result<(), HostError>;
}
