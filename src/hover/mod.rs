//! Hover highlighting: which buffer is hovered and what it is painted with.
//!
//! [`HoverHighlighter`] owns the single hover state of an editor session.
//! It is driven one [`HoverChanged`] at a time and talks to the editor only
//! through [`EditorHost`].

use crate::{
  color::{
    ColorSpec,
    Scheme,
    Tuning,
    derive_contrasting,
  },
  host::{
    BufferId,
    EditorHost,
  },
};

mod state;

pub use state::{
  HoverHighlighter,
  HoverPhase,
  HoverState,
  Outcome,
};

/// The file manager's hover/preview target changed. `None` means nothing
/// is hovered any more (cursor on a file with no buffer, or session closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverChanged(pub Option<BufferId>);

impl HoverChanged
{
  pub fn none() -> Self
  {
    Self(None)
  }

  pub fn buffer(buffer: BufferId) -> Self
  {
    Self(Some(buffer))
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Colours used for hover highlighting. `None` colours are derived from the
/// active colourscheme.
pub struct HoverConfig
{
  pub hovered_buffer:                   Option<ColorSpec>,
  pub hovered_buffer_in_same_directory: Option<ColorSpec>,
  pub highlight_same_directory:         bool,
  pub tuning:                           Tuning,
}

/// Colour painted on the hovered buffer.
pub fn resolve_hover_color<H>(
  config: &HoverConfig,
  host: &H,
) -> ColorSpec
where
  H: EditorHost + ?Sized,
{
  if let Some(c) = config.hovered_buffer
  {
    return c;
  }
  derive_contrasting(host.normal_background(), config.tuning).1
}

/// Colour painted on buffers sharing the hovered buffer's directory.
/// The derived default moves half as far as the hover colour.
pub fn resolve_same_directory_color<H>(
  config: &HoverConfig,
  host: &H,
) -> ColorSpec
where
  H: EditorHost + ?Sized,
{
  if let Some(c) = config.hovered_buffer_in_same_directory
  {
    return c;
  }
  let tuning = config.tuning.clamped();
  let half = Tuning { step: (tuning.step / 2.0).max(0.01), ..tuning };
  derive_contrasting(host.normal_background(), half).1
}

/// Dark/light classification of the host's current normal background.
pub fn host_scheme<H>(
  config: &HoverConfig,
  host: &H,
) -> Scheme
where
  H: EditorHost + ?Sized,
{
  derive_contrasting(host.normal_background(), config.tuning).0
}
