//! Input handling for keyboard events.

use crate::app::App;
use std::io;

use crossterm::event::{
  KeyCode,
  KeyEvent,
  KeyEventKind,
  KeyModifiers,
};

/// Accept a terminal key event and mutate the [`App`] accordingly.
///
/// Returns `Ok(true)` when the caller should exit.
pub fn handle_key(
  app: &mut App,
  key: KeyEvent,
) -> io::Result<bool>
{
  // presses only
  if key.kind != KeyEventKind::Press
  {
    return Ok(false);
  }
  if key.modifiers.contains(KeyModifiers::CONTROL)
  {
    return Ok(matches!(key.code, KeyCode::Char('c')));
  }

  match key.code
  {
    KeyCode::Char('q') => return Ok(true),
    KeyCode::Esc => app.clear_hover(),
    KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => app.move_hover(1),
    KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => app.move_hover(-1),
    KeyCode::Char('c') => app.cycle_colorscheme(),
    _ =>
    {}
  }
  Ok(false)
}
