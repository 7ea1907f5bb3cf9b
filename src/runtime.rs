use std::{
  error::Error,
  io::{
    self,
    Stdout,
  },
  time::Duration,
};

use crossterm::{
  event::{
    self,
    Event,
  },
  execute,
  terminal::{
    EnterAlternateScreen,
    LeaveAlternateScreen,
    disable_raw_mode,
    enable_raw_mode,
  },
};
use ratatui::{
  Terminal,
  backend::CrosstermBackend,
};

use crate::app::App;

type Term = Terminal<CrosstermBackend<Stdout>>;

// Upper bound on how long a queued file-manager event waits.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the terminal front end until the user quits. The hover is cleared
/// before returning, whether the loop ended normally or with an error.
pub fn run_app(app: &mut App) -> Result<(), Box<dyn Error>>
{
  let mut terminal = enter_terminal()?;
  let res = event_loop(&mut terminal, app);
  app.clear_hover();
  leave_terminal(&mut terminal)?;
  res
}

fn enter_terminal() -> io::Result<Term>
{
  enable_raw_mode()?;
  let mut stdout = io::stdout();
  if let Err(e) = execute!(stdout, EnterAlternateScreen)
  {
    let _ = disable_raw_mode();
    return Err(e);
  }
  let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
  terminal.clear()?;
  Ok(terminal)
}

fn leave_terminal(terminal: &mut Term) -> io::Result<()>
{
  disable_raw_mode()?;
  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
  terminal.show_cursor()
}

fn event_loop(
  terminal: &mut Term,
  app: &mut App,
) -> Result<(), Box<dyn Error>>
{
  let mut dirty = true;
  loop
  {
    if app.pump_events() > 0
    {
      dirty = true;
    }
    if app.force_full_redraw
    {
      terminal.clear()?;
      app.force_full_redraw = false;
      dirty = true;
    }
    if dirty
    {
      terminal.draw(|f| crate::ui::draw(f, app))?;
      dirty = false;
    }

    if !event::poll(POLL_INTERVAL)?
    {
      continue;
    }
    match event::read()?
    {
      Event::Key(key) =>
      {
        if crate::input::handle_key(app, key)?
        {
          return Ok(());
        }
        dirty = true;
      }
      Event::Resize(..) => dirty = true,
      _ =>
      {}
    }
  }
}
