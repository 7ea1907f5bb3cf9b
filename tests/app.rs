use std::{
  io::Cursor,
  path::PathBuf,
};

use crossterm::event::{
  KeyCode,
  KeyEvent,
  KeyEventKind,
  KeyModifiers,
};
use hovertint::{
  app::App,
  color::Scheme,
  config::{
    ColorschemeSetting,
    Config,
  },
  events::spawn_reader,
  host::{
    BufferId,
    EditorHost,
  },
  hover::{
    HoverPhase,
    resolve_hover_color,
  },
  input::handle_key,
  ui,
};
use ratatui::{
  Terminal,
  backend::TestBackend,
  layout::Rect,
  style::Color,
};

fn make_app(scheme: &str) -> App
{
  let cfg = Config {
    colorscheme: Some(ColorschemeSetting::Named(scheme.to_string())),
    ..Config::default()
  };
  let files = [PathBuf::from("/tmp/project/a.txt"), PathBuf::from("/tmp/other/b.txt")];
  App::new(&cfg, &files)
}

fn press(
  app: &mut App,
  code: KeyCode,
) -> bool
{
  handle_key(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
}

#[test]
fn keys_move_and_clear_the_hover()
{
  let mut app = make_app("night");
  let (a, b) = (BufferId(1), BufferId(2));
  assert!(!press(&mut app, KeyCode::Char('j')));
  assert_eq!(app.highlighter.phase(), HoverPhase::Hovering(a));
  press(&mut app, KeyCode::Tab);
  assert_eq!(app.highlighter.phase(), HoverPhase::Hovering(b));
  press(&mut app, KeyCode::Down);
  assert_eq!(app.highlighter.phase(), HoverPhase::Hovering(a));
  press(&mut app, KeyCode::Char('k'));
  assert_eq!(app.highlighter.phase(), HoverPhase::Hovering(b));
  assert_eq!(app.hovered_name().as_deref(), Some("b.txt"));

  press(&mut app, KeyCode::Esc);
  assert_eq!(app.highlighter.phase(), HoverPhase::Idle);
  assert_eq!(app.host.window_background(a), Ok(None));
  assert_eq!(app.host.window_background(b), Ok(None));
}

#[test]
fn quit_keys_and_releases()
{
  let mut app = make_app("night");
  assert!(press(&mut app, KeyCode::Char('q')));
  assert!(handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap());

  let mut release = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
  release.kind = KeyEventKind::Release;
  assert!(!handle_key(&mut app, release).unwrap());
  assert_eq!(app.highlighter.phase(), HoverPhase::Idle);
}

#[test]
fn cycling_colorscheme_repaints_hover()
{
  let mut app = make_app("night");
  press(&mut app, KeyCode::Char('j'));
  assert_eq!(app.scheme(), Scheme::Dark);

  // night -> storm -> moon -> day
  for _ in 0..3
  {
    press(&mut app, KeyCode::Char('c'));
  }
  assert_eq!(app.host.colorscheme().name, "day");
  assert_eq!(app.scheme(), Scheme::Light);
  let hover = resolve_hover_color(app.highlighter.config(), &app.host);
  assert_eq!(app.host.window_background(BufferId(1)), Ok(Some(hover)));

  press(&mut app, KeyCode::Char('c'));
  assert_eq!(app.host.colorscheme().name, "night");
}

#[test]
fn closing_a_hovered_buffer_forgets_it()
{
  let mut app = make_app("night");
  press(&mut app, KeyCode::Char('j'));
  assert!(app.close_buffer(BufferId(1)));
  assert_eq!(app.highlighter.phase(), HoverPhase::Idle);
  assert!(!app.close_buffer(BufferId(1)));
  press(&mut app, KeyCode::Char('j'));
  assert_eq!(app.highlighter.phase(), HoverPhase::Hovering(BufferId(2)));
}

#[test]
fn pump_events_drives_the_session_until_close()
{
  let mut app = make_app("night");
  let input = "hover,0,1,{\"url\":\"/tmp/project/a.txt\"}\nhover,0,2,{\"url\":\"/tmp/other/b.txt\"}\n";
  let (rx, handle) = spawn_reader(Cursor::new(input.as_bytes().to_vec())).unwrap();
  handle.join().unwrap();
  app.attach_events(rx);
  assert!(app.events_attached());

  assert_eq!(app.pump_events(), 3);
  assert!(!app.events_attached());
  assert_eq!(app.last_message(), Some("file manager closed"));
  assert_eq!(app.highlighter.phase(), HoverPhase::Idle);
  assert_eq!(app.pump_events(), 0);
}

#[test]
fn messages_are_capped()
{
  let mut app = make_app("night");
  for i in 0..150
  {
    app.add_message(&format!("msg {i}"));
  }
  app.add_message("   ");
  assert_eq!(app.messages().len(), 100);
  assert_eq!(app.last_message(), Some("msg 149"));
}

fn draw(app: &App) -> Terminal<TestBackend>
{
  let mut terminal = Terminal::new(TestBackend::new(40, 13)).unwrap();
  terminal.draw(|f| ui::draw(f, app)).unwrap();
  terminal
}

fn window_bg(
  terminal: &Terminal<TestBackend>,
  area: Rect,
) -> Color
{
  terminal.backend().buffer()[(area.x + 1, area.y + 1)].bg
}

#[test]
fn render_paints_only_the_hovered_window()
{
  let mut app = make_app("night");
  let areas = ui::window_areas(Rect::new(0, 0, 40, 12), 2);
  assert_eq!(areas.len(), 2);
  let night = Color::Rgb(0x1a, 0x1b, 0x26);

  let terminal = draw(&app);
  assert_eq!(window_bg(&terminal, areas[0]), night);
  assert_eq!(window_bg(&terminal, areas[1]), night);

  app.hover(Some(BufferId(2)));
  let hover = resolve_hover_color(app.highlighter.config(), &app.host);
  let terminal = draw(&app);
  assert_eq!(window_bg(&terminal, areas[0]), night);
  assert_eq!(window_bg(&terminal, areas[1]), hover.color());

  app.clear_hover();
  let terminal = draw(&app);
  assert_eq!(window_bg(&terminal, areas[1]), night);
}

#[test]
fn status_line_reports_scheme_and_hover()
{
  let mut app = make_app("day");
  assert!(ui::status_line(&app).starts_with("day (light) | hovered: -"));
  app.hover(Some(BufferId(1)));
  assert!(ui::status_line(&app).contains("hovered: a.txt"));
}
