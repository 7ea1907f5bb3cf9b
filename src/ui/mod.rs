//! Rendering of the editor session: one block per window, painted with the
//! window's effective background, plus a status line.

use ratatui::{
  Frame,
  layout::{
    Constraint,
    Layout,
    Rect,
  },
  style::{
    Color,
    Modifier,
    Style,
  },
  text::Line,
  widgets::{
    Block,
    Borders,
    Paragraph,
  },
};
use unicode_width::UnicodeWidthChar;

use crate::{
  app::App,
  color::ColorSpec,
  host::EditorHost,
};

pub fn draw(
  f: &mut Frame,
  app: &App,
)
{
  let [body, status] =
    Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(f.area());

  let windows = app.host.windows();
  let hovered = app.highlighter.state().hovered();
  for (window, area) in windows.iter().zip(window_areas(body, windows.len()))
  {
    let bg = to_color(app.host.effective_background(window));
    let fg = to_color(app.host.colorscheme().normal_fg);
    let name = app.host.buffer_name(window.buffer).unwrap_or_else(|| "[No Name]".to_string());
    let mut title_style = Style::default().fg(fg);
    if hovered == Some(window.buffer)
    {
      title_style = title_style.add_modifier(Modifier::BOLD);
    }
    let title = truncate_to_width(&format!(" {name} "), area.width.saturating_sub(2) as usize);
    let block = Block::default()
      .borders(Borders::ALL)
      .title(Line::styled(title, title_style))
      .style(Style::default().bg(bg).fg(fg));
    let path = app
      .host
      .buffer_path(window.buffer)
      .map(|p| p.display().to_string())
      .unwrap_or_default();
    let body_text = truncate_to_width(&path, area.width.saturating_sub(2) as usize);
    f.render_widget(Paragraph::new(body_text).block(block), area);
  }

  f.render_widget(Paragraph::new(status_line(app)).style(Style::default().fg(Color::Gray)), status);
}

/// Areas of `count` windows stacked vertically inside `area`.
pub fn window_areas(
  area: Rect,
  count: usize,
) -> Vec<Rect>
{
  if count == 0
  {
    return Vec::new();
  }
  let constraints = (0..count).map(|_| Constraint::Ratio(1, count as u32));
  Layout::vertical(constraints).split(area).to_vec()
}

pub fn status_line(app: &App) -> String
{
  let cs = app.host.colorscheme();
  let hovered = app.hovered_name().unwrap_or_else(|| "-".to_string());
  let mut line = format!("{} ({}) | hovered: {}", cs.name, app.scheme(), hovered);
  if !app.events_attached()
  {
    line.push_str(" | keys");
  }
  if let Some(msg) = app.last_message()
  {
    line.push_str(" | ");
    line.push_str(msg);
  }
  line
}

fn to_color(c: Option<ColorSpec>) -> Color
{
  c.map(|c| c.color()).unwrap_or(Color::Reset)
}

fn truncate_to_width(
  s: &str,
  max_w: usize,
) -> String
{
  let mut out = String::new();
  let mut w = 0usize;
  for ch in s.chars()
  {
    let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
    if w + cw > max_w
    {
      break;
    }
    out.push(ch);
    w += cw;
  }
  out
}
