use ratatui::style::Color;

// xterm's stock values for the 16 ANSI slots.
const ANSI: [(u8, u8, u8); 16] = [
  (0, 0, 0),
  (205, 0, 0),
  (0, 205, 0),
  (205, 205, 0),
  (0, 0, 238),
  (205, 0, 205),
  (0, 205, 205),
  (229, 229, 229),
  (127, 127, 127),
  (255, 0, 0),
  (0, 255, 0),
  (255, 255, 0),
  (92, 92, 255),
  (255, 0, 255),
  (0, 255, 255),
  (255, 255, 255),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// RGB value of an xterm 256-colour palette slot.
pub fn indexed_rgb(idx: u8) -> (u8, u8, u8)
{
  match idx
  {
    0..=15 => ANSI[idx as usize],
    16..=231 =>
    {
      let i = idx - 16;
      (
        CUBE_LEVELS[(i / 36) as usize],
        CUBE_LEVELS[((i / 6) % 6) as usize],
        CUBE_LEVELS[(i % 6) as usize],
      )
    }
    _ =>
    {
      let v = 8 + 10 * (idx - 232);
      (v, v, v)
    }
  }
}

/// Resolve any terminal colour to RGB. `Reset` has no fixed value.
pub fn to_rgb(color: Color) -> Option<(u8, u8, u8)>
{
  let slot = match color
  {
    Color::Reset => return None,
    Color::Rgb(r, g, b) => return Some((r, g, b)),
    Color::Indexed(i) => i,
    Color::Black => 0,
    Color::Red => 1,
    Color::Green => 2,
    Color::Yellow => 3,
    Color::Blue => 4,
    Color::Magenta => 5,
    Color::Cyan => 6,
    Color::Gray => 7,
    Color::DarkGray => 8,
    Color::LightRed => 9,
    Color::LightGreen => 10,
    Color::LightYellow => 11,
    Color::LightBlue => 12,
    Color::LightMagenta => 13,
    Color::LightCyan => 14,
    Color::White => 15,
  };
  Some(indexed_rgb(slot))
}
