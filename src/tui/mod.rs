//! Terminal User Interface
//!
//! ratatui front end for the witch's night shift

pub mod app;
pub mod widgets;

pub use app::App;

use crate::data::Tier;
use crate::game::MessageKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the game
pub struct Theme {
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
    pub header: Color,
    pub money: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Magenta,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            border: Color::DarkGray,
            header: Color::LightMagenta,
            money: Color::LightYellow,
        }
    }
}

impl Theme {
    pub fn message_color(&self, kind: MessageKind) -> Color {
        match kind {
            MessageKind::Info => self.fg,
            MessageKind::Success => self.success,
            MessageKind::Warning => self.warning,
        }
    }
}

/// Get color for an item tier
pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Found => Color::Gray,
        Tier::Basic => Color::Green,
        Tier::Intermediate => Color::Cyan,
        Tier::Advanced => Color::LightMagenta,
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// ASCII art logo
pub const LOGO: &str = r#"
      _    _ _ _       _     _               _
     | |  | (_) |     | |   (_)             | |
     | |  | |_| |_ ___| |__  _ _ __   __ _  | |__   ___  _   _ _ __
     | |/\| | | __/ __| '_ \| | '_ \ / _` | | '_ \ / _ \| | | | '__|
     \  /\  / | || (__| | | | | | | | (_| | | | | | (_) | |_| | |
      \/  \/|_|\__\___|_| |_|_|_| |_|\__, | |_| |_|\___/ \__,_|_|
                                      __/ |
                                     |___/
"#;

/// Startup instructions, one line per panel
pub const INTRO_TEXT: &[&str] = &[
    "Townsfolk line up at your door with orders. Brew what they want before they lose patience.",
    "",
    "Customers   who is waiting, what they ordered, what they'll pay and how long they'll wait",
    "Time        how long until sunrise ends the night",
    "Money       everything you've earned so far",
    "Inventory   what you're carrying (9 slots)",
    "Location    where you are, where you can go, and what you can pick up",
    "",
    "Gather reagents, mix them at the Cauldron, deliver in Town.",
    "",
    "Press any key to begin...",
];

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════╗
║                   CONTROLS                    ║
╠═══════════════════════════════════════════════╣
║  ←/→/↑/↓  Move West/East/North/South          ║
║  h        Return to the Cauldron              ║
║  p        Pick up an item here                ║
║  t        Trash an item                       ║
║  m        Mix two items (at the Cauldron)     ║
║  d        Deliver an order (in Town)          ║
║  b        Read the recipe book                ║
║  ?        Toggle this help                    ║
║  q        Quit                                ║
╠═══════════════════════════════════════════════╣
║  In prompts: 0-8 select, 9 or Esc to undo     ║
║  In the book: 8 back to the contents          ║
╚═══════════════════════════════════════════════╝
"#;

/// Create the main layout
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(10),    // Main content
            Constraint::Length(3),  // Status bar
        ])
        .split(area)
        .to_vec()
}

/// Split the content area into the top (customers) and bottom (play) rows
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(60),
        ])
        .split(area)
        .to_vec()
}

/// Top row: customers + money
pub fn create_top_row_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(75),
            Constraint::Percentage(25),
        ])
        .split(area)
        .to_vec()
}

/// Bottom row: inventory + prompt + location
pub fn create_bottom_row_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(45),
            Constraint::Percentage(30),
        ])
        .split(area)
        .to_vec()
}

/// Center a `width` x `height` box inside `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
