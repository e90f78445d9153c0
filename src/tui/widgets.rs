//! Custom widgets for the game UI

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A draining bar for the time left before sunrise
pub struct CountdownBar {
    /// Share left, `0.0..=1.0`
    fraction: f64,
    label: String,
    color: Color,
    warning_threshold: f64,
    danger_threshold: f64,
}

impl CountdownBar {
    pub fn new(label: &str, fraction: f64) -> Self {
        Self {
            fraction: fraction.clamp(0.0, 1.0),
            label: label.to_string(),
            color: Color::Green,
            warning_threshold: 0.5,
            danger_threshold: 0.2,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    fn current_color(&self) -> Color {
        if self.fraction <= self.danger_threshold {
            Color::Red
        } else if self.fraction <= self.warning_threshold {
            Color::Yellow
        } else {
            self.color
        }
    }
}

impl Widget for CountdownBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let color = self.current_color();
        buf.set_string(area.x, area.y, &self.label, Style::default().fg(color));

        if area.height > 1 {
            let inner = area.width - 2;
            let filled = ((self.fraction * f64::from(inner)).round() as u16).min(inner);
            let bar_y = area.y + 1;
            buf.set_string(area.x, bar_y, "[", Style::default());
            buf.set_string(area.x + area.width - 1, bar_y, "]", Style::default());

            for x in 0..filled {
                buf.set_string(area.x + 1 + x, bar_y, "█", Style::default().fg(color));
            }
            for x in filled..inner {
                buf.set_string(area.x + 1 + x, bar_y, "░", Style::default().fg(Color::DarkGray));
            }
        }
    }
}

/// ASCII art box for the end of the night
pub struct DramaticBox {
    title: String,
    content: Vec<String>,
    border_color: Color,
}

impl DramaticBox {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Vec::new(),
            border_color: Color::Magenta,
        }
    }

    pub fn content(mut self, lines: Vec<String>) -> Self {
        self.content = lines;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }
}

impl Widget for DramaticBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title_width = self.title.chars().count() as u16 + 2;
        if area.width < title_width + 2 || area.height < 2 {
            return;
        }
        let style = Style::default().fg(self.border_color);
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        buf.set_string(area.x, area.y, "╔", style);
        buf.set_string(area.x, bottom, "╚", style);
        for x in area.x + 1..right {
            buf.set_string(x, area.y, "═", style);
            buf.set_string(x, bottom, "═", style);
        }
        buf.set_string(right, area.y, "╗", style);
        buf.set_string(right, bottom, "╝", style);

        let title_start = (area.width - title_width) / 2;
        buf.set_string(area.x + title_start, area.y, format!(" {} ", self.title), style);

        for y in area.y + 1..bottom {
            buf.set_string(area.x, y, "║", style);
            buf.set_string(right, y, "║", style);
        }

        for (i, line) in self.content.iter().enumerate() {
            let y = area.y + 1 + i as u16;
            if y >= bottom {
                break;
            }
            buf.set_stringn(
                area.x + 2,
                y,
                line,
                usize::from(area.width.saturating_sub(4)),
                Style::default().fg(Color::White),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_bar_colors() {
        assert_eq!(CountdownBar::new("t", 0.9).current_color(), Color::Green);
        assert_eq!(CountdownBar::new("t", 0.4).current_color(), Color::Yellow);
        assert_eq!(CountdownBar::new("t", 0.1).current_color(), Color::Red);
        assert_eq!(CountdownBar::new("t", -3.0).current_color(), Color::Red);
    }

    #[test]
    fn test_countdown_bar_fill() {
        let area = Rect::new(0, 0, 12, 2);
        let mut buf = Buffer::empty(area);
        CountdownBar::new("Sunrise", 0.5).render(area, &mut buf);
        let bar: String = (0..12).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(bar, "[█████░░░░░]");
    }

    #[test]
    fn test_dramatic_box_clips_content() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        DramaticBox::new("END")
            .content(vec!["one".into(), "two".into(), "three".into()])
            .render(area, &mut buf);
        assert_eq!(buf[(2, 1)].symbol(), "o");
        assert_eq!(buf[(2, 2)].symbol(), "t");
        assert_eq!(buf[(0, 3)].symbol(), "╚");
    }
}
