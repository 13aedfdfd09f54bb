//! 主题配色
//!
//! 主题只通过这里影响界面外观

use ratatui::style::Color;

use crate::models::Theme;

/// 界面配色
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub focus: Color,
    pub alert: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::Rgb(243, 244, 246),
                text: Color::Rgb(31, 41, 55),
                muted: Color::Rgb(107, 114, 128),
                accent: Color::Rgb(22, 163, 74),
                focus: Color::Rgb(37, 99, 235),
                alert: Color::Rgb(220, 38, 38),
            },
            Theme::Dark => Self {
                background: Color::Rgb(17, 24, 39),
                text: Color::Rgb(229, 231, 235),
                muted: Color::Rgb(156, 163, 175),
                accent: Color::Rgb(74, 222, 128),
                focus: Color::Rgb(96, 165, 250),
                alert: Color::Rgb(248, 113, 113),
            },
        }
    }
}

pub fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}
