//! 通用 UI 组件
//!
//! 对话框、输入框、二维码预览等通用组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::palette::{Palette, rgb};
use crate::render::QrSurface;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str, palette: &Palette) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(palette.alert).bg(palette.background));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 带有标题和样式的输入框
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    is_focused: bool,
    palette: &Palette,
) {
    let style = if is_focused {
        Style::default()
            .fg(palette.focus)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };

    // 聚焦时在末尾显示光标
    let content = if is_focused {
        format!("{value}▏")
    } else {
        value.to_string()
    };

    let input = Paragraph::new(content)
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}

/// [组件] 颜色输入框，标题旁附带色块
pub fn render_color_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    buffer: &str,
    committed: Color,
    is_focused: bool,
    palette: &Palette,
) {
    let style = if is_focused {
        Style::default()
            .fg(palette.focus)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };

    let mut spans = vec![
        Span::styled("██ ", Style::default().fg(committed)),
        Span::styled(format!("#{buffer}"), style),
    ];
    if is_focused {
        spans.push(Span::styled("▏", style));
    }

    let input = Paragraph::new(Line::from(spans))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}

/// 预览所需的终端尺寸（列, 行）：每个模块占一列、半行
pub fn preview_dimensions(surface: &QrSurface) -> (u16, u16) {
    let width = surface.width();
    (width as u16, width.div_ceil(2) as u16)
}

/// 将二维码转为半块字符行：字符前景色对应上方模块，背景色对应下方模块
pub fn qr_lines(surface: &QrSurface) -> Vec<Line<'static>> {
    let dark = rgb(surface.params().foreground);
    let light = rgb(surface.params().background);
    let width = surface.width();

    (0..width)
        .step_by(2)
        .map(|y| {
            let spans: Vec<Span> = (0..width)
                .map(|x| {
                    let top = if surface.is_dark(x, y) { dark } else { light };
                    let bottom = if surface.is_dark(x, y + 1) { dark } else { light };
                    Span::styled("▀", Style::default().fg(top).bg(bottom))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
