//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;
pub mod palette;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::state::{App, AppMode, Field};
use crate::models::{PreviewMode, parse_hex_color};
use components::{
    preview_dimensions, qr_lines, render_color_widget, render_dialog_framework,
    render_input_widget,
};
use layouts::{centered_fixed, centered_rect};
use palette::{Palette, rgb};

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.theme.theme());

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(3), // 文本输入
            Constraint::Length(3), // 尺寸与颜色
            Constraint::Min(5),    // 预览
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0], &palette);
    render_input_widget(
        frame,
        chunks[1],
        "输入文本或网址",
        &app.form.input_text,
        app.focus == Field::Text,
        &palette,
    );
    render_options(frame, app, chunks[2], &palette);
    render_preview(frame, app, chunks[3], &palette);
    render_help(frame, app, chunks[4], &palette);

    if let AppMode::Alert(message) = &app.mode {
        render_alert_dialog(frame, message, &palette);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let mode = if app.theme.theme().is_dark() {
        "深色"
    } else {
        "浅色"
    };
    let title = Paragraph::new(format!("▣ 二维码生成器  ·  {mode}"))
        .style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_options(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    render_input_widget(
        frame,
        chunks[0],
        "尺寸 (px, 50-1024)",
        &app.size_buffer,
        app.focus == Field::Size,
        palette,
    );

    let swatch = |value: &str| parse_hex_color(value).map(rgb).unwrap_or(palette.muted);
    render_color_widget(
        frame,
        chunks[1],
        "二维码颜色",
        &app.foreground_buffer,
        swatch(&app.form.foreground),
        app.focus == Field::Foreground,
        palette,
    );
    render_color_widget(
        frame,
        chunks[2],
        "背景颜色",
        &app.background_buffer,
        swatch(&app.form.background),
        app.focus == Field::Background,
        palette,
    );
}

fn render_preview(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::default()
        .title(format!("预览 {0}×{0}", app.form.size))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(surface) = app.surface.as_ref() else {
        let hint = match app.form.preview {
            PreviewMode::Live => "输入内容后即可预览二维码",
            PreviewMode::Manual => "输入内容后按 [Enter] 或 [Ctrl+G] 生成二维码",
        };
        frame.render_widget(
            Paragraph::new(hint)
                .style(Style::default().fg(palette.muted))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    };

    let (cols, rows) = preview_dimensions(surface);
    if cols > inner.width || rows > inner.height {
        let hint = format!("终端区域过小，预览需要 {cols}×{rows}，请放大窗口");
        frame.render_widget(
            Paragraph::new(hint)
                .style(Style::default().fg(palette.muted))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let target = centered_fixed(cols, rows, inner);
    frame.render_widget(Paragraph::new(qr_lines(surface)), target);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let mut help = vec!["[Tab] 切换字段", "[Ctrl+T] 切换主题"];
    if app.form.preview == PreviewMode::Manual {
        help.push("[Ctrl+G] 生成");
    }
    if app.can_export() {
        help.push("[Ctrl+S] 下载 PNG");
    }
    help.push("[Esc] 退出");
    let help_text = help.join("  ");

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(palette.muted))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_alert_dialog(frame: &mut Frame, message: &str, palette: &Palette) {
    let area = centered_rect(50, 20, frame.area());
    let inner = render_dialog_framework(frame, area, "提示", palette);

    let dialog = Paragraph::new(format!("{}\n\n[Enter] 确定", message))
        .style(Style::default().fg(palette.text))
        .wrap(Wrap { trim: true });

    frame.render_widget(dialog, inner);
}
