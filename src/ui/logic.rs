//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use tracing::{debug, error};

use super::actions::Action;
use super::state::{App, AppMode, Field, hex_digits};
use crate::export::{ExportOutcome, export_png};
use crate::models::{PreviewMode, clamp_size};

/// 导出时没有内容的提示
pub const EMPTY_EXPORT_ALERT: &str = "请先输入文本或网址，再下载二维码";

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        debug!(?action, focus = ?self.focus, "dispatch");

        match action {
            Action::Quit => return true,
            Action::NextField => self.move_focus(self.focus.next()),
            Action::PrevField => self.move_focus(self.focus.prev()),

            Action::Generate => self.generate(),
            Action::Export => self.export(),
            Action::ToggleTheme => self.toggle_theme(),

            Action::Input(c) => self.input_char(c),
            Action::Paste(text) => self.paste(&text),
            Action::DeleteChar => self.delete_char(),
            Action::Submit => self.commit_field(self.focus),
            Action::Increment => self.step_size(1),
            Action::Decrement => self.step_size(-1),

            Action::Dismiss => self.mode = AppMode::Normal,
        }

        self.refresh_surface();
        false
    }

    // ============ 焦点相关 ============

    /// 离开字段时提交其缓冲区
    pub fn move_focus(&mut self, next: Field) {
        self.commit_buffer();
        self.focus = next;
    }

    /// 提交尺寸或颜色字段的缓冲区
    fn commit_buffer(&mut self) {
        if self.focus != Field::Text {
            self.commit_field(self.focus);
        }
    }

    // ============ 编辑相关 ============

    fn input_char(&mut self, c: char) {
        self.message = None;
        match self.focus {
            Field::Text => {
                let mut text = self.form.input_text.clone();
                text.push(c);
                self.form.set_input_text(text);
            }
            Field::Size => self.size_buffer.push(c),
            Field::Foreground => push_hex(&mut self.foreground_buffer, c),
            Field::Background => push_hex(&mut self.background_buffer, c),
        }
    }

    fn paste(&mut self, text: &str) {
        if self.focus != Field::Text {
            return;
        }
        self.message = None;
        // 单行输入框，换行被丢弃
        let pasted: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        let mut input = self.form.input_text.clone();
        input.push_str(&pasted);
        self.form.set_input_text(input);
    }

    fn delete_char(&mut self) {
        self.message = None;
        match self.focus {
            Field::Text => {
                let mut text = self.form.input_text.clone();
                text.pop();
                self.form.set_input_text(text);
            }
            Field::Size => {
                self.size_buffer.pop();
            }
            Field::Foreground => {
                self.foreground_buffer.pop();
            }
            Field::Background => {
                self.background_buffer.pop();
            }
        }
    }

    /// 提交字段缓冲区；文本字段没有缓冲区，Enter 在手动模式下等同生成
    pub fn commit_field(&mut self, field: Field) {
        match field {
            Field::Text => {
                if self.form.preview == PreviewMode::Manual {
                    self.form.generate();
                }
            }
            Field::Size => {
                self.form.set_size(&self.size_buffer);
                self.size_buffer = self.form.size.to_string();
            }
            Field::Foreground => {
                if self.foreground_buffer.len() == 6 {
                    self.form
                        .set_foreground_color(format!("#{}", self.foreground_buffer));
                } else {
                    self.foreground_buffer = hex_digits(&self.form.foreground);
                }
            }
            Field::Background => {
                if self.background_buffer.len() == 6 {
                    self.form
                        .set_background_color(format!("#{}", self.background_buffer));
                } else {
                    self.background_buffer = hex_digits(&self.form.background);
                }
            }
        }
    }

    fn step_size(&mut self, delta: i64) {
        self.form.size = clamp_size(self.form.size as i64 + delta);
        self.size_buffer = self.form.size.to_string();
    }

    // ============ 全局功能 ============

    pub fn generate(&mut self) {
        self.commit_buffer();
        self.form.generate();
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.theme.toggle();
        self.message = Some(if theme.is_dark() {
            "已切换到深色模式".to_string()
        } else {
            "已切换到浅色模式".to_string()
        });
    }

    /// 导出 PNG；没有内容时弹出提示
    pub fn export(&mut self) {
        self.commit_buffer();
        self.refresh_surface();

        match export_png(&self.form.qr_value, self.surface.as_ref(), &self.export_dir) {
            Ok(ExportOutcome::Saved(path)) => {
                self.message = Some(format!("已保存到 {}", path.display()));
            }
            Ok(ExportOutcome::NothingToExport) => {
                self.mode = AppMode::Alert(EMPTY_EXPORT_ALERT.to_string());
            }
            Err(e) => {
                error!(error = %e, "导出失败");
                self.mode = AppMode::Alert(format!("导出失败: {e}"));
            }
        }
    }
}

fn push_hex(buffer: &mut String, c: char) {
    if buffer.len() < 6 && c.is_ascii_hexdigit() {
        buffer.push(c);
    }
}
