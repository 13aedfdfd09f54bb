//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use std::path::PathBuf;

use tracing::warn;

use crate::models::QrForm;
use crate::render::{QrSurface, RenderParams};
use crate::storage::ThemeStore;

/// 应用状态
pub struct App {
    pub form: QrForm,
    pub theme: ThemeStore,
    pub surface: Option<QrSurface>,
    rendered_value: Option<String>, // surface 对应的内容
    pub mode: AppMode,
    pub focus: Field,
    pub size_buffer: String,
    pub foreground_buffer: String, // 不含 '#' 的十六进制数字
    pub background_buffer: String,
    pub message: Option<String>,
    pub export_dir: PathBuf,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Alert(String),
}

/// 表单字段（按焦点顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Text,
    Size,
    Foreground,
    Background,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Text => Field::Size,
            Field::Size => Field::Foreground,
            Field::Foreground => Field::Background,
            Field::Background => Field::Text,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Text => Field::Background,
            Field::Size => Field::Text,
            Field::Foreground => Field::Size,
            Field::Background => Field::Foreground,
        }
    }
}

impl App {
    /// 创建新的应用实例
    pub fn new(form: QrForm, theme: ThemeStore, export_dir: PathBuf) -> Self {
        let mut app = Self {
            size_buffer: form.size.to_string(),
            foreground_buffer: hex_digits(&form.foreground),
            background_buffer: hex_digits(&form.background),
            form,
            theme,
            surface: None,
            rendered_value: None,
            mode: AppMode::Normal,
            focus: Field::Text,
            message: None,
            export_dir,
        };
        app.refresh_surface();
        app
    }

    /// 按当前表单重新渲染二维码表面
    ///
    /// 每次 dispatch 之后调用，保证绘制时表面与表单一致。
    pub fn refresh_surface(&mut self) {
        if !self.form.has_value() {
            self.surface = None;
            self.rendered_value = None;
            return;
        }

        let params = match RenderParams::from_form(&self.form) {
            Ok(params) => params,
            Err(e) => {
                warn!(error = %e, "渲染参数无效");
                self.surface = None;
                self.rendered_value = None;
                self.message = Some(e.to_string());
                return;
            }
        };

        // 参数与内容都未变化时复用旧表面
        if self.surface.as_ref().is_some_and(|s| s.params() == &params)
            && self.rendered_value.as_deref() == Some(self.form.qr_value.as_str())
        {
            return;
        }

        match QrSurface::render(&self.form.qr_value, &params) {
            Ok(surface) => {
                self.surface = surface;
                self.rendered_value = Some(self.form.qr_value.clone());
            }
            Err(e) => {
                warn!(error = %e, len = self.form.qr_value.len(), "二维码渲染失败");
                self.surface = None;
                self.rendered_value = None;
                self.message = Some(e.to_string());
            }
        }
    }

    /// 是否显示导出入口
    pub fn can_export(&self) -> bool {
        self.form.has_value() && self.surface.is_some()
    }
}

/// `#RRGGBB` 去掉 '#' 后作为编辑缓冲区
pub(super) fn hex_digits(color: &str) -> String {
    color.trim_start_matches('#').to_string()
}
