use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::Result;
use crate::models::{
    DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_SIZE, PreviewMode, QrForm, clamp_size,
    parse_hex_color,
};

/// config.toml 的内容，所有字段均可省略
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub preview: PreviewMode,
    pub size: i64,
    pub foreground: String,
    pub background: String,
    pub export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preview: PreviewMode::Live,
            size: DEFAULT_SIZE as i64,
            foreground: DEFAULT_FOREGROUND.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            export_dir: None,
        }
    }
}

impl AppConfig {
    /// 从 TOML 文件加载配置，文件不存在或无法解析时使用默认值
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "配置不可用，使用默认值");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config.sanitized())
    }

    /// 非法颜色回退为默认值
    fn sanitized(mut self) -> Self {
        if parse_hex_color(&self.foreground).is_none() {
            warn!(value = %self.foreground, "前景色无效，使用默认值");
            self.foreground = DEFAULT_FOREGROUND.to_string();
        }
        if parse_hex_color(&self.background).is_none() {
            warn!(value = %self.background, "背景色无效，使用默认值");
            self.background = DEFAULT_BACKGROUND.to_string();
        }
        self
    }

    /// 按配置构造初始表单
    pub fn initial_form(&self) -> QrForm {
        let mut form = QrForm::new(self.preview);
        form.size = clamp_size(self.size);
        form.set_foreground_color(self.foreground.clone());
        form.set_background_color(self.background.clone());
        form
    }

    /// 导出目录：配置项 > 下载目录 > 当前目录
    pub fn resolve_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
