//! PNG 导出

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::info;

use crate::error::Result;
use crate::render::QrSurface;

/// 导出文件名（固定）
pub const EXPORT_FILE_NAME: &str = "qr-code.png";

/// 导出结果
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    /// 没有可导出的内容，需要提示用户
    NothingToExport,
}

/// 将表面编码为 PNG 字节
pub fn encode_png(surface: &QrSurface) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    surface
        .image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// 导出当前二维码到 `dir/qr-code.png`
pub fn export_png(qr_value: &str, surface: Option<&QrSurface>, dir: &Path) -> Result<ExportOutcome> {
    let surface = match surface {
        Some(surface) if !qr_value.is_empty() => surface,
        _ => return Ok(ExportOutcome::NothingToExport),
    };

    let bytes = encode_png(surface)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, bytes)?;

    info!(path = %path.display(), size = surface.params().size, "二维码已导出");
    Ok(ExportOutcome::Saved(path))
}
