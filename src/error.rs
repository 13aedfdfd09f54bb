//! 错误类型定义

use std::io;

use thiserror::Error;

/// 二维码生成与导出过程中的错误
#[derive(Debug, Error)]
pub enum QrError {
    #[error("二维码编码失败: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("无效的颜色值: {0}")]
    InvalidColor(String),

    #[error("图像编码失败: {0}")]
    Image(#[from] image::ImageError),

    #[error("文件读写失败: {0}")]
    Io(#[from] io::Error),

    #[error("配置文件解析失败: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, QrError>;
