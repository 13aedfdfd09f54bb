//! 二维码渲染
//!
//! 编码交给 `qrcode`（纠错等级固定为 H，始终保留静区），
//! 像素表面由 `image` 生成，供终端预览和 PNG 导出共用。

use image::{Rgb, RgbImage};
use qrcode::{EcLevel, QrCode};

use crate::error::{QrError, Result};
use crate::models::{QrForm, parse_hex_color};

/// 静区宽度（模块数）
pub const QUIET_ZONE: usize = 4;

/// 渲染参数
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub size: u32,
    pub foreground: [u8; 3],
    pub background: [u8; 3],
}

impl RenderParams {
    /// 从表单中取出渲染参数，颜色非法时报错
    pub fn from_form(form: &QrForm) -> Result<Self> {
        let color = |value: &str| {
            parse_hex_color(value).ok_or_else(|| QrError::InvalidColor(value.to_string()))
        };
        Ok(Self {
            size: form.size,
            foreground: color(&form.foreground)?,
            background: color(&form.background)?,
        })
    }
}

/// 渲染结果：模块矩阵（含静区）和像素图
#[derive(Debug, Clone)]
pub struct QrSurface {
    modules: Vec<bool>,
    width: usize,
    params: RenderParams,
    image: RgbImage,
}

impl QrSurface {
    /// 渲染二维码；空字符串表示不渲染
    pub fn render(value: &str, params: &RenderParams) -> Result<Option<Self>> {
        if value.is_empty() {
            return Ok(None);
        }

        let code = QrCode::with_error_correction_level(value.as_bytes(), EcLevel::H)?;
        let inner = code.width();
        let width = inner + QUIET_ZONE * 2;

        let mut modules = vec![false; width * width];
        for (i, color) in code.to_colors().into_iter().enumerate() {
            let (x, y) = (i % inner, i / inner);
            modules[(y + QUIET_ZONE) * width + x + QUIET_ZONE] = color == qrcode::Color::Dark;
        }

        let image = rasterize(&modules, width, params);
        Ok(Some(Self {
            modules,
            width,
            params: params.clone(),
            image,
        }))
    }

    /// 边长（模块数，含静区）
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x]
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}

/// 最近邻采样到 size × size 像素
fn rasterize(modules: &[bool], width: usize, params: &RenderParams) -> RgbImage {
    let size = params.size as usize;
    let fg = Rgb(params.foreground);
    let bg = Rgb(params.background);

    RgbImage::from_fn(params.size, params.size, |x, y| {
        let mx = x as usize * width / size;
        let my = y as usize * width / size;
        if modules[my * width + mx] { fg } else { bg }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(size: u32) -> RenderParams {
        RenderParams {
            size,
            foreground: [0, 0, 0],
            background: [255, 255, 255],
        }
    }

    #[test]
    fn test_empty_value_renders_nothing() {
        assert!(QrSurface::render("", &params(256)).unwrap().is_none());
    }

    #[test]
    fn test_image_matches_requested_size() {
        for size in [50, 256, 1024] {
            let surface = QrSurface::render("https://example.com", &params(size))
                .unwrap()
                .unwrap();
            assert_eq!(surface.image().dimensions(), (size, size));
        }
    }

    #[test]
    fn test_quiet_zone_is_background() {
        let p = RenderParams {
            size: 256,
            foreground: [0x12, 0x34, 0x56],
            background: [0xfe, 0xdc, 0xba],
        };
        let surface = QrSurface::render("hello", &p).unwrap().unwrap();

        for i in 0..surface.width() {
            assert!(!surface.is_dark(i, 0));
            assert!(!surface.is_dark(0, i));
        }
        assert_eq!(surface.image().get_pixel(0, 0).0, [0xfe, 0xdc, 0xba]);
        assert_eq!(surface.image().get_pixel(255, 255).0, [0xfe, 0xdc, 0xba]);
    }

    #[test]
    fn test_finder_pattern_uses_foreground() {
        let p = RenderParams {
            size: 290,
            foreground: [200, 0, 0],
            background: [255, 255, 255],
        };
        let surface = QrSurface::render("hello", &p).unwrap().unwrap();

        // 定位图案左上角紧挨静区
        assert!(surface.is_dark(QUIET_ZONE, QUIET_ZONE));
        let module_px = 290 / surface.width() as u32;
        let corner = QUIET_ZONE as u32 * module_px + module_px / 2;
        assert_eq!(surface.image().get_pixel(corner, corner).0, [200, 0, 0]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = QrSurface::render("https://example.com", &params(256))
            .unwrap()
            .unwrap();
        let b = QrSurface::render("https://example.com", &params(256))
            .unwrap()
            .unwrap();
        assert_eq!(a.width(), b.width());
        assert_eq!(a.image().as_raw(), b.image().as_raw());
    }

    #[test]
    fn test_data_too_long_is_error() {
        let value = "x".repeat(4000);
        assert!(matches!(
            QrSurface::render(&value, &params(256)),
            Err(QrError::Encode(_))
        ));
    }

    #[test]
    fn test_params_reject_bad_color() {
        let mut form = QrForm::default();
        form.set_foreground_color("#zzzzzz".to_string());
        assert!(matches!(
            RenderParams::from_form(&form),
            Err(QrError::InvalidColor(_))
        ));
    }
}
