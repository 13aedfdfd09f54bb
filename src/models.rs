use serde::Deserialize;

/// 尺寸下限（像素）
pub const MIN_SIZE: u32 = 50;
/// 尺寸上限（像素）
pub const MAX_SIZE: u32 = 1024;
pub const DEFAULT_SIZE: u32 = 256;
pub const DEFAULT_FOREGROUND: &str = "#000000";
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

/// 主题偏好
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// 持久化时使用的字符串
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// 只有 "dark" 被识别为深色，其余一律浅色
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// 预览模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    /// 输入即预览
    #[default]
    Live,
    /// 仅在显式生成时更新
    Manual,
}

/// 表单状态
#[derive(Debug, Clone)]
pub struct QrForm {
    pub input_text: String,
    pub qr_value: String,
    pub size: u32,
    pub foreground: String,
    pub background: String,
    pub preview: PreviewMode,
}

impl QrForm {
    pub fn new(preview: PreviewMode) -> Self {
        Self {
            input_text: String::new(),
            qr_value: String::new(),
            size: DEFAULT_SIZE,
            foreground: DEFAULT_FOREGROUND.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            preview,
        }
    }

    /// 替换输入文本，实时模式下同步二维码内容
    pub fn set_input_text(&mut self, text: String) {
        self.input_text = text;
        if self.preview == PreviewMode::Live {
            self.sync_qr_value();
        }
    }

    /// 派生规则：输入非空，或二维码内容已非空时，才跟随输入
    ///
    /// 第二个条件保证清空输入后二维码内容也能归空；再次执行结果不变。
    pub fn sync_qr_value(&mut self) {
        if !self.input_text.is_empty() || !self.qr_value.is_empty() {
            self.qr_value = self.input_text.clone();
        }
    }

    /// 手动模式下的"生成"操作
    pub fn generate(&mut self) {
        self.qr_value = self.input_text.clone();
    }

    /// 解析原始尺寸输入并限制在 [MIN_SIZE, MAX_SIZE]
    pub fn set_size(&mut self, raw: &str) {
        self.size = match parse_leading_int(raw) {
            Some(n) => clamp_size(n),
            None => MIN_SIZE,
        };
    }

    pub fn set_foreground_color(&mut self, color: String) {
        self.foreground = color;
    }

    pub fn set_background_color(&mut self, color: String) {
        self.background = color;
    }

    pub fn has_value(&self) -> bool {
        !self.qr_value.is_empty()
    }
}

impl Default for QrForm {
    fn default() -> Self {
        Self::new(PreviewMode::default())
    }
}

pub fn clamp_size(n: i64) -> u32 {
    n.clamp(MIN_SIZE as i64, MAX_SIZE as i64) as u32
}

/// 按 parseInt 的方式解析：忽略首尾空白，可选符号，取前导十进制数字
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // 超出 i64 的数字一律视为饱和值，之后仍会被限幅
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// 解析 `#RRGGBB` 颜色
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
