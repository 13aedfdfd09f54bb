//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    NextField,
    PrevField,

    // 全局功能
    Generate,    // Ctrl+G，手动模式下生成
    Export,      // Ctrl+S
    ToggleTheme, // Ctrl+T

    // 字段编辑
    Input(char),   // 输入字符
    Paste(String), // 粘贴文本
    DeleteChar,    // Backspace
    Submit,        // Enter，提交当前字段
    Increment,     // Up，尺寸 +1
    Decrement,     // Down，尺寸 -1

    // 弹窗
    Dismiss, // Enter / Esc
}
