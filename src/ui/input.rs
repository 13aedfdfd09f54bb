//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::actions::Action;
use super::state::{App, AppMode, Field};

/// 根据当前模式、焦点字段和按键获取对应的 Action
pub fn get_action(mode: &AppMode, focus: Field, key: KeyEvent) -> Option<Action> {
    if let AppMode::Alert(_) = mode {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => Some(Action::Dismiss),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('s') => Some(Action::Export),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Char('g') => Some(Action::Generate),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab => Some(Action::NextField),
        KeyCode::BackTab => Some(Action::PrevField),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::DeleteChar),
        KeyCode::Up if focus == Field::Size => Some(Action::Increment),
        KeyCode::Down if focus == Field::Size => Some(Action::Decrement),
        KeyCode::Char(c) => match focus {
            Field::Text => Some(Action::Input(c)),
            Field::Size if c.is_ascii_digit() || c == '-' => Some(Action::Input(c)),
            Field::Foreground | Field::Background if c.is_ascii_hexdigit() => {
                Some(Action::Input(c))
            }
            _ => None,
        },
        _ => None,
    }
}

/// 处理终端事件，返回 true 表示退出
pub fn handle_event(app: &mut App, event: Event) -> bool {
    let action = match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => get_action(&app.mode, app.focus, key),
        Event::Paste(text) if app.mode == AppMode::Normal && app.focus == Field::Text => {
            Some(Action::Paste(text))
        }
        _ => None,
    };

    match action {
        Some(action) => app.dispatch(action),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_text_field_accepts_any_char() {
        for c in ['a', 'q', ' ', '/', '中'] {
            assert_eq!(
                get_action(&AppMode::Normal, Field::Text, key(KeyCode::Char(c))),
                Some(Action::Input(c))
            );
        }
    }

    #[test]
    fn test_global_shortcuts_in_every_field() {
        for field in [Field::Text, Field::Size, Field::Foreground, Field::Background] {
            assert_eq!(
                get_action(&AppMode::Normal, field, ctrl('t')),
                Some(Action::ToggleTheme)
            );
            assert_eq!(
                get_action(&AppMode::Normal, field, ctrl('s')),
                Some(Action::Export)
            );
            assert_eq!(
                get_action(&AppMode::Normal, field, ctrl('c')),
                Some(Action::Quit)
            );
        }
    }

    #[test]
    fn test_size_field_filters_chars() {
        assert_eq!(
            get_action(&AppMode::Normal, Field::Size, key(KeyCode::Char('7'))),
            Some(Action::Input('7'))
        );
        assert_eq!(
            get_action(&AppMode::Normal, Field::Size, key(KeyCode::Char('x'))),
            None
        );
        assert_eq!(
            get_action(&AppMode::Normal, Field::Size, key(KeyCode::Up)),
            Some(Action::Increment)
        );
        assert_eq!(
            get_action(&AppMode::Normal, Field::Text, key(KeyCode::Up)),
            None
        );
    }

    #[test]
    fn test_color_field_accepts_hex_only() {
        assert_eq!(
            get_action(&AppMode::Normal, Field::Foreground, key(KeyCode::Char('F'))),
            Some(Action::Input('F'))
        );
        assert_eq!(
            get_action(&AppMode::Normal, Field::Background, key(KeyCode::Char('g'))),
            None
        );
    }

    #[test]
    fn test_alert_only_dismisses() {
        let mode = AppMode::Alert("x".to_string());
        assert_eq!(
            get_action(&mode, Field::Text, key(KeyCode::Enter)),
            Some(Action::Dismiss)
        );
        assert_eq!(
            get_action(&mode, Field::Text, key(KeyCode::Esc)),
            Some(Action::Dismiss)
        );
        assert_eq!(get_action(&mode, Field::Text, key(KeyCode::Char('a'))), None);
        assert_eq!(get_action(&mode, Field::Text, ctrl('t')), None);
    }
}
