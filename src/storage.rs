use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;
use toml::{Table, Value};
use tracing::{debug, info, warn};

use crate::models::Theme;

/// 主题偏好的键
pub const THEME_KEY: &str = "theme";
const UPDATED_AT_KEY: &str = "updated_at";

/// 偏好存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("偏好文件读写失败: {0}")]
    Io(#[from] io::Error),

    #[error("偏好文件格式错误: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("偏好文件序列化失败: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 键值偏好存储
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// 基于 TOML 文件的偏好存储
pub struct TomlPreferenceStore {
    path: PathBuf,
}

impl TomlPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<Table, StorageError> {
        if !self.path.exists() {
            return Ok(Table::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let table = self.read_table()?;
        Ok(table.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut table = self.read_table()?;
        table.insert(key.to_string(), Value::String(value.to_string()));
        table.insert(
            UPDATED_AT_KEY.to_string(),
            Value::String(Local::now().to_rfc3339()),
        );

        let content = toml::to_string_pretty(&table)?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), key, value, "偏好已写入");
        Ok(())
    }
}

/// 内存偏好存储（文件不可用时的退路）
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    /// 直接写入，内存存储不会失败
    pub fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert(key, value);
        Ok(())
    }
}

/// 主题存储：启动时加载一次，每次切换立即持久化
pub struct ThemeStore {
    backend: Box<dyn PreferenceStore>,
    theme: Theme,
    in_memory: bool,
}

impl ThemeStore {
    /// 从存储加载主题
    ///
    /// 只有 "dark" 会被写回以保持一致；没有记录时保持浅色且不写入。
    pub fn load(backend: Box<dyn PreferenceStore>) -> Self {
        let mut store = Self {
            backend,
            theme: Theme::Light,
            in_memory: false,
        };

        let stored = match store.backend.get(THEME_KEY) {
            Ok(value) => value,
            Err(e) => {
                store.degrade(&e, None);
                None
            }
        };

        store.theme = Theme::from_stored(stored.as_deref());
        if store.theme.is_dark() {
            store.persist(Theme::Dark);
        }

        info!(theme = store.theme.as_str(), "主题已加载");
        store
    }

    /// 仅在内存中保存主题
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryPreferenceStore::default()))
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// 存储是否已退化为内存模式
    pub fn is_in_memory(&self) -> bool {
        self.in_memory
    }

    /// 切换主题：先持久化，再更新当前值
    pub fn toggle(&mut self) -> Theme {
        let next = self.theme.toggled();
        self.persist(next);
        self.theme = next;
        info!(theme = next.as_str(), "主题已切换");
        next
    }

    fn persist(&mut self, theme: Theme) {
        if let Err(e) = self.backend.set(THEME_KEY, theme.as_str()) {
            self.degrade(&e, Some(theme));
        }
    }

    /// 换成内存存储，并写入未能持久化的主题
    fn degrade(&mut self, error: &StorageError, pending: Option<Theme>) {
        warn!(%error, "偏好存储不可用，本次会话仅在内存中保存主题");
        let mut memory = MemoryPreferenceStore::default();
        if let Some(theme) = pending {
            memory.insert(THEME_KEY, theme.as_str());
        }
        self.backend = Box::new(memory);
        self.in_memory = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 记录写入次数的存储
    #[derive(Default, Clone)]
    struct RecordingStore {
        values: Rc<RefCell<HashMap<String, String>>>,
        writes: Rc<RefCell<usize>>,
    }

    impl PreferenceStore for RecordingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.values.borrow().get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            *self.writes.borrow_mut() += 1;
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    /// 总是失败的存储
    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "disabled").into())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "disabled").into())
        }
    }

    #[test]
    fn test_load_without_value_is_light_and_silent() {
        let recorder = RecordingStore::default();
        let store = ThemeStore::load(Box::new(recorder.clone()));

        assert_eq!(store.theme(), Theme::Light);
        assert_eq!(*recorder.writes.borrow(), 0);
        assert!(recorder.values.borrow().get(THEME_KEY).is_none());
    }

    #[test]
    fn test_load_dark_rewrites_value() {
        let recorder = RecordingStore::default();
        recorder
            .values
            .borrow_mut()
            .insert(THEME_KEY.to_string(), "dark".to_string());

        let store = ThemeStore::load(Box::new(recorder.clone()));
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(
            recorder.values.borrow().get(THEME_KEY).map(String::as_str),
            Some("dark")
        );
    }

    #[test]
    fn test_load_unrecognized_value_is_light() {
        let recorder = RecordingStore::default();
        recorder
            .values
            .borrow_mut()
            .insert(THEME_KEY.to_string(), "purple".to_string());

        let store = ThemeStore::load(Box::new(recorder.clone()));
        assert_eq!(store.theme(), Theme::Light);
        assert_eq!(*recorder.writes.borrow(), 0);
    }

    #[test]
    fn test_toggle_persists_every_change() {
        let recorder = RecordingStore::default();
        let mut store = ThemeStore::load(Box::new(recorder.clone()));

        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(
            recorder.values.borrow().get(THEME_KEY).map(String::as_str),
            Some("dark")
        );

        assert_eq!(store.toggle(), Theme::Light);
        assert_eq!(
            recorder.values.borrow().get(THEME_KEY).map(String::as_str),
            Some("light")
        );
        assert_eq!(*recorder.writes.borrow(), 2);
    }

    #[test]
    fn test_broken_storage_degrades_to_memory() {
        let mut store = ThemeStore::load(Box::new(BrokenStore));
        assert_eq!(store.theme(), Theme::Light);
        assert!(store.is_in_memory());

        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(store.toggle(), Theme::Light);
    }

    #[test]
    fn test_write_failure_still_toggles() {
        struct ReadOnlyStore;

        impl PreferenceStore for ReadOnlyStore {
            fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Ok(None)
            }

            fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Err(io::Error::new(io::ErrorKind::ReadOnlyFilesystem, "ro").into())
            }
        }

        let mut store = ThemeStore::load(Box::new(ReadOnlyStore));
        assert!(!store.is_in_memory());

        assert_eq!(store.toggle(), Theme::Dark);
        assert!(store.is_in_memory());
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(
            store.backend.get(THEME_KEY).unwrap().as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn test_toml_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        let mut store = ThemeStore::load(Box::new(TomlPreferenceStore::new(&path)));
        assert!(!path.exists());
        store.toggle();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("theme = \"dark\""));

        let reopened = ThemeStore::load(Box::new(TomlPreferenceStore::new(&path)));
        assert_eq!(reopened.theme(), Theme::Dark);
    }

    #[test]
    fn test_toml_store_corrupt_file_is_light() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "theme = = broken").unwrap();

        let store = ThemeStore::load(Box::new(TomlPreferenceStore::new(&path)));
        assert_eq!(store.theme(), Theme::Light);
        assert!(store.is_in_memory());
    }

    #[test]
    fn test_toml_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "other = \"kept\"\n").unwrap();

        let mut prefs = TomlPreferenceStore::new(&path);
        prefs.set(THEME_KEY, "light").unwrap();

        assert_eq!(prefs.get("other").unwrap().as_deref(), Some("kept"));
        assert_eq!(prefs.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert!(prefs.get(UPDATED_AT_KEY).unwrap().is_some());
    }
}
