mod config;
mod error;
mod export;
mod models;
mod render;
mod storage;
mod ui;

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::storage::{ThemeStore, TomlPreferenceStore};
use crate::ui::{App, render};

/// 获取数据目录路径 (~/.local/share/qrgen/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join("qrgen");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 初始化日志，写入数据目录下的 qrgen.log（终端处于 raw 模式，不能输出到 stderr）
fn init_logging(data_dir: &Path) -> Result<()> {
    let log_path = data_dir.join("qrgen.log");
    let file = File::options()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("无法打开日志文件 {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let data_dir = get_data_dir().context("无法创建数据目录")?;
    init_logging(&data_dir)?;
    info!("qrgen v{} starting...", env!("CARGO_PKG_VERSION"));

    // 配置 (~/.local/share/qrgen/config.toml)
    let config_path = data_dir.join("config.toml");
    let config = AppConfig::load(&config_path);

    // 主题必须在首次绘制前加载
    let prefs = TomlPreferenceStore::new(data_dir.join("prefs.toml"));
    info!(path = %prefs.path().display(), "加载主题偏好");
    let theme = ThemeStore::load(Box::new(prefs));
    info!(persistent = !theme.is_in_memory(), "主题存储就绪");

    let mut app = App::new(config.initial_form(), theme, config.resolve_export_dir());

    // 设置终端；进入 raw 模式后无论成功与否都要恢复
    enable_raw_mode().context("无法进入 raw 模式")?;
    let result = run_in_terminal(&mut app);
    let restored = restore_terminal();

    info!("qrgen exiting");
    result.context("主循环异常退出")?;
    restored.context("无法恢复终端")
}

fn run_in_terminal(app: &mut App) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, app)
}

/// 恢复终端：每一步都会执行，返回第一个错误
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableBracketedPaste,
        cursor::Show
    );
    raw.and(screen)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        let event = crossterm::event::read()?;
        if ui::handle_event(app, event) {
            break;
        }
    }
    Ok(())
}
