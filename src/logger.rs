//! 终端日志输出，接入 `log` 门面。
//!
//! 级别由环境变量 `MINIFAT_LOG` 指定（error/warn/info/debug/trace/off），默认 warn。

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

pub const LOG_ENV: &str = "MINIFAT_LOG";

struct ShellLogger;

static LOGGER: ShellLogger = ShellLogger;

impl Log for ShellLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "[ERROR]".red().bold(),
            Level::Warn => "[WARN ]".yellow().bold(),
            Level::Info => "[INFO ]".blue(),
            Level::Debug => "[DEBUG]".green(),
            Level::Trace => "[TRACE]".bright_black(),
        };
        eprintln!("{} {}", tag, record.args());
    }

    fn flush(&self) {}
}

/// 解析日志级别，无法识别时退回 warn
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// 安装日志器；重复调用时保持第一次的设置
pub fn init() {
    let level = level_from(std::env::var(LOG_ENV).ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
