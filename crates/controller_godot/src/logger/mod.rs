//! GodotLogger implementation
//!
//! Bridges core logging to Godot's godot_print!/godot_error! + logs/controller.log file.

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use controller_simulation::{LogLevel, LogPrinter};

// Godot запускается из godot/ директории, поэтому путь относительно project root
const LOG_PATH: &str = "../logs/controller.log";

static FILE_ERROR_LOGGED: AtomicBool = AtomicBool::new(false);

pub struct GodotLogger;

impl LogPrinter for GodotLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => godot::prelude::godot_error!("[{}] {}", level.as_str(), message),
            LogLevel::Warning => godot::prelude::godot_warn!("[{}] {}", level.as_str(), message),
            _ => godot::prelude::godot_print!("[{}] {}", level.as_str(), message),
        }

        append_to_file(level, message);
    }
}

impl GodotLogger {
    /// Новый лог на каждый запуск extension
    pub fn clear_log_file() {
        let _ = std::fs::remove_file(LOG_PATH);
    }
}

fn append_to_file(level: LogLevel, message: &str) {
    let log_path = Path::new(LOG_PATH);

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        Ok(mut file) => {
            let _ = writeln!(file, "[{}] {}", level.as_str(), message);
        }
        Err(e) => {
            // Ошибку открытия файла логируем только один раз
            if !FILE_ERROR_LOGGED.swap(true, Ordering::Relaxed) {
                godot::prelude::godot_error!("Failed to open log file {:?}: {}", log_path, e);
            }
        }
    }
}
