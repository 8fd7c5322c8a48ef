//! Общий модуль для CLI утилит
//!
//! Содержит общую функциональность, используемую всеми бинарниками:
//! инициализацию логирования, цветные статусные сообщения и запуск команд.

use anyhow::Result;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

pub mod args;
pub mod output;

pub use args::CommonArgs;
pub use output::{OutputFormat, OutputWriter};

/// Инициализирует систему логирования
///
/// `RUST_LOG` имеет приоритет; `verbose` добавляет DEBUG.
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Выводит заголовок CLI утилиты
pub fn print_header(name: &str, version: &str, description: &str) {
    println!("{}", "=".repeat(60).blue());
    println!("  {} {} - {}", name.bold().blue(), version.dimmed(), description);
    println!("{}\n", "=".repeat(60).blue());
}

/// Выводит шаг конвейера
pub fn print_step(number: usize, message: &str) {
    println!("{} {}", format!("{}.", number).bold(), message);
}

/// Выводит успешное завершение операции
pub fn print_success(message: &str) {
    println!("{} {}", "✅".green(), message.green());
}

/// Выводит предупреждение
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message.yellow());
}

/// Выводит ошибку
pub fn print_error(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red());
}

/// Выводит информационное сообщение
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ️".blue(), message);
}

/// Trait для CLI команд
pub trait CliCommand {
    /// Выполняет команду
    fn execute(&self) -> Result<()>;

    /// Возвращает имя команды
    fn name(&self) -> &str;

    /// Возвращает описание команды
    fn description(&self) -> &str;
}

/// Запускает CLI команду с обработкой ошибок
pub fn run_command<C: CliCommand>(command: C) -> Result<()> {
    print_header(
        command.name(),
        env!("CARGO_PKG_VERSION"),
        command.description(),
    );

    match command.execute() {
        Ok(()) => {
            print_success(&format!("{} completed successfully", command.name()));
            Ok(())
        }
        Err(e) => {
            print_error(&format!("{} failed: {}", command.name(), e));
            Err(e)
        }
    }
}

/// Форматирует размер файла в человекочитаемый вид
pub fn format_file_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
