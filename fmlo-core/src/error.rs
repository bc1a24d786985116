use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Верхнеуровневый тип ошибок крейта
#[derive(Debug, Error)]
pub enum FmloCoreError {
    /// Ошибки протокола
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Ошибки FM-паттерна
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Ошибки протокола
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Неизвестный транспортный протокол
    #[error("unknown protocol: {0:?} (expected TCP or UDP)")]
    Unknown(String),
}

/// Ошибки чтения FM-паттерна
#[derive(Debug, Error)]
pub enum PatternError {
    /// Не удалось открыть файл паттерна
    #[error("failed to read pattern file: {path:?}")]
    ReadFile {
        /// Путь к файлу паттерна
        path: PathBuf,
        /// Исходная ошибка ввода-вывода
        #[source]
        source: io::Error,
    },

    /// Ошибка чтения из источника
    #[error(transparent)]
    Io(#[from] io::Error),

    /// В строке нет второй колонки с FM-смещением
    #[error("line {line}: missing FM offset column")]
    MissingColumn {
        /// Номер строки (с единицы)
        line: usize,
    },

    /// Вторая колонка не является конечным числом
    #[error("line {line}: bad FM offset value: {value:?}")]
    BadValue {
        /// Номер строки (с единицы)
        line: usize,
        /// Исходный текст значения
        value: String,
    },

    /// В паттерне нет ни одной строки с данными
    #[error("pattern file has no data rows")]
    Empty,
}
