//! # fmlo-core
//!
//! Базовые типы и протокольные функции FMLO-контроллера первого гетеродина.
//!
//! Этот крейт содержит:
//!
//! - [`scpi`] — классификация и кадрирование текстовых SCPI-команд
//! - [`pattern`] — чтение FM-паттерна (смещения частоты) из текста/файла
//! - [`freqlist`] — расчёт и сериализация списка частот SG
//! - [`endpoint`] — адрес и транспортный протокол инструмента
//! - [`error`] — типы ошибок, которые возвращают компоненты `fmlo-core`
//!
//! ## Быстрый пример: классификация SCPI-команды
//!
//! ```rust
//! use fmlo_core::scpi;
//!
//! assert!(scpi::is_query("FREQ?"));
//! assert!(!scpi::is_query("FREQ 10"));
//! assert_eq!(scpi::frame("OUTP ON", scpi::LINE_TERMINATOR), "OUTP ON\r\n");
//! ```
//!
//! ## Пример: чтение FM-паттерна
//!
//! ```rust
//! use fmlo_core::pattern::read_pattern;
//! use std::io::Cursor;
//!
//! let input = "0 -1.5e6\n1 0.0\n# comment\n2 1.5e6\n";
//! let fm_freq = read_pattern(Cursor::new(input)).unwrap();
//! assert_eq!(fm_freq, vec![-1.5e6, 0.0, 1.5e6]);
//! ```
//!
//! ## Пример: список частот для `LIST:FREQ`
//!
//! ```rust
//! use fmlo_core::freqlist::format_listfreq;
//!
//! // (0.0 + 17.5e9) / 8 = 2.1875e9
//! let listfreq = format_listfreq(&[0.0], 17.5, 8);
//! assert_eq!(listfreq, "2.187500000E+09");
//! ```
//!
//! ## Дизайн
//!
//! `fmlo-core` задуман как "нулевая" зависимость для всех частей
//! контроллера: транспорт, оркестратор, тесты. Поэтому здесь держим только
//! чистые типы, парсинг/форматирование и простую утилитарщину,
//! без сокетов и без тяжёлых зависимостей.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Текстовый уровень SCPI (запрос/запись, терминатор строки).
pub mod scpi;

/// Чтение FM-паттерна из текста и файлов.
pub mod pattern;

/// Расчёт и сериализация списка частот SG.
pub mod freqlist;

/// Адрес инструмента и транспортный протокол.
pub mod endpoint;

/// Ошибки `fmlo-core`.
pub mod error;

/// Общие константы
mod constants;
pub use constants::{DEFAULT_MULTIPLY, READ_TIMEOUT, RECV_BUFFER_SIZE};

// --- Re-exports (публичный фасад API) ---

pub use crate::endpoint::{Endpoint, Protocol};
pub use crate::error::{FmloCoreError, PatternError, ProtocolError};
