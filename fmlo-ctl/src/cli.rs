use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FMLO Controller - переключает SG и XFFTS между CW- и FM-режимами по SCPI.
///
/// Каждый запуск выполняет одну операцию; адреса приборов берутся из
/// встроенного конфига или из файла `--config`.
#[derive(Parser, Debug, Clone)]
#[command(name = "fmlo-ctl", version, about)]
pub(crate) struct Args {
    /// Файл конфигурации эндпоинтов (JSON). По умолчанию - встроенный конфиг
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Подготовить SG и XFFTS к FM-режиму и загрузить список частот
    Init {
        /// Файл FM-паттерна (вторая колонка - смещение частоты в Гц)
        fmp_file: PathBuf,

        /// Частота LO при нулевом FM-смещении, в ГГц
        #[arg(long)]
        lo_freq: f64,

        /// Множитель частоты SG -> LO
        #[arg(
            long,
            default_value_t = fmlo_core::DEFAULT_MULTIPLY,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        multiply: u32,
    },

    /// Запустить FM-режим
    Start,

    /// Остановить FM-режим и вернуть приборы в исходное состояние
    Stop,

    /// Вернуть SG и XFFTS в не-FM режим
    Finalize,
}
