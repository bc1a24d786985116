//! Точка входа `fmlo-ctl`.
//!
//! Жизненный цикл:
//! - парсинг CLI и загрузка конфига эндпоинтов (SG, XFFTS)
//! - выполнение одной операции: init / start / stop / finalize
//! - каждая операция - фиксированная последовательность SCPI-команд;
//!   соединения открываются и закрываются в рамках операции

mod cli;
mod commands;
mod config;
mod transport;

use clap::Parser;
use log::info;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug
    env_logger::init();

    let args = cli::Args::parse();
    let endpoints = config::load_endpoints(args.config.clone())?;

    info!("SG at {}, XFFTS at {}", endpoints.sg, endpoints.xffts);

    match args.command {
        cli::Command::Init {
            fmp_file,
            lo_freq,
            multiply,
        } => commands::initialize(&endpoints, &fmp_file, lo_freq, multiply)?,
        cli::Command::Start => commands::start_fm(&endpoints)?,
        cli::Command::Stop => commands::stop_fm(&endpoints)?,
        cli::Command::Finalize => commands::finalize(&endpoints)?,
    }

    Ok(())
}
