//! Последовательности SCPI-команд для переключения режимов FM.
//!
//! Каждая операция - фиксированный план: упорядоченный список команд для
//! XFFTS и SG. План строится чистой функцией (порядок проверяется в
//! тестах без железа), затем выполняется: на каждую непрерывную серию
//! команд одного прибора открывается одно соединение и закрывается по
//! окончании серии.
//!
//! Отката нет: ошибка посреди последовательности оставляет приборы в
//! частично сконфигурированном состоянии и поднимается наверх.

use std::path::Path;

use anyhow::Context;
use log::info;

use fmlo_core::freqlist;

use crate::config::Endpoints;
use crate::transport::{ScpiTransport, TransportOptions};

/// Прибор-получатель команды.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Device {
    /// Генератор сигналов первого гетеродина
    Sg,
    /// Спектрометр XFFTS
    Xffts,
}

/// Одна SCPI-команда конкретному прибору.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) device: Device,
    pub(crate) command: String,
}

fn step(device: Device, command: impl Into<String>) -> Step {
    Step {
        device,
        command: command.into(),
    }
}

/// План инициализации FM-режима.
///
/// `LIST:FREQ` обязан идти последней командой SG: генератор принимает
/// список частот только после установки LIST-режима.
pub(crate) fn initialize_steps(listfreq: &str) -> Vec<Step> {
    vec![
        step(Device::Xffts, "XFFTS:CMDUSEDSECTIONS 1 1 1 1"),
        step(Device::Xffts, "XFFTS:CMDSYNCTIME 200000"),
        step(Device::Xffts, "XFFTS:CMDBLANKTIME 5000"),
        step(Device::Xffts, "XFFTS:CONFIG"),
        step(Device::Sg, "FREQ:MODE CW"),
        step(Device::Sg, "OUTP ON"),
        step(Device::Sg, "INIT:CONT OFF"),
        step(Device::Sg, "LIST:TYPE LIST"),
        step(Device::Sg, "LIST:DWEL 2.0E-01"),
        step(Device::Sg, "LIST:TRIG:SOUR EXT"),
        step(Device::Sg, "FREQ:MODE LIST"),
        step(Device::Sg, "TRIG:SLOP POS"),
        // это должно быть последним
        step(Device::Sg, format!("LIST:FREQ {listfreq}")),
    ]
}

/// План запуска FM-режима.
pub(crate) fn start_steps() -> Vec<Step> {
    vec![step(Device::Sg, "INIT:CONT ON")]
}

/// План остановки FM-режима: собственные команды остановки (пока не
/// требуются), затем весь план [`finalize_steps`].
pub(crate) fn stop_steps() -> Vec<Step> {
    let mut steps = Vec::new();
    steps.extend(finalize_steps());
    steps
}

/// План возврата SG и XFFTS в не-FM режим.
pub(crate) fn finalize_steps() -> Vec<Step> {
    vec![
        step(Device::Xffts, "XFFTS:CMDUSEDSECTIONS 1 1 1 1"),
        step(Device::Xffts, "XFFTS:CMDSYNCTIME 200000"),
        step(Device::Xffts, "XFFTS:CMDBLANKTIME 1000"),
        step(Device::Xffts, "XFFTS:CONFIG"),
        step(Device::Sg, "FREQ:MODE CW"),
        step(Device::Sg, "LIST:FREQ 1.75E+10"),
        step(Device::Sg, "LIST:TRIG:SOUR IMM"),
    ]
}

/// Выполняет план: одно соединение на непрерывную серию шагов одного
/// прибора, соединение закрывается по окончании серии.
fn run_steps(endpoints: &Endpoints, steps: &[Step]) -> anyhow::Result<()> {
    let mut idx = 0;

    while idx < steps.len() {
        let device = steps[idx].device;
        let endpoint = match device {
            Device::Sg => &endpoints.sg,
            Device::Xffts => &endpoints.xffts,
        };

        let mut transport = ScpiTransport::open(endpoint, TransportOptions::default())
            .with_context(|| format!("open {device:?} transport ({endpoint})"))?;

        while idx < steps.len() && steps[idx].device == device {
            let command = &steps[idx].command;
            transport
                .send(command)
                .with_context(|| format!("send to {device:?}: {command}"))?;
            idx += 1;
        }
        // конец серии: transport закрывается здесь
    }

    Ok(())
}

/// Готовит SG и XFFTS к FM-режиму и загружает список частот в генератор.
pub(crate) fn initialize(
    endpoints: &Endpoints,
    fmp_file: &Path,
    lo_freq_ghz: f64,
    multiply: u32,
) -> anyhow::Result<()> {
    // список частот строится до того, как тронут хоть один прибор
    let listfreq = freqlist::listfreq_from_path(fmp_file, lo_freq_ghz, multiply)
        .with_context(|| format!("build frequency list from pattern {fmp_file:?}"))?;

    info!("initializing FM mode: lo_freq={lo_freq_ghz} GHz, multiply={multiply}");
    run_steps(endpoints, &initialize_steps(&listfreq))?;
    info!("FM mode initialized");

    Ok(())
}

/// Запускает FM-режим.
pub(crate) fn start_fm(endpoints: &Endpoints) -> anyhow::Result<()> {
    info!("starting FM mode");
    run_steps(endpoints, &start_steps())
}

/// Останавливает FM-режим и возвращает приборы в исходное состояние.
pub(crate) fn stop_fm(endpoints: &Endpoints) -> anyhow::Result<()> {
    info!("stopping FM mode");
    run_steps(endpoints, &stop_steps())
}

/// Возвращает SG и XFFTS в не-FM режим.
pub(crate) fn finalize(endpoints: &Endpoints) -> anyhow::Result<()> {
    info!("finalizing: reverting to non-FM mode");
    run_steps(endpoints, &finalize_steps())
}
