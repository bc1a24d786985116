use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

use fmlo_core::Endpoint;

/// Встроенный конфиг по умолчанию
const DEFAULT_ENDPOINTS: &str = include_str!("../assets/endpoints.json");

/// Адреса приборов.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Endpoints {
    /// Генератор сигналов первого гетеродина
    pub(crate) sg: Endpoint,
    /// Спектрометр XFFTS
    pub(crate) xffts: Endpoint,
}

/// Загружает адреса приборов:
/// - `--config <path>` -> JSON-файл пользователя
/// - иначе -> встроенный конфиг по умолчанию
pub(crate) fn load_endpoints(path: Option<PathBuf>) -> anyhow::Result<Endpoints> {
    let endpoints: Endpoints = match &path {
        Some(p) => {
            let raw = fs::read_to_string(p)
                .with_context(|| format!("read endpoints config {p:?}"))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parse endpoints config {p:?}"))?
        }
        None => {
            serde_json::from_str(DEFAULT_ENDPOINTS).context("parse built-in endpoints config")?
        }
    };

    validate(&endpoints)?;
    Ok(endpoints)
}

fn validate(endpoints: &Endpoints) -> anyhow::Result<()> {
    for (name, ep) in [("sg", &endpoints.sg), ("xffts", &endpoints.xffts)] {
        if ep.host.trim().is_empty() {
            anyhow::bail!("{name}: host is empty");
        }
        if ep.port == 0 {
            anyhow::bail!("{name}: port must be positive");
        }
    }
    Ok(())
}
