use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ProtocolError;

/// Транспортный протокол инструмента.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    /// TCP-поток (постоянное соединение)
    Tcp,
    /// UDP-датаграммы (без соединения)
    Udp,
}

impl FromStr for Protocol {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TCP" => Ok(Protocol::Tcp),
            "UDP" => Ok(Protocol::Udp),
            _ => Err(ProtocolError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "TCP"),
            Protocol::Udp => write!(f, "UDP"),
        }
    }
}

/// Сетевой адрес одного инструмента.
///
/// Неизвестный протокол непредставим: поле типизировано, так что
/// ошибка всплывает при разборе конфига, до открытия какого-либо сокета.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Endpoint {
    /// IP-адрес или hostname инструмента
    pub host: String,
    /// Порт инструмента (> 0)
    pub port: u16,
    /// Транспортный протокол
    pub protocol: Protocol,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.host, self.port, self.protocol)
    }
}
