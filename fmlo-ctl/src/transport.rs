use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

use fmlo_core::{Endpoint, Protocol, scpi};

#[derive(Debug, Error)]
pub(crate) enum TransportError {
    /// Имя/адрес эндпоинта не резолвится
    #[error("cannot resolve {addr}")]
    Resolve {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// TCP-соединение не установлено
    #[error("connect to {addr} failed")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Не удалось открыть UDP-сокет
    #[error("failed to open UDP socket")]
    Bind(#[source] io::Error),

    #[error("failed to set read timeout")]
    SetTimeout(#[source] io::Error),

    /// Операция на закрытом соединении
    #[error("transport is closed")]
    Closed,

    #[error("send failed")]
    Send(#[source] io::Error),

    #[error("receive failed")]
    Recv(#[source] io::Error),
}

/// Параметры транспорта.
#[derive(Debug, Clone)]
pub(crate) struct TransportOptions {
    /// Таймаут одного чтения: пауза длиннее - конец ответа
    pub(crate) read_timeout: Duration,
    /// Максимум байт за одно чтение из сокета
    pub(crate) buffer_size: usize,
    /// Терминатор строки команды
    pub(crate) terminator: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            read_timeout: fmlo_core::READ_TIMEOUT,
            buffer_size: fmlo_core::RECV_BUFFER_SIZE,
            terminator: scpi::LINE_TERMINATOR.to_string(),
        }
    }
}

#[derive(Debug)]
enum Socket {
    Tcp(TcpStream),
    Udp { sock: UdpSocket, target: SocketAddr },
}

/// SCPI-соединение с одним прибором.
///
/// Владеет сокетом эксклюзивно, наружу видны только `send`/`close`.
/// Закрытое соединение не переиспользуется: для новой серии команд
/// открывается новое.
#[derive(Debug)]
pub(crate) struct ScpiTransport {
    endpoint: Endpoint,
    socket: Option<Socket>,
    opts: TransportOptions,
}

impl ScpiTransport {
    /// Открывает соединение с прибором.
    ///
    /// TCP: блокирующий connect до установления соединения или ошибки.
    /// UDP: датаграммный сокет без рукопожатия; адрес эндпоинта
    /// используется как получатель при каждой отправке.
    pub(crate) fn open(
        endpoint: &Endpoint,
        opts: TransportOptions,
    ) -> Result<Self, TransportError> {
        let addr = resolve(endpoint)?;

        let socket = match endpoint.protocol {
            Protocol::Tcp => {
                let stream = TcpStream::connect(addr)
                    .map_err(|source| TransportError::Connect { addr, source })?;

                stream.set_nodelay(true).ok();
                stream
                    .set_read_timeout(Some(opts.read_timeout))
                    .map_err(TransportError::SetTimeout)?;

                Socket::Tcp(stream)
            }
            Protocol::Udp => {
                // локальный порт любой: прибору важен только адрес получателя
                let sock = UdpSocket::bind(("0.0.0.0", 0)).map_err(TransportError::Bind)?;
                sock.set_read_timeout(Some(opts.read_timeout))
                    .map_err(TransportError::SetTimeout)?;

                Socket::Udp { sock, target: addr }
            }
        };

        debug!("opened transport to {}", endpoint);

        Ok(Self {
            endpoint: endpoint.clone(),
            socket: Some(socket),
            opts,
        })
    }

    /// Отправляет SCPI-команду.
    ///
    /// Для запроса (команда оканчивается на `?`) после отправки вычитывает
    /// ответ до первого таймаута чтения и возвращает всё накопленное,
    /// возможно пустую строку: молчащий прибор - штатный случай. Для
    /// остальных команд чтение не выполняется и возвращается пустая строка.
    pub(crate) fn send(&mut self, command: &str) -> Result<String, TransportError> {
        let socket = self.socket.as_mut().ok_or(TransportError::Closed)?;

        info!("SEND> {command}");
        let line = scpi::frame(command, &self.opts.terminator);

        match socket {
            Socket::Tcp(stream) => {
                stream
                    .write_all(line.as_bytes())
                    .map_err(TransportError::Send)?;
                stream.flush().map_err(TransportError::Send)?;
            }
            Socket::Udp { sock, target } => {
                // одна команда - одна датаграмма
                sock.send_to(line.as_bytes(), *target)
                    .map_err(TransportError::Send)?;
            }
        }

        if !scpi::is_query(command) {
            return Ok(String::new());
        }

        let raw = drain_recv(socket, self.opts.buffer_size)?;
        let response = String::from_utf8_lossy(&raw).into_owned();
        info!("RECV> {}", response.trim_end());

        Ok(response)
    }

    /// Закрывает соединение. Повторное закрытие - no-op.
    pub(crate) fn close(&mut self) {
        if let Some(socket) = self.socket.take() {
            if let Socket::Tcp(stream) = &socket {
                stream.shutdown(std::net::Shutdown::Both).ok();
            }
            debug!("closed transport to {}", self.endpoint);
        }
    }
}

impl Drop for ScpiTransport {
    fn drop(&mut self) {
        // сокет освобождается на любом пути выхода
        self.close();
    }
}

fn resolve(endpoint: &Endpoint) -> Result<SocketAddr, TransportError> {
    let host = endpoint.host.as_str();
    let port = endpoint.port;

    // Берём первый результат резолвинга
    (host, port)
        .to_socket_addrs()
        .and_then(|mut addrs| {
            addrs
                .next()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no addresses resolved"))
        })
        .map_err(|source| TransportError::Resolve {
            addr: format!("{host}:{port}"),
            source,
        })
}

/// Вычитывает ответ прибора до первого таймаута чтения.
///
/// Таймаут - нормальный сигнал "данных больше нет", а не ошибка;
/// накопленное к этому моменту возвращается как есть. Прибор не
/// гарантирует никакого кадрирования ответа, поэтому другого признака
/// конца сообщения нет.
fn drain_recv(socket: &mut Socket, buffer_size: usize) -> Result<Vec<u8>, TransportError> {
    let mut acc = Vec::new();
    let mut buf = vec![0u8; buffer_size];

    loop {
        let res = match socket {
            Socket::Tcp(stream) => stream.read(&mut buf),
            Socket::Udp { sock, .. } => sock.recv_from(&mut buf).map(|(n, _src)| n),
        };

        match res {
            // TCP EOF: прибор закрыл соединение, данных больше не будет
            Ok(0) => break,
            Ok(n) => acc.extend_from_slice(&buf[..n]),
            Err(e)
                if e.kind() == io::ErrorKind::WouldBlock
                    || e.kind() == io::ErrorKind::TimedOut =>
            {
                // конец ответа
                break;
            }
            Err(e) => return Err(TransportError::Recv(e)),
        }
    }

    Ok(acc)
}
