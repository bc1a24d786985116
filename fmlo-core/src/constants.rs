use std::time::Duration;

/// Таймаут одного чтения из сокета: пауза длиннее этого значения
/// означает конец ответа прибора
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Максимальный размер одного чтения из сокета
pub const RECV_BUFFER_SIZE: usize = 8192;

/// Множитель частоты SG -> LO по умолчанию
pub const DEFAULT_MULTIPLY: u32 = 8;
