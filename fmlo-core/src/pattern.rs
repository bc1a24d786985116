use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::PatternError;

/// Читает FM-смещения (Гц) из источника.
///
/// Формат: колонки, разделённые пробельными символами; колонка с индексом 1
/// содержит смещение частоты в Гц, по одному сэмплу на строку. Лишние
/// колонки игнорируются. Пустые строки и строки-комментарии (`#`)
/// пропускаются. Порядок строк сохраняется.
pub fn read_pattern<R: io::Read>(reader: R) -> Result<Vec<f64>, PatternError> {
    let buf = BufReader::new(reader);
    let mut fm_freq = Vec::new();

    for (idx, line) in buf.lines().enumerate() {
        let line = line?;
        let lineno = idx + 1;

        let Some(row) = normalize_line(&line) else {
            continue;
        };

        fm_freq.push(parse_offset(row, lineno)?);
    }

    Ok(fm_freq)
}

/// Читает FM-паттерн из файла.
pub fn read_pattern_from_path(path: impl AsRef<Path>) -> Result<Vec<f64>, PatternError> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|source| PatternError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    read_pattern(f)
}

fn normalize_line(line: &str) -> Option<&str> {
    let s = line.trim();
    if s.is_empty() || s.starts_with('#') {
        return None;
    }
    Some(s)
}

fn parse_offset(row: &str, lineno: usize) -> Result<f64, PatternError> {
    let mut cols = row.split_whitespace();

    // колонка 0 (обычно номер/время сэмпла) не используется
    cols.next();

    let raw = cols
        .next()
        .ok_or(PatternError::MissingColumn { line: lineno })?;

    let value: f64 = raw.parse().map_err(|_| PatternError::BadValue {
        line: lineno,
        value: raw.to_string(),
    })?;

    // "inf"/"nan" парсятся как f64, но в списке частот им делать нечего
    if !value.is_finite() {
        return Err(PatternError::BadValue {
            line: lineno,
            value: raw.to_string(),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read, Write};

    #[test]
    fn read_pattern_keeps_row_order() {
        let input = "0 100.0\n1 -250.5\n2 0\n3 1.5e6\n";
        let got = read_pattern(Cursor::new(input)).unwrap();
        assert_eq!(got, vec![100.0, -250.5, 0.0, 1.5e6]);
    }

    #[test]
    fn read_pattern_skips_blank_lines_and_comments() {
        let input = "\n# header comment\n0 10.0\n   \n# another\n1 20.0\n";
        let got = read_pattern(Cursor::new(input)).unwrap();
        assert_eq!(got, vec![10.0, 20.0]);
    }

    #[test]
    fn read_pattern_ignores_extra_columns() {
        let input = "0 10.0 9999 extra\n1 20.0 8888\n";
        let got = read_pattern(Cursor::new(input)).unwrap();
        assert_eq!(got, vec![10.0, 20.0]);
    }

    #[test]
    fn read_pattern_empty_input_gives_empty_vec() {
        let got = read_pattern(Cursor::new("")).unwrap();
        assert!(got.is_empty());

        let got = read_pattern(Cursor::new("# only comments\n\n")).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn read_pattern_reports_missing_column_with_line_number() {
        let input = "0 10.0\n1\n";
        let err = read_pattern(Cursor::new(input)).unwrap_err();
        match err {
            PatternError::MissingColumn { line } => assert_eq!(line, 2),
            other => panic!("expected MissingColumn, got: {other:?}"),
        }
    }

    #[test]
    fn read_pattern_reports_bad_value_with_line_number() {
        let input = "0 10.0\n1 20.0\n2 abc\n";
        let err = read_pattern(Cursor::new(input)).unwrap_err();
        match err {
            PatternError::BadValue { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("expected BadValue, got: {other:?}"),
        }
    }

    #[test]
    fn read_pattern_rejects_non_finite_values() {
        for bad in ["inf", "-inf", "nan", "NaN"] {
            let input = format!("0 {bad}\n");
            let err = read_pattern(Cursor::new(input)).unwrap_err();
            assert!(
                matches!(err, PatternError::BadValue { line: 1, .. }),
                "expected BadValue for {bad:?}, got: {err:?}"
            );
        }
    }

    #[test]
    fn read_pattern_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "0 -1.0e6\n1 0.0\n2 1.0e6\n").unwrap();

        let got = read_pattern_from_path(file.path()).unwrap();
        assert_eq!(got, vec![-1.0e6, 0.0, 1.0e6]);
    }

    #[test]
    fn read_pattern_from_path_missing_file_keeps_not_found_kind() {
        let err = read_pattern_from_path("/no/such/pattern.fmp").unwrap_err();
        match err {
            PatternError::ReadFile { path, source } => {
                assert_eq!(path, std::path::PathBuf::from("/no/such/pattern.fmp"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected ReadFile, got: {other:?}"),
        }
    }

    #[test]
    fn read_pattern_propagates_read_error() {
        // Подсунем reader, который читает немного, а потом падает
        struct FailingReader {
            inner: Cursor<Vec<u8>>,
            fail_after: usize,
            read_total: usize,
        }

        impl Read for FailingReader {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.read_total >= self.fail_after {
                    return Err(io::Error::new(io::ErrorKind::Other, "boom"));
                }

                let remaining_before_fail = self.fail_after - self.read_total;
                let to_read = buf.len().min(remaining_before_fail);

                let n = self.inner.read(&mut buf[..to_read])?;
                self.read_total += n;

                Ok(n)
            }
        }

        let data = b"0 10.0\n1 20.0\n2 30.0\n".to_vec();
        let reader = FailingReader {
            inner: Cursor::new(data),
            fail_after: 8, // успеем прочитать первую строку и упадём в процессе
            read_total: 0,
        };

        let err = read_pattern(reader).unwrap_err();
        match err {
            PatternError::Io(e) => assert!(e.to_string().contains("boom")),
            other => panic!("expected Io, got: {other:?}"),
        }
    }
}
