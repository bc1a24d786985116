use std::path::Path;

use crate::error::PatternError;
use crate::pattern;

/// Гц в одном ГГц
const HZ_PER_GHZ: f64 = 1e9;

/// Сериализует список частот SG (Гц) для команды `LIST:FREQ`.
///
/// Для каждого сэмпла паттерна: `sg = (fm + lo_freq_ghz * 1e9) / multiply`,
/// где `fm` - FM-смещение в Гц, `lo_freq_ghz` - частота LO при нулевом
/// смещении в ГГц, `multiply` - множитель частоты SG -> LO. Значения
/// форматируются в научной нотации с девятью знаками после запятой и
/// соединяются запятыми. Порядок сэмплов сохраняется.
pub fn format_listfreq(fm_freq: &[f64], lo_freq_ghz: f64, multiply: u32) -> String {
    debug_assert!(multiply > 0, "multiply must be positive");

    let lo_freq_hz = lo_freq_ghz * HZ_PER_GHZ;

    fm_freq
        .iter()
        .map(|fm| format_e9((fm + lo_freq_hz) / f64::from(multiply)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Читает FM-паттерн из файла и строит строку частот для `LIST:FREQ`.
///
/// Пустой паттерн - ошибка конфигурации ([`PatternError::Empty`]):
/// команда `LIST:FREQ` без значений отвергается генератором, и падать
/// лучше здесь, до того как тронуты приборы.
pub fn listfreq_from_path(
    path: impl AsRef<Path>,
    lo_freq_ghz: f64,
    multiply: u32,
) -> Result<String, PatternError> {
    let fm_freq = pattern::read_pattern_from_path(path)?;

    if fm_freq.is_empty() {
        return Err(PatternError::Empty);
    }

    Ok(format_listfreq(&fm_freq, lo_freq_ghz, multiply))
}

/// Научная нотация в стиле `%.9E`: девять знаков после запятой,
/// знак экспоненты присутствует всегда, экспонента минимум из двух цифр.
fn format_e9(value: f64) -> String {
    let s = format!("{value:.9E}");

    // Rust пишет "2.187500000E9", приборы ожидают "2.187500000E+09"
    let Some((mantissa, exp)) = s.split_once('E') else {
        return s; // конечный f64 всегда содержит экспоненту
    };

    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp),
    };

    format!("{mantissa}E{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn single_zero_offset_sample_matches_reference_value() {
        // (0.0 + 17.5e9) / 8 = 2.1875e9
        assert_eq!(format_listfreq(&[0.0], 17.5, 8), "2.187500000E+09");
    }

    #[test]
    fn field_count_matches_sample_count() {
        let fm: Vec<f64> = (0..100).map(|i| (i as f64) * 1e3).collect();
        let s = format_listfreq(&fm, 17.5, 8);
        assert_eq!(s.split(',').count(), 100);
    }

    #[test]
    fn fields_round_trip_within_formatting_precision() {
        let fm = [-2.5e6, -1.0e3, 0.0, 1.0e3, 2.5e6];
        let lo_freq_ghz = 17.5;
        let multiply = 8;

        let s = format_listfreq(&fm, lo_freq_ghz, multiply);

        for (field, fm) in s.split(',').zip(fm) {
            let parsed: f64 = field.parse().unwrap();
            let expected = (fm + lo_freq_ghz * 1e9) / f64::from(multiply);
            let rel = ((parsed - expected) / expected).abs();
            assert!(rel < 1e-9, "field {field} too far from {expected}");
        }
    }

    #[test]
    fn format_e9_pads_exponent_to_two_digits_with_sign() {
        assert_eq!(format_e9(0.0), "0.000000000E+00");
        assert_eq!(format_e9(2.1875e9), "2.187500000E+09");
        assert_eq!(format_e9(-2.1875e9), "-2.187500000E+09");
        assert_eq!(format_e9(1.5e-3), "1.500000000E-03");
        // трёхзначная экспонента не усекается и не дополняется
        assert_eq!(format_e9(1e100), "1.000000000E+100");
    }

    #[test]
    fn empty_sample_list_formats_to_empty_string() {
        assert_eq!(format_listfreq(&[], 17.5, 8), "");
    }

    #[test]
    fn listfreq_from_path_builds_list_in_row_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "0 0.0\n1 8.0\n").unwrap();

        // (0 + 17.5e9)/8 и (8 + 17.5e9)/8
        let s = listfreq_from_path(file.path(), 17.5, 8).unwrap();
        assert_eq!(s, "2.187500000E+09,2.187500001E+09");
    }

    #[test]
    fn listfreq_from_path_rejects_empty_pattern() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# no data rows here\n\n").unwrap();

        let err = listfreq_from_path(file.path(), 17.5, 8).unwrap_err();
        assert!(matches!(err, PatternError::Empty), "got: {err:?}");
    }

    #[test]
    fn listfreq_from_path_propagates_missing_file() {
        let err = listfreq_from_path("/no/such/file.fmp", 17.5, 8).unwrap_err();
        assert!(matches!(err, PatternError::ReadFile { .. }), "got: {err:?}");
    }
}
