//! Денежная арифметика строк документа
//!
//! Все суммы в формах хранятся как текст полей ввода и пересчитываются
//! через `f64` с округлением до копеек.

/// Разобрать текст поля ввода в число.
///
/// Разделители тысяч (`,`) отбрасываются, пробелы по краям игнорируются.
/// Берётся самый длинный числовой префикс (`"12.5 шт"` -> `12.5`).
/// Пустое, нечисловое или бесконечное значение даёт `0`.
pub fn to_num(text: &str) -> f64 {
    parse_num(text).unwrap_or(0.0)
}

/// То же, что [`to_num`], но нечисловой текст даёт `None`.
pub fn parse_num(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    let candidate: &str = {
        let end = cleaned
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
            .map(|(i, _)| i)
            .unwrap_or(cleaned.len());
        &cleaned[..end]
    };

    // parseFloat-подобное поведение: отрезаем хвост, пока префикс не распарсится
    let mut end = candidate.len();
    while end > 0 {
        if let Ok(v) = candidate[..end].parse::<f64>() {
            return v.is_finite().then_some(v);
        }
        end -= 1;
    }
    None
}

/// Округление до двух знаков (половина округляется от нуля).
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let scaled = value * 100.0;
    // за пределами точности f64 копеек уже нет
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / 100.0;
    // -0.00 в полях формы не нужен
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Фиксированный формат с двумя знаками, как в полях формы: `"31.50"`.
pub fn format2(value: f64) -> String {
    format!("{:.2}", round2(value))
}

/// Сумма строки: `round2(quantity × price)`.
pub fn line_amount(quantity: f64, price: f64) -> f64 {
    if !quantity.is_finite() || !price.is_finite() {
        return 0.0;
    }
    round2(quantity * price)
}

/// Итог по набору сумм строк.
pub fn sum_amounts<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    round2(amounts.into_iter().filter(|v| v.is_finite()).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_num() {
        assert_eq!(to_num("10.5"), 10.5);
        assert_eq!(to_num(" 1,234.50 "), 1234.5);
        assert_eq!(to_num(""), 0.0);
        assert_eq!(to_num("abc"), 0.0);
        assert_eq!(to_num("12.5 pcs"), 12.5);
        assert_eq!(to_num("-3"), -3.0);
        assert_eq!(to_num("1e999"), 0.0);
    }

    #[test]
    fn test_parse_num() {
        assert_eq!(parse_num("1,200.00"), Some(1200.0));
        assert_eq!(parse_num("  "), None);
        assert_eq!(parse_num("n/a"), None);
    }

    #[test]
    fn test_huge_value_is_not_zeroed() {
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(line_amount(1.0, 1e307), 1e307);
        assert_ne!(format2(line_amount(1.0, 1e307)), "0.00");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(31.499999), 31.5);
        assert_eq!(round2(2.675_000_1), 2.68);
        assert_eq!(round2(-0.001), 0.0);
        assert_eq!(round2(f64::NAN), 0.0);
    }

    #[test]
    fn test_format2() {
        assert_eq!(format2(31.5), "31.50");
        assert_eq!(format2(5.0), "5.00");
        assert_eq!(format2(0.0), "0.00");
        assert_eq!(format2(-0.004), "0.00");
    }

    #[test]
    fn test_line_amount() {
        assert_eq!(format2(line_amount(3.0, 10.5)), "31.50");
        assert_eq!(format2(line_amount(1.0, 5.0)), "5.00");
        assert_eq!(format2(line_amount(3.0, 0.1)), "0.30");
        assert_eq!(line_amount(f64::INFINITY, 2.0), 0.0);
    }

    #[test]
    fn test_line_amount_matches_round2_of_product() {
        for q in 0..25 {
            for p in [0.0, 0.01, 0.1, 0.33, 1.25, 10.5, 99.99, 1234.56] {
                let q = q as f64;
                assert_eq!(line_amount(q, p), round2(q * p));
            }
        }
    }

    #[test]
    fn test_sum_amounts() {
        assert_eq!(format2(sum_amounts([31.5, 5.0])), "36.50");
        assert_eq!(format2(sum_amounts([0.1, 0.2])), "0.30");
        assert_eq!(sum_amounts(Vec::<f64>::new()), 0.0);
    }
}
