/// Форматирует размер ответа с разделителями тысяч (точками) для лога запросов
///
/// # Примеры
/// ```ignore
/// assert_eq!(format_bytes(1234567), "1.234.567");
/// ```
pub fn format_bytes(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0");
        assert_eq!(format_bytes(999), "999");
        assert_eq!(format_bytes(1000), "1.000");
        assert_eq!(format_bytes(1234567), "1.234.567");
    }
}
