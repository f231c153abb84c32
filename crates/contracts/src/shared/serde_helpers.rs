//! Десериализация «числа или строки»
//!
//! Сервер отдаёт цены строками (`"10.50"`), количества числами, а
//! идентификаторы то числами, то строками. Эти хелперы принимают оба вида.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

use super::money::{format2, parse_num};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

/// `Option<f64>` из строки, числа или `null`.
///
/// Строки разбираются как поле ввода (`"1,200.00"` -> `1200`); пустая или
/// нечисловая строка даёт `None`, а не ошибку всего ответа.
pub fn deserialize_number_option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::String(s)) => Ok(parse_num(&s)),
        Some(StringOrNumber::Int(i)) => Ok(Some(i as f64)),
        Some(StringOrNumber::Float(f)) => Ok(Some(f)),
        None => Ok(None),
    }
}

/// Цена уходит строкой с двумя знаками: `Some(10.5)` -> `"10.50"`.
pub fn serialize_money_option<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_str(&format2(*v)),
        None => serializer.serialize_none(),
    }
}

/// Идентификатор как строка из строки или целого числа; `null` даёт пустой id.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_id_option(deserializer)?.unwrap_or_default())
}

/// Необязательный идентификатор; `null` и `""` дают `None`.
pub fn deserialize_id_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::String(s)) if s.is_empty() => Ok(None),
        Some(StringOrNumber::String(s)) => Ok(Some(s)),
        Some(StringOrNumber::Int(i)) => Ok(Some(i.to_string())),
        Some(StringOrNumber::Float(f)) if f.fract() == 0.0 => Ok(Some(format!("{}", f as i64))),
        Some(StringOrNumber::Float(f)) => Err(de::Error::custom(format!("Invalid id: {}", f))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Deserialize)]
    struct Price {
        #[serde(default, deserialize_with = "deserialize_number_option")]
        value: Option<f64>,
    }

    #[derive(Serialize)]
    struct Outgoing {
        #[serde(serialize_with = "serialize_money_option")]
        value: Option<f64>,
    }

    #[test]
    fn test_number_strings_parse_like_inputs() {
        let p: Price = serde_json::from_str(r#"{"value": "1,200.00"}"#).unwrap();
        assert_eq!(p.value, Some(1200.0));
        let p: Price = serde_json::from_str(r#"{"value": "n/a"}"#).unwrap();
        assert_eq!(p.value, None);
        let p: Price = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(p.value, None);
    }

    #[test]
    fn test_money_serialized_as_two_decimal_string() {
        let json = serde_json::to_value(Outgoing { value: Some(14.0) }).unwrap();
        assert_eq!(json["value"], serde_json::json!("14.00"));
    }
}
