use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Идентификатор документа. В админке это целочисленный первичный ключ.
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    fn value(&self) -> i64;

    fn from_value(value: i64) -> Self;

    fn as_string(&self) -> String {
        self.value().to_string()
    }

    /// Разобрать id из сегмента URL
    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map(Self::from_value)
            .map_err(|e| format!("Invalid id '{}': {}", s, e))
    }
}
