use serde::{Deserialize, Serialize};

use super::serde_helpers::deserialize_id;

/// Значение ссылочного поля: идентификатор и отображаемый текст
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RefValue {
    /// `null` (пустой внешний ключ) даёт пустой id
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub text: String,
}

impl RefValue {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// Текст для отображения; без текста `#<id>`
    pub fn label(&self) -> String {
        if self.text.is_empty() {
            format!("#{}", self.id)
        } else {
            self.text.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_accepted() {
        let v: RefValue = serde_json::from_str(r#"{"id": 7, "text": "Main store"}"#).unwrap();
        assert_eq!(v, RefValue::new("7", "Main store"));
    }

    #[test]
    fn test_null_id_is_empty() {
        let v: RefValue = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn test_label_falls_back_to_id() {
        assert_eq!(RefValue::new("12", "").label(), "#12");
        assert_eq!(RefValue::new("12", "Acme").label(), "Acme");
    }
}
