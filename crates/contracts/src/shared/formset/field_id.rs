use std::fmt;

/// Идентификатор поля строки формсета: `id_<prefix>-<index>-<field>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub prefix: String,
    pub index: usize,
    pub field: String,
}

impl FieldId {
    pub fn new(prefix: impl Into<String>, index: usize, field: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            index,
            field: field.into(),
        }
    }

    /// Разобрать DOM id вида `id_items-3-quantity`.
    ///
    /// Поля управляющей формы (`id_items-TOTAL_FORMS`) и любые другие id
    /// не распознаются и дают `None`.
    pub fn parse(dom_id: &str) -> Option<Self> {
        let rest = dom_id.strip_prefix("id_")?;
        let mut parts = rest.rsplitn(3, '-');
        let field = parts.next()?;
        let index = parts.next()?;
        let prefix = parts.next()?;

        if prefix.is_empty() || field.is_empty() {
            return None;
        }
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index = index.parse::<usize>().ok()?;

        Some(Self::new(prefix, index, field))
    }

    /// Имя поля для отправки формы: `<prefix>-<index>-<field>`
    pub fn html_name(&self) -> String {
        format!("{}-{}-{}", self.prefix, self.index, self.field)
    }

    pub fn is(&self, field: &str) -> bool {
        self.field == field
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id_{}-{}-{}", self.prefix, self.index, self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row_field() {
        let id = FieldId::parse("id_items-3-quantity").unwrap();
        assert_eq!(id, FieldId::new("items", 3, "quantity"));
        assert_eq!(id.to_string(), "id_items-3-quantity");
        assert_eq!(id.html_name(), "items-3-quantity");
    }

    #[test]
    fn test_parse_field_with_underscore() {
        let id = FieldId::parse("id_items-12-purchase_price").unwrap();
        assert_eq!(id.index, 12);
        assert!(id.is("purchase_price"));
    }

    #[test]
    fn test_parse_rejects_other_ids() {
        assert!(FieldId::parse("id_items-TOTAL_FORMS").is_none());
        assert!(FieldId::parse("id_items-x-quantity").is_none());
        assert!(FieldId::parse("items-1-quantity").is_none());
        assert!(FieldId::parse("id_invoice").is_none());
        assert!(FieldId::parse("id_-1-quantity").is_none());
        assert!(FieldId::parse("id_items-1-").is_none());
    }
}
