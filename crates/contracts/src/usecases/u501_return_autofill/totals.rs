use crate::shared::money::{round2, sum_amounts};

/// Итоги документа возврата
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DocumentTotals {
    /// Сумма строк, не помеченных на удаление
    pub items_total: f64,
    pub discount: f64,
    pub other_charges: f64,
    pub tax: f64,
    /// `items_total - discount + other_charges + tax`
    pub grand_total: f64,
}

impl DocumentTotals {
    pub fn compute<I>(amounts: I, discount: f64, other_charges: f64, tax: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let items_total = sum_amounts(amounts);
        Self {
            items_total,
            discount,
            other_charges,
            tax,
            grand_total: round2(items_total - discount + other_charges + tax),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute() {
        let t = DocumentTotals::compute([31.5, 5.0], 1.5, 2.0, 0.25);
        assert_eq!(t.items_total, 36.5);
        assert_eq!(t.grand_total, 37.25);
    }

    #[test]
    fn test_empty() {
        let t = DocumentTotals::compute(std::iter::empty(), 0.0, 0.0, 0.0);
        assert_eq!(t, DocumentTotals::default());
    }
}
