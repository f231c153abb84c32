//! Модель формсета: набор повторяющихся строк формы со счётчиками
//!
//! Строки добавляются и удаляются только через `add_row` / `remove_row`,
//! как это делают ссылки «Добавить строку» и «Удалить» админ-формы:
//! - новая (несохранённая) строка удаляется целиком, следующие перенумеровываются;
//! - сохранённая строка только помечается `DELETE`, чтобы удаление ушло на сервер.

pub mod field_id;
pub mod management;

pub use field_id::FieldId;
pub use management::ManagementForm;

/// Происхождение строки формсета
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrigin {
    /// Строка сохранённого документа (входит в INITIAL_FORMS)
    Initial,
    /// Строка, добавленная на клиенте
    Added,
}

/// Данные строки, которые уходят в POST
pub trait FormRowData: Default + Clone {
    /// Пары (поле, значение) без префикса и индекса
    fn post_fields(&self) -> Vec<(&'static str, String)>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormRow<R> {
    pub origin: RowOrigin,
    pub deleted: bool,
    pub data: R,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Formset<R> {
    prefix: String,
    rows: Vec<FormRow<R>>,
}

impl<R: FormRowData> Formset<R> {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            rows: Vec::new(),
        }
    }

    /// Формсет сохранённого документа
    pub fn with_initial(prefix: impl Into<String>, initial: Vec<R>) -> Self {
        Self {
            prefix: prefix.into(),
            rows: initial
                .into_iter()
                .map(|data| FormRow {
                    origin: RowOrigin::Initial,
                    deleted: false,
                    data,
                })
                .collect(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn rows(&self) -> &[FormRow<R>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&FormRow<R>> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut FormRow<R>> {
        self.rows.get_mut(index)
    }

    pub fn field_id(&self, index: usize, field: &str) -> FieldId {
        FieldId::new(self.prefix.clone(), index, field)
    }

    /// «Добавить строку»: новая пустая строка в конец, возвращает её индекс
    pub fn add_row(&mut self) -> usize {
        self.rows.push(FormRow {
            origin: RowOrigin::Added,
            deleted: false,
            data: R::default(),
        });
        self.rows.len() - 1
    }

    /// «Удалить»: новая строка удаляется, сохранённая помечается на удаление.
    ///
    /// Возвращает `false`, если строки нет или она уже помечена.
    pub fn remove_row(&mut self, index: usize) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        if row.deleted {
            return false;
        }
        match row.origin {
            RowOrigin::Initial => row.deleted = true,
            RowOrigin::Added => {
                self.rows.remove(index);
            }
        }
        true
    }

    /// Флажок DELETE существует только у сохранённых строк
    pub fn set_deleted(&mut self, index: usize, deleted: bool) -> bool {
        match self.rows.get_mut(index) {
            Some(row) if row.origin == RowOrigin::Initial => {
                row.deleted = deleted;
                true
            }
            _ => false,
        }
    }

    /// Индексы строк, не помеченных на удаление
    pub fn live_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.deleted)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn live_rows(&self) -> impl Iterator<Item = (usize, &R)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.deleted)
            .map(|(i, r)| (i, &r.data))
    }

    pub fn live_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.deleted).count()
    }

    /// Привести число живых строк к `n`.
    ///
    /// Живые строки переиспользуются по порядку, лишние снимаются через
    /// `remove_row` (с конца), недостающие добавляются через `add_row`.
    /// Возвращает индексы живых строк после сверки.
    pub fn reconcile(&mut self, n: usize) -> Vec<usize> {
        let live = self.live_indices();
        if live.len() > n {
            for &index in live[n..].iter().rev() {
                self.remove_row(index);
            }
        }
        for _ in self.live_count()..n {
            self.add_row();
        }
        self.live_indices()
    }

    /// Снять все живые строки
    pub fn clear(&mut self) {
        self.reconcile(0);
    }

    pub fn management(&self) -> ManagementForm {
        ManagementForm {
            prefix: self.prefix.clone(),
            total_forms: self.rows.len(),
            initial_forms: self
                .rows
                .iter()
                .filter(|r| r.origin == RowOrigin::Initial)
                .count(),
            min_num_forms: 0,
            max_num_forms: ManagementForm::DEFAULT_MAX_NUM_FORMS,
        }
    }

    /// Все пары имя/значение формсета для отправки формы
    pub fn post_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.management().post_pairs();
        for (index, row) in self.rows.iter().enumerate() {
            for (field, value) in row.data.post_fields() {
                pairs.push((self.field_id(index, field).html_name(), value));
            }
            if row.deleted {
                pairs.push((self.field_id(index, "DELETE").html_name(), "on".to_string()));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Row {
        qty: String,
    }

    impl FormRowData for Row {
        fn post_fields(&self) -> Vec<(&'static str, String)> {
            vec![("quantity", self.qty.clone())]
        }
    }

    fn row(q: &str) -> Row {
        Row { qty: q.to_string() }
    }

    #[test]
    fn test_add_row_updates_total_forms() {
        let mut fs = Formset::<Row>::new("items");
        assert_eq!(fs.add_row(), 0);
        assert_eq!(fs.add_row(), 1);
        let m = fs.management();
        assert_eq!(m.total_forms, 2);
        assert_eq!(m.initial_forms, 0);
        assert_eq!(m.total_id(), "id_items-TOTAL_FORMS");
    }

    #[test]
    fn test_remove_added_row_renumbers() {
        let mut fs = Formset::<Row>::new("items");
        for q in ["1", "2", "3"] {
            let i = fs.add_row();
            fs.row_mut(i).unwrap().data = row(q);
        }
        assert!(fs.remove_row(0));
        assert_eq!(fs.rows().len(), 2);
        assert_eq!(fs.row(0).unwrap().data, row("2"));
        assert_eq!(fs.management().total_forms, 2);
    }

    #[test]
    fn test_remove_initial_row_marks_deleted() {
        let mut fs = Formset::with_initial("items", vec![row("1"), row("2")]);
        assert!(fs.remove_row(0));
        assert!(!fs.remove_row(0));
        assert_eq!(fs.rows().len(), 2);
        assert!(fs.row(0).unwrap().deleted);
        assert_eq!(fs.live_indices(), vec![1]);
        assert_eq!(fs.management().initial_forms, 2);
    }

    #[test]
    fn test_reconcile_adds_missing_rows() {
        let mut fs = Formset::<Row>::new("items");
        assert_eq!(fs.reconcile(3), vec![0, 1, 2]);
        assert_eq!(fs.live_count(), 3);
    }

    #[test]
    fn test_reconcile_marks_surplus_initial_rows() {
        let mut fs = Formset::with_initial("items", vec![row("1"), row("2"), row("3")]);
        let live = fs.reconcile(1);
        assert_eq!(live, vec![0]);
        assert_eq!(fs.rows().len(), 3);
        assert!(fs.row(1).unwrap().deleted);
        assert!(fs.row(2).unwrap().deleted);
    }

    #[test]
    fn test_reconcile_mixed_rows() {
        let mut fs = Formset::with_initial("items", vec![row("1")]);
        fs.add_row();
        fs.add_row();
        // 1 сохранённая + 2 новые -> 0: сохранённая помечена, новые удалены
        assert!(fs.reconcile(0).is_empty());
        assert_eq!(fs.rows().len(), 1);
        assert!(fs.row(0).unwrap().deleted);

        // после этого нужно 2 строки: помеченная не переиспользуется
        assert_eq!(fs.reconcile(2), vec![1, 2]);
        assert_eq!(fs.management().total_forms, 3);
    }

    #[test]
    fn test_reconcile_count_property() {
        for initial in 0..4 {
            for added in 0..4 {
                for n in 0..6 {
                    let mut fs = Formset::with_initial("items", vec![row("x"); initial]);
                    for _ in 0..added {
                        fs.add_row();
                    }
                    fs.reconcile(n);
                    assert_eq!(fs.live_count(), n);
                    // сохранённые строки никогда не исчезают из формсета
                    assert_eq!(fs.management().initial_forms, initial);
                }
            }
        }
    }

    #[test]
    fn test_set_deleted_only_for_initial() {
        let mut fs = Formset::with_initial("items", vec![row("1")]);
        let added = fs.add_row();
        assert!(fs.set_deleted(0, true));
        assert!(!fs.set_deleted(added, true));
        assert!(fs.set_deleted(0, false));
        assert_eq!(fs.live_count(), 2);
    }

    #[test]
    fn test_post_pairs_include_delete_flag() {
        let mut fs = Formset::with_initial("items", vec![row("1")]);
        fs.remove_row(0);
        let i = fs.add_row();
        fs.row_mut(i).unwrap().data = row("4");
        let pairs = fs.post_pairs();
        assert!(pairs.contains(&("items-TOTAL_FORMS".to_string(), "2".to_string())));
        assert!(pairs.contains(&("items-INITIAL_FORMS".to_string(), "1".to_string())));
        assert!(pairs.contains(&("items-0-DELETE".to_string(), "on".to_string())));
        assert!(pairs.contains(&("items-1-quantity".to_string(), "4".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "items-1-DELETE"));
    }
}
