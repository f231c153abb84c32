/// Управляющая форма формсета (счётчики строк)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagementForm {
    pub prefix: String,
    /// Всего строк, включая помеченные на удаление
    pub total_forms: usize,
    /// Строк, пришедших с сервера (уже сохранённых)
    pub initial_forms: usize,
    pub min_num_forms: usize,
    pub max_num_forms: usize,
}

impl ManagementForm {
    pub const DEFAULT_MAX_NUM_FORMS: usize = 1000;

    pub fn total_id(&self) -> String {
        format!("id_{}-TOTAL_FORMS", self.prefix)
    }

    pub fn initial_id(&self) -> String {
        format!("id_{}-INITIAL_FORMS", self.prefix)
    }

    /// Пары имя/значение для отправки формы
    pub fn post_pairs(&self) -> Vec<(String, String)> {
        vec![
            (
                format!("{}-TOTAL_FORMS", self.prefix),
                self.total_forms.to_string(),
            ),
            (
                format!("{}-INITIAL_FORMS", self.prefix),
                self.initial_forms.to_string(),
            ),
            (
                format!("{}-MIN_NUM_FORMS", self.prefix),
                self.min_num_forms.to_string(),
            ),
            (
                format!("{}-MAX_NUM_FORMS", self.prefix),
                self.max_num_forms.to_string(),
            ),
        ]
    }
}
