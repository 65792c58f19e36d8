use std::fmt::Display;

/// Query-string parameters for list, stats and export endpoints.
///
/// Pairs are kept in insertion order; setting a key again replaces the
/// earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Display) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Set a parameter only when a value is present.
    pub fn param_opt(self, key: impl Into<String>, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn page(self, page: u32) -> Self {
        self.param("page", page)
    }

    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit)
    }

    pub fn status(self, status: &str) -> Self {
        self.param("status", status)
    }

    /// The `type` filter (report, transaction, notification or analytics type).
    pub fn kind(self, kind: &str) -> Self {
        self.param("type", kind)
    }

    pub fn user_id(self, user_id: &str) -> Self {
        self.param("userId", user_id)
    }

    /// Reporting period, e.g. `day`, `week`, `month`, `year`.
    pub fn period(self, period: &str) -> Self {
        self.param("period", period)
    }

    /// Export format, e.g. `csv`, `json`, `excel`, `pdf`.
    pub fn format(self, format: &str) -> Self {
        self.param("format", format)
    }

    pub fn date_range(self, start_date: &str, end_date: &str) -> Self {
        self.param("startDate", start_date)
            .param("endDate", end_date)
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Query::new(), |query, (key, value)| query.param(key, value))
    }
}
