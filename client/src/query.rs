use std::fmt::Display;

/// Ordered query-string parameters.
///
/// Empty values never make it in: a filter that is present but empty must
/// look exactly like one that is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key=value` unless the rendered value is empty.
    pub fn with(mut self, key: &str, value: impl Display) -> Self {
        self.push(key, value);
        self
    }

    /// Adds `key=value` when `value` is `Some` and non-empty.
    pub fn with_opt<V: Display>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn push(&mut self, key: &str, value: impl Display) {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `a=1&b=two%20words`, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_dropped() {
        let q = Query::new()
            .with("search", "")
            .with("page", 2)
            .with_opt::<u32>("page_size", None)
            .with_opt("ordering", Some("-created_at"));
        assert_eq!(q.keys().collect::<Vec<_>>(), vec!["page", "ordering"]);
        assert_eq!(q.to_query_string(), "page=2&ordering=-created_at");
    }

    #[test]
    fn values_are_percent_encoded() {
        let q = Query::new().with("search", "blade runner & co");
        assert_eq!(q.to_query_string(), "search=blade%20runner%20%26%20co");
    }
}
