// SPDX-License-Identifier: Apache-2.0

/// Ordered collection of per-field validation messages.
///
/// Fields keep their rejection order so re-rendered forms list errors in
/// the order the checks ran, not in map-iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, String)>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.entries.push((field.to_string(), message.into()));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.entries.iter().any(|(f, _)| f == field)
    }

    #[must_use]
    pub fn field(&self, field: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(f, _)| f == field)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// All messages, prefixed with their field name.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(f, m)| format!("{f}: {m}"))
            .collect()
    }

    pub fn merge(&mut self, other: FieldErrors) {
        self.entries.extend(other.entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_preserve_order_and_group_by_field() {
        let mut errors = FieldErrors::new();
        errors.reject("telephone", "must not be blank");
        errors.reject("address", "must not be blank");
        errors.reject("telephone", "must contain digits only");

        assert!(!errors.is_empty());
        assert!(errors.has("telephone"));
        assert!(!errors.has("city"));
        assert_eq!(
            errors.field("telephone"),
            vec![
                "must not be blank".to_string(),
                "must contain digits only".to_string()
            ]
        );
        assert_eq!(
            errors.messages(),
            vec![
                "telephone: must not be blank".to_string(),
                "address: must not be blank".to_string(),
                "telephone: must contain digits only".to_string()
            ]
        );
    }
}
