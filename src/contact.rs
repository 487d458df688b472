use serde::{Deserialize, Serialize};

/// A single directory entry, persisted as JSON and exchanged as CSV.
///
/// All fields are free-form text. The internal number acts as the de-facto
/// key for edit and delete, but uniqueness is not enforced.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub internal_number: String,
    pub wireless_number: String,
    pub function: String,
    pub direct_line: String,
    pub gsm_number: String,
    pub fax_number: String,
}

impl Contact {
    /// An entry is kept only if it names a person and has an extension.
    pub fn is_valid(&self) -> bool {
        (!self.first_name.is_empty() || !self.last_name.is_empty())
            && !self.internal_number.is_empty()
    }

    pub fn display_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => "Unknown".to_owned(),
        }
    }

    /// Case-insensitive substring match against the searchable fields.
    ///
    /// `query` must already be lowercased so that filtering a list does not
    /// lowercase it once per contact.
    pub fn matches(&self, query: &str) -> bool {
        self.first_name.to_lowercase().contains(query)
            || self.last_name.to_lowercase().contains(query)
            || self.function.to_lowercase().contains(query)
            || self.internal_number.contains(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(first_name: &str, last_name: &str, internal_number: &str) -> Contact {
        Contact {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            internal_number: internal_number.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn validity_requires_name_and_internal_number() {
        assert!(contact("John", "Doe", "1001").is_valid());
        assert!(contact("John", "", "1001").is_valid());
        assert!(contact("", "Doe", "1001").is_valid());

        assert!(!contact("", "", "1001").is_valid());
        assert!(!contact("John", "Doe", "").is_valid());
    }

    #[test]
    fn display_name_falls_back_to_either_part() {
        assert_eq!(contact("John", "Doe", "1001").display_name(), "John Doe");
        assert_eq!(contact("John", "", "1001").display_name(), "John");
        assert_eq!(contact("", "Doe", "1001").display_name(), "Doe");
        assert_eq!(contact("", "", "1001").display_name(), "Unknown");
    }

    #[test]
    fn matches_ignores_case_in_names_and_function() {
        let mut val = contact("John", "Doe", "1001");
        val.function = "Manager".to_owned();

        assert!(val.matches("manager"));
        assert!(val.matches("john"));
        assert!(val.matches("100"));
        assert!(!val.matches("developer"));
    }
}
