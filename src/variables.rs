//! The variable environment consulted by template expansion and by the
//! instruction interpreter.

use indexmap::IndexMap;

use crate::builtins::{Builtin, BuiltinKind};

/// Name under which the destination folder name is stored.
pub const PROJECT_FOLDER: &str = "projectFolder";

/// Name bound to the accepted answer while a `QueryVar` transform is expanded.
pub const TRANSFORM_VALUE: &str = "value";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Builtin(Builtin),
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

/// Ordered name to value mapping. Later writes overwrite earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    values: IndexMap<String, Value>,
}

impl Variables {
    /// Creates an environment seeded with the project folder name and every
    /// built-in callable.
    pub fn new<S: Into<String>>(project_folder: S) -> Self {
        let project_folder: String = project_folder.into();
        let mut variables = Self::default();
        variables.set(PROJECT_FOLDER, project_folder);
        for builtin in Builtin::ALL {
            variables.set(builtin.name(), Value::Builtin(builtin));
        }
        variables
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the value of `name` if it holds text.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(Value::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn set<K: Into<String>, V: Into<Value>>(&mut self, name: K, value: V) {
        self.values.insert(name.into(), value.into());
    }

    /// Looks up a validator by name. Converters and plain text do not qualify.
    pub fn validator(&self, name: &str) -> Option<Builtin> {
        match self.values.get(name) {
            Some(Value::Builtin(builtin)) if builtin.kind() == BuiltinKind::Validator => {
                Some(*builtin)
            }
            _ => None,
        }
    }

    /// Returns a copy extended with a temporary binding.
    pub fn with<K: Into<String>, V: Into<Value>>(&self, name: K, value: V) -> Self {
        let mut extended = self.clone();
        extended.set(name, value);
        extended
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_values() {
        let variables = Variables::new("my-app");
        assert_eq!(variables.text(PROJECT_FOLDER), Some("my-app"));
        assert_eq!(variables.get("isPackage"), Some(&Value::Builtin(Builtin::IsPackage)));
    }

    #[test]
    fn test_set_overwrites() {
        let mut variables = Variables::new("app");
        variables.set("name", "first");
        variables.set("name", "second");
        assert_eq!(variables.text("name"), Some("second"));
    }

    #[test]
    fn test_validator_lookup() {
        let mut variables = Variables::new("app");
        variables.set("custom", "isNotEmpty");
        assert_eq!(variables.validator("isYesNo"), Some(Builtin::IsYesNo));
        assert_eq!(variables.validator("yesNoToBool"), None);
        assert_eq!(variables.validator("custom"), None);
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let variables = Variables::new("app");
        let extended = variables.with(TRANSFORM_VALUE, "yes");
        assert_eq!(extended.text(TRANSFORM_VALUE), Some("yes"));
        assert_eq!(variables.get(TRANSFORM_VALUE), None);
    }
}
