//! Naming conventions for generated code
//!
//! Case conversion and pluralization are reached through the [`Namer`] trait so the
//! generator can be tested against fixed names. [`InflectorNamer`] is the default
//! implementation, and [`ResourceNames`] derives every identifier a resource needs
//! from the operator's input.

use crate::error::GeneratorError;
use inflector::Inflector;

/// Pluralization and case conversion
pub trait Namer: Send + Sync {
    /// Plural form of a word
    fn pluralize(&self, input: &str) -> String;

    /// `snake_case` form
    fn to_snake_case(&self, input: &str) -> String;

    /// `camelCase` form
    fn to_camel_case(&self, input: &str) -> String;

    /// Input with its first character upper-cased and the rest untouched
    fn ucfirst(&self, input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

/// [`Namer`] backed by the `Inflector` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct InflectorNamer;

impl Namer for InflectorNamer {
    /// # Note
    ///
    /// The inflector library has known limitations with some irregular plurals.
    /// This is acceptable for code generation as model names are typically regular words.
    fn pluralize(&self, input: &str) -> String {
        input.to_plural()
    }

    fn to_snake_case(&self, input: &str) -> String {
        input.to_snake_case()
    }

    fn to_camel_case(&self, input: &str) -> String {
        input.to_camel_case()
    }
}

/// Every identifier derived from a resource name
///
/// # Examples
///
/// ```
/// # use resource_gen::scaffold::helpers::{InflectorNamer, ResourceNames};
/// let names = ResourceNames::derive("monkey", &InflectorNamer);
/// assert_eq!(names.class, "Monkey");
/// assert_eq!(names.table, "monkeys");
/// assert_eq!(names.migration_class, "CreateMonkeysTable");
/// assert_eq!(names.controller, "MonkeyController");
/// assert_eq!(names.instance, "monkey");
/// assert_eq!(names.route, "monkeys");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    /// Model class name (`UserProfile`)
    pub class: String,
    /// Lower-case plural table name (`userprofiles`)
    pub table: String,
    /// Migration class name (`CreateUserProfilesTable`)
    pub migration_class: String,
    /// Controller class name (`UserProfileController`)
    pub controller: String,
    /// Lower-camel instance variable (`userProfile`)
    pub instance: String,
    /// Route segment, same as the table name
    pub route: String,
}

impl ResourceNames {
    /// Check that `resource_name` can become a PHP class and file name
    ///
    /// The name must start with an ASCII letter and contain only ASCII letters,
    /// digits and underscores. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidName`] otherwise.
    pub fn validate(resource_name: &str) -> Result<(), GeneratorError> {
        let name = resource_name.trim();
        let invalid = |reason| GeneratorError::InvalidName {
            name: resource_name.to_string(),
            reason,
        };

        let Some(first) = name.chars().next() else {
            return Err(invalid("name is empty"));
        };
        if !first.is_ascii_alphabetic() {
            return Err(invalid("must start with a letter"));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("may only contain letters, digits and underscores"));
        }
        Ok(())
    }

    /// Derive all names from the operator-supplied resource name
    #[must_use]
    pub fn derive(resource_name: &str, namer: &dyn Namer) -> Self {
        let class = namer.ucfirst(resource_name.trim());
        let table = namer.pluralize(&class.to_lowercase());
        let migration_class = format!("Create{}Table", namer.pluralize(&class));
        let controller = format!("{class}Controller");
        let instance = namer.to_camel_case(&class);

        Self {
            route: table.clone(),
            class,
            table,
            migration_class,
            controller,
            instance,
        }
    }

    /// Model file name (`Animal.php`)
    #[must_use]
    pub fn model_file(&self) -> String {
        format!("{}.php", self.class)
    }

    /// Controller file name (`AnimalController.php`)
    #[must_use]
    pub fn controller_file(&self) -> String {
        format!("{}.php", self.controller)
    }

    /// Migration file name for a timestamp prefix (`<prefix>_create_animals_table.php`)
    #[must_use]
    pub fn migration_file(&self, prefix: &str) -> String {
        format!("{prefix}_create_{}_table.php", self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(InflectorNamer.to_snake_case("UserProfile"), "user_profile");
        assert_eq!(InflectorNamer.to_snake_case("simple"), "simple");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(InflectorNamer.to_camel_case("UserProfile"), "userProfile");
        assert_eq!(InflectorNamer.to_camel_case("Tiger"), "tiger");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(InflectorNamer.pluralize("post"), "posts");
        assert_eq!(InflectorNamer.pluralize("category"), "categories");
        assert_eq!(InflectorNamer.pluralize("monkey"), "monkeys");
    }

    #[test]
    fn test_ucfirst() {
        assert_eq!(InflectorNamer.ucfirst("animal"), "Animal");
        assert_eq!(InflectorNamer.ucfirst("userProfile"), "UserProfile");
        assert_eq!(InflectorNamer.ucfirst("Tiger"), "Tiger");
        assert_eq!(InflectorNamer.ucfirst(""), "");
    }

    #[test]
    fn test_resource_names() {
        let names = ResourceNames::derive("Chimp", &InflectorNamer);
        assert_eq!(names.class, "Chimp");
        assert_eq!(names.table, "chimps");
        assert_eq!(names.migration_class, "CreateChimpsTable");
        assert_eq!(names.model_file(), "Chimp.php");
        assert_eq!(names.controller_file(), "ChimpController.php");
        assert_eq!(names.migration_file("date"), "date_create_chimps_table.php");
    }

    #[test]
    fn test_validate_accepts_identifiers() {
        assert!(ResourceNames::validate("Animal").is_ok());
        assert!(ResourceNames::validate("userProfile").is_ok());
        assert!(ResourceNames::validate(" Tiger_2 ").is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        for name in ["", "   ", "../../Escaped", "app/Tiger", "Bad Name", "9Lives", "_Tiger", "Tiger.php"] {
            let err = ResourceNames::validate(name).unwrap_err();
            assert!(
                matches!(err, GeneratorError::InvalidName { .. }),
                "{name:?} gave {err:?}"
            );
        }
        assert_eq!(
            ResourceNames::validate("").unwrap_err().to_string(),
            "Invalid resource name '': name is empty"
        );
    }

    #[test]
    fn test_resource_names_use_namer() {
        struct Suffix;

        impl Namer for Suffix {
            fn pluralize(&self, input: &str) -> String {
                format!("{input}z")
            }

            fn to_snake_case(&self, input: &str) -> String {
                input.to_lowercase()
            }

            fn to_camel_case(&self, input: &str) -> String {
                input.to_lowercase()
            }
        }

        let names = ResourceNames::derive("goose", &Suffix);
        assert_eq!(names.class, "Goose");
        assert_eq!(names.table, "goosez");
        assert_eq!(names.migration_class, "CreateGoosezTable");
        assert_eq!(names.instance, "goose");
    }
}
