//! Slot-based template rendering
//!
//! Templates are plain text containing a fixed vocabulary of `{{slot}}` markers.
//! Rendering is a single left-to-right scan: every marker that names a known
//! [`Slot`] is replaced by its value, and substituted text is never scanned again.
//! Anything else between braces is copied through untouched, so generated PHP
//! or Blade syntax never needs escaping.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Named substitution points shared by all stubs
///
/// The marker text of each slot is part of the stub format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// Model namespace (`App`)
    Namespace,
    /// Model class name (`Animal`)
    Class,
    /// Table name (`animals`)
    Table,
    /// Migration class name (`CreateAnimalsTable`)
    MigrationClass,
    /// Schema-builder column block
    Columns,
    /// `$fillable` array literal
    Fillable,
    /// `$hidden` array literal
    Hidden,
    /// Array literal returned by `migrationAttributes()`
    MigrationAttributes,
    /// Controller class name (`AnimalController`)
    Controller,
    /// Lower-camel instance variable name (`animal`)
    Instance,
    /// Route segment (`animals`)
    Route,
    /// Faker attribute lines for the model factory
    FactoryFields,
}

impl Slot {
    /// Every slot
    pub const ALL: [Self; 12] = [
        Self::Namespace,
        Self::Class,
        Self::Table,
        Self::MigrationClass,
        Self::Columns,
        Self::Fillable,
        Self::Hidden,
        Self::MigrationAttributes,
        Self::Controller,
        Self::Instance,
        Self::Route,
        Self::FactoryFields,
    ];

    /// Name between the braces
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Class => "class",
            Self::Table => "table",
            Self::MigrationClass => "migrationClass",
            Self::Columns => "columns",
            Self::Fillable => "fillable",
            Self::Hidden => "hidden",
            Self::MigrationAttributes => "migrationAttributes",
            Self::Controller => "controller",
            Self::Instance => "instance",
            Self::Route => "route",
            Self::FactoryFields => "factoryFields",
        }
    }

    /// Full marker as it appears in a template, e.g. `{{class}}`
    #[must_use]
    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.name())
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{}}}}}", self.name())
    }
}

/// Template rendering errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The template references a slot with no value
    #[error("Template '{template}' references {slot} but no value was provided")]
    UnfilledSlot {
        /// Template name
        template: String,
        /// The missing slot
        slot: Slot,
    },
}

/// Values for the slots of one render
#[derive(Debug, Clone, Default)]
pub struct Substitutions(BTreeMap<Slot, String>);

impl Substitutions {
    /// Empty substitution set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `slot`, replacing any previous value
    #[must_use]
    pub fn with(mut self, slot: Slot, value: impl Into<String>) -> Self {
        self.0.insert(slot, value.into());
        self
    }

    /// Set the value for `slot` in place
    pub fn set(&mut self, slot: Slot, value: impl Into<String>) {
        self.0.insert(slot, value.into());
    }

    /// Value for `slot`
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.0.get(&slot).map(String::as_str)
    }
}

/// A named template text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    text: String,
}

enum Piece<'a> {
    Text(&'a str),
    Slot(Slot),
}

impl Template {
    /// Create a template
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Template name, used in error messages
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw template text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Slots referenced by the template, in order of first appearance
    #[must_use]
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::new();
        for piece in self.pieces() {
            if let Piece::Slot(slot) = piece {
                if !slots.contains(&slot) {
                    slots.push(slot);
                }
            }
        }
        slots
    }

    /// Fill every slot marker with its value
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnfilledSlot`] if the template references a slot
    /// that has no value in `substitutions`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use resource_gen::scaffold::templates::{Slot, Substitutions, Template};
    /// let template = Template::new("route", "Route::resource('{{route}}', '{{controller}}');");
    /// let rendered = template
    ///     .render(
    ///         &Substitutions::new()
    ///             .with(Slot::Route, "animals")
    ///             .with(Slot::Controller, "AnimalController"),
    ///     )
    ///     .unwrap();
    /// assert_eq!(rendered, "Route::resource('animals', 'AnimalController');");
    /// ```
    pub fn render(&self, substitutions: &Substitutions) -> Result<String, TemplateError> {
        let mut output = String::with_capacity(self.text.len());
        for piece in self.pieces() {
            match piece {
                Piece::Text(text) => output.push_str(text),
                Piece::Slot(slot) => {
                    let value = substitutions.get(slot).ok_or_else(|| TemplateError::UnfilledSlot {
                        template: self.name.clone(),
                        slot,
                    })?;
                    output.push_str(value);
                }
            }
        }
        Ok(output)
    }

    fn pieces(&self) -> Vec<Piece<'_>> {
        let mut pieces = Vec::new();
        let mut rest = self.text.as_str();

        while let Some(open) = rest.find("{{") {
            let after_open = &rest[open + 2..];
            let slot = after_open
                .find("}}")
                .and_then(|close| Slot::from_name(&after_open[..close]).map(|slot| (slot, close)));

            if let Some((slot, close)) = slot {
                if open > 0 {
                    pieces.push(Piece::Text(&rest[..open]));
                }
                pieces.push(Piece::Slot(slot));
                rest = &after_open[close + 2..];
            } else {
                // Not a slot marker: keep the braces and continue after them
                pieces.push(Piece::Text(&rest[..open + 2]));
                rest = after_open;
            }
        }

        if !rest.is_empty() {
            pieces.push(Piece::Text(rest));
        }
        pieces
    }
}
