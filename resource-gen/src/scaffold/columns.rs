//! Schema column generation
//!
//! Turns attribute property tokens into Laravel schema-builder statements for the
//! generated migration. Each attribute produces exactly one column line, in input
//! order:
//!
//! ```text
//! name:string,100               → $table->string('name', 100);
//! age:integer,unsigned,index    → $table->integer('age')->unsigned()->index();
//! colour:string,nullable        → $table->string('colour')->nullable();
//! nickname                      → $table->string('nickname');
//! ```
//!
//! # Resolution rules
//!
//! - **Type**: the first token naming a known column type; `string` if none does.
//! - **Length**: for `string` and `char` only, the first all-digit token. Zero means
//!   no explicit length.
//! - **Traits**: `unsigned`, `index` and `nullable`, in the order they appear, each once.
//!
//! Every other token (`fillable`, `hidden`, typos) is ignored here.

use super::attributes::{php_escape, AttributeSpec};
use std::fmt;

/// Indentation of column statements inside the migration's `Schema::create` closure
pub const COLUMN_INDENT: &str = "            ";

/// Column types understood by the schema builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `VARCHAR`
    String,
    /// `INTEGER`
    Integer,
    /// `BOOLEAN`
    Boolean,
    /// Auto-incrementing `BIGINT` primary key
    BigIncrements,
    /// `BIGINT`
    BigInteger,
    /// `BLOB`
    Binary,
    /// `CHAR`
    Char,
    /// `DATE`
    Date,
    /// `DATETIME`
    DateTime,
    /// `FLOAT`
    Float,
    /// Auto-incrementing `INTEGER` primary key
    Increments,
    /// `JSON`
    Json,
    /// `JSONB`
    Jsonb,
    /// `LONGTEXT`
    LongText,
    /// `MEDIUMINT`
    MediumInteger,
    /// `MEDIUMTEXT`
    MediumText,
    /// Nullable `created_at`/`updated_at` pair
    NullableTimestamps,
    /// `SMALLINT`
    SmallInteger,
    /// `TINYINT`
    TinyInteger,
    /// `deleted_at` for soft deletes
    SoftDeletes,
    /// `TEXT`
    Text,
    /// `TIME`
    Time,
    /// `TIMESTAMP`
    Timestamp,
    /// `created_at`/`updated_at` pair
    Timestamps,
    /// `remember_token`
    RememberToken,
}

impl FieldType {
    /// Every known type, in the order they are documented
    pub const ALL: [Self; 25] = [
        Self::String,
        Self::Integer,
        Self::Boolean,
        Self::BigIncrements,
        Self::BigInteger,
        Self::Binary,
        Self::Char,
        Self::Date,
        Self::DateTime,
        Self::Float,
        Self::Increments,
        Self::Json,
        Self::Jsonb,
        Self::LongText,
        Self::MediumInteger,
        Self::MediumText,
        Self::NullableTimestamps,
        Self::SmallInteger,
        Self::TinyInteger,
        Self::SoftDeletes,
        Self::Text,
        Self::Time,
        Self::Timestamp,
        Self::Timestamps,
        Self::RememberToken,
    ];

    /// Schema-builder method name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::BigIncrements => "bigIncrements",
            Self::BigInteger => "bigInteger",
            Self::Binary => "binary",
            Self::Char => "char",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Float => "float",
            Self::Increments => "increments",
            Self::Json => "json",
            Self::Jsonb => "jsonb",
            Self::LongText => "longText",
            Self::MediumInteger => "mediumInteger",
            Self::MediumText => "mediumText",
            Self::NullableTimestamps => "nullableTimestamps",
            Self::SmallInteger => "smallInteger",
            Self::TinyInteger => "tinyInteger",
            Self::SoftDeletes => "softDeletes",
            Self::Text => "text",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Timestamps => "timestamps",
            Self::RememberToken => "rememberToken",
        }
    }

    /// Match a property token against the known types (case-sensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// # use resource_gen::scaffold::columns::FieldType;
    /// assert_eq!(FieldType::from_token("dateTime"), Some(FieldType::DateTime));
    /// assert_eq!(FieldType::from_token("datetime"), None);
    /// assert_eq!(FieldType::from_token("fillable"), None);
    /// ```
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == token)
    }

    /// Whether the type accepts an explicit length argument
    #[must_use]
    pub const fn accepts_length(self) -> bool {
        matches!(self, Self::String | Self::Char)
    }

    /// Faker formatter used to seed this column in a model factory
    ///
    /// Returns `None` for types that do not hold user data (keys, timestamps,
    /// soft-delete markers, remember tokens).
    #[must_use]
    pub const fn faker_formatter(self) -> Option<&'static str> {
        match self {
            Self::String | Self::Char | Self::Binary => Some("word"),
            Self::Text | Self::MediumText | Self::LongText => Some("paragraph"),
            Self::Integer
            | Self::BigInteger
            | Self::MediumInteger
            | Self::SmallInteger
            | Self::TinyInteger => Some("randomNumber()"),
            Self::Boolean => Some("boolean"),
            Self::Float => Some("randomFloat()"),
            Self::Date => Some("date()"),
            Self::DateTime | Self::Timestamp => Some("dateTime()"),
            Self::Time => Some("time()"),
            Self::Json | Self::Jsonb => Some("randomElements()"),
            Self::BigIncrements
            | Self::Increments
            | Self::NullableTimestamps
            | Self::SoftDeletes
            | Self::Timestamps
            | Self::RememberToken => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier chained onto a column statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnTrait {
    /// `->unsigned()`
    Unsigned,
    /// `->index()`
    Index,
    /// `->nullable()`
    Nullable,
}

impl ColumnTrait {
    /// Schema-builder modifier name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsigned => "unsigned",
            Self::Index => "index",
            Self::Nullable => "nullable",
        }
    }

    /// Match a property token against the allowed modifiers
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "unsigned" => Some(Self::Unsigned),
            "index" => Some(Self::Index),
            "nullable" => Some(Self::Nullable),
            _ => None,
        }
    }
}

/// A resolved migration column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column type
    pub field_type: FieldType,
    /// Column name
    pub name: String,
    /// Explicit length, only ever set for `string` and `char`
    pub length: Option<u32>,
    /// Modifiers in first-appearance order, without duplicates
    pub traits: Vec<ColumnTrait>,
}

impl ColumnSpec {
    /// Resolve the column for one attribute
    ///
    /// # Examples
    ///
    /// ```
    /// # use resource_gen::scaffold::attributes::AttributeSpec;
    /// # use resource_gen::scaffold::columns::{ColumnSpec, ColumnTrait, FieldType};
    /// let column = ColumnSpec::from_attribute(&AttributeSpec::new("age", ["integer", "unsigned", "index"]));
    /// assert_eq!(column.field_type, FieldType::Integer);
    /// assert_eq!(column.length, None);
    /// assert_eq!(column.traits, vec![ColumnTrait::Unsigned, ColumnTrait::Index]);
    /// ```
    #[must_use]
    pub fn from_attribute(attribute: &AttributeSpec) -> Self {
        let field_type = attribute
            .properties
            .iter()
            .find_map(|token| FieldType::from_token(token))
            .unwrap_or(FieldType::String);

        let length = if field_type.accepts_length() {
            attribute
                .properties
                .iter()
                .find(|token| is_numeric(token))
                .and_then(|token| match token.parse::<u32>() {
                    Ok(length) => Some(length),
                    Err(_) => {
                        tracing::debug!(
                            attribute = %attribute.name,
                            token = %token,
                            "ignoring column length out of range"
                        );
                        None
                    }
                })
                .filter(|length| *length > 0)
        } else {
            None
        };

        let mut traits = Vec::new();
        for column_trait in attribute
            .properties
            .iter()
            .filter_map(|token| ColumnTrait::from_token(token))
        {
            if !traits.contains(&column_trait) {
                traits.push(column_trait);
            }
        }

        Self {
            field_type,
            name: attribute.name.clone(),
            length,
            traits,
        }
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$table->{}('{}'", self.field_type, php_escape(&self.name))?;
        if let Some(length) = self.length {
            write!(f, ", {length}")?;
        }
        f.write_str(")")?;
        for column_trait in &self.traits {
            write!(f, "->{}()", column_trait.as_str())?;
        }
        f.write_str(";")
    }
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Build the column block for a migration
///
/// Lines are separated by a newline plus [`COLUMN_INDENT`] so the block lines up
/// when substituted into the migration body. Trailing whitespace is trimmed.
///
/// # Examples
///
/// ```
/// # use resource_gen::scaffold::attributes::AttributeSpec;
/// # use resource_gen::scaffold::columns::build_columns;
/// let columns = build_columns(&[
///     AttributeSpec::new("name", ["string", "100"]),
///     AttributeSpec::new("nickname", Vec::<String>::new()),
/// ]);
/// assert_eq!(
///     columns,
///     "$table->string('name', 100);\n            $table->string('nickname');"
/// );
/// ```
#[must_use]
pub fn build_columns(attributes: &[AttributeSpec]) -> String {
    let mut block = String::new();
    for attribute in attributes {
        let column = ColumnSpec::from_attribute(attribute);
        block.push_str(&column.to_string());
        block.push('\n');
        block.push_str(COLUMN_INDENT);
    }
    block.trim_end().to_string()
}

/// Build the attribute lines of a model factory definition
///
/// Attributes whose type holds no user data are skipped.
#[must_use]
pub fn build_factory_fields(attributes: &[AttributeSpec]) -> String {
    attributes
        .iter()
        .filter_map(|attribute| {
            let column = ColumnSpec::from_attribute(attribute);
            column
                .field_type
                .faker_formatter()
                .map(|formatter| format!("        '{}' => $faker->{formatter},", php_escape(&column.name)))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> Vec<AttributeSpec> {
        vec![
            AttributeSpec::new("name", ["string", "100", "fillable"]),
            AttributeSpec::new("age", ["integer", "unsigned", "index", "hidden"]),
            AttributeSpec::new("colour", ["string", "nullable", "hidden"]),
            AttributeSpec::new("nickname", Vec::<String>::new()),
        ]
    }

    #[test]
    fn test_build_table_columns() {
        let columns = build_columns(&attributes());
        let lines: Vec<&str> = columns.lines().map(str::trim).collect();
        assert_eq!(
            lines,
            vec![
                "$table->string('name', 100);",
                "$table->integer('age')->unsigned()->index();",
                "$table->string('colour')->nullable();",
                "$table->string('nickname');",
            ]
        );
    }

    #[test]
    fn test_columns_are_trimmed() {
        let columns = build_columns(&attributes());
        assert!(!columns.ends_with(char::is_whitespace));
        assert!(build_columns(&[]).is_empty());
    }

    #[test]
    fn test_first_type_wins() {
        let column = ColumnSpec::from_attribute(&AttributeSpec::new("bio", ["fillable", "text", "string"]));
        assert_eq!(column.field_type, FieldType::Text);
    }

    #[test]
    fn test_default_type_is_string() {
        let column = ColumnSpec::from_attribute(&AttributeSpec::new("misc", ["fillable", "bogus"]));
        assert_eq!(column.field_type, FieldType::String);
        assert_eq!(column.length, None);
        assert!(column.traits.is_empty());
    }

    #[test]
    fn test_length_only_for_string_and_char() {
        let code = ColumnSpec::from_attribute(&AttributeSpec::new("code", ["char", "3"]));
        assert_eq!(code.length, Some(3));
        assert_eq!(code.to_string(), "$table->char('code', 3);");

        let count = ColumnSpec::from_attribute(&AttributeSpec::new("count", ["integer", "11"]));
        assert_eq!(count.length, None);
        assert_eq!(count.to_string(), "$table->integer('count');");
    }

    #[test]
    fn test_length_defaults_when_type_missing() {
        let column = ColumnSpec::from_attribute(&AttributeSpec::new("title", ["150"]));
        assert_eq!(column.field_type, FieldType::String);
        assert_eq!(column.length, Some(150));
    }

    #[test]
    fn test_zero_and_non_numeric_lengths_ignored() {
        let zero = ColumnSpec::from_attribute(&AttributeSpec::new("a", ["string", "0"]));
        assert_eq!(zero.length, None);

        let mixed = ColumnSpec::from_attribute(&AttributeSpec::new("b", ["string", "10a", "-5", "42"]));
        assert_eq!(mixed.length, Some(42));
    }

    #[test]
    fn test_oversized_length_is_dropped() {
        let big = ColumnSpec::from_attribute(&AttributeSpec::new("big", ["string", "99999999999"]));
        assert_eq!(big.length, None);
        assert_eq!(big.to_string(), "$table->string('big');");
    }

    #[test]
    fn test_column_names_are_escaped() {
        let column = ColumnSpec::from_attribute(&AttributeSpec::new("o'neil", ["string"]));
        assert_eq!(column.to_string(), r"$table->string('o\'neil');");
        assert_eq!(
            build_factory_fields(&[AttributeSpec::new("o'neil", ["string"])]),
            r"        'o\'neil' => $faker->word,"
        );
    }

    #[test]
    fn test_traits_keep_order_without_duplicates() {
        let column = ColumnSpec::from_attribute(&AttributeSpec::new(
            "score",
            ["integer", "nullable", "unsigned", "nullable", "unique"],
        ));
        assert_eq!(column.traits, vec![ColumnTrait::Nullable, ColumnTrait::Unsigned]);
        assert_eq!(
            column.to_string(),
            "$table->integer('score')->nullable()->unsigned();"
        );
    }

    #[test]
    fn test_every_type_round_trips_through_token() {
        for ty in FieldType::ALL {
            assert_eq!(FieldType::from_token(ty.as_str()), Some(ty));
        }
    }

    #[test]
    fn test_factory_fields_skip_non_data_columns() {
        let fields = build_factory_fields(&[
            AttributeSpec::new("name", ["string", "100"]),
            AttributeSpec::new("age", ["integer"]),
            AttributeSpec::new("stamps", ["timestamps"]),
            AttributeSpec::new("active", ["boolean"]),
        ]);
        assert_eq!(
            fields,
            "        'name' => $faker->word,\n        'age' => $faker->randomNumber(),\n        'active' => $faker->boolean,"
        );
    }
}
