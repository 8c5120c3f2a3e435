//! Attribute mini-language parser
//!
//! Attributes are passed to the generator as a single string. Each attribute is a
//! name optionally followed by `:` and a comma-separated list of property tokens,
//! and attributes are separated by `|`.
//!
//! # Grammar
//!
//! ```text
//! attributes := attribute ("|" attribute)*
//! attribute  := name [":" property ("," property)*]
//! ```
//!
//! Property tokens are not interpreted here. The same token list is read by the
//! column builder (types, lengths, `unsigned`/`index`/`nullable`) and by the model
//! generator (`fillable`/`hidden`), each keeping only the tokens it understands.
//!
//! # Examples
//!
//! ```text
//! name:string,100               → name  => [string, 100]
//! age:integer,unsigned,index    → age   => [integer, unsigned, index]
//! nickname                      → nickname => []
//! ```
//!
//! Parsing never fails. Empty segments are skipped, empty tokens are dropped, and a
//! repeated name replaces the properties of its first occurrence while keeping that
//! first position.

use indexmap::IndexMap;
use std::fmt;

/// A single named attribute with its raw property tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Attribute (column) name, case-sensitive
    pub name: String,
    /// Property tokens in input order
    pub properties: Vec<String>,
}

impl AttributeSpec {
    /// Create an attribute from a name and its property tokens
    pub fn new<I, S>(name: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the property list contains `token` literally
    #[must_use]
    pub fn has_property(&self, token: &str) -> bool {
        self.properties.iter().any(|p| p == token)
    }
}

impl fmt::Display for AttributeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.properties.is_empty() {
            write!(f, ":{}", self.properties.join(","))?;
        }
        Ok(())
    }
}

/// Model-level tag carried as a property token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Mass-assignable attribute (`$fillable`)
    Fillable,
    /// Attribute hidden from serialisation (`$hidden`)
    Hidden,
}

impl Tag {
    /// The literal property token for this tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fillable => "fillable",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insertion-ordered mapping of attribute name to property tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(IndexMap<String, Vec<String>>);

impl Attributes {
    /// Parse an attribute string
    ///
    /// # Examples
    ///
    /// ```
    /// # use resource_gen::scaffold::attributes::Attributes;
    /// let attributes = Attributes::parse("name:string,100|nickname");
    /// assert_eq!(attributes.get("name"), Some(&["string".to_string(), "100".to_string()][..]));
    /// assert_eq!(attributes.get("nickname"), Some(&[][..]));
    ///
    /// assert!(Attributes::parse("").is_empty());
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut map = IndexMap::new();

        for segment in input.split('|') {
            let (name, properties) = match segment.split_once(':') {
                Some((name, properties)) => (name.trim(), Some(properties)),
                None => (segment.trim(), None),
            };

            if name.is_empty() {
                if !segment.trim().is_empty() {
                    tracing::debug!(segment, "skipping attribute segment without a name");
                }
                continue;
            }

            let properties: Vec<String> = properties
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|token| !token.is_empty())
                        .map(ToString::to_string)
                        .collect()
                })
                .unwrap_or_default();

            map.insert(name.to_string(), properties);
        }

        Self(map)
    }

    /// Property tokens for `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Number of attributes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no attributes were given
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Attribute names in input order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(name, properties)` pairs in input order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Names whose property list contains `tag`, in input order
    ///
    /// # Examples
    ///
    /// ```
    /// # use resource_gen::scaffold::attributes::{Attributes, Tag};
    /// let attributes = Attributes::parse("name:string,fillable|age:integer,hidden|nickname");
    /// assert_eq!(attributes.select_by_tag(Tag::Fillable), vec!["name"]);
    /// assert_eq!(attributes.select_by_tag(Tag::Hidden), vec!["age"]);
    /// ```
    #[must_use]
    pub fn select_by_tag(&self, tag: Tag) -> Vec<&str> {
        self.iter()
            .filter(|(_, properties)| properties.iter().any(|p| p == tag.as_str()))
            .map(|(name, _)| name)
            .collect()
    }

    /// Convert to an ordered list of [`AttributeSpec`]
    #[must_use]
    pub fn to_specs(&self) -> Vec<AttributeSpec> {
        self.iter()
            .map(|(name, properties)| AttributeSpec::new(name, properties.iter().cloned()))
            .collect()
    }

    /// Render as the PHP array literal returned by the generated model's
    /// `migrationAttributes()` method
    ///
    /// # Examples
    ///
    /// ```
    /// # use resource_gen::scaffold::attributes::Attributes;
    /// let php = Attributes::parse("name:string,100|nickname").to_php_array();
    /// assert_eq!(
    ///     php,
    ///     "[['name' => 'name','properties' => ['string', '100']],['name' => 'nickname','properties' => []]]"
    /// );
    /// ```
    #[must_use]
    pub fn to_php_array(&self) -> String {
        let entries: Vec<String> = self
            .iter()
            .map(|(name, properties)| {
                format!(
                    "['name' => '{}','properties' => {}]",
                    php_escape(name),
                    php_string_list(properties)
                )
            })
            .collect();

        format!("[{}]", entries.join(","))
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, spec) in self.to_specs().iter().enumerate() {
            if idx > 0 {
                f.write_str("|")?;
            }
            write!(f, "{spec}")?;
        }
        Ok(())
    }
}

impl From<&[AttributeSpec]> for Attributes {
    fn from(specs: &[AttributeSpec]) -> Self {
        Self(
            specs
                .iter()
                .map(|spec| (spec.name.clone(), spec.properties.clone()))
                .collect(),
        )
    }
}

/// Names of `attributes` tagged with `tag`, in input order
#[must_use]
pub fn select_by_tag(attributes: &[AttributeSpec], tag: Tag) -> Vec<&str> {
    attributes
        .iter()
        .filter(|spec| spec.has_property(tag.as_str()))
        .map(|spec| spec.name.as_str())
        .collect()
}

/// Render a list of strings as a single-quoted PHP array, e.g. `['name', 'age']`
///
/// # Examples
///
/// ```
/// # use resource_gen::scaffold::attributes::php_string_list;
/// assert_eq!(php_string_list(&["name", "age"]), "['name', 'age']");
/// assert_eq!(php_string_list::<&str>(&[]), "[]");
/// ```
#[must_use]
pub fn php_string_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("'{}'", php_escape(item.as_ref())))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Escape a value for a single-quoted PHP string
pub(crate) fn php_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// The parsed form of one generator invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// Resource (model) name as typed by the operator
    pub resource_name: String,
    /// Attributes in input order, names unique
    pub attributes: Vec<AttributeSpec>,
}

impl ParsedRequest {
    /// Build a request from the resource name and optional attribute string
    pub fn new(resource_name: impl Into<String>, attributes: Option<&str>) -> Self {
        let attributes = attributes.map(Attributes::parse).unwrap_or_default();
        Self {
            resource_name: resource_name.into(),
            attributes: attributes.to_specs(),
        }
    }

    /// Names tagged with `tag`, in input order
    #[must_use]
    pub fn select_by_tag(&self, tag: Tag) -> Vec<&str> {
        select_by_tag(&self.attributes, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn props(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_pipe_separated_attributes() {
        let attributes = Attributes::parse(
            "name:string,100|age:integer,unsigned,index|colour:string,20,nullable|nickname",
        );

        let parsed: Vec<(&str, &[String])> = attributes.iter().collect();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0], ("name", &props(&["string", "100"])[..]));
        assert_eq!(parsed[1], ("age", &props(&["integer", "unsigned", "index"])[..]));
        assert_eq!(parsed[2], ("colour", &props(&["string", "20", "nullable"])[..]));
        assert_eq!(parsed[3], ("nickname", &[][..]));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(Attributes::parse("").is_empty());
        assert!(Attributes::parse("   ").is_empty());
        assert!(ParsedRequest::new("Animal", None).attributes.is_empty());
        assert!(ParsedRequest::new("Animal", Some("")).attributes.is_empty());
    }

    #[test]
    fn test_parse_skips_empty_segments_and_tokens() {
        let attributes = Attributes::parse("a:string,,100||:integer| b ");
        let names: Vec<&str> = attributes.names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(attributes.get("a"), Some(&props(&["string", "100"])[..]));
        assert_eq!(attributes.get("b"), Some(&[][..]));
    }

    #[test]
    fn test_parse_duplicate_name_last_wins_first_position() {
        let attributes = Attributes::parse("a:string|b:integer|a:text,nullable");
        let names: Vec<&str> = attributes.names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(attributes.get("a"), Some(&props(&["text", "nullable"])[..]));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let attributes = Attributes::parse("Name:string|name:text");
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes.get("Name"), Some(&props(&["string"])[..]));
    }

    #[test]
    fn test_parse_keeps_unknown_tokens_verbatim() {
        let attributes = Attributes::parse("slug:string,unique,ref:users");
        assert_eq!(
            attributes.get("slug"),
            Some(&props(&["string", "unique", "ref:users"])[..])
        );
    }

    #[test]
    fn test_select_fillable() {
        let attributes =
            Attributes::parse("name:string,100,fillable|age:integer,fillable|colour:string|nickname");
        assert_eq!(attributes.select_by_tag(Tag::Fillable), vec!["name", "age"]);
    }

    #[test]
    fn test_select_hidden() {
        let request = ParsedRequest::new(
            "Animal",
            Some("name:string,100,fillable|age:integer,hidden|colour:string,hidden|nickname"),
        );
        assert_eq!(request.select_by_tag(Tag::Hidden), vec!["age", "colour"]);
    }

    #[test]
    fn test_select_without_matches() {
        let attributes = Attributes::parse("name:string|age:integer");
        assert!(attributes.select_by_tag(Tag::Hidden).is_empty());
    }

    #[test]
    fn test_tag_must_be_whole_token() {
        let attributes = Attributes::parse("secret:string,hiddenish|fill:fillable_later");
        assert!(attributes.select_by_tag(Tag::Hidden).is_empty());
        assert!(attributes.select_by_tag(Tag::Fillable).is_empty());
    }

    #[test]
    fn test_php_array() {
        let attributes = Attributes::parse("name:string,100|nickname");
        assert_eq!(
            attributes.to_php_array(),
            "[['name' => 'name','properties' => ['string', '100']],['name' => 'nickname','properties' => []]]"
        );
        assert_eq!(Attributes::default().to_php_array(), "[]");
    }

    #[test]
    fn test_php_escaping() {
        assert_eq!(php_string_list(&["o'neil"]), r"['o\'neil']");
    }

    #[test]
    fn test_specs_roundtrip_through_from() {
        let specs = vec![
            AttributeSpec::new("name", ["string", "100"]),
            AttributeSpec::new("nickname", Vec::<String>::new()),
        ];
        let attributes = Attributes::from(&specs[..]);
        assert_eq!(attributes.to_specs(), specs);
        assert_eq!(attributes.to_string(), "name:string,100|nickname");
    }

    fn attribute_list() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
        prop::collection::vec(
            (
                "[a-z][a-z0-9_]{0,8}",
                prop::collection::vec("[A-Za-z0-9]{1,8}", 0..4),
            ),
            0..6,
        )
        .prop_map(|entries| {
            let mut seen = std::collections::HashSet::new();
            entries
                .into_iter()
                .filter(|(name, _)| seen.insert(name.clone()))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_parse_then_serialize_roundtrips(entries in attribute_list()) {
            let input = entries
                .iter()
                .map(|(name, properties)| {
                    if properties.is_empty() {
                        name.clone()
                    } else {
                        format!("{name}:{}", properties.join(","))
                    }
                })
                .collect::<Vec<_>>()
                .join("|");

            let attributes = Attributes::parse(&input);
            prop_assert_eq!(attributes.to_string(), input);

            let specs = attributes.to_specs();
            prop_assert_eq!(specs.len(), entries.len());
            for (spec, (name, properties)) in specs.iter().zip(&entries) {
                prop_assert_eq!(&spec.name, name);
                prop_assert_eq!(&spec.properties, properties);
            }
        }
    }
}
