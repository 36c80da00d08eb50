use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The parameters a tool accepts, in the JSON Schema shape the model
/// providers expect:
///
/// ```json
/// {
///   "type": "object",
///   "properties": { "topic": { "type": "string", "description": "..." } },
///   "required": ["topic"]
/// }
/// ```
///
/// Keywords other than `type`, `properties` and `required` at the top
/// level (e.g. `$schema`, `title`) are dropped when parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    kind: ObjectType,
    /// Parameters keyed by name.
    #[serde(default)]
    pub properties: BTreeMap<String, ParameterSchema>,
    /// Names of the parameters that must be present.
    #[serde(default)]
    pub required: Vec<String>,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
enum ObjectType {
    #[default]
    Object,
}

/// Describes one parameter of a tool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// The primitive type of the parameter.
    #[serde(rename = "type")]
    pub kind: ParameterType,
    /// A human-readable description for the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Other JSON Schema keywords (`enum`, `format`, `items`, ...), kept
    /// verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// JSON types a parameter may declare.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum ParameterType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl InputSchema {
    /// Creates a schema without parameters.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON Schema object, such as the output of a schema
    /// generator.
    #[inline]
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Adds a parameter.
    pub fn with_parameter<N, D>(
        mut self,
        name: N,
        kind: ParameterType,
        description: D,
        required: bool,
    ) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        let name = name.into();
        if required && !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        self.properties.insert(
            name,
            ParameterSchema {
                kind,
                description: Some(description.into()),
                extra: Map::new(),
            },
        );
        self
    }

    /// Returns the schema of a parameter.
    #[inline]
    pub fn parameter(&self, name: &str) -> Option<&ParameterSchema> {
        self.properties.get(name)
    }

    /// Returns the required parameters that are absent (or `null`) in
    /// `arguments`, in declaration order.
    pub fn missing_required<'a>(
        &'a self,
        arguments: &Map<String, Value>,
    ) -> Vec<&'a str> {
        self.required
            .iter()
            .filter(|name| {
                arguments.get(name.as_str()).is_none_or(Value::is_null)
            })
            .map(String::as_str)
            .collect()
    }

    /// Converts the schema to a JSON value.
    #[inline]
    pub fn to_value(&self) -> Value {
        // A map of strings and plain enums always serializes.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
