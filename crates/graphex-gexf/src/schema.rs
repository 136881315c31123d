//! Attribute declarations and type inference.

use indexmap::IndexMap;

use graphex_core::Scalar;

/// Which element kind an attribute table describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrClass {
    Node,
    Edge,
}

impl AttrClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttrClass::Node => "node",
            AttrClass::Edge => "edge",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "node" => Some(AttrClass::Node),
            "edge" => Some(AttrClass::Edge),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    Boolean,
    Long,
    Double,
    String,
}

impl AttrType {
    /// Type of a single value; nulls carry no type.
    pub fn of(value: &Scalar) -> Option<Self> {
        match value {
            Scalar::Null => None,
            Scalar::Bool(_) => Some(AttrType::Boolean),
            Scalar::Int(_) => Some(AttrType::Long),
            Scalar::Float(_) => Some(AttrType::Double),
            Scalar::Str(_) => Some(AttrType::String),
        }
    }

    /// Smallest type holding both. Integers widen to double, any other mix
    /// falls back to string.
    pub fn widen(self, other: AttrType) -> AttrType {
        match (self, other) {
            (a, b) if a == b => a,
            (AttrType::Long, AttrType::Double) | (AttrType::Double, AttrType::Long) => {
                AttrType::Double
            }
            _ => AttrType::String,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttrType::Boolean => "boolean",
            AttrType::Long => "long",
            AttrType::Double => "double",
            AttrType::String => "string",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "boolean" => Some(AttrType::Boolean),
            "integer" | "long" => Some(AttrType::Long),
            "float" | "double" => Some(AttrType::Double),
            "string" => Some(AttrType::String),
            _ => None,
        }
    }

    /// Parse attvalue text declared with this type.
    pub fn decode(&self, text: &str) -> Option<Scalar> {
        match self {
            AttrType::Boolean => text.parse().ok().map(Scalar::Bool),
            AttrType::Long => text.parse().ok().map(Scalar::Int),
            AttrType::Double => text.parse().ok().map(Scalar::Float),
            AttrType::String => Some(Scalar::Str(text.to_string())),
        }
    }
}

/// One `<attribute>` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub id: String,
    pub title: String,
    pub kind: AttrType,
}

/// Attribute table of one class, ids assigned in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct AttributeSchema {
    types: IndexMap<String, AttrType>,
}

impl AttributeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one value of `title`. Null values are skipped.
    pub fn observe(&mut self, title: &str, value: &Scalar) {
        let Some(kind) = AttrType::of(value) else {
            return;
        };
        match self.types.get_mut(title) {
            Some(current) => *current = current.widen(kind),
            None => {
                self.types.insert(title.to_string(), kind);
            }
        }
    }

    /// Declaration id for `title`.
    pub fn id_of(&self, title: &str) -> Option<usize> {
        self.types.get_index_of(title)
    }

    pub fn type_of(&self, title: &str) -> Option<AttrType> {
        self.types.get(title).copied()
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        self.types
            .iter()
            .enumerate()
            .map(|(id, (title, kind))| Attribute {
                id: id.to_string(),
                title: title.clone(),
                kind: *kind,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widening() {
        assert_eq!(AttrType::Long.widen(AttrType::Long), AttrType::Long);
        assert_eq!(AttrType::Long.widen(AttrType::Double), AttrType::Double);
        assert_eq!(AttrType::Double.widen(AttrType::Long), AttrType::Double);
        assert_eq!(AttrType::Boolean.widen(AttrType::Long), AttrType::String);
        assert_eq!(AttrType::String.widen(AttrType::Double), AttrType::String);
    }

    #[test]
    fn test_schema_observes_values() {
        let mut schema = AttributeSchema::new();
        schema.observe("age", &Scalar::Int(3));
        schema.observe("score", &Scalar::Float(0.5));
        schema.observe("age", &Scalar::Float(3.5));
        schema.observe("flag", &Scalar::Bool(true));
        schema.observe("flag", &Scalar::from("yes"));
        schema.observe("missing", &Scalar::Null);

        assert_eq!(schema.type_of("age"), Some(AttrType::Double));
        assert_eq!(schema.type_of("score"), Some(AttrType::Double));
        assert_eq!(schema.type_of("flag"), Some(AttrType::String));
        assert_eq!(schema.type_of("missing"), None);
        assert_eq!(schema.id_of("flag"), Some(2));
        assert_eq!(schema.attributes().len(), 3);
    }

    #[test]
    fn test_decode() {
        assert_eq!(AttrType::Long.decode("42"), Some(Scalar::Int(42)));
        assert_eq!(AttrType::Double.decode("2.0"), Some(Scalar::Float(2.0)));
        assert_eq!(AttrType::Boolean.decode("true"), Some(Scalar::Bool(true)));
        assert_eq!(AttrType::Long.decode("x"), None);
    }
}
