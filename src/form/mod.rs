//! Form model derived from schema metadata
//!
//! The schema databank describes an object type through OWL restrictions.
//! Each restricted property becomes a `PropertySpec`, ordered by weight, and
//! is merged with the artifact's existing values into typed form fields.

pub mod field;
pub mod search;

pub use field::{build_form, FieldControl, Form, FormField};

use crate::rdf::vocab;
use crate::rdf::{iri, var, Bindings, Databank, NamedNodeRef, TermExt};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Weight given to properties whose schema declares none; sorts them last
pub const DEFAULT_WEIGHT: i64 = 99;

/// How many values a property takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    ExactlyOne,
    OneOrMany,
    ZeroOrMany,
}

impl Cardinality {
    const IRIS: [(NamedNodeRef<'static>, Cardinality); 3] = [
        (vocab::CARD_EXACTLY_ONE, Cardinality::ExactlyOne),
        (vocab::CARD_ONE_OR_MANY, Cardinality::OneOrMany),
        (vocab::CARD_ZERO_OR_MANY, Cardinality::ZeroOrMany),
    ];

    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::IRIS
            .into_iter()
            .find(|(node, _)| node.as_str() == iri)
            .map(|(_, cardinality)| cardinality)
    }

    pub fn is_required(self) -> bool {
        matches!(self, Cardinality::ExactlyOne | Cardinality::OneOrMany)
    }

    /// Whether more values can be added beside the first
    pub fn is_repeatable(self) -> bool {
        matches!(self, Cardinality::OneOrMany | Cardinality::ZeroOrMany)
    }
}

/// Form control selected for a property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayType {
    ShortText,
    LongText,
    DropDown,
    CheckBox,
    Table,
    AutoComplete,
}

impl DisplayType {
    const IRIS: [(NamedNodeRef<'static>, DisplayType); 6] = [
        (vocab::DISPLAY_SHORT_TEXT, DisplayType::ShortText),
        (vocab::DISPLAY_LONG_TEXT, DisplayType::LongText),
        (vocab::DISPLAY_DROP_DOWN, DisplayType::DropDown),
        (vocab::DISPLAY_CHECK_BOX, DisplayType::CheckBox),
        (vocab::DISPLAY_TABLE, DisplayType::Table),
        (vocab::DISPLAY_AUTO_COMPLETE, DisplayType::AutoComplete),
    ];

    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::IRIS
            .into_iter()
            .find(|(node, _)| node.as_str() == iri)
            .map(|(_, display_type)| display_type)
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayType::ShortText => write!(f, "short text"),
            DisplayType::LongText => write!(f, "long text"),
            DisplayType::DropDown => write!(f, "drop-down"),
            DisplayType::CheckBox => write!(f, "checkbox"),
            DisplayType::Table => write!(f, "table"),
            DisplayType::AutoComplete => write!(f, "autocomplete"),
        }
    }
}

/// One property of an object type, as described by the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    pub property_uri: String,
    /// `rdfs:label`, or the property URI when the schema has none
    pub label: String,
    pub weight: i64,
    pub cardinality: Option<Cardinality>,
    pub display_type: Option<DisplayType>,
}

impl PropertySpec {
    pub fn is_required(&self) -> bool {
        self.cardinality.is_some_and(Cardinality::is_required)
    }

    pub fn is_repeatable(&self) -> bool {
        self.cardinality.is_some_and(Cardinality::is_repeatable)
    }

    fn from_binding(binding: &Bindings) -> Option<Self> {
        let property_uri = binding.get("property")?.value().to_string();

        let label = match binding.get("label") {
            Some(label) => label.value().to_string(),
            None => {
                debug!("no label for property {}", property_uri);
                property_uri.clone()
            }
        };

        let weight = binding
            .get("weight")
            .and_then(|w| w.value().trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_WEIGHT);

        let display_type = binding
            .get("displayType")
            .and_then(|t| DisplayType::from_iri(t.value()));
        let cardinality = binding
            .get("cardinality")
            .and_then(|c| Cardinality::from_iri(c.value()));

        Some(Self {
            property_uri,
            label,
            weight,
            cardinality,
            display_type,
        })
    }
}

/// Properties restricted on `object_type_uri`, ordered by weight then label.
///
/// OWL often states the same restriction several ways; only the first
/// description of each property is kept.
pub fn property_list(schema: &Databank, object_type_uri: &str) -> Vec<PropertySpec> {
    let object_type = iri(object_type_uri);
    let bindings = schema
        .query()
        .matching(&object_type, vocab::RDF_TYPE, vocab::OWL_CLASS)
        .matching(&object_type, vocab::RDFS_SUB_CLASS_OF, var("restriction"))
        .matching(var("restriction"), vocab::RDF_TYPE, vocab::OWL_RESTRICTION)
        .matching(var("restriction"), vocab::OWL_ON_PROPERTY, var("property"))
        .optional(var("property"), vocab::RDFS_LABEL, var("label"))
        .optional(var("property"), vocab::PODD_HAS_DISPLAY_TYPE, var("displayType"))
        .optional(var("property"), vocab::PODD_HAS_CARDINALITY, var("cardinality"))
        .optional(var("property"), vocab::PODD_WEIGHT, var("weight"))
        .select();

    let mut seen = HashSet::new();
    let mut properties = Vec::new();
    for binding in &bindings {
        let Some(spec) = PropertySpec::from_binding(binding) else {
            continue;
        };
        if seen.insert(spec.property_uri.clone()) {
            properties.push(spec);
        } else {
            debug!("duplicate property found: {}", spec.property_uri);
        }
    }

    properties.sort_by(|a, b| a.weight.cmp(&b.weight).then_with(|| a.label.cmp(&b.label)));
    properties
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::rdf::{literal, BlankNode, Literal, Triple};

    pub(crate) const PROJECT: &str = "http://purl.org/podd/ns/poddScience#Project";

    /// Schema fragment: `PROJECT` restricted on `property` with optional annotations
    pub(crate) fn add_restriction(
        schema: &mut Databank,
        restriction: &str,
        property: &str,
        label: Option<&str>,
        display: Option<NamedNodeRef<'_>>,
        cardinality: Option<NamedNodeRef<'_>>,
        weight: Option<&str>,
    ) {
        let class = iri(PROJECT);
        let r = BlankNode::new_unchecked(restriction);
        let p = iri(property);
        schema.add(Triple::new(class.clone(), vocab::RDF_TYPE, vocab::OWL_CLASS));
        schema.add(Triple::new(class, vocab::RDFS_SUB_CLASS_OF, r.clone()));
        schema.add(Triple::new(r.clone(), vocab::RDF_TYPE, vocab::OWL_RESTRICTION));
        schema.add(Triple::new(r, vocab::OWL_ON_PROPERTY, p.clone()));
        if let Some(label) = label {
            schema.add(Triple::new(p.clone(), vocab::RDFS_LABEL, literal(label)));
        }
        if let Some(display) = display {
            schema.add(Triple::new(p.clone(), vocab::PODD_HAS_DISPLAY_TYPE, display));
        }
        if let Some(cardinality) = cardinality {
            schema.add(Triple::new(p.clone(), vocab::PODD_HAS_CARDINALITY, cardinality));
        }
        if let Some(weight) = weight {
            let weight = Literal::new_typed_literal(weight, vocab::XSD_INT);
            schema.add(Triple::new(p, vocab::PODD_WEIGHT, weight));
        }
    }

    #[test]
    fn test_property_list_reads_annotations() {
        let mut schema = Databank::new();
        add_restriction(
            &mut schema,
            "r1",
            "http://ex/hasName",
            Some("Name"),
            Some(vocab::DISPLAY_SHORT_TEXT),
            Some(vocab::CARD_EXACTLY_ONE),
            Some("1"),
        );

        let properties = property_list(&schema, PROJECT);
        assert_eq!(
            properties,
            vec![PropertySpec {
                property_uri: "http://ex/hasName".to_string(),
                label: "Name".to_string(),
                weight: 1,
                cardinality: Some(Cardinality::ExactlyOne),
                display_type: Some(DisplayType::ShortText),
            }]
        );
        assert!(properties[0].is_required());
        assert!(!properties[0].is_repeatable());
    }

    #[test]
    fn test_property_list_defaults() {
        let mut schema = Databank::new();
        add_restriction(&mut schema, "r1", "http://ex/hasThing", None, None, None, None);

        let properties = property_list(&schema, PROJECT);
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].label, "http://ex/hasThing");
        assert_eq!(properties[0].weight, DEFAULT_WEIGHT);
        assert_eq!(properties[0].display_type, None);
        assert_eq!(properties[0].cardinality, None);
        assert!(!properties[0].is_required());
    }

    #[test]
    fn test_property_list_order_and_dedup() {
        let mut schema = Databank::new();
        add_restriction(&mut schema, "r1", "http://ex/c", Some("Charlie"), None, None, Some("5"));
        add_restriction(&mut schema, "r2", "http://ex/b", Some("Bravo"), None, None, Some("2"));
        add_restriction(&mut schema, "r3", "http://ex/a", Some("Alpha"), None, None, Some("5"));
        add_restriction(&mut schema, "r4", "http://ex/z", Some("Zulu"), None, None, None);
        // second restriction on an existing property
        add_restriction(&mut schema, "r5", "http://ex/b", None, None, None, None);

        let labels: Vec<_> = property_list(&schema, PROJECT)
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, vec!["Bravo", "Alpha", "Charlie", "Zulu"]);
    }

    #[test]
    fn test_property_list_other_class_is_empty() {
        let mut schema = Databank::new();
        add_restriction(&mut schema, "r1", "http://ex/a", None, None, None, None);
        assert!(property_list(&schema, "http://ex/Other").is_empty());
    }

    #[test]
    fn test_cardinality_flags() {
        assert!(Cardinality::OneOrMany.is_required());
        assert!(Cardinality::OneOrMany.is_repeatable());
        assert!(!Cardinality::ZeroOrMany.is_required());
        assert_eq!(Cardinality::from_iri("http://ex/unknown"), None);
        assert_eq!(
            Cardinality::from_iri(vocab::CARD_ZERO_OR_MANY.as_str()),
            Some(Cardinality::ZeroOrMany)
        );
        assert_eq!(
            DisplayType::from_iri(vocab::DISPLAY_AUTO_COMPLETE.as_str()),
            Some(DisplayType::AutoComplete)
        );
    }
}
