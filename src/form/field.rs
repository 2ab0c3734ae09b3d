//! Typed form fields and the edits they produce

use super::search::{autocomplete_search_types, drop_down_options, SearchResult};
use super::{property_list, DisplayType, PropertySpec};
use crate::changeset::{build_field_changeset, build_uri_changeset, Changeset};
use crate::rdf::vocab;
use crate::rdf::{iri, var, Databank, Term, TermExt};
use crate::session::Identity;
use std::fmt;
use tracing::debug;

/// The control shown for a field, carrying only what that control needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldControl {
    ShortText {
        value: String,
    },
    LongText {
        value: String,
    },
    DropDown {
        options: Vec<SearchResult>,
        selected: Option<String>,
    },
    CheckBox {
        value_uri: String,
        label: String,
    },
    /// Rendered as a placeholder, not editable
    Table,
    AutoComplete {
        label: String,
        value_uri: String,
        search_types: Vec<String>,
    },
    /// Property without a known display type
    Unsupported,
}

/// One editable value of one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub property: PropertySpec,
    /// No value for this field exists in the artifact yet
    pub is_new: bool,
    pub control: FieldControl,
}

impl FormField {
    fn new(
        property: &PropertySpec,
        value: Option<&Term>,
        schema: &Databank,
        is_new: bool,
    ) -> Self {
        let display_value = value.map(|v| v.value().to_string()).unwrap_or_default();
        let value_uri = value
            .and_then(|v| v.as_iri())
            .map(str::to_string)
            .unwrap_or_default();

        let control = match property.display_type {
            Some(DisplayType::ShortText) => FieldControl::ShortText {
                value: display_value,
            },
            Some(DisplayType::LongText) => FieldControl::LongText {
                value: display_value,
            },
            Some(DisplayType::DropDown) => FieldControl::DropDown {
                options: drop_down_options(schema, &property.property_uri),
                selected: Some(value_uri).filter(|v| !v.is_empty()),
            },
            Some(DisplayType::CheckBox) => FieldControl::CheckBox {
                value_uri,
                label: display_value,
            },
            Some(DisplayType::Table) => FieldControl::Table,
            Some(DisplayType::AutoComplete) => FieldControl::AutoComplete {
                label: display_value,
                value_uri,
                search_types: autocomplete_search_types(schema, &property.property_uri),
            },
            None => FieldControl::Unsupported,
        };

        Self {
            property: property.clone(),
            is_new,
            control,
        }
    }

    /// Empty copy of this field, for adding another value
    fn blank(&self) -> Self {
        let control = match &self.control {
            FieldControl::ShortText { .. } => FieldControl::ShortText {
                value: String::new(),
            },
            FieldControl::LongText { .. } => FieldControl::LongText {
                value: String::new(),
            },
            FieldControl::DropDown { options, .. } => FieldControl::DropDown {
                options: options.clone(),
                selected: None,
            },
            FieldControl::CheckBox { .. } => FieldControl::CheckBox {
                value_uri: String::new(),
                label: String::new(),
            },
            FieldControl::AutoComplete { search_types, .. } => FieldControl::AutoComplete {
                label: String::new(),
                value_uri: String::new(),
                search_types: search_types.clone(),
            },
            other => other.clone(),
        };
        Self {
            property: self.property.clone(),
            is_new: true,
            control,
        }
    }

    /// The value an edit is compared against
    pub fn value(&self) -> &str {
        match &self.control {
            FieldControl::ShortText { value } | FieldControl::LongText { value } => value,
            FieldControl::DropDown { selected, .. } => selected.as_deref().unwrap_or(""),
            FieldControl::CheckBox { value_uri, .. }
            | FieldControl::AutoComplete { value_uri, .. } => value_uri,
            FieldControl::Table | FieldControl::Unsupported => "",
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(
            self.control,
            FieldControl::ShortText { .. }
                | FieldControl::LongText { .. }
                | FieldControl::DropDown { .. }
                | FieldControl::AutoComplete { .. }
        )
    }

    /// Change the field to `new_value` and return the matching changeset.
    ///
    /// Text fields produce string literals, drop-down and autocomplete
    /// fields produce IRIs. After a real change the new value becomes the
    /// field's original value and the field is no longer new, so a second
    /// edit removes the first one's triple. Unchanged values and read-only
    /// controls give an empty changeset.
    ///
    /// Known limitation: text fields only keep the lexical form of the
    /// stored value. When that value is language-tagged or has a datatype
    /// other than `xsd:string`, the old triple is built as a plain literal,
    /// does not match, and the stored value stays beside the new one.
    pub fn edit(&mut self, object_uri: &str, new_value: &str) -> Changeset {
        let property_uri = self.property.property_uri.clone();
        let changeset = match &mut self.control {
            FieldControl::ShortText { value } | FieldControl::LongText { value } => {
                let changeset =
                    build_field_changeset(object_uri, &property_uri, value, new_value, self.is_new);
                *value = new_value.to_string();
                changeset
            }
            FieldControl::DropDown { selected, .. } => {
                let old = selected.clone().unwrap_or_default();
                let changeset =
                    build_uri_changeset(object_uri, &property_uri, &old, new_value, self.is_new);
                *selected = Some(new_value.to_string()).filter(|v| !v.is_empty());
                changeset
            }
            FieldControl::AutoComplete {
                label, value_uri, ..
            } => {
                let changeset =
                    build_uri_changeset(object_uri, &property_uri, value_uri, new_value, self.is_new);
                if *value_uri != new_value {
                    *label = new_value.to_string();
                }
                *value_uri = new_value.to_string();
                changeset
            }
            FieldControl::CheckBox { .. } | FieldControl::Table | FieldControl::Unsupported => {
                debug!("ignoring edit of read-only field {}", property_uri);
                return Changeset {
                    is_new: self.is_new,
                    object_uri: object_uri.to_string(),
                    ..Default::default()
                };
            }
        };

        if !changeset.is_empty() {
            self.is_new = false;
        }
        changeset
    }

    /// Autocomplete selection: record the chosen URI and show its label
    pub fn select(&mut self, object_uri: &str, choice: &SearchResult) -> Changeset {
        let changeset = self.edit(object_uri, &choice.value);
        if let FieldControl::AutoComplete { label, .. } = &mut self.control {
            *label = choice.label.clone();
        }
        changeset
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.property.label)?;
        if self.property.is_required() {
            write!(f, " *")?;
        }
        if self.property.is_repeatable() {
            write!(f, " (+)")?;
        }
        write!(f, ": ")?;
        match &self.control {
            FieldControl::ShortText { value } | FieldControl::LongText { value } => {
                write!(f, "{:?}", value)
            }
            FieldControl::DropDown { options, selected } => {
                let choices: Vec<String> = options
                    .iter()
                    .map(|o| {
                        if selected.as_deref() == Some(o.value.as_str()) {
                            format!("[{}]", o.label)
                        } else {
                            o.label.clone()
                        }
                    })
                    .collect();
                write!(f, "{{{}}}", choices.join(" | "))
            }
            FieldControl::CheckBox { value_uri, label } => {
                let mark = if value_uri.is_empty() { " " } else { "x" };
                write!(f, "[{}] {}", mark, label)
            }
            FieldControl::Table => write!(f, "<table>"),
            FieldControl::AutoComplete {
                label, value_uri, ..
            } => {
                if value_uri.is_empty() {
                    write!(f, "<search>")
                } else {
                    write!(f, "{} <{}>", label, value_uri)
                }
            }
            FieldControl::Unsupported => write!(f, "<unsupported>"),
        }
    }
}

/// All fields for one object, in property order
#[derive(Debug, Clone, Default)]
pub struct Form {
    pub object_uri: String,
    pub fields: Vec<FormField>,
    /// Notes for the user about properties that could not be shown
    pub messages: Vec<String>,
}

impl Form {
    pub fn fields_for<'a>(&'a self, property_uri: &'a str) -> impl Iterator<Item = &'a FormField> {
        self.fields
            .iter()
            .filter(move |f| f.property.property_uri == property_uri)
    }

    /// First field of the property, or the field whose label matches
    pub fn field_mut(&mut self, property: &str) -> Option<&mut FormField> {
        self.fields
            .iter_mut()
            .find(|f| f.property.property_uri == property || f.property.label == property)
    }

    /// Add an empty field for another value of a repeatable property, placed
    /// after that property's last field
    pub fn add_value(&mut self, property_uri: &str) -> Option<&mut FormField> {
        let last = self
            .fields
            .iter()
            .rposition(|f| f.property.property_uri == property_uri)?;
        if !self.fields[last].property.is_repeatable() {
            return None;
        }
        let blank = self.fields[last].blank();
        self.fields.insert(last + 1, blank);
        self.fields.get_mut(last + 1)
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<{}>", self.object_uri)?;
        for field in &self.fields {
            writeln!(f, "  {}", field)?;
        }
        Ok(())
    }
}

/// Merge schema metadata with the artifact's values for the current object.
///
/// Each property gets one field per existing value, or a single new empty
/// field when the object has no value for it. Values only count when the
/// object is typed with the identity's object type.
pub fn build_form(schema: &Databank, artifact: &Databank, identity: &Identity) -> Form {
    let object_uri = identity.current_object_uri().to_string();
    let object = iri(object_uri.as_str());
    let mut form = Form {
        object_uri: object_uri.clone(),
        ..Default::default()
    };

    for property in property_list(schema, &identity.object_type_uri) {
        let values = artifact
            .query()
            .matching(
                &object,
                vocab::RDF_TYPE,
                iri(identity.object_type_uri.as_str()),
            )
            .matching(&object, iri(property.property_uri.as_str()), var("value"))
            .select();

        let mut fields = Vec::new();
        if values.is_empty() {
            debug!("no existing values for <{}> <{}>", object_uri, property.property_uri);
            fields.push(FormField::new(&property, None, schema, true));
        } else {
            for binding in &values {
                fields.push(FormField::new(&property, binding.get("value"), schema, false));
            }
        }

        if property.display_type.is_none() {
            let shown: Vec<&str> = fields.iter().map(|f| f.value()).collect();
            form.messages.push(format!(
                "Unsupported property: {} ({})",
                property.property_uri,
                shown.join(", ")
            ));
        }
        form.fields.extend(fields);
    }

    form
}
