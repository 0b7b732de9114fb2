use serde::Serialize;
use std::collections::BTreeMap;

/// Name of the identity field shared by records and filter rules.
pub const ID_FIELD: &str = "id";

/// An untyped field map, as delivered by bootstrap or incremental data.
pub type Fields = BTreeMap<String, String>;

/// Field name to expected (case-insensitive) substring.
pub type Criteria = BTreeMap<String, String>;

/// A single entry of the filterable list.
///
/// Fields are looked up by name; a field that was never delivered is absent,
/// which is distinct from an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    id: String,
    #[serde(flatten)]
    fields: Fields,
}

impl Record {
    /// Builds a record from an input map. Returns `None` when the map has no usable `id`.
    pub fn from_fields(mut fields: Fields) -> Option<Self> {
        let id = fields.remove(ID_FIELD)?;
        if id.is_empty() {
            return None;
        }
        Some(Self { id, fields })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Value of `field`, or `None` if the record does not carry it.
    pub fn get(&self, field: &str) -> Option<&str> {
        if field == ID_FIELD {
            return Some(&self.id);
        }
        self.fields.get(field).map(String::as_str)
    }

    /// Non-identity fields.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub(crate) fn into_fields(self) -> Fields {
        self.fields
    }

    /// Overwrites the fields present in `incoming`, keeping the ones it omits.
    /// Returns whether anything changed.
    pub(crate) fn merge(&mut self, incoming: Fields) -> bool {
        let mut changed = false;
        for (key, value) in incoming {
            if key == ID_FIELD {
                continue;
            }
            if self.fields.get(&key) != Some(&value) {
                self.fields.insert(key, value);
                changed = true;
            }
        }
        changed
    }
}

/// A named, togglable set of field-substring criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterRule {
    pub id: String,
    pub label: String,
    pub criteria: Criteria,
    pub enabled: bool,
    pub order: i64,
}

/// Filter rule input. Everything but `id` has a default; a draft without `id`
/// is rejected by the store. `None` attributes leave an existing rule's value
/// untouched on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRuleDraft {
    pub id: Option<String>,
    pub label: Option<String>,
    pub criteria: Option<Criteria>,
    pub enabled: Option<bool>,
    pub order: Option<i64>,
}

impl FilterRuleDraft {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn criterion(mut self, field: impl Into<String>, expected: impl Into<String>) -> Self {
        self.criteria
            .get_or_insert_with(Criteria::new)
            .insert(field.into(), expected.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}
