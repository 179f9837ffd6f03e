//! Record schema shared by the store, presenter, and import/export layers.
//!
//! The field list is declared once here. Column names, display labels,
//! serialization keys and form grouping all come from [`Field`].

use crate::error::{Result, SermonError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a field's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single line of text.
    Text,
    /// Multi-paragraph text.
    LongText,
    /// ISO `YYYY-MM-DD` date, or empty.
    Date,
}

/// Form section a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldGroup {
    Scripture,
    Exegesis,
    Outlines,
    Research,
    Sermon,
    Liturgy,
    Manuscript,
}

macro_rules! define_fields {
    ($( $variant:ident => $key:literal, $label:literal, $kind:ident, $group:ident; )+) => {
        /// A content field of a sermon record, in display order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Field {
            $( $variant, )+
        }

        impl Field {
            /// Every content field, in schema order.
            pub const ALL: &'static [Field] = &[ $( Field::$variant, )+ ];

            /// Column name and serialization key.
            pub fn key(&self) -> &'static str {
                match self {
                    $( Field::$variant => $key, )+
                }
            }

            /// Human-readable label.
            pub fn label(&self) -> &'static str {
                match self {
                    $( Field::$variant => $label, )+
                }
            }

            pub fn kind(&self) -> FieldKind {
                match self {
                    $( Field::$variant => FieldKind::$kind, )+
                }
            }

            pub fn group(&self) -> FieldGroup {
                match self {
                    $( Field::$variant => FieldGroup::$group, )+
                }
            }
        }
    };
}

define_fields! {
    Pericope => "pericope", "Pericope", Text, Scripture;
    PericopeText => "pericope_text", "Pericope Text", LongText, Scripture;
    SermonReference => "sermon_reference", "Sermon Reference", Text, Scripture;
    SermonText => "sermon_text", "Sermon Text", LongText, Scripture;
    Fcft => "fcft", "Fallen Condition", LongText, Exegesis;
    Gospel => "gospel", "Gospel Focus", LongText, Exegesis;
    Context => "context", "Context", LongText, Exegesis;
    KeyTerms => "key_terms", "Key Terms", LongText, Exegesis;
    ExegesisNotes => "exegesis_notes", "Exegesis Notes", LongText, Exegesis;
    ScriptureOutline => "scripture_outline", "Scripture Outline", LongText, Outlines;
    SermonOutline => "sermon_outline", "Sermon Outline", LongText, Outlines;
    Research => "research", "Research", LongText, Research;
    SermonTitle => "sermon_title", "Sermon Title", Text, Sermon;
    SermonDate => "sermon_date", "Date", Date, Sermon;
    SermonLocation => "sermon_location", "Location", Text, Sermon;
    LiturgicalSeason => "liturgical_season", "Liturgical Season", Text, Liturgy;
    SpecialDay => "special_day", "Special Day", Text, Liturgy;
    Hymns => "hymns", "Hymns", LongText, Liturgy;
    Manuscript => "manuscript", "Manuscript", LongText, Manuscript;
}

impl Field {
    /// Number of content fields.
    pub const COUNT: usize = Field::ALL.len();

    /// Position of this field in [`Field::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Look up a field by its key.
    pub fn from_key(key: &str) -> Result<Self> {
        let key = key.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.key() == key)
            .ok_or_else(|| SermonError::UnknownField(key.to_string()))
    }

    /// Look up a field by its display label, ignoring case.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.label().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Content of a record that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    values: Vec<String>,
}

impl Default for RecordDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordDraft {
    pub fn new() -> Self {
        Self {
            values: vec![String::new(); Field::COUNT],
        }
    }

    pub fn get(&self, field: Field) -> &str {
        self.values
            .get(field.index())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        if self.values.len() < Field::COUNT {
            self.values.resize(Field::COUNT, String::new());
        }
        self.values[field.index()] = value.into();
    }

    /// Builder-style setter.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// `(field, value)` pairs in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.iter().map(move |f| (*f, self.get(*f)))
    }

    /// Add a paragraph to a field, separated from existing text by a blank line.
    pub fn append(&mut self, field: Field, text: &str) {
        let merged = match self.get(field) {
            "" => text.to_string(),
            existing => format!("{}\n\n{}", existing, text),
        };
        self.set(field, merged);
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.trim().is_empty())
    }

    /// Attach an identifier, producing a stored record.
    pub fn into_record(self, id: i64) -> Record {
        Record {
            id,
            content: self,
        }
    }
}

/// One sermon's worth of notes.
///
/// Serializes as a flat JSON object: `id` plus one key per [`Field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: i64,
    content: RecordDraft,
}

impl Record {
    /// An empty record with the given identifier.
    pub fn new(id: i64) -> Self {
        RecordDraft::new().into_record(id)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn get(&self, field: Field) -> &str {
        self.content.get(field)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.content.set(field, value);
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.content.fields()
    }

    pub fn content(&self) -> &RecordDraft {
        &self.content
    }

    /// Drop the identifier, e.g. to re-insert into another store.
    pub fn into_draft(self) -> RecordDraft {
        self.content
    }
}

impl Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Field::COUNT + 1))?;
        map.serialize_entry("id", &self.id)?;
        for (field, value) in self.fields() {
            map.serialize_entry(field.key(), value)?;
        }
        map.end()
    }
}

impl Serialize for RecordDraft {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Field::COUNT))?;
        for (field, value) in self.fields() {
            map.serialize_entry(field.key(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RecordDraft {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw: BTreeMap<String, serde_json::Value> = BTreeMap::deserialize(deserializer)?;
        Ok(draft_from_map(&raw))
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw: BTreeMap<String, serde_json::Value> = BTreeMap::deserialize(deserializer)?;
        let id = raw
            .get("id")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| serde::de::Error::missing_field("id"))?;
        Ok(draft_from_map(&raw).into_record(id))
    }
}

/// Unknown keys are ignored; non-string scalars are kept in their JSON text form.
fn draft_from_map(raw: &BTreeMap<String, serde_json::Value>) -> RecordDraft {
    let mut draft = RecordDraft::new();
    for field in Field::ALL {
        match raw.get(field.key()) {
            Some(serde_json::Value::String(s)) => draft.set(*field, s.clone()),
            Some(serde_json::Value::Null) | None => {}
            Some(other) => draft.set(*field, other.to_string()),
        }
    }
    draft
}

/// Schema description for front ends.
#[derive(Debug, Clone, Serialize)]
pub struct FieldInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub group: FieldGroup,
}

/// The full schema as a list of [`FieldInfo`].
pub fn describe() -> Vec<FieldInfo> {
    Field::ALL
        .iter()
        .map(|f| FieldInfo {
            key: f.key(),
            label: f.label(),
            kind: f.kind(),
            group: f.group(),
        })
        .collect()
}
