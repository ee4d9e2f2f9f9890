// Form builder draft state
//
// Client-side working copy of an admin form: the field list under edit, the
// current selection and the title. Saved through the executor as plain JSON.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

const UNTITLED: &str = "Untitled Form";

/// Kinds of fields the builder can place on a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Input,
    Textarea,
    Checkbox,
    Select,
    Radio,
    File,
}

impl FieldKind {
    fn default_label(self) -> &'static str {
        match self {
            FieldKind::Input => "Input",
            FieldKind::Textarea => "Textarea",
            FieldKind::Checkbox => "Checkbox",
            FieldKind::Select => "Select",
            FieldKind::Radio | FieldKind::File => "Field",
        }
    }
}

/// One field on a form. Serialized camelCase, since this is the wire shape
/// the backend stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_upload_types: Option<Vec<String>>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub default_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_selected: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_selected: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,
}

impl Field {
    /// A field with the builder's per-kind defaults
    pub fn new(kind: FieldKind) -> Self {
        let text_like = matches!(kind, FieldKind::Input | FieldKind::Textarea);
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            label: kind.default_label().to_string(),
            placeholder: text_like.then(String::new),
            options: match kind {
                FieldKind::Select | FieldKind::Radio => Some(vec!["Option 1".to_string()]),
                FieldKind::Checkbox => Some(Vec::new()),
                _ => None,
            },
            value: if kind == FieldKind::Checkbox {
                json!([])
            } else {
                json!("")
            },
            input_types: (kind == FieldKind::Input).then(|| "text".to_string()),
            file_upload_types: None,
            required: false,
            description: String::new(),
            min_length: None,
            max_length: None,
            default_value: String::new(),
            min_selected: None,
            max_selected: None,
            max_file_size: None,
        }
    }
}

/// Partial update applied to one field; unset members leave the field alone
#[derive(Debug, Clone, Default)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub options: Option<Vec<String>>,
    pub value: Option<Value>,
    pub required: Option<bool>,
    pub description: Option<String>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub default_value: Option<String>,
}

/// Working copy of one form under construction
#[derive(Debug, Clone)]
pub struct FormDraft {
    form_id: Option<String>,
    title: String,
    fields: Vec<Field>,
    selected_id: Option<String>,
    last_added: Option<FieldKind>,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            form_id: None,
            title: UNTITLED.to_string(),
            fields: Vec::new(),
            selected_id: None,
            last_added: None,
        }
    }
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form_id(&self) -> Option<&str> {
        self.form_id.as_deref()
    }

    pub fn set_form_id(&mut self, id: Option<String>) {
        self.form_id = id;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn set_fields(&mut self, fields: Vec<Field>) {
        self.fields = fields;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn last_added(&self) -> Option<FieldKind> {
        self.last_added
    }

    /// Append a field with defaults for its kind and select it.
    /// Returns the id of the new field.
    pub fn add_field(&mut self, kind: FieldKind) -> String {
        let field = Field::new(kind);
        let id = field.id.clone();
        self.selected_id = Some(id.clone());
        self.last_added = Some(kind);
        self.fields.push(field);
        id
    }

    /// Apply a patch to the field with the given id.
    /// Returns false when the id is unknown.
    pub fn update_field(&mut self, id: &str, patch: FieldPatch) -> bool {
        let Some(field) = self.fields.iter_mut().find(|f| f.id == id) else {
            return false;
        };
        if let Some(label) = patch.label {
            field.label = label;
        }
        if let Some(placeholder) = patch.placeholder {
            field.placeholder = Some(placeholder);
        }
        if let Some(options) = patch.options {
            field.options = Some(options);
        }
        if let Some(value) = patch.value {
            field.value = value;
        }
        if let Some(required) = patch.required {
            field.required = required;
        }
        if let Some(description) = patch.description {
            field.description = description;
        }
        if let Some(min_length) = patch.min_length {
            field.min_length = Some(min_length);
        }
        if let Some(max_length) = patch.max_length {
            field.max_length = Some(max_length);
        }
        if let Some(default_value) = patch.default_value {
            field.default_value = default_value;
        }
        true
    }

    /// Remove a field. The selection is dropped either way.
    pub fn remove_field(&mut self, id: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != id);
        self.selected_id = None;
        self.fields.len() != before
    }

    pub fn select_field(&mut self, id: impl Into<String>) {
        self.selected_id = Some(id.into());
    }

    /// Replace the draft with a form loaded from the backend; the first
    /// field becomes the selection. An empty title falls back to the
    /// untitled placeholder.
    pub fn load(&mut self, title: impl Into<String>, fields: Vec<Field>, form_id: Option<String>) {
        let title = title.into();
        self.title = if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title
        };
        self.selected_id = fields.first().map(|f| f.id.clone());
        self.fields = fields;
        self.form_id = form_id;
        self.last_added = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// JSON payload for saving through the executor
    pub fn to_payload(&self) -> Value {
        json!({
            "title": self.title,
            "fields": self.fields,
        })
    }
}
