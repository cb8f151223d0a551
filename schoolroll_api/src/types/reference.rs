//! References between records (a class's teacher, a student's class).

use serde::{Deserialize, Serialize};

/// A link to another record.
///
/// The backend sends references either as a bare id or populated with the
/// target document. Only the id and display name are kept; on the way back
/// out a reference serializes as its bare id, which is what create and update
/// endpoints expect.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "RefRepr", into = "String")]
pub struct EntityRef {
    pub id: String,
    pub name: Option<String>,
}

impl EntityRef {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
        }
    }

    pub fn named(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: Some(name.to_string()),
        }
    }

    /// Display name, falling back to the id when the reference was not populated.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl From<EntityRef> for String {
    fn from(val: EntityRef) -> Self {
        val.id
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RefRepr {
    Id(String),
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<RefRepr> for EntityRef {
    fn from(val: RefRepr) -> Self {
        match val {
            RefRepr::Id(id) => EntityRef { id, name: None },
            RefRepr::Populated { id, name } => EntityRef { id, name },
        }
    }
}
