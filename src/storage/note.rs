use serde::{Deserialize, Serialize};

/// A note as the backend returns it. The server assigns `_id` and keeps the
/// timestamps; the three flags default to false for records that predate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl Note {
    /// Pinning is disabled while a note is archived or in the trash.
    pub fn can_pin(&self) -> bool {
        !self.archived && !self.deleted
    }

    /// Archiving is disabled while a note is pinned or in the trash.
    pub fn can_archive(&self) -> bool {
        !self.pinned && !self.deleted
    }
}

/// The payload sent on create and edit. Carries no identifier: the server
/// assigns one on create and the edit route names it in the path.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub pinned: bool,
    pub archived: bool,
    pub deleted: bool,
}

/// The account record returned by login, persisted alongside the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_deserializes_mongo_id_and_defaults_flags() {
        let note: Note = serde_json::from_str(
            r#"{"_id":"abc123","title":"Groceries","description":"milk","tags":["home"]}"#,
        )
        .expect("parse note");
        assert_eq!(note.id, "abc123");
        assert_eq!(note.tags, vec!["home"]);
        assert!(!note.pinned);
        assert!(!note.archived);
        assert!(!note.deleted);
    }

    #[test]
    fn pin_and_archive_exclude_each_other() {
        let mut note: Note =
            serde_json::from_str(r#"{"_id":"1","title":"a","description":""}"#).expect("parse");
        assert!(note.can_pin());
        assert!(note.can_archive());

        note.archived = true;
        assert!(!note.can_pin());
        assert!(note.can_archive());

        note.archived = false;
        note.pinned = true;
        assert!(note.can_pin());
        assert!(!note.can_archive());
    }

    #[test]
    fn trashed_notes_accept_neither_flag() {
        let mut note: Note =
            serde_json::from_str(r#"{"_id":"1","title":"a","description":""}"#).expect("parse");
        note.deleted = true;
        assert!(!note.can_pin());
        assert!(!note.can_archive());
    }
}
