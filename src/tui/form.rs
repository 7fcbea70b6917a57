use crate::storage::note::{Note, NoteDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    Title,
    Description,
    Tags,
}

/// Draft state behind the create and edit screens. One form serves both
/// flows; `editing_id` tells them apart. Tags live in a comma-separated text
/// buffer until submission.
#[derive(Debug, Clone)]
pub struct NoteForm {
    pub editing_id: Option<String>,
    pub title: String,
    pub description: String,
    pub tag_input: String,
    pub pinned: bool,
    pub archived: bool,
    pub field: NoteField,
}

impl NoteForm {
    pub fn create() -> Self {
        NoteForm {
            editing_id: None,
            title: String::new(),
            description: String::new(),
            tag_input: String::new(),
            pinned: false,
            archived: false,
            field: NoteField::Title,
        }
    }

    /// Seeds the form from a note already held in the fetched list.
    pub fn edit(note: &Note) -> Self {
        NoteForm {
            editing_id: Some(note.id.clone()),
            title: note.title.clone(),
            description: note.description.clone(),
            tag_input: note.tags.join(", "),
            pinned: note.pinned,
            archived: note.archived,
            field: NoteField::Title,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// A draft needs a title or a description; whitespace counts as empty.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.description.trim().is_empty()
    }

    pub fn draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            tags: parse_tags(&self.tag_input),
            pinned: self.pinned,
            archived: self.archived,
            deleted: false,
        }
    }

    pub fn buffer_mut(&mut self) -> &mut String {
        match self.field {
            NoteField::Title => &mut self.title,
            NoteField::Description => &mut self.description,
            NoteField::Tags => &mut self.tag_input,
        }
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            NoteField::Title => NoteField::Description,
            NoteField::Description => NoteField::Tags,
            NoteField::Tags => NoteField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.field = match self.field {
            NoteField::Title => NoteField::Tags,
            NoteField::Description => NoteField::Title,
            NoteField::Tags => NoteField::Description,
        };
    }
}

/// Comma-separated buffer to tag list, dropping empty entries.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Email,
    Password,
}

/// Credential buffers shared by the login and register screens. Login never
/// visits the username field.
#[derive(Debug, Clone)]
pub struct AuthForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub field: AuthField,
}

impl AuthForm {
    pub fn login() -> Self {
        AuthForm {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            field: AuthField::Email,
        }
    }

    pub fn register() -> Self {
        AuthForm {
            field: AuthField::Username,
            ..Self::login()
        }
    }

    pub fn buffer_mut(&mut self) -> &mut String {
        match self.field {
            AuthField::Username => &mut self.username,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn next_field(&mut self, registering: bool) {
        self.field = match self.field {
            AuthField::Username => AuthField::Email,
            AuthField::Email => AuthField::Password,
            AuthField::Password if registering => AuthField::Username,
            AuthField::Password => AuthField::Email,
        };
    }

    pub fn prev_field(&mut self, registering: bool) {
        self.field = match self.field {
            AuthField::Username => AuthField::Password,
            AuthField::Email if registering => AuthField::Username,
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }

    /// Registration requires every field; login relies on the server check.
    pub fn missing_registration_field(&self) -> bool {
        self.username.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_split_trim_and_drop_empties() {
        assert_eq!(parse_tags("work, home ,,  ideas  ,"), ["work", "home", "ideas"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn blank_draft_is_rejected() {
        let mut form = NoteForm::create();
        form.title = "   ".to_string();
        form.description = "\t".to_string();
        assert!(form.is_blank());
    }

    #[test]
    fn description_alone_satisfies_the_non_empty_rule() {
        let mut form = NoteForm::create();
        form.description = "x".to_string();
        assert!(!form.is_blank());
        assert_eq!(form.draft().description, "x");
    }

    #[test]
    fn edit_seeds_fields_and_joins_tags() {
        let note: Note = serde_json::from_str(
            r#"{"_id":"123","title":"T","description":"D","tags":["a","b"],"pinned":true}"#,
        )
        .expect("parse");
        let form = NoteForm::edit(&note);
        assert_eq!(form.editing_id.as_deref(), Some("123"));
        assert!(form.is_editing());
        assert_eq!(form.tag_input, "a, b");
        assert!(form.pinned);
        assert_eq!(form.draft().tags, ["a", "b"]);
    }

    #[test]
    fn draft_never_submits_the_deleted_flag() {
        let mut form = NoteForm::create();
        form.title = "t".to_string();
        assert!(!form.draft().deleted);
    }

    #[test]
    fn login_field_cycle_skips_username() {
        let mut auth = AuthForm::login();
        assert_eq!(auth.field, AuthField::Email);
        auth.next_field(false);
        assert_eq!(auth.field, AuthField::Password);
        auth.next_field(false);
        assert_eq!(auth.field, AuthField::Email);
    }

    #[test]
    fn register_field_cycle_includes_username() {
        let mut auth = AuthForm::register();
        assert_eq!(auth.field, AuthField::Username);
        auth.next_field(true);
        auth.next_field(true);
        assert_eq!(auth.field, AuthField::Password);
        auth.next_field(true);
        assert_eq!(auth.field, AuthField::Username);
    }

    #[test]
    fn registration_requires_every_field() {
        let mut auth = AuthForm::register();
        auth.username = "ada".to_string();
        auth.email = "ada@example.com".to_string();
        assert!(auth.missing_registration_field());
        auth.password = "secret".to_string();
        assert!(!auth.missing_registration_field());
    }
}
