use crate::storage::note::Note;

/// Mutually exclusive list views. Picking a category replaces the current
/// one; `Active` is the default view with no category selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Active,
    Pinned,
    Archived,
    Trash,
}

impl Category {
    /// Whether `note` belongs to this view. Trash is the only view that shows
    /// deleted notes, whatever their other flags say.
    pub fn allows(self, note: &Note) -> bool {
        match self {
            Category::Trash => note.deleted,
            Category::Pinned => note.pinned && !note.deleted,
            Category::Archived => note.archived && !note.deleted,
            Category::Active => !note.deleted && !note.archived,
        }
    }

    /// Selecting the already-active category clears it back to `Active`.
    pub fn toggled(self, other: Category) -> Category {
        if self == other { Category::Active } else { other }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Active => "All",
            Category::Pinned => "Pinned",
            Category::Archived => "Archived",
            Category::Trash => "Trash",
        }
    }
}

/// True when `query` is a case-insensitive substring of the title, the
/// description, or any tag. An empty query matches every note.
pub fn matches_query(note: &Note, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    note.title.to_lowercase().contains(&query)
        || note.description.to_lowercase().contains(&query)
        || note.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
}

/// The subset of `notes` visible under `category` and `query`, in the order
/// the server returned them. The query applies after the category filter.
pub fn visible_notes(notes: &[Note], category: Category, query: &str) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| category.allows(note))
        .filter(|note| matches_query(note, query))
        .cloned()
        .collect()
}

/// Per-category totals for the filter bar. Pinned and archived skip trashed
/// notes, matching what those views actually show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub pinned: usize,
    pub archived: usize,
    pub trash: usize,
}

pub fn counts(notes: &[Note]) -> Counts {
    Counts {
        pinned: notes.iter().filter(|n| n.pinned && !n.deleted).count(),
        archived: notes.iter().filter(|n| n.archived && !n.deleted).count(),
        trash: notes.iter().filter(|n| n.deleted).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str, description: &str, tags: &[&str]) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            pinned: false,
            archived: false,
            deleted: false,
        }
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn trash_shows_only_deleted_and_default_hides_them() {
        let a = note("1", "A", "", &[]);
        let mut b = note("2", "B", "", &[]);
        b.deleted = true;
        let notes = vec![a, b];

        assert_eq!(titles(&visible_notes(&notes, Category::Trash, "")), ["B"]);
        assert_eq!(titles(&visible_notes(&notes, Category::Active, "")), ["A"]);
    }

    #[test]
    fn deleted_notes_stay_out_of_pinned_and_archived_views() {
        let mut pinned_trashed = note("1", "P", "", &[]);
        pinned_trashed.pinned = true;
        pinned_trashed.deleted = true;
        let mut archived_trashed = note("2", "R", "", &[]);
        archived_trashed.archived = true;
        archived_trashed.deleted = true;
        let notes = vec![pinned_trashed, archived_trashed];

        assert!(visible_notes(&notes, Category::Pinned, "").is_empty());
        assert!(visible_notes(&notes, Category::Archived, "").is_empty());
        assert_eq!(visible_notes(&notes, Category::Trash, "").len(), 2);
    }

    #[test]
    fn default_view_hides_archived_notes() {
        let plain = note("1", "plain", "", &[]);
        let mut archived = note("2", "stored", "", &[]);
        archived.archived = true;
        let notes = vec![plain, archived];

        assert_eq!(titles(&visible_notes(&notes, Category::Active, "")), ["plain"]);
        assert_eq!(titles(&visible_notes(&notes, Category::Archived, "")), ["stored"]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_description_and_tags() {
        let by_title = note("1", "Project plan", "", &[]);
        let by_description = note("2", "misc", "the PROJectile", &[]);
        let by_tag = note("3", "misc", "", &["Project"]);
        let miss = note("4", "misc", "nothing", &["home"]);
        let notes = vec![by_title, by_description, by_tag, miss];

        let found = visible_notes(&notes, Category::Active, "proj");
        assert_eq!(titles(&found), ["Project plan", "misc", "misc"]);
    }

    #[test]
    fn empty_query_applies_no_text_filter() {
        let notes = vec![note("1", "A", "", &[]), note("2", "B", "", &[])];
        assert_eq!(visible_notes(&notes, Category::Active, "").len(), 2);
    }

    #[test]
    fn filtering_twice_equals_filtering_once() {
        let mut pinned = note("1", "keep", "", &["x"]);
        pinned.pinned = true;
        let notes = vec![pinned, note("2", "keep too", "", &[]), note("3", "other", "", &[])];

        let once = visible_notes(&notes, Category::Active, "keep");
        let twice = visible_notes(&once, Category::Active, "keep");
        assert_eq!(titles(&once), titles(&twice));
    }

    #[test]
    fn query_applies_inside_the_trash_view_too() {
        let mut a = note("1", "old draft", "", &[]);
        a.deleted = true;
        let mut b = note("2", "receipt", "", &[]);
        b.deleted = true;
        let notes = vec![a, b];

        assert_eq!(titles(&visible_notes(&notes, Category::Trash, "draft")), ["old draft"]);
    }

    #[test]
    fn toggling_the_active_category_clears_it() {
        assert_eq!(Category::Pinned.toggled(Category::Pinned), Category::Active);
        assert_eq!(Category::Active.toggled(Category::Trash), Category::Trash);
        assert_eq!(Category::Trash.toggled(Category::Pinned), Category::Pinned);
    }

    #[test]
    fn counts_match_the_filter_chips() {
        let mut pinned = note("1", "a", "", &[]);
        pinned.pinned = true;
        let mut archived = note("2", "b", "", &[]);
        archived.archived = true;
        let mut trashed_pinned = note("3", "c", "", &[]);
        trashed_pinned.pinned = true;
        trashed_pinned.deleted = true;
        let notes = vec![pinned, archived, trashed_pinned];

        let counts = counts(&notes);
        assert_eq!(counts.pinned, 1);
        assert_eq!(counts.archived, 1);
        assert_eq!(counts.trash, 1);
    }
}
