use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tracing::error;

use crate::filter::{self, Category};
use crate::service::{DEFAULT_API_URL, NoteApi, ToggleAction};
use crate::storage::note::Note;
use crate::storage::session::SessionStore;
use crate::tui::form::{AuthField, AuthForm, NoteField, NoteForm};

pub enum AppMode {
    Login,
    Register,
    List,
    Search,
    Form,
    DeleteConfirm,
    Help,
}

pub struct App {
    pub service: NoteApi,
    pub notes: Vec<Note>,
    pub visible: Vec<Note>,
    pub category: Category,
    pub search_query: String,
    pub selected_index: usize,
    pub mode: AppMode,
    pub form: NoteForm,
    pub auth: AuthForm,
    pub input_buffer: String,
    pub pending_delete: Option<Note>,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub async fn new() -> Result<Self> {
        let base_url = std::env::var("NOTESKEEPER_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let session = SessionStore::from_default_location()?;
        let service = NoteApi::new(base_url, session);

        let mut app = App {
            mode: if service.is_authenticated() {
                AppMode::List
            } else {
                AppMode::Login
            },
            service,
            notes: Vec::new(),
            visible: Vec::new(),
            category: Category::Active,
            search_query: String::new(),
            selected_index: 0,
            form: NoteForm::create(),
            auth: AuthForm::login(),
            input_buffer: String::new(),
            pending_delete: None,
            status_message: None,
            should_quit: false,
        };

        if app.service.is_authenticated() {
            app.fetch_notes().await;
        }

        Ok(app)
    }

    /// Replace local state wholesale with the server's note list. A failure
    /// surfaces as a status alert; local state keeps the last good response.
    async fn fetch_notes(&mut self) -> bool {
        match self.service.list_notes().await {
            Ok(notes) => {
                self.notes = notes;
                self.apply_filters();
                true
            }
            Err(err) => {
                error!(%err, "failed to fetch notes");
                self.status_message =
                    Some("✗ Failed to fetch notes. Please try again later.".to_string());
                false
            }
        }
    }

    fn apply_filters(&mut self) {
        self.visible = filter::visible_notes(&self.notes, self.category, &self.search_query);
        if self.selected_index >= self.visible.len() {
            self.selected_index = self.visible.len().saturating_sub(1);
        }
    }

    fn select_category(&mut self, category: Category) {
        self.category = self.category.toggled(category);
        self.selected_index = 0;
        self.apply_filters();
    }

    pub async fn handle_key(
        &mut self,
        key: crossterm::event::KeyCode,
        modifiers: crossterm::event::KeyModifiers,
    ) -> Result<()> {
        match self.mode {
            AppMode::Login => self.handle_login_key(key, modifiers).await?,
            AppMode::Register => self.handle_register_key(key, modifiers).await?,
            AppMode::List => self.handle_list_key(key).await?,
            AppMode::Search => self.handle_search_key(key)?,
            AppMode::Form => self.handle_form_key(key, modifiers).await?,
            AppMode::DeleteConfirm => self.handle_delete_confirm_key(key).await?,
            AppMode::Help => self.handle_help_key(key)?,
        }
        Ok(())
    }

    async fn handle_login_key(
        &mut self,
        key: crossterm::event::KeyCode,
        modifiers: crossterm::event::KeyModifiers,
    ) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc => {
                self.should_quit = true;
            }
            crossterm::event::KeyCode::Char('r')
                if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) =>
            {
                self.auth = AuthForm::register();
                self.status_message = None;
                self.mode = AppMode::Register;
            }
            crossterm::event::KeyCode::Tab | crossterm::event::KeyCode::Down => {
                self.auth.next_field(false);
            }
            crossterm::event::KeyCode::BackTab | crossterm::event::KeyCode::Up => {
                self.auth.prev_field(false);
            }
            crossterm::event::KeyCode::Enter => {
                self.submit_login().await;
            }
            crossterm::event::KeyCode::Char(c) => {
                self.auth.buffer_mut().push(c);
            }
            crossterm::event::KeyCode::Backspace => {
                self.auth.buffer_mut().pop();
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_register_key(
        &mut self,
        key: crossterm::event::KeyCode,
        modifiers: crossterm::event::KeyModifiers,
    ) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc => {
                self.auth = AuthForm::login();
                self.status_message = None;
                self.mode = AppMode::Login;
            }
            crossterm::event::KeyCode::Char('l')
                if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) =>
            {
                self.auth = AuthForm::login();
                self.status_message = None;
                self.mode = AppMode::Login;
            }
            crossterm::event::KeyCode::Tab | crossterm::event::KeyCode::Down => {
                self.auth.next_field(true);
            }
            crossterm::event::KeyCode::BackTab | crossterm::event::KeyCode::Up => {
                self.auth.prev_field(true);
            }
            crossterm::event::KeyCode::Enter => {
                self.submit_register().await;
            }
            crossterm::event::KeyCode::Char(c) => {
                self.auth.buffer_mut().push(c);
            }
            crossterm::event::KeyCode::Backspace => {
                self.auth.buffer_mut().pop();
            }
            _ => {}
        }
        Ok(())
    }

    async fn submit_login(&mut self) {
        match self
            .service
            .login(&self.auth.email, &self.auth.password)
            .await
        {
            Ok(_user) => {
                self.auth = AuthForm::login();
                self.status_message = Some("✓ Login successful".to_string());
                self.mode = AppMode::List;
                self.fetch_notes().await;
            }
            Err(err) => {
                error!(%err, "login failed");
                self.status_message = Some(format!(
                    "✗ {}",
                    err.user_message("Login failed. Please try again.")
                ));
            }
        }
    }

    async fn submit_register(&mut self) {
        // Checked client-side before any network call.
        if self.auth.missing_registration_field() {
            self.status_message = Some("✗ All fields are required".to_string());
            return;
        }
        match self
            .service
            .register(&self.auth.username, &self.auth.email, &self.auth.password)
            .await
        {
            Ok(message) => {
                self.auth = AuthForm::login();
                self.status_message = Some(format!("✓ {message}"));
                self.mode = AppMode::Login;
            }
            Err(err) => {
                error!(%err, "registration failed");
                self.status_message =
                    Some(format!("✗ {}", err.user_message("Registration failed")));
            }
        }
    }

    async fn handle_list_key(&mut self, key: crossterm::event::KeyCode) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc => {
                if !self.search_query.is_empty() {
                    // Clear search first
                    self.search_query.clear();
                    self.selected_index = 0;
                    self.apply_filters();
                } else if self.category != Category::Active {
                    self.category = Category::Active;
                    self.selected_index = 0;
                    self.apply_filters();
                } else {
                    self.should_quit = true;
                }
            }
            crossterm::event::KeyCode::Char('/') => {
                self.mode = AppMode::Search;
                self.input_buffer = self.search_query.clone();
                self.status_message = None;
            }
            crossterm::event::KeyCode::Char('j') | crossterm::event::KeyCode::Down => {
                let max_index = self.visible.len().saturating_sub(1);
                if self.selected_index < max_index {
                    self.selected_index += 1;
                }
            }
            crossterm::event::KeyCode::Char('k') | crossterm::event::KeyCode::Up => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }
            crossterm::event::KeyCode::Char('n') => {
                self.form = NoteForm::create();
                self.status_message = None;
                self.mode = AppMode::Form;
            }
            crossterm::event::KeyCode::Char('e') | crossterm::event::KeyCode::Enter => {
                // Trashed notes must be restored before editing
                if let Some(note) = self.visible.get(self.selected_index) {
                    if !note.deleted {
                        self.form = NoteForm::edit(note);
                        self.status_message = None;
                        self.mode = AppMode::Form;
                    }
                }
            }
            crossterm::event::KeyCode::Char('p') => self.select_category(Category::Pinned),
            crossterm::event::KeyCode::Char('a') => self.select_category(Category::Archived),
            crossterm::event::KeyCode::Char('t') => self.select_category(Category::Trash),
            crossterm::event::KeyCode::Char('P') => self.toggle_pin().await,
            crossterm::event::KeyCode::Char('A') => self.toggle_archive().await,
            crossterm::event::KeyCode::Char('d') => self.toggle_deleted().await,
            crossterm::event::KeyCode::Char('D') => {
                // Permanent delete is only offered from the trash
                if let Some(note) = self.visible.get(self.selected_index) {
                    if note.deleted {
                        self.pending_delete = Some(note.clone());
                        self.mode = AppMode::DeleteConfirm;
                    }
                }
            }
            crossterm::event::KeyCode::Char('r') => {
                if self.fetch_notes().await {
                    self.status_message = Some("✓ Notes refreshed".to_string());
                }
            }
            crossterm::event::KeyCode::Char('L') => {
                self.logout();
            }
            crossterm::event::KeyCode::Char('?') => {
                self.mode = AppMode::Help;
            }
            _ => {}
        }
        Ok(())
    }

    /// Pin is a no-op while the selected note is archived or trashed.
    async fn toggle_pin(&mut self) {
        let Some(note) = self.visible.get(self.selected_index) else {
            return;
        };
        if !note.can_pin() {
            return;
        }
        let id = note.id.clone();
        let was_pinned = note.pinned;
        if let Err(err) = self.service.toggle(&id, ToggleAction::Pinned).await {
            error!(%err, "failed to toggle pinned");
            return;
        }
        if self.fetch_notes().await {
            self.status_message = Some(if was_pinned {
                "✓ Note unpinned".to_string()
            } else {
                "✓ Note pinned".to_string()
            });
        }
    }

    /// Archive is a no-op while the selected note is pinned or trashed.
    async fn toggle_archive(&mut self) {
        let Some(note) = self.visible.get(self.selected_index) else {
            return;
        };
        if !note.can_archive() {
            return;
        }
        let id = note.id.clone();
        let was_archived = note.archived;
        if let Err(err) = self.service.toggle(&id, ToggleAction::Archived).await {
            error!(%err, "failed to toggle archived");
            return;
        }
        if self.fetch_notes().await {
            self.status_message = Some(if was_archived {
                "✓ Note unarchived".to_string()
            } else {
                "✓ Note archived".to_string()
            });
        }
    }

    /// Soft delete, or restore when the note is already in the trash. The
    /// backend flips the same flag either way; a restored note always lands
    /// back in the plain active view.
    async fn toggle_deleted(&mut self) {
        let Some(note) = self.visible.get(self.selected_index) else {
            return;
        };
        let id = note.id.clone();
        let was_deleted = note.deleted;
        let title = note.title.clone();
        if let Err(err) = self.service.toggle(&id, ToggleAction::Deleted).await {
            error!(%err, "failed to toggle deleted");
            return;
        }
        if self.fetch_notes().await {
            self.status_message = Some(if was_deleted {
                format!("✓ Restored: {title}")
            } else {
                format!("✓ Moved to trash: {title}")
            });
        }
    }

    fn logout(&mut self) {
        self.service.logout();
        self.notes.clear();
        self.visible.clear();
        self.search_query.clear();
        self.category = Category::Active;
        self.selected_index = 0;
        self.auth = AuthForm::login();
        self.status_message = None;
        self.mode = AppMode::Login;
    }

    fn handle_search_key(&mut self, key: crossterm::event::KeyCode) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc => {
                self.input_buffer.clear();
                self.search_query.clear();
                self.selected_index = 0;
                self.apply_filters();
                self.mode = AppMode::List;
            }
            crossterm::event::KeyCode::Enter => {
                // Apply search
                self.search_query = self.input_buffer.trim().to_string();
                self.input_buffer.clear();
                self.selected_index = 0;
                self.apply_filters();
                self.mode = AppMode::List;
            }
            crossterm::event::KeyCode::Char(c) => {
                self.input_buffer.push(c);
                // Live search as you type
                self.search_query = self.input_buffer.clone();
                self.selected_index = 0;
                self.apply_filters();
            }
            crossterm::event::KeyCode::Backspace => {
                self.input_buffer.pop();
                // Live search as you type
                self.search_query = self.input_buffer.clone();
                self.selected_index = 0;
                self.apply_filters();
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_form_key(
        &mut self,
        key: crossterm::event::KeyCode,
        modifiers: crossterm::event::KeyModifiers,
    ) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc => {
                // Cancel discards the draft
                self.form = NoteForm::create();
                self.mode = AppMode::List;
            }
            crossterm::event::KeyCode::Char('s')
                if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) =>
            {
                self.submit_form().await;
            }
            crossterm::event::KeyCode::Char('p')
                if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) =>
            {
                self.form.pinned = !self.form.pinned;
            }
            crossterm::event::KeyCode::Char('a')
                if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) =>
            {
                self.form.archived = !self.form.archived;
            }
            crossterm::event::KeyCode::Tab | crossterm::event::KeyCode::Down => {
                self.form.next_field();
            }
            crossterm::event::KeyCode::BackTab | crossterm::event::KeyCode::Up => {
                self.form.prev_field();
            }
            crossterm::event::KeyCode::Enter => {
                if self.form.field == NoteField::Description {
                    self.form.buffer_mut().push('\n');
                } else {
                    self.form.next_field();
                }
            }
            crossterm::event::KeyCode::Char(c) => {
                self.form.buffer_mut().push(c);
            }
            crossterm::event::KeyCode::Backspace => {
                self.form.buffer_mut().pop();
            }
            _ => {}
        }
        Ok(())
    }

    async fn submit_form(&mut self) {
        if self.form.is_blank() {
            // Blocked client-side, no network call
            self.status_message = Some("✗ Title or description is required".to_string());
            return;
        }
        let draft = self.form.draft();
        if let Some(id) = self.form.editing_id.clone() {
            match self.service.edit_note(&id, &draft).await {
                Ok(updated) => {
                    // Replace the matching entry, no full re-fetch
                    if let Some(slot) = self.notes.iter_mut().find(|n| n.id == updated.id) {
                        *slot = updated;
                    }
                    self.finish_form("✓ Note updated");
                }
                Err(err) => {
                    error!(%err, "failed to save note");
                    self.status_message =
                        Some(format!("✗ {}", err.user_message("Failed to save note")));
                }
            }
        } else {
            match self.service.create_note(&draft).await {
                Ok(created) => {
                    // Append the server-returned record, no full re-fetch
                    self.notes.push(created);
                    self.finish_form("✓ Note created");
                }
                Err(err) => {
                    error!(%err, "failed to save note");
                    self.status_message =
                        Some(format!("✗ {}", err.user_message("Failed to save note")));
                }
            }
        }
    }

    fn finish_form(&mut self, message: &str) {
        self.form = NoteForm::create();
        self.apply_filters();
        self.status_message = Some(message.to_string());
        self.mode = AppMode::List;
    }

    async fn handle_delete_confirm_key(&mut self, key: crossterm::event::KeyCode) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Char('y') | crossterm::event::KeyCode::Enter => {
                // Confirm permanent deletion
                if let Some(note) = self.pending_delete.take() {
                    match self.service.delete_permanently(&note.id).await {
                        Ok(()) => {
                            if self.fetch_notes().await {
                                self.status_message =
                                    Some(format!("✓ Deleted permanently: {}", note.title));
                            }
                        }
                        Err(err) => {
                            error!(%err, "failed to permanently delete note");
                        }
                    }
                }
                self.mode = AppMode::List;
            }
            crossterm::event::KeyCode::Esc | crossterm::event::KeyCode::Char('n') => {
                // Cancel deletion
                self.pending_delete = None;
                self.mode = AppMode::List;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_help_key(&mut self, key: crossterm::event::KeyCode) -> Result<()> {
        match key {
            crossterm::event::KeyCode::Esc => {
                self.mode = AppMode::List;
            }
            _ => {}
        }
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame) {
        match self.mode {
            AppMode::Login => self.render_login(frame),
            AppMode::Register => self.render_register(frame),
            AppMode::List => self.render_list(frame),
            AppMode::Search => self.render_search(frame),
            AppMode::Form => self.render_form(frame),
            AppMode::DeleteConfirm => self.render_delete_confirm(frame),
            AppMode::Help => self.render_help(frame),
        }
    }

    fn title_text(&self) -> String {
        match self.service.user() {
            Some(user) if !user.username.is_empty() => {
                format!("NotesKeeper ({})", user.username)
            }
            _ => "NotesKeeper".to_string(),
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(self.title_text())
            .block(Block::default().borders(Borders::ALL).title("noteskeeper"))
            .style(Style::default().fg(Color::Cyan));
        frame.render_widget(title, area);
    }

    /// The help bar doubles as the status line: a pending message takes the
    /// slot until the next action clears it.
    fn render_help_bar(&self, frame: &mut Frame, area: Rect, help_text: &str) {
        if let Some(ref message) = self.status_message {
            let color = if message.starts_with("✗") {
                Color::Red
            } else {
                Color::Green
            };
            let status = Paragraph::new(message.as_str())
                .block(Block::default().borders(Borders::ALL).title("Status"))
                .style(Style::default().fg(color));
            frame.render_widget(status, area);
        } else {
            let help = Paragraph::new(help_text)
                .block(Block::default().borders(Borders::ALL).title("Help"))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(help, area);
        }
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect) {
        let counts = filter::counts(&self.notes);
        let chip = |label: String, active: bool| {
            if active {
                Span::styled(
                    label,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(label, Style::default().fg(Color::White))
            }
        };

        let mut spans = vec![
            chip("All".to_string(), self.category == Category::Active),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            chip(
                format!("Pinned ({})", counts.pinned),
                self.category == Category::Pinned,
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            chip(
                format!("Archived ({})", counts.archived),
                self.category == Category::Archived,
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            chip(
                format!("Trash ({})", counts.trash),
                self.category == Category::Trash,
            ),
        ];
        if !self.search_query.is_empty() {
            spans.push(Span::styled(
                format!("   Search: {}", self.search_query),
                Style::default().fg(Color::Yellow),
            ));
        }

        let bar = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Filters"));
        frame.render_widget(bar, area);
    }

    fn note_list_items<'a>(&'a self, notes: &'a [Note]) -> Vec<ListItem<'a>> {
        notes
            .iter()
            .enumerate()
            .map(|(i, note)| {
                let is_selected = i == self.selected_index;
                let base_style = if is_selected {
                    Style::default().fg(Color::Yellow).bg(Color::DarkGray)
                } else {
                    Style::default()
                };

                let mut lines = vec![Line::default()];

                // Title line with flag badges
                let mut title_spans = vec![if is_selected {
                    Span::styled("▶ ", Style::default().fg(Color::Cyan))
                } else {
                    Span::styled("  ", Style::default())
                }];
                if note.pinned {
                    title_spans.push(Span::styled("📌 ", Style::default().fg(Color::Yellow)));
                }
                if note.archived {
                    title_spans.push(Span::styled("📁 ", Style::default().fg(Color::Magenta)));
                }
                if note.deleted {
                    title_spans.push(Span::styled("🗑 ", Style::default().fg(Color::Red)));
                }
                let title = if note.title.trim().is_empty() {
                    "(untitled)"
                } else {
                    note.title.as_str()
                };
                title_spans.push(Span::styled(
                    title,
                    if is_selected {
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    },
                ));
                lines.push(Line::from(title_spans));

                // Preview line (first line of the description, truncated)
                let preview = note.description.lines().next().unwrap_or("").trim();
                let preview_truncated: String = if preview.chars().count() > 60 {
                    format!("{}...", preview.chars().take(60).collect::<String>())
                } else {
                    preview.to_string()
                };
                if !preview_truncated.is_empty() {
                    lines.push(Line::from(vec![
                        Span::styled("  ", Style::default()),
                        Span::styled(preview_truncated, Style::default().fg(Color::DarkGray)),
                    ]));
                }

                // Tags line
                if !note.tags.is_empty() {
                    let tags_str = note
                        .tags
                        .iter()
                        .map(|t| format!("#{}", t))
                        .collect::<Vec<_>>()
                        .join(" ");
                    lines.push(Line::from(vec![
                        Span::styled("  ", Style::default()),
                        Span::styled(tags_str, Style::default().fg(Color::Blue)),
                    ]));
                }

                ListItem::new(lines).style(base_style)
            })
            .collect()
    }

    fn empty_state_text(&self) -> &'static str {
        if !self.search_query.is_empty() {
            "No notes found matching your search."
        } else {
            match self.category {
                Category::Trash => "No deleted notes.",
                Category::Pinned => "No pinned notes.",
                Category::Archived => "No archived notes.",
                Category::Active => "No notes yet. Create your first note!",
            }
        }
    }

    fn render_list(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.render_title_bar(frame, chunks[0]);
        self.render_filter_bar(frame, chunks[1]);

        if self.visible.is_empty() {
            let empty = Paragraph::new(self.empty_state_text())
                .block(Block::default().borders(Borders::ALL).title("Notes"))
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true });
            frame.render_widget(empty, chunks[2]);
        } else {
            let items = self.note_list_items(&self.visible);
            let mut state = ratatui::widgets::ListState::default();
            state.select(Some(self.selected_index));

            let list_title = format!("{} ({})", self.category.label(), self.visible.len());
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(list_title))
                .highlight_style(Style::default().fg(Color::Yellow).bg(Color::DarkGray));
            frame.render_stateful_widget(list, chunks[2], &mut state);
        }

        self.render_help_bar(
            frame,
            chunks[3],
            "j/k: navigate | n: new | e/Enter: edit | /: search | p/a/t: views | P: pin | A: archive | d: trash/restore | D: delete forever | r: refresh | L: logout | ?: help | Esc: back/quit",
        );
    }

    fn render_search(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(frame.area());

        self.render_title_bar(frame, chunks[0]);

        let search_prompt = format!("🔍 {}", self.input_buffer);
        let search = Paragraph::new(search_prompt)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Search (type to search, Enter to apply)"),
            )
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(search, chunks[1]);

        if self.visible.is_empty() {
            let results_text = Paragraph::new("No results found. Try a different search term.")
                .block(Block::default().borders(Borders::ALL).title("Results (0 found)"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true });
            frame.render_widget(results_text, chunks[2]);
        } else {
            let items = self.note_list_items(&self.visible);
            let list = List::new(items).block(Block::default().borders(Borders::ALL).title(
                format!("Results ({} found)", self.visible.len()),
            ));
            frame.render_widget(list, chunks[2]);
        }
    }

    fn render_form(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.render_title_bar(frame, chunks[0]);

        let field_block = |label: &'static str, focused: bool| {
            let style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            Block::default().borders(Borders::ALL).title(label).style(style)
        };

        let title_input = Paragraph::new(self.form.title.as_str())
            .block(field_block("Title", self.form.field == NoteField::Title));
        frame.render_widget(title_input, chunks[1]);

        let description_input = Paragraph::new(self.form.description.as_str())
            .block(field_block(
                "Description",
                self.form.field == NoteField::Description,
            ))
            .wrap(Wrap { trim: false });
        frame.render_widget(description_input, chunks[2]);

        let tags_input = Paragraph::new(self.form.tag_input.as_str()).block(field_block(
            "Tags (comma-separated)",
            self.form.field == NoteField::Tags,
        ));
        frame.render_widget(tags_input, chunks[3]);

        let flag = |set: bool| if set { "[x]" } else { "[ ]" };
        let flags_text = format!(
            "📌 Pinned {}    📁 Archived {}",
            flag(self.form.pinned),
            flag(self.form.archived)
        );
        let flags = Paragraph::new(flags_text)
            .block(Block::default().borders(Borders::ALL).title("Flags"))
            .style(Style::default().fg(Color::White));
        frame.render_widget(flags, chunks[4]);

        let help_text = if self.form.is_editing() {
            "Tab: next field | Ctrl+P/Ctrl+A: toggle flags | Ctrl+S: update note | Esc: cancel"
        } else {
            "Tab: next field | Ctrl+P/Ctrl+A: toggle flags | Ctrl+S: create note | Esc: cancel"
        };
        self.render_help_bar(frame, chunks[5], help_text);
    }

    fn render_auth_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &'static str,
        value: &str,
        focused: bool,
        mask: bool,
    ) {
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let shown = if mask {
            "•".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        let input = Paragraph::new(shown)
            .block(Block::default().borders(Borders::ALL).title(label))
            .style(style);
        frame.render_widget(input, area);
    }

    fn render_login(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.render_title_bar(frame, chunks[0]);

        let heading = Paragraph::new("Welcome back. Sign in to your NotesKeeper account.")
            .style(Style::default().fg(Color::White));
        frame.render_widget(heading, chunks[1]);

        self.render_auth_field(
            frame,
            chunks[2],
            "Email",
            &self.auth.email,
            self.auth.field == AuthField::Email,
            false,
        );
        self.render_auth_field(
            frame,
            chunks[3],
            "Password",
            &self.auth.password,
            self.auth.field == AuthField::Password,
            true,
        );

        self.render_help_bar(
            frame,
            chunks[5],
            "Tab: next field | Enter: sign in | Ctrl+R: create account | Esc: quit",
        );
    }

    fn render_register(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.render_title_bar(frame, chunks[0]);

        let heading = Paragraph::new("Create your NotesKeeper account.")
            .style(Style::default().fg(Color::White));
        frame.render_widget(heading, chunks[1]);

        self.render_auth_field(
            frame,
            chunks[2],
            "Username",
            &self.auth.username,
            self.auth.field == AuthField::Username,
            false,
        );
        self.render_auth_field(
            frame,
            chunks[3],
            "Email",
            &self.auth.email,
            self.auth.field == AuthField::Email,
            false,
        );
        self.render_auth_field(
            frame,
            chunks[4],
            "Password",
            &self.auth.password,
            self.auth.field == AuthField::Password,
            true,
        );

        self.render_help_bar(
            frame,
            chunks[6],
            "Tab: next field | Enter: create account | Ctrl+L: sign in | Esc: back",
        );
    }

    fn render_delete_confirm(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.render_title_bar(frame, chunks[0]);

        let message = if let Some(ref note) = self.pending_delete {
            format!(
                "Permanently delete: {}?\n\nThis cannot be undone.\nPress Enter/y to confirm, Esc/n to cancel",
                note.title
            )
        } else {
            "Permanently delete note?".to_string()
        };
        let confirm = Paragraph::new(message)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Confirm Permanent Delete"),
            )
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Red));
        frame.render_widget(confirm, chunks[1]);

        let help = Paragraph::new("Enter/y: confirm | Esc/n: cancel")
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }

    fn render_help(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.render_title_bar(frame, chunks[0]);

        let help_text = r#"📖 Keyboard Shortcuts

LIST:
  j / ↓          Navigate down
  k / ↑          Navigate up
  n              Create new note
  e / Enter      Edit selected note
  /              Search notes
  p              Pinned view (press again to clear)
  a              Archived view (press again to clear)
  t              Trash view (press again to clear)
  P              Pin/unpin selected note
  A              Archive/unarchive selected note
  d              Move to trash, or restore from trash
  D              Permanently delete (trash only)
  r              Refresh from server
  L              Log out
  ?              Show this help
  Esc            Clear search/view, then quit

FORM:
  Tab / Shift+Tab  Move between fields
  Ctrl+P           Toggle pinned
  Ctrl+A           Toggle archived
  Ctrl+S           Save
  Esc              Cancel without saving

NOTES:
  Pin and archive exclude each other: an archived note
  cannot be pinned and a pinned note cannot be archived.
  Restoring from the trash always returns a note to the
  plain active view.
"#;

        let help_para = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Keyboard Shortcuts"),
            )
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::White));
        frame.render_widget(help_para, chunks[1]);

        let help = Paragraph::new("Esc: back")
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
