//! Notes screen: live notes with search and subject/tag filter

use std::sync::Arc;

use parking_lot::RwLock;
use studybuddy_domain::{
    filter_notes, note_filters, FormField, NewNote, Result, StudyNote, ALL_NOTES,
};
use tracing::info;

use crate::screen::{clear_if_expired, Banner, BannerSlot, LiveList, ScreenContext, ScreenScope};
use crate::store::{encode_fields, Query, UserPaths};

/// Notes, search text and filter of the notes screen
#[derive(Debug, Clone, PartialEq)]
pub struct NotesState {
    pub notes: LiveList<StudyNote>,
    pub search: String,
    /// "All", a subject or a tag.
    pub filter: String,
    pub invalid_fields: Vec<FormField>,
    pub banner: Option<Banner>,
}

impl Default for NotesState {
    fn default() -> Self {
        Self {
            notes: LiveList::default(),
            search: String::new(),
            filter: ALL_NOTES.to_string(),
            invalid_fields: Vec::new(),
            banner: None,
        }
    }
}

impl BannerSlot for NotesState {
    fn banner_slot(&mut self) -> &mut Option<Banner> {
        &mut self.banner
    }
}

impl NotesState {
    /// Notes matching the search text and filter.
    #[must_use]
    pub fn visible_notes(&self) -> Vec<StudyNote> {
        filter_notes(&self.notes.items, &self.search, &self.filter)
    }

    /// "All" followed by every subject and tag.
    #[must_use]
    pub fn filters(&self) -> Vec<String> {
        note_filters(&self.notes.items)
    }
}

/// Controller of the notes screen
pub struct NotesController {
    ctx: ScreenContext,
    paths: UserPaths,
    scope: ScreenScope,
    state: Arc<RwLock<NotesState>>,
}

impl NotesController {
    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn new(ctx: ScreenContext) -> Result<Self> {
        let paths = ctx.user_paths()?;
        Ok(Self {
            ctx,
            paths,
            scope: ScreenScope::new("notes"),
            state: Arc::new(RwLock::new(NotesState::default())),
        })
    }

    /// Start the live query on the user's notes.
    pub fn mount(&self) {
        let state = Arc::clone(&self.state);
        self.scope.watch::<StudyNote, _>(
            self.ctx.store.as_ref(),
            &self.paths.notes(),
            Query::new(),
            move |snapshot| state.write().notes.apply(snapshot),
        );
    }

    /// Release the notes listener.
    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Snapshot of the screen state.
    pub fn state(&self) -> NotesState {
        self.state.read().clone()
    }

    /// Search text, matched against title and content.
    pub fn set_search(&self, query: impl Into<String>) {
        self.state.write().search = query.into();
    }

    /// Select "All", a subject or a tag.
    pub fn set_filter(&self, filter: impl Into<String>) {
        self.state.write().filter = filter.into();
    }

    /// Drop the banner once its display time is over.
    pub fn clear_expired_banner(&self) {
        clear_if_expired(&mut self.state.write().banner, self.ctx.clock.instant());
    }

    /// # Errors
    /// Returns the validation error (fields flagged) or the store error.
    pub async fn add_note(&self, form: NewNote) -> Result<String> {
        let note = match form.into_note(self.ctx.clock.now().date_naive()) {
            Ok(note) => note,
            Err(err) => {
                let mut state = self.state.write();
                state.invalid_fields = err.fields().to_vec();
                state.banner = Some(self.ctx.error_banner(&err));
                return Err(err);
            }
        };

        let outcome = self.ctx.store.add(&self.paths.notes(), encode_fields(&note)?).await;
        self.ctx.report(&self.scope, &self.state, &outcome, "Note added!", |state| state.invalid_fields.clear());
        if let Ok(id) = &outcome {
            info!(note_id = %id, tags = note.tags.len(), "note added");
        }
        outcome
    }

    /// # Errors
    /// Returns the store error.
    pub async fn delete_note(&self, note_id: &str) -> Result<()> {
        let outcome = self.ctx.store.delete(&self.paths.note(note_id)).await;
        self.ctx.report(&self.scope, &self.state, &outcome, "Note deleted!", |_| {});
        outcome
    }
}
