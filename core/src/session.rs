//! Single-slot in-place editing.
//!
//! # Design
//! `EditState` is either `Idle` or `Editing { target_id, draft }`, so "at most
//! one todo in edit" holds by construction. The draft is a private copy: it
//! reaches the store only through [`EditSession::save`], which goes through
//! `TodoStore::update` like any other mutation.

use tracing::debug;

use crate::error::TodoError;
use crate::gateway::RemoteTodoGateway;
use crate::store::TodoStore;
use crate::types::{Draft, Todo, TodoId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing { target_id: TodoId, draft: Draft },
}

/// Field-level change to the working draft. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftChange {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl DraftChange {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: Some(description.into()),
        }
    }
}

#[derive(Debug, Default)]
pub struct EditSession {
    state: EditState,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    pub fn target_id(&self) -> Option<&TodoId> {
        match &self.state {
            EditState::Editing { target_id, .. } => Some(target_id),
            EditState::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Idle => None,
        }
    }

    /// Begin editing `todo`. Any edit already in progress is dropped unsaved.
    pub fn start_edit(&mut self, todo: &Todo) {
        if let Some(previous) = self.target_id() {
            debug!(%previous, next = %todo.id, "discarding unsaved edit");
        }
        self.state = EditState::Editing {
            target_id: todo.id.clone(),
            draft: Draft::from(todo),
        };
    }

    pub fn update_draft(&mut self, change: DraftChange) -> Result<(), TodoError> {
        let EditState::Editing { draft, .. } = &mut self.state else {
            return Err(TodoError::NotEditing);
        };
        if let Some(title) = change.title {
            draft.title = title;
        }
        if let Some(description) = change.description {
            draft.description = description;
        }
        Ok(())
    }

    /// Commit the draft through `store`. The session returns to `Idle` only
    /// when the service accepted the change; any failure keeps the edit open
    /// so it can be retried or cancelled.
    pub async fn save<G: RemoteTodoGateway>(
        &mut self,
        store: &mut TodoStore<G>,
    ) -> Result<Todo, TodoError> {
        let EditState::Editing { target_id, draft } = &self.state else {
            return Err(TodoError::NotEditing);
        };
        draft.validate()?;
        let saved = store.update(target_id, draft.clone()).await?;
        self.state = EditState::Idle;
        Ok(saved)
    }

    /// Drop the edit. The store is never touched.
    pub fn cancel(&mut self) {
        self.state = EditState::Idle;
    }
}
