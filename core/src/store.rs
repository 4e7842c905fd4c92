//! Authoritative client-side todo collection.
//!
//! # Design
//! Every mutation is confirm-then-apply: the gateway call completes first,
//! and only its returned value is written into the collection. A failed
//! call leaves the collection exactly as it was, so there is never anything
//! to roll back. Order is the service's order; updates replace in place,
//! creations append.
//!
//! Mutating methods take `&mut self`, so one owner cannot have two of them
//! in flight at once.

use tracing::{debug, warn};

use crate::error::TodoError;
use crate::gateway::RemoteTodoGateway;
use crate::types::{Draft, Todo, TodoId, TodoPatch};

#[derive(Debug)]
pub struct TodoStore<G> {
    gateway: G,
    todos: Vec<Todo>,
}

impl<G: RemoteTodoGateway> TodoStore<G> {
    /// An empty store; call [`TodoStore::load`] to populate it.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            todos: Vec::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Replace the whole collection with the service's current list.
    pub async fn load(&mut self) -> Result<&[Todo], TodoError> {
        let todos = self.gateway.list().await.inspect_err(|e| {
            warn!(error = %e, "load failed; keeping previous collection");
        })?;
        debug!(count = todos.len(), "collection loaded");
        self.todos = todos;
        Ok(&self.todos)
    }

    /// Create a todo and append the service's copy of it.
    pub async fn add(&mut self, draft: Draft) -> Result<Todo, TodoError> {
        draft.validate()?;
        let created = self.gateway.create(&draft).await.inspect_err(|e| {
            warn!(error = %e, "create failed");
        })?;
        debug!(id = %created.id, "todo created");
        self.todos.push(created.clone());
        Ok(created)
    }

    /// Flip `completed` for `id`, based on the locally known value.
    pub async fn toggle(&mut self, id: &TodoId) -> Result<Todo, TodoError> {
        let current = self
            .get(id)
            .map(|t| t.completed)
            .ok_or_else(|| TodoError::not_found(id))?;
        let updated = self
            .gateway
            .update(id, &TodoPatch::completed(!current))
            .await
            .inspect_err(|e| warn!(%id, error = %e, "toggle failed"))?;
        self.replace(updated.clone());
        Ok(updated)
    }

    /// Overwrite title and description of `id` with `draft`.
    pub async fn update(&mut self, id: &TodoId, draft: Draft) -> Result<Todo, TodoError> {
        draft.validate()?;
        let updated = self
            .gateway
            .update(id, &TodoPatch::from(draft))
            .await
            .inspect_err(|e| warn!(%id, error = %e, "update failed"))?;
        self.replace(updated.clone());
        Ok(updated)
    }

    /// Delete `id` remotely, then drop it locally. On any error, including
    /// `NotFound`, the local entry stays put.
    pub async fn remove(&mut self, id: &TodoId) -> Result<(), TodoError> {
        self.gateway
            .remove(id)
            .await
            .inspect_err(|e| warn!(%id, error = %e, "remove failed"))?;
        self.todos.retain(|t| &t.id != id);
        debug!(%id, "todo removed");
        Ok(())
    }

    /// Swap in the service's copy, keeping its position. An entity that is no
    /// longer held locally is not re-added.
    fn replace(&mut self, updated: Todo) {
        match self.todos.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => {
                debug!(id = %updated.id, "todo replaced in place");
                *slot = updated;
            }
            None => debug!(id = %updated.id, "updated todo no longer held locally"),
        }
    }
}
