//! In-memory `RemoteTodoGateway` that behaves like the service, counts calls,
//! and can be told to fail upcoming calls.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use todo_sync::{Draft, RemoteTodoGateway, Todo, TodoError, TodoId, TodoPatch};

#[derive(Default)]
struct State {
    todos: Vec<Todo>,
    next_id: u64,
    calls: usize,
    failures: VecDeque<TodoError>,
}

#[derive(Default)]
pub struct FakeGateway {
    state: Mutex<State>,
}

impl FakeGateway {
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let next_id = todos.len() as u64 + 1;
        Self {
            state: Mutex::new(State {
                todos,
                next_id,
                ..State::default()
            }),
        }
    }

    /// Make the next gateway call fail with `err` without touching server state.
    pub fn fail_next(&self, err: TodoError) {
        self.state.lock().unwrap().failures.push_back(err);
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn server_todos(&self) -> Vec<Todo> {
        self.state.lock().unwrap().todos.clone()
    }

    /// Delete on the server side only, as another client would.
    pub fn delete_remotely(&self, id: &TodoId) {
        self.state.lock().unwrap().todos.retain(|t| &t.id != id);
    }

    fn begin(&self) -> Result<MutexGuard<'_, State>, TodoError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        match state.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl RemoteTodoGateway for FakeGateway {
    async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        Ok(self.begin()?.todos.clone())
    }

    async fn get(&self, id: &TodoId) -> Result<Todo, TodoError> {
        let state = self.begin()?;
        state
            .todos
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| TodoError::NotFound {
                id: Some(id.clone()),
            })
    }

    async fn create(&self, draft: &Draft) -> Result<Todo, TodoError> {
        let mut state = self.begin()?;
        if draft.title.trim().is_empty() {
            return Err(TodoError::Validation("title must not be empty".into()));
        }
        let id = state.next_id;
        state.next_id += 1;
        let now = Utc::now();
        let todo = Todo {
            id: TodoId::from(id.to_string()),
            title: draft.title.clone(),
            description: draft.description.clone(),
            completed: false,
            created_at: now,
            updated_at: Some(now),
        };
        state.todos.push(todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<Todo, TodoError> {
        let mut state = self.begin()?;
        let todo = state
            .todos
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| TodoError::NotFound {
                id: Some(id.clone()),
            })?;
        if let Some(title) = &patch.title {
            todo.title = title.clone();
        }
        if let Some(description) = &patch.description {
            todo.description = description.clone();
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        todo.updated_at = Some(Utc::now());
        Ok(todo.clone())
    }

    async fn remove(&self, id: &TodoId) -> Result<(), TodoError> {
        let mut state = self.begin()?;
        let position = state
            .todos
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TodoError::NotFound {
                id: Some(id.clone()),
            })?;
        state.todos.remove(position);
        Ok(())
    }
}

pub fn created_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn todo(id: &str, title: &str, completed: bool) -> Todo {
    Todo {
        id: TodoId::from(id),
        title: title.to_string(),
        description: String::new(),
        completed,
        created_at: created_at(),
        updated_at: None,
    }
}
