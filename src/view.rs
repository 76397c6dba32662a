//! Client-side list view.
//!
//! Holds the transient copy of the todo list and the single edit session.
//! Each row is either [`RowMode::Viewing`] or [`RowMode::Editing`]; at most one
//! row can be editing at a time. After the initial load the list is never
//! refetched: every mutation patches the local copy from its own response.

use std::fmt::Write as _;

use crate::{
    client::TodoApi,
    model::Todo,
    schema::{CreateTodoInput, DeleteTodoInput, UpdateTodoInput},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode<'a> {
    Viewing,
    Editing { draft: &'a str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

#[derive(Debug)]
struct EditSession {
    id: i64,
    draft: String,
}

pub struct TodoView<A> {
    api: A,
    todos: Vec<Todo>,
    new_title: String,
    editing: Option<EditSession>,
    loading: bool,
    mounted: bool,
}

impl<A: TodoApi> TodoView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            todos: Vec::new(),
            new_title: String::new(),
            editing: None,
            loading: false,
            mounted: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn new_title(&self) -> &str {
        &self.new_title
    }

    pub fn set_new_title(&mut self, title: impl Into<String>) {
        self.new_title = title.into();
    }

    /// Loads the list once. Later calls are no-ops after a successful load.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        match self.api.get_todos().await {
            Ok(todos) => {
                self.todos = todos;
                self.mounted = true;
            }
            Err(error) => tracing::error!(%error, "failed to load todos"),
        }
    }

    pub async fn submit_new_todo(&mut self) {
        let title = self.new_title.trim();
        if title.is_empty() {
            return;
        }
        let input = CreateTodoInput::new(title);

        self.loading = true;
        match self.api.create_todo(input).await {
            Ok(todo) => {
                self.todos.push(todo);
                self.new_title.clear();
            }
            Err(error) => tracing::error!(%error, "failed to create todo"),
        }
        self.loading = false;
    }

    pub async fn toggle_complete(&mut self, id: i64) {
        let Some(current) = self.find(id) else {
            tracing::warn!(id, "toggle for a todo that is not in the list");
            return;
        };
        let input = UpdateTodoInput {
            id,
            title: None,
            completed: Some(!current.completed),
        };

        match self.api.update_todo(input).await {
            Ok(updated) => self.replace(updated),
            Err(error) => tracing::error!(%error, id, "failed to toggle todo"),
        }
    }

    pub fn row_mode(&self, id: i64) -> RowMode<'_> {
        match &self.editing {
            Some(session) if session.id == id => RowMode::Editing {
                draft: &session.draft,
            },
            _ => RowMode::Viewing,
        }
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing.as_ref().map(|session| session.id)
    }

    /// Enters editing for `id` with the current title as draft. Any other
    /// open session is discarded. Returns `false` if the row is unknown.
    pub fn start_edit(&mut self, id: i64) -> bool {
        let Some(todo) = self.find(id) else {
            return false;
        };
        self.editing = Some(EditSession {
            id,
            draft: todo.title.clone(),
        });
        true
    }

    /// Ignored unless a row is editing.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        if let Some(session) = self.editing.as_mut() {
            session.draft = draft.into();
        }
    }

    /// Sends the trimmed draft. On success the row is replaced and the view
    /// returns to viewing; on failure the session stays open untouched.
    pub async fn save_edit(&mut self) {
        let Some(session) = self.editing.as_ref() else {
            return;
        };
        let title = session.draft.trim();
        if title.is_empty() {
            return;
        }
        let input = UpdateTodoInput {
            id: session.id,
            title: Some(title.to_string()),
            completed: None,
        };

        match self.api.update_todo(input).await {
            Ok(updated) => {
                self.replace(updated);
                self.editing = None;
            }
            Err(error) => tracing::error!(%error, "failed to update todo"),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Deleting only works from viewing; a row that is being edited must be
    /// saved or cancelled first.
    pub async fn delete_todo(&mut self, id: i64) {
        if self.editing_id() == Some(id) {
            tracing::warn!(id, "delete ignored while the row is being edited");
            return;
        }

        match self.api.delete_todo(DeleteTodoInput { id }).await {
            Ok(_) => self.todos.retain(|todo| todo.id != id),
            Err(error) => tracing::error!(%error, id, "failed to delete todo"),
        }
    }

    pub fn stats(&self) -> Stats {
        let total = self.todos.len();
        let completed = self.todos.iter().filter(|todo| todo.completed).count();
        Stats {
            total,
            completed,
            remaining: total - completed,
        }
    }

    pub fn render(&self) -> String {
        let stats = self.stats();
        let mut out = String::new();

        let _ = writeln!(out, "Todo App");
        let _ = writeln!(
            out,
            "Total: {} | Completed: {} | Remaining: {}",
            stats.total, stats.completed, stats.remaining
        );
        let _ = writeln!(out);

        if self.todos.is_empty() {
            let _ = writeln!(out, "No tasks yet. Add one above to get started!");
            return out;
        }

        for todo in &self.todos {
            let check = if todo.completed { "[x]" } else { "[ ]" };
            match self.row_mode(todo.id) {
                RowMode::Editing { draft } => {
                    let _ = writeln!(out, "{check} #{} > {draft} (editing)", todo.id);
                }
                RowMode::Viewing => {
                    let done = if todo.completed { " [done]" } else { "" };
                    let _ = writeln!(
                        out,
                        "{check} #{} {}{done}  created {}",
                        todo.id,
                        todo.title,
                        todo.created_at.format("%Y-%m-%d")
                    );
                }
            }
        }
        out
    }

    fn find(&self, id: i64) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    fn replace(&mut self, updated: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|todo| todo.id == updated.id) {
            *slot = updated;
        }
    }
}
