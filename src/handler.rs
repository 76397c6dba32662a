//! Data-access handlers. Each one validates its input, runs a single SQL
//! statement against the pool and maps the row back to a [`Todo`].

use chrono::Utc;
use sqlx::{query, query_as, SqlitePool};

use crate::{
    error::AppError,
    model::Todo,
    schema::{CreateTodoInput, DeleteTodoInput, DeleteTodoOutput, GetTodoInput, UpdateTodoInput},
};

// Inserts a new Todo. Not idempotent: a retried call creates a second row.
pub async fn create_todo(db: &SqlitePool, input: CreateTodoInput) -> Result<Todo, AppError> {
    input.validate()?;

    let todo = query_as::<_, Todo>(
        "INSERT INTO todos (title, completed, created_at) VALUES (?, ?, ?) \
         RETURNING id, title, completed, created_at",
    )
    .bind(input.title)
    .bind(input.completed)
    .bind(Utc::now())
    .fetch_one(db)
    .await?;

    tracing::debug!(id = todo.id, "created todo");
    Ok(todo)
}

// Absence is a normal outcome here, not an error.
pub async fn get_todo(db: &SqlitePool, input: GetTodoInput) -> Result<Option<Todo>, AppError> {
    let todo = query_as::<_, Todo>(
        "SELECT id, title, completed, created_at FROM todos WHERE id = ?",
    )
    .bind(input.id)
    .fetch_optional(db)
    .await?;

    Ok(todo)
}

pub async fn get_todos(db: &SqlitePool) -> Result<Vec<Todo>, AppError> {
    let todos = query_as::<_, Todo>(
        "SELECT id, title, completed, created_at FROM todos ORDER BY id ASC",
    )
    .fetch_all(db)
    .await?;

    Ok(todos)
}

/// Applies a partial patch in one statement. `COALESCE` keeps the stored
/// value for every field the caller left out, and `created_at` is never
/// part of the `SET` list.
pub async fn update_todo(db: &SqlitePool, input: UpdateTodoInput) -> Result<Todo, AppError> {
    input.validate()?;

    let id = input.id;
    let todo = query_as::<_, Todo>(
        "UPDATE todos SET title = COALESCE(?, title), completed = COALESCE(?, completed) \
         WHERE id = ? RETURNING id, title, completed, created_at",
    )
    .bind(input.title)
    .bind(input.completed)
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(AppError::NotFound(id))?;

    tracing::debug!(id, "updated todo");
    Ok(todo)
}

pub async fn delete_todo(
    db: &SqlitePool,
    input: DeleteTodoInput,
) -> Result<DeleteTodoOutput, AppError> {
    let rows_affected = query("DELETE FROM todos WHERE id = ?")
        .bind(input.id)
        .execute(db)
        .await?
        .rows_affected();

    tracing::debug!(id = input.id, rows_affected, "deleted todo");
    Ok(DeleteTodoOutput {
        success: rows_affected > 0,
    })
}
