use serde::{Deserialize, Serialize};

use crate::error::AppError;

// Request body for creating a new Todo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoInput {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl CreateTodoInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_title(&self.title)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GetTodoInput {
    pub id: i64,
}

/// Partial patch: fields left as `None` are not touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodoInput {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodoInput {
    pub fn validate(&self) -> Result<(), AppError> {
        match self.title.as_deref() {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteTodoInput {
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTodoOutput {
    pub success: bool,
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Title cannot be empty".to_string()));
    }
    Ok(())
}
