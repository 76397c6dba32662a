//! Typed client for the RPC endpoints exposed by [`crate::route`].
//!
//! [`TodoApi`] is the seam the view depends on; [`RpcClient`] is the
//! `reqwest` implementation that talks to a running server.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

use crate::{
    model::Todo,
    schema::{CreateTodoInput, DeleteTodoInput, DeleteTodoOutput, GetTodoInput, UpdateTodoInput},
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{code} ({status}): {message}")]
    Rpc {
        status: u16,
        code: String,
        message: String,
    },
}

impl ClientError {
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Rpc { code, .. } => Some(code),
            ClientError::Transport(_) => None,
        }
    }
}

#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, ClientError>;
    async fn get_todo(&self, input: GetTodoInput) -> Result<Option<Todo>, ClientError>;
    async fn get_todos(&self) -> Result<Vec<Todo>, ClientError>;
    async fn update_todo(&self, input: UpdateTodoInput) -> Result<Todo, ClientError>;
    async fn delete_todo(&self, input: DeleteTodoInput) -> Result<DeleteTodoOutput, ClientError>;
}

#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

impl RpcClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, operation: &str) -> String {
        format!("{}/rpc/{operation}", self.base_url)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }
    Err(rpc_error(status, response.text().await.unwrap_or_default()))
}

fn rpc_error(status: StatusCode, body: String) -> ClientError {
    let parsed: Option<ErrorBody> = serde_json::from_str(&body).ok();
    let (code, message) = match parsed {
        Some(ErrorBody { code, message }) => (
            code.unwrap_or_else(|| "UNKNOWN".to_string()),
            message.unwrap_or_default(),
        ),
        None => ("UNKNOWN".to_string(), body),
    };
    ClientError::Rpc {
        status: status.as_u16(),
        code,
        message,
    }
}

#[async_trait]
impl TodoApi for RpcClient {
    async fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, ClientError> {
        let response = self
            .http
            .post(self.url("createTodo"))
            .json(&input)
            .send()
            .await?;
        decode(response).await
    }

    async fn get_todo(&self, input: GetTodoInput) -> Result<Option<Todo>, ClientError> {
        let response = self
            .http
            .get(self.url("getTodo"))
            .query(&input)
            .send()
            .await?;
        decode(response).await
    }

    async fn get_todos(&self) -> Result<Vec<Todo>, ClientError> {
        let response = self.http.get(self.url("getTodos")).send().await?;
        decode(response).await
    }

    async fn update_todo(&self, input: UpdateTodoInput) -> Result<Todo, ClientError> {
        let response = self
            .http
            .post(self.url("updateTodo"))
            .json(&input)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete_todo(&self, input: DeleteTodoInput) -> Result<DeleteTodoOutput, ClientError> {
        let response = self
            .http
            .post(self.url("deleteTodo"))
            .json(&input)
            .send()
            .await?;
        decode(response).await
    }
}
