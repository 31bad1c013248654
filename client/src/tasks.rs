//! Task service.
//!
//! CRUD over the backend's user-scoped task endpoints. Every call here runs
//! through the session and identity gates of [`ApiClient`], and the
//! 404-implies-logout rule applies: these paths are keyed by the stored
//! user id, so a miss is treated as an invalidated account.

use crate::client::ApiClient;
use crate::error::Result;
use crate::navigator::Navigator;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use taskdeck_session::channel::StorageChannel;

/// A task as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Backend-issued task identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a task.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskCreate {
    /// Task title.
    pub title: String,
    /// Optional longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update payload; only the provided fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New completion flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Response of the toggle-completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToggleResponse {
    /// Task identifier.
    pub id: String,
    /// Completion flag after the toggle.
    pub completed: bool,
    /// Server-provided confirmation message.
    pub message: String,
}

impl<C, L, N> ApiClient<C, L, N>
where
    C: StorageChannel,
    L: StorageChannel,
    N: Navigator,
{
    /// Fetch all tasks of the current user.
    ///
    /// # Errors
    ///
    /// Fails fast with `NotAuthenticated`/`InvalidIdentity` before any
    /// network traffic; otherwise propagates the session-gate reactions of
    /// [`ApiClient`].
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.user_fetch(Method::GET, "/tasks").await
    }

    /// Create a task.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`list_tasks`](Self::list_tasks).
    pub async fn create_task(&self, task: &TaskCreate) -> Result<Task> {
        self.user_send(Method::POST, "/tasks", task).await
    }

    /// Fetch a single task by id.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`list_tasks`](Self::list_tasks).
    pub async fn get_task(&self, task_id: &str) -> Result<Task> {
        self.user_fetch(Method::GET, &format!("/tasks/{task_id}"))
            .await
    }

    /// Update a task; only fields present in `update` change.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`list_tasks`](Self::list_tasks).
    pub async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<Task> {
        self.user_send(Method::PUT, &format!("/tasks/{task_id}"), update)
            .await
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`list_tasks`](Self::list_tasks).
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        // The delete endpoint's body (if any) carries nothing the caller
        // needs; only the status matters.
        let _: serde_json::Value = self
            .user_fetch(Method::DELETE, &format!("/tasks/{task_id}"))
            .await?;
        Ok(())
    }

    /// Flip a task's completion flag on the server.
    ///
    /// Returns the server's verdict; the caller applies `completed` to its
    /// local copy of the task and changes nothing else.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`list_tasks`](Self::list_tasks).
    pub async fn toggle_completion(&self, task_id: &str) -> Result<ToggleResponse> {
        self.user_fetch(Method::PATCH, &format!("/tasks/{task_id}/complete"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_parses_backend_shape() {
        let parsed: Option<Task> = serde_json::from_str(
            r#"{
                "id": "task-1",
                "title": "Buy milk",
                "description": null,
                "completed": false,
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-02T12:30:00Z"
            }"#,
        )
        .ok();

        let parsed = parsed.as_ref();
        assert_eq!(parsed.map(|t| t.title.as_str()), Some("Buy milk"));
        assert_eq!(parsed.map(|t| t.completed), Some(false));
        assert_eq!(parsed.and_then(|t| t.description.as_deref()), None);
    }

    #[test]
    fn update_serializes_only_provided_fields() {
        let update = TaskUpdate {
            completed: Some(true),
            ..TaskUpdate::default()
        };

        let json = serde_json::to_value(&update).ok();
        assert_eq!(json, Some(serde_json::json!({"completed": true})));
    }

    #[test]
    fn create_omits_missing_description() {
        let create = TaskCreate {
            title: "Buy milk".to_string(),
            description: None,
        };

        let json = serde_json::to_value(&create).ok();
        assert_eq!(json, Some(serde_json::json!({"title": "Buy milk"})));
    }
}
