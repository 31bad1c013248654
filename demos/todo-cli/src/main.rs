//! Simple CLI walkthrough of the Taskdeck client.
//!
//! Logs in (or reuses a persisted session), lists tasks, creates one, and
//! toggles it. Configuration comes from the environment:
//!
//! ```text
//! TASKDECK_API_URL=http://localhost:8000/api todo-cli user@example.com secret
//! ```

use anyhow::Result;
use std::sync::Arc;
use taskdeck_client::auth::LoginRequest;
use taskdeck_client::client::ApiClient;
use taskdeck_client::config::ClientConfig;
use taskdeck_client::navigator::Navigator;
use taskdeck_client::tasks::TaskCreate;
use taskdeck_session::channel::FileChannel;
use taskdeck_session::clock::SystemClock;
use taskdeck_session::config::SessionConfig;
use taskdeck_session::policy::SessionPolicy;
use taskdeck_session::store::SessionStore;

/// A terminal has no login screen to switch to, so "navigation" is a
/// printed prompt.
struct PromptNavigator;

impl Navigator for PromptNavigator {
    fn navigate_to_login(&self, path: &str) {
        println!("→ session ended; log in again at {path}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let base_url = std::env::var("TASKDECK_API_URL")
        .unwrap_or_else(|_| "http://localhost:8000/api".to_string());

    let state_dir = std::env::temp_dir().join("taskdeck-demo");
    let session_config = SessionConfig::default();
    let clock = Arc::new(SystemClock);
    let policy = SessionPolicy::new(&session_config, clock.clone());
    let store = SessionStore::new(
        FileChannel::new("cookie", state_dir.join("cookies.json")),
        FileChannel::new("local", state_dir.join("local-store.json")),
        session_config,
        clock,
    );
    let client = ApiClient::new(
        ClientConfig::new(base_url),
        store,
        policy,
        PromptNavigator,
    );

    if client.is_authenticated() {
        println!("Reusing persisted session ({}s remaining)", client.remaining_seconds());
    } else {
        let mut args = std::env::args().skip(1);
        let (Some(email), Some(password)) = (args.next(), args.next()) else {
            eprintln!("usage: todo-cli <email> <password>");
            return Ok(());
        };

        let response = client.login(&LoginRequest { email, password }).await?;
        println!("Logged in as {}", response.user.email);
    }

    let tasks = client.list_tasks().await?;
    println!("\n{} task(s):", tasks.len());
    for task in &tasks {
        let status = if task.completed { "✓" } else { " " };
        println!("  [{}] {} - {}", status, task.id, task.title);
    }

    println!("\nCreating a task...");
    let created = client
        .create_task(&TaskCreate {
            title: "Try the taskdeck CLI".to_string(),
            description: Some("Created by the demo binary".to_string()),
        })
        .await?;
    println!("  created {} ({})", created.id, created.title);

    println!("Toggling it complete...");
    let toggled = client.toggle_completion(&created.id).await?;
    println!("  {} → completed = {}", toggled.id, toggled.completed);

    if client.is_expiring_soon() {
        println!(
            "\nWarning: session expires in {}s, log in again soon",
            client.remaining_seconds()
        );
    }

    Ok(())
}
