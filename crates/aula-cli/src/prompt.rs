//! Terminal implementations of the client library's prompt seams.

use async_trait::async_trait;
use aula_client::{ConfirmPrompt, ConfirmRequest, Severity};
use dialoguer::{Confirm, MultiSelect, theme::ColorfulTheme};

/// Dialoguer-backed confirmation dialog. Runs the blocking prompt on the
/// blocking thread pool; an aborted prompt (EOF, ctrl-c) counts as cancel.
pub struct TerminalConfirm;

#[async_trait]
impl ConfirmPrompt for TerminalConfirm {
    async fn show(&self, request: &ConfirmRequest) -> bool {
        let marker = match request.severity {
            Severity::Danger => "[!]",
            Severity::Warning => "[?]",
            Severity::Info => "[i]",
        };
        let prompt = format!(
            "{marker} {}\n{} ({} / {})",
            request.title, request.message, request.confirm_label, request.cancel_label
        );

        tokio::task::spawn_blocking(move || {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(false)
                .interact()
                .unwrap_or(false)
        })
        .await
        .unwrap_or(false)
    }
}

/// Multi-select over rendered row labels; returns the chosen indices.
pub async fn select_rows(title: String, labels: Vec<String>) -> Vec<usize> {
    tokio::task::spawn_blocking(move || {
        MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(title)
            .items(&labels)
            .interact()
            .unwrap_or_default()
    })
    .await
    .unwrap_or_default()
}
