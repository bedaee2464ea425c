//! The confirm gate: a single-flight "are you sure?" coordinator.
//!
//! Destructive actions call [`ConfirmGate::confirm`] and only proceed on an
//! explicit accept. At most one confirmation can be open; a second call while
//! one is pending is rejected instead of stacking dialogs.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

/// What the dialog shows. Destroyed when the user resolves it.
#[derive(Debug, Clone)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub severity: Severity,
}

impl ConfirmRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirmar".to_string(),
            cancel_label: "Cancelar".to_string(),
            severity: Severity::Warning,
        }
    }

    /// The usual shape for deletes.
    pub fn danger(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Danger,
            confirm_label: "Eliminar".to_string(),
            ..Self::new(title, message)
        }
    }

    pub fn with_labels(
        mut self,
        confirm: impl Into<String>,
        cancel: impl Into<String>,
    ) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }
}

/// Presents a confirmation to the user and reports their decision.
/// `false` means cancelled.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn show(&self, request: &ConfirmRequest) -> bool;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfirmError {
    #[error("a confirmation dialog is already open")]
    AlreadyPending,
}

/// Single-flight gate over a prompt implementation.
pub struct ConfirmGate<P> {
    prompt: P,
    pending: AtomicBool,
}

impl<P: ConfirmPrompt> ConfirmGate<P> {
    pub fn new(prompt: P) -> Self {
        Self {
            prompt,
            pending: AtomicBool::new(false),
        }
    }

    /// True while a confirmation is open; callers disable their triggering
    /// control on this flag to block double submission.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Show the dialog and resolve to the user's decision.
    ///
    /// Returns [`ConfirmError::AlreadyPending`] when called while another
    /// confirmation is still open.
    pub async fn confirm(&self, request: ConfirmRequest) -> Result<bool, ConfirmError> {
        if self.pending.swap(true, Ordering::SeqCst) {
            return Err(ConfirmError::AlreadyPending);
        }

        let decision = self.prompt.show(&request).await;
        self.pending.store(false, Ordering::SeqCst);
        Ok(decision)
    }
}
