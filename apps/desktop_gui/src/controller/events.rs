//! UI/backend events and error modeling for the directory window.

use client_core::LoadTicket;
use shared::protocol::Company;

pub enum UiEvent {
    /// Result of one load; the error side is already the banner text.
    CompaniesLoaded {
        ticket: LoadTicket,
        result: Result<Vec<Company>, String>,
    },
    /// Worker lifecycle notice for the status line.
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CommandQueue,
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Connection",
        UiErrorCategory::Unknown => "Error",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        // Load failures travel as CompaniesLoaded; only worker and queue
        // problems reach this classifier.
        let category = if message_lower.contains("full")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_line(&self) -> String {
        format!("{}: {}", err_label(self.category), self.message)
    }
}
