//! Holder for the prompt currently on display. Last request wins: a late
//! refinement for a superseded refresh is dropped.

use std::sync::Mutex;

use serde::Serialize;
use tracing::debug;

use crate::llm_client::RemoteOutcome;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentPrompt {
    pub request_id: u64,
    pub text: String,
    /// `None` when the prompt source has no remote path.
    pub remote: Option<RemoteOutcome>,
}

#[derive(Debug)]
pub struct PromptSlot {
    state: Mutex<CurrentPrompt>,
}

impl PromptSlot {
    pub fn new(text: String) -> Self {
        Self {
            state: Mutex::new(CurrentPrompt {
                request_id: 0,
                text,
                remote: None,
            }),
        }
    }

    /// Shows `text` immediately and supersedes every earlier request.
    pub fn begin(&self, text: String, awaiting_remote: bool) -> u64 {
        let mut state = self.lock();
        let request_id = state.request_id + 1;
        *state = CurrentPrompt {
            request_id,
            text,
            remote: awaiting_remote.then_some(RemoteOutcome::Pending),
        };
        request_id
    }

    /// Applies a remote outcome. Returns `false` when the request was superseded.
    pub fn settle(&self, request_id: u64, outcome: RemoteOutcome) -> bool {
        let mut state = self.lock();
        if state.request_id != request_id {
            debug!(
                "Discarding prompt for request {request_id}; request {} is current",
                state.request_id
            );
            return false;
        }
        if let RemoteOutcome::Succeeded(text) = &outcome {
            state.text = text.clone();
        }
        state.remote = Some(outcome);
        true
    }

    pub fn current(&self) -> CurrentPrompt {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CurrentPrompt> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_shows_local_text_as_pending() {
        let slot = PromptSlot::new("initial".to_string());
        let id = slot.begin("local".to_string(), true);
        let current = slot.current();
        assert_eq!(current.request_id, id);
        assert_eq!(current.text, "local");
        assert_eq!(current.remote, Some(RemoteOutcome::Pending));
    }

    #[test]
    fn test_success_replaces_text() {
        let slot = PromptSlot::new(String::new());
        let id = slot.begin("local".to_string(), true);
        assert!(slot.settle(id, RemoteOutcome::Succeeded("remote".to_string())));
        assert_eq!(slot.current().text, "remote");
    }

    #[test]
    fn test_failure_keeps_local_text() {
        let slot = PromptSlot::new(String::new());
        let id = slot.begin("local".to_string(), true);
        assert!(slot.settle(id, RemoteOutcome::Failed("timeout".to_string())));
        let current = slot.current();
        assert_eq!(current.text, "local");
        assert_eq!(current.remote, Some(RemoteOutcome::Failed("timeout".to_string())));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let slot = PromptSlot::new(String::new());
        let first = slot.begin("first local".to_string(), true);
        let second = slot.begin("second local".to_string(), true);

        assert!(slot.settle(second, RemoteOutcome::Succeeded("second remote".to_string())));
        assert!(!slot.settle(first, RemoteOutcome::Succeeded("first remote".to_string())));

        let current = slot.current();
        assert_eq!(current.request_id, second);
        assert_eq!(current.text, "second remote");
    }

    #[test]
    fn test_local_only_request_has_no_remote_status() {
        let slot = PromptSlot::new(String::new());
        slot.begin("local".to_string(), false);
        assert_eq!(slot.current().remote, None);
    }
}
