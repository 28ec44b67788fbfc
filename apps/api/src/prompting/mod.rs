// Prompt selection: static pools, the swappable `PromptSource`, and the slot
// holding the prompt currently on display.

pub mod handlers;
pub mod pools;
pub mod prompts;
pub mod slot;
pub mod source;

use std::sync::{Arc, RwLock};

use tokio::task::JoinHandle;
use tracing::info;

use crate::prompting::slot::{CurrentPrompt, PromptSlot};
use crate::prompting::source::{PromptContext, PromptSource};

/// Front door for prompt refreshes. Callers never see which source is wired in.
#[derive(Clone)]
pub struct PromptService {
    source: Arc<RwLock<Arc<dyn PromptSource>>>,
    slot: Arc<PromptSlot>,
}

impl PromptService {
    pub fn new(source: Arc<dyn PromptSource>, initial: &PromptContext) -> Self {
        let slot = Arc::new(PromptSlot::new(source.immediate(initial)));
        Self {
            source: Arc::new(RwLock::new(source)),
            slot,
        }
    }

    pub fn backend(&self) -> &'static str {
        self.source().backend()
    }

    /// Swaps the backend. The displayed prompt and any in-flight refinement
    /// are left alone.
    pub fn replace_source(&self, source: Arc<dyn PromptSource>) {
        info!("Prompt source set to {}", source.backend());
        *self.source.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = source;
    }

    fn source(&self) -> Arc<dyn PromptSource> {
        Arc::clone(&self.source.read().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }

    pub fn current(&self) -> CurrentPrompt {
        self.slot.current()
    }

    /// Displays a locally selected prompt right away. When the source can refine
    /// it, the refinement runs in the background and lands only if no newer
    /// refresh has started by then.
    pub fn refresh(&self, ctx: PromptContext) -> (CurrentPrompt, Option<JoinHandle<bool>>) {
        let source = self.source();
        let refines = source.refines();
        let request_id = self.slot.begin(source.immediate(&ctx), refines);
        let current = self.slot.current();

        if !refines {
            return (current, None);
        }

        let slot = Arc::clone(&self.slot);
        let task = tokio::spawn(async move {
            let outcome = source.refine(&ctx).await;
            slot.settle(request_id, outcome)
        });
        (current, Some(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubCompletion;
    use crate::llm_client::RemoteOutcome;
    use crate::prompting::pools::{PromptPools, EVENING_PROMPTS};
    use crate::prompting::source::{LocalPromptSource, RemotePromptSource};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn local() -> LocalPromptSource {
        LocalPromptSource::new(PromptPools::default(), StdRng::seed_from_u64(1))
    }

    #[tokio::test]
    async fn test_local_refresh_settles_synchronously() {
        let service = PromptService::new(Arc::new(local()), &PromptContext::new(9, None));
        let (current, task) = service.refresh(PromptContext::new(20, None));
        assert!(task.is_none());
        assert!(EVENING_PROMPTS.contains(&current.text.as_str()));
        assert_eq!(current.remote, None);
        assert_eq!(service.current(), current);
    }

    #[tokio::test]
    async fn test_remote_refresh_shows_local_then_remote() {
        let source = RemotePromptSource::new(
            local(),
            Arc::new(StubCompletion::ok("What surprised you today?")),
        );
        let service = PromptService::new(Arc::new(source), &PromptContext::new(9, None));

        let (current, task) = service.refresh(PromptContext::new(20, None));
        assert!(EVENING_PROMPTS.contains(&current.text.as_str()));
        assert_eq!(current.remote, Some(RemoteOutcome::Pending));

        assert!(task.unwrap().await.unwrap());
        let settled = service.current();
        assert_eq!(settled.text, "What surprised you today?");
        assert_eq!(settled.request_id, current.request_id);
    }

    #[tokio::test]
    async fn test_replace_source_switches_backend() {
        let service = PromptService::new(Arc::new(local()), &PromptContext::new(9, None));
        assert_eq!(service.backend(), "local");

        let remote = RemotePromptSource::new(local(), Arc::new(StubCompletion::ok("Hi?")));
        service.replace_source(Arc::new(remote));
        assert_eq!(service.backend(), "remote");
        let (_, task) = service.refresh(PromptContext::new(9, None));
        assert!(task.is_some());
    }

    #[tokio::test]
    async fn test_remote_failure_keeps_local_prompt() {
        let source = RemotePromptSource::new(local(), Arc::new(StubCompletion::failing()));
        let service = PromptService::new(Arc::new(source), &PromptContext::new(9, None));

        let (current, task) = service.refresh(PromptContext::new(20, None));
        task.unwrap().await.unwrap();
        let settled = service.current();
        assert_eq!(settled.text, current.text);
        assert!(matches!(settled.remote, Some(RemoteOutcome::Failed(_))));
    }
}
