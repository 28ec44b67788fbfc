use std::sync::{Arc, Mutex, RwLock};

use chrono::Timelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::RwLock as AsyncRwLock;
use tracing::info;

use crate::clock::Clock;
use crate::config::Config;
use crate::journal::settings::Settings;
use crate::journal::store::KeyValueStore;
use crate::journal::Journal;
use crate::llm_client::{Completion, LlmClient};
use crate::prompting::pools::PromptPools;
use crate::prompting::source::{
    LocalPromptSource, PromptContext, PromptSource, RemotePromptSource,
};
use crate::prompting::PromptService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub journal: Arc<Journal>,
    pub store: Arc<dyn KeyValueStore>,
    pub settings: Arc<AsyncRwLock<Settings>>,
    pub prompts: PromptService,
    /// `None` when no API key is configured; companion features then run locally.
    completion: Arc<RwLock<Option<Arc<dyn Completion>>>>,
    pub clock: Arc<dyn Clock>,
    pub rng: Arc<Mutex<StdRng>>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        journal: Arc<Journal>,
        settings: Settings,
        completion: Option<Arc<dyn Completion>>,
        clock: Arc<dyn Clock>,
        mut rng: StdRng,
    ) -> Self {
        let source = prompt_source(completion.clone(), &mut rng);
        let prompts = PromptService::new(source, &PromptContext::new(clock.now().hour(), None));

        Self {
            journal,
            store,
            settings: Arc::new(AsyncRwLock::new(settings)),
            prompts,
            completion: Arc::new(RwLock::new(completion)),
            clock,
            rng: Arc::new(Mutex::new(rng)),
            config,
        }
    }

    pub fn completion(&self) -> Option<Arc<dyn Completion>> {
        self.completion
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Rewires the completion service after the stored API key changed. A
    /// removed key falls back to the key from the environment, if any.
    pub fn use_api_key(&self, stored_key: Option<&str>) {
        let completion = completion_for(stored_key, &self.config);
        let source = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            prompt_source(completion.clone(), &mut rng)
        };
        *self
            .completion
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = completion;
        self.prompts.replace_source(source);
    }
}

/// Stored key first, then `ANTHROPIC_API_KEY`.
pub fn completion_for(stored_key: Option<&str>, config: &Config) -> Option<Arc<dyn Completion>> {
    let key = stored_key.or(config.anthropic_api_key.as_deref())?;
    info!("Completion service enabled at {}", config.anthropic_base_url);
    Some(Arc::new(LlmClient::new(key.to_string(), &config.anthropic_base_url)))
}

fn prompt_source(
    completion: Option<Arc<dyn Completion>>,
    rng: &mut StdRng,
) -> Arc<dyn PromptSource> {
    let local = LocalPromptSource::new(PromptPools::default(), StdRng::seed_from_u64(rng.gen()));
    match completion {
        Some(completion) => Arc::new(RemotePromptSource::new(local, completion)),
        None => Arc::new(local),
    }
}
