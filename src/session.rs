use crate::notify::{Notification, Notifier, Variant};
use crate::service::{CodeGeneration, Provider, ServiceClient};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type SharedService = Arc<dyn ServiceClient + Send + Sync>;
pub type SharedNotifier = Arc<dyn Notifier + Send + Sync>;

#[derive(Debug, Default)]
struct ProviderState {
    providers: Vec<Provider>,
    selected: String,
}

/// Per-UI state around the code-generation service: busy flag, provider
/// list and current selection.
///
/// Operations take `&self` so one session can be shared between tasks.
/// Overlapping calls are not serialized.
pub struct GenerationSession {
    service: SharedService,
    notifier: SharedNotifier,
    busy: AtomicBool,
    state: RwLock<ProviderState>,
}

/// Holds the busy flag up until dropped, whichever way the call exits.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl GenerationSession {
    pub fn new(service: SharedService, notifier: SharedNotifier) -> Self {
        Self {
            service,
            notifier,
            busy: AtomicBool::new(false),
            state: RwLock::new(ProviderState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ProviderState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProviderState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generate code for `prompt`. Failures are reported through the
    /// notifier and come back as `None`.
    pub async fn generate_code(&self, prompt: impl Into<String>) -> Option<CodeGeneration> {
        let _busy = BusyGuard::raise(&self.busy);
        let prompt = prompt.into();
        tracing::debug!(service = self.service.name(), prompt_len = prompt.len(), "generating code");

        match self.service.generate(prompt).await {
            Ok(result) => {
                self.notifier.notify(Notification::new(
                    "Code Generated",
                    "Your code has been generated successfully.",
                    Variant::Default,
                ));
                Some(result)
            }
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "code generation failed");
                self.notifier.notify(Notification::new(
                    "Error",
                    "Failed to generate code. Please try again.",
                    Variant::Destructive,
                ));
                None
            }
        }
    }

    /// Reload the provider list, selecting the first entry when there is one.
    /// On failure the previous list and selection are kept.
    pub async fn load_providers(&self) {
        match self.service.list_providers().await {
            Ok(providers) => {
                tracing::debug!(count = providers.len(), "providers loaded");
                let mut state = self.write();
                if let Some(first) = providers.first() {
                    state.selected = first.id.clone();
                }
                state.providers = providers;
            }
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "failed to load providers");
                self.notifier.notify(Notification::new(
                    "Error",
                    "Failed to load LLM providers.",
                    Variant::Destructive,
                ));
            }
        }
    }

    /// Any id is accepted, listed or not.
    pub fn set_selected_provider(&self, id: impl Into<String>) {
        self.write().selected = id.into();
    }

    pub fn providers(&self) -> Vec<Provider> {
        self.read().providers.clone()
    }

    pub fn selected_provider(&self) -> String {
        self.read().selected.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}
