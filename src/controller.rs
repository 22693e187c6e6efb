use crate::credential::{Credential, CredentialStore};
use crate::gemini::{TextGenerator, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE};
use crate::prompt::ToolMode;
use crate::storage::{StorageBackend, StorageTarget};
use crate::view::{Outcome, ViewState};

/// Owns the view state and drives the credential store and generator
/// in response to user actions.
#[derive(Debug)]
pub struct HubController<G, D, S> {
    store: CredentialStore<D, S>,
    generator: G,
    credential: Option<Credential>,
    temperature: f32,
    max_output_tokens: u32,
    pub view: ViewState,
}

impl<G, D, S> HubController<G, D, S>
where
    G: TextGenerator,
    D: StorageBackend,
    S: StorageBackend,
{
    pub fn new(store: CredentialStore<D, S>, generator: G) -> Self {
        let credential = store.load_credential();
        let view = ViewState::new(store.preference(), credential.is_some());
        Self {
            store,
            generator,
            credential,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            view,
        }
    }

    pub fn with_generation(mut self, temperature: f32, max_output_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn store(&self) -> &CredentialStore<D, S> {
        &self.store
    }

    pub fn select_storage_target(&mut self, target: StorageTarget) {
        self.view.select_storage_target(target);
    }

    pub fn select_tab(&mut self, mode: ToolMode) {
        self.view.select_tab(mode);
    }

    /// Saves the draft key into the selected target.
    pub fn save_key(&mut self) {
        let draft = std::mem::take(&mut self.view.gate.draft_key);
        match self.store.save(&draft, self.view.gate.storage_target) {
            Ok(credential) => {
                self.credential = Some(credential);
                self.view.key_saved();
            }
            Err(err) => {
                log::warn!("API key not saved: {err}");
                self.view.gate.draft_key = draft;
                self.view.key_rejected(&err);
            }
        }
    }

    pub fn clear_key(&mut self) {
        self.store.clear();
        self.credential = None;
        self.view.key_cleared();
    }

    /// Runs the active tab against the current input. The outcome lands in
    /// `view.outcome`. A refused run leaves `view.loading` untouched; any
    /// other run ends with it false.
    pub async fn run(&mut self) -> Option<&Outcome> {
        let credential = self
            .credential
            .as_ref()
            .map(|c| c.expose().to_string())
            .unwrap_or_default();
        let request = match self.view.begin_run(&credential) {
            Ok(request) => request
                .temperature(self.temperature)
                .max_output_tokens(self.max_output_tokens),
            Err(_) => return self.view.outcome.as_ref(),
        };
        let result = self.generator.generate(&request).await;
        if let Err(err) = &result {
            log::warn!("Generation failed for {}: {err}", request.mode());
        }
        self.view.finish_run(result);
        self.view.outcome.as_ref()
    }
}
