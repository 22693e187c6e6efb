//! Serializable UI state and the pure transitions applied per user action.

use serde::{Deserialize, Serialize};

use crate::error::HubError;
use crate::gemini::GenerationRequest;
use crate::prompt::ToolMode;
use crate::storage::StorageTarget;

/// What the result area shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Outcome {
    Result(String),
    Error(String),
    Notice(String),
}

/// Key-entry gate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateState {
    /// Text typed into the masked key field. Skipped on serialization.
    #[serde(skip)]
    pub draft_key: String,
    pub storage_target: StorageTarget,
    pub active_key_present: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub gate: GateState,
    pub active_tab: ToolMode,
    pub input: String,
    pub loading: bool,
    pub outcome: Option<Outcome>,
}

impl ViewState {
    pub fn new(storage_target: StorageTarget, active_key_present: bool) -> Self {
        Self {
            gate: GateState {
                draft_key: String::new(),
                storage_target,
                active_key_present,
            },
            ..Self::default()
        }
    }

    /// The gate is shown whenever no key is active.
    pub fn gate_open(&self) -> bool {
        !self.gate.active_key_present
    }

    pub fn select_storage_target(&mut self, target: StorageTarget) {
        self.gate.storage_target = target;
    }

    pub fn edit_draft_key(&mut self, draft: impl Into<String>) {
        self.gate.draft_key = draft.into();
    }

    /// Switching tabs clears whatever the previous tab produced.
    pub fn select_tab(&mut self, mode: ToolMode) {
        self.active_tab = mode;
        self.outcome = None;
    }

    pub fn edit_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Validates the run preconditions and marks the view as loading.
    ///
    /// Refuses while a run is already in flight. Every refusal, including a
    /// missing key or input, is returned as an error outcome and also stored
    /// in `outcome`.
    pub fn begin_run(&mut self, credential: &str) -> Result<GenerationRequest, Outcome> {
        let refusal = if self.loading {
            Outcome::Error("이미 생성 중입니다.".to_string())
        } else {
            match GenerationRequest::new(credential, self.active_tab, &self.input) {
                Ok(request) => {
                    self.loading = true;
                    self.outcome = None;
                    return Ok(request);
                }
                Err(err) => Outcome::Error(err.user_message()),
            }
        };
        self.outcome = Some(refusal.clone());
        Err(refusal)
    }

    pub fn finish_run(&mut self, result: Result<String, HubError>) {
        self.loading = false;
        self.outcome = Some(match result {
            Ok(text) => Outcome::Result(text),
            Err(err) => Outcome::Error(err.user_message()),
        });
    }

    pub fn key_saved(&mut self) {
        self.gate.active_key_present = true;
        self.outcome = None;
    }

    pub fn key_rejected(&mut self, err: &HubError) {
        self.outcome = Some(Outcome::Error(err.user_message()));
    }

    pub fn key_cleared(&mut self) {
        self.gate.active_key_present = false;
        self.gate.draft_key.clear();
        self.outcome = Some(Outcome::Notice(
            "저장된 API Key를 삭제했습니다.".to_string(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_view() -> ViewState {
        let mut view = ViewState::new(StorageTarget::Durable, true);
        view.edit_input("모집요강 원문");
        view
    }

    #[test]
    fn switching_tab_clears_outcome() {
        let mut view = ready_view();
        view.finish_run(Ok("결과".to_string()));
        view.select_tab(ToolMode::Strategy);
        assert_eq!(view.active_tab, ToolMode::Strategy);
        assert_eq!(view.outcome, None);
        assert_eq!(view.input, "모집요강 원문");
    }

    #[test]
    fn begin_run_sets_loading_and_refuses_reentry() {
        let mut view = ready_view();
        let request = view.begin_run("key").unwrap();
        assert!(view.loading);
        assert_eq!(request.input(), "모집요강 원문");

        let refused = view.begin_run("key").unwrap_err();
        assert_eq!(refused, Outcome::Error("이미 생성 중입니다.".to_string()));
        assert_eq!(view.outcome, Some(refused));
        assert!(view.loading);
    }

    #[test]
    fn begin_run_without_input_reports_error() {
        let mut view = ViewState::new(StorageTarget::Durable, true);
        view.edit_input("   ");
        let outcome = view.begin_run("key").unwrap_err();
        assert_eq!(outcome, Outcome::Error("입력 텍스트를 작성해 주세요.".to_string()));
        assert!(!view.loading);
        assert_eq!(view.outcome, Some(outcome));
    }

    #[test]
    fn finish_run_always_clears_loading() {
        let mut view = ready_view();
        view.begin_run("key").unwrap();
        view.finish_run(Err(HubError::EmptyResponse));
        assert!(!view.loading);
        assert!(matches!(view.outcome, Some(Outcome::Error(_))));
    }

    #[test]
    fn clearing_key_reopens_gate_with_notice() {
        let mut view = ready_view();
        view.edit_draft_key("AIza");
        view.key_cleared();
        assert!(view.gate_open());
        assert!(view.gate.draft_key.is_empty());
        assert!(matches!(view.outcome, Some(Outcome::Notice(_))));
    }

    #[test]
    fn serialization_omits_draft_key() {
        let mut view = ready_view();
        view.edit_draft_key("AIza-secret");
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("AIza-secret"));
        let back: ViewState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.input, view.input);
        assert_eq!(back.gate.storage_target, StorageTarget::Durable);
    }
}
