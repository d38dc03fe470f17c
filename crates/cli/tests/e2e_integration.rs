//! End-to-end integration tests for the HookStudio workflow.
//!
//! These tests exercise the full pipeline from form inputs to displayed
//! result, including prompt construction, history persistence on disk and
//! context transfer between modes.

use std::sync::{Arc, Mutex};

use hookstudio_config::AppConfig;
use hookstudio_core::error::ProviderError;
use hookstudio_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use hookstudio_core::studio::{ERROR_MESSAGE, InputSnapshot, Mode, ResultStatus};
use hookstudio_history::{FileStore, HistoryStore, InMemoryStore};
use hookstudio_workflow::{
    Completion, FALLBACK_TEXT, GenerationGateway, Rendering, WorkflowController,
};

// ── Mock Provider ────────────────────────────────────────────────────────

/// A mock provider that returns scripted replies in sequence.
struct ScriptedProvider {
    replies: Mutex<Vec<Result<Option<String>, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    fn new(replies: Vec<Result<Option<String>, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn texts(texts: &[&str]) -> Arc<Self> {
        Self::new(texts.iter().map(|t| Ok(Some(t.to_string()))).collect())
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn prompt(&self, call: usize) -> String {
        self.requests.lock().unwrap()[call].prompt.clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let call = self.calls();
        let model = request.model.clone();
        self.requests.lock().unwrap().push(request);

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            panic!("ScriptedProvider exhausted: call #{call}");
        }
        replies.remove(0).map(|text| ProviderResponse {
            text,
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model,
        })
    }
}

fn controller(provider: Arc<ScriptedProvider>, store: HistoryStore) -> WorkflowController {
    let gateway = GenerationGateway::from_config(provider, &AppConfig::default());
    WorkflowController::new(Arc::new(gateway), store)
}

fn in_memory() -> HistoryStore {
    HistoryStore::new(Arc::new(InMemoryStore::new()))
}

fn pets() -> InputSnapshot {
    InputSnapshot::new("pets", "young adults").with_tone("Divertido")
}

// ── Scenarios ────────────────────────────────────────────────────────────

#[tokio::test]
async fn hooks_generation_parses_items_and_records_history() {
    let provider = ScriptedProvider::texts(&["1. Foo\n2. Bar"]);
    let mut studio = controller(provider.clone(), in_memory());
    studio.set_input(pets());

    studio.generate().await.unwrap();

    let result = studio.result().unwrap();
    assert_eq!(result.status, ResultStatus::Done);
    assert_eq!(studio.parsed_items(), vec!["1. Foo", "2. Bar"]);
    assert_eq!(studio.history().len(), 1);

    let prompt = provider.prompt(0);
    assert!(prompt.contains("\"pets\""));
    assert!(prompt.contains("young adults"));
    assert!(prompt.contains("Divertido"));
}

#[tokio::test]
async fn provider_rejection_shows_generic_error() {
    let provider = ScriptedProvider::new(vec![Err(ProviderError::AuthenticationFailed(
        "API key not valid".into(),
    ))]);
    let mut studio = controller(provider, in_memory());
    studio.set_input(pets());

    studio.generate().await.unwrap();

    let result = studio.result().unwrap();
    assert_eq!(result.status, ResultStatus::Error);
    assert_eq!(result.content, ERROR_MESSAGE);
    assert!(studio.history().is_empty());
}

#[tokio::test]
async fn empty_reply_shows_fallback_and_is_recorded() {
    let provider = ScriptedProvider::new(vec![Ok(None)]);
    let mut studio = controller(provider, in_memory());
    studio.set_input(pets());
    studio.change_mode(Mode::Captions);

    studio.generate().await.unwrap();

    assert_eq!(studio.result().unwrap().content, FALLBACK_TEXT);
    assert!(studio.result().unwrap().is_done());
    assert_eq!(studio.history().len(), 1);
}

#[tokio::test]
async fn campaign_flows_from_hooks_to_hashtags() {
    let provider = ScriptedProvider::texts(&[
        "Aqui vão:\n1. Seu gato te julga?\nPsicologia: identificação\n2. 3 sinais de tédio",
        "Cena 1: gato olhando torto\nCTA: comente",
        "#gatos #pets #fyp",
    ]);
    let mut studio = controller(provider.clone(), in_memory());
    studio.set_input(pets());

    // Hooks, pick the second one
    studio.generate().await.unwrap();
    match studio.rendering() {
        Some(Rendering::Items(items)) => assert_eq!(items.len(), 2),
        other => panic!("expected items, got {other:?}"),
    }
    studio.select_item(1).unwrap();
    studio.transfer_context(Mode::Scripts).unwrap();

    // Script built on the chosen hook only
    studio.generate().await.unwrap();
    let script_prompt = provider.prompt(1);
    assert!(script_prompt.contains("--- CONTEXTO (Ideias de Ganchos) ---"));
    assert!(script_prompt.contains("\"2. 3 sinais de tédio\""));
    assert!(!script_prompt.contains("Seu gato te julga"));
    assert!(matches!(studio.rendering(), Some(Rendering::Document(_))));

    // Hashtags receive the full script on top of the earlier context
    studio.transfer_context(Mode::Hashtags).unwrap();
    studio.generate().await.unwrap();
    let tag_prompt = provider.prompt(2);
    assert!(tag_prompt.contains("--- CONTEXTO (Ideias de Ganchos) ---"));
    assert!(tag_prompt.contains("--- CONTEXTO (Roteiro Completo) ---\nCena 1: gato olhando torto"));

    assert_eq!(studio.mode(), Mode::Hashtags);
    assert!(studio.next_steps().is_empty());
    assert_eq!(studio.history().len(), 3);
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn history_persists_on_disk_across_sessions() {
    let tmp = tempfile::tempdir().unwrap();
    let store = || HistoryStore::new(Arc::new(FileStore::new(tmp.path().join("history"))));

    let provider = ScriptedProvider::texts(&["1. Foo", "Dia 1: vlog"]);
    let mut first = controller(provider, store());
    first.set_input(pets().with_additional_info("gatos"));
    first.generate().await.unwrap();
    first.change_mode(Mode::Planner);
    first.generate().await.unwrap();

    let second = controller(ScriptedProvider::texts(&[]), store());
    assert_eq!(second.history(), first.history());
    assert_eq!(second.history()[0].mode, Mode::Planner);
    assert_eq!(second.history()[1].data.additional_info.as_deref(), Some("gatos"));

    // Default mode is hooks, so only the hooks entry is listed
    assert_eq!(second.history_for_mode().len(), 1);

    // The blob is a JSON array under the well-known key
    let raw = std::fs::read(tmp.path().join("history/tiktok_studio_history_v1.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["data"]["topic"], "pets");
}

#[tokio::test]
async fn restoring_history_does_not_touch_inputs_or_provider() {
    let provider = ScriptedProvider::texts(&["1. Foo\n2. Bar"]);
    let mut studio = controller(provider.clone(), in_memory());
    studio.set_input(pets());
    studio.generate().await.unwrap();

    studio.change_mode(Mode::Scripts);
    studio.change_mode(Mode::Hooks);
    studio.update_input(|i| i.topic = "carros".into());

    let entry = studio.history_for_mode()[0].clone();
    studio.select_history_entry(&entry);

    assert_eq!(studio.parsed_items(), vec!["1. Foo", "2. Bar"]);
    assert_eq!(studio.input().topic, "carros");
    assert_eq!(provider.calls(), 1);
    assert_eq!(studio.next_steps().len(), 2);
}

#[tokio::test]
async fn overlapping_requests_show_only_the_latest() {
    let provider = ScriptedProvider::texts(&["1. Antigo", "1. Novo"]);
    let mut studio = controller(provider, in_memory());
    studio.set_input(pets());
    let gateway = studio.gateway();

    let older = studio.begin_generation().unwrap();
    let newer = studio.begin_generation().unwrap();

    let older_outcome = older.run(&gateway).await;
    let newer_outcome = newer.run(&gateway).await;

    // Completion order reversed: newest lands first
    assert_eq!(
        studio.complete_generation(newer, newer_outcome),
        Completion::Applied
    );
    assert_eq!(
        studio.complete_generation(older, older_outcome),
        Completion::Discarded
    );
    assert_eq!(studio.result().unwrap().content, "1. Novo");
    assert!(!studio.is_loading());

    // The superseded response never reaches history
    let contents: Vec<_> = studio.history().iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, vec!["1. Novo"]);
}

#[tokio::test]
async fn configured_capacity_bounds_history() {
    let mut config = AppConfig::default();
    config.history.capacity = 2;
    let store = HistoryStore::new(Arc::new(InMemoryStore::new()))
        .with_capacity(config.history.capacity);
    let provider = ScriptedProvider::texts(&["a", "b", "c"]);
    let mut studio = controller(provider, store);
    studio.set_input(pets());
    studio.change_mode(Mode::Scripts);

    for _ in 0..3 {
        studio.generate_variation().await.unwrap();
    }

    let contents: Vec<_> = studio.history().iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, vec!["c", "b"]);
}
