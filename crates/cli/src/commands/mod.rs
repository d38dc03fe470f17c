pub mod generate;
pub mod history;
pub mod onboard;
pub mod studio;

use std::sync::Arc;

use hookstudio_config::AppConfig;
use hookstudio_history::{FileStore, HistoryStore, InMemoryStore};
use hookstudio_workflow::{GenerationGateway, Rendering, WorkflowController};

/// Load config, failing with a readable message.
pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// The history store described by `config`, or a throwaway one.
pub fn history_store(config: &AppConfig, ephemeral: bool) -> HistoryStore {
    let store = if ephemeral {
        HistoryStore::new(Arc::new(InMemoryStore::new()))
    } else {
        HistoryStore::new(Arc::new(FileStore::new(config.history_dir())))
    };
    store
        .with_key(config.history.storage_key.as_str())
        .with_capacity(config.history.capacity)
}

/// Refuse to start a generating command without a key.
pub fn require_api_key(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.has_api_key() {
        return Ok(());
    }

    eprintln!();
    eprintln!("  ERROR: No API key configured!");
    eprintln!();
    eprintln!("  Set one of these environment variables:");
    eprintln!("    GEMINI_API_KEY=...       (default_provider = \"gemini\", recommended)");
    eprintln!("    HOOKSTUDIO_API_KEY=...   (generic)");
    eprintln!("    OPENAI_API_KEY=...       (OpenAI-compatible providers)");
    eprintln!();
    eprintln!("  Or add it to your config file:");
    eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
    eprintln!();
    Err("No API key found. See above for setup instructions.".into())
}

/// A controller wired to the configured provider and history.
pub fn build_controller(
    config: &AppConfig,
    ephemeral: bool,
) -> Result<WorkflowController, Box<dyn std::error::Error>> {
    let router = hookstudio_providers::router::build_from_config(config)?;
    let provider = router.default().ok_or("No default provider configured")?;
    let gateway = GenerationGateway::from_config(provider, config);
    tracing::debug!(
        provider = gateway.provider_name(),
        model = gateway.model(),
        ephemeral,
        "Studio session ready"
    );
    Ok(WorkflowController::new(
        Arc::new(gateway),
        history_store(config, ephemeral),
    ))
}

/// Print the current result, split into items when it has any.
pub fn print_result(controller: &WorkflowController) {
    let Some(result) = controller.result() else {
        println!("  (no result yet)");
        return;
    };

    println!();
    println!("  ── {} ──", result.title);
    println!();
    match controller.rendering() {
        Some(Rendering::Items(items)) => {
            let selected = controller.selected_item();
            for item in items {
                let marker = if selected == Some(item.position) { "*" } else { " " };
                println!(" {marker}[{}]", item.position + 1);
                for line in item.as_str().lines() {
                    println!("     {line}");
                }
            }
        }
        _ => {
            for line in result.content.lines() {
                println!("  {line}");
            }
        }
    }
    println!();

    let steps = controller.next_steps();
    if !steps.is_empty() {
        println!("  Próximos passos:");
        for step in steps {
            println!("    next {:<10} {}", step.target.as_str(), step.label);
        }
        println!();
    }
}
