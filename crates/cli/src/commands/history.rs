//! `hookstudio history` — List or clear saved generations.

use chrono::{Local, TimeZone};
use hookstudio_core::{HistoryEntry, Mode};

use super::{history_store, load_config};

pub fn run(mode: Option<Mode>, clear: bool, ephemeral: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let store = history_store(&config, ephemeral);

    if clear {
        store.clear();
        println!("🗑️  History cleared.");
        return Ok(());
    }

    let entries: Vec<HistoryEntry> = store
        .load()
        .into_iter()
        .filter(|e| mode.is_none_or(|m| e.mode == m))
        .collect();

    println!("📜 History ({} entries)", entries.len());
    println!("====================");
    if entries.is_empty() {
        println!("   Nenhum histórico ainda.");
    }
    for (i, entry) in entries.iter().enumerate() {
        print_entry(i + 1, entry);
    }

    Ok(())
}

/// Local date and time of a millisecond timestamp, `dd/mm HH:MM`.
pub fn format_timestamp(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|t| t.format("%d/%m %H:%M").to_string())
        .unwrap_or_else(|| "--/-- --:--".into())
}

/// One summary line plus the topic the entry was generated for.
pub fn print_entry(number: usize, entry: &HistoryEntry) {
    let preview: String = entry
        .content
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or_default()
        .chars()
        .take(70)
        .collect();
    println!(
        "  {number:>2}. {} [{}] {}",
        format_timestamp(entry.timestamp),
        entry.mode,
        entry.title
    );
    println!("      {} · {}", entry.data.topic, preview);
}
