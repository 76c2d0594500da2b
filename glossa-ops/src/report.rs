//! Grouping reports over the full event collection. No windowing is
//! involved and input order does not matter.

use std::collections::HashMap;

use serde::Serialize;

use glossa_core::TranslationEvent;

/// Delivered-translation count for one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientCount {
    pub client_name: String,
    pub translation_count: u64,
}

/// Delivered-translation count for one directed language pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguagePairCount {
    pub source_language: String,
    pub target_language: String,
    pub translation_count: u64,
}

/// Occurrence count per client, largest first.
pub fn clients_report(events: &[TranslationEvent]) -> Vec<ClientCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for event in events {
        *counts.entry(event.client_name.as_str()).or_insert(0) += 1;
    }
    let mut rows: Vec<ClientCount> = counts
        .into_iter()
        .map(|(client_name, translation_count)| ClientCount {
            client_name: client_name.to_owned(),
            translation_count,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.translation_count
            .cmp(&a.translation_count)
            .then_with(|| a.client_name.cmp(&b.client_name))
    });
    rows
}

/// Occurrence count per (source, target) pair, largest first. Direction
/// matters: `(en, fr)` and `(fr, en)` are distinct pairs.
pub fn language_pairs_report(events: &[TranslationEvent]) -> Vec<LanguagePairCount> {
    let mut counts: HashMap<(&str, &str), u64> = HashMap::new();
    for event in events {
        let pair = (
            event.source_language.as_str(),
            event.target_language.as_str(),
        );
        *counts.entry(pair).or_insert(0) += 1;
    }
    let mut rows: Vec<LanguagePairCount> = counts
        .into_iter()
        .map(|((source, target), translation_count)| LanguagePairCount {
            source_language: source.to_owned(),
            target_language: target.to_owned(),
            translation_count,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.translation_count
            .cmp(&a.translation_count)
            .then_with(|| a.source_language.cmp(&b.source_language))
            .then_with(|| a.target_language.cmp(&b.target_language))
    });
    rows
}
