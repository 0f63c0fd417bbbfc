//! Enrichment & Ordering: the three published datasets.
//!
//! Groups are joined strictly against the curated lookup (unmatched rows
//! are dropped and the curated row order becomes the display order),
//! divisions stay raw, and foods are derived from both. The foods join is
//! deliberately lossless: an unmatched food keeps a null short name.

use tracing::{debug, warn};

use cpi_model::{EnrichedRecord, EntityLookup, LongRecord};

/// Divisions dataset: the raw extraction, already sorted by (code, month).
pub fn divisions_dataset(records: Vec<LongRecord>) -> Vec<LongRecord> {
    records
}

/// Groups dataset: strict join against the curated lookup.
///
/// Rows absent from the curated table are excluded entirely. Output is
/// sorted by the lookup's display order, then month.
pub fn groups_dataset(records: Vec<LongRecord>, lookup: &EntityLookup) -> Vec<EnrichedRecord> {
    let mut dropped = 0usize;
    let mut enriched: Vec<(usize, EnrichedRecord)> = Vec::with_capacity(records.len());
    for record in records {
        let Some(order) = lookup.display_order(&record.code, &record.name) else {
            dropped += 1;
            continue;
        };
        let entry = &lookup.entries()[order];
        enriched.push((
            order,
            EnrichedRecord {
                code: record.code,
                name: record.name,
                short_name: Some(entry.short_name.clone()),
                month: record.month,
                cpi_index: record.cpi_index,
                pct_change: record.pct_change,
            },
        ));
    }
    if dropped > 0 {
        warn!(dropped, "groups rows without a curated lookup entry were dropped");
    }
    enriched.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.month.cmp(&b.1.month)));
    enriched.into_iter().map(|(_, record)| record).collect()
}

/// Foods dataset, derived rather than extracted.
///
/// Takes the single top-level food aggregate from the groups dataset, plus
/// every division exactly one classification level below it (codes with
/// the aggregate's two-digit prefix and exactly `code_len` characters),
/// then left-joins the food lookup for curated short names.
pub fn foods_dataset(
    groups: &[EnrichedRecord],
    divisions: &[LongRecord],
    lookup: &EntityLookup,
    food_group_code: &str,
    code_len: usize,
) -> Vec<EnrichedRecord> {
    let prefix = &food_group_code[..food_group_code.len().min(2)];

    let aggregate = groups
        .iter()
        .filter(|record| record.code == food_group_code)
        .map(|record| (record.code.clone(), record.name.clone(), record.month, record.cpi_index, record.pct_change));

    let sub_groups = divisions
        .iter()
        .filter(|record| record.code.starts_with(prefix) && record.code.len() == code_len)
        .map(|record| (record.code.clone(), record.name.clone(), record.month, record.cpi_index, record.pct_change));

    let foods: Vec<EnrichedRecord> = aggregate
        .chain(sub_groups)
        .map(|(code, name, month, cpi_index, pct_change)| {
            // Lossless join: unmatched rows keep a null short name.
            let short_name = lookup
                .get(&code, &name)
                .map(|entry| entry.short_name.clone());
            EnrichedRecord {
                code,
                name,
                short_name,
                month,
                cpi_index,
                pct_change,
            }
        })
        .collect();
    debug!(records = foods.len(), "derived foods dataset");
    foods
}
