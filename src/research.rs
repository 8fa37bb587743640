use serde::Deserialize;
use tracing::warn;

use pogo_types::{CpRange, Research, RewardPokemon};

use crate::config::{ASSET_URL, DataTables};
use crate::engine::Engine;
use crate::error::PipelineError;

// ── Extract input ────────────────────────────────────────────────────────

/// One research task as delivered by the HTML-extraction collaborator:
/// raw description text, the raw task-group heading, and reward species
/// already reduced to dex numbers and page flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchExtract {
    pub description: String,
    pub category: String,
    pub reward_pokemons: Vec<RewardExtract>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardExtract {
    pub no: u32,
    pub cp: CpRange,
    pub shiny_available: bool,
}

// ── Pipeline ─────────────────────────────────────────────────────────────

/// Translate, categorize, and order a batch of research task extracts.
///
/// A record that fails translation or species resolution is logged and
/// skipped; it never takes its siblings down with it.
pub fn build(extracts: Vec<ResearchExtract>, tables: &DataTables) -> Vec<Research> {
    let engine = Engine::new(
        &tables.research_rules,
        &tables.lexicon,
        &tables.research_tags,
        &tables.pokedex,
    );

    let mut records = Vec::with_capacity(extracts.len());
    for extract in extracts {
        match build_one(&extract, &engine, tables) {
            Ok(record) => records.push(record),
            Err(err) => warn!(description = %extract.description, %err, "skipping research task"),
        }
    }

    tables
        .research_tags
        .sort_by_priority(&mut records, |r| r.category.as_str());
    records
}

fn build_one(
    extract: &ResearchExtract,
    engine: &Engine<'_>,
    tables: &DataTables,
) -> Result<Research, PipelineError> {
    let mut reward_pokemons = Vec::with_capacity(extract.reward_pokemons.len());
    for reward in &extract.reward_pokemons {
        let species = tables
            .pokedex
            .by_no(reward.no)
            .ok_or(PipelineError::UnknownSpecies { no: reward.no })?;

        reward_pokemons.push(RewardPokemon {
            no: reward.no,
            name: species.name.clone(),
            original_name: species.original_name.clone(),
            cp: reward.cp,
            shiny_available: reward.shiny_available,
            image_url: format!("{ASSET_URL}/pokemon_icon_{}_00.png", reward.no),
        });
    }

    Ok(Research {
        description: engine.translate(&extract.description)?,
        original_description: extract.description.clone(),
        category: engine.categorize(&extract.category).display_text.clone(),
        reward_pokemons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixture_tables;

    fn extract(description: &str, category: &str, no: u32) -> ResearchExtract {
        ResearchExtract {
            description: description.into(),
            category: category.into(),
            reward_pokemons: vec![RewardExtract {
                no,
                cp: CpRange { min: 450, max: 500 },
                shiny_available: true,
            }],
        }
    }

    #[test]
    fn test_builds_translated_sorted_records() {
        let tables = fixture_tables();
        let records = build(
            vec![
                extract("Unmatched task text", "No Such Group", 25),
                extract("Catch 5 Pokémon", "Catching", 25),
            ],
            &tables,
        );

        assert_eq!(records.len(), 2);
        // Catching (priority 1) sorts ahead of the fallback bucket.
        assert_eq!(records[0].description, "捕捉 5 隻寶可夢");
        assert_eq!(records[0].original_description, "Catch 5 Pokémon");
        assert_eq!(records[0].category, "捕捉");
        assert_eq!(records[1].description, "Unmatched task text");
        assert_eq!(records[1].category, "其他");
    }

    #[test]
    fn test_reward_species_resolved_from_dex_number() {
        let tables = fixture_tables();
        let records = build(vec![extract("Catch 5 Pokémon", "Catching", 25)], &tables);
        let reward = &records[0].reward_pokemons[0];
        assert_eq!(reward.name, "皮卡丘");
        assert_eq!(reward.original_name, "Pikachu");
        assert!(reward.image_url.ends_with("pokemon_icon_25_00.png"));
    }

    #[test]
    fn test_unknown_species_skips_record_not_batch() {
        let tables = fixture_tables();
        let records = build(
            vec![
                extract("Catch 5 Pokémon", "Catching", 9999),
                extract("Catch 5 Pokémon", "Catching", 25),
            ],
            &tables,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reward_pokemons[0].no, 25);
    }
}
