use serde::Deserialize;
use tracing::warn;

use pogo_types::{LineupPokemon, RocketInvasion};

use crate::config::{ASSET_URL, DataTables};
use crate::engine::Engine;
use crate::error::PipelineError;

// ── Extract input ────────────────────────────────────────────────────────

/// One Rocket lineup as delivered by the HTML-extraction collaborator.
/// `quote` is the raw boss quote with the page's curly quotes already
/// stripped; `lineup_slots` is one species pool per battle slot, in slot
/// order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvasionExtract {
    pub quote: String,
    pub category: String,
    pub character_image_url: String,
    pub is_special: bool,
    pub lineup_slots: Vec<Vec<SlotExtract>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotExtract {
    pub no: u32,
    pub catchable: bool,
    pub shiny_available: bool,
}

// ── Pipeline ─────────────────────────────────────────────────────────────

/// Translate, categorize, and order a batch of Rocket lineup extracts.
///
/// Output is sorted ascending by category priority (Giovanni first, grunt
/// types last), stable within equal priorities.
pub fn build(extracts: Vec<InvasionExtract>, tables: &DataTables) -> Vec<RocketInvasion> {
    let engine = Engine::new(
        &tables.invasion_rules,
        &tables.lexicon,
        &tables.invasion_tags,
        &tables.pokedex,
    );

    let mut records = Vec::with_capacity(extracts.len());
    for extract in extracts {
        match build_one(&extract, &engine, tables) {
            Ok(record) => records.push(record),
            Err(err) => warn!(category = %extract.category, %err, "skipping rocket lineup"),
        }
    }

    tables
        .invasion_tags
        .sort_by_priority(&mut records, |r| r.category.as_str());
    records
}

fn build_one(
    extract: &InvasionExtract,
    engine: &Engine<'_>,
    tables: &DataTables,
) -> Result<RocketInvasion, PipelineError> {
    let mut lineup_pokemons = Vec::new();
    for (slot, pool) in extract.lineup_slots.iter().enumerate() {
        let slot_no = (slot + 1) as u32;
        for species in pool {
            let dex = tables
                .pokedex
                .by_no(species.no)
                .ok_or(PipelineError::UnknownSpecies { no: species.no })?;

            lineup_pokemons.push(LineupPokemon {
                slot_no,
                no: species.no,
                name: dex.name.clone(),
                original_name: dex.original_name.clone(),
                catchable: species.catchable,
                shiny_available: species.shiny_available,
                // Lineup sprites use the zero-padded icon naming scheme.
                image_url: format!("{ASSET_URL}/pokemon_icon_{:03}_00.png", species.no),
            });
        }
    }

    Ok(RocketInvasion {
        quote: engine.translate(&extract.quote)?,
        original_quote: extract.quote.clone(),
        category: engine.categorize(&extract.category).display_text.clone(),
        character_image_url: extract.character_image_url.clone(),
        is_special: extract.is_special,
        lineup_pokemons,
    })
}
