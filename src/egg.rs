use serde::Deserialize;
use tracing::warn;

use pogo_types::{CpRange, Egg};

use crate::config::DataTables;
use crate::error::PipelineError;

// ── Extract input ────────────────────────────────────────────────────────

/// One species entry of an egg pool as delivered by the HTML-extraction
/// collaborator. `category` is the pool label the extractor selected by
/// page section ("2km", "as5km", ...), already canonical: egg records go
/// through neither the rule dictionary nor the category mapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EggExtract {
    pub no: u32,
    pub original_name: String,
    pub category: String,
    pub cp: CpRange,
    pub shiny_available: bool,
    pub regional: bool,
    pub image_url: String,
    pub rate: f64,
}

// ── Pipeline ─────────────────────────────────────────────────────────────

/// Localize a batch of egg pool extracts via the dex-number lookup.
pub fn build(extracts: Vec<EggExtract>, tables: &DataTables) -> Vec<Egg> {
    let mut records = Vec::with_capacity(extracts.len());
    for extract in extracts {
        match build_one(&extract, tables) {
            Ok(record) => records.push(record),
            Err(err) => warn!(no = extract.no, %err, "skipping egg entry"),
        }
    }
    records
}

fn build_one(extract: &EggExtract, tables: &DataTables) -> Result<Egg, PipelineError> {
    let species = tables
        .pokedex
        .by_no(extract.no)
        .ok_or(PipelineError::UnknownSpecies { no: extract.no })?;

    Ok(Egg {
        no: extract.no,
        name: species.name.clone(),
        original_name: extract.original_name.clone(),
        category: extract.category.clone(),
        cp: extract.cp,
        shiny_available: extract.shiny_available,
        regional: extract.regional,
        image_url: extract.image_url.clone(),
        rate: extract.rate,
    })
}
