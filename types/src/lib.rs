use serde::{Deserialize, Serialize};

// ── Shared pieces ────────────────────────────────────────────────────────

/// Combat power range shown for a species on the source page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpRange {
    pub min: u32,
    pub max: u32,
}

// ── Research tasks ───────────────────────────────────────────────────────

/// A field research task: localized description, mapped category, rewards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Research {
    pub description: String,
    pub original_description: String,
    pub category: String,
    pub reward_pokemons: Vec<RewardPokemon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardPokemon {
    pub no: u32,
    pub name: String,
    pub original_name: String,
    pub cp: CpRange,
    pub shiny_available: bool,
    pub image_url: String,
}

// ── Rocket invasions ─────────────────────────────────────────────────────

/// A Team GO Rocket lineup: localized quote, boss category, slot pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RocketInvasion {
    pub quote: String,
    pub original_quote: String,
    pub category: String,
    pub character_image_url: String,
    pub is_special: bool,
    pub lineup_pokemons: Vec<LineupPokemon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupPokemon {
    pub slot_no: u32,
    pub no: u32,
    pub name: String,
    pub original_name: String,
    pub catchable: bool,
    pub shiny_available: bool,
    pub image_url: String,
}

// ── Egg hatch pools ──────────────────────────────────────────────────────

/// One species entry in an egg distance pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Egg {
    pub no: u32,
    pub name: String,
    pub original_name: String,
    /// Pool label straight from the extractor: "2km", "5km", "10km",
    /// "7km", "12km", "as5km", "as10km".
    pub category: String,
    pub cp: CpRange,
    pub shiny_available: bool,
    pub regional: bool,
    pub image_url: String,
    /// Hatch rate percentage as shown on the page.
    pub rate: f64,
}
