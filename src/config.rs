use std::path::Path;

use crate::category::TagTable;
use crate::dictionary::RuleTable;
use crate::error::ConfigError;
use crate::normalize::TypeLexicon;
use crate::pokedex::Pokedex;

/// Sprite asset host; dex-number icon URLs are assembled against this.
pub const ASSET_URL: &str =
    "https://raw.githubusercontent.com/PokeMiners/pogo_assets/master/Images/Pokemon";

/// Every immutable data table, loaded once at process start and passed by
/// reference into the per-source pipelines.
#[derive(Debug)]
pub struct DataTables {
    pub research_rules: RuleTable,
    pub research_tags: TagTable,
    pub invasion_rules: RuleTable,
    pub invasion_tags: TagTable,
    pub lexicon: TypeLexicon,
    pub pokedex: Pokedex,
}

impl DataTables {
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        Ok(DataTables {
            research_rules: RuleTable::load(&data_dir.join("research-description-dictionary.json"))?,
            research_tags: TagTable::load(&data_dir.join("research-category-tags.json"))?,
            invasion_rules: RuleTable::load(
                &data_dir.join("rocket-invasion-description-dictionary.json"),
            )?,
            invasion_tags: TagTable::load(&data_dir.join("rocket-invasion-category-tags.json"))?,
            lexicon: TypeLexicon::load(&data_dir.join("type-words.json"))?,
            pokedex: Pokedex::load(&data_dir.join("pokedex.json"))?,
        })
    }
}
