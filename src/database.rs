//! Lookups over a scraped price list.
//!
//! Item and color names are matched loosely: case is ignored and spaces,
//! newlines and punctuation such as `- [ ] { } ! / \ . : ; _` are dropped, so
//! `"MAVERICK   GXT"` finds `"Maverick GXT"`, `"octanemg88"` finds
//! `"Octane: MG-88"` and `"Sky Blue"` finds `"SkyBlue"`.

use crate::types::ItemRecord;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};

/// Color used when asking for an item's price without naming a paint.
pub const DEFAULT_COLOR: &str = "Default";

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("unable to read price database {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("price database {path} is not a valid price list")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

// Characters that never take part in a lookup key
const IGNORED_IN_KEYS: &[char] = &[
    '\n', '-', ' ', '[', ']', '{', '}', '!', '/', '\\', '.', ':', ';', '_',
];

/// Lowercase, with spacing and punctuation removed.
pub fn normalize_key(input: &str) -> String {
    input
        .chars()
        .filter(|c| !IGNORED_IN_KEYS.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Default)]
pub struct PriceDatabase {
    records: Vec<ItemRecord>,
    index: HashMap<String, usize>,
}

impl PriceDatabase {
    /// Later records replace earlier ones sharing the same normalized name.
    pub fn from_records(records: Vec<ItemRecord>) -> Self {
        let mut database = PriceDatabase::default();
        for record in records {
            let key = normalize_key(&record.name);
            match database.index.get(&key) {
                Some(&slot) => database.records[slot] = record,
                None => {
                    database.index.insert(key, database.records.len());
                    database.records.push(record);
                }
            }
        }
        database
    }

    #[instrument(level = "debug", name = "Loading price database")]
    pub fn load(path: &Path) -> Result<Self, DatabaseError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatabaseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let records: Vec<ItemRecord> =
            serde_json::from_str(&content).map_err(|source| DatabaseError::Json {
                path: path.display().to_string(),
                source,
            })?;

        debug!("Loaded {} items", records.len());
        Ok(PriceDatabase::from_records(records))
    }

    pub fn get(&self, item: &str) -> Option<&ItemRecord> {
        self.index
            .get(&normalize_key(item))
            .map(|&slot| &self.records[slot])
    }

    /// Price of the default paint. `None` when the item is unknown or has no
    /// default price.
    pub fn price_of(&self, item: &str) -> Option<&str> {
        self.price_of_color(item, DEFAULT_COLOR)
    }

    pub fn price_of_color(&self, item: &str, color: &str) -> Option<&str> {
        let wanted = normalize_key(color);
        self.get(item)?
            .prices
            .iter()
            .find(|(name, _)| normalize_key(name) == wanted)
            .map(|(_, price)| price.as_str())
            .filter(|price| !price.is_empty())
    }

    pub fn rarity_of(&self, item: &str) -> Option<&str> {
        self.get(item).map(|record| record.rarity.as_str())
    }

    pub fn type_of(&self, item: &str) -> Option<&str> {
        self.get(item).map(|record| record.kind.as_str())
    }

    pub fn full_name_of(&self, item: &str) -> Option<&str> {
        self.get(item).map(|record| record.name.as_str())
    }

    /// Full names in the order the items were scraped.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|record| record.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn item(name: &str, kind: &str, rarity: &str, prices: &[(&str, &str)]) -> ItemRecord {
        ItemRecord {
            name: name.to_owned(),
            kind: kind.to_owned(),
            rarity: rarity.to_owned(),
            prices: prices
                .iter()
                .map(|(color, price)| (color.to_string(), price.to_string()))
                .collect::<IndexMap<_, _>>(),
        }
    }

    fn database() -> PriceDatabase {
        PriceDatabase::from_records(vec![
            item(
                "Maverick GXT",
                "Wheels",
                "Very rare",
                &[("Default", "0.5-1"), ("White", "2-3"), ("Sky Blue", "0.5-1")],
            ),
            item("Datastream", "Decal", "Import", &[("Default", ""), ("Black", "4-5")]),
            item("Trigon", "Decal", "Black market", &[]),
            item("NeYoYo", "Topper", "Exotic", &[]),
        ])
    }

    #[test]
    fn default_price_ignores_case_and_spaces() {
        let db = database();
        assert_eq!(db.price_of("maverickgxt"), Some("0.5-1"));
        assert_eq!(db.price_of("MAVERICK      GXT"), Some("0.5-1"));
    }

    #[test]
    fn punctuation_is_ignored_in_names() {
        let db = PriceDatabase::from_records(vec![item(
            "Octane: MG-88",
            "Decal",
            "Rare",
            &[("Default", "1-2"), ("Titanium White", "5-6")],
        )]);

        assert_eq!(db.price_of("octanemg88"), Some("1-2"));
        assert_eq!(db.price_of("Octane MG-88"), Some("1-2"));
        assert_eq!(db.price_of("[octane] mg_88!"), Some("1-2"));
        assert_eq!(db.price_of_color("octanemg88", "titanium-white"), Some("5-6"));
        assert_eq!(db.full_name_of("OCTANE:MG.88"), Some("Octane: MG-88"));
    }

    #[test]
    fn normalize_key_drops_separators() {
        assert_eq!(normalize_key("Octane: MG-88"), "octanemg88");
        assert_eq!(normalize_key("a\nb/c\\d{e}f;g"), "abcdefg");
    }

    #[test]
    fn blank_or_unknown_prices_are_none() {
        let db = database();
        assert_eq!(db.price_of("datastream"), None);
        assert_eq!(db.price_of("fakeitem"), None);
        assert_eq!(db.price_of_color("maverickgxt", "Crimson"), None);
    }

    #[test]
    fn color_lookup_is_normalized_too() {
        let db = database();
        assert_eq!(db.price_of_color("maverickgxt", "white"), Some("2-3"));
        assert_eq!(db.price_of_color("MAVERICK GXT", "skyblue"), Some("0.5-1"));
        assert_eq!(db.price_of_color("Datastream", "BLACK"), Some("4-5"));
    }

    #[test]
    fn item_metadata() {
        let db = database();
        assert_eq!(db.rarity_of("Trigon"), Some("Black market"));
        assert_eq!(db.type_of("trigon"), Some("Decal"));
        assert_eq!(db.full_name_of("neyoyo"), Some("NeYoYo"));
        assert_eq!(db.rarity_of("nothing"), None);
    }

    #[test]
    fn names_keep_scrape_order() {
        let db = database();
        assert_eq!(db.len(), 4);
        assert_eq!(db.names(), vec!["Maverick GXT", "Datastream", "Trigon", "NeYoYo"]);
    }

    #[test]
    fn duplicate_names_keep_the_last_record() {
        let db = PriceDatabase::from_records(vec![
            item("Dominus", "Body", "Rare", &[("Default", "1-2")]),
            item("dominus", "Body", "Rare", &[("Default", "3-4")]),
        ]);
        assert_eq!(db.len(), 1);
        assert_eq!(db.price_of("Dominus"), Some("3-4"));
    }

    #[test]
    fn load_reads_a_scraped_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Prices.json");
        std::fs::write(
            &path,
            r#"[{"name":"Dominus","type":"Body","rarity":"Rare","prices":{"Red":"100-200"}}]"#,
        )
        .unwrap();

        let db = PriceDatabase::load(&path).unwrap();
        assert_eq!(db.price_of_color("dominus", "red"), Some("100-200"));
        assert_eq!(db.price_of("dominus"), None);
    }

    #[test]
    fn load_reports_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            PriceDatabase::load(&missing),
            Err(DatabaseError::Io { .. })
        ));

        let invalid = dir.path().join("invalid.json");
        std::fs::write(&invalid, "{ not json").unwrap();
        assert!(matches!(
            PriceDatabase::load(&invalid),
            Err(DatabaseError::Json { .. })
        ));
    }

    #[test]
    fn empty_database() {
        let db = PriceDatabase::from_records(Vec::new());
        assert!(db.is_empty());
        assert_eq!(db.price_of("anything"), None);
    }
}
