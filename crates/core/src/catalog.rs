//! The option catalog: every selectable value and what it costs.
//!
//! A [`Catalog`] is built once at startup (from the built-in price list or a
//! JSON document) and shared read-only afterwards. Construction rejects
//! negative prices and duplicate keys with a [`ConfigError`].

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Price;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// A categorical option whose values are priced by a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionCategory {
    Location,
    Style,
    ExteriorColor,
    RoofType,
    FlooringType,
    KitchenStyle,
    LandscapeType,
}

impl OptionCategory {
    /// All categories in catalog declaration order.
    pub const ALL: [OptionCategory; 7] = [
        Self::Location,
        Self::Style,
        Self::ExteriorColor,
        Self::RoofType,
        Self::FlooringType,
        Self::KitchenStyle,
        Self::LandscapeType,
    ];

    /// Name of the price table as it appears in the serialized catalog.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Location => "locations",
            Self::Style => "styles",
            Self::ExteriorColor => "exteriorColors",
            Self::RoofType => "roofTypes",
            Self::FlooringType => "flooringTypes",
            Self::KitchenStyle => "kitchenStyles",
            Self::LandscapeType => "landscapeTypes",
        }
    }
}

// ---------------------------------------------------------------------------
// Price tables
// ---------------------------------------------------------------------------

/// Ordered `value -> price` lookup for one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceTable(IndexMap<String, Price>);

impl PriceTable {
    /// Build a table, rejecting duplicate keys and invalid prices.
    ///
    /// `table` names the table in error messages.
    pub fn from_entries<I, K>(table: &str, entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, Price)>,
        K: Into<String>,
    {
        let mut map = IndexMap::new();
        for (key, price) in entries {
            let key = key.into();
            check_price(table, &key, price)?;
            if map.contains_key(&key) {
                return Err(ConfigError::DuplicateKey {
                    table: table.to_string(),
                    key,
                });
            }
            map.insert(key, price);
        }
        Ok(Self(map))
    }

    pub fn get(&self, key: &str) -> Option<Price> {
        self.0.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn check_price(table: &str, key: &str, price: Price) -> Result<(), ConfigError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidPrice {
            table: table.to_string(),
            key: key.to_string(),
            price,
        })
    }
}

// ---------------------------------------------------------------------------
// Amenities
// ---------------------------------------------------------------------------

/// Fixed amenity prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityPrices {
    pub pool: Price,
    /// Base garage price; includes the first parking space.
    pub garage: Price,
    /// Price of each parking space beyond the first.
    pub garage_extra_space_rate: Price,
    pub deck: Price,
    pub fireplace: Price,
}

impl AmenityPrices {
    fn check(&self) -> Result<(), ConfigError> {
        check_price("amenities", "pool", self.pool)?;
        check_price("amenities", "garage", self.garage)?;
        check_price(
            "amenities",
            "garageExtraSpaceRate",
            self.garage_extra_space_rate,
        )?;
        check_price("amenities", "deck", self.deck)?;
        check_price("amenities", "fireplace", self.fireplace)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The complete, validated price list.
///
/// Serializes to the shape served by `GET /houses/pricing`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    locations: PriceTable,
    styles: PriceTable,
    square_foot_rate: Price,
    bedroom_rate: Price,
    bathroom_rate: Price,
    exterior_colors: PriceTable,
    roof_types: PriceTable,
    flooring_types: PriceTable,
    kitchen_styles: PriceTable,
    amenities: AmenityPrices,
    landscape_types: PriceTable,
}

/// One `{ "name", "price" }` entry in a [`CatalogDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub name: String,
    pub price: Price,
}

/// Unvalidated catalog as read from JSON.
///
/// Categories are arrays rather than objects so that duplicate keys survive
/// parsing and can be reported.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub locations: Vec<PriceEntry>,
    pub styles: Vec<PriceEntry>,
    pub square_foot_rate: Price,
    pub bedroom_rate: Price,
    pub bathroom_rate: Price,
    pub exterior_colors: Vec<PriceEntry>,
    pub roof_types: Vec<PriceEntry>,
    pub flooring_types: Vec<PriceEntry>,
    pub kitchen_styles: Vec<PriceEntry>,
    pub amenities: AmenityPrices,
    pub landscape_types: Vec<PriceEntry>,
}

impl Catalog {
    /// The built-in price list.
    pub fn standard() -> Result<Self, ConfigError> {
        let table = |category: OptionCategory, entries: &[(&str, Price)]| {
            PriceTable::from_entries(category.table_name(), entries.iter().copied())
        };

        let catalog = Self {
            locations: table(
                OptionCategory::Location,
                &[
                    ("Mountains", 500_000.0),
                    ("NYC", 1_200_000.0),
                    ("Oceanfront", 900_000.0),
                    ("Desert", 450_000.0),
                    ("Forest", 550_000.0),
                    ("Countryside", 400_000.0),
                    ("Lakeside", 650_000.0),
                    ("Suburban", 350_000.0),
                ],
            )?,
            styles: table(
                OptionCategory::Style,
                &[
                    ("Modern", 100_000.0),
                    ("Traditional", 50_000.0),
                    ("Contemporary", 120_000.0),
                    ("Ranch", 40_000.0),
                    ("Colonial", 80_000.0),
                    ("Victorian", 90_000.0),
                    ("Craftsman", 70_000.0),
                    ("Mediterranean", 110_000.0),
                ],
            )?,
            square_foot_rate: 150.0,
            bedroom_rate: 50_000.0,
            bathroom_rate: 30_000.0,
            exterior_colors: table(
                OptionCategory::ExteriorColor,
                &[
                    ("White", 0.0),
                    ("Beige", 5_000.0),
                    ("Gray", 5_000.0),
                    ("Blue", 8_000.0),
                    ("Green", 8_000.0),
                    ("Brown", 6_000.0),
                    ("Red", 10_000.0),
                    ("Yellow", 7_000.0),
                ],
            )?,
            roof_types: table(
                OptionCategory::RoofType,
                &[
                    ("Gable", 20_000.0),
                    ("Hip", 25_000.0),
                    ("Flat", 15_000.0),
                    ("Mansard", 35_000.0),
                    ("Gambrel", 30_000.0),
                    ("Shed", 18_000.0),
                ],
            )?,
            flooring_types: table(
                OptionCategory::FlooringType,
                &[
                    ("Hardwood", 10.0),
                    ("Tile", 8.0),
                    ("Carpet", 5.0),
                    ("Laminate", 6.0),
                    ("Vinyl", 4.0),
                    ("Marble", 15.0),
                    ("Bamboo", 12.0),
                ],
            )?,
            kitchen_styles: table(
                OptionCategory::KitchenStyle,
                &[
                    ("Modern", 50_000.0),
                    ("Traditional", 35_000.0),
                    ("Rustic", 40_000.0),
                    ("Industrial", 45_000.0),
                    ("Scandinavian", 48_000.0),
                    ("Farmhouse", 38_000.0),
                ],
            )?,
            amenities: AmenityPrices {
                pool: 75_000.0,
                garage: 40_000.0,
                garage_extra_space_rate: 15_000.0,
                deck: 25_000.0,
                fireplace: 12_000.0,
            },
            landscape_types: table(
                OptionCategory::LandscapeType,
                &[
                    ("Minimal", 10_000.0),
                    ("Lush Garden", 35_000.0),
                    ("Desert", 15_000.0),
                    ("Tropical", 40_000.0),
                    ("Zen", 30_000.0),
                    ("English Garden", 38_000.0),
                ],
            )?,
        };
        catalog.amenities.check()?;
        Ok(catalog)
    }

    /// Validate a parsed document into a catalog.
    pub fn from_document(doc: CatalogDocument) -> Result<Self, ConfigError> {
        let table = |category: OptionCategory, entries: Vec<PriceEntry>| {
            PriceTable::from_entries(
                category.table_name(),
                entries.into_iter().map(|e| (e.name, e.price)),
            )
        };

        check_price("rates", "squareFootRate", doc.square_foot_rate)?;
        check_price("rates", "bedroomRate", doc.bedroom_rate)?;
        check_price("rates", "bathroomRate", doc.bathroom_rate)?;
        doc.amenities.check()?;

        Ok(Self {
            locations: table(OptionCategory::Location, doc.locations)?,
            styles: table(OptionCategory::Style, doc.styles)?,
            square_foot_rate: doc.square_foot_rate,
            bedroom_rate: doc.bedroom_rate,
            bathroom_rate: doc.bathroom_rate,
            exterior_colors: table(OptionCategory::ExteriorColor, doc.exterior_colors)?,
            roof_types: table(OptionCategory::RoofType, doc.roof_types)?,
            flooring_types: table(OptionCategory::FlooringType, doc.flooring_types)?,
            kitchen_styles: table(OptionCategory::KitchenStyle, doc.kitchen_styles)?,
            amenities: doc.amenities,
            landscape_types: table(OptionCategory::LandscapeType, doc.landscape_types)?,
        })
    }

    /// Parse and validate a JSON catalog document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let doc: CatalogDocument = serde_json::from_str(json).map_err(|source| {
            ConfigError::Parse {
                path: "<catalog>".to_string(),
                source,
            }
        })?;
        Self::from_document(doc)
    }

    /// Load a JSON catalog document from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let doc: CatalogDocument = serde_json::from_str(&json).map_err(|source| {
            ConfigError::Parse {
                path: display,
                source,
            }
        })?;
        Self::from_document(doc)
    }

    /// Price of `value` within `category`, or `None` if it is not a catalog key.
    pub fn price_of(&self, category: OptionCategory, value: &str) -> Option<Price> {
        self.table(category).get(value)
    }

    pub fn contains(&self, category: OptionCategory, value: &str) -> bool {
        self.table(category).contains(value)
    }

    pub fn table(&self, category: OptionCategory) -> &PriceTable {
        match category {
            OptionCategory::Location => &self.locations,
            OptionCategory::Style => &self.styles,
            OptionCategory::ExteriorColor => &self.exterior_colors,
            OptionCategory::RoofType => &self.roof_types,
            OptionCategory::FlooringType => &self.flooring_types,
            OptionCategory::KitchenStyle => &self.kitchen_styles,
            OptionCategory::LandscapeType => &self.landscape_types,
        }
    }

    pub fn square_foot_rate(&self) -> Price {
        self.square_foot_rate
    }

    pub fn bedroom_rate(&self) -> Price {
        self.bedroom_rate
    }

    pub fn bathroom_rate(&self) -> Price {
        self.bathroom_rate
    }

    pub fn amenities(&self) -> &AmenityPrices {
        &self.amenities
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn document() -> serde_json::Value {
        json!({
            "locations": [{ "name": "Desert", "price": 450000 }],
            "styles": [{ "name": "Modern", "price": 100000 }],
            "squareFootRate": 150,
            "bedroomRate": 50000,
            "bathroomRate": 30000,
            "exteriorColors": [{ "name": "White", "price": 0 }],
            "roofTypes": [{ "name": "Flat", "price": 15000 }],
            "flooringTypes": [{ "name": "Marble", "price": 15 }],
            "kitchenStyles": [{ "name": "Rustic", "price": 40000 }],
            "amenities": {
                "pool": 75000,
                "garage": 40000,
                "garageExtraSpaceRate": 15000,
                "deck": 25000,
                "fireplace": 12000
            },
            "landscapeTypes": [{ "name": "Zen", "price": 30000 }]
        })
    }

    #[test]
    fn standard_catalog_loads() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.table(OptionCategory::Location).len(), 8);
        assert_eq!(catalog.table(OptionCategory::FlooringType).len(), 7);
        assert_eq!(catalog.price_of(OptionCategory::Location, "NYC"), Some(1_200_000.0));
        assert_eq!(catalog.price_of(OptionCategory::FlooringType, "Marble"), Some(15.0));
        assert_eq!(catalog.amenities().garage_extra_space_rate, 15_000.0);
    }

    #[test]
    fn zero_price_is_a_known_key() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.price_of(OptionCategory::ExteriorColor, "White"), Some(0.0));
    }

    #[test]
    fn unknown_value_has_no_price() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.price_of(OptionCategory::Style, "Brutalist"), None);
        // Values are scoped to their own category.
        assert_eq!(catalog.price_of(OptionCategory::Style, "Farmhouse"), None);
        assert!(catalog.contains(OptionCategory::KitchenStyle, "Farmhouse"));
    }

    /// Byte offset of `needle` in `haystack`, which must contain it.
    fn offset(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("{needle} missing from {haystack}"))
    }

    #[test]
    fn serialized_catalog_keeps_declaration_order() {
        let json = serde_json::to_string(&Catalog::standard().unwrap()).unwrap();

        // Tables appear in category order.
        let tables: Vec<usize> = OptionCategory::ALL
            .iter()
            .map(|c| offset(&json, &format!("\"{}\"", c.table_name())))
            .collect();
        assert!(tables.windows(2).all(|w| w[0] < w[1]), "{json}");

        // Keys within a table keep declaration order, not alphabetical.
        let mountains = offset(&json, "\"Mountains\"");
        let nyc = offset(&json, "\"NYC\"");
        let countryside = offset(&json, "\"Countryside\"");
        let suburban = offset(&json, "\"Suburban\"");
        assert!(mountains < nyc && nyc < countryside && countryside < suburban);

        let value = serde_json::to_value(Catalog::standard().unwrap()).unwrap();
        assert_eq!(value["amenities"]["garageExtraSpaceRate"], 15000.0);
        assert_eq!(value["squareFootRate"], 150.0);
    }

    #[test]
    fn document_round_trips_into_catalog() {
        let catalog = Catalog::from_json(&document().to_string()).unwrap();
        assert_eq!(catalog.price_of(OptionCategory::LandscapeType, "Zen"), Some(30_000.0));
        assert_eq!(catalog.square_foot_rate(), 150.0);
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut doc = document();
        doc["roofTypes"] = json!([{ "name": "Flat", "price": -1 }]);
        let err = Catalog::from_json(&doc.to_string()).unwrap_err();
        assert_matches!(err, ConfigError::InvalidPrice { ref table, ref key, .. }
            if table == "roofTypes" && key == "Flat");
    }

    #[test]
    fn negative_rate_is_rejected() {
        let mut doc = document();
        doc["amenities"]["deck"] = json!(-25000);
        let err = Catalog::from_json(&doc.to_string()).unwrap_err();
        assert_matches!(err, ConfigError::InvalidPrice { ref key, .. } if key == "deck");
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut doc = document();
        doc["styles"] = json!([
            { "name": "Modern", "price": 100000 },
            { "name": "Modern", "price": 90000 }
        ]);
        let err = Catalog::from_json(&doc.to_string()).unwrap_err();
        assert_matches!(err, ConfigError::DuplicateKey { ref table, ref key }
            if table == "styles" && key == "Modern");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Catalog::from_json("{ not json").unwrap_err();
        assert_matches!(err, ConfigError::Parse { .. });
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Catalog::load(Path::new("/nonexistent/hearth/catalog.json")).unwrap_err();
        assert_matches!(err, ConfigError::Io { .. });
    }
}
