// Crop knowledge base: loading, validation and the built-in demo table.
//
// The base is read once and never mutated afterwards, so a single instance
// can be shared by reference between any number of requests.
use crate::error::KnowledgeBaseError;
use crate::types::{CropProfile, RawCrop, RawKnowledgeBase, WeatherHeuristic};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Seed rate in kg/ha for crops without an explicit one.
pub const DEFAULT_SEED_RATE: f64 = 30.0;

const BUILTIN_TOML: &str = include_str!("../data/crops.toml");

static BUILTIN: Lazy<KnowledgeBase> = Lazy::new(|| {
    KnowledgeBase::from_toml_str(BUILTIN_TOML).expect("embedded crop table must be valid")
});

#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    crops: Vec<CropProfile>,
    default_seed_rate: f64,
}

impl KnowledgeBase {
    /// Build a base from profiles, validating each and rejecting duplicate names.
    pub fn new(
        crops: Vec<CropProfile>,
        default_seed_rate: f64,
    ) -> Result<Self, KnowledgeBaseError> {
        check_value("<default>", "default_seed_rate", default_seed_rate)?;
        let mut seen: HashSet<&str> = HashSet::new();
        for c in &crops {
            validate_profile(c)?;
            if !seen.insert(c.name.as_str()) {
                return Err(KnowledgeBaseError::DuplicateCrop(c.name.clone()));
            }
        }
        Ok(KnowledgeBase {
            crops,
            default_seed_rate,
        })
    }

    pub fn from_toml_str(s: &str) -> Result<Self, KnowledgeBaseError> {
        let raw: RawKnowledgeBase = toml::from_str(s)?;
        let crops = raw.crops.into_iter().map(clean_crop).collect();
        KnowledgeBase::new(crops, raw.default_seed_rate.unwrap_or(DEFAULT_SEED_RATE))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, KnowledgeBaseError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)?;
        let kb = KnowledgeBase::from_toml_str(&s)?;
        info!(path = %path.display(), crops = kb.len(), "loaded crop knowledge base");
        Ok(kb)
    }

    /// The demo table shipped with the crate, parsed on first use.
    pub fn builtin() -> &'static KnowledgeBase {
        &BUILTIN
    }

    pub fn crops(&self) -> &[CropProfile] {
        &self.crops
    }

    pub fn names(&self) -> Vec<&str> {
        self.crops.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look a crop up by exact name, falling back to a case-insensitive match.
    pub fn get(&self, name: &str) -> Option<&CropProfile> {
        let name = name.trim();
        self.crops
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.crops.iter().find(|c| c.name.eq_ignore_ascii_case(name)))
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn default_seed_rate(&self) -> f64 {
        self.default_seed_rate
    }

    pub fn seed_rate_for(&self, crop: &CropProfile) -> f64 {
        crop.seed_rate_per_area.unwrap_or(self.default_seed_rate)
    }
}

fn clean_crop(raw: RawCrop) -> CropProfile {
    CropProfile {
        name: raw.name.trim().to_string(),
        suitable_soils: raw
            .suitable_soils
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        seasons: raw.seasons,
        yield_per_area: raw.yield_per_area,
        cost_per_area: raw.cost_per_area,
        price_per_mass: raw.price_per_mass,
        seed_rate_per_area: raw.seed_rate_per_area,
        heuristics: raw.heuristics,
    }
}

fn check_value(crop: &str, field: &'static str, v: f64) -> Result<(), KnowledgeBaseError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(KnowledgeBaseError::InvalidValue {
            crop: crop.to_string(),
            field,
        })
    }
}

fn validate_profile(c: &CropProfile) -> Result<(), KnowledgeBaseError> {
    if c.name.trim().is_empty() {
        return Err(KnowledgeBaseError::EmptyName);
    }
    check_value(&c.name, "yield_per_area", c.yield_per_area)?;
    check_value(&c.name, "cost_per_area", c.cost_per_area)?;
    check_value(&c.name, "price_per_mass", c.price_per_mass)?;
    if let Some(rate) = c.seed_rate_per_area {
        check_value(&c.name, "seed_rate_per_area", rate)?;
    }
    for h in &c.heuristics {
        match *h {
            WeatherHeuristic::HighRainfall { min_mm } => {
                // A negative threshold would hold with no rainfall data at all.
                check_value(&c.name, "min_mm", min_mm)?;
            }
            WeatherHeuristic::TemperatureBand { min_c, max_c } => {
                if !min_c.is_finite() || !max_c.is_finite() || min_c > max_c {
                    return Err(KnowledgeBaseError::InvalidBand {
                        crop: c.name.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Season;

    #[test]
    fn builtin_table_keeps_insertion_order() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(
            kb.names(),
            vec!["Rice (Paddy)", "Maize", "Wheat", "Soybean", "Pulses", "Watermelon"]
        );
        let wheat = kb.get("Wheat").unwrap();
        assert_eq!(wheat.seasons, vec![Season::Rabi]);
        assert_eq!(wheat.seed_rate_per_area, Some(60.0));
        assert_eq!(kb.default_seed_rate(), DEFAULT_SEED_RATE);
    }

    #[test]
    fn lookup_falls_back_to_case_insensitive() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.get("maize").map(|c| c.name.as_str()), Some("Maize"));
        assert!(kb.get("Barley").is_none());
    }

    #[test]
    fn missing_seed_rate_uses_default() {
        let kb = KnowledgeBase::from_toml_str(
            r#"
            default_seed_rate = 42.0
            [[crop]]
            name = "Mustard"
            suitable_soils = ["Loam"]
            seasons = ["Rabi"]
            yield_per_area = 1200.0
            cost_per_area = 18000.0
            price_per_mass = 55.0
            "#,
        )
        .unwrap();
        let mustard = kb.get("Mustard").unwrap();
        assert_eq!(kb.seed_rate_for(mustard), 42.0);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let entry = r#"
            [[crop]]
            name = "Maize"
            seasons = ["Kharif"]
            yield_per_area = 1.0
            cost_per_area = 1.0
            price_per_mass = 1.0
        "#;
        let err = KnowledgeBase::from_toml_str(&format!("{entry}{entry}")).unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::DuplicateCrop(name) if name == "Maize"));
    }

    #[test]
    fn negative_numbers_are_rejected() {
        let err = KnowledgeBase::from_toml_str(
            r#"
            [[crop]]
            name = "Jute"
            seasons = ["Kharif"]
            yield_per_area = 2000.0
            cost_per_area = -5.0
            price_per_mass = 40.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            KnowledgeBaseError::InvalidValue { field: "cost_per_area", .. }
        ));
    }

    #[test]
    fn inverted_temperature_band_is_rejected() {
        let err = KnowledgeBase::from_toml_str(
            r#"
            [[crop]]
            name = "Potato"
            seasons = ["Rabi"]
            yield_per_area = 20000.0
            cost_per_area = 80000.0
            price_per_mass = 10.0
            heuristics = [{ kind = "temperature_band", min_c = 25.0, max_c = 15.0 }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::InvalidBand { .. }));
    }

    #[test]
    fn negative_rainfall_threshold_is_rejected() {
        let err = KnowledgeBase::from_toml_str(
            r#"
            [[crop]]
            name = "Jute"
            seasons = ["Kharif"]
            yield_per_area = 2500.0
            cost_per_area = 30000.0
            price_per_mass = 45.0
            heuristics = [{ kind = "high_rainfall", min_mm = -5.0 }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            KnowledgeBaseError::InvalidValue { field: "min_mm", .. }
        ));
    }

    #[test]
    fn zero_rainfall_threshold_needs_actual_rain() {
        let kb = KnowledgeBase::from_toml_str(
            r#"
            [[crop]]
            name = "Jute"
            seasons = ["Kharif"]
            yield_per_area = 2500.0
            cost_per_area = 30000.0
            price_per_mass = 45.0
            heuristics = [{ kind = "high_rainfall", min_mm = 0.0 }]
            "#,
        )
        .unwrap();
        let out = crate::matcher::match_crops(&kb, "", Season::Rabi, None, None);
        assert!(out.is_no_candidates());
    }

    #[test]
    fn unknown_season_label_fails_to_parse() {
        let err = KnowledgeBase::from_toml_str(
            r#"
            [[crop]]
            name = "Potato"
            seasons = ["Winter"]
            yield_per_area = 1.0
            cost_per_area = 1.0
            price_per_mass = 1.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::Parse(_)));
    }
}
