use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;

/// Cropping season used across the Indian subcontinent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Kharif,
    Rabi,
    Zaid,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Kharif, Season::Rabi, Season::Zaid];

    pub fn label(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Season {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Season::ALL
            .into_iter()
            .find(|season| season.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| EngineError::InvalidInput(format!("unknown season '{}'", s)))
    }
}

/// A weather condition that earns a crop one extra point when it holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeatherHeuristic {
    /// Total forecast rainfall strictly above `min_mm`.
    HighRainfall { min_mm: f64 },
    /// Average temperature inside `[min_c, max_c]`.
    TemperatureBand { min_c: f64, max_c: f64 },
}

impl WeatherHeuristic {
    pub fn is_satisfied(&self, weather: &WeatherSummary) -> bool {
        match *self {
            WeatherHeuristic::HighRainfall { min_mm } => weather.rainfall_or_zero() > min_mm,
            WeatherHeuristic::TemperatureBand { min_c, max_c } => weather
                .avg_temperature
                .map_or(false, |t| t >= min_c && t <= max_c),
        }
    }
}

/// One `[[crop]]` entry as written in the knowledge-base TOML.
#[derive(Debug, Deserialize)]
pub struct RawCrop {
    pub name: String,
    #[serde(default)]
    pub suitable_soils: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    pub yield_per_area: f64,
    pub cost_per_area: f64,
    pub price_per_mass: f64,
    pub seed_rate_per_area: Option<f64>,
    #[serde(default)]
    pub heuristics: Vec<WeatherHeuristic>,
}

#[derive(Debug, Deserialize)]
pub struct RawKnowledgeBase {
    pub default_seed_rate: Option<f64>,
    #[serde(rename = "crop", default)]
    pub crops: Vec<RawCrop>,
}

/// A validated crop entry. Yields are kg/ha, costs INR/ha, prices INR/kg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropProfile {
    pub name: String,
    pub suitable_soils: Vec<String>,
    pub seasons: Vec<Season>,
    pub yield_per_area: f64,
    pub cost_per_area: f64,
    pub price_per_mass: f64,
    pub seed_rate_per_area: Option<f64>,
    pub heuristics: Vec<WeatherHeuristic>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    /// Mean forecast temperature in °C, `None` without forecast data.
    pub avg_temperature: Option<f64>,
    /// Total forecast rainfall in mm.
    pub total_rainfall: Option<f64>,
}

impl WeatherSummary {
    pub fn new(avg_temperature: Option<f64>, total_rainfall: Option<f64>) -> Self {
        WeatherSummary {
            avg_temperature,
            total_rainfall,
        }
    }

    pub fn unknown() -> Self {
        WeatherSummary::default()
    }

    pub fn rainfall_or_zero(&self) -> f64 {
        self.total_rainfall.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropMatch {
    pub name: String,
    pub score: u32,
}

/// Result of matching crops against local conditions.
///
/// `NoCandidates` is kept apart from an empty ranking so callers know to
/// widen their presentation to the whole knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "matches", rename_all = "snake_case")]
pub enum MatchOutcome {
    Ranked(Vec<CropMatch>),
    NoCandidates,
}

impl MatchOutcome {
    pub fn is_no_candidates(&self) -> bool {
        matches!(self, MatchOutcome::NoCandidates)
    }

    pub fn matches(&self) -> &[CropMatch] {
        match self {
            MatchOutcome::Ranked(m) => m,
            MatchOutcome::NoCandidates => &[],
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.matches().iter().map(|m| m.name.as_str()).collect()
    }
}

/// Financials for one crop over one farm. Values are unrounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitEstimate {
    pub crop: String,
    pub farm_area: f64,
    pub area_in_standard_units: f64,
    pub yield_total: f64,
    pub price_per_mass: f64,
    pub revenue: f64,
    pub total_cost: f64,
    pub profit: f64,
    pub seed_needed: f64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CandidateRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Crop")]
    #[tabled(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "Score")]
    #[tabled(rename = "Score")]
    pub score: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct EstimateRow {
    #[serde(rename = "Crop")]
    #[tabled(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "Area")]
    #[tabled(rename = "Area")]
    pub area: String,
    #[serde(rename = "Hectares")]
    #[tabled(rename = "Hectares")]
    pub hectares: String,
    #[serde(rename = "YieldKg")]
    #[tabled(rename = "Yield (kg)")]
    pub yield_kg: String,
    #[serde(rename = "PricePerKg")]
    #[tabled(rename = "Price (₹/kg)")]
    pub price_per_kg: String,
    #[serde(rename = "Revenue")]
    #[tabled(rename = "Revenue (₹)")]
    pub revenue: String,
    #[serde(rename = "TotalCost")]
    #[tabled(rename = "Cost (₹)")]
    pub total_cost: String,
    #[serde(rename = "Profit")]
    #[tabled(rename = "Profit (₹)")]
    pub profit: String,
    #[serde(rename = "SeedKg")]
    #[tabled(rename = "Seed (kg)")]
    pub seed_kg: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationSummary {
    pub season: Season,
    pub total_candidates: usize,
    pub used_fallback: bool,
    pub best_crop: Option<String>,
    pub best_profit: Option<f64>,
    pub total_seed_needed: f64,
}
