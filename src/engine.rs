// The recommendation engine ties the season resolver, crop matcher and profit
// estimator together behind one explicitly configured value.
//
// Nothing here holds mutable state: an engine can be shared by reference
// across threads and every call is a pure function of its arguments.
use crate::error::EngineError;
use crate::knowledge_base::KnowledgeBase;
use crate::matcher::match_crops;
use crate::profit::{estimate_profit, KATHA_TO_HECTARE};
use crate::season::{current_season, resolve_season, season_for_date};
use crate::types::{CropMatch, MatchOutcome, ProfitEstimate, Season, WeatherSummary};
use crate::util::{parse_date_safe, parse_u32_safe};
use chrono::NaiveDate;
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Caller's area unit to hectares.
    pub conversion_factor: f64,
    /// How many top candidates get a profit estimate.
    pub top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            conversion_factor: KATHA_TO_HECTARE,
            top_n: 2,
        }
    }
}

/// How the season of a request is determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeasonInput {
    Explicit(Season),
    Month(u32),
    Date(NaiveDate),
    Today,
}

impl SeasonInput {
    pub fn resolve(&self) -> Result<Season, EngineError> {
        match *self {
            SeasonInput::Explicit(s) => Ok(s),
            SeasonInput::Month(m) => resolve_season(m),
            SeasonInput::Date(d) => Ok(season_for_date(&d)),
            SeasonInput::Today => Ok(current_season()),
        }
    }
}

/// Blank means today; otherwise a `YYYY-MM-DD` date, a season label or a
/// month number. Month range is checked later by [`SeasonInput::resolve`].
impl FromStr for SeasonInput {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(SeasonInput::Today);
        }
        if let Some(date) = parse_date_safe(Some(s)) {
            return Ok(SeasonInput::Date(date));
        }
        if let Ok(season) = s.parse::<Season>() {
            return Ok(SeasonInput::Explicit(season));
        }
        parse_u32_safe(Some(s))
            .map(SeasonInput::Month)
            .ok_or_else(|| {
                EngineError::InvalidInput(format!("'{}' is not a month, date or season", s))
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub soil_label: String,
    pub season: SeasonInput,
    pub weather: WeatherSummary,
    pub farm_area: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub season: Season,
    pub soil_label: String,
    pub weather: WeatherSummary,
    pub farm_area: f64,
    pub outcome: MatchOutcome,
    /// Ranked crop names, or the whole knowledge base when `used_fallback`.
    pub candidates: Vec<String>,
    pub used_fallback: bool,
    pub estimates: Vec<ProfitEstimate>,
}

impl Recommendation {
    pub fn ranked(&self) -> &[CropMatch] {
        self.outcome.matches()
    }
}

#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    kb: KnowledgeBase,
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(kb: KnowledgeBase, config: EngineConfig) -> Result<Self, EngineError> {
        if !config.conversion_factor.is_finite() || config.conversion_factor <= 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "conversion factor must be positive, got {}",
                config.conversion_factor
            )));
        }
        Ok(RecommendationEngine { kb, config })
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn match_crops(
        &self,
        soil_label: &str,
        season: Season,
        weather: &WeatherSummary,
    ) -> MatchOutcome {
        match_crops(
            &self.kb,
            soil_label,
            season,
            weather.avg_temperature,
            weather.total_rainfall,
        )
    }

    pub fn estimate(&self, crop_name: &str, farm_area: f64) -> Result<ProfitEstimate, EngineError> {
        estimate_profit(&self.kb, crop_name, farm_area, self.config.conversion_factor)
    }

    /// Resolve the season, rank the crops and estimate the top `top_n`.
    ///
    /// When no crop scores, the candidates widen to the whole knowledge base
    /// in its own order and `used_fallback` is set.
    pub fn recommend(&self, req: &RecommendationRequest) -> Result<Recommendation, EngineError> {
        if !req.farm_area.is_finite() || req.farm_area <= 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "farm area must be positive, got {}",
                req.farm_area
            )));
        }
        let season = req.season.resolve()?;
        let outcome = self.match_crops(&req.soil_label, season, &req.weather);
        let used_fallback = outcome.is_no_candidates();
        let candidates: Vec<String> = if used_fallback {
            warn!(
                soil = %req.soil_label,
                %season,
                "no crop matched, falling back to the full crop list"
            );
            self.kb.names().into_iter().map(String::from).collect()
        } else {
            outcome.names().into_iter().map(String::from).collect()
        };
        debug!(%season, candidates = candidates.len(), "ranked crops");

        let estimates = candidates
            .iter()
            .take(self.config.top_n)
            .map(|c| self.estimate(c, req.farm_area))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Recommendation {
            season,
            soil_label: req.soil_label.clone(),
            weather: req.weather,
            farm_area: req.farm_area,
            outcome,
            candidates,
            used_fallback,
            estimates,
        })
    }
}
