// Crop matching: score every crop in the knowledge base against the local
// soil, season and weather, then rank.
//
// Scoring is additive:
// - +3 when the season is one of the crop's seasons,
// - +2 when the soil label loosely matches one of the crop's soils,
// - +1 for each of the crop's weather heuristics that holds.
use crate::knowledge_base::KnowledgeBase;
use crate::types::{CropMatch, CropProfile, MatchOutcome, Season, WeatherSummary};

pub const SEASON_POINTS: u32 = 3;
pub const SOIL_POINTS: u32 = 2;
pub const WEATHER_POINTS: u32 = 1;

/// Loose textual soil match: either label contains the other, ignoring case.
///
/// An empty (or blank) label never matches.
pub fn soil_matches(crop: &CropProfile, soil_label: &str) -> bool {
    let soil = soil_label.trim().to_lowercase();
    if soil.is_empty() {
        return false;
    }
    crop.suitable_soils.iter().any(|s| {
        let s = s.to_lowercase();
        soil.contains(&s) || s.contains(&soil)
    })
}

pub fn score_crop(
    crop: &CropProfile,
    soil_label: &str,
    season: Season,
    weather: &WeatherSummary,
) -> u32 {
    let mut score = 0;
    if crop.seasons.contains(&season) {
        score += SEASON_POINTS;
    }
    if soil_matches(crop, soil_label) {
        score += SOIL_POINTS;
    }
    let satisfied = crop
        .heuristics
        .iter()
        .filter(|h| h.is_satisfied(weather))
        .count() as u32;
    score + satisfied * WEATHER_POINTS
}

/// Rank the knowledge base for the given conditions.
///
/// Output is ordered by descending score with ties kept in knowledge-base
/// order. Zero-score crops are dropped; if nothing is left the result is
/// [`MatchOutcome::NoCandidates`].
pub fn match_crops(
    kb: &KnowledgeBase,
    soil_label: &str,
    season: Season,
    avg_temperature: Option<f64>,
    total_rainfall: Option<f64>,
) -> MatchOutcome {
    let weather = WeatherSummary::new(avg_temperature, total_rainfall);
    let mut scored: Vec<CropMatch> = kb
        .crops()
        .iter()
        .map(|c| CropMatch {
            name: c.name.clone(),
            score: score_crop(c, soil_label, season, &weather),
        })
        .filter(|m| m.score >= 1)
        .collect();
    if scored.is_empty() {
        return MatchOutcome::NoCandidates;
    }
    // `sort_by` is stable, so equal scores keep insertion order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    MatchOutcome::Ranked(scored)
}
