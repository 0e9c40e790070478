// Turn a `Recommendation` into display rows and a summary.
use crate::engine::Recommendation;
use crate::types::{
    CandidateRow, EstimateRow, ProfitEstimate, RecommendationSummary, WeatherSummary,
};
use crate::util::format_number;
use std::cmp::Ordering;

pub fn candidate_rows(rec: &Recommendation) -> Vec<CandidateRow> {
    if rec.used_fallback {
        return rec
            .candidates
            .iter()
            .enumerate()
            .map(|(idx, crop)| CandidateRow {
                rank: idx + 1,
                crop: crop.clone(),
                score: "-".to_string(),
            })
            .collect();
    }
    rec.ranked()
        .iter()
        .enumerate()
        .map(|(idx, m)| CandidateRow {
            rank: idx + 1,
            crop: m.name.clone(),
            score: m.score.to_string(),
        })
        .collect()
}

pub fn estimate_rows(estimates: &[ProfitEstimate], area_unit: &str) -> Vec<EstimateRow> {
    estimates
        .iter()
        .map(|e| EstimateRow {
            crop: e.crop.clone(),
            area: format!("{} {}", format_number(e.farm_area, 2), area_unit),
            hectares: format!("{:.4}", e.area_in_standard_units),
            yield_kg: format_number(e.yield_total, 0),
            price_per_kg: format_number(e.price_per_mass, 2),
            revenue: format_number(e.revenue, 0),
            total_cost: format_number(e.total_cost, 0),
            profit: format_number(e.profit, 0),
            seed_kg: format_number(e.seed_needed, 1),
        })
        .collect()
}

/// One-line weather description; each reading is reported on its own so a
/// missing temperature does not hide the rainfall.
pub fn describe_weather(w: &WeatherSummary) -> String {
    let temp = match w.avg_temperature {
        Some(t) => format!("avg {:.1} °C", t),
        None => "avg temperature unknown".to_string(),
    };
    let rain = match w.total_rainfall {
        Some(r) => format!("rain {:.1} mm", r),
        None => "rain unknown".to_string(),
    };
    format!("{}, {}", temp, rain)
}

pub fn generate_summary(rec: &Recommendation) -> RecommendationSummary {
    let best = rec
        .estimates
        .iter()
        .max_by(|a, b| a.profit.partial_cmp(&b.profit).unwrap_or(Ordering::Equal));
    RecommendationSummary {
        season: rec.season,
        total_candidates: rec.candidates.len(),
        used_fallback: rec.used_fallback,
        best_crop: best.map(|e| e.crop.clone()),
        best_profit: best.map(|e| e.profit),
        total_seed_needed: rec.estimates.iter().map(|e| e.seed_needed).sum(),
    }
}
