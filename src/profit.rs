use crate::error::EngineError;
use crate::knowledge_base::KnowledgeBase;
use crate::types::ProfitEstimate;

/// Hectares per Katha (1 Katha ≈ 126.5 m²).
pub const KATHA_TO_HECTARE: f64 = 0.01265;

/// Estimate yield, revenue, cost, profit and seed requirement for growing
/// `crop_name` on `farm_area` (in the caller's unit).
///
/// `conversion_factor` converts the caller's unit into hectares. Nothing is
/// rounded; a negative profit is a valid result.
pub fn estimate_profit(
    kb: &KnowledgeBase,
    crop_name: &str,
    farm_area: f64,
    conversion_factor: f64,
) -> Result<ProfitEstimate, EngineError> {
    let crop = kb
        .get(crop_name)
        .ok_or_else(|| EngineError::UnknownCrop(crop_name.to_string()))?;
    if !farm_area.is_finite() || farm_area <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "farm area must be positive, got {}",
            farm_area
        )));
    }
    if !conversion_factor.is_finite() || conversion_factor <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "conversion factor must be positive, got {}",
            conversion_factor
        )));
    }

    let standard_area = farm_area * conversion_factor;
    let yield_total = crop.yield_per_area * standard_area;
    let revenue = yield_total * crop.price_per_mass;
    let total_cost = crop.cost_per_area * standard_area;
    let seed_needed = kb.seed_rate_for(crop) * standard_area;

    Ok(ProfitEstimate {
        crop: crop.name.clone(),
        farm_area,
        area_in_standard_units: standard_area,
        yield_total,
        price_per_mass: crop.price_per_mass,
        revenue,
        total_cost,
        profit: revenue - total_cost,
        seed_needed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wheat_on_five_katha() {
        let kb = KnowledgeBase::builtin();
        let est = estimate_profit(kb, "Wheat", 5.0, KATHA_TO_HECTARE).unwrap();
        assert_relative_eq!(est.area_in_standard_units, 0.06325, epsilon = 1e-12);
        assert_relative_eq!(est.yield_total, 221.375, epsilon = 1e-9);
        assert_relative_eq!(est.revenue, 4870.25, epsilon = 1e-9);
        assert_relative_eq!(est.total_cost, 2024.0, epsilon = 1e-9);
        assert_relative_eq!(est.profit, 2846.25, epsilon = 1e-9);
        assert_relative_eq!(est.seed_needed, 3.795, epsilon = 1e-9);
    }

    #[test]
    fn profit_may_be_negative() {
        let kb = KnowledgeBase::builtin();
        // Watermelon: 8000 kg/ha * 5 INR/kg = 40000 revenue vs 50000 cost per ha.
        let est = estimate_profit(kb, "Watermelon", 1.0, 1.0).unwrap();
        assert_relative_eq!(est.profit, -10000.0, epsilon = 1e-9);
    }

    #[test]
    fn unknown_crop_is_reported() {
        let kb = KnowledgeBase::builtin();
        let err = estimate_profit(kb, "Barley", 5.0, KATHA_TO_HECTARE).unwrap_err();
        assert_eq!(err, EngineError::UnknownCrop("Barley".to_string()));
    }

    #[test]
    fn non_positive_area_is_invalid() {
        let kb = KnowledgeBase::builtin();
        for area in [0.0, -2.0, f64::NAN] {
            assert!(matches!(
                estimate_profit(kb, "Wheat", area, KATHA_TO_HECTARE),
                Err(EngineError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn non_positive_factor_is_invalid() {
        let kb = KnowledgeBase::builtin();
        assert!(matches!(
            estimate_profit(kb, "Wheat", 5.0, 0.0),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn estimate_is_idempotent() {
        let kb = KnowledgeBase::builtin();
        let a = estimate_profit(kb, "Maize", 12.0, KATHA_TO_HECTARE).unwrap();
        let b = estimate_profit(kb, "Maize", 12.0, KATHA_TO_HECTARE).unwrap();
        assert_eq!(a, b);
    }
}
