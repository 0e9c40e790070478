use crate::error::EngineError;
use crate::types::Season;
use chrono::{Datelike, Local};

/// Map a calendar month (1-12) to its cropping season.
pub fn resolve_season(month: u32) -> Result<Season, EngineError> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidInput(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }
    Ok(season_of_month(month))
}

pub fn season_for_date<D: Datelike>(date: &D) -> Season {
    season_of_month(date.month())
}

/// Season of today's date in local time.
pub fn current_season() -> Season {
    season_for_date(&Local::now().date_naive())
}

// Caller guarantees 1..=12.
fn season_of_month(month: u32) -> Season {
    match month {
        6..=10 => Season::Kharif,
        4 | 5 => Season::Zaid,
        _ => Season::Rabi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn every_month_maps_to_one_season() {
        let expected = [
            Season::Rabi,
            Season::Rabi,
            Season::Rabi,
            Season::Zaid,
            Season::Zaid,
            Season::Kharif,
            Season::Kharif,
            Season::Kharif,
            Season::Kharif,
            Season::Kharif,
            Season::Rabi,
            Season::Rabi,
        ];
        for (i, season) in expected.iter().enumerate() {
            assert_eq!(resolve_season(i as u32 + 1).unwrap(), *season, "month {}", i + 1);
        }
    }

    #[test]
    fn out_of_range_month_is_invalid() {
        assert!(matches!(resolve_season(0), Err(EngineError::InvalidInput(_))));
        assert!(matches!(resolve_season(13), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn dates_use_their_month() {
        let d = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        assert_eq!(season_for_date(&d), Season::Kharif);
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(season_for_date(&d), Season::Rabi);
        let d = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();
        assert_eq!(season_for_date(&d), Season::Zaid);
    }

    #[test]
    fn current_season_is_consistent_with_today() {
        let today = Local::now().date_naive();
        assert_eq!(current_season(), resolve_season(today.month()).unwrap());
    }
}
