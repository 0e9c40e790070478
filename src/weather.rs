// Forecast summarisation.
//
// Fetching forecasts is left to the caller; this module only reduces a saved
// 5-day/3-hour forecast (OpenWeather `forecast` response shape) to the two
// numbers the matcher uses.
use crate::types::WeatherSummary;
use crate::util::average;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Rain over the 3-hour slot in mm, absent when dry or unreported.
    pub rain_3h: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    list: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    main: RawMain,
    rain: Option<RawRain>,
}

#[derive(Debug, Deserialize)]
struct RawMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct RawRain {
    #[serde(rename = "3h")]
    three_hours: Option<f64>,
}

/// Parse the `list` of a forecast JSON document into entries.
pub fn parse_forecast_json(s: &str) -> Result<Vec<ForecastEntry>, serde_json::Error> {
    let raw: RawForecast = serde_json::from_str(s)?;
    Ok(raw
        .list
        .into_iter()
        .map(|e| ForecastEntry {
            temperature: e.main.temp,
            rain_3h: e.rain.and_then(|r| r.three_hours),
        })
        .collect())
}

/// Mean temperature and total rain over all entries.
///
/// An empty forecast yields an all-unknown summary rather than zeros.
pub fn summarize_forecast(entries: &[ForecastEntry]) -> WeatherSummary {
    if entries.is_empty() {
        return WeatherSummary::unknown();
    }
    let temps: Vec<f64> = entries.iter().map(|e| e.temperature).collect();
    let total_rain = entries
        .iter()
        .filter_map(|e| e.rain_3h)
        .fold(0.0, |acc, r| acc + r);
    WeatherSummary::new(Some(average(&temps)), Some(total_rain))
}
