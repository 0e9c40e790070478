// Soil texture from survey data.
//
// SoilGrids-style `properties` documents are reduced to a single label: a
// texture class string when the document carries one, otherwise a class
// derived from the sand/clay/silt means of the first depth that has them.
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Coarse soil texture class used as the matcher's soil label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoilTexture {
    Loam,
    Clay,
    Sandy,
    Silty,
    ClayLoam,
}

impl SoilTexture {
    /// Choices offered when the texture cannot be derived from survey data.
    pub const MANUAL_CHOICES: [SoilTexture; 5] = [
        SoilTexture::Loam,
        SoilTexture::Clay,
        SoilTexture::Sandy,
        SoilTexture::Silty,
        SoilTexture::ClayLoam,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SoilTexture::Loam => "Loam",
            SoilTexture::Clay => "Clay",
            SoilTexture::Sandy => "Sandy",
            SoilTexture::Silty => "Silty",
            SoilTexture::ClayLoam => "Clay loam",
        }
    }
}

impl fmt::Display for SoilTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify from sand/clay/silt percentages, checked in that priority:
/// clay >= 35, sand >= 50, silt >= 50, otherwise loam.
///
/// Returns `None` when any fraction is missing so the caller can ask the
/// user instead.
pub fn classify_texture(
    sand: Option<f64>,
    clay: Option<f64>,
    silt: Option<f64>,
) -> Option<SoilTexture> {
    let (sand, clay, silt) = (sand?, clay?, silt?);
    let texture = if clay >= 35.0 {
        SoilTexture::Clay
    } else if sand >= 50.0 {
        SoilTexture::Sandy
    } else if silt >= 50.0 {
        SoilTexture::Silty
    } else {
        SoilTexture::Loam
    };
    Some(texture)
}

/// Parse a saved soil query response and reduce its top-level `properties`.
///
/// A document without `properties` yields `Ok(None)`.
pub fn parse_soil_properties(s: &str) -> Result<Option<String>, serde_json::Error> {
    let doc: Value = serde_json::from_str(s)?;
    Ok(doc
        .get("properties")
        .and_then(soil_label_from_properties))
}

/// Reduce a `properties` object to a soil label, or `None` when neither a
/// texture class nor all three fractions can be found.
pub fn soil_label_from_properties(props: &Value) -> Option<String> {
    let props = props.as_object()?;
    if let Some(label) = texture_class(props) {
        return Some(label);
    }
    let sand = find_fraction(props, "sand").and_then(first_mean);
    let clay = find_fraction(props, "clay").and_then(first_mean);
    let silt = find_fraction(props, "silt").and_then(first_mean);
    classify_texture(sand, clay, silt).map(|t| t.label().to_string())
}

fn texture_class(props: &Map<String, Value>) -> Option<String> {
    for (key, val) in props {
        if !key.to_lowercase().contains("tex") || is_blank(val) {
            continue;
        }
        match val {
            Value::String(s) => return Some(s.clone()),
            Value::Object(depths) => {
                for depth in depths.values().filter_map(Value::as_object) {
                    for sub in depth.values() {
                        match sub {
                            Value::String(s) if !s.trim().is_empty() => return Some(s.clone()),
                            Value::Object(o) => {
                                if let Some(v) = o.get("value") {
                                    return Some(value_text(v));
                                }
                            }
                            _ => {}
                        }
                    }
                }
            }
            _ => {}
        }
    }
    None
}

fn find_fraction<'a>(props: &'a Map<String, Value>, needle: &str) -> Option<&'a Value> {
    props
        .iter()
        .find(|(k, _)| k.to_lowercase().contains(needle))
        .map(|(_, v)| v)
}

fn first_mean(obj: &Value) -> Option<f64> {
    if let Value::Object(depths) = obj {
        for v in depths.values() {
            match v {
                Value::Object(d) => {
                    if let Some(x) = ["mean", "value"]
                        .iter()
                        .find_map(|c| d.get(*c).and_then(Value::as_f64))
                    {
                        return Some(x);
                    }
                    if let Some(Value::Object(values)) = d.get("values") {
                        if let Some(x) = values.values().find_map(Value::as_f64) {
                            return Some(x);
                        }
                    }
                }
                Value::Number(n) => return n.as_f64(),
                _ => {}
            }
        }
    }
    obj.as_f64()
}

fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(true) => false,
    }
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clay_wins_over_sand() {
        assert_eq!(
            classify_texture(Some(55.0), Some(40.0), Some(5.0)),
            Some(SoilTexture::Clay)
        );
    }

    #[test]
    fn thresholds_in_order() {
        assert_eq!(
            classify_texture(Some(50.0), Some(20.0), Some(30.0)),
            Some(SoilTexture::Sandy)
        );
        assert_eq!(
            classify_texture(Some(20.0), Some(20.0), Some(60.0)),
            Some(SoilTexture::Silty)
        );
        assert_eq!(
            classify_texture(Some(40.0), Some(20.0), Some(40.0)),
            Some(SoilTexture::Loam)
        );
    }

    #[test]
    fn missing_fraction_gives_none() {
        assert_eq!(classify_texture(Some(40.0), None, Some(40.0)), None);
    }

    #[test]
    fn labels_match_manual_choices() {
        let labels: Vec<&str> = SoilTexture::MANUAL_CHOICES.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["Loam", "Clay", "Sandy", "Silty", "Clay loam"]);
    }

    #[test]
    fn texture_class_string_is_taken_as_is() {
        let props = json!({ "texture_class": "Sandy loam", "clay": { "0-5cm": { "mean": 50.0 } } });
        assert_eq!(soil_label_from_properties(&props).as_deref(), Some("Sandy loam"));
    }

    #[test]
    fn texture_class_found_under_a_depth() {
        let props = json!({ "TEXMHT": { "0-5cm": { "label": "  ", "class": { "value": "Clay loam" } } } });
        assert_eq!(soil_label_from_properties(&props).as_deref(), Some("Clay loam"));
    }

    #[test]
    fn fractions_use_first_depth_with_a_mean() {
        let props = json!({
            "sand": { "0-5cm": { "mean": 62.0 }, "5-15cm": { "mean": 10.0 } },
            "clay": { "0-5cm": { "values": { "Q0.5": 12.0 } } },
            "silt": 26.0
        });
        assert_eq!(soil_label_from_properties(&props).as_deref(), Some("Sandy"));
    }

    #[test]
    fn missing_fraction_leaves_label_unknown() {
        let props = json!({ "sand": { "0-5cm": { "mean": 40.0 } }, "clay": { "0-5cm": { "mean": 20.0 } } });
        assert_eq!(soil_label_from_properties(&props), None);
        assert_eq!(soil_label_from_properties(&json!([])), None);
    }

    #[test]
    fn parses_saved_response() {
        let doc = r#"{
            "type": "Feature",
            "properties": {
                "clay": { "0-5cm": { "mean": 38.5 } },
                "sand": { "0-5cm": { "mean": 30.0 } },
                "silt": { "0-5cm": { "value": 31.5 } }
            }
        }"#;
        assert_eq!(parse_soil_properties(doc).unwrap().as_deref(), Some("Clay"));
        assert_eq!(parse_soil_properties(r#"{"type": "Feature"}"#).unwrap(), None);
        assert!(parse_soil_properties("not json").is_err());
    }
}
