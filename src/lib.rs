//! Soil, season and weather aware crop recommendations with rough profit and
//! seed estimates.
//!
//! The core is three pure functions over an immutable [`KnowledgeBase`]:
//!
//! - [`resolve_season`] maps a month to Kharif, Rabi or Zaid,
//! - [`match_crops`] ranks crops by season, soil and weather fit,
//! - [`estimate_profit`] computes yield, revenue, cost, profit and seed.
//!
//! [`RecommendationEngine`] wires them together with explicit configuration.
//! Fetching weather or soil data is left to the caller.
pub mod config;
pub mod engine;
pub mod error;
pub mod knowledge_base;
pub mod matcher;
pub mod output;
pub mod profit;
pub mod reports;
pub mod season;
pub mod soil;
pub mod types;
pub mod util;
pub mod weather;

pub use config::AdvisorConfig;
pub use engine::{
    EngineConfig, Recommendation, RecommendationEngine, RecommendationRequest, SeasonInput,
};
pub use error::{ConfigError, EngineError, KnowledgeBaseError};
pub use knowledge_base::KnowledgeBase;
pub use matcher::match_crops;
pub use profit::{estimate_profit, KATHA_TO_HECTARE};
pub use season::{current_season, resolve_season, season_for_date};
pub use types::{
    CropMatch, CropProfile, MatchOutcome, ProfitEstimate, Season, WeatherHeuristic,
    WeatherSummary,
};
