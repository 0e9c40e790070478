// Interactive console front end.
//
// - Option [1] loads a crop table (or re-selects the built-in one).
// - Option [2] asks for farm details, ranks crops and prints estimates.
// - Option [3] exports the last recommendation as CSV and JSON.
use anyhow::{Context, Result};
use clap::Parser;
use krishi_advisor::output;
use krishi_advisor::reports;
use krishi_advisor::soil::{classify_texture, parse_soil_properties, SoilTexture};
use krishi_advisor::util::{self, parse_f64_list, parse_f64_safe, parse_u32_safe};
use krishi_advisor::weather::{parse_forecast_json, summarize_forecast};
use krishi_advisor::{
    AdvisorConfig, KnowledgeBase, Recommendation, RecommendationEngine, RecommendationRequest,
    SeasonInput, WeatherSummary,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Soil and weather informed crop and profit advisor.
#[derive(Parser)]
#[command(name = "krishi_advisor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Advisor settings (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

struct App {
    config: AdvisorConfig,
    engine: RecommendationEngine,
    last: Option<Recommendation>,
    input: Box<dyn BufRead>,
}

/// Print `prompt` and read one trimmed line. `None` once input is closed.
fn read_line(input: &mut dyn BufRead, prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match input.read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N` or
/// input ran out.
fn prompt_back_to_menu(input: &mut dyn BufRead) -> bool {
    loop {
        let Some(resp) = read_line(input, "Back to Main Menu (Y/N): ") else {
            return false;
        };
        match resp.to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn load_knowledge_base(path: Option<&Path>) -> Result<KnowledgeBase> {
    match path {
        Some(p) => KnowledgeBase::load(p)
            .with_context(|| format!("loading crop table {}", p.display())),
        None => Ok(KnowledgeBase::builtin().clone()),
    }
}

/// Handle option [1]: swap the engine's crop table.
fn handle_load(app: &mut App) {
    let Some(input) = read_line(&mut *app.input, "Crop table path (blank for the built-in table): ")
    else {
        return;
    };
    let path = if input.is_empty() {
        None
    } else {
        Some(PathBuf::from(input))
    };
    let loaded = load_knowledge_base(path.as_deref()).and_then(|kb| {
        RecommendationEngine::new(kb, app.config.engine_config()).map_err(anyhow::Error::from)
    });
    match loaded {
        Ok(engine) => {
            println!(
                "Crop table ready ({} crops).\n",
                util::format_int(engine.knowledge_base().len())
            );
            app.engine = engine;
            app.last = None;
        }
        Err(e) => eprintln!("Failed to load crop table: {:#}\n", e),
    }
}

/// Label from a saved soil query response, or `None` if it has no usable
/// texture data.
fn soil_label_from_file(path: &str) -> Option<String> {
    let parsed = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path))
        .and_then(|s| parse_soil_properties(&s).context("parsing soil properties"));
    match parsed {
        Ok(label) => label,
        Err(e) => {
            warn!(error = %format!("{:#}", e), "could not use soil file");
            None
        }
    }
}

fn ask_soil_label(input: &mut dyn BufRead) -> Option<String> {
    let text = read_line(
        input,
        "Soil type (label, sand,clay,silt %, or saved soil JSON; blank to choose): ",
    )?;
    if let Some(fractions) = parse_f64_list(&text) {
        if let [sand, clay, silt] = fractions[..] {
            if let Some(texture) = classify_texture(Some(sand), Some(clay), Some(silt)) {
                println!("Soil classified as: {}", texture);
                return Some(texture.to_string());
            }
        }
    }
    let is_json = Path::new(&text)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        if let Some(label) = soil_label_from_file(&text) {
            println!("Soil from survey data: {}", label);
            return Some(label);
        }
        println!("Could not determine soil texture; choose one.");
    } else if !text.is_empty() {
        return Some(text);
    }
    for (idx, t) in SoilTexture::MANUAL_CHOICES.iter().enumerate() {
        println!("[{}] {}", idx + 1, t);
    }
    let choice = parse_u32_safe(Some(&read_line(input, "Enter choice: ")?))
        .and_then(|n| (n as usize).checked_sub(1))
        .and_then(|i| SoilTexture::MANUAL_CHOICES.get(i).copied())
        .unwrap_or(SoilTexture::Loam);
    Some(choice.to_string())
}

fn ask_weather(input: &mut dyn BufRead) -> Option<WeatherSummary> {
    let path = read_line(input, "Saved forecast JSON (blank to type values): ")?;
    if !path.is_empty() {
        let parsed = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path))
            .and_then(|s| parse_forecast_json(&s).context("parsing forecast"));
        match parsed {
            Ok(entries) => return Some(summarize_forecast(&entries)),
            Err(e) => {
                warn!(error = %format!("{:#}", e), "could not use forecast file");
                println!("Could not read the forecast; enter values instead.");
            }
        }
    }
    let temp = parse_f64_safe(Some(&read_line(
        input,
        "Average temperature °C (blank if unknown): ",
    )?));
    let rain = parse_f64_safe(Some(&read_line(input, "Total rainfall mm (blank if unknown): ")?));
    Some(WeatherSummary::new(temp, rain))
}

/// Handle option [2]: collect inputs and print the recommendation.
fn handle_recommend(app: &mut App) {
    let input = &mut *app.input;
    let Some(location) = read_line(input, "Village / district: ") else {
        return;
    };
    let unit = app.config.area_unit.clone();
    let Some(area_text) = read_line(input, &format!("Farm size ({}): ", unit)) else {
        return;
    };
    let Some(farm_area) = parse_f64_safe(Some(&area_text)) else {
        println!("Error: farm size must be a number.\n");
        return;
    };
    let Some(soil_label) = ask_soil_label(input) else {
        return;
    };
    let Some(season_text) = read_line(
        input,
        "Sowing month (1-12), date (YYYY-MM-DD) or season, blank for today: ",
    ) else {
        return;
    };
    let season = match season_text.parse::<SeasonInput>() {
        Ok(s) => s,
        Err(e) => {
            println!("Error: {}\n", e);
            return;
        }
    };
    let Some(weather) = ask_weather(input) else {
        return;
    };
    info!(%location, farm_area, soil = %soil_label, "recommendation requested");

    let req = RecommendationRequest {
        soil_label,
        season,
        weather,
        farm_area,
    };
    let rec = match app.engine.recommend(&req) {
        Ok(r) => r,
        Err(e) => {
            println!("Error: {}\n", e);
            return;
        }
    };

    println!();
    println!("Season: {}", rec.season);
    println!("Weather: {}", reports::describe_weather(&rec.weather));
    println!();
    let note = if rec.used_fallback {
        Some("No crop matched; showing all crops for manual pick")
    } else {
        None
    };
    output::print_table("Candidate Crops", note, &reports::candidate_rows(&rec));
    output::print_table(
        "Profit Estimates",
        Some("Demo prices and yields; replace with market data"),
        &reports::estimate_rows(&rec.estimates, &unit),
    );
    app.last = Some(rec);
}

/// Write the CSV then the JSON export, stopping at the first failure.
/// Paths are pushed to `written` only once their file is complete.
fn export_last(
    rec: &Recommendation,
    config: &AdvisorConfig,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let csv_path = config.export_dir.join("recommendation.csv");
    let rows = reports::estimate_rows(&rec.estimates, &config.area_unit);
    output::write_csv(&csv_path, &rows)?;
    written.push(csv_path);

    let json_path = config.export_dir.join("recommendation.json");
    output::write_json(&json_path, rec)?;
    written.push(json_path);
    Ok(())
}

/// Handle option [3]: write the last recommendation to disk.
fn handle_export(app: &App) {
    let Some(rec) = app.last.as_ref() else {
        println!("Error: No recommendation yet. Run option 2 first.\n");
        return;
    };
    let mut written = Vec::new();
    let result = export_last(rec, &app.config, &mut written);
    for p in &written {
        println!("Exported {}", p.display());
    }
    if let Err(e) = result {
        eprintln!("Write error: {:#}\n", e);
        return;
    }
    let summary = reports::generate_summary(rec);
    match (&summary.best_crop, summary.best_profit) {
        (Some(crop), Some(profit)) => println!(
            "Best estimate: {} (profit ₹{}, seed {} kg total)\n",
            crop,
            util::format_number(profit, 0),
            util::format_number(summary.total_seed_needed, 1)
        ),
        _ => println!(),
    }
}

/// Menu loop; returns when the user exits or input is closed.
fn run(app: &mut App) {
    loop {
        println!("KrishiAdvisor: crop and profit recommendations");
        println!("[1] Load crop table");
        println!("[2] Get recommendation");
        println!("[3] Export last recommendation");
        println!("[4] Exit\n");
        let Some(choice) = read_line(&mut *app.input, "Enter choice: ") else {
            println!();
            break;
        };
        match choice.as_str() {
            "1" => handle_load(app),
            "2" => {
                println!();
                handle_recommend(app);
                if !prompt_back_to_menu(&mut *app.input) {
                    println!("Exiting the program.");
                    break;
                }
            }
            "3" => handle_export(app),
            "4" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 1, 2, 3 or 4.\n"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(p) => AdvisorConfig::load(p).with_context(|| format!("loading {}", p.display()))?,
        None => AdvisorConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let kb = load_knowledge_base(config.knowledge_base.as_deref())?;
    let engine = RecommendationEngine::new(kb, config.engine_config())?;
    let mut app = App {
        config,
        engine,
        last: None,
        input: Box::new(io::stdin().lock()),
    };
    run(&mut app);
    Ok(())
}
