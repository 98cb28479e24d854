use crate::{core::PlannerConfig, Planner, PlannerResponse, TripPayload};
use anyhow::{anyhow, bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::time::Duration;
use tracing::{error, info};

fn command() -> Command {
    Command::new("trip-planner")
        .version("0.1.0")
        .about("Generate a day-by-day travel itinerary with Gemini")
        .arg(
            Arg::new("destination")
                .help("Where the trip goes, e.g. \"Kyoto, Japan\"")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("start")
                .short('s')
                .long("start")
                .value_name("YYYY-MM-DD")
                .help("First day of the trip")
                .required(true),
        )
        .arg(
            Arg::new("end")
                .short('e')
                .long("end")
                .value_name("YYYY-MM-DD")
                .help("Last day of the trip")
                .required(true),
        )
        .arg(
            Arg::new("preferences")
                .short('p')
                .long("preferences")
                .value_name("TEXT")
                .help("Free-text interests, pace, budget"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Gemini model id (or set GEMINI_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("Gemini API key (or set GEMINI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Gemini API base URL (or set GEMINI_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Give up waiting for the itinerary after this many seconds"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the JSON response envelope instead of text"),
        )
}

fn resolve_config(matches: &ArgMatches) -> PlannerConfig {
    let mut config = PlannerConfig::from_env();
    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config = config.with_api_key(api_key.clone());
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.clone());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.clone());
    }
    config
}

fn payload(matches: &ArgMatches) -> TripPayload {
    TripPayload {
        destination: matches.get_one::<String>("destination").cloned(),
        start_date: matches.get_one::<String>("start").cloned(),
        end_date: matches.get_one::<String>("end").cloned(),
        preferences: matches.get_one::<String>("preferences").cloned(),
    }
}

/// CLI entry point for the trip-planner tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = command().get_matches();

    let timeout = matches
        .get_one::<String>("timeout")
        .map(|secs| secs.parse::<u64>())
        .transpose()
        .context("--timeout must be a whole number of seconds")?
        .map(Duration::from_secs);

    let config = resolve_config(&matches);
    let planner = Planner::from_config(config);
    if !planner.is_ready() {
        bail!("GEMINI_API_KEY is required. Set the environment variable or use --api-key");
    }

    let payload = payload(&matches);
    info!("Planning trip to {:?} with model {}", payload.destination, planner.model());

    let outcome = match timeout {
        Some(limit) => tokio::time::timeout(limit, planner.plan(&payload))
            .await
            .map_err(|_| anyhow!("No itinerary after {}s, giving up", limit.as_secs()))?,
        None => planner.plan(&payload).await,
    };

    if matches.get_flag("json") {
        let failed = outcome.is_err();
        println!("{}", PlannerResponse::from_result(outcome).to_json()?);
        if failed {
            bail!("itinerary generation failed");
        }
        return Ok(());
    }

    match outcome {
        Ok(trip) => {
            println!("\n{}", trip.render());
            info!("Itinerary generated with {} days", trip.itinerary.day_count());
            Ok(())
        }
        Err(err) => {
            error!("Itinerary generation failed: {}", err);
            Err(anyhow!(err.user_message()))
        }
    }
}
