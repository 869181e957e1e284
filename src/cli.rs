//! CLI definition and dispatch.

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::console_presenter::ConsolePresenter;
use crate::adapters::csv_log_adapter::CsvLogAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_presenter::JsonPresenter;
use crate::adapters::json_profile_adapter::JsonProfileAdapter;
use crate::adapters::openai_adapter::OpenAiAdapter;
use crate::adapters::system_clock_adapter::SystemClockAdapter;
use crate::advisor::{run_advisor, Ticker};
use crate::domain::config_validation::{
    validate_advisor_config, validate_api_config, validate_birth_config,
};
use crate::domain::error::MuhurtaError;
use crate::domain::evaluator::evaluate_with;
use crate::domain::profile::{parse_days, parse_roots, BirthDetails, Profile};
use crate::domain::verdict::AdviceCatalog;
use crate::ports::astro_port::AstroPort;
use crate::ports::clock_port::ClockPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::presenter_port::PresenterPort;
use crate::ports::profile_port::ProfilePort;

pub const DEFAULT_PROFILE_PATH: &str = "muhurta_profile.json";
const DEFAULT_INTERVAL_SECS: u64 = 60;

#[derive(Parser, Debug)]
#[command(name = "muhurta", about = "Astrological trading-timing advisor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate the current moment once
    Check {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        profile: Option<PathBuf>,
        /// Evaluate a hypothetical moment instead of now (YYYY-MM-DD HH:MM)
        #[arg(long)]
        at: Option<String>,
        /// Emit JSON instead of the console dashboard
        #[arg(long)]
        json: bool,
    },
    /// Re-evaluate on a fixed interval
    Watch {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        profile: Option<PathBuf>,
        /// Seconds between evaluations (overrides config)
        #[arg(long)]
        interval: Option<u64>,
        /// Stop after this many evaluations
        #[arg(long)]
        count: Option<u64>,
        /// Emit JSON lines instead of console dashboards
        #[arg(long)]
        json: bool,
        /// Append every evaluation to this CSV file
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Fetch a personalized profile from the configured completions API
    Fetch {
        #[arg(short, long)]
        config: PathBuf,
        /// Print the fetched profile without saving it
        #[arg(long)]
        dry_run: bool,
    },
    /// Store a profile built from explicit lucky/unlucky lists
    SetProfile {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        profile: Option<PathBuf>,
        /// Comma-separated lucky digit roots (1-9)
        #[arg(long)]
        lucky: String,
        /// Comma-separated unlucky digit roots (1-9)
        #[arg(long)]
        unlucky: String,
        /// Comma-separated lucky weekday names
        #[arg(long)]
        days: String,
    },
    /// Print the stored (or default) profile
    ShowProfile {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },
    /// Validate a profile JSON file
    Validate {
        #[arg(short, long)]
        profile: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Check {
            config,
            profile,
            at,
            json,
        } => run_check(config.as_ref(), profile, at.as_deref(), json),
        Command::Watch {
            config,
            profile,
            interval,
            count,
            json,
            log,
        } => run_watch(config.as_ref(), profile, interval, count, json, log),
        Command::Fetch { config, dry_run } => run_fetch(&config, dry_run),
        Command::SetProfile {
            config,
            profile,
            lucky,
            unlucky,
            days,
        } => run_set_profile(config.as_ref(), profile, &lucky, &unlucky, &days),
        Command::ShowProfile { config, profile } => run_show_profile(config.as_ref(), profile),
        Command::Validate { profile } => run_validate(&profile),
    }
}

fn fail(err: &MuhurtaError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = MuhurtaError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        fail(&err)
    })
}

fn load_optional_config(path: Option<&PathBuf>) -> Result<Option<FileConfigAdapter>, ExitCode> {
    match path {
        Some(path) => {
            let adapter = load_config(path)?;
            if let Err(e) = validate_advisor_config(&adapter) {
                return Err(fail(&e));
            }
            Ok(Some(adapter))
        }
        None => Ok(None),
    }
}

/// Advice catalog with the configurable neutral-branch text applied.
pub fn build_advice(config: Option<&dyn ConfigPort>) -> AdviceCatalog {
    match config.and_then(|c| c.get_string("advisor", "neutral_advice")) {
        Some(advice) => AdviceCatalog::with_ok_advice(advice),
        None => AdviceCatalog::default(),
    }
}

/// Profile store location: CLI flag beats `[profile] path` beats the
/// default file in the working directory.
pub fn resolve_profile_path(
    flag: Option<PathBuf>,
    config: Option<&dyn ConfigPort>,
) -> PathBuf {
    flag.or_else(|| {
        config
            .and_then(|c| c.get_string("profile", "path"))
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE_PATH))
}

/// Evaluation period: CLI flag beats `[advisor] interval_secs` beats 60s.
pub fn resolve_interval(
    flag: Option<u64>,
    config: Option<&dyn ConfigPort>,
) -> Result<Duration, MuhurtaError> {
    if let Some(secs) = flag {
        if secs == 0 {
            return Err(MuhurtaError::InvalidArgument {
                flag: "interval".to_string(),
                reason: "interval must be at least 1 second".to_string(),
            });
        }
        return Ok(Duration::from_secs(secs));
    }
    let secs = config
        .map(|c| c.get_int("advisor", "interval_secs", DEFAULT_INTERVAL_SECS as i64))
        .unwrap_or(DEFAULT_INTERVAL_SECS as i64);
    Ok(Duration::from_secs(secs.max(1) as u64))
}

/// Parses the `--at` argument as a local timestamp.
pub fn parse_at(input: &str) -> Result<NaiveDateTime, MuhurtaError> {
    NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M").map_err(|_| {
        MuhurtaError::InvalidArgument {
            flag: "at".to_string(),
            reason: format!("expected YYYY-MM-DD HH:MM, got {input:?}"),
        }
    })
}

pub fn build_birth_details(config: &dyn ConfigPort) -> BirthDetails {
    let get = |key: &str| config.get_string("birth", key).unwrap_or_default();
    BirthDetails {
        name: get("name"),
        dob: get("dob"),
        birth_time: get("time"),
        location: get("location"),
    }
}

pub fn format_profile(profile: &Profile) -> String {
    let roots = |set: &std::collections::BTreeSet<u8>| {
        set.iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Lucky roots:   {}\nUnlucky roots: {}\nLucky days:    {}",
        roots(&profile.lucky_roots),
        roots(&profile.unlucky_roots),
        profile.lucky_day_names().join(", "),
    )
}

fn load_profile_or_default(store: &JsonProfileAdapter) -> Result<Profile, ExitCode> {
    match store.load() {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => {
            eprintln!("No stored profile at {}; using default kundli", store.path().display());
            Ok(Profile::default())
        }
        Err(e) => Err(fail(&e)),
    }
}

fn run_check(
    config_path: Option<&PathBuf>,
    profile_flag: Option<PathBuf>,
    at: Option<&str>,
    json: bool,
) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);

    let now = match at {
        Some(input) => match parse_at(input) {
            Ok(now) => now,
            Err(e) => return fail(&e),
        },
        None => SystemClockAdapter.now(),
    };

    let store = JsonProfileAdapter::new(resolve_profile_path(profile_flag, config_port));
    let profile = match load_profile_or_default(&store) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let advice = build_advice(config_port);
    let evaluation = evaluate_with(now, &profile, &advice);

    let presenter: Box<dyn PresenterPort> = if json {
        Box::new(JsonPresenter)
    } else {
        Box::new(ConsolePresenter)
    };
    match presenter.present(&evaluation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn run_watch(
    config_path: Option<&PathBuf>,
    profile_flag: Option<PathBuf>,
    interval_flag: Option<u64>,
    count: Option<u64>,
    json: bool,
    log: Option<PathBuf>,
) -> ExitCode {
    init_tracing();

    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);

    let interval = match resolve_interval(interval_flag, config_port) {
        Ok(interval) => interval,
        Err(e) => return fail(&e),
    };
    let advice = build_advice(config_port);
    let store = JsonProfileAdapter::new(resolve_profile_path(profile_flag, config_port));

    let mut presenters: Vec<Box<dyn PresenterPort>> = Vec::new();
    if json {
        presenters.push(Box::new(JsonPresenter));
    } else {
        presenters.push(Box::new(ConsolePresenter));
    }
    if let Some(path) = log {
        presenters.push(Box::new(CsvLogAdapter::new(path)));
    }

    eprintln!(
        "Evaluating every {}s (profile: {})",
        interval.as_secs(),
        store.path().display()
    );

    let (ticker, _stop) = Ticker::new(interval);
    let ticks = run_advisor(
        &SystemClockAdapter,
        &store,
        &presenters,
        &advice,
        ticker,
        count,
    );
    tracing::info!(ticks, "watch finished");
    ExitCode::SUCCESS
}

fn run_fetch(config_path: &PathBuf, dry_run: bool) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Err(e) = validate_api_config(&config) {
        return fail(&e);
    }
    if let Err(e) = validate_birth_config(&config) {
        return fail(&e);
    }

    let client = match OpenAiAdapter::from_config(&config) {
        Ok(client) => client,
        Err(e) => return fail(&e),
    };
    let birth = build_birth_details(&config);

    eprintln!("Requesting profile for {}...", birth.name);
    let profile = match client.fetch_profile(&birth) {
        Ok(profile) => profile,
        Err(e) => return fail(&e),
    };

    println!("{}", format_profile(&profile));

    if dry_run {
        eprintln!("Dry run; profile not saved");
        return ExitCode::SUCCESS;
    }

    let store = JsonProfileAdapter::new(resolve_profile_path(None, Some(&config)));
    match store.save(&profile) {
        Ok(()) => {
            eprintln!("Saved profile to {}", store.path().display());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_set_profile(
    config_path: Option<&PathBuf>,
    profile_flag: Option<PathBuf>,
    lucky: &str,
    unlucky: &str,
    days: &str,
) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);

    let profile = match build_profile(lucky, unlucky, days) {
        Ok(profile) => profile,
        Err(e) => return fail(&e),
    };

    let store = JsonProfileAdapter::new(resolve_profile_path(profile_flag, config_port));
    match store.save(&profile) {
        Ok(()) => {
            println!("{}", format_profile(&profile));
            eprintln!("Saved profile to {}", store.path().display());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

/// Builds a profile from the three comma-separated CLI lists.
pub fn build_profile(lucky: &str, unlucky: &str, days: &str) -> Result<Profile, MuhurtaError> {
    Ok(Profile {
        lucky_roots: parse_roots(lucky)?,
        unlucky_roots: parse_roots(unlucky)?,
        lucky_days: parse_days(days)?,
    })
}

fn run_show_profile(config_path: Option<&PathBuf>, profile_flag: Option<PathBuf>) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);

    let store = JsonProfileAdapter::new(resolve_profile_path(profile_flag, config_port));
    let profile = match load_profile_or_default(&store) {
        Ok(profile) => profile,
        Err(code) => return code,
    };
    println!("{}", format_profile(&profile));
    ExitCode::SUCCESS
}

fn run_validate(profile_path: &PathBuf) -> ExitCode {
    let store = JsonProfileAdapter::new(profile_path.clone());
    match store.load() {
        Ok(Some(profile)) => {
            println!("Profile is valid");
            println!("{}", format_profile(&profile));
            ExitCode::SUCCESS
        }
        Ok(None) => {
            let err = MuhurtaError::ProfileParse {
                file: profile_path.display().to_string(),
                reason: "file not found".to_string(),
            };
            fail(&err)
        }
        Err(e) => fail(&e),
    }
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
