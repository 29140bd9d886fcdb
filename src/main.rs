mod config;
mod render;
mod shell;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use market::app::{AppState, Screen};
use market::auth::Role;
use market::booking::{BookingAttempt, BookingError};
use market::dashboard::{DashboardError, ProfessionalDashboard};
use market::filter::SortKey;
use market::fixtures::FixtureError;
use market::geo::{self, DisabledLocator, FixedLocator, Locator};
use market::map::{BARCELONA_CENTER, DEFAULT_ZOOM, MapCommand, Marker};
use market::registration::{NeighborhoodChoice, RegistrationError, RegistrationForm, ServiceChoice};
use market::{Catalog, ErrorCode, Professional, ServiceType};
use serde::Serialize;
use time::{Date, OffsetDateTime};
use tracing::Level;

use crate::config::{AppConfig, ConfigError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error(transparent)]
    Fixtures(#[from] FixtureError),
    #[error("no professional with id {0}")]
    UnknownProfessional(String),
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Io { .. } => "E_IO",
            Self::Fixtures(e) => e.error_code(),
            Self::UnknownProfessional(_) => "E_UNKNOWN_PROFESSIONAL",
            Self::Booking(e) => e.error_code(),
            Self::Dashboard(e) => e.error_code(),
            Self::Registration(e) => e.error_code(),
            Self::Json(_) => "E_JSON",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ifix", about = "iFix Barcelona: find and book local professionals")]
struct Cli {
    /// JSON catalog to load instead of the built-in one.
    #[arg(long, env = "IFIX_FIXTURES", global = true)]
    fixtures: Option<PathBuf>,

    /// Treat this date as today (YYYY-MM-DD).
    #[arg(long, env = "IFIX_TODAY", global = true)]
    today: Option<String>,

    /// Raise log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List professionals after filtering and sorting.
    List(ListArgs),
    /// Show one professional with reviews.
    Profile {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Request a booking and print the pending confirmation.
    Book {
        id: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
    },
    /// Print map markers and camera commands.
    Map {
        #[arg(long, value_delimiter = ',')]
        service: Vec<ServiceType>,
        #[arg(long)]
        select: Option<String>,
    },
    /// Professional dashboard with incoming bookings.
    Dashboard {
        #[arg(long)]
        pending_only: bool,
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Account view for a role.
    Account {
        #[arg(long, default_value = "client")]
        role: Role,
    },
    /// Register as a professional.
    Register(RegisterArgs),
    /// Interactive session; reads commands line by line.
    Shell {
        #[arg(long, default_value = "-", help = "Input file path, or - for stdin")]
        input: String,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long, value_delimiter = ',')]
    service: Vec<ServiceType>,
    #[arg(long, default_value_t = 0.0)]
    min_rating: f64,
    #[arg(long, default_value = "rating")]
    sort: SortKey,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    business: String,
    #[arg(long)]
    owner: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    /// A listed service or any custom trade.
    #[arg(long)]
    service: Option<String>,
    /// A listed neighborhood or any other.
    #[arg(long)]
    neighborhood: Option<String>,
}

/// Everything a subcommand needs besides its own arguments.
struct Context {
    catalog: Catalog,
    today: Date,
    config: AppConfig,
}

#[derive(Serialize)]
struct MapOutput {
    initial: MapCommand,
    markers: Vec<Marker>,
    commands: Vec<MapCommand>,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("{}: {error}", error.error_code());
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    let mut settings = AppConfig::from_env()?;
    init_tracing(cli.verbose, settings.log_level);
    if let Err(error) = dotenv {
        if !error.not_found() {
            tracing::warn!(%error, "ignoring unreadable .env");
        }
    }

    if let Some(path) = cli.fixtures {
        settings.fixtures = Some(path);
    }
    if let Some(raw) = cli.today.as_deref() {
        settings.today = Some(config::parse_date("--today", raw)?);
    }
    let catalog = load_catalog(&settings)?;
    let today = settings.today.unwrap_or_else(|| OffsetDateTime::now_utc().date());
    tracing::debug!(professionals = catalog.professionals.len(), %today, "catalog ready");
    let ctx = Context { catalog, today, config: settings };

    match cli.command {
        Command::List(args) => run_list(&ctx, args),
        Command::Profile { id, json } => run_profile(&ctx, &id, json),
        Command::Book { id, date, time } => run_book(&ctx, &id, &date, &time),
        Command::Map { service, select } => run_map(&ctx, service, select.as_deref()).await,
        Command::Dashboard { pending_only, confirm } => run_dashboard(pending_only, confirm.as_deref()),
        Command::Account { role } => {
            run_account(role);
            Ok(())
        }
        Command::Register(args) => run_register(args),
        Command::Shell { input } => run_shell(ctx, &input).await,
    }
}

fn init_tracing(verbose: u8, configured: Level) {
    let level = match verbose {
        0 => configured,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(io::stderr).init();
}

fn load_catalog(config: &AppConfig) -> Result<Catalog, CliError> {
    let Some(path) = &config.fixtures else {
        return Ok(Catalog::builtin());
    };
    let json = fs::read_to_string(path).map_err(|source| CliError::Io { path: path.display().to_string(), source })?;
    let catalog = Catalog::from_json(&json)?;
    tracing::info!(path = %path.display(), professionals = catalog.professionals.len(), "loaded catalog");
    Ok(catalog)
}

fn locator(config: &AppConfig) -> Box<dyn Locator> {
    match config.device_location {
        Some(position) => Box::new(FixedLocator(position)),
        None => Box::new(DisabledLocator),
    }
}

fn find<'a>(ctx: &'a Context, id: &str) -> Result<&'a Professional, CliError> {
    ctx.catalog.find(id).ok_or_else(|| CliError::UnknownProfessional(id.to_owned()))
}

fn run_list(ctx: &Context, args: ListArgs) -> Result<(), CliError> {
    let mut app = AppState::new();
    for service in args.service {
        app.toggle_service(service);
    }
    app.set_min_rating(args.min_rating);
    app.set_sort(args.sort);
    let visible = app.visible(&ctx.catalog);
    if args.json {
        return print_json(&visible);
    }
    println!("{}", render::list(&visible, None));
    Ok(())
}

fn run_profile(ctx: &Context, id: &str, json: bool) -> Result<(), CliError> {
    let professional = find(ctx, id)?;
    let reviews = ctx.catalog.reviews_for(id);
    if json {
        return print_json(&serde_json::json!({ "professional": professional, "reviews": reviews }));
    }
    println!("{}", render::profile(professional, &reviews));
    Ok(())
}

fn run_book(ctx: &Context, id: &str, date: &str, time: &str) -> Result<(), CliError> {
    let professional = find(ctx, id)?;
    let date = config::parse_date("--date", date)?;
    let mut attempt = BookingAttempt::open(professional.id.clone());
    attempt.select_date(date, ctx.today)?;
    attempt.continue_to_time()?;
    attempt.select_time(time)?;
    let request = attempt.confirm()?;
    println!("{}", render::confirmation(&request, professional));
    Ok(())
}

async fn run_map(ctx: &Context, services: Vec<ServiceType>, select: Option<&str>) -> Result<(), CliError> {
    let mut app = AppState::new();
    for service in services {
        app.toggle_service(service);
    }

    let mut commands = Vec::new();
    let outcome = geo::acquire(locator(&ctx.config).as_ref(), ctx.config.geo_timeout).await;
    commands.extend(app.apply_location(outcome));
    if let Some(id) = select {
        commands.push(app.select_professional(&ctx.catalog, id).ok_or_else(|| CliError::UnknownProfessional(id.to_owned()))?);
    }

    let initial = MapCommand::FlyTo { center: BARCELONA_CENTER, zoom: DEFAULT_ZOOM };
    print_json(&MapOutput { initial, markers: app.markers(&ctx.catalog), commands })
}

fn run_dashboard(pending_only: bool, confirm: Option<&str>) -> Result<(), CliError> {
    let mut dashboard = ProfessionalDashboard::with_fixtures();
    if let Some(id) = confirm {
        dashboard.confirm(id)?;
        dashboard.select(id);
    }
    if pending_only {
        dashboard.toggle_pending_only();
    }
    println!("{}", render::dashboard(&dashboard));
    Ok(())
}

fn run_account(role: Role) {
    let mut app = AppState::new();
    app.sign_in(role);
    app.open_account();
    if let Some(view) = app.account_view() {
        println!("{}", render::account(&view));
    }
}

fn run_register(args: RegisterArgs) -> Result<(), CliError> {
    let form = RegistrationForm {
        business_name: args.business,
        owner_name: args.owner,
        email: args.email,
        phone: args.phone,
        service: args.service.as_deref().map(ServiceChoice::parse),
        neighborhood: args.neighborhood.as_deref().map(NeighborhoodChoice::parse),
    };
    let mut app = AppState::new();
    app.navigate(Screen::Registration);
    let registration = app.complete_registration(form)?;
    println!("{}", render::registration(&registration));
    Ok(())
}

async fn run_shell(ctx: Context, input: &str) -> Result<(), CliError> {
    let reader: Box<dyn BufRead> = if input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(input).map_err(|source| CliError::Io { path: input.to_owned(), source })?;
        Box::new(BufReader::new(file))
    };
    let locator = locator(&ctx.config);
    let mut session = shell::Session::new(ctx.catalog, ctx.today, locator, ctx.config.geo_timeout);
    shell::run(&mut session, reader, io::stdout().lock())
        .await
        .map_err(|source| CliError::Io { path: input.to_owned(), source })?;
    tracing::debug!(screen = ?session.app().screen(), role = ?session.app().role(), "shell finished");
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
