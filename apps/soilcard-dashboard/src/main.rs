use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use forms::client::FormsApi;
use forms::model::{FieldValues, FormKind, SubmitOutcome};
use forms::{FormsConfig, FormsLocalClient, HttpSubmitter, TimedNavigator};
use listing_core::SortSpec;
use modkit::TracedClient;
use roster::client::RosterApi;
use roster::model::{RosterDisplay, RosterField, RosterViewState};
use roster::{HttpRosterSource, RosterConfig, RosterLocalClient};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod render;
mod shutdown;

/// Soil Health Card dashboard - user roster and account forms
#[derive(Parser)]
#[command(name = "soilcard-dashboard")]
#[command(about = "Soil Health Card dashboard - user roster and account forms")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the user roster
    Roster(RosterArgs),
    /// Show every field of one user
    Show {
        /// User id
        id: u64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Submit the login form
    Login(LoginArgs),
    /// Submit the registration form
    Register(RegisterArgs),
    /// List the states and districts offered at registration
    Districts {
        /// Only this state
        state: Option<String>,
    },
    /// Check configuration
    Check,
}

#[derive(Args, Debug)]
struct RosterArgs {
    /// Case-insensitive search over name, email, city, company and id
    #[arg(short, long, default_value = "")]
    query: String,
    /// Sort column (id, name, username, email, city, company)
    #[arg(short, long)]
    sort: Option<RosterField>,
    /// Sort descending
    #[arg(long)]
    desc: bool,
    /// 1-based page number; clamped to the last page
    #[arg(short, long, default_value_t = 1)]
    page: usize,
    /// Rows per page (one of the configured choices)
    #[arg(long)]
    page_size: Option<usize>,
    /// Keep refreshing and reprint on every update until Ctrl+C
    #[arg(short, long)]
    watch: bool,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long, default_value = "")]
    user_type: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    password: String,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long, default_value = "")]
    user_type: String,
    #[arg(long, default_value = "")]
    full_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    mobile: String,
    #[arg(long, default_value = "")]
    password: String,
    #[arg(long, default_value = "")]
    confirm_password: String,
    #[arg(long, default_value = "")]
    state: String,
    #[arg(long, default_value = "")]
    district: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (verbosity)
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.app.home_dir));
    tracing::debug!(home_dir = %config.app.home_dir, "soilcard-dashboard starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Roster(args) => run_roster(&config, args).await,
        Commands::Show { id, json } => show_record(&config, id, json).await,
        Commands::Login(args) => {
            let values = field_values([
                ("userType", args.user_type),
                ("email", args.email),
                ("password", args.password),
            ]);
            submit_form(&config, FormKind::Login, values).await
        }
        Commands::Register(args) => {
            let values = field_values([
                ("userType", args.user_type),
                ("fullName", args.full_name),
                ("email", args.email),
                ("mobile", args.mobile),
                ("password", args.password),
                ("confirmPassword", args.confirm_password),
                ("state", args.state),
                ("district", args.district),
            ]);
            submit_form(&config, FormKind::Register, values).await
        }
        Commands::Districts { state } => list_districts(state.as_deref()),
        Commands::Check => check_config(config),
    }
}

fn roster_service(config: &AppConfig) -> Result<roster::Service> {
    let cfg: RosterConfig = config.module_config("roster")?;
    let service_config = cfg
        .service_config()
        .context("Invalid roster configuration")?;
    let client = TracedClient::with_timeout(cfg.request_timeout)?;
    let source = HttpRosterSource::new(client, cfg.users_url()?);
    tracing::debug!(users_url = %source.users_url(), "roster source ready");
    Ok(roster::Service::new(Arc::new(source), service_config))
}

fn view_state(service: &roster::Service, args: &RosterArgs) -> Result<RosterViewState> {
    let mut state = service.initial_state();
    state.query = args.query.clone();
    if let Some(field) = args.sort {
        state.sort = if args.desc {
            SortSpec::desc(field)
        } else {
            SortSpec::asc(field)
        };
    } else if args.desc {
        state.sort = SortSpec::desc(state.sort.key);
    }
    if let Some(size) = args.page_size {
        state.page_size =
            NonZeroUsize::new(size).ok_or_else(|| anyhow!("--page-size must be positive"))?;
    }
    state.page_index = args.page;
    Ok(state)
}

async fn run_roster(config: &AppConfig, args: RosterArgs) -> Result<()> {
    let service = roster_service(config)?;
    let state = view_state(&service, &args)?;

    if args.watch {
        return watch_roster(&service, state, args.json).await;
    }

    let api = RosterLocalClient::new(Arc::new(service));
    let display = api.list_page(state).await?;
    print_roster(&display, args.json)
}

/// Keep the view mounted and reprint on every published display until a
/// shutdown signal arrives. Stopping the handle halts the refresh timer.
async fn watch_roster(
    service: &roster::Service,
    state: RosterViewState,
    json: bool,
) -> Result<()> {
    let handle = service.mount(state)?;
    let mut updates = handle.subscribe();
    let shutdown = shutdown::wait_for_shutdown();
    tokio::pin!(shutdown);

    tracing::info!("watching roster, press Ctrl+C to stop");
    loop {
        tokio::select! {
            res = &mut shutdown => {
                res?;
                tracing::info!("shutdown requested");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let display = updates.borrow_and_update().clone();
                print_roster(&display, json)?;
            }
        }
    }

    handle.stop().await;
    Ok(())
}

fn print_roster(display: &RosterDisplay, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(display)?);
    } else {
        print!("{}", render::roster_table(display)?);
    }
    Ok(())
}

async fn show_record(config: &AppConfig, id: u64, json: bool) -> Result<()> {
    let api = RosterLocalClient::new(Arc::new(roster_service(config)?));
    let detail = api
        .get_record(id)
        .await
        .with_context(|| format!("Failed to show user {}", id))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print!("{}", render::record_detail(&detail)?);
    }
    Ok(())
}

fn field_values<const N: usize>(pairs: [(&str, String); N]) -> FieldValues {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

async fn submit_form(config: &AppConfig, kind: FormKind, values: FieldValues) -> Result<()> {
    let cfg: FormsConfig = config.module_config("forms")?;
    let client = TracedClient::with_timeout(cfg.request_timeout)?;
    let submitter = HttpSubmitter::new(client, cfg.submit_url()?);
    let navigator = Arc::new(TimedNavigator::new());
    let mut route = navigator.subscribe();
    let service = forms::Service::new(
        Arc::new(submitter),
        navigator.clone(),
        cfg.service_config(),
    )?;
    let api = FormsLocalClient::new(Arc::new(service));

    let outcome = api.submit(kind, values).await?;
    println!("{}", render::outcome_line(&outcome));

    match outcome {
        SubmitOutcome::Accepted { navigation, .. } => {
            tracing::debug!(
                route = %navigation.route,
                delay = ?navigation.delay,
                "waiting for redirect"
            );
            route
                .changed()
                .await
                .context("Navigator stopped before redirect")?;
            if let Some(target) = route.borrow().as_deref() {
                println!("Navigated to {}", target);
            }
            Ok(())
        }
        SubmitOutcome::Blocked(blocked) => {
            eprint!("{}", render::field_errors(&blocked.errors)?);
            Err(anyhow!("{} form is invalid", kind))
        }
        SubmitOutcome::Rejected { message } => Err(anyhow!(message)),
        SubmitOutcome::InFlight => Err(anyhow!("{} form is already being submitted", kind)),
    }
}

fn list_districts(state: Option<&str>) -> Result<()> {
    use forms::domain::catalog::{districts_for, STATE_DISTRICTS};

    match state {
        Some(state) => {
            let districts =
                districts_for(state).ok_or_else(|| anyhow!("Unknown state: {}", state))?;
            println!("{}", districts.join(", "));
        }
        None => {
            for (state, districts) in STATE_DISTRICTS.iter() {
                println!("{}: {}", state, districts.join(", "));
            }
        }
    }
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let roster_cfg: RosterConfig = config.module_config("roster")?;
    roster_cfg.users_url()?;
    roster_cfg
        .service_config()
        .context("Invalid roster configuration")?;
    let forms_cfg: FormsConfig = config.module_config("forms")?;
    forms_cfg.submit_url()?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
