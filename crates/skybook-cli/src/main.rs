//! SkyBook - search flights and manage bookings from the terminal.
//!
//! Each command stands in for one view of the booking app: it is checked
//! against the route guard first, runs its requests through the shared
//! `ApiClient`, and reports a forced return to the login view when the
//! gateway rejects the stored session.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use futures::future::try_join;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skybook_core::api::{flights, orders, users, ApiClient, ApiError};
use skybook_core::auth::{self, CredentialStore, FileStore};
use skybook_core::models::{
    ApiResponse, Credentials, FlightPage, FlightQuery, FlightStatus, Order, OrderPage,
    SeatAllocationRequest, User,
};
use skybook_core::nav::LOGIN_ROUTE;
use skybook_core::router::{self, Resolution, Route};
use skybook_core::utils::{format_amount, format_datetime, message, truncate_string};
use skybook_core::{ChannelNavigator, Config};

/// Log filter used when RUST_LOG is unset. Notices and request failures are
/// already printed to the user, so their log lines are silenced.
const DEFAULT_LOG_FILTER: &str = "warn,skybook_core::utils::message=off,skybook_core::api::client=error";

#[derive(Parser)]
#[command(name = "skybook", version, about = "Search flights and manage bookings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and keep the session for later commands
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Create a new account
    Register {
        #[arg(short, long)]
        username: String,
    },
    /// Drop the stored session
    Logout {
        /// Also remove the password saved in the keychain
        #[arg(long)]
        forget: bool,
    },
    /// Show the logged-in user
    Whoami,
    /// Profile and most recent orders
    Dashboard,
    /// Search flights
    Flights(FlightArgs),
    /// List your orders
    Orders {
        /// Zero-based page number
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Show one order
    Order { order_number: String },
    /// Book a seat on a flight; the seat is assigned by the airline
    Book { flight_number: String },
}

#[derive(Args)]
struct FlightArgs {
    /// Departure city
    #[arg(long)]
    from: Option<String>,
    /// Arrival city
    #[arg(long)]
    to: Option<String>,
    #[arg(long)]
    airline: Option<String>,
    /// Flight number
    #[arg(long)]
    number: Option<String>,
    /// SCHEDULED, DELAYED, CANCELLED, DEPARTED or ARRIVED
    #[arg(long, value_parser = parse_status)]
    status: Option<FlightStatus>,
    #[arg(long, default_value_t = 0)]
    page: u32,
    #[arg(long, default_value_t = 20)]
    size: u32,
}

fn parse_status(s: &str) -> Result<FlightStatus, String> {
    FlightStatus::parse(s).ok_or_else(|| format!("unknown flight status: {}", s))
}

impl Command {
    /// The view this command stands in for
    fn route(&self) -> Route {
        match self {
            Command::Login { .. } | Command::Register { .. } | Command::Logout { .. } => Route::Login,
            Command::Whoami | Command::Dashboard => Route::Dashboard,
            Command::Flights(_) | Command::Book { .. } => Route::Flights,
            Command::Orders { .. } | Command::Order { .. } => Route::Orders,
        }
    }
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        Config::default()
    });
    config.apply_env()?;
    debug!(base_url = %config.base_url, "Config loaded");

    let route = cli.command.route();
    let (navigator, mut redirects) = ChannelNavigator::new(route.path());
    let client = ApiClient::builder(config.base_url.clone())
        .timeout(config.timeout())
        .store(Arc::new(FileStore::new(config.cache_dir()?)))
        .navigator(Arc::new(navigator))
        .build()?;

    if let Resolution::Redirect(to) = router::resolve(route.path(), client.session()) {
        info!(from = route.path(), to, "Route guard redirect");
        println!("{}", message::warning("Please log in first: skybook login"));
        return Ok(());
    }

    let result = run(cli.command, &client, &mut config).await;

    if let Err(ref e) = result {
        eprintln!("{}", message::error(describe_error(e)));
    }

    while let Ok(redirect) = redirects.try_recv() {
        if redirect.to == LOGIN_ROUTE {
            println!(
                "{}",
                message::warning("Your session has expired. Run `skybook login` to sign in again.")
            );
        }
    }

    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Command, client: &ApiClient, config: &mut Config) -> Result<()> {
    match command {
        Command::Login { username } => login(client, config, username).await,
        Command::Register { username } => register(client, username).await,
        Command::Logout { forget } => logout(client, config, forget),
        Command::Whoami => whoami(client),
        Command::Dashboard => dashboard(client).await,
        Command::Flights(args) => search_flights(client, args).await,
        Command::Orders { page, size } => list_orders(client, page, size).await,
        Command::Order { order_number } => show_order(client, &order_number).await,
        Command::Book { flight_number } => book(client, flight_number).await,
    }
}

/// Turn an error into something a user can act on
fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Unauthorized) => "Not authorized - please log in again".to_string(),
        Some(ApiError::Rejected(msg)) | Some(ApiError::Validation(msg)) => msg.clone(),
        Some(e) if e.is_transport() => {
            "Unable to connect to server. Check that the gateway is running.".to_string()
        }
        Some(e) => e.to_string(),
        None => format!("{:#}", err),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_password() -> Result<String> {
    let password = rpassword::prompt_password("Password: ")?;
    Ok(password)
}

async fn login(client: &ApiClient, config: &mut Config, username: Option<String>) -> Result<()> {
    let username = match username
        .or_else(|| std::env::var("SKYBOOK_USERNAME").ok())
        .or_else(|| config.last_username.clone())
    {
        Some(name) if !name.is_empty() => name,
        _ => prompt("Username: ")?,
    };

    let password = match std::env::var("SKYBOOK_PASSWORD") {
        Ok(p) if !p.is_empty() => p,
        _ if CredentialStore::has_credentials(&username) => {
            if prompt("Use saved password? [Y/n]: ")?.to_lowercase() != "n" {
                CredentialStore::get_password(&username)?
            } else {
                prompt_password()?
            }
        }
        _ => prompt_password()?,
    };

    println!("Authenticating...");
    let result = match auth::sign_in(client, &Credentials::new(&username, &password)).await {
        Ok(result) => result,
        Err(ApiError::Unauthorized) => return Err(anyhow!("Invalid username or password")),
        Err(e) => return Err(e.into()),
    };

    if let Err(e) = CredentialStore::store(&username, &password) {
        warn!(error = %e, "Failed to store credentials");
    }
    config.last_username = Some(username);
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }

    println!(
        "{}",
        message::success(format!("Welcome, {}!", result.user_info.display_name()))
    );
    Ok(())
}

async fn register(client: &ApiClient, username: String) -> Result<()> {
    let password = prompt_password()?;
    let confirm = rpassword::prompt_password("Confirm password: ")?;
    if password != confirm {
        return Err(anyhow!("Passwords do not match"));
    }

    let result = auth::sign_up(client, &Credentials::new(&username, password)).await?;
    let id = result
        .user_id
        .map(|id| format!(" (id {})", id))
        .unwrap_or_default();
    println!(
        "{}",
        message::success(format!("Registered {}{}. You can now log in.", username, id))
    );
    Ok(())
}

fn logout(client: &ApiClient, config: &Config, forget: bool) -> Result<()> {
    auth::sign_out(client)?;
    if forget {
        if let Some(ref username) = config.last_username {
            CredentialStore::delete(username).context("Failed to forget saved password")?;
        }
    }
    println!("{}", message::success("Logged out"));
    Ok(())
}

fn stored_user(client: &ApiClient) -> Result<User> {
    client
        .session()
        .user::<User>()?
        .ok_or_else(|| anyhow!("No user profile stored - please log in again"))
}

fn whoami(client: &ApiClient) -> Result<()> {
    let user = stored_user(client)?;
    println!("{} ({})", user.display_name(), user.username);
    println!("  id:    {}", user.id);
    if let Some(ref email) = user.email {
        println!("  email: {}", email);
    }
    if let Some(ref phone) = user.phone {
        println!("  phone: {}", phone);
    }
    Ok(())
}

async fn dashboard(client: &ApiClient) -> Result<()> {
    let user = stored_user(client)?;

    let (profile, recent) = try_join(
        users::get_user_info::<ApiResponse<User>>(client, user.id),
        orders::fetch_user_orders::<ApiResponse<OrderPage>>(client, 0, 5),
    )
    .await?;

    let profile = profile.into_data()?;
    let recent = recent.into_data()?;

    println!("Hello, {}!", profile.display_name());
    println!();
    println!("Recent orders ({} total):", recent.total);
    print_orders(&recent.orders);
    Ok(())
}

async fn search_flights(client: &ApiClient, args: FlightArgs) -> Result<()> {
    let mut query = FlightQuery::new().page(args.page, args.size);
    query.departure_city = args.from;
    query.arrival_city = args.to;
    query.airline = args.airline;
    query.flight_number = args.number;
    query.status = args.status;

    let response: ApiResponse<FlightPage> = flights::query_flights(client, &query).await?;
    let page = response.into_data()?;

    if page.flight_list.is_empty() {
        println!("{}", message::warning("No flights match your search"));
        return Ok(());
    }

    println!(
        "{:<8} {:<14} {:<28} {:<20} {:>10} {:>6}  {}",
        "FLIGHT", "AIRLINE", "ROUTE", "DEPARTS", "PRICE", "SEATS", "STATUS"
    );
    for flight in &page.flight_list {
        let status = flight
            .status
            .as_deref()
            .and_then(FlightStatus::parse)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<14} {:<28} {:<20} {:>10} {:>6}  {}",
            flight.flight_number,
            truncate_string(flight.airline.as_deref().unwrap_or("-"), 14),
            truncate_string(&flight.route_display(), 28),
            format_datetime(flight.departure_time.as_ref()),
            format_amount(flight.base_price),
            flight
                .available_seats
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            status,
        );
    }

    if let (Some(current), Some(total)) = (page.current_page, page.total_pages) {
        println!();
        println!("Page {} of {}", current + 1, total.max(1));
    }
    Ok(())
}

fn print_orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("  (none)");
        return;
    }
    println!("  {:<22} {:<8} {:<6} {:>10}", "ORDER", "FLIGHT", "SEAT", "AMOUNT");
    for order in orders {
        println!(
            "  {:<22} {:<8} {:<6} {:>10}",
            order.order_number,
            order.flight_number.as_deref().unwrap_or("-"),
            order.seat_number.as_deref().unwrap_or("-"),
            format_amount(order.amount),
        );
    }
}

async fn list_orders(client: &ApiClient, page: u32, size: u32) -> Result<()> {
    let response: ApiResponse<OrderPage> = orders::fetch_user_orders(client, page, size).await?;
    let page = response.into_data()?;

    print_orders(&page.orders);
    println!();
    println!(
        "Page {} of {} ({} orders)",
        page.current_page + 1,
        page.total_pages.max(1),
        page.total
    );
    if page.has_next() {
        println!("Next page: skybook orders --page {}", page.current_page + 1);
    }
    Ok(())
}

async fn show_order(client: &ApiClient, order_number: &str) -> Result<()> {
    let response: ApiResponse<Order> = orders::fetch_order_detail(client, order_number).await?;
    let order = response.into_data()?;

    println!("Order {}", order.order_number);
    println!("  flight: {}", order.flight_number.as_deref().unwrap_or("-"));
    println!("  seat:   {}", order.seat_number.as_deref().unwrap_or("-"));
    println!("  amount: {}", format_amount(order.amount));
    Ok(())
}

async fn book(client: &ApiClient, flight_number: String) -> Result<()> {
    let request = SeatAllocationRequest::new(flight_number);
    let response: ApiResponse<Order> =
        orders::create_order_with_seat_allocation(client, &request).await?;
    let order = response.into_data()?;

    println!(
        "{}",
        message::success(format!(
            "Booked {} seat {} - order {}",
            order.flight_number.as_deref().unwrap_or(&request.flight_number),
            order.seat_number.as_deref().unwrap_or("?"),
            order.order_number
        ))
    );
    Ok(())
}
