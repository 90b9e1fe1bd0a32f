mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use cropwise_core::weather::openweather::DEFAULT_BASE_URL;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "cropwise",
    version,
    about = "Crop recommendation and fertilizer advice from soil and weather readings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a crop for a soil sample
    Predict(PredictArgs),
    /// Show fertilizer advice for N, P, K and pH
    Fertilizer {
        #[arg(long)]
        nitrogen: f64,
        #[arg(long)]
        phosphorus: f64,
        #[arg(long)]
        potassium: f64,
        #[arg(long)]
        ph: f64,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect and validate crop tables
    Crops {
        #[command(subcommand)]
        action: CropsAction,
    },
    /// Look up the current weather for a location
    Weather {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[command(flatten)]
        weather: WeatherArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Run the HTTP API server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct PredictArgs {
    /// Nitrogen content (0-1000)
    #[arg(long)]
    pub nitrogen: f64,
    /// Phosphorus content (0-1000)
    #[arg(long)]
    pub phosphorus: f64,
    /// Potassium content (0-1000)
    #[arg(long)]
    pub potassium: f64,
    /// Soil pH (0-14)
    #[arg(long)]
    pub ph: f64,
    /// Rainfall in mm (0-1000)
    #[arg(long)]
    pub rainfall: f64,

    /// Temperature in °C. Requires --humidity.
    #[arg(long, allow_negative_numbers = true, requires = "humidity")]
    pub temperature: Option<f64>,
    /// Relative humidity in %. Requires --temperature.
    #[arg(long, requires = "temperature")]
    pub humidity: Option<f64>,

    /// Latitude to fetch weather for (instead of --temperature/--humidity)
    #[arg(
        long,
        allow_negative_numbers = true,
        requires = "lon",
        conflicts_with = "temperature"
    )]
    pub lat: Option<f64>,
    /// Longitude to fetch weather for
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,

    #[command(flatten)]
    pub weather: WeatherArgs,

    #[command(flatten)]
    pub table: TableArgs,

    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table")]
    pub output: String,

    /// Show every crop's score and each criterion
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Args)]
pub struct TableArgs {
    /// Custom JSON crop table
    #[arg(long = "table", value_name = "FILE", env = "CROPWISE_TABLE")]
    pub table_file: Option<PathBuf>,

    /// Predefined crop table (ignored when --table is given)
    #[arg(long, value_name = "NAME", default_value = "default")]
    pub preset: String,
}

#[derive(Args)]
pub struct WeatherArgs {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub openweather_api_key: Option<String>,

    /// OpenWeatherMap base URL
    #[arg(long, env = "OPENWEATHER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub openweather_base_url: String,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long, env = "CROPWISE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Append prediction history to this JSON-lines file (in memory if unset)
    #[arg(long, env = "CROPWISE_HISTORY_FILE", value_name = "FILE")]
    pub history_file: Option<PathBuf>,

    #[command(flatten)]
    pub table: TableArgs,

    #[command(flatten)]
    pub weather: WeatherArgs,
}

#[derive(Subcommand)]
enum CropsAction {
    /// List predefined crop tables
    List,
    /// Print a crop table's thresholds
    Explain {
        #[command(flatten)]
        table: TableArgs,
    },
    /// Describe the JSON crop table format
    Schema,
    /// Validate a custom crop table file
    Validate {
        /// Path to JSON crop table
        file: PathBuf,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cropwise_core=info,cropwise_server=info,tower_http=info,warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Predict(args) => commands::predict::run(args).await,
        Commands::Fertilizer {
            nitrogen,
            phosphorus,
            potassium,
            ph,
            output,
        } => commands::fertilizer::run(nitrogen, phosphorus, potassium, ph, &output),
        Commands::Crops { action } => match action {
            CropsAction::List => commands::crops::list(),
            CropsAction::Explain { table } => commands::crops::explain(&table),
            CropsAction::Schema => commands::crops::schema(),
            CropsAction::Validate { file } => commands::crops::validate(&file),
        },
        Commands::Weather {
            lat,
            lon,
            weather,
            output,
        } => commands::weather::run(lat, lon, &weather, &output).await,
        Commands::Serve(args) => commands::serve::run(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        for issue in e.issues() {
            eprintln!("  {issue}");
        }
        std::process::exit(1);
    }
}
