use crate::commands::{load_table, weather_provider};
use crate::ServeArgs;
use cropwise_core::error::CropwiseError;
use cropwise_core::history::{HistoryStore, JsonlHistory, MemoryHistory};
use cropwise_core::PredictionService;
use cropwise_server::AppState;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

pub async fn run(args: ServeArgs) -> Result<(), CropwiseError> {
    let table = load_table(&args.table)?;
    let weather = weather_provider(&args.weather)?;

    let history: Arc<dyn HistoryStore> = match &args.history_file {
        Some(path) => {
            let store = JsonlHistory::new(path);
            tracing::info!(path = %store.path().display(), "Persisting prediction history");
            Arc::new(store)
        }
        None => {
            tracing::warn!("No history file configured, history is kept in memory only");
            Arc::new(MemoryHistory::new())
        }
    };

    let ip: IpAddr = args
        .host
        .parse()
        .map_err(|e| CropwiseError::Config(format!("invalid host '{}': {}", args.host, e)))?;
    let addr = SocketAddr::new(ip, args.port);

    tracing::info!(table = %table.name, version = %table.version, "Loaded crop table");

    let service = PredictionService::new(table, weather, history);
    cropwise_server::serve(addr, AppState::new(service)).await
}
