//! Prediction orchestrator: validation, weather lookup, scoring and history.

use crate::error::CropwiseError;
use crate::history::{HistoryRecord, HistoryStore};
use crate::model::{Location, PredictionRequest, UserId, WeatherReport};
use crate::rules::schema::CropTableDef;
use crate::scoring::outcome::PredictionResult;
use crate::validate;
use crate::weather::WeatherProvider;
use moka::future::Cache;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const WEATHER_CACHE_CAPACITY: u64 = 10_000;
const WEATHER_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// A prediction made from a location, with the weather that was used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedPrediction {
    pub prediction: PredictionResult,
    pub weather: WeatherReport,
}

pub struct PredictionService {
    table: Arc<CropTableDef>,
    weather: Arc<dyn WeatherProvider>,
    history: Arc<dyn HistoryStore>,
    weather_cache: Cache<(Decimal, Decimal), WeatherReport>,
}

impl PredictionService {
    pub fn new(
        table: CropTableDef,
        weather: Arc<dyn WeatherProvider>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        let weather_cache = Cache::builder()
            .max_capacity(WEATHER_CACHE_CAPACITY)
            .time_to_live(WEATHER_CACHE_TTL)
            .build();

        Self {
            table: Arc::new(table),
            weather,
            history,
            weather_cache,
        }
    }

    pub fn table(&self) -> &CropTableDef {
        &self.table
    }

    pub fn weather_backend(&self) -> &str {
        self.weather.backend_name()
    }

    /// Score a complete request that already carries temperature and humidity.
    pub async fn predict(
        &self,
        body: &Value,
        user: Option<&UserId>,
    ) -> Result<PredictionResult, CropwiseError> {
        let request = validate::parse_prediction_request(body).inspect_err(log_rejection)?;
        self.score_and_record(&request, user).await
    }

    /// Look up the weather for `location`, then score `soil` under it.
    ///
    /// Soil and location are both validated before any outbound call.
    pub async fn predict_at(
        &self,
        soil: &Value,
        location: &Value,
        user: Option<&UserId>,
    ) -> Result<LocatedPrediction, CropwiseError> {
        let (soil, location) = match (
            validate::parse_soil_sample(soil),
            validate::parse_location(location),
        ) {
            (Ok(s), Ok(l)) => (s, l),
            (s, l) => {
                let mut issues = Vec::new();
                for err in [s.err(), l.err()].into_iter().flatten() {
                    match err {
                        CropwiseError::Validation(found) => issues.extend(found),
                        other => return Err(other),
                    }
                }
                let err = CropwiseError::Validation(issues);
                log_rejection(&err);
                return Err(err);
            }
        };

        let weather = self.lookup_weather(location).await?;
        let request = PredictionRequest {
            soil,
            weather: weather.reading(),
        };
        let prediction = self.score_and_record(&request, user).await?;

        Ok(LocatedPrediction {
            prediction,
            weather,
        })
    }

    /// Validated weather lookup for a `{lat, lon}` body.
    pub async fn weather(&self, body: &Value) -> Result<WeatherReport, CropwiseError> {
        let location = validate::parse_location(body).inspect_err(log_rejection)?;
        self.lookup_weather(location).await
    }

    /// A user's past predictions, newest first.
    pub async fn history(&self, user: &UserId) -> Result<Vec<HistoryRecord>, CropwiseError> {
        self.history.list(user).await
    }

    async fn score_and_record(
        &self,
        request: &PredictionRequest,
        user: Option<&UserId>,
    ) -> Result<PredictionResult, CropwiseError> {
        let evaluation = crate::evaluate(&self.table, request)?;
        let result = evaluation.result;

        tracing::info!(
            crop = %result.crop,
            confidence = result.confidence,
            alternatives = ?result.alternative_crops,
            "crop prediction made"
        );

        if let Some(user) = user {
            let record = HistoryRecord::new(user.clone(), request, &result);
            if let Err(e) = self.history.append(record).await {
                tracing::warn!(user = %user, "prediction not saved to history: {}", e);
            }
        }

        Ok(result)
    }

    /// Fetch weather, falling back to the last report for the same grid cell
    /// when the backend is unreachable or returns garbage.
    async fn lookup_weather(&self, location: Location) -> Result<WeatherReport, CropwiseError> {
        let key = location.grid_cell();

        match self.weather.current(location).await {
            Ok(report) => {
                tracing::info!(
                    %location,
                    backend = self.weather.backend_name(),
                    temperature = %report.temperature,
                    humidity = %report.humidity,
                    "weather fetched"
                );
                self.weather_cache.insert(key, report.clone()).await;
                Ok(report)
            }
            Err(CropwiseError::Upstream(reason)) => match self.weather_cache.get(&key).await {
                Some(cached) => {
                    tracing::warn!(%location, "weather lookup failed, using cached report: {}", reason);
                    Ok(cached)
                }
                None => {
                    tracing::error!(%location, "weather lookup failed: {}", reason);
                    Err(CropwiseError::Upstream(reason))
                }
            },
            Err(e) => Err(e),
        }
    }
}

fn log_rejection(err: &CropwiseError) {
    let fields: Vec<&str> = err.issues().iter().map(|i| i.field.as_str()).collect();
    tracing::warn!(?fields, "rejected invalid input");
}
