//! Marine forecast provider client
//!
//! HTTP client for the Stormglass point-forecast API. Each request covers
//! one (location, quantity) pair over a time window; per-source hour
//! values are collapsed to a single sample per hour before they leave
//! this module.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::SurfcastError;
use crate::models::{ForecastSample, Quantity};

/// Source of hourly forecast series
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fetch one quantity for one location over `[window_start, window_end]`
    /// (unix seconds). Timestamps use the same string format across both
    /// quantities, so samples from the two series can be joined on the
    /// exact text. Wind values are in km/h, swell in meters.
    async fn fetch_series(
        &self,
        lat: &str,
        lng: &str,
        quantity: Quantity,
        window_start: i64,
        window_end: i64,
    ) -> Result<Vec<ForecastSample>>;
}

/// Stormglass `weather/point` client
pub struct StormglassClient {
    client: ClientWithMiddleware,
    api_key: String,
    base_url: String,
}

impl StormglassClient {
    /// Create a new client from the provider configuration
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("surfcast/0.1.0")
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl ForecastProvider for StormglassClient {
    async fn fetch_series(
        &self,
        lat: &str,
        lng: &str,
        quantity: Quantity,
        window_start: i64,
        window_end: i64,
    ) -> Result<Vec<ForecastSample>> {
        let url = format!(
            "{}?lat={}&lng={}&params={}&start={}&end={}",
            self.base_url,
            lat,
            lng,
            quantity.param(),
            window_start,
            window_end
        );

        debug!("Requesting {} series for ({}, {})", quantity.param(), lat, lng);

        // Stormglass expects the raw key in the Authorization header
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.api_key.as_str())
            .send()
            .await
            .with_context(|| format!("Stormglass request failed for ({lat}, {lng})"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SurfcastError::provider(format!(
                "Stormglass returned {status} for ({lat}, {lng})"
            ))
            .into());
        }

        let body: stormglass::PointResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse Stormglass point response")?;

        if let Some(meta) = &body.meta {
            debug!(
                "Stormglass quota: {} of {} daily requests used",
                meta.request_count, meta.daily_quota
            );
        }

        Ok(body.series(quantity))
    }
}

/// Stormglass API response structures and conversion utilities
mod stormglass {
    use serde::Deserialize;

    use crate::models::{ForecastSample, Quantity};

    const MS_TO_KMH: f64 = 3.6;

    /// `weather/point` response
    #[derive(Debug, Deserialize)]
    pub struct PointResponse {
        #[serde(default)]
        pub hours: Vec<Hour>,
        pub meta: Option<Meta>,
    }

    /// Request accounting attached to every response
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Meta {
        #[serde(default)]
        pub request_count: u32,
        #[serde(default)]
        pub daily_quota: u32,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Hour {
        pub time: String,
        pub wind_speed: Option<SourceValues>,
        pub swell_height: Option<SourceValues>,
    }

    /// One reading per forecast source
    #[derive(Debug, Default, Deserialize)]
    pub struct SourceValues {
        pub dwd: Option<f64>,
        pub icon: Option<f64>,
        pub meteo: Option<f64>,
        pub noaa: Option<f64>,
        pub sg: Option<f64>,
    }

    impl SourceValues {
        /// Pick one value per hour, ICON first, then the fallbacks
        pub fn preferred(&self) -> Option<f64> {
            self.icon
                .or(self.sg)
                .or(self.noaa)
                .or(self.dwd)
                .or(self.meteo)
        }
    }

    impl PointResponse {
        /// Collapse per-source hour values into one sample per hour.
        ///
        /// Wind arrives in m/s and leaves in km/h; swell stays in meters.
        /// Hours carrying no value for the requested quantity are skipped.
        pub fn series(&self, quantity: Quantity) -> Vec<ForecastSample> {
            self.hours
                .iter()
                .filter_map(|hour| {
                    let values = match quantity {
                        Quantity::WindSpeed => hour.wind_speed.as_ref(),
                        Quantity::SwellHeight => hour.swell_height.as_ref(),
                    }?;
                    let raw = values.preferred()?;
                    let value = match quantity {
                        Quantity::WindSpeed => raw * MS_TO_KMH,
                        Quantity::SwellHeight => raw,
                    };
                    Some(ForecastSample::new(hour.time.clone(), value))
                })
                .collect()
        }
    }
}
