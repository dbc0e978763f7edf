//! Client for the City of Philadelphia Carto SQL API (OpenDataPhilly).

use anyhow::{Result, bail};
use reqwest::Url;
use tracing::{debug, info};

use crate::calls::ServiceCall;
use crate::fetch::{HttpClient, fetch_bytes};
use crate::parser::{parse_calls, parse_precincts};
use crate::polling::PrecinctRecord;

pub const DEFAULT_BASE_URL: &str = "https://phl.carto.com/api/v2/sql";

pub struct CartoClient<C> {
    http: C,
    base_url: String,
}

impl<C: HttpClient> CartoClient<C> {
    pub fn new(http: C) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http: C, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    pub fn polling_places_url(&self) -> Result<Url> {
        Ok(Url::parse_with_params(
            &self.base_url,
            &[
                ("q", "SELECT * FROM polling_places"),
                ("filename", "polling_places"),
                ("format", "geojson"),
                ("skipfields", "cartodb_id"),
            ],
        )?)
    }

    /// Most recent calls first, `limit` rows starting at `offset`.
    pub fn service_calls_url(&self, limit: usize, offset: usize) -> Result<Url> {
        let q = format!(
            "SELECT * FROM public_cases_fc ORDER BY requested_datetime DESC LIMIT {limit} OFFSET {offset}"
        );
        Ok(Url::parse_with_params(
            &self.base_url,
            &[
                ("filename", "public_cases_fc"),
                ("format", "csv"),
                ("skipfields", "cartodb_id,the_geom,the_geom_webmercator"),
                ("q", q.as_str()),
            ],
        )?)
    }

    /// Every row of the polling places table, one record per precinct.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_polling_places(&self) -> Result<Vec<PrecinctRecord>> {
        let url = self.polling_places_url()?;
        let bytes = fetch_bytes(&self.http, url.as_str()).await?;
        let records = parse_precincts(&bytes)?;
        info!(records = records.len(), "Polling place rows fetched");
        Ok(records)
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_service_calls(&self, limit: usize, offset: usize) -> Result<Vec<ServiceCall>> {
        let url = self.service_calls_url(limit, offset)?;
        let bytes = fetch_bytes(&self.http, url.as_str()).await?;
        parse_calls(&bytes)
    }

    /// Walks up to `max_pages` pages of `page_size` calls, starting at
    /// `start_offset`. Stops early at the first short page.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_all_service_calls(
        &self,
        page_size: usize,
        max_pages: usize,
        start_offset: usize,
    ) -> Result<Vec<ServiceCall>> {
        if page_size == 0 {
            bail!("page size must be at least 1");
        }

        let mut calls = Vec::new();
        for page in 0..max_pages {
            let Some(offset) = page
                .checked_mul(page_size)
                .and_then(|skip| skip.checked_add(start_offset))
            else {
                bail!("offset overflows at page {page} (page size {page_size}, start {start_offset})");
            };
            let batch = self.fetch_service_calls(page_size, offset).await?;
            let fetched = batch.len();
            debug!(page, offset, fetched, "Fetched 311 page");
            calls.extend(batch);

            if fetched < page_size {
                break;
            }
        }

        info!(calls = calls.len(), "311 calls fetched");
        Ok(calls)
    }
}
