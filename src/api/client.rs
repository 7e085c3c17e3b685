use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::endpoints::Endpoints;
use crate::models::{
    AuthResponse, DailyEnergyResponse, EnergyCostTotals, LiveReading, Machine, MachineState,
    ProductionGraph, ShiftEnergy,
};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Typed client for the plant backend. Cheap to clone; the session token is
/// shared between clones so a login on one handle authenticates them all.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    token: Arc<RwLock<Option<String>>>,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http,
            endpoints: Endpoints::new(base_url),
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap() = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write().unwrap() = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut request = self.http.get(url);
        if let Some(token) = self.token() {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("backend rejected {url}"))?;
        response
            .json()
            .await
            .with_context(|| format!("failed to decode response from {url}"))
    }

    pub async fn machines(&self) -> Result<Vec<Machine>> {
        self.get_json(&self.endpoints.machines()).await
    }

    pub async fn all_machine_states(&self) -> Result<Vec<MachineState>> {
        self.get_json(&self.endpoints.all_machine_states()).await
    }

    pub async fn live_recent(&self, machine_id: i64) -> Result<LiveReading> {
        self.get_json(&self.endpoints.live_recent(machine_id)).await
    }

    /// Status intervals for one machine on one day.
    pub async fn production_graph(
        &self,
        machine_id: i64,
        date: NaiveDate,
    ) -> Result<ProductionGraph> {
        self.get_json(&self.endpoints.production_graph(machine_id, date))
            .await
    }

    /// Status intervals for the whole workshop on one day.
    pub async fn graph_data(&self, date: NaiveDate) -> Result<ProductionGraph> {
        self.get_json(&self.endpoints.graph_data(date)).await
    }

    pub async fn shift_live_history(&self, date: NaiveDate) -> Result<Vec<ShiftEnergy>> {
        self.get_json(&self.endpoints.shift_live_history(date)).await
    }

    pub async fn total_energy_costs(&self, date: NaiveDate) -> Result<EnergyCostTotals> {
        self.get_json(&self.endpoints.total_energy_costs(date)).await
    }

    pub async fn daily_energy_consumption(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<crate::models::DailyEnergy>> {
        let response: DailyEnergyResponse = self
            .get_json(&self.endpoints.daily_energy_consumption(date))
            .await?;
        Ok(response.daily_energy_consumption)
    }

    /// Authenticate and remember the session token for subsequent requests.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let url = self.endpoints.auth();
        let response = self
            .http
            .post(&url)
            .json(&Credentials { username, password })
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .context("authentication rejected")?;
        let auth: AuthResponse = response
            .json()
            .await
            .context("failed to decode auth response")?;
        self.set_token(auth.token.clone());
        Ok(auth)
    }

    pub fn logout(&self) {
        self.clear_token();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_shared_between_clones() {
        let client = BackendClient::new("http://backend.local").unwrap();
        let clone = client.clone();
        assert_eq!(clone.token(), None);

        client.set_token("abc123");
        assert_eq!(clone.token().as_deref(), Some("abc123"));

        clone.logout();
        assert_eq!(client.token(), None);
    }
}
