//! Thin HTTP client over the endpoints `vectorlite-api` exposes.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub struct VectorliteClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ListDatabasesResponse {
    pub databases: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EntryJson {
    pub id: u64,
    pub vector: Vec<f64>,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct ListEntriesResponse {
    pub entries: Vec<EntryJson>,
}

#[derive(Debug, Serialize)]
struct CreateDatabaseRequest<'a> {
    name: &'a str,
    algorithm: &'a str,
}

#[derive(Debug, Serialize)]
struct AddEntriesRequest<'a> {
    database: &'a str,
    vectors: &'a [Vec<f64>],
    metadatas: &'a [HashMap<String, String>],
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    database: &'a str,
    vector: &'a [f64],
    k: usize,
    metric: &'a str,
}

impl VectorliteClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// A lightweight reachability check used by the `status` command.
    pub async fn ping(&self) -> Result<reqwest::StatusCode> {
        let response = self
            .http
            .get(format!("{}/databases", self.base_url))
            .send()
            .await
            .context("connecting to server")?;
        Ok(response.status())
    }

    pub async fn create_database(&self, name: &str, algorithm: &str) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/databases", self.base_url))
            .json(&CreateDatabaseRequest { name, algorithm })
            .send()
            .await
            .context("creating database")?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn list_databases(&self) -> Result<Vec<String>> {
        let response = self
            .http
            .get(format!("{}/databases", self.base_url))
            .send()
            .await
            .context("listing databases")?;
        let body = Self::check(response).await?;
        Ok(body.json::<ListDatabasesResponse>().await?.databases)
    }

    pub async fn add_entries(
        &self,
        database: &str,
        vectors: &[Vec<f64>],
        metadatas: &[HashMap<String, String>],
    ) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/entries", self.base_url))
            .json(&AddEntriesRequest {
                database,
                vectors,
                metadatas,
            })
            .send()
            .await
            .context("adding entries")?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn list_entries(&self, database: &str) -> Result<Vec<EntryJson>> {
        let response = self
            .http
            .get(format!("{}/entries", self.base_url))
            .query(&[("database", database)])
            .send()
            .await
            .context("listing entries")?;
        let body = Self::check(response).await?;
        Ok(body.json::<ListEntriesResponse>().await?.entries)
    }

    pub async fn query(
        &self,
        database: &str,
        vector: &[f64],
        k: usize,
        metric: &str,
    ) -> Result<Vec<EntryJson>> {
        let response = self
            .http
            .post(format!("{}/query", self.base_url))
            .json(&QueryRequest {
                database,
                vector,
                k,
                metric,
            })
            .send()
            .await
            .context("querying")?;
        let body = Self::check(response).await?;
        Ok(body.json::<ListEntriesResponse>().await?.entries)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("server error: {status} - {body}")
        }
    }
}
