//! Bearer-token HTTP client over the persistence API.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::types::{
    Account, ApiTransaction, Goal, LoginResponse, MonthlySummary, NewTransaction, User,
};

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `http://192.168.0.11:3000/api`.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("build http client")?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            http,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}")).context("token header")?,
            );
        }
        Ok(headers)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .http
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("GET {path} failed: {status} {txt}");
        }
        resp.json().await.with_context(|| format!("parse {path} response"))
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("POST {path} failed: {status} {txt}");
        }
        resp.json().await.with_context(|| format!("parse {path} response"))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        #[derive(serde::Serialize)]
        struct Req<'a> {
            email: &'a str,
            password: &'a str,
        }
        self.post_json("/auth/login", &Req { email, password }).await
    }

    /// Current user for the stored token. Some deployments wrap the
    /// payload in `user`, some return it bare.
    pub async fn me(&self) -> Result<User> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Payload {
            Wrapped { user: User },
            Bare(User),
        }
        Ok(match self.get_json("/auth/me").await? {
            Payload::Wrapped { user } => user,
            Payload::Bare(user) => user,
        })
    }

    /// Register one transaction. The backend echoes the stored record;
    /// callers here only care that the create succeeded.
    pub async fn create_transaction(&self, txn: &NewTransaction) -> Result<()> {
        let _: serde_json::Value = self.post_json("/transactions", txn).await?;
        Ok(())
    }

    pub async fn list_transactions(&self, limit: Option<u32>) -> Result<Vec<ApiTransaction>> {
        let path = match limit {
            Some(n) => format!("/transactions?limit={n}"),
            None => "/transactions".to_string(),
        };
        // The backend wraps the list in `transactions`; older deployments
        // returned a bare array.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Listing {
            Wrapped { transactions: Vec<ApiTransaction> },
            Bare(Vec<ApiTransaction>),
        }
        Ok(match self.get_json(&path).await? {
            Listing::Wrapped { transactions } => transactions,
            Listing::Bare(transactions) => transactions,
        })
    }

    pub async fn get_account(&self) -> Result<Account> {
        #[derive(Deserialize)]
        struct Envelope {
            account: Account,
        }
        let env: Envelope = self.get_json("/accounts").await?;
        Ok(env.account)
    }

    pub async fn get_summary(&self) -> Result<MonthlySummary> {
        #[derive(Deserialize)]
        struct Envelope {
            summary: MonthlySummary,
        }
        let env: Envelope = self.get_json("/accounts/summary").await?;
        Ok(env.summary)
    }

    pub async fn list_goals(&self) -> Result<Vec<Goal>> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Listing {
            Wrapped { goals: Vec<Goal> },
            Bare(Vec<Goal>),
        }
        Ok(match self.get_json("/goals").await? {
            Listing::Wrapped { goals } => goals,
            Listing::Bare(goals) => goals,
        })
    }
}
