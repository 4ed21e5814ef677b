//! Sample I/O retrieval from Baekjoon Online Judge

use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;

use crate::{
    config::BojConfig,
    constants::USER_AGENT,
    error::{AppError, AppResult},
    models::SampleCase,
    utils::unescape,
};

/// Source of sample cases for a problem
#[async_trait]
pub trait SampleProvider: Send + Sync {
    async fn fetch(&self, problem_id: u32) -> AppResult<Vec<SampleCase>>;
}

/// HTTP client for problem pages
#[derive(Debug, Clone)]
pub struct BojClient {
    client: reqwest::Client,
    base_url: String,
}

impl BojClient {
    pub fn new(config: &BojConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn problem_url(&self, problem_id: u32) -> String {
        format!("{}/problem/{}", self.base_url, problem_id)
    }
}

#[async_trait]
impl SampleProvider for BojClient {
    async fn fetch(&self, problem_id: u32) -> AppResult<Vec<SampleCase>> {
        let url = self.problem_url(problem_id);
        tracing::debug!(%url, "Fetching problem page");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::SampleFetch(format!(
                "{} returned {}",
                url, status
            )));
        }

        let body = response.text().await?;
        let samples = parse_samples(&body);
        tracing::info!(problem_id, count = samples.len(), "Samples fetched");

        Ok(samples)
    }
}

static SAMPLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre\b[^>]*\bid\s*=\s*["']sample-(input|output)-(\d+)["'][^>]*>(.*?)</pre>"#)
        .expect("sample block pattern is valid")
});

/// Extract sample cases from a problem page.
///
/// Inputs and outputs are each ordered by their numeric suffix and paired
/// positionally; an entry without a partner is dropped.
pub fn parse_samples(html: &str) -> Vec<SampleCase> {
    let mut inputs = BTreeMap::new();
    let mut outputs = BTreeMap::new();

    for caps in SAMPLE_BLOCK.captures_iter(html) {
        let Ok(number) = caps[2].parse::<u64>() else {
            continue;
        };
        let body = unescape(&caps[3]);
        match &caps[1] {
            "input" => inputs.insert(number, body),
            _ => outputs.insert(number, body),
        };
    }

    inputs
        .into_values()
        .zip(outputs.into_values())
        .map(|(input, output)| SampleCase::new(input, output))
        .collect()
}
