use async_trait::async_trait;
use rack_core::WordSource;
use rack_types::{Language, SourceError};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub const DATAMUSE_MAX_RESULTS: &str = "100";

#[derive(Debug, Deserialize)]
struct DatamuseWord {
    word: String,
}

#[derive(Debug, Deserialize)]
struct KategloResponse {
    #[serde(default)]
    results: Vec<KategloPhrase>,
}

#[derive(Debug, Deserialize)]
struct KategloPhrase {
    phrase: String,
}

/// `[{"word": "..."}, ...]`
pub fn parse_datamuse(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let words: Vec<DatamuseWord> = serde_json::from_str(body)?;
    Ok(words.into_iter().map(|w| w.word).collect())
}

/// `{"results": [{"phrase": "..."}, ...]}`; a missing `results` list means no matches
pub fn parse_kateglo(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let response: KategloResponse = serde_json::from_str(body)?;
    Ok(response.results.into_iter().map(|p| p.phrase).collect())
}

async fn fetch_body(
    client: &Client,
    source_name: &str,
    url: &str,
    query: &[(&str, &str)],
) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| SourceError::Transport {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            source_name: source_name.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| SourceError::Transport {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

/// English candidates from the Datamuse spelling endpoint
pub struct DatamuseSource {
    client: Client,
    url: String,
}

impl DatamuseSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl WordSource for DatamuseSource {
    fn name(&self) -> &str {
        "datamuse"
    }

    fn language(&self) -> Language {
        Language::English
    }

    async fn fetch_candidates(&self, letters: &[char]) -> Result<Vec<String>, SourceError> {
        let spelled: String = letters.iter().collect();
        debug!("Querying Datamuse for {}", spelled);
        let body = fetch_body(
            &self.client,
            self.name(),
            &self.url,
            &[("sp", spelled.as_str()), ("max", DATAMUSE_MAX_RESULTS)],
        )
        .await?;

        parse_datamuse(&body).map_err(|e| SourceError::Malformed {
            source_name: self.name().to_string(),
            message: e.to_string(),
        })
    }
}

/// Malay candidates from the Kateglo dictionary
pub struct KategloSource {
    client: Client,
    url: String,
}

impl KategloSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl WordSource for KategloSource {
    fn name(&self) -> &str {
        "kateglo"
    }

    fn language(&self) -> Language {
        Language::Malay
    }

    async fn fetch_candidates(&self, letters: &[char]) -> Result<Vec<String>, SourceError> {
        let phrase: String = letters.iter().collect();
        debug!("Querying Kateglo for {}", phrase);
        let body = fetch_body(
            &self.client,
            self.name(),
            &self.url,
            &[("format", "json"), ("phrase", phrase.as_str())],
        )
        .await?;

        parse_kateglo(&body).map_err(|e| SourceError::Malformed {
            source_name: self.name().to_string(),
            message: e.to_string(),
        })
    }
}
