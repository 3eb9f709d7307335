//! RxNorm lookup gateway
//!
//! Retrying client over the RxNav REST protocol. Resolves NDC codes to
//! RxCUIs and fetches concept, drug, interaction, and drug-class detail.
//!
//! Responses are modeled as untyped `serde_json::Value` trees walked with
//! tolerant accessors; a missing key at any nesting level means "no data",
//! never an error. Only transport-level failures (connect, timeout, non-2xx)
//! are errors, and only after the retry budget is exhausted.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use rxlink_common::EngineConfig;

use crate::models::{DrugClass, DrugInteraction, RxNormConcept, RxNormDrug, RxNormIngredient};

const USER_AGENT: &str = concat!("rxlink/", env!("CARGO_PKG_VERSION"));

/// Term types eligible as a drug-level identity
const DRUG_NAME_TTYS: [&str; 3] = ["BN", "PIN", "IN"];

/// Classification term types surfaced as drug classes
const DRUG_CLASS_TTYS: [&str; 10] =
    ["VA", "VB", "VC", "VD", "VE", "VF", "VG", "VH", "VI", "VJ"];

/// Gateway errors
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Terminal transport failure: the retry budget for one logical call is
    /// exhausted. Callers do not retry this; it fails that one lookup only.
    #[error("RxNorm request to '{endpoint}' failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        endpoint: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },
}

/// Normalize an NDC code: strip hyphens and whitespace, pad a 10-digit code
/// to 11 with a leading zero. Any other length passes through unchanged.
pub fn normalize_ndc(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();
    if digits.len() == 10 {
        format!("0{}", digits)
    } else {
        digits
    }
}

/// RxNorm API client
///
/// Explicitly constructed and shared by `Arc`; there is no process-wide
/// instance. The inner `reqwest::Client` connection pool is safe for
/// concurrent use across all batch workers.
pub struct RxNormClient {
    http: reqwest::Client,
    base_url: String,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl RxNormClient {
    pub fn new(config: &EngineConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| LookupError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.rxnorm_base_url.trim_end_matches('/').to_string(),
            retry_attempts: config.retry_attempts.max(1),
            retry_delay: config.retry_delay(),
        })
    }

    /// Issue one logical request with retry
    ///
    /// Retries transport failures (connect, timeout, non-2xx) with a delay
    /// growing linearly in the attempt number. A 2xx body that is not valid
    /// JSON degrades to `Value::Null` so callers see "no data".
    async fn request(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, LookupError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut attempt: u32 = 1;

        loop {
            tracing::debug!(endpoint, attempt, "RxNorm request");
            let result = self
                .http
                .get(&url)
                .query(params)
                .send()
                .await
                .and_then(|response| response.error_for_status());

            match result {
                Ok(response) => {
                    return Ok(response.json::<Value>().await.unwrap_or_else(|e| {
                        tracing::warn!(
                            endpoint,
                            error = %e,
                            "Response body is not valid JSON, treating as no data"
                        );
                        Value::Null
                    }));
                }
                Err(e) => {
                    tracing::warn!(endpoint, attempt, error = %e, "RxNorm request failed");
                    if attempt >= self.retry_attempts {
                        return Err(LookupError::RetriesExhausted {
                            endpoint: endpoint.to_string(),
                            attempts: self.retry_attempts,
                            source: e,
                        });
                    }
                    tokio::time::sleep(self.retry_delay * attempt).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Resolve the RxCUI the service associates with an active NDC
    ///
    /// Primary path: the `ndcstatus` endpoint with an "Active" status.
    /// Secondary path: the status payload may still carry the active
    /// ingredient name; resolve that through a name search instead. Both
    /// paths may return `None`; `None` is not an error.
    pub async fn find_rxcui_by_ndc(&self, ndc: &str) -> Result<Option<String>, LookupError> {
        let ndc = normalize_ndc(ndc);
        let data = self.request("ndcstatus", &[("ndc", ndc.as_str())]).await?;

        let status = &data["ndcStatus"];
        if text(status, "status").as_deref() == Some("Active") {
            if let Some(rxcui) = text(status, "rxcui") {
                return Ok(Some(rxcui));
            }
        }

        match text(status, "ingredient") {
            Some(ingredient) => {
                tracing::debug!(ndc = %ndc, ingredient = %ingredient, "Falling back to ingredient search");
                self.find_rxcui_by_name(&ingredient).await
            }
            None => Ok(None),
        }
    }

    /// First RxCUI in the first non-empty concept group of a name search
    async fn find_rxcui_by_name(&self, name: &str) -> Result<Option<String>, LookupError> {
        let data = self.request("drugs", &[("name", name)]).await?;

        for group in items(&data["drugGroup"], "conceptGroup") {
            if let Some(concept) = items(group, "concept").first() {
                return Ok(text(concept, "rxcui"));
            }
        }
        Ok(None)
    }

    /// Canonical concept record for an RxCUI
    ///
    /// Queries the all-sources view and takes the first concept entry of the
    /// first non-empty concept group; `None` when the service reports no
    /// related groups.
    pub async fn get_concept(&self, rxcui: &str) -> Result<Option<RxNormConcept>, LookupError> {
        let data = self.request_all_sources(rxcui).await?;

        for group in items(&data["relatedGroup"], "conceptGroup") {
            if let Some(concept) = items(group, "concept").first() {
                return Ok(Some(RxNormConcept {
                    rxcui: rxcui.to_string(),
                    name: text_or(concept, "name", ""),
                    synonym: text(concept, "synonym"),
                    tty: text_or(concept, "tty", ""),
                    language: text_or(concept, "language", "ENG"),
                    suppress: text_or(concept, "suppress", "N"),
                    umlscui: text(concept, "umlscui"),
                }));
            }
        }
        Ok(None)
    }

    /// Drug-level record for an RxCUI with its ingredients
    ///
    /// Walks every related concept group (RxNav returns one group per term
    /// type), classifying each group's first entry. Tags BN/PIN/IN are
    /// eligible as the drug's own identity, last eligible wins; IN entries
    /// also become child ingredients. `None` when no eligible entry exists.
    pub async fn get_drug(&self, rxcui: &str) -> Result<Option<RxNormDrug>, LookupError> {
        let data = self.request_all_sources(rxcui).await?;

        let mut identity: Option<(String, Option<String>, String, Vec<String>)> = None;
        let mut ingredients = Vec::new();

        for group in items(&data["relatedGroup"], "conceptGroup") {
            let Some(concept) = items(group, "concept").first() else {
                continue;
            };
            let tty = text_or(concept, "tty", "");

            if DRUG_NAME_TTYS.contains(&tty.as_str()) {
                identity = Some((
                    text_or(concept, "name", ""),
                    text(concept, "synonym"),
                    tty.clone(),
                    base_names(concept),
                ));
            }
            if tty == "IN" {
                ingredients.push(RxNormIngredient {
                    rxcui: text_or(concept, "rxcui", ""),
                    name: text_or(concept, "name", ""),
                    base_names: base_names(concept),
                });
            }
        }

        Ok(identity.map(|(name, synonym, tty, base_names)| RxNormDrug {
            rxcui: rxcui.to_string(),
            name,
            synonym,
            tty,
            base_names,
            ingredients,
        }))
    }

    /// Flattened interaction pairs for an RxCUI; empty when none reported
    pub async fn get_drug_interactions(
        &self,
        rxcui: &str,
    ) -> Result<Vec<DrugInteraction>, LookupError> {
        let data = self.request("interaction", &[("rxcui", rxcui)]).await?;

        let mut interactions = Vec::new();
        for group in items(&data, "interactionTypeGroup") {
            for interaction_type in items(group, "interactionType") {
                let comment = text(interaction_type, "comment");
                for pair in items(interaction_type, "interactionPair") {
                    let drug_rxcuis = items(pair, "interactionConcept")
                        .iter()
                        .filter_map(|c| text(&c["minConceptItem"], "rxcui"))
                        .collect();
                    interactions.push(DrugInteraction {
                        severity: text(pair, "severity"),
                        description: text(pair, "description"),
                        comment: comment.clone(),
                        drug_rxcuis,
                    });
                }
            }
        }
        Ok(interactions)
    }

    /// Drug classifications for an RxCUI, filtered to the VA..VJ tags
    pub async fn get_drug_classes(&self, rxcui: &str) -> Result<Vec<DrugClass>, LookupError> {
        let data = self.request_all_sources(rxcui).await?;

        let mut classes = Vec::new();
        for group in items(&data["relatedGroup"], "conceptGroup") {
            for concept in items(group, "concept") {
                let tty = text_or(concept, "tty", "");
                if DRUG_CLASS_TTYS.contains(&tty.as_str()) {
                    classes.push(DrugClass {
                        class_type: tty,
                        class_name: text_or(concept, "name", ""),
                        class_id: text_or(concept, "rxcui", ""),
                    });
                }
            }
        }
        Ok(classes)
    }

    /// Search drugs by name, fetching full drug detail for each hit
    pub async fn search_drugs(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<RxNormDrug>, LookupError> {
        let data = self.request("drugs", &[("name", query)]).await?;

        let mut drugs = Vec::new();
        'groups: for group in items(&data["drugGroup"], "conceptGroup") {
            for concept in items(group, "concept").iter().take(max_results) {
                let Some(rxcui) = text(concept, "rxcui") else {
                    continue;
                };
                if let Some(drug) = self.get_drug(&rxcui).await? {
                    drugs.push(drug);
                    if drugs.len() >= max_results {
                        break 'groups;
                    }
                }
            }
        }
        Ok(drugs)
    }

    async fn request_all_sources(&self, rxcui: &str) -> Result<Value, LookupError> {
        self.request("rxcui", &[("rxcui", rxcui), ("allsrc", "1")])
            .await
    }
}

// Tolerant accessors over the untyped response tree. Indexing a Value that
// is not an object yields Null, so a missing key at any level reads as
// "no data" rather than a panic or an error.

/// Array member under `key`, or an empty slice
fn items<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// String member under `key`
fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// String member under `key`, or `default`
fn text_or(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// `baseNames.baseName` list of a concept entry
fn base_names(concept: &Value) -> Vec<String> {
    items(&concept["baseNames"], "baseName")
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}
