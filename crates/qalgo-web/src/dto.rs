//! Request and response bodies.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use qalgo_algorithms::{Algorithm, AlgorithmInfo, AlgorithmOutcome, RunParams};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status (always "ok" if responding).
    pub status: String,
    /// Service version.
    pub version: String,
    /// Demos in the catalog.
    pub algorithms: usize,
    /// Stored opinions, absent when the store did not answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opinions: Option<u64>,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            algorithms: 0,
            opinions: None,
        }
    }
}

/// Catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmSummary {
    /// URL slug.
    pub slug: &'static str,
    /// Display title.
    pub title: &'static str,
    /// One-sentence summary.
    pub summary: &'static str,
}

impl From<Algorithm> for AlgorithmSummary {
    fn from(algorithm: Algorithm) -> Self {
        let info = algorithm.info();
        Self {
            slug: info.slug,
            title: info.title,
            summary: info.summary,
        }
    }
}

/// What a visitor asked the algorithm page for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAction {
    /// Talking points.
    Presentation,
    /// Questions to work through.
    Exercises,
    /// Run the demo.
    Run,
}

/// Body of `POST /algorithms/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageRequest {
    /// Requested action.
    pub action: PageAction,
    /// Overrides for the run action.
    #[serde(default)]
    pub params: RunParams,
}

/// Answer to a page action.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PageResponse {
    /// Talking points for the demo.
    Presentation {
        /// Demo slug.
        algorithm: &'static str,
        /// Notes in order.
        items: Vec<&'static str>,
    },
    /// Exercises for the demo.
    Exercises {
        /// Demo slug.
        algorithm: &'static str,
        /// Questions in order.
        items: Vec<&'static str>,
    },
    /// A finished run.
    Run {
        /// Driver output.
        outcome: Box<AlgorithmOutcome>,
    },
}

impl PageResponse {
    /// Static answer for the presentation and exercises actions.
    pub fn from_info(action: PageAction, info: AlgorithmInfo) -> Option<Self> {
        match action {
            PageAction::Presentation => Some(Self::Presentation {
                algorithm: info.slug,
                items: info.presentation,
            }),
            PageAction::Exercises => Some(Self::Exercises {
                algorithm: info.slug,
                items: info.exercises,
            }),
            PageAction::Run => None,
        }
    }
}

/// Query of `GET /opinions`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentParams {
    /// Maximum number of opinions returned.
    #[serde(default = "default_recent_limit")]
    pub limit: usize,
}

fn default_recent_limit() -> usize {
    20
}

/// Body extractor accepting JSON or an urlencoded form.
///
/// The form decoder handles flat bodies only; nested fields must be sent as
/// JSON.
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(value))
        }
    }
}
