use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{
    ChatTurn, LessonChatRequest, LessonChatResponse, LessonCreateRequest, LessonCreateResponse,
    Message, TotalPlan, UserProfile, WeeklyPlanDay, WeeklyPlanRequest,
};
use crate::wizard::AssessmentTransport;

pub type ClientResult<T> = Result<T, ClientError>;

/// HTTP client for the tutoring backend. All six operations post JSON and
/// decode the response body directly.
#[derive(Clone)]
pub struct TutorApiClient {
    inner: reqwest::Client,
    config: Arc<AppConfig>,
    base_url: String,
}

impl TutorApiClient {
    pub fn new(config: AppConfig) -> ClientResult<Self> {
        let timeout = config.request_timeout;
        let base_url = normalize_base_url(&config.api_base_url);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            inner: client,
            config: Arc::new(config),
            base_url,
        })
    }

    pub async fn initial_chat(&self, messages: &[Message]) -> ClientResult<ChatTurn> {
        self.post_json("assessment/initial-chat", messages).await
    }

    pub async fn analyze_profile(&self, messages: &[Message]) -> ClientResult<UserProfile> {
        self.post_json("assessment/analyze-profile", messages).await
    }

    pub async fn generate_total_plan(&self, profile: &UserProfile) -> ClientResult<TotalPlan> {
        self.post_json("assessment/generate-total-plan", profile)
            .await
    }

    pub async fn generate_weekly_plan(
        &self,
        request: &WeeklyPlanRequest,
    ) -> ClientResult<Vec<WeeklyPlanDay>> {
        self.post_json("assessment/generate-weekly-plan", request)
            .await
    }

    pub async fn create_lesson(
        &self,
        request: &LessonCreateRequest,
    ) -> ClientResult<LessonCreateResponse> {
        self.post_json("lesson/create", request).await
    }

    pub async fn lesson_chat(
        &self,
        request: &LessonChatRequest,
    ) -> ClientResult<LessonChatResponse> {
        self.post_json("lesson/chat", request).await
    }

    async fn post_json<TReq, TRes>(&self, path: &str, payload: &TReq) -> ClientResult<TRes>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(payload);
        self.send(builder).await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.join_path(path);
        let mut builder = self.inner.request(method, url);

        if let Some(token) = self.config.bearer_token() {
            builder = builder.header(header::AUTHORIZATION, token);
        }

        builder
    }

    fn join_path(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T>(&self, builder: reqwest::RequestBuilder) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await.map_err(ClientError::from)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::from)?;

        if !status.is_success() {
            if let Ok(body) = serde_json::from_slice::<ApiErrorBody>(&bytes) {
                return Err(ClientError::Api {
                    status,
                    detail: body.detail,
                });
            }
            return Err(ClientError::UnexpectedStatus {
                status,
                body: bytes.to_vec(),
            });
        }

        if bytes.is_empty() {
            return Err(ClientError::EmptyResponse(status));
        }

        serde_json::from_slice(&bytes).map_err(ClientError::from)
    }
}

#[async_trait(?Send)]
impl AssessmentTransport for TutorApiClient {
    async fn initial_chat(&self, messages: &[Message]) -> ClientResult<ChatTurn> {
        TutorApiClient::initial_chat(self, messages).await
    }

    async fn analyze_profile(&self, messages: &[Message]) -> ClientResult<UserProfile> {
        TutorApiClient::analyze_profile(self, messages).await
    }

    async fn generate_total_plan(&self, profile: &UserProfile) -> ClientResult<TotalPlan> {
        TutorApiClient::generate_total_plan(self, profile).await
    }

    async fn generate_weekly_plan(
        &self,
        request: &WeeklyPlanRequest,
    ) -> ClientResult<Vec<WeeklyPlanDay>> {
        TutorApiClient::generate_weekly_plan(self, request).await
    }
}

fn normalize_base_url(input: &str) -> String {
    input.trim_end_matches('/').to_string()
}

/// Error body shape the backend produces for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: String,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("api error ({status}): {detail}")]
    Api { status: StatusCode, detail: String },
    #[error("empty response body: {0}")]
    EmptyResponse(StatusCode),
    #[error("unexpected status {status}: {body:?}")]
    UnexpectedStatus { status: StatusCode, body: Vec<u8> },
    #[error("client configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::EmptyResponse(status) => Some(*status),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
