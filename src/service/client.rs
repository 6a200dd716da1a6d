// src/service/client.rs

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::AppError;
use crate::models::announcement::Announcement;
use crate::models::exam::Exam;
use crate::models::submission::{Submission, SubmissionAnswer};
use crate::service::rows::{RawAnnouncementRow, RawAnswerRow, RawExamRow, RawSubmissionRow};

/// Read-only contract against the hosted data service.
///
/// Implementations return normalized entities; raw row handling stays
/// behind this seam. Every call is an independent, idempotent fetch;
/// re-fetching never mutates remote state.
#[async_trait]
pub trait DataService: Send + Sync {
    async fn fetch_exams(&self, grade_level: i64) -> Result<Vec<Exam>, AppError>;

    async fn fetch_exam(&self, exam_id: &str) -> Result<Exam, AppError>;

    async fn fetch_submissions(
        &self,
        student_id: &str,
        exam_id: &str,
    ) -> Result<Vec<Submission>, AppError>;

    async fn fetch_submission_answers(
        &self,
        submission_id: &str,
    ) -> Result<Vec<SubmissionAnswer>, AppError>;

    async fn fetch_announcements(&self) -> Result<Vec<Announcement>, AppError>;
}

/// `DataService` implementation over the hosted service's REST rows
/// endpoints.
pub struct HostedClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl HostedClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.service_url)?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: config.service_api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.base_url.join(path).map_err(AppError::from)
    }

    /// Issues one GET and decodes the JSON body.
    ///
    /// Transport failures and non-2xx statuses become retryable
    /// `ServiceError`s; an undecodable body is `BadData` since
    /// retrying won't fix it.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        let response = self
            .http
            .get(url.clone())
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request to {} failed: {:?}", url, e);
                AppError::ServiceError(e.to_string())
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("{} returned 404", url)));
        }

        if !response.status().is_success() {
            return Err(AppError::ServiceError(format!(
                "Service returned {} for {}",
                response.status(),
                url
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::BadData(e.to_string()))
    }
}

#[async_trait]
impl DataService for HostedClient {
    async fn fetch_exams(&self, grade_level: i64) -> Result<Vec<Exam>, AppError> {
        let mut url = self.endpoint("exams")?;
        url.query_pairs_mut()
            .append_pair("grade_level", &grade_level.to_string());

        let rows: Vec<RawExamRow> = self.get_json(url).await?;
        rows.into_iter().map(Exam::try_from).collect()
    }

    async fn fetch_exam(&self, exam_id: &str) -> Result<Exam, AppError> {
        let url = self.endpoint(&format!("exams/{}", exam_id))?;

        let row: RawExamRow = self.get_json(url).await?;
        Exam::try_from(row)
    }

    async fn fetch_submissions(
        &self,
        student_id: &str,
        exam_id: &str,
    ) -> Result<Vec<Submission>, AppError> {
        let mut url = self.endpoint("submissions")?;
        url.query_pairs_mut()
            .append_pair("student_id", student_id)
            .append_pair("exam_id", exam_id);

        let rows: Vec<RawSubmissionRow> = self.get_json(url).await?;
        rows.into_iter().map(Submission::try_from).collect()
    }

    async fn fetch_submission_answers(
        &self,
        submission_id: &str,
    ) -> Result<Vec<SubmissionAnswer>, AppError> {
        let url = self.endpoint(&format!("submissions/{}/answers", submission_id))?;

        let rows: Vec<RawAnswerRow> = self.get_json(url).await?;
        Ok(rows.into_iter().map(SubmissionAnswer::from).collect())
    }

    async fn fetch_announcements(&self) -> Result<Vec<Announcement>, AppError> {
        let url = self.endpoint("announcements")?;

        let rows: Vec<RawAnnouncementRow> = self.get_json(url).await?;
        rows.into_iter().map(Announcement::try_from).collect()
    }
}
