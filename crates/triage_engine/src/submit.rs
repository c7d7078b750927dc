use std::sync::mpsc;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use triage_logging::{triage_debug, triage_warn};

use crate::decode::decode_response;
use crate::{AnalysisResponse, EngineEvent, FailureKind, SubmitError, SubmitRequest, UploadFile};

/// Form field carrying the e-mail text.
pub const TEXT_FIELD: &str = "text";
/// Form field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    /// Full URL of the analysis endpoint.
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_upload_bytes: u64,
    pub max_response_bytes: u64,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/analisar".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_upload_bytes: 10 * 1024 * 1024,
            max_response_bytes: 1024 * 1024,
        }
    }
}

/// Receives engine events as requests settle.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Transport seam: sends one request and reports its outcome.
#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, request: &SubmitRequest) -> Result<AnalysisResponse, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: SubmitSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SubmitSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, SubmitError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))
    }

    async fn build_form(&self, request: &SubmitRequest) -> Result<Form, SubmitError> {
        let form = Form::new().text(TEXT_FIELD, request.text.clone());
        match &request.file {
            Some(file) => {
                let part = self.read_upload(file).await?;
                Ok(form.part(FILE_FIELD, part))
            }
            None => Ok(form),
        }
    }

    async fn read_upload(&self, file: &UploadFile) -> Result<Part, SubmitError> {
        let unreadable =
            |err: std::io::Error| SubmitError::new(FailureKind::UploadUnreadable, err.to_string());

        let metadata = tokio::fs::metadata(&file.path).await.map_err(unreadable)?;
        if metadata.len() > self.settings.max_upload_bytes {
            return Err(SubmitError::new(
                FailureKind::UploadTooLarge {
                    max_bytes: self.settings.max_upload_bytes,
                    actual: metadata.len(),
                },
                format!("{} is too large to upload", file.name),
            ));
        }

        let bytes = tokio::fs::read(&file.path).await.map_err(unreadable)?;
        triage_debug!("Read upload {} ({} bytes)", file.name, bytes.len());
        Ok(Part::bytes(bytes).file_name(file.name.clone()))
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(&self, request: &SubmitRequest) -> Result<AnalysisResponse, SubmitError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| SubmitError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let client = self.build_client()?;
        let form = self.build_form(request).await?;

        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_response_bytes {
                return Err(SubmitError::new(
                    FailureKind::ResponseTooLarge {
                        max_bytes: self.settings.max_response_bytes,
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > self.settings.max_response_bytes {
                return Err(SubmitError::new(
                    FailureKind::ResponseTooLarge {
                        max_bytes: self.settings.max_response_bytes,
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        if !status.is_success() {
            triage_warn!("Analysis endpoint answered {}", status);
        }
        decode_response(status.as_u16(), &body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(FailureKind::Timeout, err.to_string());
    }
    SubmitError::new(FailureKind::Network, err.to_string())
}
