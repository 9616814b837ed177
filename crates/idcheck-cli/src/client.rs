//! HTTP client for the face-match and OCR services.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::debug;

use idcheck_core::capture::CapturedImage;
use idcheck_core::error::VerificationError;
use idcheck_core::models::config::ServiceConfig;
use idcheck_core::models::identity::{FaceMatchResponse, OcrResponse};
use idcheck_core::verify::{FaceMatcher, TextExtractor};

const FACE_SERVICE: &str = "face-match";
const OCR_SERVICE: &str = "ocr";

/// Both services behind one reqwest client.
pub struct HttpServices {
    client: reqwest::Client,
    face_match_url: String,
    ocr_url: String,
}

impl HttpServices {
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            face_match_url: config.face_match_url(),
            ocr_url: config.ocr_url(),
        })
    }

    async fn post_form<R>(&self, service: &'static str, url: &str, form: Form) -> Result<R, VerificationError>
    where
        R: DeserializeOwned,
    {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| VerificationError::service(service, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VerificationError::service(
                service,
                format!("HTTP {}: {}", status, body.trim()),
            ));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| VerificationError::service(service, format!("invalid response: {}", e)))
    }
}

fn image_part(service: &'static str, image: &CapturedImage) -> Result<Part, VerificationError> {
    Part::bytes(image.bytes().to_vec())
        .file_name(image.file_name().to_string())
        .mime_str(image.mime())
        .map_err(|e| VerificationError::service(service, e.to_string()))
}

impl FaceMatcher for HttpServices {
    async fn compare_faces(
        &self,
        id_image: &CapturedImage,
        selfie: &CapturedImage,
    ) -> Result<FaceMatchResponse, VerificationError> {
        let form = Form::new()
            .part("image1", image_part(FACE_SERVICE, id_image)?)
            .part("image2", image_part(FACE_SERVICE, selfie)?);

        self.post_form(FACE_SERVICE, &self.face_match_url, form).await
    }
}

impl TextExtractor for HttpServices {
    async fn extract_text(&self, id_image: &CapturedImage) -> Result<OcrResponse, VerificationError> {
        let form = Form::new().part("image", image_part(OCR_SERVICE, id_image)?);

        self.post_form(OCR_SERVICE, &self.ocr_url, form).await
    }
}
