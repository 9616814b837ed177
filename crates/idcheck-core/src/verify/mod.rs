//! Verification flow: face match, then OCR, then field extraction.
//!
//! The services are reached only through [`FaceMatcher`] and
//! [`TextExtractor`]; the flow itself does no I/O.

use std::future::Future;

use tracing::{info, warn};

use crate::capture::{CapturedImage, ImageRole};
use crate::error::VerificationError;
use crate::identity::{IdentityExtractor, IdentityParser};
use crate::models::identity::{FaceMatchResponse, IdentityRecord, OcrResponse};
use crate::models::wizard::WizardStep;

/// Result type for verification operations.
pub type Result<T> = std::result::Result<T, VerificationError>;

/// Compares the face on the ID with the selfie.
pub trait FaceMatcher {
    fn compare_faces(
        &self,
        id_image: &CapturedImage,
        selfie: &CapturedImage,
    ) -> impl Future<Output = Result<FaceMatchResponse>> + Send;
}

/// Reads the text printed on an ID image.
pub trait TextExtractor {
    fn extract_text(
        &self,
        id_image: &CapturedImage,
    ) -> impl Future<Output = Result<OcrResponse>> + Send;
}

impl<M: FaceMatcher> FaceMatcher for &M {
    fn compare_faces(
        &self,
        id_image: &CapturedImage,
        selfie: &CapturedImage,
    ) -> impl Future<Output = Result<FaceMatchResponse>> + Send {
        (**self).compare_faces(id_image, selfie)
    }
}

impl<E: TextExtractor> TextExtractor for &E {
    fn extract_text(
        &self,
        id_image: &CapturedImage,
    ) -> impl Future<Output = Result<OcrResponse>> + Send {
        (**self).extract_text(id_image)
    }
}

/// The three pictures of one attempt.
#[derive(Debug, Clone)]
pub struct VerificationAttempt {
    pub front: CapturedImage,
    pub back: CapturedImage,
    pub selfie: CapturedImage,
}

impl VerificationAttempt {
    /// Bundle captures, renaming each to its upload file name.
    pub fn new(front: CapturedImage, back: CapturedImage, selfie: CapturedImage) -> Self {
        Self {
            front: front.with_file_name(ImageRole::Front.upload_name()),
            back: back.with_file_name(ImageRole::Back.upload_name()),
            selfie: selfie.with_file_name(ImageRole::Selfie.upload_name()),
        }
    }

    pub fn image(&self, role: ImageRole) -> &CapturedImage {
        match role {
            ImageRole::Front => &self.front,
            ImageRole::Back => &self.back,
            ImageRole::Selfie => &self.selfie,
        }
    }
}

/// Runs one attempt through the services and the identity parser.
pub struct Verifier<F, T> {
    face_matcher: F,
    text_extractor: T,
    parser: IdentityParser,
}

impl<F, T> Verifier<F, T>
where
    F: FaceMatcher,
    T: TextExtractor,
{
    pub fn new(face_matcher: F, text_extractor: T) -> Self {
        Self {
            face_matcher,
            text_extractor,
            parser: IdentityParser::new(),
        }
    }

    /// Use a configured parser instead of the default one.
    pub fn with_parser(mut self, parser: IdentityParser) -> Self {
        self.parser = parser;
        self
    }

    /// Verify an attempt, reporting the wizard step as each stage starts.
    ///
    /// Stages run strictly in order and the first failure ends the attempt.
    /// The back image is carried by the attempt but not submitted.
    pub async fn verify_with_progress<P>(
        &self,
        attempt: &VerificationAttempt,
        mut on_step: P,
    ) -> Result<IdentityRecord>
    where
        P: FnMut(WizardStep, &str),
    {
        on_step(WizardStep::Verify, "Comparing faces...");
        let faces = self
            .face_matcher
            .compare_faces(&attempt.front, &attempt.selfie)
            .await?;
        if !faces.is_confirmed() {
            warn!(success = faces.success, matched = faces.is_match, "face comparison rejected");
            return Err(VerificationError::FaceMismatch);
        }

        on_step(WizardStep::Verify, "Extracting text...");
        let ocr = self.text_extractor.extract_text(&attempt.front).await?;
        if !ocr.success {
            warn!("text extraction reported failure");
            return Err(VerificationError::TextExtractionFailed);
        }

        on_step(WizardStep::Verify, "Reading fields...");
        let outcome = self.parser.extract_from_response(&ocr);
        if !outcome.success {
            warn!(
                fragments = ocr.extracted_text.len(),
                "identity fields incomplete"
            );
            return Err(VerificationError::IncompleteExtraction);
        }

        info!("identity verified");
        on_step(WizardStep::Complete, "Verified");
        Ok(outcome.data)
    }

    /// Verify an attempt.
    pub async fn verify(&self, attempt: &VerificationAttempt) -> Result<IdentityRecord> {
        self.verify_with_progress(attempt, |_, _| {}).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::identity::{TextFragment, VerificationStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubFaces {
        response: FaceMatchResponse,
    }

    impl FaceMatcher for StubFaces {
        async fn compare_faces(
            &self,
            id_image: &CapturedImage,
            selfie: &CapturedImage,
        ) -> Result<FaceMatchResponse> {
            assert_eq!(id_image.file_name(), "front-id.jpg");
            assert_eq!(selfie.file_name(), "selfie.jpg");
            Ok(self.response)
        }
    }

    struct StubOcr {
        response: OcrResponse,
        calls: AtomicUsize,
    }

    impl StubOcr {
        fn new(response: OcrResponse) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TextExtractor for StubOcr {
        async fn extract_text(&self, id_image: &CapturedImage) -> Result<OcrResponse> {
            assert_eq!(id_image.file_name(), "front-id.jpg");
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    struct FailingOcr;

    impl TextExtractor for FailingOcr {
        async fn extract_text(&self, _id_image: &CapturedImage) -> Result<OcrResponse> {
            Err(VerificationError::service("ocr", "connection refused"))
        }
    }

    fn image(name: &str) -> CapturedImage {
        CapturedImage::new(vec![0xff, 0xd8, 0xff], "image/jpeg", name).unwrap()
    }

    fn attempt() -> VerificationAttempt {
        VerificationAttempt::new(image("a.jpg"), image("b.jpg"), image("c.jpg"))
    }

    fn matched() -> FaceMatchResponse {
        FaceMatchResponse {
            success: true,
            is_match: true,
        }
    }

    fn card_response() -> OcrResponse {
        OcrResponse {
            success: true,
            extracted_text: vec![
                TextFragment::new(1, "ROMANIA"),
                TextFragment::new(2, "CARTE DE IDENTITATE"),
                TextFragment::new(3, "Maria"),
                TextFragment::new(4, "Popescu"),
                TextFragment::new(5, "AB123456"),
                TextFragment::new(6, "à Bucuresti"),
                TextFragment::new(7, "01.01.2000"),
                TextFragment::new(8, "01.01.2030"),
            ],
        }
    }

    #[tokio::test]
    async fn test_verified_attempt() {
        let verifier = Verifier::new(StubFaces { response: matched() }, StubOcr::new(card_response()));

        let mut steps = Vec::new();
        let record = verifier
            .verify_with_progress(&attempt(), |step, _| steps.push(step))
            .await
            .unwrap();

        assert_eq!(record.name, "Maria Popescu");
        assert_eq!(record.verification_status, VerificationStatus::Verified);
        assert_eq!(steps.last(), Some(&WizardStep::Complete));
    }

    #[tokio::test]
    async fn test_face_mismatch_skips_ocr() {
        let ocr = StubOcr::new(card_response());
        let verifier = Verifier::new(
            StubFaces {
                response: FaceMatchResponse {
                    success: true,
                    is_match: false,
                },
            },
            ocr,
        );

        let err = verifier.verify(&attempt()).await.unwrap_err();

        assert!(matches!(err, VerificationError::FaceMismatch));
        assert_eq!(err.to_string(), "Face verification failed. Please try again.");
        assert_eq!(verifier.text_extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsuccessful_face_call_is_a_mismatch() {
        let verifier = Verifier::new(
            StubFaces {
                response: FaceMatchResponse {
                    success: false,
                    is_match: true,
                },
            },
            StubOcr::new(card_response()),
        );

        let err = verifier.verify(&attempt()).await.unwrap_err();
        assert!(matches!(err, VerificationError::FaceMismatch));
    }

    #[tokio::test]
    async fn test_ocr_failure() {
        let verifier = Verifier::new(
            StubFaces { response: matched() },
            StubOcr::new(OcrResponse::default()),
        );

        let err = verifier.verify(&attempt()).await.unwrap_err();
        assert!(matches!(err, VerificationError::TextExtractionFailed));
    }

    #[tokio::test]
    async fn test_incomplete_extraction() {
        let mut response = card_response();
        response.extracted_text.retain(|f| f.order != 5);
        let verifier = Verifier::new(StubFaces { response: matched() }, StubOcr::new(response));

        let err = verifier.verify(&attempt()).await.unwrap_err();

        assert!(matches!(err, VerificationError::IncompleteExtraction));
        assert!(err.to_string().starts_with("Could not extract all required information"));
    }

    #[tokio::test]
    async fn test_service_error_propagates() {
        let verifier = Verifier::new(StubFaces { response: matched() }, FailingOcr);

        let err = verifier.verify(&attempt()).await.unwrap_err();
        assert_eq!(err.to_string(), "ocr service error: connection refused");
    }

    #[test]
    fn test_attempt_renames_images() {
        let attempt = attempt();
        assert_eq!(attempt.image(ImageRole::Back).file_name(), "back-id.jpg");
    }
}
