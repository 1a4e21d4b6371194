use mime::Mime;

use super::domain::ProofDocument;
use crate::validation::ValidationError;

fn accepted(content_type: &Mime) -> bool {
    *content_type == mime::APPLICATION_PDF
        || *content_type == mime::IMAGE_JPEG
        || *content_type == mime::IMAGE_PNG
}

impl ProofDocument {
    /// Content type guessed from the file extension.
    pub fn content_type(&self) -> Option<Mime> {
        mime_guess::from_path(&self.file_name).first()
    }

    pub fn validate(&self) -> Result<Mime, ValidationError> {
        if self.file_name.trim().is_empty() {
            return Err(ValidationError::MissingMandatoryField {
                field: "proofDocument.fileName",
            });
        }
        if self.storage_key.trim().is_empty() {
            return Err(ValidationError::MissingMandatoryField {
                field: "proofDocument.storageKey",
            });
        }

        self.content_type()
            .filter(accepted)
            .ok_or_else(|| ValidationError::UnsupportedProofDocument {
                file_name: self.file_name.clone(),
            })
    }
}
