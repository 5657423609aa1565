// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

//! Single-purpose checks run against an optional candidate file.
//!
//! Every validator except [`RequiredValidator`] passes when no file is
//! present, so presence and content are checked independently.

use mcnl_crypto::x509::Certificate;
use mcnl_identity::DidDocument;

use crate::{format_file_size, mime, CandidateFile, ValidationError, ValidationKind};

/// A check that accepts or rejects one (possibly absent) file.
pub trait FileValidator: Send + Sync {
    /// The kind of error this validator reports.
    fn kind(&self) -> ValidationKind;

    /// Validate `file`, returning the user-facing error on failure.
    fn validate(&self, file: Option<&CandidateFile>) -> Result<(), ValidationError>;
}

/// Accepts files whose MIME type matches one of a list of patterns.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileMimeTypeValidator {
    accepted: Vec<String>,
}

impl FileMimeTypeValidator {
    /// Create a validator for exact types (`image/png`) or wildcards
    /// (`image/*`).
    pub fn new<I, S>(accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accepted: accepted.into_iter().map(Into::into).collect(),
        }
    }

    /// The accepted patterns, in order.
    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }
}

impl FileValidator for FileMimeTypeValidator {
    fn kind(&self) -> ValidationKind {
        ValidationKind::FileMimeType
    }

    fn validate(&self, file: Option<&CandidateFile>) -> Result<(), ValidationError> {
        let Some(file) = file else {
            return Ok(());
        };

        if self
            .accepted
            .iter()
            .any(|pattern| mime::matches(pattern, file.mime_type()))
        {
            return Ok(());
        }

        Err(ValidationError::new(
            self.kind(),
            format!("File type must be one of: {}", self.accepted.join(", ")),
        ))
    }
}

/// Accepts files within an inclusive size range.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FileSizeValidator {
    min_size: Option<u64>,
    max_size: Option<u64>,
}

impl FileSizeValidator {
    /// Only an upper bound.
    pub fn max(max_size: u64) -> Self {
        Self {
            min_size: None,
            max_size: Some(max_size),
        }
    }

    /// Optional lower and upper bounds. An absent bound is unbounded.
    pub fn new(min_size: Option<u64>, max_size: Option<u64>) -> Self {
        Self { min_size, max_size }
    }
}

impl FileValidator for FileSizeValidator {
    fn kind(&self) -> ValidationKind {
        ValidationKind::FileSize
    }

    fn validate(&self, file: Option<&CandidateFile>) -> Result<(), ValidationError> {
        let Some(file) = file else {
            return Ok(());
        };

        if let Some(min) = self.min_size {
            if file.size() < min {
                return Err(ValidationError::new(
                    self.kind(),
                    format!("File size must be greater than {}", format_file_size(min)),
                ));
            }
        }

        if let Some(max) = self.max_size {
            if file.size() > max {
                return Err(ValidationError::new(
                    self.kind(),
                    format!("File size must be less than {}", format_file_size(max)),
                ));
            }
        }

        Ok(())
    }
}

/// Accepts files whose text parses as a PEM X.509 certificate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PemCertificateValidator;

impl FileValidator for PemCertificateValidator {
    fn kind(&self) -> ValidationKind {
        ValidationKind::PemCertificate
    }

    fn validate(&self, file: Option<&CandidateFile>) -> Result<(), ValidationError> {
        let Some(file) = file else {
            return Ok(());
        };

        let text = match file.read_text() {
            Ok(text) => text,
            Err(err) => {
                log::warn!("unable to read {}: {err}", file.name());
                return Err(ValidationError::new(
                    self.kind(),
                    "Something went wrong during validation",
                ));
            }
        };

        Certificate::from_pem(&text).map(|_| ()).map_err(|err| {
            log::debug!("{} is not a PEM certificate: {err}", file.name());
            ValidationError::new(self.kind(), "Enter a valid PEM certificate")
        })
    }
}

/// Rejects a missing file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RequiredValidator;

impl FileValidator for RequiredValidator {
    fn kind(&self) -> ValidationKind {
        ValidationKind::Required
    }

    fn validate(&self, file: Option<&CandidateFile>) -> Result<(), ValidationError> {
        match file {
            Some(_) => Ok(()),
            None => Err(ValidationError::new(self.kind(), "This field is required")),
        }
    }
}

/// Accepts files whose content parses as a DID document.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DidDocumentValidator;

impl FileValidator for DidDocumentValidator {
    fn kind(&self) -> ValidationKind {
        ValidationKind::DidDocument
    }

    fn validate(&self, file: Option<&CandidateFile>) -> Result<(), ValidationError> {
        let Some(file) = file else {
            return Ok(());
        };

        let invalid = || ValidationError::new(self.kind(), "Enter a valid DID document");

        let text = file.read_text().map_err(|err| {
            log::warn!("unable to read {}: {err}", file.name());
            invalid()
        })?;

        DidDocument::from_json(&text).map(|_| ()).map_err(|err| {
            log::debug!("{} is not a DID document: {err}", file.name());
            invalid()
        })
    }
}
