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

use std::fmt;

use mcnl_status_tracker::{log_item, validation_codes, StatusTracker};

use crate::{
    validators::{
        DidDocumentValidator, FileMimeTypeValidator, FileSizeValidator, FileValidator,
        PemCertificateValidator, RequiredValidator,
    },
    CandidateFile, ValidationError,
};

/// The ordered validators attached to one form field.
pub struct FieldSchema {
    field: String,
    validators: Vec<Box<dyn FileValidator>>,
}

impl FieldSchema {
    /// An empty schema for `field`.
    pub fn new<S: Into<String>>(field: S) -> Self {
        Self {
            field: field.into(),
            validators: Vec::new(),
        }
    }

    /// Append any validator.
    pub fn with<V: FileValidator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Append a [`RequiredValidator`].
    pub fn required(self) -> Self {
        self.with(RequiredValidator)
    }

    /// Append a [`PemCertificateValidator`].
    pub fn pem_certificate(self) -> Self {
        self.with(PemCertificateValidator)
    }

    /// Append a [`DidDocumentValidator`].
    pub fn did_document(self) -> Self {
        self.with(DidDocumentValidator)
    }

    /// Append a [`FileSizeValidator`] with an upper bound.
    pub fn max_size(self, max_size: u64) -> Self {
        self.with(FileSizeValidator::max(max_size))
    }

    /// Append a [`FileMimeTypeValidator`].
    pub fn mime_types(self, accepted: &[&str]) -> Self {
        self.with(FileMimeTypeValidator::new(accepted.iter().copied()))
    }

    /// Name of the field this schema validates.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Number of validators in the schema.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns `true` if the schema has no validators.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run the validators in order and return the failures.
    ///
    /// Each failure is logged to `tracker` with its validation code. If the
    /// tracker stops on the first error, so does this field; otherwise every
    /// validator runs. A field without failures logs `field.valid`.
    pub fn validate(
        &self,
        file: Option<&CandidateFile>,
        tracker: &mut StatusTracker,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for validator in &self.validators {
            let Err(err) = validator.validate(file) else {
                continue;
            };

            let stop = log_item!(self.field.clone(), err.message.clone(), "FieldSchema::validate")
                .validation_status(err.kind.code())
                .failure(tracker, err.clone())
                .is_err();

            errors.push(err);

            if stop {
                break;
            }
        }

        if errors.is_empty() {
            log_item!(self.field.clone(), "field is valid", "FieldSchema::validate")
                .validation_status(validation_codes::FIELD_VALID)
                .success(tracker);
        }

        errors
    }
}

impl fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("field", &self.field)
            .field(
                "validators",
                &self.validators.iter().map(|v| v.kind()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
