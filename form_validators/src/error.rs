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

use mcnl_status_tracker::validation_codes;
use serde::Serialize;
use thiserror::Error;

/// The check a [`ValidationError`] came from.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationKind {
    /// The file is smaller or larger than allowed.
    FileSize,

    /// The file's MIME type is not accepted.
    FileMimeType,

    /// The file is not a readable PEM certificate.
    PemCertificate,

    /// No file was supplied for a required field.
    Required,

    /// The file is not a DID document.
    DidDocument,
}

impl ValidationKind {
    /// Validation code recorded in the status log.
    pub fn code(self) -> &'static str {
        match self {
            Self::FileSize => validation_codes::FILE_SIZE,
            Self::FileMimeType => validation_codes::FILE_MIME_TYPE,
            Self::PemCertificate => validation_codes::PEM_CERTIFICATE,
            Self::Required => validation_codes::REQUIRED,
            Self::DidDocument => validation_codes::DID_DOCUMENT,
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A failed check: what failed and the message shown to the user.
#[derive(Clone, Debug, Eq, Error, PartialEq, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    /// Which check failed.
    pub kind: ValidationKind,

    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error.
    pub fn new<M: Into<String>>(kind: ValidationKind, message: M) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
