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

use thiserror::Error;

use crate::{raw_signature::RawSignatureValidationError, KeyError};

/// Describes errors that can occur when building, parsing or checking an
/// X.509 certificate.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum X509Error {
    /// The subject has no common name.
    #[error("Common Name (CN) is required")]
    MissingCommonName,

    /// A subject attribute could not be encoded.
    #[error("invalid subject attribute {attribute} ({reason})")]
    InvalidSubject {
        /// Short attribute name (`C`, `ST`, `O`, `OU`, `CN`).
        attribute: &'static str,

        /// Why the attribute was rejected.
        reason: String,
    },

    /// The serial number is not a positive hexadecimal integer.
    #[error("invalid serial number: {0}")]
    InvalidSerialNumber(String),

    /// The input is not PEM-armored or has the wrong label.
    #[error("invalid PEM: {0}")]
    InvalidPem(String),

    /// The input could not be parsed as an X.509 certificate.
    #[error("invalid certificate: {0}")]
    InvalidCertificate(String),

    /// The certificate's signature algorithm is not ecdsa-with-SHA256.
    #[error("unsupported certificate signature algorithm")]
    UnsupportedAlgorithm,

    /// The certificate's issuer is not the candidate parent's subject.
    #[error("certificate issuer does not match the parent's subject")]
    IssuerMismatch,

    /// The certificate's signature was not produced by the parent's key.
    #[error("certificate signature is invalid ({0})")]
    SignatureInvalid(RawSignatureValidationError),

    /// The private key does not belong to the certificate.
    #[error("private key does not match the certificate's public key")]
    KeyMismatch,

    /// Key material could not be used.
    #[error(transparent)]
    KeyError(#[from] KeyError),

    /// A certificate structure could not be DER-encoded.
    #[error("unable to encode certificate ({0})")]
    EncodingError(String),

    /// An unexpected internal error occured.
    #[error("internal error ({0})")]
    InternalError(String),
}
