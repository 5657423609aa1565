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

/// Implementations of the `RawSigner` trait generate a cryptographic signature
/// over an arbitrary byte array.
pub trait RawSigner {
    /// Return a raw signature over the original byte slice.
    ///
    /// The signature is encoded as an ASN.1 DER `ECDSA-Sig-Value` when
    /// [`SignatureFormat::Der`] is requested, or as the fixed-size `r || s`
    /// concatenation used by JOSE otherwise.
    fn sign(&self, data: &[u8], format: SignatureFormat) -> Result<Vec<u8>, RawSignerError>;
}

/// Encoding of an ECDSA signature.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SignatureFormat {
    /// ASN.1 DER `SEQUENCE { r INTEGER, s INTEGER }`, as used in X.509.
    Der,

    /// Fixed-size big-endian `r || s`, as used in JWS.
    P1363,
}

/// Describes errors that can be identified when generating a raw signature.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum RawSignerError {
    /// An unexpected internal error occured while signing.
    #[error("internal error ({0})")]
    InternalError(String),
}
