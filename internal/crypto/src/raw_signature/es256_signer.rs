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

use ecdsa::signature::Signer;
use p256::ecdsa::{Signature as P256Signature, SigningKey as P256SigningKey};

use crate::{
    raw_signature::{RawSigner, RawSignerError, SignatureFormat},
    EcKeyPair,
};

/// Produces ES256 (ECDSA P-256 / SHA-256) signatures.
pub struct Es256Signer {
    signing_key: P256SigningKey,
}

impl Es256Signer {
    /// Create a signer from an in-memory key pair.
    pub fn from_key_pair(key_pair: &EcKeyPair) -> Self {
        Self {
            signing_key: key_pair.signing_key(),
        }
    }
}

impl RawSigner for Es256Signer {
    fn sign(&self, data: &[u8], format: SignatureFormat) -> Result<Vec<u8>, RawSignerError> {
        let signature: P256Signature = self
            .signing_key
            .try_sign(data)
            .map_err(|e| RawSignerError::InternalError(e.to_string()))?;

        Ok(match format {
            SignatureFormat::Der => signature.to_der().as_bytes().to_vec(),
            SignatureFormat::P1363 => signature.to_bytes().to_vec(),
        })
    }
}
