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

use crate::{
    raw_signature::{
        EcdsaValidator, Es256Signer, RawSignatureValidationError, RawSignatureValidator,
        RawSigner, SignatureFormat,
    },
    EcKeyPair,
};

#[test]
fn der_and_p1363_signatures_validate() {
    let key_pair = EcKeyPair::generate();
    let signer = Es256Signer::from_key_pair(&key_pair);
    let spki = key_pair.public_key_spki_der().unwrap();
    let data = b"some sample content to sign";

    let der_sig = signer.sign(data, SignatureFormat::Der).unwrap();
    let raw_sig = signer.sign(data, SignatureFormat::P1363).unwrap();
    assert_eq!(raw_sig.len(), 64);
    assert_eq!(der_sig[0], 0x30);

    EcdsaValidator::Es256.validate(&der_sig, data, &spki).unwrap();
    EcdsaValidator::Es256.validate(&raw_sig, data, &spki).unwrap();
}

#[test]
fn bad_data() {
    let key_pair = EcKeyPair::generate();
    let signer = Es256Signer::from_key_pair(&key_pair);
    let spki = key_pair.public_key_spki_der().unwrap();

    let sig = signer.sign(b"original", SignatureFormat::Der).unwrap();

    assert_eq!(
        EcdsaValidator::Es256
            .validate(&sig, b"tampered", &spki)
            .unwrap_err(),
        RawSignatureValidationError::SignatureMismatch
    );
}

#[test]
fn wrong_public_key() {
    let signer = Es256Signer::from_key_pair(&EcKeyPair::generate());
    let other = EcKeyPair::generate().public_key_spki_der().unwrap();

    let sig = signer.sign(b"data", SignatureFormat::Der).unwrap();

    assert_eq!(
        EcdsaValidator::Es256.validate(&sig, b"data", &other).unwrap_err(),
        RawSignatureValidationError::SignatureMismatch
    );
}

#[test]
fn garbage_public_key() {
    assert_eq!(
        EcdsaValidator::Es256
            .validate(&[0u8; 64], b"data", b"not a key")
            .unwrap_err(),
        RawSignatureValidationError::InvalidPublicKey
    );
}
