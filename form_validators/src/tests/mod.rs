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

#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

mod signing_form;

use mcnl_crypto::{
    x509::{generate_root_certificate, CertificateSubject},
    EcKeyPair,
};
use mcnl_identity::{DidDocument, Jwk};

use crate::{mime, CandidateFile};

pub(crate) fn certificate_pem() -> String {
    let subject = CertificateSubject::new("Upload Test Root").with_country("NL");
    generate_root_certificate(&subject, None)
        .unwrap()
        .certificate_pem
}

pub(crate) fn certificate_file(name: &str) -> CandidateFile {
    CandidateFile::from_bytes(
        name,
        mime::APPLICATION_X_PEM_FILE,
        certificate_pem().into_bytes(),
    )
}

pub(crate) fn private_key_file() -> CandidateFile {
    CandidateFile::from_bytes(
        "leaf-private-key.pem",
        mime::APPLICATION_X_PEM_FILE,
        EcKeyPair::generate().to_pkcs8_pem().unwrap().into_bytes(),
    )
}

pub(crate) fn did_file() -> CandidateFile {
    let jwk = Jwk::from_key_pair(&EcKeyPair::generate()).unwrap();
    let doc = DidDocument::for_web_domain("example.com", &jwk).unwrap();

    CandidateFile::from_bytes(
        "did.json",
        mime::APPLICATION_JSON,
        doc.to_json_pretty().unwrap().into_bytes(),
    )
}

pub(crate) fn asset_file() -> CandidateFile {
    CandidateFile::from_bytes("photo.jpg", mime::IMAGE_JPEG, vec![0xff, 0xd8, 0xff, 0xe0])
}
