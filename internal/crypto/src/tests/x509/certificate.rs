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

use crate::x509::{generate_root_certificate, Certificate, X509Error};

#[test]
fn pem_round_trip() {
    let root = generate_root_certificate(&super::sample_subject("Root"), None).unwrap();

    let pem = root.certificate.to_pem();
    assert!(pem.starts_with("-----BEGIN CERTIFICATE-----\n"));
    assert!(pem.lines().all(|line| line.len() <= 64));

    let parsed = Certificate::from_pem(&pem).unwrap();
    assert_eq!(parsed.der(), root.certificate.der());
    assert_eq!(
        parsed.subject().unwrap().to_string(),
        "C=NL, ST=Zuid-Holland, O=My Company, OU=IT Department, CN=Root"
    );
}

#[test]
fn rejects_non_pem_text() {
    assert!(matches!(
        Certificate::from_pem("invalid content").unwrap_err(),
        X509Error::InvalidPem(_)
    ));
}

#[test]
fn rejects_wrong_pem_label() {
    let root = generate_root_certificate(&super::sample_subject("Root"), None).unwrap();

    assert!(matches!(
        Certificate::from_pem(&root.private_key_pem).unwrap_err(),
        X509Error::InvalidPem(_)
    ));
}

#[test]
fn rejects_garbage_der() {
    let pem = pem::encode(&pem::Pem::new("CERTIFICATE", b"definitely not DER".to_vec()));

    assert!(matches!(
        Certificate::from_pem(&pem).unwrap_err(),
        X509Error::InvalidCertificate(_)
    ));
}

#[test]
fn debug_shows_subject() {
    let root = generate_root_certificate(&super::sample_subject("Root"), None).unwrap();
    let debug = format!("{:?}", root.certificate);

    assert!(debug.contains("CN=Root"));
}
