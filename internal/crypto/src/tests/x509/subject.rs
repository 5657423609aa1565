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

use crate::x509::{CertificateSubject, X509Error};

#[test]
fn omits_absent_fields() {
    let subject = CertificateSubject::new("Root")
        .with_country("NL")
        .with_organization("Acme");

    assert_eq!(subject.distinguished_name().unwrap(), "C=NL, O=Acme, CN=Root");
}

#[test]
fn full_subject_in_fixed_order() {
    let subject = super::sample_subject("Root CA");

    assert_eq!(
        subject.to_string(),
        "C=NL, ST=Zuid-Holland, O=My Company, OU=IT Department, CN=Root CA"
    );
}

#[test]
fn blank_fields_are_omitted() {
    let subject = CertificateSubject::new("Leaf")
        .with_state("   ")
        .with_organizational_unit("");

    assert_eq!(subject.to_string(), "CN=Leaf");
}

#[test]
fn common_name_is_required() {
    let err = CertificateSubject::new("  ")
        .with_country("NL")
        .distinguished_name()
        .unwrap_err();

    assert_eq!(err, X509Error::MissingCommonName);
    assert_eq!(err.to_string(), "Common Name (CN) is required");
}

#[test]
fn common_name_suffix() {
    let subject = super::sample_subject("Acme");
    let intermediate = subject.with_common_name_suffix("Intermediate");

    assert_eq!(intermediate.common_name, "Acme - Intermediate");
    assert_eq!(intermediate.country, subject.country);
}

#[test]
fn country_must_be_printable() {
    let err = CertificateSubject::new("Root")
        .with_country("N@")
        .to_name()
        .unwrap_err();

    assert!(matches!(
        err,
        X509Error::InvalidSubject { attribute: "C", .. }
    ));
}

#[test]
fn deserializes_camel_case() {
    let subject: CertificateSubject = serde_json::from_str(
        r#"{"country": "NL", "organizationalUnit": "Dev", "commonName": "Root"}"#,
    )
    .unwrap();

    assert_eq!(subject.to_string(), "C=NL, OU=Dev, CN=Root");
}
