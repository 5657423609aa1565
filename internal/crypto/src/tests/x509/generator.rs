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

use crate::x509::{
    generate_certificate_chain, generate_intermediate_certificate, generate_leaf_certificate,
    generate_root_certificate, load_issuer, oids, BasicConstraintsInfo, Certificate,
    ChainRequest, KeyUsageInfo, X509Error,
};

fn signing_ekus() -> Vec<String> {
    vec![
        "1.3.6.1.4.1.62558.2.1".to_string(),
        "1.3.6.1.5.5.7.3.4".to_string(),
        "1.3.6.1.5.5.7.3.36".to_string(),
    ]
}

#[test]
fn chain_links_issuer_to_parent_subject() {
    let request = ChainRequest::from_base_subject(super::sample_subject("Acme"), true);
    let chain = generate_certificate_chain(&request).unwrap();
    let leaf = chain.leaf.as_ref().unwrap();

    let root = &chain.root.certificate;
    let intermediate = &chain.intermediate.certificate;

    assert!(root.is_self_issued());
    assert_eq!(root.issuer().unwrap(), root.subject().unwrap());
    assert_eq!(intermediate.issuer().unwrap(), root.subject().unwrap());
    assert_eq!(
        leaf.certificate.issuer().unwrap(),
        intermediate.subject().unwrap()
    );

    assert_eq!(
        intermediate.subject().unwrap().common_name,
        "Acme - Intermediate"
    );
    assert_eq!(leaf.certificate.subject().unwrap().common_name, "Acme - Leaf");

    root.verify_issued_by(root).unwrap();
    intermediate.verify_issued_by(root).unwrap();
    leaf.certificate.verify_issued_by(intermediate).unwrap();
}

#[test]
fn chain_pem_concatenates_tiers() {
    let request = ChainRequest::from_base_subject(super::sample_subject("Acme"), true);
    let chain = generate_certificate_chain(&request).unwrap();
    let leaf = chain.leaf.as_ref().unwrap();

    assert_eq!(
        chain.chain_pem,
        [
            chain.root.certificate_pem.as_str(),
            chain.intermediate.certificate_pem.as_str(),
            leaf.certificate_pem.as_str(),
        ]
        .join("\n")
    );

    let parsed = Certificate::chain_from_pem(&chain.chain_pem).unwrap();
    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[2].der(), leaf.certificate.der());
}

#[test]
fn chain_without_leaf() {
    let request = ChainRequest::from_base_subject(super::sample_subject("Acme"), false);
    let chain = generate_certificate_chain(&request).unwrap();

    assert!(chain.leaf.is_none());
    assert_eq!(Certificate::chain_from_pem(&chain.chain_pem).unwrap().len(), 2);
}

#[test]
fn default_serial_numbers() {
    let request = ChainRequest::from_base_subject(super::sample_subject("Acme"), true);
    let chain = generate_certificate_chain(&request).unwrap();

    assert_eq!(chain.root.certificate.serial_number().unwrap(), "01");
    assert_eq!(chain.intermediate.certificate.serial_number().unwrap(), "02");
    assert_eq!(
        chain.leaf.unwrap().certificate.serial_number().unwrap(),
        "03"
    );
}

#[test]
fn custom_serial_number() {
    let root = generate_root_certificate(&super::sample_subject("Root"), Some("1a2b")).unwrap();
    assert_eq!(root.certificate.serial_number().unwrap(), "1a2b");
}

#[test]
fn key_usage_is_minimal_der() {
    let request = ChainRequest::from_base_subject(super::sample_subject("Acme"), true);
    let chain = generate_certificate_chain(&request).unwrap();
    let leaf = chain.leaf.unwrap();

    for (cert, expected) in [
        (&chain.root.certificate, [0x03, 0x02, 0x01, 0x86]),
        (&chain.intermediate.certificate, [0x03, 0x02, 0x02, 0x84]),
        (&leaf.certificate, [0x03, 0x02, 0x07, 0x80]),
    ] {
        let ext = cert.extension(oids::KEY_USAGE).unwrap();
        assert_eq!(ext.extn_value.to_vec(), expected.to_vec());
    }
}

#[test]
fn wide_serial_numbers() {
    for (serial, expected) in [
        ("5f3a9c2e7b1d4e8f", "5f3a9c2e7b1d4e8f"),
        ("8000000000000000", "008000000000000000"),
        ("5f3a9c2e7b1d4e8f9a0b", "5f3a9c2e7b1d4e8f9a0b"),
        (
            "0x5f3a9c2e7b1d4e8f9a0b1c2d3e4f5061",
            "5f3a9c2e7b1d4e8f9a0b1c2d3e4f5061",
        ),
        (
            "7f3a9c2e7b1d4e8f9a0b1c2d3e4f506172839405",
            "7f3a9c2e7b1d4e8f9a0b1c2d3e4f506172839405",
        ),
        ("0:ab", "00ab"),
        ("abc", "0abc"),
    ] {
        let root = generate_root_certificate(&super::sample_subject("Root"), Some(serial))
            .unwrap_or_else(|e| panic!("{serial:?} gave {e:?}"));
        assert_eq!(root.certificate.serial_number().unwrap(), expected);
    }
}

#[test]
fn serial_numbers_over_twenty_octets_are_rejected() {
    for serial in [
        "8f3a9c2e7b1d4e8f9a0b1c2d3e4f506172839405",
        "017f3a9c2e7b1d4e8f9a0b1c2d3e4f506172839405",
    ] {
        let err = generate_root_certificate(&super::sample_subject("Root"), Some(serial))
            .unwrap_err();
        assert!(
            matches!(err, X509Error::InvalidSerialNumber(_)),
            "{serial:?} gave {err:?}"
        );
    }
}

#[test]
fn invalid_serial_numbers() {
    for serial in ["", "xyz", "00", "0000", "-01"] {
        let err = generate_root_certificate(&super::sample_subject("Root"), Some(serial))
            .unwrap_err();
        assert!(
            matches!(err, X509Error::InvalidSerialNumber(_)),
            "{serial:?} gave {err:?}"
        );
    }
}

#[test]
fn missing_common_name_aborts() {
    let err = generate_root_certificate(&super::sample_subject(""), None).unwrap_err();
    assert_eq!(err, X509Error::MissingCommonName);
}

#[test]
fn root_extensions() {
    let root = generate_root_certificate(&super::sample_subject("Root"), None).unwrap();
    let cert = &root.certificate;

    assert_eq!(
        cert.basic_constraints().unwrap(),
        Some(BasicConstraintsInfo {
            ca: true,
            path_len_constraint: Some(3),
            critical: true,
        })
    );

    assert_eq!(
        cert.key_usage().unwrap(),
        Some(KeyUsageInfo {
            digital_signature: true,
            key_cert_sign: true,
            crl_sign: true,
            critical: true,
        })
    );

    assert!(cert.extended_key_usage().unwrap().is_empty());

    let ski = cert.subject_key_identifier().unwrap().unwrap();
    assert_eq!(ski.len(), 20);
    assert_eq!(cert.authority_key_identifier().unwrap(), Some(ski));
    assert_eq!(cert.is_extension_critical(oids::SUBJECT_KEY_ID), Some(false));
}

#[test]
fn intermediate_extensions() {
    let request = ChainRequest::from_base_subject(super::sample_subject("Acme"), false);
    let chain = generate_certificate_chain(&request).unwrap();
    let cert = &chain.intermediate.certificate;

    assert_eq!(
        cert.basic_constraints().unwrap(),
        Some(BasicConstraintsInfo {
            ca: true,
            path_len_constraint: Some(2),
            critical: true,
        })
    );

    assert_eq!(
        cert.key_usage().unwrap(),
        Some(KeyUsageInfo {
            digital_signature: true,
            key_cert_sign: true,
            crl_sign: false,
            critical: true,
        })
    );

    assert_eq!(cert.extended_key_usage().unwrap(), signing_ekus());
    assert_eq!(cert.is_extension_critical(oids::EXT_KEY_USAGE), Some(true));

    assert_eq!(
        cert.authority_key_identifier().unwrap(),
        chain.root.certificate.subject_key_identifier().unwrap()
    );
}

#[test]
fn leaf_extensions() {
    let request = ChainRequest::from_base_subject(super::sample_subject("Acme"), true);
    let chain = generate_certificate_chain(&request).unwrap();
    let cert = chain.leaf.as_ref().unwrap().certificate.clone();

    assert_eq!(
        cert.basic_constraints().unwrap(),
        Some(BasicConstraintsInfo {
            ca: false,
            path_len_constraint: Some(0),
            critical: true,
        })
    );

    assert_eq!(
        cert.key_usage().unwrap(),
        Some(KeyUsageInfo {
            digital_signature: true,
            key_cert_sign: false,
            crl_sign: false,
            critical: true,
        })
    );

    assert_eq!(cert.extended_key_usage().unwrap(), signing_ekus());
    assert_eq!(
        cert.authority_key_identifier().unwrap(),
        chain.intermediate.certificate.subject_key_identifier().unwrap()
    );
}

#[test]
fn extend_imported_chain() {
    let root = generate_root_certificate(&super::sample_subject("Root"), None).unwrap();

    // Simulate a later run that only has the root's PEM files on disk.
    let (root_cert, root_key) = load_issuer(&root.certificate_pem, &root.private_key_pem).unwrap();
    assert!(root_cert.matches_key(&root_key).unwrap());

    let intermediate = generate_intermediate_certificate(
        &super::sample_subject("Intermediate"),
        None,
        crate::x509::CaSigningContext {
            certificate: &root_cert,
            key_pair: &root_key,
        },
    )
    .unwrap();

    let (int_cert, int_key) =
        load_issuer(&intermediate.certificate_pem, &intermediate.private_key_pem).unwrap();

    let leaf = generate_leaf_certificate(
        &super::sample_subject("Leaf"),
        Some("0f"),
        crate::x509::CaSigningContext {
            certificate: &int_cert,
            key_pair: &int_key,
        },
    )
    .unwrap();

    intermediate.certificate.verify_issued_by(&root.certificate).unwrap();
    leaf.certificate.verify_issued_by(&intermediate.certificate).unwrap();
}

#[test]
fn load_issuer_rejects_foreign_key() {
    let root = generate_root_certificate(&super::sample_subject("Root"), None).unwrap();
    let other = generate_root_certificate(&super::sample_subject("Other"), None).unwrap();

    let err = load_issuer(&root.certificate_pem, &other.private_key_pem).unwrap_err();
    assert_eq!(err, X509Error::KeyMismatch);
}

#[test]
fn verify_rejects_wrong_parent() {
    let root = generate_root_certificate(&super::sample_subject("Root"), None).unwrap();
    let impostor = generate_root_certificate(&super::sample_subject("Root"), None).unwrap();

    let intermediate = generate_intermediate_certificate(
        &super::sample_subject("Intermediate"),
        None,
        root.signing_context(),
    )
    .unwrap();

    // Same subject name, different key.
    assert!(matches!(
        intermediate
            .certificate
            .verify_issued_by(&impostor.certificate)
            .unwrap_err(),
        X509Error::SignatureInvalid(_)
    ));

    let other = generate_root_certificate(&super::sample_subject("Other"), None).unwrap();
    assert_eq!(
        intermediate
            .certificate
            .verify_issued_by(&other.certificate)
            .unwrap_err(),
        X509Error::IssuerMismatch
    );
}
