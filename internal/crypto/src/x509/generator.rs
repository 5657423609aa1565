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

//! Root / intermediate / leaf certificate generation.
//!
//! Every tier gets a fresh P-256 key and is signed with ecdsa-with-SHA256 by
//! its parent (the root signs itself). Extensions per tier:
//!
//! | Tier | BasicConstraints | KeyUsage | ExtendedKeyUsage |
//! |---|---|---|---|
//! | root | cA, pathLen 3 | digitalSignature, keyCertSign, cRLSign | none |
//! | intermediate | cA, pathLen 2 | digitalSignature, keyCertSign | [`SIGNING_EKUS`] |
//! | leaf | not cA, pathLen 0 | digitalSignature | [`SIGNING_EKUS`] |
//!
//! All three are critical. Each certificate also carries a
//! SubjectKeyIdentifier (SHA-1 of its public key bits) and an
//! AuthorityKeyIdentifier naming the parent's key.
//!
//! ### BasicConstraints encoding
//!
//! rasn omits `cA` when it is false because the field is `DEFAULT FALSE`.
//! OpenSSL 3.x rejects a leaf whose BasicConstraints lacks the BOOLEAN, so the
//! extension value is written as minimal DER by hand for every tier.
//!
//! [`SIGNING_EKUS`]: crate::x509::oids::SIGNING_EKUS

use chrono::{Duration, Utc};
use rasn::types::{BitString, Integer, IntegerType, OctetString};
use rasn_pkix::{
    AlgorithmIdentifier, AuthorityKeyIdentifier, Extension, Extensions, Name,
    SubjectPublicKeyInfo, TbsCertificate, Time, Validity, Version,
};

use crate::{
    hash::sha1,
    raw_signature::{Es256Signer, RawSigner, SignatureFormat},
    x509::{oids, subject::oid, Certificate, CertificateSubject, X509Error},
    EcKeyPair,
};

/// Serial number used for the root when the caller does not supply one.
pub const DEFAULT_ROOT_SERIAL: &str = "01";

/// Serial number used for the intermediate when the caller does not supply
/// one.
pub const DEFAULT_INTERMEDIATE_SERIAL: &str = "02";

/// Serial number used for the leaf when the caller does not supply one.
pub const DEFAULT_LEAF_SERIAL: &str = "03";

const VALIDITY_DAYS: i64 = 365;

// digitalSignature (0), keyCertSign (5), cRLSign (6)
const KU_ROOT: u8 = 0x86;

// digitalSignature (0), keyCertSign (5)
const KU_INTERMEDIATE: u8 = 0x84;

// digitalSignature (0)
const KU_LEAF: u8 = 0x80;

/// One generated certificate together with its key material.
#[derive(Clone, Debug)]
pub struct CertificateTier {
    /// Parsed certificate.
    pub certificate: Certificate,

    /// Key pair whose public half is certified.
    pub key_pair: EcKeyPair,

    /// Certificate as PEM.
    pub certificate_pem: String,

    /// Private key as PKCS#8 PEM.
    pub private_key_pem: String,
}

impl CertificateTier {
    fn new(certificate: Certificate, key_pair: EcKeyPair) -> Result<Self, X509Error> {
        Ok(Self {
            certificate_pem: certificate.to_pem(),
            private_key_pem: key_pair.to_pkcs8_pem()?,
            certificate,
            key_pair,
        })
    }

    /// Borrow this tier as the issuer of the next one.
    pub fn signing_context(&self) -> CaSigningContext<'_> {
        CaSigningContext {
            certificate: &self.certificate,
            key_pair: &self.key_pair,
        }
    }
}

/// Issuer certificate and private key used to sign a child certificate.
#[derive(Clone, Copy, Debug)]
pub struct CaSigningContext<'a> {
    /// Issuer certificate. Its subject becomes the child's issuer.
    pub certificate: &'a Certificate,

    /// Issuer private key.
    pub key_pair: &'a EcKeyPair,
}

/// Subjects and serial numbers for a full chain.
#[derive(Clone, Debug, Default)]
pub struct ChainRequest {
    /// Root subject.
    pub root: CertificateSubject,

    /// Intermediate subject.
    pub intermediate: CertificateSubject,

    /// Leaf subject. No leaf is generated when `None`.
    pub leaf: Option<CertificateSubject>,

    /// Root serial number; defaults to [`DEFAULT_ROOT_SERIAL`].
    pub root_serial: Option<String>,

    /// Intermediate serial number; defaults to
    /// [`DEFAULT_INTERMEDIATE_SERIAL`].
    pub intermediate_serial: Option<String>,

    /// Leaf serial number; defaults to [`DEFAULT_LEAF_SERIAL`].
    pub leaf_serial: Option<String>,
}

impl ChainRequest {
    /// Build a request whose intermediate and leaf subjects are derived from
    /// the root subject as `"<CN> - Intermediate"` and `"<CN> - Leaf"`.
    pub fn from_base_subject(subject: CertificateSubject, include_leaf: bool) -> Self {
        Self {
            intermediate: subject.with_common_name_suffix("Intermediate"),
            leaf: include_leaf.then(|| subject.with_common_name_suffix("Leaf")),
            root: subject,
            ..Default::default()
        }
    }
}

/// A generated chain.
#[derive(Clone, Debug)]
pub struct CertificateChain {
    /// Self-signed root.
    pub root: CertificateTier,

    /// Intermediate signed by the root.
    pub intermediate: CertificateTier,

    /// Leaf signed by the intermediate, if requested.
    pub leaf: Option<CertificateTier>,

    /// Root, intermediate and (if present) leaf PEM, joined with a newline.
    pub chain_pem: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Tier {
    Root,
    Intermediate,
    Leaf,
}

/// Generate a self-signed root CA certificate.
pub fn generate_root_certificate(
    subject: &CertificateSubject,
    serial_number: Option<&str>,
) -> Result<CertificateTier, X509Error> {
    let key_pair = EcKeyPair::generate();
    let certificate = build_certificate(
        Tier::Root,
        subject,
        serial_number.unwrap_or(DEFAULT_ROOT_SERIAL),
        &key_pair,
        None,
    )?;

    CertificateTier::new(certificate, key_pair)
}

/// Generate an intermediate CA certificate signed by `issuer`.
pub fn generate_intermediate_certificate(
    subject: &CertificateSubject,
    serial_number: Option<&str>,
    issuer: CaSigningContext<'_>,
) -> Result<CertificateTier, X509Error> {
    let key_pair = EcKeyPair::generate();
    let certificate = build_certificate(
        Tier::Intermediate,
        subject,
        serial_number.unwrap_or(DEFAULT_INTERMEDIATE_SERIAL),
        &key_pair,
        Some(issuer),
    )?;

    CertificateTier::new(certificate, key_pair)
}

/// Generate a leaf (end-entity) signing certificate signed by `issuer`.
pub fn generate_leaf_certificate(
    subject: &CertificateSubject,
    serial_number: Option<&str>,
    issuer: CaSigningContext<'_>,
) -> Result<CertificateTier, X509Error> {
    let key_pair = EcKeyPair::generate();
    let certificate = build_certificate(
        Tier::Leaf,
        subject,
        serial_number.unwrap_or(DEFAULT_LEAF_SERIAL),
        &key_pair,
        Some(issuer),
    )?;

    CertificateTier::new(certificate, key_pair)
}

/// Generate root, intermediate and (optionally) leaf in order.
///
/// Any failure aborts the remaining tiers.
pub fn generate_certificate_chain(request: &ChainRequest) -> Result<CertificateChain, X509Error> {
    let root = generate_root_certificate(&request.root, request.root_serial.as_deref())?;

    let intermediate = generate_intermediate_certificate(
        &request.intermediate,
        request.intermediate_serial.as_deref(),
        root.signing_context(),
    )?;

    let leaf = request
        .leaf
        .as_ref()
        .map(|subject| {
            generate_leaf_certificate(
                subject,
                request.leaf_serial.as_deref(),
                intermediate.signing_context(),
            )
        })
        .transpose()?;

    let mut pems = vec![
        root.certificate_pem.as_str(),
        intermediate.certificate_pem.as_str(),
    ];
    if let Some(leaf) = &leaf {
        pems.push(leaf.certificate_pem.as_str());
    }
    let chain_pem = pems.join("\n");

    Ok(CertificateChain {
        root,
        intermediate,
        leaf,
        chain_pem,
    })
}

/// Load an issuer certificate and its PKCS#8 private key from PEM.
///
/// Fails with [`X509Error::KeyMismatch`] when the key does not belong to the
/// certificate.
pub fn load_issuer(
    certificate_pem: &str,
    private_key_pem: &str,
) -> Result<(Certificate, EcKeyPair), X509Error> {
    let certificate = Certificate::from_pem(certificate_pem)?;
    let key_pair = EcKeyPair::from_pkcs8_pem(private_key_pem)?;

    if !certificate.matches_key(&key_pair)? {
        return Err(X509Error::KeyMismatch);
    }

    Ok((certificate, key_pair))
}

fn build_certificate(
    tier: Tier,
    subject: &CertificateSubject,
    serial_number: &str,
    key_pair: &EcKeyPair,
    issuer: Option<CaSigningContext<'_>>,
) -> Result<Certificate, X509Error> {
    let subject_name = subject.to_name()?;

    let spki: SubjectPublicKeyInfo = rasn::der::decode(&key_pair.public_key_spki_der()?)
        .map_err(|e| X509Error::EncodingError(e.to_string()))?;

    let ski = sha1(&key_pair.public_point());

    let (issuer_name, authority_key_id, signing_key): (Name, Vec<u8>, &EcKeyPair) = match issuer
    {
        None => (subject_name.clone(), ski.clone(), key_pair),
        Some(ctx) => (
            ctx.certificate.rasn().tbs_certificate.subject.clone(),
            ctx.certificate.key_identifier()?,
            ctx.key_pair,
        ),
    };

    log::debug!(
        "building {tier:?} certificate for \"{subject}\" (serial {serial_number})"
    );

    let exts = tier_extensions(tier, ski, authority_key_id)?;

    let tbs = TbsCertificate {
        version: Version::V3,
        serial_number: parse_serial_number(serial_number)?,
        signature: ecdsa_with_sha256()?,
        issuer: issuer_name,
        validity: default_validity(),
        subject: subject_name,
        subject_public_key_info: spki,
        issuer_unique_id: None,
        subject_unique_id: None,
        extensions: Some(Extensions::from(exts)),
    };

    let tbs_der = rasn::der::encode(&tbs).map_err(|e| X509Error::EncodingError(e.to_string()))?;

    let sig = Es256Signer::from_key_pair(signing_key)
        .sign(&tbs_der, SignatureFormat::Der)
        .map_err(|e| X509Error::InternalError(e.to_string()))?;

    let cert = rasn_pkix::Certificate {
        tbs_certificate: tbs,
        signature_algorithm: ecdsa_with_sha256()?,
        signature_value: BitString::from_slice(&sig),
    };

    let der = rasn::der::encode(&cert).map_err(|e| X509Error::EncodingError(e.to_string()))?;
    Certificate::from_der(&der)
}

fn tier_extensions(
    tier: Tier,
    subject_key_id: Vec<u8>,
    authority_key_id: Vec<u8>,
) -> Result<Vec<Extension>, X509Error> {
    let (ca, path_len, key_usage, with_eku) = match tier {
        Tier::Root => (true, 3, KU_ROOT, false),
        Tier::Intermediate => (true, 2, KU_INTERMEDIATE, true),
        Tier::Leaf => (false, 0, KU_LEAF, true),
    };

    let mut exts = vec![
        Extension {
            extn_id: oid(oids::BASIC_CONSTRAINTS)?,
            critical: true,
            extn_value: OctetString::from(basic_constraints_der(ca, path_len)),
        },
        Extension {
            extn_id: oid(oids::KEY_USAGE)?,
            critical: true,
            extn_value: OctetString::from(key_usage_der(key_usage)),
        },
    ];

    if with_eku {
        exts.push(ext_key_usage_ext()?);
    }

    exts.push(subject_key_identifier_ext(subject_key_id)?);
    exts.push(authority_key_identifier_ext(authority_key_id)?);

    Ok(exts)
}

/// `SEQUENCE { BOOLEAN cA, INTEGER pathLenConstraint }` with the BOOLEAN
/// always present.
fn basic_constraints_der(ca: bool, path_len: u8) -> Vec<u8> {
    let ca_byte = if ca { 0xff } else { 0x00 };
    vec![0x30, 0x06, 0x01, 0x01, ca_byte, 0x02, 0x01, path_len]
}

/// KeyUsage `BIT STRING` with trailing zero bits dropped, as DER requires
/// for named bit lists.
fn key_usage_der(bits: u8) -> Vec<u8> {
    let unused = bits.trailing_zeros().min(7) as u8;
    vec![0x03, 0x02, unused, bits]
}

fn ext_key_usage_ext() -> Result<Extension, X509Error> {
    let eku_list: rasn_pkix::ExtKeyUsageSyntax = oids::SIGNING_EKUS
        .iter()
        .map(|arcs| oid(arcs))
        .collect::<Result<_, _>>()?;

    Ok(Extension {
        extn_id: oid(oids::EXT_KEY_USAGE)?,
        critical: true,
        extn_value: rasn::der::encode(&eku_list)
            .map_err(|e| X509Error::EncodingError(e.to_string()))?
            .into(),
    })
}

fn subject_key_identifier_ext(key_id: Vec<u8>) -> Result<Extension, X509Error> {
    Ok(Extension {
        extn_id: oid(oids::SUBJECT_KEY_ID)?,
        critical: false,
        extn_value: rasn::der::encode(&OctetString::from(key_id))
            .map_err(|e| X509Error::EncodingError(e.to_string()))?
            .into(),
    })
}

fn authority_key_identifier_ext(key_id: Vec<u8>) -> Result<Extension, X509Error> {
    let aki = AuthorityKeyIdentifier {
        key_identifier: Some(OctetString::from(key_id)),
        authority_cert_issuer: None,
        authority_cert_serial_number: None,
    };

    Ok(Extension {
        extn_id: oid(oids::AUTHORITY_KEY_ID)?,
        critical: false,
        extn_value: rasn::der::encode(&aki)
            .map_err(|e| X509Error::EncodingError(e.to_string()))?
            .into(),
    })
}

fn ecdsa_with_sha256() -> Result<AlgorithmIdentifier, X509Error> {
    Ok(AlgorithmIdentifier {
        algorithm: oid(oids::ECDSA_WITH_SHA256)?,
        parameters: None,
    })
}

/// Validity: notBefore = now, notAfter = now + 365 days.
fn default_validity() -> Validity {
    let now = Utc::now();
    let not_after = now + Duration::days(VALIDITY_DAYS);

    Validity {
        not_before: Time::Utc(now),
        not_after: Time::Utc(not_after),
    }
}

/// Longest DER serial number content RFC 5280 allows.
const MAX_SERIAL_OCTETS: usize = 20;

/// Parse a hexadecimal serial number such as `"01"` or `"0a:1b"`.
///
/// Serial numbers must be positive and encode in at most 20 octets.
pub(crate) fn parse_serial_number(serial: &str) -> Result<Integer, X509Error> {
    let mut digits: String = serial
        .trim()
        .trim_start_matches("0x")
        .chars()
        .filter(|c| *c != ':')
        .collect();

    if digits.len() % 2 == 1 {
        digits.insert(0, '0');
    }

    let decoded =
        hex::decode(&digits).map_err(|e| X509Error::InvalidSerialNumber(format!("{serial}: {e}")))?;

    let Some(first) = decoded.iter().position(|b| *b != 0) else {
        return Err(X509Error::InvalidSerialNumber(format!(
            "{serial}: must be positive"
        )));
    };

    let mut bytes = decoded[first..].to_vec();
    if bytes[0] & 0x80 != 0 {
        bytes.insert(0, 0x00);
    }

    if bytes.len() > MAX_SERIAL_OCTETS {
        return Err(X509Error::InvalidSerialNumber(format!(
            "{serial}: longer than {MAX_SERIAL_OCTETS} octets"
        )));
    }

    Integer::try_from_signed_bytes(&bytes, rasn::Codec::Der)
        .map_err(|e| X509Error::InvalidSerialNumber(format!("{serial}: {e}")))
}
