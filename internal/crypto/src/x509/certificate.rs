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

use pem::{EncodeConfig, LineEnding, Pem};
use rasn::types::OctetString;
use rasn_pkix::{AuthorityKeyIdentifier, ExtKeyUsageSyntax, Extension};
use x509_parser::{certificate::X509Certificate, parse_x509_certificate};

use crate::{
    hash::sha1,
    raw_signature::{EcdsaValidator, RawSignatureValidator},
    x509::{oids, CertificateSubject, X509Error},
    EcKeyPair,
};

const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// A parsed X.509 certificate.
///
/// The handle keeps the original DER bytes alongside the decoded structure so
/// that the certificate can act as an issuer for further signing.
#[derive(Clone)]
pub struct Certificate {
    der: Vec<u8>,
    inner: rasn_pkix::Certificate,
}

/// Decoded BasicConstraints extension.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BasicConstraintsInfo {
    /// `cA` flag.
    pub ca: bool,

    /// `pathLenConstraint`, if present.
    pub path_len_constraint: Option<u32>,

    /// Whether the extension is marked critical.
    pub critical: bool,
}

/// Decoded KeyUsage extension (only the bits the generator sets).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyUsageInfo {
    /// `digitalSignature` bit.
    pub digital_signature: bool,

    /// `keyCertSign` bit.
    pub key_cert_sign: bool,

    /// `cRLSign` bit.
    pub crl_sign: bool,

    /// Whether the extension is marked critical.
    pub critical: bool,
}

impl Certificate {
    /// Parse a DER-encoded certificate.
    pub fn from_der(der: &[u8]) -> Result<Self, X509Error> {
        let (rem, _) =
            parse_x509_certificate(der).map_err(|e| X509Error::InvalidCertificate(e.to_string()))?;

        if !rem.is_empty() {
            return Err(X509Error::InvalidCertificate(format!(
                "{} trailing bytes after certificate",
                rem.len()
            )));
        }

        let inner: rasn_pkix::Certificate =
            rasn::der::decode(der).map_err(|e| X509Error::InvalidCertificate(e.to_string()))?;

        Ok(Self {
            der: der.to_vec(),
            inner,
        })
    }

    /// Parse the first `CERTIFICATE` block of a PEM document.
    pub fn from_pem(pem_text: &str) -> Result<Self, X509Error> {
        let block = pem::parse(pem_text.trim()).map_err(|e| X509Error::InvalidPem(e.to_string()))?;

        if block.tag() != CERTIFICATE_LABEL {
            return Err(X509Error::InvalidPem(format!(
                "expected {CERTIFICATE_LABEL}, found {}",
                block.tag()
            )));
        }

        Self::from_der(block.contents())
    }

    /// Parse every `CERTIFICATE` block of a PEM document (e.g. `chain.pem`).
    pub fn chain_from_pem(pem_text: &str) -> Result<Vec<Self>, X509Error> {
        let blocks = pem::parse_many(pem_text).map_err(|e| X509Error::InvalidPem(e.to_string()))?;

        if blocks.is_empty() {
            return Err(X509Error::InvalidPem("no PEM blocks found".to_string()));
        }

        blocks
            .iter()
            .filter(|block| block.tag() == CERTIFICATE_LABEL)
            .map(|block| Self::from_der(block.contents()))
            .collect()
    }

    /// Return the DER encoding.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Return the PEM encoding (64-character lines, LF line endings).
    pub fn to_pem(&self) -> String {
        pem::encode_config(
            &Pem::new(CERTIFICATE_LABEL, self.der.clone()),
            EncodeConfig::new().set_line_ending(LineEnding::LF),
        )
    }

    fn parsed(&self) -> Result<X509Certificate<'_>, X509Error> {
        let (_, cert) = parse_x509_certificate(&self.der)
            .map_err(|e| X509Error::InvalidCertificate(e.to_string()))?;
        Ok(cert)
    }

    /// Return the subject fields.
    pub fn subject(&self) -> Result<CertificateSubject, X509Error> {
        CertificateSubject::from_x509_name(self.parsed()?.subject())
    }

    /// Return the issuer fields.
    pub fn issuer(&self) -> Result<CertificateSubject, X509Error> {
        CertificateSubject::from_x509_name(self.parsed()?.issuer())
    }

    /// Return the serial number as lowercase hex (e.g. `"01"`).
    pub fn serial_number(&self) -> Result<String, X509Error> {
        Ok(hex::encode(self.parsed()?.raw_serial()))
    }

    /// Return `true` if the issuer name equals the subject name.
    pub fn is_self_issued(&self) -> bool {
        self.inner.tbs_certificate.issuer == self.inner.tbs_certificate.subject
    }

    /// Return the DER-encoded `SubjectPublicKeyInfo`.
    pub fn public_key_spki_der(&self) -> Result<Vec<u8>, X509Error> {
        Ok(self.parsed()?.public_key().raw.to_vec())
    }

    /// Return `true` if `key_pair` holds the private key for this
    /// certificate's public key.
    pub fn matches_key(&self, key_pair: &EcKeyPair) -> Result<bool, X509Error> {
        Ok(self.public_key_spki_der()? == key_pair.public_key_spki_der()?)
    }

    /// Return the BasicConstraints extension, if present.
    pub fn basic_constraints(&self) -> Result<Option<BasicConstraintsInfo>, X509Error> {
        let cert = self.parsed()?;
        let bc = cert
            .basic_constraints()
            .map_err(|e| X509Error::InvalidCertificate(e.to_string()))?;

        Ok(bc.map(|ext| BasicConstraintsInfo {
            ca: ext.value.ca,
            path_len_constraint: ext.value.path_len_constraint,
            critical: ext.critical,
        }))
    }

    /// Return the KeyUsage extension, if present.
    pub fn key_usage(&self) -> Result<Option<KeyUsageInfo>, X509Error> {
        let cert = self.parsed()?;
        let ku = cert
            .key_usage()
            .map_err(|e| X509Error::InvalidCertificate(e.to_string()))?;

        Ok(ku.map(|ext| KeyUsageInfo {
            digital_signature: ext.value.digital_signature(),
            key_cert_sign: ext.value.key_cert_sign(),
            crl_sign: ext.value.crl_sign(),
            critical: ext.critical,
        }))
    }

    /// Return the extended key usage OIDs in dotted form.
    ///
    /// Returns an empty list when the extension is absent.
    pub fn extended_key_usage(&self) -> Result<Vec<String>, X509Error> {
        let Some(ext) = self.extension(oids::EXT_KEY_USAGE) else {
            return Ok(vec![]);
        };

        let ekus: ExtKeyUsageSyntax = rasn::der::decode(&ext.extn_value)
            .map_err(|e| X509Error::InvalidCertificate(e.to_string()))?;

        Ok(ekus
            .iter()
            .map(|oid| oid.iter().map(u32::to_string).collect::<Vec<_>>().join("."))
            .collect())
    }

    /// Return whether the extension with the given OID is critical, or `None`
    /// if the certificate does not carry it.
    pub fn is_extension_critical(&self, arcs: &[u32]) -> Option<bool> {
        self.extension(arcs).map(|ext| ext.critical)
    }

    /// Return the SubjectKeyIdentifier, if present.
    pub fn subject_key_identifier(&self) -> Result<Option<Vec<u8>>, X509Error> {
        let Some(ext) = self.extension(oids::SUBJECT_KEY_ID) else {
            return Ok(None);
        };

        let ski: OctetString = rasn::der::decode(&ext.extn_value)
            .map_err(|e| X509Error::InvalidCertificate(e.to_string()))?;

        Ok(Some(ski.to_vec()))
    }

    /// Return the key identifier of the AuthorityKeyIdentifier, if present.
    pub fn authority_key_identifier(&self) -> Result<Option<Vec<u8>>, X509Error> {
        let Some(ext) = self.extension(oids::AUTHORITY_KEY_ID) else {
            return Ok(None);
        };

        let aki: AuthorityKeyIdentifier = rasn::der::decode(&ext.extn_value)
            .map_err(|e| X509Error::InvalidCertificate(e.to_string()))?;

        Ok(aki.key_identifier.map(|id| id.to_vec()))
    }

    /// Key identifier that children of this certificate reference in their
    /// AuthorityKeyIdentifier.
    ///
    /// Uses the SubjectKeyIdentifier when present and otherwise the SHA-1 of
    /// the subject public key bits.
    pub(crate) fn key_identifier(&self) -> Result<Vec<u8>, X509Error> {
        if let Some(ski) = self.subject_key_identifier()? {
            return Ok(ski);
        }

        let cert = self.parsed()?;
        Ok(sha1(&cert.public_key().subject_public_key.data))
    }

    /// Check that this certificate was issued by `parent`: the issuer name
    /// must equal the parent's subject and the signature must verify with the
    /// parent's public key.
    ///
    /// This checks a single link and is not a path validator.
    pub fn verify_issued_by(&self, parent: &Certificate) -> Result<(), X509Error> {
        if self.inner.tbs_certificate.issuer != parent.inner.tbs_certificate.subject {
            return Err(X509Error::IssuerMismatch);
        }

        let cert = self.parsed()?;
        let alg = cert.signature_algorithm.algorithm.to_id_string();
        if alg != oids::to_dotted(oids::ECDSA_WITH_SHA256) {
            return Err(X509Error::UnsupportedAlgorithm);
        }

        let parent_spki = parent.public_key_spki_der()?;

        EcdsaValidator::Es256
            .validate(
                &cert.signature_value.data,
                cert.tbs_certificate.as_ref(),
                &parent_spki,
            )
            .map_err(X509Error::SignatureInvalid)
    }

    pub(crate) fn rasn(&self) -> &rasn_pkix::Certificate {
        &self.inner
    }

    pub(crate) fn extension(&self, arcs: &[u32]) -> Option<&Extension> {
        self.inner
            .tbs_certificate
            .extensions
            .as_ref()?
            .iter()
            .find(|ext| ext.extn_id.iter().copied().eq(arcs.iter().copied()))
    }
}

impl fmt::Debug for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = self
            .subject()
            .map(|s| s.to_string())
            .unwrap_or_else(|e| e.to_string());

        f.debug_struct("Certificate")
            .field("subject", &subject)
            .field("der_len", &self.der.len())
            .finish()
    }
}
