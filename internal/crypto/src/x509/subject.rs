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

use rasn::types::{Any, ObjectIdentifier, PrintableString, SetOf};
use rasn_pkix::{AttributeTypeAndValue, Name, RelativeDistinguishedName};
use serde::{Deserialize, Serialize};
use x509_parser::x509::X509Name;

use crate::x509::{oids, X509Error};

/// Subject fields of a generated certificate.
///
/// Formats as a distinguished name in `C, ST, O, OU, CN` order, omitting
/// fields that are absent or blank:
///
/// ```
/// # use mcnl_crypto::x509::CertificateSubject;
/// let subject = CertificateSubject::new("Root")
///     .with_country("NL")
///     .with_organization("Acme");
///
/// assert_eq!(subject.distinguished_name().unwrap(), "C=NL, O=Acme, CN=Root");
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSubject {
    /// Two-letter country code (`C`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// State or province (`ST`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Organization (`O`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Organizational unit (`OU`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizational_unit: Option<String>,

    /// Common name (`CN`). Required.
    #[serde(default)]
    pub common_name: String,
}

impl CertificateSubject {
    /// Create a subject with only a common name.
    pub fn new<S: Into<String>>(common_name: S) -> Self {
        Self {
            common_name: common_name.into(),
            ..Default::default()
        }
    }

    /// Set the country (`C`).
    pub fn with_country<S: Into<String>>(mut self, country: S) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the state or province (`ST`).
    pub fn with_state<S: Into<String>>(mut self, state: S) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the organization (`O`).
    pub fn with_organization<S: Into<String>>(mut self, organization: S) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Set the organizational unit (`OU`).
    pub fn with_organizational_unit<S: Into<String>>(mut self, unit: S) -> Self {
        self.organizational_unit = Some(unit.into());
        self
    }

    /// Return a copy of this subject whose common name is `"<CN> - <suffix>"`.
    ///
    /// Used to derive the intermediate and leaf subjects of a chain from the
    /// root subject.
    pub fn with_common_name_suffix(&self, suffix: &str) -> Self {
        Self {
            common_name: format!("{} - {suffix}", self.common_name.trim()),
            ..self.clone()
        }
    }

    /// Format the distinguished name, failing if the common name is blank.
    pub fn distinguished_name(&self) -> Result<String, X509Error> {
        self.require_common_name()?;
        Ok(self.to_string())
    }

    pub(crate) fn require_common_name(&self) -> Result<(), X509Error> {
        if self.common_name.trim().is_empty() {
            Err(X509Error::MissingCommonName)
        } else {
            Ok(())
        }
    }

    fn attributes(&self) -> Vec<(&'static str, &'static [u32], &str)> {
        [
            ("C", oids::COUNTRY_NAME, self.country.as_deref()),
            ("ST", oids::STATE_OR_PROVINCE_NAME, self.state.as_deref()),
            ("O", oids::ORGANIZATION_NAME, self.organization.as_deref()),
            (
                "OU",
                oids::ORGANIZATIONAL_UNIT_NAME,
                self.organizational_unit.as_deref(),
            ),
            ("CN", oids::COMMON_NAME, Some(self.common_name.as_str())),
        ]
        .into_iter()
        .filter_map(|(label, oid, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (label, oid, v))
        })
        .collect()
    }

    /// Build the ASN.1 `Name` for this subject.
    pub(crate) fn to_name(&self) -> Result<Name, X509Error> {
        self.require_common_name()?;

        let rdns = self
            .attributes()
            .into_iter()
            .map(|(label, oid, value)| rdn_single(label, oid, value))
            .collect::<Result<Vec<RelativeDistinguishedName>, X509Error>>()?;

        Ok(Name::RdnSequence(rdns))
    }

    /// Read the subject fields back out of a parsed X.509 name.
    ///
    /// Attributes other than `C`, `ST`, `O`, `OU` and `CN` are ignored.
    pub(crate) fn from_x509_name(name: &X509Name<'_>) -> Result<Self, X509Error> {
        let mut subject = CertificateSubject::default();

        for attr in name.iter_attributes() {
            let value = attr
                .as_str()
                .map_err(|e| X509Error::InvalidCertificate(e.to_string()))?
                .to_string();

            let oid = attr.attr_type().to_id_string();
            if oid == oids::to_dotted(oids::COUNTRY_NAME) {
                subject.country = Some(value);
            } else if oid == oids::to_dotted(oids::STATE_OR_PROVINCE_NAME) {
                subject.state = Some(value);
            } else if oid == oids::to_dotted(oids::ORGANIZATION_NAME) {
                subject.organization = Some(value);
            } else if oid == oids::to_dotted(oids::ORGANIZATIONAL_UNIT_NAME) {
                subject.organizational_unit = Some(value);
            } else if oid == oids::to_dotted(oids::COMMON_NAME) {
                subject.common_name = value;
            } else {
                log::debug!("ignoring subject attribute {oid}");
            }
        }

        Ok(subject)
    }
}

impl fmt::Display for CertificateSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .attributes()
            .into_iter()
            .map(|(label, _, value)| format!("{label}={value}"))
            .collect();

        write!(f, "{}", parts.join(", "))
    }
}

pub(crate) fn oid(arcs: &[u32]) -> Result<ObjectIdentifier, X509Error> {
    ObjectIdentifier::new(arcs.to_vec())
        .ok_or_else(|| X509Error::InternalError(format!("invalid OID {}", oids::to_dotted(arcs))))
}

fn dn_attr(
    label: &'static str,
    arcs: &[u32],
    value: &str,
) -> Result<AttributeTypeAndValue, X509Error> {
    let invalid = |reason: String| X509Error::InvalidSubject {
        attribute: label,
        reason,
    };

    // countryName is a PrintableString; the remaining attributes are UTF8String.
    let value_der = if arcs == oids::COUNTRY_NAME {
        let ps =
            PrintableString::try_from(value.to_string()).map_err(|e| invalid(e.to_string()))?;
        rasn::der::encode(&ps)
    } else {
        rasn::der::encode(&value.to_string())
    }
    .map_err(|e| invalid(e.to_string()))?;

    Ok(AttributeTypeAndValue {
        r#type: oid(arcs)?,
        value: Any::new(value_der),
    })
}

fn rdn_single(
    label: &'static str,
    arcs: &[u32],
    value: &str,
) -> Result<RelativeDistinguishedName, X509Error> {
    let mut set = SetOf::new();
    set.insert(dn_attr(label, arcs, value)?);
    Ok(RelativeDistinguishedName::from(set))
}
