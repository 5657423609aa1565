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

//! Object identifiers used by the certificate generator.
//!
//! Each value is the arc list of the OID; [`to_dotted`] renders it in the
//! familiar `1.2.3` form.

/// OID ecdsa-with-SHA256 (1.2.840.10045.4.3.2)
pub const ECDSA_WITH_SHA256: &[u32] = &[1, 2, 840, 10045, 4, 3, 2];

/// OID countryName (2.5.4.6)
pub const COUNTRY_NAME: &[u32] = &[2, 5, 4, 6];

/// OID stateOrProvinceName (2.5.4.8)
pub const STATE_OR_PROVINCE_NAME: &[u32] = &[2, 5, 4, 8];

/// OID organizationName (2.5.4.10)
pub const ORGANIZATION_NAME: &[u32] = &[2, 5, 4, 10];

/// OID organizationalUnitName (2.5.4.11)
pub const ORGANIZATIONAL_UNIT_NAME: &[u32] = &[2, 5, 4, 11];

/// OID commonName (2.5.4.3)
pub const COMMON_NAME: &[u32] = &[2, 5, 4, 3];

/// OID id-ce-subjectKeyIdentifier (2.5.29.14)
pub const SUBJECT_KEY_ID: &[u32] = &[2, 5, 29, 14];

/// OID id-ce-keyUsage (2.5.29.15)
pub const KEY_USAGE: &[u32] = &[2, 5, 29, 15];

/// OID id-ce-basicConstraints (2.5.29.19)
pub const BASIC_CONSTRAINTS: &[u32] = &[2, 5, 29, 19];

/// OID id-ce-authorityKeyIdentifier (2.5.29.35)
pub const AUTHORITY_KEY_ID: &[u32] = &[2, 5, 29, 35];

/// OID id-ce-extKeyUsage (2.5.29.37)
pub const EXT_KEY_USAGE: &[u32] = &[2, 5, 29, 37];

/// OID c2pa-kp-claimSigning (1.3.6.1.4.1.62558.2.1)
pub const EKU_C2PA_CLAIM_SIGNING: &[u32] = &[1, 3, 6, 1, 4, 1, 62558, 2, 1];

/// OID id-kp-emailProtection (1.3.6.1.5.5.7.3.4)
pub const EKU_EMAIL_PROTECTION: &[u32] = &[1, 3, 6, 1, 5, 5, 7, 3, 4];

/// OID id-kp-documentSigning (1.3.6.1.5.5.7.3.36)
pub const EKU_DOCUMENT_SIGNING: &[u32] = &[1, 3, 6, 1, 5, 5, 7, 3, 36];

/// Extended key usages placed on intermediate and leaf certificates.
///
/// emailProtection and documentSigning accompany the C2PA OID for validators
/// that predate it.
pub const SIGNING_EKUS: &[&[u32]] = &[
    EKU_C2PA_CLAIM_SIGNING,
    EKU_EMAIL_PROTECTION,
    EKU_DOCUMENT_SIGNING,
];

/// Render an OID arc list as a dotted string.
pub fn to_dotted(arcs: &[u32]) -> String {
    arcs.iter()
        .map(u32::to_string)
        .collect::<Vec<String>>()
        .join(".")
}
