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

//! Employment credentials issued as JWT-encoded W3C Verifiable Credentials.
//!
//! A credential is produced in three forms:
//!
//! * the compact JWT (`credential-<employeeId>.jwt`), signed with ES256 over
//!   the issuer key;
//! * a JSON credential (`credential-<employeeId>.json`) that mirrors the JWT
//!   claims and embeds the JWT as a `JwtProof2020` proof;
//! * a short summary (`credential-summary.json`).

use chrono::{DateTime, SecondsFormat, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mcnl_crypto::KeyError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    did::DidBuf,
    did_doc::PRIMARY_KEY_FRAGMENT,
    jwk::{Jwk, JwkError},
    keys::IssuerKeys,
};

/// Credential validity: one year of 365 days.
pub const CREDENTIAL_LIFETIME_SECS: i64 = 365 * 24 * 60 * 60;

/// Base context of a W3C Verifiable Credential.
pub const CREDENTIALS_V1_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Types carried by every employment credential.
pub const EMPLOYMENT_CREDENTIAL_TYPES: [&str; 2] = ["VerifiableCredential", "EmploymentCredential"];

/// Proof type of the JSON credential form.
pub const JWT_PROOF_2020: &str = "JwtProof2020";

const SUMMARY_JWT_PREFIX_LEN: usize = 50;

/// Facts about the employee that end up in `credentialSubject`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialData {
    /// Employee name.
    pub name: String,

    /// Role or job title.
    pub role: String,

    /// Department.
    pub department: String,

    /// Employee identifier; also names the credential files.
    pub employee_id: String,

    /// Employing company, published as `employedBy`.
    pub company: String,

    /// Start date (`YYYY-MM-DD`).
    pub start_date: String,

    /// Subject DID. When absent, `did:example:employee<unix-millis>` is
    /// generated at issuance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_did: Option<String>,
}

impl Default for CredentialData {
    fn default() -> Self {
        Self {
            name: "John Doe".to_owned(),
            role: "Software Engineer".to_owned(),
            department: "Engineering".to_owned(),
            employee_id: "EMP001".to_owned(),
            company: "Your Company Inc".to_owned(),
            start_date: today(),
            subject_did: None,
        }
    }
}

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

impl CredentialData {
    /// Issue the credential now, signed by `keys` on behalf of `issuer_did`.
    pub fn issue(
        &self,
        issuer_did: &str,
        keys: &IssuerKeys,
    ) -> Result<IssuedCredential, CredentialError> {
        self.issue_at(issuer_did, keys, Utc::now())
    }

    /// Issue the credential as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        issuer_did: &str,
        keys: &IssuerKeys,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedCredential, CredentialError> {
        let issuer = DidBuf::new(issuer_did.trim().to_owned())
            .map_err(|e| CredentialError::InvalidIssuer(e.to_string()))?;

        let subject = match self.subject_did.as_deref().map(str::trim) {
            Some(did) if !did.is_empty() => did.to_owned(),
            _ => format!("did:example:employee{}", issued_at.timestamp_millis()),
        };

        let nbf = issued_at.timestamp();
        let claims = CredentialClaims {
            iss: issuer.to_string(),
            sub: subject.clone(),
            nbf,
            exp: nbf + CREDENTIAL_LIFETIME_SECS,
            vc: VcClaim {
                context: vec![CREDENTIALS_V1_CONTEXT.to_owned()],
                type_: EMPLOYMENT_CREDENTIAL_TYPES
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
                credential_subject: EmploymentSubject {
                    id: subject,
                    name: self.name.clone(),
                    employed_by: self.company.clone(),
                    role: self.role.clone(),
                    department: self.department.clone(),
                    employee_id: self.employee_id.clone(),
                    start_date: self.start_date.clone(),
                },
            },
        };

        log::debug!("signing employment credential for {}", claims.sub);
        let jwt = sign_claims(&claims, keys)?;

        let document = CredentialDocument::from_claims(&claims, &jwt)?;
        let summary = CredentialSummary::from_claims(&claims, &jwt, &self.company)?;

        Ok(IssuedCredential {
            jwt,
            claims,
            document,
            summary,
        })
    }
}

/// JWT claims set of an employment credential.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CredentialClaims {
    /// Issuer DID.
    pub iss: String,

    /// Subject DID.
    pub sub: String,

    /// Issue time, Unix seconds.
    pub nbf: i64,

    /// Expiry, `nbf` plus one year.
    pub exp: i64,

    /// The credential itself.
    pub vc: VcClaim,
}

/// The `vc` claim.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VcClaim {
    /// JSON-LD context.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// Credential types.
    #[serde(rename = "type")]
    pub type_: Vec<String>,

    /// Claims about the employee.
    pub credential_subject: EmploymentSubject,
}

/// `credentialSubject` of an employment credential.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct EmploymentSubject {
    pub id: String,
    pub name: String,
    pub employed_by: String,
    pub role: String,
    pub department: String,
    pub employee_id: String,
    pub start_date: String,
}

/// JSON form of the credential with the JWT embedded as its proof.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CredentialDocument {
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    #[serde(rename = "type")]
    pub type_: Vec<String>,

    pub issuer: String,
    pub issuance_date: String,
    pub expiration_date: String,
    pub credential_subject: EmploymentSubject,
    pub proof: JwtProof,
}

impl CredentialDocument {
    fn from_claims(claims: &CredentialClaims, jwt: &str) -> Result<Self, CredentialError> {
        Ok(Self {
            context: claims.vc.context.clone(),
            type_: claims.vc.type_.clone(),
            issuer: claims.iss.clone(),
            issuance_date: iso_timestamp(claims.nbf)?,
            expiration_date: iso_timestamp(claims.exp)?,
            credential_subject: claims.vc.credential_subject.clone(),
            proof: JwtProof {
                type_: JWT_PROOF_2020.to_owned(),
                jwt: jwt.to_owned(),
            },
        })
    }
}

/// A `JwtProof2020` proof block.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct JwtProof {
    #[serde(rename = "type")]
    pub type_: String,
    pub jwt: String,
}

/// Human-oriented overview written to `credential-summary.json`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CredentialSummary {
    pub format: String,

    /// First 50 characters of the JWT followed by `...`.
    pub jwt: String,

    pub issuer: String,
    pub subject: String,
    pub employee: EmployeeSummary,
    pub issued_at: String,
    pub expires_at: String,
    pub verification_method: String,
}

impl CredentialSummary {
    fn from_claims(
        claims: &CredentialClaims,
        jwt: &str,
        company: &str,
    ) -> Result<Self, CredentialError> {
        let prefix: String = jwt.chars().take(SUMMARY_JWT_PREFIX_LEN).collect();
        let subject = &claims.vc.credential_subject;

        Ok(Self {
            format: "JWT (JSON Web Token)".to_owned(),
            jwt: format!("{prefix}..."),
            issuer: claims.iss.clone(),
            subject: claims.sub.clone(),
            employee: EmployeeSummary {
                name: subject.name.clone(),
                role: subject.role.clone(),
                company: company.to_owned(),
                employee_id: subject.employee_id.clone(),
            },
            issued_at: iso_timestamp(claims.nbf)?,
            expires_at: iso_timestamp(claims.exp)?,
            verification_method: format!("{}#{PRIMARY_KEY_FRAGMENT}", claims.iss),
        })
    }
}

/// Employee section of [`CredentialSummary`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct EmployeeSummary {
    pub name: String,
    pub role: String,
    pub company: String,
    pub employee_id: String,
}

/// Result of [`CredentialData::issue`].
#[derive(Clone, Debug)]
pub struct IssuedCredential {
    /// Compact JWT.
    pub jwt: String,

    /// Claims signed into the JWT.
    pub claims: CredentialClaims,

    /// JSON credential with `JwtProof2020` proof.
    pub document: CredentialDocument,

    /// Summary document.
    pub summary: CredentialSummary,
}

impl IssuedCredential {
    /// File name stem shared by the `.jwt` and `.json` outputs.
    pub fn file_stem(&self) -> String {
        let employee_id = &self.claims.vc.credential_subject.employee_id;
        if employee_id.is_empty() {
            format!("credential-{}", self.claims.nbf * 1000)
        } else {
            format!("credential-{employee_id}")
        }
    }
}

/// Verify an ES256 credential JWT against the issuer's public JWK and
/// return its claims.
///
/// The signature, `exp` and `nbf` are checked. Nothing is resolved over the
/// network; the caller chooses which key to trust.
pub fn verify_jwt(jwt: &str, issuer_key: &Jwk) -> Result<CredentialClaims, CredentialError> {
    let params = issuer_key.p256_params()?;
    let x = String::from(&params.x_coordinate);
    let y = String::from(&params.y_coordinate);

    let key = DecodingKey::from_ec_components(&x, &y)
        .map_err(|e| CredentialError::Verification(e.to_string()))?;

    let mut validation = Validation::new(Algorithm::ES256);
    validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
    validation.validate_nbf = true;

    let token = jsonwebtoken::decode::<CredentialClaims>(jwt, &key, &validation)
        .map_err(|e| CredentialError::Verification(e.to_string()))?;

    Ok(token.claims)
}

fn sign_claims(claims: &CredentialClaims, keys: &IssuerKeys) -> Result<String, CredentialError> {
    let der = keys.key_pair().to_pkcs8_der()?;
    let key = EncodingKey::from_ec_der(&der);

    let header = Header::new(Algorithm::ES256);

    jsonwebtoken::encode(&header, claims, &key).map_err(|e| CredentialError::Signing(e.to_string()))
}

fn iso_timestamp(unix_secs: i64) -> Result<String, CredentialError> {
    DateTime::<Utc>::from_timestamp(unix_secs, 0)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or_else(|| CredentialError::InvalidTimestamp(unix_secs))
}

/// Describes errors that can occur when issuing or verifying credentials.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum CredentialError {
    /// The issuer is not a DID.
    #[error("invalid issuer DID: {0}")]
    InvalidIssuer(String),

    /// The issuer key could not be used.
    #[error(transparent)]
    KeyError(#[from] KeyError),

    /// The issuer JWK could not be used.
    #[error(transparent)]
    JwkError(#[from] JwkError),

    /// JWT signing failed.
    #[error("unable to sign credential: {0}")]
    Signing(String),

    /// The JWT did not verify.
    #[error("credential verification failed: {0}")]
    Verification(String),

    /// A credential timestamp is out of range.
    #[error("timestamp out of range: {0}")]
    InvalidTimestamp(i64),
}
