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

use std::{borrow::Cow, collections::BTreeMap};

use serde::{Deserialize, Serialize};

use super::{
    did::DidBuf,
    did_web::{self, DidWebError},
    jwk::Jwk,
};

/// JSON-LD contexts of a DID document with `JsonWebKey2020` keys.
pub const DID_CONTEXTS: [&str; 2] = [
    "https://www.w3.org/ns/did/v1",
    "https://w3id.org/security/suites/jws-2020/v1",
];

/// Verification method type for JWK-described keys.
pub const JSON_WEB_KEY_2020: &str = "JsonWebKey2020";

/// Fragment of the single verification method written for a web DID.
pub const PRIMARY_KEY_FRAGMENT: &str = "key-1";

/// A [DID document]
///
/// [DID document]: https://www.w3.org/TR/did-core/#dfn-did-documents
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    /// JSON-LD context.
    #[serde(rename = "@context", default, skip_serializing_if = "Context::is_empty")]
    pub context: Context,

    /// DID subject identifier.
    ///
    /// See: <https://www.w3.org/TR/did-core/#did-subject>
    pub id: DidBuf,

    /// [`verificationMethod`](https://www.w3.org/TR/did-core/#dfn-verificationmethod) property of a
    /// DID document.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verification_method: Vec<DidVerificationMethod>,

    /// Verification relationships.
    ///
    /// See: <https://www.w3.org/TR/did-core/#verification-relationships>
    #[serde(flatten)]
    pub verification_relationships: VerificationRelationships,

    /// Additional properties of a DID document.
    #[serde(flatten)]
    pub property_set: BTreeMap<String, serde_json::Value>,
}

impl DidDocument {
    /// Construct a DID document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build the `did:web` document for `domain` with `jwk` as its only
    /// verification method, referenced for authentication and assertion.
    pub fn for_web_domain(domain: &str, jwk: &Jwk) -> Result<Self, DidWebError> {
        let did = did_web::did_from_domain(domain)?;
        let key_id = did.with_fragment(PRIMARY_KEY_FRAGMENT);

        log::debug!("building DID document for {did}");

        Ok(Self {
            context: Context::Many(DID_CONTEXTS.iter().map(|c| c.to_string()).collect()),
            verification_method: vec![DidVerificationMethod {
                id: key_id.to_string(),
                type_: JSON_WEB_KEY_2020.to_owned(),
                controller: did.clone(),
                public_key_jwk: Some(jwk.to_public()),
                properties: BTreeMap::new(),
            }],
            verification_relationships: VerificationRelationships {
                authentication: vec![ValueOrReference::Reference(key_id.to_string())],
                assertion_method: vec![ValueOrReference::Reference(key_id.to_string())],
                ..Default::default()
            },
            id: did,
            property_set: BTreeMap::new(),
        })
    }

    /// Find a verification method by its full DID URL or by a relative
    /// `#fragment` reference. Relative ids on either side resolve against
    /// the document id.
    pub fn find_verification_method(&self, id: &str) -> Option<&DidVerificationMethod> {
        let wanted = self.resolve_reference(id);
        self.verification_method
            .iter()
            .find(|vm| self.resolve_reference(&vm.id) == wanted)
    }

    /// Expand a relative `#fragment` reference into an absolute DID URL.
    pub fn resolve_reference<'a>(&self, reference: &'a str) -> Cow<'a, str> {
        if reference.starts_with('#') {
            Cow::Owned(format!("{}{reference}", self.id))
        } else {
            Cow::Borrowed(reference)
        }
    }

    /// Pretty-printed JSON, as written to `did.json`.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// `@context` value: a single IRI or a list of them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Context {
    /// A single context IRI.
    One(String),

    /// An ordered list of context IRIs.
    Many(Vec<String>),

    /// Any other JSON-LD context value, such as embedded context objects.
    Other(serde_json::Value),
}

impl Context {
    fn is_empty(&self) -> bool {
        matches!(self, Self::Many(contexts) if contexts.is_empty())
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

/// Verification relationships of a DID document.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRelationships {
    /// [`authentication`](https://www.w3.org/TR/did-core/#dfn-authentication) property of a DID
    /// document.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authentication: Vec<ValueOrReference>,

    /// [`assertionMethod`](https://www.w3.org/TR/did-core/#dfn-assertionmethod) property of a
    /// DID document.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertion_method: Vec<ValueOrReference>,

    /// [`keyAgreement`](https://www.w3.org/TR/did-core/#dfn-keyagreement) property of a DID
    /// document.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_agreement: Vec<ValueOrReference>,

    /// [`capabilityInvocation`](https://www.w3.org/TR/did-core/#dfn-capabilityinvocation)
    /// property of a DID document.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capability_invocation: Vec<ValueOrReference>,

    /// [`capabilityDelegation`](https://www.w3.org/TR/did-core/#dfn-capabilitydelegation)
    /// property of a DID document.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capability_delegation: Vec<ValueOrReference>,
}

/// Reference to, or value of, a verification method.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ValueOrReference {
    /// Reference to a verification method, by absolute DID URL or by a
    /// relative reference such as `#key-1`.
    Reference(String),

    /// Embedded verification method.
    Value(DidVerificationMethod),
}

/// A DID document [verification method].
///
/// [verification method]: https://www.w3.org/TR/did-core/#verification-methods
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DidVerificationMethod {
    /// Verification method identifier: a DID URL, or a relative reference
    /// resolved against the document id.
    pub id: String,

    /// Type of verification method (e.g. `JsonWebKey2020`).
    #[serde(rename = "type")]
    pub type_: String,

    /// Verification method controller.
    pub controller: DidBuf,

    /// Public key as a JWK.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_jwk: Option<Jwk>,

    /// Verification method properties.
    #[serde(flatten)]
    pub properties: BTreeMap<String, serde_json::Value>,
}
