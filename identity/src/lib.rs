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

#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![deny(warnings)]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod credential;
pub use credential::{
    CredentialClaims, CredentialData, CredentialDocument, CredentialError, CredentialSummary,
    IssuedCredential,
};

mod did;
pub use did::{Did, DidBuf, InvalidDid};

mod did_doc;
pub use did_doc::{DidDocument, DidVerificationMethod, ValueOrReference, VerificationRelationships};

pub mod did_web;

mod jwk;
pub use jwk::{Base64urlUInt, EcKeyType, EcParams, Jwk, JwkError, Params, P256_CURVE};

mod keys;
pub use keys::IssuerKeys;

#[cfg(test)]
pub(crate) mod tests;
