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

//! The [`did:web`](https://w3c-ccg.github.io/did-method-web/) method.
//!
//! A web DID names the host that serves its DID document. Ports are
//! percent-encoded (`localhost:3000` becomes `did:web:localhost%3A3000`) and
//! the document lives at `/.well-known/did.json` unless the DID carries a
//! path.

use super::did::{Did, DidBuf};

/// Describes errors that can occur when mapping between domains, web DIDs
/// and resolution URLs.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum DidWebError {
    /// The domain is empty or contains characters a DID cannot carry.
    #[error("invalid domain for a web DID: {0}")]
    InvalidDomain(String),

    /// The DID is not a well-formed `did:web` DID.
    #[error("invalid web DID: {0}")]
    InvalidWebDid(String),
}

/// Well-known path a web DID document is served from.
pub const WELL_KNOWN_PATH: &str = "/.well-known/did.json";

/// Build the `did:web` DID for a domain, percent-encoding any `:`.
pub fn did_from_domain(domain: &str) -> Result<DidBuf, DidWebError> {
    let domain = domain.trim();
    if domain.is_empty() || domain.contains('/') {
        return Err(DidWebError::InvalidDomain(domain.to_owned()));
    }

    let encoded = domain.replace(':', "%3A");

    DidBuf::new(format!("did:web:{encoded}"))
        .map_err(|_| DidWebError::InvalidDomain(domain.to_owned()))
}

/// Return the host (with any port decoded) a web DID resolves against.
pub fn host(did: &Did<'_>) -> Result<String, DidWebError> {
    let method_specific_id = web_method_specific_id(did)?;

    let domain_name = method_specific_id
        .split(':')
        .next()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| DidWebError::InvalidWebDid(did.to_string()))?;

    Ok(domain_name.replacen("%3A", ":", 1))
}

/// Return the URL a resolver fetches the DID document of `did` from.
pub fn resolution_url(did: &Did<'_>) -> Result<String, DidWebError> {
    to_url(web_method_specific_id(did)?)
}

fn web_method_specific_id<'a>(did: &Did<'a>) -> Result<&'a str, DidWebError> {
    let (did, _fragment) = did.split_fragment();
    if did.method_name() != "web" {
        return Err(DidWebError::InvalidWebDid(did.to_string()));
    }

    Ok(did.method_specific_id())
}

/// Map the method-specific part of a web DID to its document URL.
pub fn to_url(did: &str) -> Result<String, DidWebError> {
    let mut parts = did.split(':').peekable();
    let domain_name = parts
        .next()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| DidWebError::InvalidWebDid(did.to_owned()))?;

    let path = match parts.peek() {
        Some(_) => parts.collect::<Vec<&str>>().join("/"),
        None => ".well-known".to_string(),
    };

    // Use http for localhost, for testing purposes.
    let proto = if domain_name.starts_with("localhost") {
        "http"
    } else {
        "https"
    };

    Ok(format!(
        "{proto}://{}/{path}/did.json",
        domain_name.replacen("%3A", ":", 1)
    ))
}
