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

use std::{fmt, ops::Deref, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[allow(clippy::unwrap_used)]
static VALID_DID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^did:[a-z0-9]+:[A-Za-z0-9/.%#\?_:-]+$"#).unwrap());

/// Borrowed DID.
///
/// Use [`DidBuf`] for owned DIDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Did<'a>(&'a str);

impl<'a> Did<'a> {
    /// Converts the input `data` to a DID.
    ///
    /// Fails if the data is not a DID according to the
    /// [DID Syntax](https://w3c.github.io/did-core/#did-syntax).
    pub fn new(data: &'a str) -> Result<Self, InvalidDid> {
        if VALID_DID.is_match(data) {
            Ok(Self(data))
        } else {
            Err(InvalidDid(data.to_string()))
        }
    }

    /// Offset of the `:` just after the method name.
    fn method_name_separator_offset(&self) -> usize {
        // The method name cannot be empty, hence the search starts at 5.
        self.0[5..].find(':').map_or(self.0.len(), |offset| offset + 5)
    }

    /// Returns the DID method name.
    pub fn method_name(&self) -> &'a str {
        &self.0[4..self.method_name_separator_offset()]
    }

    /// Returns the DID method specific identifier.
    pub fn method_specific_id(&self) -> &'a str {
        &self.0[self.method_name_separator_offset() + 1..]
    }

    /// Splits off a `#fragment` qualifier, if any.
    pub fn split_fragment(self) -> (Self, Option<&'a str>) {
        match self.0.split_once('#') {
            Some((primary, fragment)) => (Self(primary), Some(fragment)),
            None => (self, None),
        }
    }

    /// Returns the DID as a string slice.
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl Deref for Did<'_> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl PartialEq<DidBuf> for Did<'_> {
    fn eq(&self, other: &DidBuf) -> bool {
        self == &other.as_did()
    }
}

impl fmt::Display for Did<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Owned DID.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DidBuf(String);

impl DidBuf {
    /// Converts the input `data` to an owned DID.
    pub fn new(data: String) -> Result<Self, InvalidDid> {
        if VALID_DID.is_match(&data) {
            Ok(Self(data))
        } else {
            Err(InvalidDid(data))
        }
    }

    /// Borrows this DID.
    pub fn as_did(&self) -> Did<'_> {
        Did(&self.0)
    }

    /// Returns the DID as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Appends a `#fragment` qualifier, as used for verification method ids.
    pub fn with_fragment(&self, fragment: &str) -> Self {
        Self(format!("{}#{fragment}", self.0))
    }
}

impl TryFrom<String> for DidBuf {
    type Error = InvalidDid;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DidBuf::new(value)
    }
}

impl FromStr for DidBuf {
    type Err = InvalidDid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.to_owned().try_into()
    }
}

impl From<DidBuf> for String {
    fn from(did: DidBuf) -> Self {
        did.0
    }
}

impl fmt::Display for DidBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for DidBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq<str> for DidBuf {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<'a> PartialEq<&'a str> for DidBuf {
    fn eq(&self, other: &&'a str) -> bool {
        self.as_str() == *other
    }
}

impl<'a> PartialEq<Did<'a>> for DidBuf {
    fn eq(&self, other: &Did<'a>) -> bool {
        &self.as_did() == other
    }
}

impl Serialize for DidBuf {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DidBuf {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;

        impl serde::de::Visitor<'_> for Visitor {
            type Value = DidBuf;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "a DID")
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.try_into().map_err(|e| E::custom(e))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_string(v.to_string())
            }
        }

        deserializer.deserialize_string(Visitor)
    }
}

/// Error raised when a conversion to a DID fails.
#[derive(Debug, Eq, Error, PartialEq)]
#[error("invalid DID `{0}`")]
pub struct InvalidDid(pub String);

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn valid_dids() {
        let did = Did::new("did:method:foo").unwrap();
        assert_eq!(did.method_name(), "method");
        assert_eq!(did.method_specific_id(), "foo");

        let did = Did::new("did:web:localhost%3A3000").unwrap();
        assert_eq!(did.method_name(), "web");
        assert_eq!(did.method_specific_id(), "localhost%3A3000");

        let did = Did::new("did:web:example.com:user:alice").unwrap();
        assert_eq!(did.method_specific_id(), "example.com:user:alice");
    }

    #[test]
    fn invalid_dids() {
        Did::new("http:a:b").unwrap_err();
        Did::new("did::b").unwrap_err();
        Did::new("did:a:").unwrap_err();
        Did::new("did:web:exa mple.com").unwrap_err();
    }

    #[test]
    fn fragment() {
        let did = Did::new("did:web:example.com#key-1").unwrap();
        let (primary, fragment) = did.split_fragment();

        assert_eq!(primary, Did::new("did:web:example.com").unwrap());
        assert_eq!(fragment, Some("key-1"));
    }

    #[test]
    fn with_fragment() {
        let did = DidBuf::new("did:web:example.com".to_owned()).unwrap();
        assert_eq!(did.with_fragment("key-1"), "did:web:example.com#key-1");
    }

    #[test]
    fn serde() {
        let did: DidBuf = serde_json::from_str(r#""did:example:employee1""#).unwrap();
        assert_eq!(did, "did:example:employee1");
        assert_eq!(serde_json::to_string(&did).unwrap(), r#""did:example:employee1""#);

        assert!(serde_json::from_str::<DidBuf>(r#""employee1""#).is_err());
    }
}
