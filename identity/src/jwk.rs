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

use std::{collections::BTreeMap, fmt, str::FromStr};

use base64::Engine;
use mcnl_crypto::{EcKeyPair, KeyError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON Web Key ([RFC 7517]).
///
/// Only P-256 elliptic-curve keys can sign or verify. Other key types are
/// carried as opaque parameters so third-party documents still parse.
///
/// [RFC 7517]: https://www.rfc-editor.org/rfc/rfc7517
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Jwk {
    #[serde(rename = "use")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub public_key_use: Option<String>,

    #[serde(rename = "alg")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub algorithm: Option<String>,

    #[serde(rename = "kid")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub key_id: Option<String>,

    /// Key-type specific parameters.
    #[serde(flatten)]
    pub params: Params,
}

/// Key-type specific JWK parameters.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Params {
    /// Elliptic curve key (`"kty": "EC"`).
    Ec(EcParams),

    /// Any other key type (`OKP`, `RSA`, `oct`, ...), kept as raw members.
    Other(BTreeMap<String, serde_json::Value>),
}

/// Private members of the non-EC key types in [RFC 7518].
///
/// [RFC 7518]: https://www.rfc-editor.org/rfc/rfc7518#section-6
const PRIVATE_MEMBERS: [&str; 8] = ["d", "p", "q", "dp", "dq", "qi", "oth", "k"];

impl Params {
    /// Value of the `kty` member.
    pub fn key_type(&self) -> &str {
        match self {
            Self::Ec(_) => "EC",
            Self::Other(members) => members
                .get("kty")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default(),
        }
    }
}

/// The `kty` value of an elliptic curve JWK.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum EcKeyType {
    /// `EC`
    #[serde(rename = "EC")]
    Ec,
}

/// Parameters of an elliptic curve JWK.
#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
pub struct EcParams {
    /// Always `EC`.
    #[serde(rename = "kty")]
    pub key_type: EcKeyType,

    /// Curve name; only `P-256` is supported.
    #[serde(rename = "crv")]
    pub curve: String,

    /// Affine `x` coordinate.
    #[serde(rename = "x")]
    pub x_coordinate: Base64urlUInt,

    /// Affine `y` coordinate.
    #[serde(rename = "y")]
    pub y_coordinate: Base64urlUInt,

    /// Private scalar.
    #[serde(rename = "d")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecc_private_key: Option<Base64urlUInt>,
}

impl fmt::Debug for EcParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcParams")
            .field("curve", &self.curve)
            .field("x_coordinate", &self.x_coordinate)
            .field("y_coordinate", &self.y_coordinate)
            .finish_non_exhaustive()
    }
}

/// Name of the only curve these keys use.
pub const P256_CURVE: &str = "P-256";

impl Jwk {
    /// Public JWK for an ES256 key pair.
    pub fn from_key_pair(key_pair: &EcKeyPair) -> Result<Self, JwkError> {
        Ok(Self::from(Params::Ec(Self::ec_params(key_pair, None)?)))
    }

    /// Private JWK (with `d`) for an ES256 key pair.
    pub fn from_key_pair_with_private(key_pair: &EcKeyPair) -> Result<Self, JwkError> {
        let d = Base64urlUInt(key_pair.scalar_bytes());
        Ok(Self::from(Params::Ec(Self::ec_params(key_pair, Some(d))?)))
    }

    fn ec_params(key_pair: &EcKeyPair, d: Option<Base64urlUInt>) -> Result<EcParams, JwkError> {
        let (x, y) = key_pair.public_coordinates()?;

        Ok(EcParams {
            key_type: EcKeyType::Ec,
            curve: P256_CURVE.to_owned(),
            x_coordinate: Base64urlUInt(x),
            y_coordinate: Base64urlUInt(y),
            ecc_private_key: d,
        })
    }

    /// Strip private key material.
    pub fn to_public(&self) -> Self {
        let mut key = self.clone();
        match key.params {
            Params::Ec(ref mut params) => params.ecc_private_key = None,
            Params::Other(ref mut members) => {
                for member in PRIVATE_MEMBERS {
                    members.remove(member);
                }
            }
        }
        key
    }

    /// Return the P-256 parameters, rejecting any other key type or curve.
    pub fn p256_params(&self) -> Result<&EcParams, JwkError> {
        let params = match self.params {
            Params::Ec(ref params) => params,
            Params::Other(_) => {
                return Err(JwkError::KeyTypeNotImplemented(
                    self.params.key_type().to_owned(),
                ))
            }
        };

        if params.curve != P256_CURVE {
            return Err(JwkError::CurveNotImplemented(params.curve.clone()));
        }

        for coordinate in [&params.x_coordinate, &params.y_coordinate] {
            if coordinate.0.len() != 32 {
                return Err(JwkError::InvalidKeyLength(coordinate.0.len()));
            }
        }

        Ok(params)
    }

    /// Rebuild the key pair from the private `d` parameter.
    pub fn to_key_pair(&self) -> Result<EcKeyPair, JwkError> {
        let params = self.p256_params()?;
        let d = params
            .ecc_private_key
            .as_ref()
            .ok_or(JwkError::MissingPrivateKey)?;

        let key_pair = EcKeyPair::from_scalar_bytes(&d.0)?;
        let (x, y) = key_pair.public_coordinates()?;
        if x != params.x_coordinate.0 || y != params.y_coordinate.0 {
            return Err(JwkError::KeyMismatch);
        }

        Ok(key_pair)
    }

    /// Pretty-printed JSON, as written to `public-key.jwk`.
    pub fn to_json_pretty(&self) -> Result<String, JwkError> {
        serde_json::to_string_pretty(self).map_err(|e| JwkError::Json(e.to_string()))
    }
}

impl FromStr for Jwk {
    type Err = JwkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(|e| JwkError::Json(e.to_string()))
    }
}

impl fmt::Display for Jwk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json =
            serde_json::to_string_pretty(self).unwrap_or_else(|_| "unable to serialize".to_owned());
        f.write_str(&json)
    }
}

impl From<Params> for Jwk {
    fn from(params: Params) -> Self {
        Self {
            params,
            public_key_use: None,
            algorithm: None,
            key_id: None,
        }
    }
}

/// Unsigned integer bytes carried as unpadded base64url text.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Hash, Eq)]
#[serde(try_from = "String")]
#[serde(into = "Base64urlUIntString")]
pub struct Base64urlUInt(pub Vec<u8>);
type Base64urlUIntString = String;

const BASE64_URL_SAFE_INDIFFERENT_PAD: base64::engine::GeneralPurpose =
    base64::engine::GeneralPurpose::new(
        &base64::alphabet::URL_SAFE,
        base64::engine::GeneralPurposeConfig::new()
            .with_decode_padding_mode(base64::engine::DecodePaddingMode::Indifferent),
    );

impl TryFrom<String> for Base64urlUInt {
    type Error = base64::DecodeError;

    fn try_from(data: String) -> Result<Self, Self::Error> {
        Ok(Base64urlUInt(BASE64_URL_SAFE_INDIFFERENT_PAD.decode(data)?))
    }
}

impl From<&Base64urlUInt> for String {
    fn from(data: &Base64urlUInt) -> String {
        base64::prelude::BASE64_URL_SAFE_NO_PAD.encode(&data.0)
    }
}

impl From<Base64urlUInt> for Base64urlUIntString {
    fn from(data: Base64urlUInt) -> Base64urlUIntString {
        String::from(&data)
    }
}

/// Describes errors that can occur when building or using a JWK.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum JwkError {
    /// Key type not implemented.
    #[error("key type not implemented: '{0}'")]
    KeyTypeNotImplemented(String),

    /// Curve not implemented.
    #[error("curve not implemented: '{0}'")]
    CurveNotImplemented(String),

    /// Missing private key parameter in JWK.
    #[error("missing private key parameter in JWK")]
    MissingPrivateKey,

    /// Invalid key length.
    #[error("invalid key length: {0}")]
    InvalidKeyLength(usize),

    /// The private parameter does not belong to the public coordinates.
    #[error("private key does not match the public key in JWK")]
    KeyMismatch,

    /// The JWK could not be parsed or serialized.
    #[error("invalid JWK JSON: {0}")]
    Json(String),

    /// Underlying key material was rejected.
    #[error(transparent)]
    KeyError(#[from] KeyError),
}
