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

#![allow(clippy::unwrap_used)]

mod common;

use std::{error::Error, str::FromStr};

use assert_cmd::prelude::*;
use mcnl_identity::{
    credential::{verify_jwt, CREDENTIAL_LIFETIME_SECS},
    DidDocument, Jwk,
};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

use crate::common::{cmd, read};

#[test]
fn generate_writes_keys_did_and_credential() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    cmd()
        .args(["did", "generate", "--no-interactive"])
        .args(["--domain", "localhost:3000"])
        .args(["--name", "Alice Example", "--employee-id", "E7"])
        .args(["--company", "Acme", "--start-date", "2024-05-01"])
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "http://localhost:3000/.well-known/did.json",
        ));

    for name in [
        "private-key.pem",
        "public-key.pem",
        "public-key.jwk",
        "private-key.hex",
        "did.json",
        "credential-E7.jwt",
        "credential-E7.json",
        "credential-summary.json",
    ] {
        assert!(dir.path().join(name).is_file(), "{name} missing");
    }

    let document = DidDocument::from_json(&read(dir.path(), "did.json"))?;
    assert_eq!(document.id.as_str(), "did:web:localhost%3A3000");

    let jwk = Jwk::from_str(&read(dir.path(), "public-key.jwk"))?;
    let claims = verify_jwt(read(dir.path(), "credential-E7.jwt").trim(), &jwk)?;
    assert_eq!(claims.iss, "did:web:localhost%3A3000");
    assert_eq!(claims.exp - claims.nbf, CREDENTIAL_LIFETIME_SECS);
    assert_eq!(claims.vc.credential_subject.name, "Alice Example");
    assert_eq!(claims.vc.credential_subject.employed_by, "Acme");
    assert_eq!(claims.vc.credential_subject.role, "Software Engineer");
    assert!(claims.sub.starts_with("did:example:employee"));

    let json: Value = serde_json::from_str(&read(dir.path(), "credential-E7.json"))?;
    assert_eq!(json["proof"]["type"], "JwtProof2020");
    assert_eq!(json["credentialSubject"]["startDate"], "2024-05-01");

    let summary: Value = serde_json::from_str(&read(dir.path(), "credential-summary.json"))?;
    assert_eq!(summary["employee"]["employeeId"], "E7");
    assert_eq!(
        summary["verificationMethod"],
        "did:web:localhost%3A3000#key-1"
    );

    Ok(())
}

#[test]
fn generate_requires_domain() {
    let dir = tempdir().unwrap();

    cmd()
        .args(["did", "generate", "--no-interactive"])
        .arg("--output")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Domain is required! Use --domain flag or run in interactive mode.",
        ));

    assert!(!dir.path().join("private-key.pem").exists());
}

#[test]
fn keys_then_did_then_credential() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let keys_dir = dir.path().join("keys");
    let did_dir = dir.path().join("did");
    let credential_dir = dir.path().join("credential");

    cmd()
        .args(["did", "keys", "--no-interactive"])
        .arg("--output")
        .arg(&keys_dir)
        .assert()
        .success();

    let hex = read(&keys_dir, "private-key.hex");
    assert_eq!(hex.trim().len(), 64);

    cmd()
        .args(["did", "did", "--no-interactive", "--domain", "example.com"])
        .arg("--key-file")
        .arg(keys_dir.join("public-key.jwk"))
        .arg("--output")
        .arg(&did_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://example.com/.well-known/did.json",
        ));

    let document = DidDocument::from_json(&read(&did_dir, "did.json"))?;
    assert_eq!(document.id.as_str(), "did:web:example.com");

    cmd()
        .args(["did", "credential", "--no-interactive", "--did", "did:web:example.com"])
        .args(["--subject-did", "did:example:alice"])
        .arg("--key-file")
        .arg(keys_dir.join("private-key.hex"))
        .arg("--output")
        .arg(&credential_dir)
        .assert()
        .success();

    let method = document
        .find_verification_method("#key-1")
        .and_then(|m| m.public_key_jwk.clone())
        .unwrap();
    let claims = verify_jwt(read(&credential_dir, "credential-EMP001.jwt").trim(), &method)?;
    assert_eq!(claims.sub, "did:example:alice");
    assert_eq!(claims.vc.credential_subject.name, "John Doe");
    assert_eq!(claims.vc.credential_subject.employed_by, "Your Company Inc");

    Ok(())
}

#[test]
fn did_requires_key_file() {
    cmd()
        .args(["did", "did", "--no-interactive", "--domain", "example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Key file is required! Use --key-file flag or run in interactive mode.",
        ));
}

#[test]
fn credential_requires_issuer() {
    cmd()
        .args(["did", "credential", "--no-interactive", "--key-file", "private-key.hex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Issuer DID is required! Use --did flag or run in interactive mode.",
        ));
}

#[test]
fn credential_rejects_bad_key() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let key_file = dir.path().join("private-key.hex");
    std::fs::write(&key_file, "not hex")?;

    cmd()
        .args(["did", "credential", "--no-interactive", "--did", "did:web:example.com"])
        .arg("--key-file")
        .arg(&key_file)
        .arg("--output")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid private key"));

    Ok(())
}

#[test]
fn settings_supply_credential_defaults() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let settings = dir.path().join("settings.toml");
    std::fs::write(
        &settings,
        "[credential]\ncompany = \"Configured Inc\"\nemployee_id = \"CFG1\"\n",
    )?;

    cmd()
        .args(["did", "generate", "--no-interactive", "--domain", "example.org"])
        .arg("--settings")
        .arg(&settings)
        .arg("--output")
        .arg(dir.path().join("out"))
        .assert()
        .success();

    let out = dir.path().join("out");
    let jwk = Jwk::from_str(&read(&out, "public-key.jwk"))?;
    let claims = verify_jwt(read(&out, "credential-CFG1.jwt").trim(), &jwk)?;
    assert_eq!(claims.vc.credential_subject.employed_by, "Configured Inc");

    Ok(())
}
