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

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use mcnl_identity::{
    credential::today, did_web, CredentialData, DidDocument, IssuedCredential, IssuerKeys, Jwk,
};

use crate::{
    commands::OutputArgs,
    output::{save, DID_GENERATOR},
    prompt::Prompter,
    settings::{CredentialDefaults, Settings},
};

/// Employee facts written into the credential.
#[derive(Clone, Debug, Default, Args)]
pub struct CredentialArgs {
    /// Employee name.
    #[clap(short, long)]
    pub name: Option<String>,

    /// Employee role or job title.
    #[clap(short, long)]
    pub role: Option<String>,

    /// Employee department.
    #[clap(long)]
    pub department: Option<String>,

    /// Employee ID.
    #[clap(short, long)]
    pub employee_id: Option<String>,

    /// Company name.
    #[clap(short, long)]
    pub company: Option<String>,

    /// Start date (YYYY-MM-DD). Defaults to today.
    #[clap(short, long)]
    pub start_date: Option<String>,

    /// Subject DID. Generated when not provided.
    #[clap(long)]
    pub subject_did: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Did {
    /// Generate keys, a DID document and an employment credential.
    Generate {
        /// Domain for the DID (e.g. yourcompany.com or localhost:3000).
        #[clap(short, long)]
        domain: Option<String>,

        #[clap(flatten)]
        credential: CredentialArgs,

        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Generate only an ES256 key pair.
    Keys {
        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Generate a DID document from an existing public key.
    Did {
        /// Domain for the DID.
        #[clap(short, long)]
        domain: Option<String>,

        /// Path to the public-key.jwk file.
        #[clap(short, long)]
        key_file: Option<PathBuf>,

        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Issue a credential with an existing DID and private key.
    Credential {
        /// Issuer DID.
        #[clap(long)]
        did: Option<String>,

        /// Path to the private-key.hex file.
        #[clap(short, long)]
        key_file: Option<PathBuf>,

        #[clap(flatten)]
        credential: CredentialArgs,

        #[clap(flatten)]
        output: OutputArgs,
    },
}

const DOMAIN_QUESTION: &str = "Enter your domain (e.g., yourcompany.com or localhost:3000): ";
const DOMAIN_REQUIRED: &str = "Domain is required! Use --domain flag or run in interactive mode.";
const KEY_FILE_REQUIRED: &str =
    "Key file is required! Use --key-file flag or run in interactive mode.";

impl Did {
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        match self {
            Did::Generate {
                domain,
                credential,
                output,
            } => {
                let prompter = output.prompter();
                let Some(domain) = prompter.value(domain.clone(), DOMAIN_QUESTION, None)? else {
                    bail!(DOMAIN_REQUIRED);
                };

                let dir = output.directory(DID_GENERATOR)?;
                let keys = generate_keys(&dir)?;
                let document = write_did_document(&domain, &keys.public_jwk()?, &dir)?;

                println!("\nNow let's create an employment credential");
                let data = collect_credential_data(&prompter, credential, &settings.credential)?;
                let issued = issue_credential(document.id.as_str(), &data, &keys, &dir)?;

                println!("\nComplete! All files have been generated in {}", dir.display());
                print_deployment_hints(&document)?;
                log::info!("issued {} for {}", issued.file_stem(), issued.claims.sub);
            }

            Did::Keys { output } => {
                let dir = output.directory_or_ask(DID_GENERATOR)?;
                generate_keys(&dir)?;
                println!("Keys generated successfully in {}", dir.display());
            }

            Did::Did {
                domain,
                key_file,
                output,
            } => {
                let prompter = output.prompter();
                let domain = prompter.value(domain.clone(), DOMAIN_QUESTION, None)?;
                let key_file = prompter.value(
                    key_file.as_ref().map(|p| p.display().to_string()),
                    "Enter path to public-key.jwk file: ",
                    None,
                )?;

                let Some(domain) = domain else {
                    bail!(DOMAIN_REQUIRED);
                };
                let Some(key_file) = key_file else {
                    bail!(KEY_FILE_REQUIRED);
                };

                let dir = output.directory_or_ask(DID_GENERATOR)?;
                let jwk_text = fs::read_to_string(&key_file)
                    .with_context(|| format!("Failed to read public key {key_file}"))?;
                let jwk = Jwk::from_str(&jwk_text)
                    .with_context(|| format!("Invalid JWK in {key_file}"))?;

                let document = write_did_document(&domain, &jwk, &dir)?;
                print_deployment_hints(&document)?;
                println!("DID document generated successfully in {}", dir.display());
            }

            Did::Credential {
                did,
                key_file,
                credential,
                output,
            } => {
                let prompter = output.prompter();
                let did = prompter.value(
                    did.clone(),
                    "Enter issuer DID (e.g., did:web:example.com): ",
                    None,
                )?;
                let key_file = prompter.value(
                    key_file.as_ref().map(|p| p.display().to_string()),
                    "Enter path to private-key.hex file: ",
                    None,
                )?;

                let Some(did) = did else {
                    bail!("Issuer DID is required! Use --did flag or run in interactive mode.");
                };
                let Some(key_file) = key_file else {
                    bail!(KEY_FILE_REQUIRED);
                };

                let dir = output.directory_or_ask(DID_GENERATOR)?;
                let key_hex = fs::read_to_string(&key_file)
                    .with_context(|| format!("Failed to read private key {key_file}"))?;
                let keys = IssuerKeys::from_private_key_hex(&key_hex)
                    .with_context(|| format!("Invalid private key in {key_file}"))?;

                let data = collect_credential_data(&prompter, credential, &settings.credential)?;
                issue_credential(&did, &data, &keys, &dir)?;
                println!("Credential issued successfully in {}", dir.display());
            }
        }

        Ok(())
    }
}

fn generate_keys(dir: &Path) -> Result<IssuerKeys> {
    println!("Generating ES256 (P-256) key pair...");
    let keys = IssuerKeys::generate();

    save(dir, "private-key.pem", keys.private_key_pem()?)?;
    save(dir, "public-key.pem", keys.public_key_pem()?)?;
    save(dir, "public-key.jwk", keys.public_jwk()?.to_json_pretty()?)?;
    save(dir, "private-key.hex", keys.private_key_hex())?;

    Ok(keys)
}

fn write_did_document(domain: &str, jwk: &Jwk, dir: &Path) -> Result<DidDocument> {
    let document = DidDocument::for_web_domain(domain.trim(), jwk)?;
    println!("Creating DID: {}", document.id);

    save(dir, "did.json", document.to_json_pretty()?)?;
    Ok(document)
}

fn issue_credential(
    issuer_did: &str,
    data: &CredentialData,
    keys: &IssuerKeys,
    dir: &Path,
) -> Result<IssuedCredential> {
    println!("Issuing employment credential...");
    let issued = data.issue(issuer_did, keys)?;
    let stem = issued.file_stem();

    save(dir, &format!("{stem}.jwt"), &issued.jwt)?;
    save(dir, &format!("{stem}.json"), serde_json::to_string_pretty(&issued.document)?)?;
    save(dir, "credential-summary.json", serde_json::to_string_pretty(&issued.summary)?)?;

    Ok(issued)
}

/// Resolve employee fields: flag, then settings, then the built-in
/// defaults. Prompts offer the settings or built-in value as the default.
fn collect_credential_data(
    prompter: &Prompter,
    args: &CredentialArgs,
    defaults: &CredentialDefaults,
) -> Result<CredentialData> {
    let builtin = CredentialData::default();

    let field = |supplied: &Option<String>,
                     question: &str,
                     configured: &Option<String>,
                     fallback: &str|
     -> Result<String> {
        let default = configured.as_deref().unwrap_or(fallback);
        Ok(prompter
            .value(supplied.clone(), question, Some(default))?
            .unwrap_or_else(|| default.to_owned()))
    };

    let name = field(&args.name, "Employee name: ", &defaults.name, &builtin.name)?;
    let role = field(&args.role, "Role/Job title: ", &defaults.role, &builtin.role)?;
    let department = field(
        &args.department,
        "Department: ",
        &defaults.department,
        &builtin.department,
    )?;
    let employee_id = field(
        &args.employee_id,
        "Employee ID: ",
        &defaults.employee_id,
        &builtin.employee_id,
    )?;
    let company = field(&args.company, "Company name: ", &defaults.company, &builtin.company)?;
    let start_date = field(&args.start_date, "Start date (YYYY-MM-DD): ", &None, &today())?;

    let subject_did = prompter.value(
        args.subject_did.clone(),
        "Employee DID (optional, press Enter to auto-generate): ",
        None,
    )?;

    Ok(CredentialData {
        name,
        role,
        department,
        employee_id,
        company,
        start_date,
        subject_did,
    })
}

fn print_deployment_hints(document: &DidDocument) -> Result<()> {
    let url = did_web::resolution_url(&document.id.as_did())?;

    println!("\nNext steps:");
    println!("   1. Upload did.json to: {url}");
    println!("   2. Serve it with these headers:");
    println!("      Access-Control-Allow-Origin: *");
    println!("      Content-Type: application/json");
    println!("   3. Test DID resolution: curl {url}");
    Ok(())
}
