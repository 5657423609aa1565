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
    io,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use clap::Parser;
use mcnl_identity::did_web::WELL_KNOWN_PATH;
use serde_json::json;

use crate::settings::Settings;

const DEFAULT_PORT: u16 = 3000;

/// Serves `<root>/.well-known/did.json` so a did:web DID on localhost can
/// be resolved while testing.
#[derive(Debug, Parser)]
pub struct Serve {
    /// Port to listen on [default: 3000].
    #[clap(short, long, env = "MCNL_DID_PORT")]
    pub port: Option<u16>,

    /// Directory containing .well-known/did.json [default: current directory].
    #[clap(long, env = "MCNL_DID_ROOT")]
    pub root: Option<PathBuf>,

    /// Address to bind to.
    #[clap(long, default_value = "127.0.0.1")]
    pub host: IpAddr,
}

impl Serve {
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        let port = self.port.or(settings.server.port).unwrap_or(DEFAULT_PORT);
        let root = self
            .root
            .clone()
            .or_else(|| settings.server.root.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to start the async runtime")?;

        runtime.block_on(run(SocketAddr::new(self.host, port), root))
    }
}

async fn run(addr: SocketAddr, root: PathBuf) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to listen on {addr}"))?;

    println!("Server running at http://{addr}");
    println!("DID document available at http://{addr}{WELL_KNOWN_PATH}");
    log::info!("serving DID document from {}", root.display());

    axum::serve(listener, router(root))
        .await
        .context("Server stopped unexpectedly")
}

/// Routes of the DID document server, rooted at `root`.
pub fn router(root: PathBuf) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route(WELL_KNOWN_PATH, get(did_document))
        .with_state(Arc::new(root))
}

async fn liveness() -> &'static str {
    "Server is running. Try /.well-known/did.json"
}

async fn did_document(State(root): State<Arc<PathBuf>>) -> Response {
    let path = root.join(".well-known").join("did.json");
    log::debug!("looking for DID document at {}", path.display());

    match tokio::fs::read_to_string(&path).await {
        Ok(body) => {
            log::info!("served {}", path.display());
            (
                [
                    (header::CONTENT_TYPE, "application/json"),
                    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                ],
                body,
            )
                .into_response()
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::warn!("DID document not found at {}", path.display());
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "DID document not found",
                    "path": path.display().to_string(),
                })),
            )
                .into_response()
        }
        Err(err) => {
            log::warn!("error reading {}: {err}", path.display());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error reading DID document" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::{fs, path::Path};

    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    async fn request(root: &Path, uri: &str) -> Response {
        router(root.to_path_buf())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn liveness_message() {
        let dir = tempfile::tempdir().unwrap();
        let response = request(dir.path(), "/").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_text(response).await,
            "Server is running. Try /.well-known/did.json"
        );
    }

    #[tokio::test]
    async fn serves_document_with_cors() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".well-known")).unwrap();
        fs::write(
            dir.path().join(".well-known/did.json"),
            r#"{"id":"did:web:localhost%3A3000"}"#,
        )
        .unwrap();

        let response = request(dir.path(), "/.well-known/did.json").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert_eq!(
            body_text(response).await,
            r#"{"id":"did:web:localhost%3A3000"}"#
        );
    }

    #[tokio::test]
    async fn missing_document_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let response = request(dir.path(), "/.well-known/did.json").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"], "DID document not found");
        assert!(json["path"].as_str().unwrap().ends_with("did.json"));
    }

    #[tokio::test]
    async fn unreadable_document_is_500() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".well-known/did.json")).unwrap();

        let response = request(dir.path(), "/.well-known/did.json").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Error reading DID document" }));
    }
}
