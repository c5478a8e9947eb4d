//! Fetching graphs from the graph service.
//!
//! Each call is a single request with no retry. Responses are read as text
//! and interpreted by [`interpret_response`], so the status/body handling is
//! independent of the browser.

use std::fmt;

use gloo_net::http::Request;
use log::{debug, info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::error::{LoadError, Result};
use crate::graph::{GraphCatalogue, GraphFile, GraphPayload};

/// Where the graph service lives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiConfig {
	/// Prefix prepended to every endpoint; empty means same origin.
	pub base_url: String,
}

impl ApiConfig {
	pub fn load_file_url(&self) -> String {
		format!("{}/api/load-file", self.base_url)
	}

	/// `name` must already be encoded as a path segment.
	pub fn graph_url(&self, name: &str) -> String {
		format!("{}/api/graph/{}", self.base_url, name)
	}

	pub fn catalogue_url(&self) -> String {
		format!("{}/api/graphs", self.base_url)
	}
}

#[derive(Deserialize)]
struct ErrorBody {
	#[serde(default)]
	error: Option<String>,
}

/// Turn a response status and body into a value or a [`LoadError`].
///
/// Non-2xx responses carry the service's `error` message when the body has
/// one, and a generic message otherwise.
pub fn interpret_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
	if (200..300).contains(&status) {
		return serde_json::from_str(body).map_err(|e| LoadError::Malformed(e.to_string()));
	}

	let message = serde_json::from_str::<ErrorBody>(body)
		.ok()
		.and_then(|b| b.error)
		.filter(|m| !m.is_empty());
	Err(match message {
		Some(message) => LoadError::Service { status, message },
		None => LoadError::generic(status),
	})
}

fn js_error(err: JsValue) -> LoadError {
	LoadError::Network(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

async fn read<T: DeserializeOwned>(request: Request) -> Result<T> {
	let response = request
		.send()
		.await
		.map_err(|e| LoadError::Network(e.to_string()))?;
	let status = response.status();
	let body = response
		.text()
		.await
		.map_err(|e| LoadError::Network(e.to_string()))?;
	debug!("{} {} -> {}", request_label(&response.url()), status, body.len());
	interpret_response(status, &body)
}

fn request_label(url: &str) -> &str {
	url.rsplit_once("/api/").map_or(url, |(_, path)| path)
}

/// A chosen upload must be named and have content.
fn check_upload(name: &str, size: f64) -> Result<()> {
	if name.is_empty() || size <= 0.0 {
		return Err(LoadError::NoFile);
	}
	Ok(())
}

/// Upload `file` and return the graph the service parsed from it.
pub async fn load_from_file(config: &ApiConfig, file: File) -> Result<GraphPayload> {
	check_upload(&file.name(), file.size())?;
	let form = FormData::new().map_err(js_error)?;
	form.append_with_blob_and_filename("file", &file, &file.name())
		.map_err(js_error)?;

	let request = Request::post(&config.load_file_url())
		.body(form)
		.map_err(|e| LoadError::Network(e.to_string()))?;
	let payload: GraphPayload = read(request).await.inspect_err(|e| {
		warn!("loading {} failed: {}", file.name(), e);
	})?;
	info!(
		"loaded {} ({} nodes, {} edges)",
		payload.display_name(&file.name()),
		payload.nodes.len(),
		payload.edges.len()
	);
	Ok(payload)
}

/// Fetch a graph the service knows by name.
pub async fn load_by_name(config: &ApiConfig, name: &str) -> Result<GraphPayload> {
	let name = name.trim();
	if name.is_empty() {
		return Err(LoadError::EmptyName);
	}
	let segment = String::from(js_sys::encode_uri_component(name));
	let request = Request::get(&config.graph_url(&segment))
		.build()
		.map_err(|e| LoadError::Network(e.to_string()))?;
	let payload: GraphPayload = read(request).await.inspect_err(|e| {
		warn!("loading graph {} failed: {}", name, e);
	})?;
	info!(
		"loaded {} ({} nodes, {} edges)",
		payload.display_name(name),
		payload.nodes.len(),
		payload.edges.len()
	);
	Ok(payload)
}

/// List the graph files the service can serve by name.
pub async fn list_graphs(config: &ApiConfig) -> Result<Vec<GraphFile>> {
	let request = Request::get(&config.catalogue_url())
		.build()
		.map_err(|e| LoadError::Network(e.to_string()))?;
	let catalogue: GraphCatalogue = read(request).await?;
	Ok(catalogue.graphs)
}

/// The human readable status line shown above the graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
	#[default]
	Idle,
	Loading(String),
	Loaded {
		name: String,
		nodes: usize,
		edges: usize,
	},
	Failed(String),
}

impl LoadStatus {
	pub fn is_error(&self) -> bool {
		matches!(self, Self::Failed(_))
	}
}

impl fmt::Display for LoadStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Idle => f.write_str("Choose a graph or upload a file"),
			Self::Loading(source) => write!(f, "Loading {source}…"),
			Self::Loaded { name, nodes, edges } => {
				write!(f, "Loaded {name}: {nodes} nodes, {edges} edges")
			}
			Self::Failed(message) => write!(f, "Error: {message}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_success_body_parses_payload() {
		let payload: GraphPayload = interpret_response(
			200,
			r#"{"nodes": [{"id": "n1", "type": "action"}], "edges": [], "stats": {"total_nodes": 1, "total_edges": 0, "node_types": {"action": 1}}}"#,
		)
		.expect("2xx with a graph body is a success");
		assert_eq!(payload.nodes.len(), 1);
	}

	#[test]
	fn test_service_error_message_is_verbatim() {
		let err = interpret_response::<GraphPayload>(400, r#"{"error":"bad file"}"#)
			.expect_err("4xx is a failure");
		assert_eq!(
			err,
			LoadError::Service {
				status: 400,
				message: "bad file".into()
			}
		);
		assert_eq!(err.to_string(), "bad file");
	}

	#[test]
	fn test_failure_without_message_is_generic() {
		for body in ["", "not json", "{}", r#"{"error": ""}"#, r#"{"detail": "x"}"#] {
			let err = interpret_response::<GraphPayload>(404, body).expect_err("404 is a failure");
			assert_eq!(err, LoadError::generic(404));
		}
	}

	#[test]
	fn test_upload_needs_name_and_content() {
		assert_eq!(check_upload("", 120.0), Err(LoadError::NoFile));
		assert_eq!(check_upload("flow.yaml", 0.0), Err(LoadError::NoFile));
		assert_eq!(check_upload("flow.yaml", 120.0), Ok(()));
	}

	#[test]
	fn test_malformed_success_body() {
		let err = interpret_response::<GraphPayload>(200, r#"{"nodes": 7}"#)
			.expect_err("nodes must be a list");
		assert!(matches!(err, LoadError::Malformed(_)));
	}

	#[test]
	fn test_catalogue_parses() {
		let catalogue: GraphCatalogue = interpret_response(
			200,
			r#"{"graphs": [{"path": "graphs/a.yaml", "name": "a.yaml", "format": "yaml"}]}"#,
		)
		.expect("catalogue should parse");
		assert_eq!(catalogue.graphs[0].name, "a.yaml");
	}

	#[test]
	fn test_urls() {
		let config = ApiConfig::default();
		assert_eq!(config.load_file_url(), "/api/load-file");
		assert_eq!(config.graph_url("flow"), "/api/graph/flow");

		let remote = ApiConfig {
			base_url: "http://localhost:5000".into(),
		};
		assert_eq!(remote.catalogue_url(), "http://localhost:5000/api/graphs");
	}

	#[test]
	fn test_request_label_strips_origin() {
		assert_eq!(request_label("http://h/api/graph/x"), "graph/x");
		assert_eq!(request_label("other"), "other");
	}

	#[test]
	fn test_status_lines() {
		assert_eq!(LoadStatus::Loading("flow".into()).to_string(), "Loading flow…");
		assert_eq!(
			LoadStatus::Loaded {
				name: "flow".into(),
				nodes: 2,
				edges: 1
			}
			.to_string(),
			"Loaded flow: 2 nodes, 1 edges"
		);
		let failed = LoadStatus::Failed("bad file".into());
		assert!(failed.is_error());
		assert!(failed.to_string().contains("bad file"));
	}
}
