//! Error types for graph loading and node lookup.

use thiserror::Error;

/// A graph could not be loaded. The previously rendered graph is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
	#[error("No graph name given")]
	EmptyName,
	#[error("No file selected")]
	NoFile,
	#[error("Network error: {0}")]
	Network(String),
	/// The service answered with a non-2xx status. `message` is the
	/// service-supplied text when present.
	#[error("{message}")]
	Service { status: u16, message: String },
	#[error("Malformed graph data: {0}")]
	Malformed(String),
}

impl LoadError {
	/// Message used when a failing response carries no `error` field.
	pub fn generic(status: u16) -> Self {
		Self::Service {
			status,
			message: format!("Request failed with status {status}"),
		}
	}
}

/// A click referenced a node that is not in the current visual model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
	#[error("Unknown node: {0}")]
	UnknownNode(String),
}

/// Result type alias for load operations
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_service_error_is_verbatim() {
		let err = LoadError::Service {
			status: 400,
			message: "bad file".into(),
		};
		assert_eq!(err.to_string(), "bad file");
	}

	#[test]
	fn test_generic_message_names_status() {
		assert_eq!(
			LoadError::generic(502).to_string(),
			"Request failed with status 502"
		);
	}

	#[test]
	fn test_lookup_error_display() {
		let err = LookupError::UnknownNode("n9".into());
		assert_eq!(err.to_string(), "Unknown node: n9");
	}
}
