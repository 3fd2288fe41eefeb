//! Request/response bodies and the validation the HTTP layer is responsible
//! for (the core never sees malformed input).
use graph_core::EdgeInput;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct NodesRequest {
    pub nodes: Vec<NodeDto>,
}

#[derive(Debug, Deserialize)]
pub struct NodeDto {
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
}

/// A body-shape or field-content problem the request itself is guilty of.
#[derive(Debug)]
pub struct ValidationError(pub String);

impl NodesRequest {
    /// Checks every entry has a non-empty `id`, and converts into the
    /// core's edge representation. A missing or explicit-null `parent`
    /// denotes a root declaration.
    pub fn into_edges(self) -> Result<Vec<EdgeInput>, ValidationError> {
        self.nodes
            .into_iter()
            .map(|node| {
                if node.id.is_empty() {
                    return Err(ValidationError("node id must be a non-empty string".to_owned()));
                }
                if let Some(parent) = &node.parent {
                    if parent.is_empty() {
                        return Err(ValidationError(
                            "parent, when present, must be a non-empty string".to_owned(),
                        ));
                    }
                }
                Ok(EdgeInput::new(node.id, node.parent))
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct TreesResponse {
    pub trees: Vec<Vec<String>>,
}
