use crate::error::DecodeError;
use crate::store::FlatStore;
use crate::value::Value;

pub const NODES_FIELD: &str = "nodes";
pub const DATA_FIELD: &str = "data";

/// Parsed `__data.json` document: `{"nodes": [...]}`.
///
/// Each node corresponds to one server loader of the page; the node that
/// carries the endpoint's data depends on which loaders ran, hence the
/// configurable node index.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Value>,
}

impl Document {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let raw: serde_json::Value = serde_json::from_slice(bytes)?;
        Self::from_value(Value::from(raw))
    }

    pub fn from_value(root: Value) -> Result<Self, DecodeError> {
        let mut root = match root {
            Value::Dict(root) => root,
            other => {
                return Err(DecodeError::structural(
                    "$",
                    format!("document root is {}, expected dict", other.kind()),
                ));
            }
        };
        match root.remove(NODES_FIELD) {
            Some(Value::List(nodes)) => Ok(Self { nodes }),
            Some(other) => Err(DecodeError::structural(
                NODES_FIELD,
                format!("expected list, found {}", other.kind()),
            )),
            None => Err(DecodeError::structural(NODES_FIELD, "missing")),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Take `nodes[node_index].data` as the document's flat store.
    pub fn into_store(mut self, node_index: usize) -> Result<FlatStore, DecodeError> {
        if node_index >= self.nodes.len() {
            return Err(DecodeError::structural(
                NODES_FIELD,
                format!(
                    "expected at least {} nodes, found {}",
                    node_index + 1,
                    self.nodes.len()
                ),
            ));
        }

        let node_path = format!("{NODES_FIELD}[{node_index}]");
        let Value::Dict(mut node) = std::mem::take(&mut self.nodes[node_index]) else {
            return Err(DecodeError::structural(node_path, "node is not a dict"));
        };

        let data_path = format!("{node_path}.{DATA_FIELD}");
        match node.remove(DATA_FIELD) {
            Some(Value::List(values)) => Ok(FlatStore::new(values, data_path)),
            Some(other) => Err(DecodeError::structural(
                data_path,
                format!("expected list, found {}", other.kind()),
            )),
            None => Err(DecodeError::structural(data_path, "missing")),
        }
    }
}

/// Parse `bytes` and extract the flat store at `node_index`.
pub fn load(bytes: &[u8], node_index: usize) -> Result<FlatStore, DecodeError> {
    Document::from_slice(bytes)?.into_store(node_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn extracts_data_of_the_configured_node() {
        let bytes = br#"{"type":"data","nodes":[{"type":"skip"},{"type":"data","data":[{"a":1},"x"]}]}"#;
        let store = load(bytes, 1).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.origin(), "nodes[1].data");
    }

    #[test]
    fn too_few_nodes() {
        let err = load(br#"{"nodes":[{}, {}]}"#, 2).unwrap_err();
        assert_eq!(err.to_string(), "nodes: expected at least 3 nodes, found 2");
    }

    #[test]
    fn node_without_data_names_the_path() {
        let err = load(br#"{"nodes":[null, null, {"type":"skip"}]}"#, 2).unwrap_err();
        assert_eq!(err.path(), Some("nodes[2].data"));
        let err = load(br#"{"nodes":[null, 5]}"#, 1).unwrap_err();
        assert_eq!(err.path(), Some("nodes[1]"));
    }

    #[test]
    fn data_must_be_a_list() {
        let err = load(br#"{"nodes":[null, {"data": {"a": 1}}]}"#, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.to_string(), "nodes[1].data: expected list, found dict");
    }

    #[test]
    fn missing_nodes_and_bad_json() {
        assert_eq!(load(br#"{"type":"redirect"}"#, 1).unwrap_err().path(), Some("nodes"));
        assert_eq!(load(br#"[1, 2]"#, 1).unwrap_err().path(), Some("$"));
        assert_eq!(load(b"<html>", 1).unwrap_err().kind(), ErrorKind::Json);
    }
}
