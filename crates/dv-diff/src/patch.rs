use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The path addressing the whole snapshot.
pub const ROOT_PATH: &str = "/";

/// The kind of a patch operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    /// Set the value at `path`.
    Add,
    /// Delete the value at `path`; at `/` this clears the whole snapshot.
    Remove,
}

/// One step of a patch.
///
/// Wire form matches the JSON-patch subset the protocol speaks:
/// `{"op":"add","path":"/foo","value":"bar"}` /
/// `{"op":"remove","path":"/foo"}`. A value change is expressed as a
/// `remove` followed by an `add` at the same path; there is no `replace`
/// op.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// The operation kind.
    pub op: OpKind,
    /// `/` for the root, otherwise `/` followed by the key verbatim.
    pub path: String,
    /// The value to add. Absent for removes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Operation {
    /// An `add` of `value` at the path for `key`.
    pub fn add(key: &str, value: Value) -> Self {
        Self {
            op: OpKind::Add,
            path: key_path(key),
            value: Some(value),
        }
    }

    /// A `remove` at the path for `key`.
    pub fn remove(key: &str) -> Self {
        Self {
            op: OpKind::Remove,
            path: key_path(key),
            value: None,
        }
    }

    /// The `remove "/"` clearing the whole snapshot.
    pub fn remove_root() -> Self {
        Self {
            op: OpKind::Remove,
            path: ROOT_PATH.to_string(),
            value: None,
        }
    }

    /// Returns `true` if this operation addresses the root.
    pub fn is_root(&self) -> bool {
        self.path == ROOT_PATH
    }

    /// The key this operation addresses, or `None` for the root.
    pub fn key(&self) -> Option<&str> {
        if self.is_root() {
            None
        } else {
            self.path.strip_prefix('/')
        }
    }
}

/// Path for a key: `/` followed by the key verbatim.
///
/// Keys are not JSON-pointer escaped; the protocol treats everything after
/// the leading slash as the key.
fn key_path(key: &str) -> String {
    format!("/{key}")
}
