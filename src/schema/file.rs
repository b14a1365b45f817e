//! File schemas.

use serde_json::Value;

use crate::constraint::Bound;

use super::node::Schema;
use super::traits::{Bounded, Kind};
use super::SchemaKind;

/// Kind data of a file schema.
///
/// A file is an object with a string `name` and an unsigned byte `size`.
#[derive(Debug, Clone, Default)]
pub struct FileKind;

fn file_size(value: &Value) -> Option<u64> {
    let file = value.as_object()?;
    file.get("name")?.as_str()?;
    file.get("size")?.as_u64()
}

impl Kind for FileKind {
    fn schema_kind(&self) -> SchemaKind {
        SchemaKind::File
    }

    fn is_type(&self, value: &Value) -> bool {
        file_size(value).is_some()
    }

    fn measure(&self, value: &Value) -> Option<Bound> {
        file_size(value).map(Bound::Size)
    }
}

impl Bounded for FileKind {
    type Unit = u64;
}

/// A schema for file descriptors, bounded by byte size.
///
/// # Example
///
/// ```rust
/// use yop::{SchemaLike, Yop};
/// use serde_json::json;
///
/// let avatar = Yop::file().required().max(1024 * 1024);
///
/// assert!(avatar.validate(&json!({"name": "me.png", "size": 2048})).is_success());
/// assert!(avatar.validate(&json!({"name": "me.png", "size": 5_000_000})).is_failure());
/// assert!(avatar.validate(&json!("me.png")).is_failure());
/// ```
pub type FileSchema = Schema<FileKind>;

impl Schema<FileKind> {
    /// Creates a file schema.
    pub fn new() -> Self {
        Self::from_kind(FileKind)
    }
}

impl Default for Schema<FileKind> {
    fn default() -> Self {
        Self::new()
    }
}
