//! Field-level patch documents (`[{ "op": "replace", "path": "/name", "value": ... }]`)
//! applied to a resource's patch shape.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::validation::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Replace,
    Remove,
    Copy,
    Move,
    Test,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl PatchOperation {
    pub fn replace(path: &str, value: Value) -> Self {
        Self {
            op: PatchOp::Replace,
            path: path.to_string(),
            value,
            from: None,
        }
    }
}

/// The editable projection of an entity. Loaded from the entity, patched,
/// validated, then written back.
pub trait PatchDocument<E>: Serialize + DeserializeOwned + Validate + Send {
    fn from_entity(entity: &E) -> Self;
    fn apply_to(self, entity: &mut E);
}

/// Applies `ops` in order to a copy of `target`. Nothing is returned unless
/// every operation succeeds and the result still deserializes into `T`.
pub fn apply<T>(target: &T, ops: &[PatchOperation]) -> Result<T, Vec<FieldError>>
where
    T: Serialize + DeserializeOwned,
{
    let original = serde_json::to_value(target)
        .map_err(|e| vec![FieldError::new("", format!("Patch target is not serializable: {e}"))])?;
    let mut doc = original.clone();
    let mut touched: Vec<String> = Vec::new();

    for op in ops {
        let field = top_level_field(&op.path);
        apply_one(&mut doc, op).map_err(|message| vec![FieldError::new(&field, message)])?;
        if !touched.contains(&field) {
            touched.push(field);
        }
        if let (PatchOp::Move, Some(from)) = (op.op, &op.from) {
            let source = top_level_field(from);
            if !touched.contains(&source) {
                touched.push(source);
            }
        }
    }

    serde_json::from_value::<T>(doc.clone()).map_err(|e| blame::<T>(&original, &doc, &touched, e))
}

fn apply_one(doc: &mut Value, op: &PatchOperation) -> Result<(), String> {
    match op.op {
        PatchOp::Add | PatchOp::Replace => set(doc, &op.path, op.value.clone()),
        PatchOp::Remove => set(doc, &op.path, Value::Null),
        PatchOp::Copy => {
            let value = read(doc, op.from.as_deref())?;
            set(doc, &op.path, value)
        }
        PatchOp::Move => {
            let value = read(doc, op.from.as_deref())?;
            let from = op.from.as_deref().unwrap_or_default();
            set(doc, from, Value::Null)?;
            set(doc, &op.path, value)
        }
        PatchOp::Test => {
            let current = read(doc, Some(&op.path))?;
            if current == op.value {
                Ok(())
            } else {
                Err(format!("The current value at '{}' does not match the test value", op.path))
            }
        }
    }
}

fn read(doc: &Value, path: Option<&str>) -> Result<Value, String> {
    let path = path.ok_or_else(|| "The 'from' location is required".to_string())?;
    doc.pointer(&normalize(path))
        .cloned()
        .ok_or_else(|| format!("The target location specified by path segment '{path}' was not found"))
}

fn set(doc: &mut Value, path: &str, value: Value) -> Result<(), String> {
    let slot = doc
        .pointer_mut(&normalize(path))
        .filter(|_| !path.trim_matches('/').is_empty())
        .ok_or_else(|| format!("The target location specified by path segment '{path}' was not found"))?;
    *slot = value;
    Ok(())
}

fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn top_level_field(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
        .replace("~1", "/")
        .replace("~0", "~")
}

/// Finds the first touched field whose new value alone breaks deserialization.
fn blame<T: DeserializeOwned>(
    original: &Value,
    patched: &Value,
    touched: &[String],
    err: serde_json::Error,
) -> Vec<FieldError> {
    for field in touched {
        let mut probe = original.clone();
        if let (Some(slot), Some(value)) = (probe.get_mut(field), patched.get(field)) {
            *slot = value.clone();
        }
        if serde_json::from_value::<T>(probe).is_err() {
            return vec![FieldError::new(field, "The value is not valid for this field")];
        }
    }
    vec![FieldError::new("", err.to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Shape {
        name: String,
        nick_name: Option<String>,
        age: i32,
    }

    fn shape() -> Shape {
        Shape {
            name: "Keanu".into(),
            nick_name: None,
            age: 58,
        }
    }

    #[test]
    fn replace_changes_only_named_field() {
        let patched = apply(&shape(), &[PatchOperation::replace("/name", json!("Neo"))]).unwrap();
        assert_eq!(patched.name, "Neo");
        assert_eq!(patched.age, 58);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let errors = apply(&shape(), &[PatchOperation::replace("/height", json!(1))]).unwrap_err();
        assert_eq!(errors[0].field, "height");
    }

    #[test]
    fn wrong_type_is_blamed_on_field() {
        let ops = [
            PatchOperation::replace("/name", json!("Neo")),
            PatchOperation::replace("/age", json!("old")),
        ];
        let errors = apply(&shape(), &ops).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("age", "The value is not valid for this field")]);
    }

    #[test]
    fn remove_clears_optional_field() {
        let mut start = shape();
        start.nick_name = Some("John".into());
        let op = PatchOperation {
            op: PatchOp::Remove,
            path: "/nickName".into(),
            value: Value::Null,
            from: None,
        };
        let patched = apply(&start, &[op]).unwrap();
        assert_eq!(patched.nick_name, None);
    }

    #[test]
    fn copy_and_failed_test() {
        let copy = PatchOperation {
            op: PatchOp::Copy,
            path: "/nickName".into(),
            value: Value::Null,
            from: Some("/name".into()),
        };
        let patched = apply(&shape(), &[copy]).unwrap();
        assert_eq!(patched.nick_name.as_deref(), Some("Keanu"));

        let test = PatchOperation {
            op: PatchOp::Test,
            path: "/age".into(),
            value: json!(30),
            from: None,
        };
        assert!(apply(&shape(), &[test]).is_err());
    }

    #[test]
    fn root_path_is_rejected() {
        assert!(apply(&shape(), &[PatchOperation::replace("/", json!({}))]).is_err());
    }
}
