use crate::collection::Document;
use crate::common::constants::{DOC_ID, FIELD_SEPARATOR, POSITIONAL_MARKER};
use crate::common::Value;
use crate::errors::{ErrorKind, SedimentError, SedimentResult};
use crate::filter::Filter;
use crate::update::{UpdateOp, UpdateSpec};

// Array elements are probed for positional matches inside a scratch
// document under this key.
const PROBE_FIELD: &str = "element";

/// Applies an update specification to a document.
///
/// Returns a new document with every operator applied in order; the input is
/// untouched. `filter` is the filter that selected the document and is only
/// consulted to resolve positional markers in operator paths.
///
/// # Errors
///
/// A failing operator aborts the whole application. Any operator targeting
/// `_id` fails with [ErrorKind::InvalidOperation]. A positional path without
/// a usable filter condition fails with [ErrorKind::PositionalMatchRequired].
pub fn apply(
    doc: &Document,
    spec: &UpdateSpec,
    filter: Option<&Filter>,
) -> SedimentResult<Document> {
    let mut updated = doc.clone();
    for op in spec.ops() {
        let path = resolve_path(&updated, op.path(), filter)?;
        if path == DOC_ID || path.starts_with(&format!("{}{}", DOC_ID, FIELD_SEPARATOR)) {
            log::error!("update operator cannot modify {}", DOC_ID);
            return Err(SedimentError::new(
                "update operator cannot modify _id",
                ErrorKind::InvalidOperation,
            ));
        }
        apply_op(&mut updated, op, &path)?;
    }
    Ok(updated)
}

fn apply_op(doc: &mut Document, op: &UpdateOp, path: &str) -> SedimentResult<()> {
    match op {
        UpdateOp::Set { value, .. } => doc.put(path, value.clone()),
        UpdateOp::Unset { .. } => doc.remove(path),
        UpdateOp::Inc { delta, .. } => apply_inc(doc, path, delta),
        UpdateOp::Push { value, .. } => apply_push(doc, path, std::slice::from_ref(value)),
        UpdateOp::PushAll { values, .. } => apply_push(doc, path, values),
        UpdateOp::Pull { value, .. } => apply_pull(doc, path, std::slice::from_ref(value)),
        UpdateOp::PullAll { values, .. } => apply_pull(doc, path, values),
        UpdateOp::Pop { direction, .. } => apply_pop(doc, path, *direction),
    }
}

fn apply_inc(doc: &mut Document, path: &str, delta: &Value) -> SedimentResult<()> {
    if !delta.is_number() {
        log::error!("inc delta must be numeric, found {}", delta);
        return Err(SedimentError::new(
            "inc delta must be numeric",
            ErrorKind::InvalidArgument,
        ));
    }
    let incremented = match doc.lookup(path)? {
        None => delta.clone(),
        Some(current) => {
            if !current.is_number() {
                log::error!("cannot increment non-numeric field {}", path);
                return Err(SedimentError::new(
                    format!("cannot increment non-numeric field {}", path),
                    ErrorKind::TypeMismatch,
                ));
            }
            add_numeric(&current, delta).ok_or_else(|| {
                log::error!("inc on field {} overflows", path);
                SedimentError::new(
                    format!("inc on field {} overflows", path),
                    ErrorKind::InvalidArgument,
                )
            })?
        }
    };
    doc.put(path, incremented)
}

// Integer operands stay integral; any float operand promotes the result.
// Both operands are numeric here, so `None` means integer overflow.
fn add_numeric(current: &Value, delta: &Value) -> Option<Value> {
    match (current, delta) {
        (Value::F64(_), _) | (_, Value::F64(_)) => {
            Some(Value::F64(current.as_decimal()? + delta.as_decimal()?))
        }
        _ => {
            let sum = current.as_integer()?.checked_add(delta.as_integer()?)?;
            if matches!(current, Value::I32(_))
                && matches!(delta, Value::I32(_))
                && i32::try_from(sum).is_ok()
            {
                Some(Value::I32(sum as i32))
            } else {
                Some(Value::I64(sum))
            }
        }
    }
}

fn apply_push(doc: &mut Document, path: &str, values: &[Value]) -> SedimentResult<()> {
    let mut elements = match doc.lookup(path)? {
        None => Vec::new(),
        Some(Value::Array(elements)) => elements,
        Some(other) => {
            log::error!("cannot push to non-array field {}: {}", path, other);
            return Err(SedimentError::new(
                format!("cannot push to non-array field {}", path),
                ErrorKind::TypeMismatch,
            ));
        }
    };
    elements.extend(values.iter().cloned());
    doc.put(path, Value::Array(elements))
}

fn apply_pull(doc: &mut Document, path: &str, values: &[Value]) -> SedimentResult<()> {
    match doc.lookup(path)? {
        None => Ok(()),
        Some(Value::Array(mut elements)) => {
            elements.retain(|element| !values.contains(element));
            doc.put(path, Value::Array(elements))
        }
        Some(other) => {
            log::error!("cannot pull from non-array field {}: {}", path, other);
            Err(SedimentError::new(
                format!("cannot pull from non-array field {}", path),
                ErrorKind::TypeMismatch,
            ))
        }
    }
}

fn apply_pop(doc: &mut Document, path: &str, direction: i32) -> SedimentResult<()> {
    if direction == 0 {
        log::error!("pop direction must be non-zero");
        return Err(SedimentError::new(
            "pop direction must be non-zero",
            ErrorKind::InvalidArgument,
        ));
    }
    match doc.lookup(path)? {
        None => Ok(()),
        Some(Value::Array(mut elements)) => {
            if !elements.is_empty() {
                if direction < 0 {
                    elements.remove(0);
                } else {
                    elements.pop();
                }
            }
            doc.put(path, Value::Array(elements))
        }
        Some(other) => {
            log::error!("cannot pop from non-array field {}: {}", path, other);
            Err(SedimentError::new(
                format!("cannot pop from non-array field {}", path),
                ErrorKind::TypeMismatch,
            ))
        }
    }
}

/// Substitutes the positional marker in a path with the index of the first
/// array element matched by the originating filter's conditions on that
/// array field.
fn resolve_path(doc: &Document, path: &str, filter: Option<&Filter>) -> SedimentResult<String> {
    let segments: Vec<&str> = path.split(FIELD_SEPARATOR).collect();
    let marker_pos = match segments.iter().position(|s| *s == POSITIONAL_MARKER) {
        Some(pos) => pos,
        None => return Ok(path.to_string()),
    };
    if marker_pos == 0 {
        log::error!("positional marker cannot start a path: {}", path);
        return Err(SedimentError::new(
            "positional marker cannot start a path",
            ErrorKind::InvalidArgument,
        ));
    }
    if segments[marker_pos + 1..]
        .iter()
        .any(|s| *s == POSITIONAL_MARKER)
    {
        log::error!("path contains multiple positional markers: {}", path);
        return Err(SedimentError::new(
            "path contains multiple positional markers",
            ErrorKind::InvalidArgument,
        ));
    }

    let array_path = segments[..marker_pos].join(".");
    let index = resolve_positional_index(doc, &array_path, filter)?;

    let mut resolved: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
    resolved[marker_pos] = index.to_string();
    Ok(resolved.join("."))
}

fn resolve_positional_index(
    doc: &Document,
    array_path: &str,
    filter: Option<&Filter>,
) -> SedimentResult<usize> {
    let filter = filter.ok_or_else(|| positional_match_required(array_path))?;

    // conditions on the array field itself or on a path inside its elements
    let element_prefix = format!("{}{}", array_path, FIELD_SEPARATOR);
    let mut conditions = Vec::new();
    for leaf in filter.leaves() {
        let field = match leaf.field_name() {
            Some(field) => field,
            None => continue,
        };
        let probe_path = if field == array_path {
            PROBE_FIELD.to_string()
        } else if let Some(suffix) = field.strip_prefix(&element_prefix) {
            format!("{}{}{}", PROBE_FIELD, FIELD_SEPARATOR, suffix)
        } else {
            continue;
        };
        if let Some(rebased) = leaf.rebase(&probe_path) {
            conditions.push(rebased);
        }
    }
    if conditions.is_empty() {
        return Err(positional_match_required(array_path));
    }

    let elements = match doc.lookup(array_path)? {
        Some(Value::Array(elements)) => elements,
        Some(other) => {
            log::error!("positional path {} is not an array: {}", array_path, other);
            return Err(SedimentError::new(
                format!("positional path {} is not an array", array_path),
                ErrorKind::TypeMismatch,
            ));
        }
        None => return Err(positional_match_required(array_path)),
    };

    for (index, element) in elements.iter().enumerate() {
        let mut probe = Document::new();
        probe.put(PROBE_FIELD, element.clone())?;
        let mut matched = true;
        for condition in &conditions {
            if !condition.apply(&probe)? {
                matched = false;
                break;
            }
        }
        if matched {
            return Ok(index);
        }
    }
    Err(positional_match_required(array_path))
}

fn positional_match_required(array_path: &str) -> SedimentError {
    log::error!("no filter condition matched an element of {}", array_path);
    SedimentError::new(
        format!("no filter condition matched an element of {}", array_path),
        ErrorKind::PositionalMatchRequired,
    )
}
