//! Python-style slicing over a parameter's ordered values.
//!
//! Always operates on the full declared list, never a previously-sliced
//! one (nested slicing is unsupported). `slice` replicates
//! `list[start:end:step]` exactly, including negative bounds clamping and
//! negative steps; `index` replicates `list[i]` including negative indices.

use subjekt_symbols::{index_out_of_bounds, zero_slice_step, EvalError, Value};

/// Clamp one slice bound into `[lower, upper]` after normalizing a negative
/// value against the list length.
fn adjust_bound(bound: i64, len: i64, lower: i64, upper: i64) -> i64 {
    let mut bound = bound;
    if bound < 0 {
        bound += len;
        if bound < lower {
            bound = lower;
        }
    } else if bound > upper {
        bound = upper;
    }
    bound
}

/// Materialize `values[start:end:step]` with Python semantics.
///
/// - `step == 0` is an error; negative steps walk backwards
/// - omitted `start` defaults to `0` (step > 0) or `len - 1` (step < 0)
/// - omitted `end` defaults to `len` (step > 0) or "through index 0"
///   (step < 0)
/// - negative bounds count from the end and clamp into range, never error
pub fn slice(
    values: &[Value],
    start: Option<i64>,
    end: Option<i64>,
    step: i64,
) -> Result<Vec<Value>, EvalError> {
    if step == 0 {
        return Err(zero_slice_step());
    }
    let len = i64::try_from(values.len()).unwrap_or(i64::MAX);

    // Bounds clamp to [0, len] walking forward, [-1, len - 1] walking
    // backward; omitted bounds take the walk's natural extremes.
    let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };
    let start = match start {
        Some(start) => adjust_bound(start, len, lower, upper),
        None if step > 0 => 0,
        None => len - 1,
    };
    let end = match end {
        Some(end) => adjust_bound(end, len, lower, upper),
        None if step > 0 => len,
        None => -1,
    };

    let mut out = Vec::new();
    let mut i = start;
    while (step > 0 && i < end) || (step < 0 && i > end) {
        if let Ok(index) = usize::try_from(i) {
            if let Some(value) = values.get(index) {
                out.push(value.clone());
            }
        }
        i += step;
    }
    Ok(out)
}

/// Single-subscript access with Python semantics: negative indices count
/// from the end; an index out of range after normalization is an error.
pub fn index(values: &[Value], i: i64) -> Result<Value, EvalError> {
    let len = i64::try_from(values.len()).unwrap_or(i64::MAX);
    let normalized = if i < 0 { i + len } else { i };
    usize::try_from(normalized)
        .ok()
        .and_then(|n| values.get(n))
        .cloned()
        .ok_or_else(|| index_out_of_bounds(i, values.len()))
}
