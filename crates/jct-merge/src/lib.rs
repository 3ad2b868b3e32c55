#![doc = include_str!("../README.md")]

use jct_value::{JsonObject, JsonValue};

/// Deep-merge `src` into `dest` in place.
///
/// When both `dest` and `src` are objects, each `(k, v)` in `src` either
/// recurses (if `dest[k]` is also an object) or replaces `dest[k]` with a
/// clone of `v`. When either side is not an object, `dest` is replaced
/// wholesale with a clone of `src` — a non-object value never merges
/// field-by-field with anything.
pub fn merge(dest: &mut JsonValue, src: &JsonValue) {
    if let (JsonValue::Object(dest_obj), JsonValue::Object(src_obj)) = (&mut *dest, src) {
        for (key, value) in src_obj.iter() {
            let recurse = dest_obj
                .get(key)
                .is_some_and(|existing| existing.is_object() && value.is_object());
            if recurse {
                merge(dest_obj.get_mut(key).expect("checked above"), value);
            } else {
                dest_obj.insert(key, value.clone());
            }
        }
    } else {
        *dest = src.clone();
    }
}

/// Structural diff of `modified` against `original`: an object containing
/// only the keys of `modified` whose values differ from `original`,
/// recursing into nested objects and omitting subtrees whose diff is
/// empty.
///
/// When either side is not an object, the result is a clone of `modified`
/// if the two values are structurally unequal, else an empty object.
#[must_use]
pub fn diff(modified: &JsonValue, original: &JsonValue) -> JsonValue {
    match (modified, original) {
        (JsonValue::Object(m), JsonValue::Object(o)) => {
            let mut result = JsonObject::new();
            for (key, mv) in m.iter() {
                match o.get(key) {
                    Some(ov) if mv.is_object() && ov.is_object() => {
                        let sub = diff(mv, ov);
                        let sub_is_empty = sub.as_object().is_some_and(JsonObject::is_empty);
                        if !sub_is_empty {
                            result.insert(key, sub);
                        }
                    }
                    Some(ov) => {
                        if mv != ov {
                            result.insert(key, mv.clone());
                        }
                    }
                    None => {
                        result.insert(key, mv.clone());
                    }
                }
            }
            JsonValue::Object(result)
        }
        _ => {
            if modified == original {
                JsonValue::object()
            } else {
                modified.clone()
            }
        }
    }
}
