//! Deep merge of JSON records.

use serde_json::map::Entry;
use serde_json::Value;

/// Merge `patch` into `target`.
///
/// When both sides hold an object the keys are merged recursively, with the
/// patch winning on conflicts. In every other case (scalars, arrays, `null`,
/// or an object replacing a non-object) the patch value replaces the target
/// wholesale.
pub fn deep_merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.entry(key) {
                    Entry::Occupied(mut existing) => deep_merge(existing.get_mut(), value),
                    Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}
