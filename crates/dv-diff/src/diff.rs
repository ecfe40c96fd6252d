//! Snapshot diffing: compute the ordered patch transforming one snapshot
//! into another.

use std::collections::BTreeMap;

use serde_json::Value;

use dv_kv::Snapshot;

use crate::error::{DiffError, DiffResult};
use crate::patch::Operation;

/// Compute the patch transforming `base` into `target`.
///
/// With no base (first sync, or the client's claimed base was not found)
/// the patch is a full bootstrap: `remove "/"` followed by one `add` per
/// target key. Otherwise it is the key-wise difference, all removals before
/// all additions, each group in key order; a changed value becomes a
/// `remove`/`add` pair. Equal checksums short-circuit to an empty patch.
///
/// Single merged walk over both ordered maps: linear in the number of
/// distinct keys, and deterministic — the same inputs always produce a
/// byte-identical patch.
pub fn diff(base: Option<&Snapshot>, target: &Snapshot) -> Vec<Operation> {
    let base = match base {
        Some(base) => base,
        None => return bootstrap(target),
    };
    if base.checksum() == target.checksum() {
        return Vec::new();
    }

    let mut removes = Vec::new();
    let mut adds = Vec::new();

    let mut base_iter = base.iter();
    let mut target_iter = target.iter();
    let mut base_entry = base_iter.next();
    let mut target_entry = target_iter.next();

    loop {
        match (base_entry, target_entry) {
            (Some((bk, _)), Some((tk, _))) if bk < tk => {
                removes.push(Operation::remove(bk));
                base_entry = base_iter.next();
            }
            (Some((bk, _)), Some((tk, tv))) if bk > tk => {
                adds.push(Operation::add(tk, tv.clone()));
                target_entry = target_iter.next();
            }
            (Some((key, bv)), Some((_, tv))) => {
                if bv != tv {
                    removes.push(Operation::remove(key));
                    adds.push(Operation::add(key, tv.clone()));
                }
                base_entry = base_iter.next();
                target_entry = target_iter.next();
            }
            (Some((bk, _)), None) => {
                removes.push(Operation::remove(bk));
                base_entry = base_iter.next();
            }
            (None, Some((tk, tv))) => {
                adds.push(Operation::add(tk, tv.clone()));
                target_entry = target_iter.next();
            }
            (None, None) => break,
        }
    }

    removes.extend(adds);
    removes
}

/// Full-replacement patch: clear everything, then add each target key.
fn bootstrap(target: &Snapshot) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(target.len() + 1);
    ops.push(Operation::remove_root());
    for (key, value) in target.iter() {
        ops.push(Operation::add(key, value.clone()));
    }
    ops
}

/// Apply a patch to a snapshot, producing the patched snapshot.
///
/// This is the client-side interpretation of a patch, used to verify order
/// correctness: `apply(base, diff(base, target))` is checksum-equal to
/// `target`.
pub fn apply(base: &Snapshot, patch: &[Operation]) -> DiffResult<Snapshot> {
    let mut entries: BTreeMap<String, Value> = base.entries().clone();
    for op in patch {
        if !op.path.starts_with('/') {
            return Err(DiffError::InvalidPath(op.path.clone()));
        }
        match (op.op, op.key()) {
            (crate::patch::OpKind::Remove, None) => entries.clear(),
            (crate::patch::OpKind::Remove, Some(key)) => {
                if entries.remove(key).is_none() {
                    return Err(DiffError::MissingKey(key.to_string()));
                }
            }
            (crate::patch::OpKind::Add, None) => return Err(DiffError::AddAtRoot),
            (crate::patch::OpKind::Add, Some(key)) => {
                let value = op
                    .value
                    .clone()
                    .ok_or_else(|| DiffError::MissingValue(key.to_string()))?;
                entries.insert(key.to_string(), value);
            }
        }
    }
    Ok(Snapshot::new(entries))
}
