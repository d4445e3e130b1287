//! Property-based tests for SyncVec using proptest
//!
//! Operation sequences drawn with indices both inside and outside the current
//! length are applied to a `SyncVec` and to a plain `Vec` model. The checked
//! operations must succeed exactly when the model accepts the index and must
//! leave the sequence untouched otherwise.

use super::*;
use crate::lock::{Exclusive, LockPolicy, ReadWrite};
use crate::Error;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum VecOp {
    Append(i16),
    Insert(usize, i16),
    Replace(usize, i16),
    Get(usize),
    Delete(usize),
    Position(i16),
    Empty,
}

fn vec_op() -> impl Strategy<Value = VecOp> {
    // Indices up to 40 regularly exceed the length of the sequences built here
    prop_oneof![
        4 => any::<i16>().prop_map(VecOp::Append),
        2 => (0..40usize, any::<i16>()).prop_map(|(i, v)| VecOp::Insert(i, v)),
        2 => (0..40usize, any::<i16>()).prop_map(|(i, v)| VecOp::Replace(i, v)),
        2 => (0..40usize).prop_map(VecOp::Get),
        2 => (0..40usize).prop_map(VecOp::Delete),
        1 => (-4i16..4).prop_map(VecOp::Position),
        1 => Just(VecOp::Empty),
    ]
}

fn run_against_model<P: LockPolicy>(ops: &[VecOp]) -> Result<(), TestCaseError> {
    let seq: SyncVec<i16, P> = SyncVec::default();
    let mut model: Vec<i16> = Vec::new();

    for op in ops {
        let len = model.len();
        match *op {
            VecOp::Append(v) => {
                seq.append(v);
                model.push(v);
                prop_assert_eq!(seq.get(model.len() - 1), v);
            }
            VecOp::Insert(i, v) => {
                if i <= len {
                    prop_assert_eq!(seq.try_insert(i, v), Ok(()));
                    model.insert(i, v);
                } else {
                    prop_assert_eq!(
                        seq.try_insert(i, v),
                        Err(Error::OutOfBounds { index: i, len })
                    );
                }
            }
            VecOp::Replace(i, v) => {
                if i < len {
                    prop_assert_eq!(seq.try_replace(i, v), Ok(model[i]));
                    model[i] = v;
                } else {
                    prop_assert!(seq.try_replace(i, v).is_err());
                }
            }
            VecOp::Get(i) => {
                prop_assert_eq!(seq.try_get(i), model.get(i).copied());
            }
            VecOp::Delete(i) => {
                if i < len {
                    let next = model.get(i + 1).copied();
                    prop_assert_eq!(seq.try_delete(i), Ok(model.remove(i)));
                    // The follower moved down into the vacated slot
                    prop_assert_eq!(seq.try_get(i), next);
                } else {
                    prop_assert!(seq.try_delete(i).is_err());
                }
            }
            VecOp::Position(target) => {
                let expected = model.iter().position(|&n| n % 4 == target);
                prop_assert_eq!(seq.position(|&n| n % 4 == target), expected);
            }
            VecOp::Empty => {
                seq.empty();
                model.clear();
            }
        }
        prop_assert_eq!(seq.len(), model.len());
    }

    prop_assert_eq!(seq.to_vec(), model);
    Ok(())
}

proptest! {
    #[test]
    fn test_matches_model_read_write(ops in prop::collection::vec(vec_op(), 0..200)) {
        run_against_model::<ReadWrite>(&ops)?;
    }

    #[test]
    fn test_matches_model_exclusive(ops in prop::collection::vec(vec_op(), 0..200)) {
        run_against_model::<Exclusive>(&ops)?;
    }

    #[test]
    fn test_try_get_rejects_every_index_past_len(
        values in prop::collection::vec(any::<u8>(), 0..32),
        offset in 0usize..1000,
    ) {
        let seq: SyncVec<u8> = SyncVec::from(values.clone());
        prop_assert_eq!(seq.try_get(values.len() + offset), None);
        prop_assert!(seq.try_delete(values.len() + offset).is_err());
        prop_assert_eq!(seq.to_vec(), values);
    }
}
