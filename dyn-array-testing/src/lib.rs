#![cfg(test)]

use dyn_array::{DynArray, DynArrayError, dyn_array};
use proptest::prelude::*;
use std::{
    fmt,
    sync::{Arc, Mutex},
};
use tracing::{
    Event, Level, Metadata, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
    subscriber::with_default,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct SingleDrop(u8);

impl SingleDrop {
    pub const DEFAULT: Self = Self(0);
}

impl Drop for SingleDrop {
    fn drop(&mut self) {
        assert_eq!(self.0, 0);
        self.0 += 1;
    }
}

const ABCDE: [SingleDrop; 5] = [
    SingleDrop::DEFAULT,
    SingleDrop::DEFAULT,
    SingleDrop::DEFAULT,
    SingleDrop::DEFAULT,
    SingleDrop::DEFAULT,
];

#[test]
pub fn single_drop_through_pop_erase_and_drop() {
    let mut array: DynArray<_> = ABCDE.into_iter().collect();
    drop(array.pop_back());
    drop(array.erase(1));
    array.insert(0, SingleDrop::DEFAULT).unwrap();
    array.set(0, SingleDrop::DEFAULT).unwrap();
    array.clear();
    array.append_slice(&ABCDE).unwrap();
    let cloned = array.clone();
    drop(array);
    let mut iter = cloned.into_iter();
    drop(iter.next());
    drop(iter);
}

#[test]
pub fn pushes_after_clear_reuse_capacity() {
    let mut array = DynArray::with_capacity(8).unwrap();
    let grows = count_grows(|| {
        for i in 0..8 {
            array.push(i).unwrap();
        }
        array.clear();
        for i in 0..8 {
            array.push(i).unwrap();
        }
    });
    assert!(grows.is_empty());
    assert_eq!(array.capacity(), 8);

    let grows = count_grows(|| array.push(8).unwrap());
    assert_eq!(grows, [16]);
}

#[test]
pub fn tail_pushes_reallocate_logarithmically() {
    const N: u64 = 1000;
    let mut array = DynArray::new();
    let grows = count_grows(|| {
        for i in 0..N {
            array.push(i).unwrap();
        }
    });
    assert_eq!(grows, [1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024]);
    assert_eq!(array.len(), N as usize);
    for i in 0..N {
        assert_eq!(array.get(i as usize), Ok(&i));
    }
}

#[test]
pub fn append_slice_is_one_reallocation() {
    let mut array = dyn_array![0u32; 3];
    let batch: Vec<u32> = (0..100).collect();
    let grows = count_grows(|| array.append_slice(&batch).unwrap());
    assert_eq!(grows, [128]);
    assert_eq!(array.len(), 103);
    assert_eq!(array[3..], batch[..]);
}

#[test]
pub fn serde_round_trip() {
    let array = dyn_array![888, 20, 30, 40, 100, 200, 300];
    let json = serde_json::to_string(&array).unwrap();
    assert_eq!(json, "[888,20,30,40,100,200,300]");
    let back: DynArray<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, array);

    let words = dyn_array!["a".to_string(), "b".to_string()];
    let json = serde_json::to_string(&words).unwrap();
    let back: DynArray<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ["a", "b"].map(String::from));
}

#[test]
pub fn serde_rejects_non_sequence() {
    let result = serde_json::from_str::<DynArray<i32>>(r#"{"a": 1}"#);
    assert!(result.is_err());
}

#[test]
pub fn hash_matches_slice() {
    use std::hash::{BuildHasher, RandomState};
    let state = RandomState::new();
    let array = dyn_array![1, 2, 3];
    assert_eq!(state.hash_one(&array), state.hash_one([1, 2, 3].as_slice()));
}

#[test]
pub fn error_is_std_error() {
    let err: Box<dyn std::error::Error> = DynArrayError::IndexOutOfBounds { index: 1, len: 0 }.into();
    assert_eq!(err.to_string(), "index 1 was out of bounds of len 0");
}

proptest! {
    /// After N pushes every element is where it was pushed
    #[test]
    fn push_then_get(values in prop::collection::vec(any::<i32>(), 0..256)) {
        let mut array = DynArray::new();
        for &v in &values {
            array.push(v).unwrap();
        }
        prop_assert_eq!(array.len(), values.len());
        prop_assert!(array.capacity() >= array.len());
        for (i, v) in values.iter().enumerate() {
            prop_assert_eq!(array.get(i), Ok(v));
        }
    }

    /// Insert places the value and shifts the suffix back by one
    #[test]
    fn insert_shifts_suffix(
        values in prop::collection::vec(any::<i32>(), 0..64),
        index in any::<prop::sample::Index>(),
        value in any::<i32>(),
    ) {
        let index = index.index(values.len() + 1);
        let mut array: DynArray<_> = values.iter().copied().collect();
        array.insert(index, value).unwrap();
        prop_assert_eq!(array.len(), values.len() + 1);
        prop_assert_eq!(array.get(index), Ok(&value));
        prop_assert_eq!(&array[..index], &values[..index]);
        prop_assert_eq!(&array[index + 1..], &values[index..]);
    }

    /// Erase removes one element and shifts the suffix forward by one
    #[test]
    fn erase_shifts_suffix(
        values in prop::collection::vec(any::<i32>(), 1..64),
        index in any::<prop::sample::Index>(),
    ) {
        let index = index.index(values.len());
        let mut array: DynArray<_> = values.iter().copied().collect();
        let capacity = array.capacity();
        prop_assert_eq!(array.erase(index), Ok(values[index]));
        prop_assert_eq!(array.len(), values.len() - 1);
        prop_assert_eq!(array.capacity(), capacity);
        prop_assert_eq!(&array[..index], &values[..index]);
        prop_assert_eq!(&array[index..], &values[index + 1..]);
    }

    /// Out of range indices never change the array
    #[test]
    fn out_of_range_is_rejected(
        values in prop::collection::vec(any::<i32>(), 0..32),
        past in 0usize..1000,
    ) {
        let mut array: DynArray<_> = values.iter().copied().collect();
        let len = values.len();
        let err = |index| DynArrayError::IndexOutOfBounds { index, len };
        prop_assert_eq!(array.get(len + past), Err(err(len + past)));
        prop_assert_eq!(array.set(len + past, 0), Err(err(len + past)));
        prop_assert_eq!(array.erase(len + past), Err(err(len + past)));
        prop_assert_eq!(array.insert(len + 1 + past, 0), Err(err(len + 1 + past)));
        prop_assert_eq!(array, values);
    }

    /// Find agrees with the first matching position
    #[test]
    fn find_first_match(values in prop::collection::vec(0i32..8, 0..32), needle in 0i32..8) {
        let array: DynArray<_> = values.iter().copied().collect();
        prop_assert_eq!(array.find(&needle), values.iter().position(|&v| v == needle));
    }

    /// A random sequence of operations tracks a Vec model
    #[test]
    fn matches_vec_model(ops in prop::collection::vec(op_strategy(), 0..128)) {
        let mut array = DynArray::new();
        let mut model = Vec::new();
        for op in ops {
            match op {
                Op::Push(v) => {
                    array.push(v).unwrap();
                    model.push(v);
                }
                Op::Insert(index, v) => {
                    let result = array.insert(index, v);
                    if index <= model.len() {
                        prop_assert!(result.is_ok());
                        model.insert(index, v);
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                Op::Erase(index) => {
                    let result = array.erase(index);
                    if index < model.len() {
                        prop_assert_eq!(result, Ok(model.remove(index)));
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                Op::Pop => {
                    prop_assert_eq!(array.pop_back(), model.pop());
                }
                Op::Append(values) => {
                    array.append_slice(&values).unwrap();
                    model.extend_from_slice(&values);
                }
                Op::Clear => {
                    let capacity = array.capacity();
                    array.clear();
                    model.clear();
                    prop_assert_eq!(array.capacity(), capacity);
                }
            }
            prop_assert_eq!(array.as_slice(), model.as_slice());
        }
    }
}

#[derive(Clone, Debug)]
enum Op {
    Push(i32),
    Insert(usize, i32),
    Erase(usize),
    Pop,
    Append(Vec<i32>),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        2 => (0usize..40, any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        2 => (0usize..40).prop_map(Op::Erase),
        1 => Just(Op::Pop),
        1 => prop::collection::vec(any::<i32>(), 0..10).prop_map(Op::Append),
        1 => Just(Op::Clear),
    ]
}

/// Runs `f` and returns the new capacity of every reallocation it performed,
/// as reported through `tracing`.
fn count_grows(f: impl FnOnce()) -> Vec<u64> {
    let collector = GrowRecorder::default();
    with_default(collector.clone(), f);
    collector.grows.lock().expect("lock").clone()
}

#[derive(Clone, Default)]
struct GrowRecorder {
    grows: Arc<Mutex<Vec<u64>>>,
}

struct NewCapacity(Option<u64>);

impl Visit for NewCapacity {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "new_capacity" {
            self.0 = Some(value);
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}

impl Subscriber for GrowRecorder {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        if *event.metadata().level() != Level::TRACE {
            return;
        }
        let mut visitor = NewCapacity(None);
        event.record(&mut visitor);
        if let Some(capacity) = visitor.0 {
            self.grows.lock().expect("lock").push(capacity);
        }
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}
