//! Item to key serialization
//!
//! The filter hashes string keys, not items. Two items are the same member
//! exactly when their keys are equal.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::FilterError;

type SerializeFn<T> = dyn Fn(&T) -> Result<String, FilterError> + Send + Sync;

/// Maps items of type `T` to the string keys the filter hashes
pub struct KeySerializer<T: ?Sized> {
    inner: Arc<SerializeFn<T>>,
}

impl<T: ?Sized> KeySerializer<T> {
    /// Wrap an infallible key function
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(move |item: &T| Ok::<_, FilterError>(f(item))),
        }
    }

    /// Wrap a key function that may fail
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&T) -> Result<String, FilterError> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Key for `item`
    pub fn serialize(&self, item: &T) -> Result<String, FilterError> {
        (self.inner)(item)
    }
}

impl<T: Serialize + ?Sized> KeySerializer<T> {
    /// Canonical JSON keys, see [`json_key`]
    pub fn json() -> Self {
        Self {
            inner: Arc::new(|item: &T| json_key(item)),
        }
    }
}

impl<T: ?Sized> Clone for KeySerializer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> fmt::Debug for KeySerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySerializer").finish_non_exhaustive()
    }
}

/// Default key: a string item is used unchanged, anything else becomes its
/// compact JSON text (object keys sorted).
pub fn json_key<T: Serialize + ?Sized>(item: &T) -> Result<String, FilterError> {
    match serde_json::to_value(item)? {
        Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}
