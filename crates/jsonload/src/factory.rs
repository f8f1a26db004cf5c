use alloc::{string::ToString, vec::Vec};

use crate::value::{Map, Value};

/// Abstraction over JSON value construction.
///
/// The parser never stores values itself; every scalar, array, and object
/// it recognizes is handed to a factory. Containers are built up through
/// their dedicated associated types and sealed into a [`Value`] once
/// complete, so a factory can use whatever storage it likes.
///
/// Dropping an unsealed `Array` or `Object` must release everything
/// appended or inserted into it; the parser relies on this to clean up
/// partially built containers when it aborts on a syntax error.
///
/// [`Value`]: ValueFactory::Value
pub trait ValueFactory {
    /// A completed value of any kind.
    type Value;
    /// An array under construction.
    type Array;
    /// An object under construction.
    type Object;

    fn new_null(&self) -> Self::Value;
    fn new_bool(&self, b: bool) -> Self::Value;
    fn new_integer(&self, n: i64) -> Self::Value;
    fn new_real(&self, n: f64) -> Self::Value;
    fn new_string(&self, s: &str) -> Self::Value;
    fn new_array(&self) -> Self::Array;
    fn new_object(&self) -> Self::Object;

    /// Appends `value` at the end of `array`.
    fn append_element(&self, array: &mut Self::Array, value: Self::Value);

    /// Inserts `(key, value)` into `object`. When `key` is already
    /// present the previous value must be replaced: last write wins.
    fn set_member(&self, object: &mut Self::Object, key: &str, value: Self::Value);

    fn from_array(&self, array: Self::Array) -> Self::Value;
    fn from_object(&self, object: Self::Object) -> Self::Value;
}

/// Factory producing the default [`Value`] tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFactory;

impl ValueFactory for StdFactory {
    type Value = Value;
    type Array = Vec<Value>;
    type Object = Map;

    #[inline]
    fn new_null(&self) -> Self::Value {
        Value::Null
    }

    #[inline]
    fn new_bool(&self, b: bool) -> Self::Value {
        Value::Boolean(b)
    }

    #[inline]
    fn new_integer(&self, n: i64) -> Self::Value {
        Value::Integer(n)
    }

    #[inline]
    fn new_real(&self, n: f64) -> Self::Value {
        Value::Real(n)
    }

    #[inline]
    fn new_string(&self, s: &str) -> Self::Value {
        Value::String(s.to_string())
    }

    #[inline]
    fn new_array(&self) -> Self::Array {
        Vec::new()
    }

    #[inline]
    fn new_object(&self) -> Self::Object {
        Map::new()
    }

    #[inline]
    fn append_element(&self, array: &mut Self::Array, value: Self::Value) {
        array.push(value);
    }

    #[inline]
    fn set_member(&self, object: &mut Self::Object, key: &str, value: Self::Value) {
        object.insert(key.to_string(), value);
    }

    #[inline]
    fn from_array(&self, array: Self::Array) -> Self::Value {
        Value::Array(array)
    }

    #[inline]
    fn from_object(&self, object: Self::Object) -> Self::Value {
        Value::Object(object)
    }
}
