//! NeoVM stack items: the typed values an invocation result's evaluation
//! stack is made of.

use neo_types::Bytes;
use num_bigint::BigInt;

/// A single value on the NeoVM evaluation stack, as returned by
/// `invoke_script`/`invoke_function`.
#[derive(Debug, Clone, PartialEq)]
pub enum StackItem {
    /// The untyped placeholder NeoVM uses for uninitialized slots.
    Any,
    Boolean(bool),
    Integer(BigInt),
    /// An immutable byte string.
    ByteString(Bytes),
    /// A mutable byte buffer.
    Buffer(Bytes),
    Array(Vec<StackItem>),
    /// Structurally identical to `Array` but compared by value rather than
    /// reference inside the VM; the distinction does not matter once the
    /// result has left the VM, so it is carried as a separate variant only
    /// for faithful round-tripping.
    Struct(Vec<StackItem>),
    Map(Vec<(StackItem, StackItem)>),
    Pointer(i64),
    /// A handle to a VM-native object (iterators, for instance) that does
    /// not serialize to a plain value.
    InteropInterface(String),
}

impl StackItem {
    /// Unwraps a `Boolean` item, if that's what this is.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Unwraps an `Integer` item, if that's what this is.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Unwraps the bytes of a `ByteString` or `Buffer` item, if that's what
    /// this is.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::ByteString(b) | Self::Buffer(b) => Some(b),
            _ => None,
        }
    }

    /// Unwraps an `Array` or `Struct` item's elements, if that's what this
    /// is.
    pub fn as_array(&self) -> Option<&[StackItem]> {
        match self {
            Self::Array(items) | Self::Struct(items) => Some(items),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_matching_variant() {
        let item = StackItem::Integer(BigInt::from(42));
        assert_eq!(item.as_integer(), Some(&BigInt::from(42)));
        assert_eq!(item.as_bool(), None);
    }

    #[test]
    fn array_and_struct_both_unwrap_as_array() {
        let array = StackItem::Array(vec![StackItem::Boolean(true)]);
        let strukt = StackItem::Struct(vec![StackItem::Boolean(false)]);
        assert_eq!(array.as_array().unwrap().len(), 1);
        assert_eq!(strukt.as_array().unwrap().len(), 1);
    }
}
