use crate::error::{Error, Result};

/// The raw material a hash table derives bucket indices from.
///
/// Only two key kinds have hash rules: integers, which are reinterpreted as a
/// `u64` (signed values are sign-extended first), and text, which is hashed
/// byte by byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashSource<'a> {
    Integer(u64),
    Text(&'a [u8]),
}

/// Keys usable with the hash tables of this crate.
///
/// The trait is implemented for the primitive integer types, `char`, `bool`,
/// `String`, `str` and `Box<str>`. Other types may implement it without
/// overriding [`hash_source`](#method.hash_source); the tables then reject
/// them with [`Error::UnsupportedKeyType`][unsupported].
///
/// `hash_source` must be deterministic and consistent with `Eq`: keys that
/// compare equal must produce equal sources.
///
/// [unsupported]: ../enum.Error.html#variant.UnsupportedKeyType
pub trait HashKey {
    fn hash_source(&self) -> Option<HashSource<'_>> {
        None
    }
}

pub(crate) fn source_of<K>(key: &K) -> Result<HashSource<'_>>
where
    K: HashKey + ?Sized,
{
    key.hash_source().ok_or(Error::UnsupportedKeyType {
        type_name: std::any::type_name::<K>(),
    })
}

/// Polynomial rolling hash over `bytes`, folded left to right.
pub(crate) fn fold_text(bytes: &[u8], multiplier: u64) -> u64 {
    bytes
        .iter()
        .fold(0u64, |h, &b| h.wrapping_mul(multiplier).wrapping_add(b as u64))
}

macro_rules! impl_unsigned_key {
    ($($t:ty),*) => {
        $(
            impl HashKey for $t {
                fn hash_source(&self) -> Option<HashSource<'_>> {
                    Some(HashSource::Integer(*self as u64))
                }
            }
        )*
    };
}

macro_rules! impl_signed_key {
    ($($t:ty),*) => {
        $(
            impl HashKey for $t {
                fn hash_source(&self) -> Option<HashSource<'_>> {
                    Some(HashSource::Integer(*self as i64 as u64))
                }
            }
        )*
    };
}

impl_unsigned_key!(u8, u16, u32, u64, u128, usize);
impl_signed_key!(i8, i16, i32, i64, i128, isize);

impl HashKey for char {
    fn hash_source(&self) -> Option<HashSource<'_>> {
        Some(HashSource::Integer(*self as u64))
    }
}

impl HashKey for bool {
    fn hash_source(&self) -> Option<HashSource<'_>> {
        Some(HashSource::Integer(*self as u64))
    }
}

impl HashKey for str {
    fn hash_source(&self) -> Option<HashSource<'_>> {
        Some(HashSource::Text(self.as_bytes()))
    }
}

impl HashKey for String {
    fn hash_source(&self) -> Option<HashSource<'_>> {
        Some(HashSource::Text(self.as_bytes()))
    }
}

impl HashKey for Box<str> {
    fn hash_source(&self) -> Option<HashSource<'_>> {
        Some(HashSource::Text(self.as_bytes()))
    }
}

impl<K: HashKey + ?Sized> HashKey for &K {
    fn hash_source(&self) -> Option<HashSource<'_>> {
        (**self).hash_source()
    }
}
