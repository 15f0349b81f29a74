// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Writer/reader traits and the per-element record codec.

/// Element-level codec: how one value encodes into and decodes from an
/// archive's field stream.
///
/// Records write their own named fields through the archive they are given;
/// a record used as an array element emits the same fields once per element.
/// Implementations perform no validation of their own — archive failures
/// propagate unwrapped.
pub trait Record: Sized {
    /// Writes this value's fields, in a fixed order.
    fn write<W: ArchiveWrite>(&self, w: &mut W) -> Result<(), W::Error>;

    /// Reads the same fields, in the same order, and constructs the value.
    fn read<R: ArchiveRead>(r: &mut R) -> Result<Self, R::Error>;
}

/// Writer half of the archive contract.
///
/// One `save` performs one complete, ordered pass of field writes. The
/// associated error is the adapter's own stream error; codecs propagate it
/// without classifying or wrapping it further.
pub trait ArchiveWrite {
    /// Opaque stream error reported by this adapter.
    type Error;

    /// Writes a named `u32` field.
    fn put_u32(&mut self, name: &str, value: u32) -> Result<(), Self::Error>;

    /// Writes a named `i32` field.
    fn put_i32(&mut self, name: &str, value: i32) -> Result<(), Self::Error>;

    /// Writes a named `f32` field.
    fn put_f32(&mut self, name: &str, value: f32) -> Result<(), Self::Error>;

    /// Writes a named `bool` field.
    fn put_bool(&mut self, name: &str, value: bool) -> Result<(), Self::Error>;

    /// Writes a named array field as a sequence of element records.
    ///
    /// The element count is NOT part of the array field itself; protocols
    /// that need it persist it as a separate scalar field beforehand.
    fn put_array<T: Record>(&mut self, name: &str, items: &[T]) -> Result<(), Self::Error>
    where
        Self: Sized,
    {
        let _ = name;
        for item in items {
            item.write(self)?;
        }
        Ok(())
    }

    /// Delegates a named nested record (base-class fields).
    fn put_base<T: Record>(&mut self, name: &str, value: &T) -> Result<(), Self::Error>
    where
        Self: Sized,
    {
        let _ = name;
        value.write(self)
    }
}

/// Reader half of the archive contract.
///
/// Reads must be issued with the same names in the same order as the
/// matching writes; adapters that persist names may verify them, adapters
/// that drop them rely on order alone.
pub trait ArchiveRead {
    /// Opaque stream error reported by this adapter.
    type Error;

    /// Reads a named `u32` field.
    fn get_u32(&mut self, name: &str) -> Result<u32, Self::Error>;

    /// Reads a named `i32` field.
    fn get_i32(&mut self, name: &str) -> Result<i32, Self::Error>;

    /// Reads a named `f32` field.
    fn get_f32(&mut self, name: &str) -> Result<f32, Self::Error>;

    /// Reads a named `bool` field.
    fn get_bool(&mut self, name: &str) -> Result<bool, Self::Error>;

    /// Reads a named array field of exactly `len` element records.
    ///
    /// The caller supplies `len`; the protocol derives it from a previously
    /// read scalar field. No bounds or sanity checks are applied here.
    fn get_array<T: Record>(&mut self, name: &str, len: usize) -> Result<Vec<T>, Self::Error>
    where
        Self: Sized,
    {
        let _ = name;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(T::read(self)?);
        }
        Ok(items)
    }

    /// Reads a named nested record (base-class fields).
    fn get_base<T: Record>(&mut self, name: &str) -> Result<T, Self::Error>
    where
        Self: Sized,
    {
        let _ = name;
        T::read(self)
    }
}

/// Bare `u32` elements, for index arrays with no structure of their own.
impl Record for u32 {
    fn write<W: ArchiveWrite>(&self, w: &mut W) -> Result<(), W::Error> {
        w.put_u32("value", *self)
    }

    fn read<R: ArchiveRead>(r: &mut R) -> Result<Self, R::Error> {
        r.get_u32("value")
    }
}
