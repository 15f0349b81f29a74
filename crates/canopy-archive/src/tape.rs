// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Self-describing in-memory adapter for headless protocol testing.
//!
//! `TapeArchive` records every written field as a `(name, value)` entry and
//! replays the tape on read, verifying that each read asks for the entry the
//! writer produced — same name, same shape, same position. Use it to pin a
//! codec's persisted layout without committing to a byte format.

use thiserror::Error;

use crate::port::{ArchiveRead, ArchiveWrite, Record};

/// One recorded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum TapeValue {
    /// Unsigned 32-bit scalar.
    U32(u32),
    /// Signed 32-bit scalar.
    I32(i32),
    /// 32-bit float scalar.
    F32(f32),
    /// Boolean scalar.
    Bool(bool),
    /// Marker opening an array field of the given element count.
    ArrayBegin(usize),
    /// Marker opening a delegated base record.
    BaseBegin,
}

impl TapeValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::U32(_) => "u32",
            Self::I32(_) => "i32",
            Self::F32(_) => "f32",
            Self::Bool(_) => "bool",
            Self::ArrayBegin(_) => "array",
            Self::BaseBegin => "base",
        }
    }
}

/// Error raised when a read diverges from the recorded tape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TapeError {
    /// A read was issued past the end of the tape.
    #[error("tape exhausted while reading field `{name}`")]
    Exhausted {
        /// Field the reader asked for.
        name: String,
    },
    /// The reader asked for a differently named field than the writer wrote.
    #[error("field name mismatch: wrote `{wrote}`, read `{read}`")]
    NameMismatch {
        /// Name recorded by the writer.
        wrote: String,
        /// Name requested by the reader.
        read: String,
    },
    /// The reader asked for a different field shape than the writer wrote.
    #[error("field `{name}` shape mismatch: wrote {wrote}, read {read}")]
    ShapeMismatch {
        /// Field name.
        name: String,
        /// Shape recorded by the writer.
        wrote: &'static str,
        /// Shape requested by the reader.
        read: &'static str,
    },
    /// An array was read back with a different element count than written.
    #[error("array `{name}` length mismatch: wrote {wrote}, read {read}")]
    LengthMismatch {
        /// Field name.
        name: String,
        /// Element count recorded by the writer.
        wrote: usize,
        /// Element count requested by the reader.
        read: usize,
    },
}

/// In-memory archive: writes append entries, reads replay them in order.
#[derive(Debug, Default)]
pub struct TapeArchive {
    entries: Vec<(String, TapeValue)>,
    cursor: usize,
}

impl TapeArchive {
    /// Creates an empty tape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded entries in write order.
    pub fn entries(&self) -> &[(String, TapeValue)] {
        &self.entries
    }

    /// Resets the read cursor to the start of the tape.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Returns true when every recorded entry has been read back.
    pub fn is_drained(&self) -> bool {
        self.cursor == self.entries.len()
    }

    fn record(&mut self, name: &str, value: TapeValue) {
        self.entries.push((name.to_owned(), value));
    }

    fn next(&mut self, name: &str) -> Result<TapeValue, TapeError> {
        let Some((wrote, value)) = self.entries.get(self.cursor) else {
            return Err(TapeError::Exhausted {
                name: name.to_owned(),
            });
        };
        if wrote != name {
            return Err(TapeError::NameMismatch {
                wrote: wrote.clone(),
                read: name.to_owned(),
            });
        }
        self.cursor += 1;
        Ok(value.clone())
    }

    fn mismatch(name: &str, wrote: &TapeValue, read: &'static str) -> TapeError {
        TapeError::ShapeMismatch {
            name: name.to_owned(),
            wrote: wrote.kind(),
            read,
        }
    }
}

impl ArchiveWrite for TapeArchive {
    type Error = TapeError;

    fn put_u32(&mut self, name: &str, value: u32) -> Result<(), Self::Error> {
        self.record(name, TapeValue::U32(value));
        Ok(())
    }

    fn put_i32(&mut self, name: &str, value: i32) -> Result<(), Self::Error> {
        self.record(name, TapeValue::I32(value));
        Ok(())
    }

    fn put_f32(&mut self, name: &str, value: f32) -> Result<(), Self::Error> {
        self.record(name, TapeValue::F32(value));
        Ok(())
    }

    fn put_bool(&mut self, name: &str, value: bool) -> Result<(), Self::Error> {
        self.record(name, TapeValue::Bool(value));
        Ok(())
    }

    fn put_array<T: Record>(&mut self, name: &str, items: &[T]) -> Result<(), Self::Error> {
        self.record(name, TapeValue::ArrayBegin(items.len()));
        for item in items {
            item.write(self)?;
        }
        Ok(())
    }

    fn put_base<T: Record>(&mut self, name: &str, value: &T) -> Result<(), Self::Error> {
        self.record(name, TapeValue::BaseBegin);
        value.write(self)
    }
}

impl ArchiveRead for TapeArchive {
    type Error = TapeError;

    fn get_u32(&mut self, name: &str) -> Result<u32, Self::Error> {
        match self.next(name)? {
            TapeValue::U32(v) => Ok(v),
            other => Err(Self::mismatch(name, &other, "u32")),
        }
    }

    fn get_i32(&mut self, name: &str) -> Result<i32, Self::Error> {
        match self.next(name)? {
            TapeValue::I32(v) => Ok(v),
            other => Err(Self::mismatch(name, &other, "i32")),
        }
    }

    fn get_f32(&mut self, name: &str) -> Result<f32, Self::Error> {
        match self.next(name)? {
            TapeValue::F32(v) => Ok(v),
            other => Err(Self::mismatch(name, &other, "f32")),
        }
    }

    fn get_bool(&mut self, name: &str) -> Result<bool, Self::Error> {
        match self.next(name)? {
            TapeValue::Bool(v) => Ok(v),
            other => Err(Self::mismatch(name, &other, "bool")),
        }
    }

    fn get_array<T: Record>(&mut self, name: &str, len: usize) -> Result<Vec<T>, Self::Error> {
        match self.next(name)? {
            TapeValue::ArrayBegin(wrote) => {
                if wrote != len {
                    return Err(TapeError::LengthMismatch {
                        name: name.to_owned(),
                        wrote,
                        read: len,
                    });
                }
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(T::read(self)?);
                }
                Ok(items)
            }
            other => Err(Self::mismatch(name, &other, "array")),
        }
    }

    fn get_base<T: Record>(&mut self, name: &str) -> Result<T, Self::Error> {
        match self.next(name)? {
            TapeValue::BaseBegin => T::read(self),
            other => Err(Self::mismatch(name, &other, "base")),
        }
    }
}
