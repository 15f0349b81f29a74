// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Little-endian byte-stream adapter.
//!
//! Field names are not persisted: write order alone is load-bearing, so a
//! reader must issue the exact field sequence the writer produced. Scalars
//! are fixed-size little-endian; `bool` is a single byte (zero = false);
//! arrays are raw element sequences with no length prefix of their own.

use thiserror::Error;

use crate::port::{ArchiveRead, ArchiveWrite};

/// Error raised by [`WireReader`] on truncated input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// The stream ended before a field could be read in full.
    #[error("short read: needed {needed} more bytes, {remaining} remaining")]
    ShortRead {
        /// Bytes the current field still required.
        needed: usize,
        /// Bytes left in the stream.
        remaining: usize,
    },
}

/// Writer that appends little-endian fields to an owned byte buffer.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the writer and returns the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

impl ArchiveWrite for WireWriter {
    type Error = WireError;

    fn put_u32(&mut self, _name: &str, value: u32) -> Result<(), Self::Error> {
        self.buf.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    fn put_i32(&mut self, _name: &str, value: i32) -> Result<(), Self::Error> {
        self.buf.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    fn put_f32(&mut self, _name: &str, value: f32) -> Result<(), Self::Error> {
        self.buf.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    fn put_bool(&mut self, _name: &str, value: bool) -> Result<(), Self::Error> {
        self.buf.push(u8::from(value));
        Ok(())
    }
}

/// Reader that consumes little-endian fields from a byte slice.
#[derive(Debug)]
pub struct WireReader<'a> {
    rest: &'a [u8],
}

impl<'a> WireReader<'a> {
    /// Wraps a byte slice for reading from its start.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { rest: bytes }
    }

    /// Returns the number of unconsumed bytes.
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        if self.rest.len() < N {
            return Err(WireError::ShortRead {
                needed: N - self.rest.len(),
                remaining: self.rest.len(),
            });
        }
        let (head, tail) = self.rest.split_at(N);
        self.rest = tail;
        let mut out = [0u8; N];
        out.copy_from_slice(head);
        Ok(out)
    }
}

impl ArchiveRead for WireReader<'_> {
    type Error = WireError;

    fn get_u32(&mut self, _name: &str) -> Result<u32, Self::Error> {
        Ok(u32::from_le_bytes(self.take::<4>()?))
    }

    fn get_i32(&mut self, _name: &str) -> Result<i32, Self::Error> {
        Ok(i32::from_le_bytes(self.take::<4>()?))
    }

    fn get_f32(&mut self, _name: &str) -> Result<f32, Self::Error> {
        Ok(f32::from_le_bytes(self.take::<4>()?))
    }

    fn get_bool(&mut self, _name: &str) -> Result<bool, Self::Error> {
        Ok(self.take::<1>()?[0] != 0)
    }
}
