// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Named-field archive contract for canopy codecs.
//!
//! This crate defines the narrow interface a codec consumes: named scalar
//! fields, named arrays of records, and delegation to a nested base record.
//! It contains NO model knowledge — model codecs live in canopy-geom.
//!
//! # Design
//!
//! The contract is deliberately separated from any concrete byte format.
//! Field names and write order constitute the persisted layout: an adapter
//! may drop the names (the wire adapter, where order alone is load-bearing)
//! or persist them (the tape adapter, used to pin layouts in tests), but it
//! must never reorder fields.

mod port;
mod tape;
mod wire;

pub use port::{ArchiveRead, ArchiveWrite, Record};
pub use tape::{TapeArchive, TapeError, TapeValue};
pub use wire::{WireError, WireReader, WireWriter};
