// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bounding-volume and hierarchy-node records.
//!
//! The node record is the external codec the hierarchy layer delegates to:
//! any `BV` that implements [`Record`] plugs in without the model codecs
//! knowing its field layout.

use canopy_archive::{ArchiveRead, ArchiveWrite, Record};

use crate::aabb::Aabb;
use crate::node::BvNode;

impl Record for Aabb {
    fn write<W: ArchiveWrite>(&self, w: &mut W) -> Result<(), W::Error> {
        w.put_base("min_", &self.min())?;
        w.put_base("max_", &self.max())?;
        Ok(())
    }

    fn read<R: ArchiveRead>(r: &mut R) -> Result<Self, R::Error> {
        let min = r.get_base("min_")?;
        let max = r.get_base("max_")?;
        Ok(Self::from_corners_unchecked(min, max))
    }
}

impl<BV: Record> Record for BvNode<BV> {
    fn write<W: ArchiveWrite>(&self, w: &mut W) -> Result<(), W::Error> {
        w.put_i32("first_child", self.first_child)?;
        w.put_u32("first_primitive", self.first_primitive)?;
        w.put_u32("num_primitives", self.num_primitives)?;
        w.put_base("bv", &self.bv)?;
        Ok(())
    }

    fn read<R: ArchiveRead>(r: &mut R) -> Result<Self, R::Error> {
        let first_child = r.get_i32("first_child")?;
        let first_primitive = r.get_u32("first_primitive")?;
        let num_primitives = r.get_u32("num_primitives")?;
        let bv = r.get_base("bv")?;
        Ok(Self {
            bv,
            first_child,
            first_primitive,
            num_primitives,
        })
    }
}
