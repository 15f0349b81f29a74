// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Element records for the scalar-bearing model types.

use canopy_archive::{ArchiveRead, ArchiveWrite, Record};

use crate::math::Vec3;
use crate::meta::GeometryMeta;
use crate::triangle::Triangle;

impl Record for Triangle {
    fn write<W: ArchiveWrite>(&self, w: &mut W) -> Result<(), W::Error> {
        w.put_u32("p0", self[0])?;
        w.put_u32("p1", self[1])?;
        w.put_u32("p2", self[2])?;
        Ok(())
    }

    fn read<R: ArchiveRead>(r: &mut R) -> Result<Self, R::Error> {
        let p0 = r.get_u32("p0")?;
        let p1 = r.get_u32("p1")?;
        let p2 = r.get_u32("p2")?;
        Ok(Self::new(p0, p1, p2))
    }
}

impl Record for Vec3 {
    fn write<W: ArchiveWrite>(&self, w: &mut W) -> Result<(), W::Error> {
        let [x, y, z] = self.to_array();
        w.put_f32("x", x)?;
        w.put_f32("y", y)?;
        w.put_f32("z", z)?;
        Ok(())
    }

    fn read<R: ArchiveRead>(r: &mut R) -> Result<Self, R::Error> {
        let x = r.get_f32("x")?;
        let y = r.get_f32("y")?;
        let z = r.get_f32("z")?;
        Ok(Self::new(x, y, z))
    }
}

impl Record for GeometryMeta {
    fn write<W: ArchiveWrite>(&self, w: &mut W) -> Result<(), W::Error> {
        w.put_base("aabb_local", &self.aabb_local)?;
        w.put_base("aabb_center", &self.aabb_center)?;
        w.put_f32("aabb_radius", self.aabb_radius)?;
        w.put_f32("cost_density", self.cost_density)?;
        w.put_f32("threshold_occupied", self.threshold_occupied)?;
        w.put_f32("threshold_free", self.threshold_free)?;
        Ok(())
    }

    fn read<R: ArchiveRead>(r: &mut R) -> Result<Self, R::Error> {
        let aabb_local = r.get_base("aabb_local")?;
        let aabb_center = r.get_base("aabb_center")?;
        let aabb_radius = r.get_f32("aabb_radius")?;
        let cost_density = r.get_f32("cost_density")?;
        let threshold_occupied = r.get_f32("threshold_occupied")?;
        let threshold_free = r.get_f32("threshold_free")?;
        Ok(Self {
            aabb_local,
            aabb_center,
            aabb_radius,
            cost_density,
            threshold_occupied,
            threshold_free,
        })
    }
}
