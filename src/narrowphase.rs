use glam::Vec2;

use crate::api::NarrowphaseApi;
use crate::types::*;

/// Primitive rectangle tests used by the world.
pub struct Narrowphase;

impl NarrowphaseApi for Narrowphase {
    fn overlap_rect_rect(a: &Rect, b: &Rect) -> bool {
        a.intersects(b)
    }

    fn overlap_point_rect(p: Vec2, r: &Rect) -> bool {
        r.contains_point(p)
    }

    fn separation(a: &Rect, b: &Rect) -> Option<Separation> {
        if !a.intersects(b) {
            return None;
        }
        let overlap_left = a.right() - b.left();
        let overlap_right = b.right() - a.left();
        let overlap_top = a.bottom() - b.top();
        let overlap_bottom = b.bottom() - a.top();

        // Strict less-than scan: on equal depths the earlier side wins.
        let mut side = Side::Left;
        let mut depth = overlap_left;
        for (cand_side, cand) in [
            (Side::Right, overlap_right),
            (Side::Top, overlap_top),
            (Side::Bottom, overlap_bottom),
        ] {
            if cand < depth {
                side = cand_side;
                depth = cand;
            }
        }

        let correction = match side {
            Side::Left => Vec2::new(-depth, 0.0),
            Side::Right => Vec2::new(depth, 0.0),
            Side::Top => Vec2::new(0.0, -depth),
            Side::Bottom => Vec2::new(0.0, depth),
        };
        Some(Separation {
            correction,
            depth,
            side,
        })
    }

    fn elastic_1d(va: f32, ma: f32, vb: f32, mb: f32) -> (f32, f32) {
        let total = ma + mb;
        let new_a = (va * (ma - mb) + 2.0 * mb * vb) / total;
        let new_b = (vb * (mb - ma) + 2.0 * ma * va) / total;
        (new_a, new_b)
    }

    fn ray_rect(origin: Vec2, dir: Vec2, r: &Rect) -> Option<(f32, Vec2)> {
        // Slab method with normal tracking; returns earliest t >= 0
        let (min, max) = (r.min(), r.max());
        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;
        let mut n_enter = Vec2::ZERO;

        for axis in 0..2 {
            let (o, d, lo, hi) = (origin[axis], dir[axis], min[axis], max[axis]);
            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t1 = (lo - o) * inv;
            let mut t2 = (hi - o) * inv;
            let mut n = -1.0;
            if t1 > t2 {
                core::mem::swap(&mut t1, &mut t2);
                n = 1.0;
            }
            if t1 > tmin {
                tmin = t1;
                n_enter = if axis == 0 { Vec2::new(n, 0.0) } else { Vec2::new(0.0, n) };
            }
            if t2 < tmax {
                tmax = t2;
            }
            if tmin > tmax {
                return None;
            }
        }
        if tmax < 0.0 {
            return None;
        }

        // If origin inside, tmin < 0; treat as immediate hit
        if tmin < 0.0 {
            Some((0.0, Vec2::ZERO))
        } else {
            Some((tmin, n_enter))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separation_none_when_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(Narrowphase::separation(&a, &b).is_none());
    }

    #[test]
    fn test_separation_left() {
        // B overlaps A's right edge by 2
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(8.0, 0.0, 10.0, 10.0);
        let s = Narrowphase::separation(&a, &b).unwrap();
        assert_eq!(s.side, Side::Left);
        assert_eq!(s.correction, Vec2::new(-2.0, 0.0));
        assert_eq!(s.depth, 2.0);
    }

    #[test]
    fn test_separation_each_side() {
        let a = Rect::new(10.0, 10.0, 10.0, 10.0);
        let right = Narrowphase::separation(&a, &Rect::new(1.0, 10.0, 10.0, 10.0)).unwrap();
        assert_eq!(right.side, Side::Right);
        assert_eq!(right.correction, Vec2::new(1.0, 0.0));
        let top = Narrowphase::separation(&a, &Rect::new(10.0, 17.0, 10.0, 10.0)).unwrap();
        assert_eq!(top.side, Side::Top);
        assert_eq!(top.correction, Vec2::new(0.0, -3.0));
        let bottom = Narrowphase::separation(&a, &Rect::new(10.0, 6.0, 10.0, 10.0)).unwrap();
        assert_eq!(bottom.side, Side::Bottom);
        assert_eq!(bottom.correction, Vec2::new(0.0, 6.0));
    }

    #[test]
    fn test_separation_tie_prefers_earlier_side() {
        // Equal depth on left and top: left wins.
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let s = Narrowphase::separation(&a, &b).unwrap();
        assert_eq!(s.side, Side::Left);
        assert_eq!(s.correction, Vec2::new(-5.0, 0.0));

        // Equal depth on right and bottom: right wins.
        let b = Rect::new(-5.0, -5.0, 10.0, 10.0);
        let s = Narrowphase::separation(&a, &b).unwrap();
        assert_eq!(s.side, Side::Right);

        // Equal depth on top and bottom (same column, full vertical overlap): top wins.
        let a = Rect::new(0.0, 0.0, 10.0, 4.0);
        let b = Rect::new(0.0, 0.0, 10.0, 4.0);
        let s = Narrowphase::separation(&a, &b).unwrap();
        assert_eq!(s.side, Side::Top);
    }

    #[test]
    fn test_separation_is_reproducible() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let first = Narrowphase::separation(&a, &b);
        for _ in 0..10 {
            assert_eq!(Narrowphase::separation(&a, &b), first);
        }
    }

    #[test]
    fn test_elastic_equal_masses_swap() {
        let (a, b) = Narrowphase::elastic_1d(3.0, 1.0, -1.0, 1.0);
        assert_eq!(a, -1.0);
        assert_eq!(b, 3.0);
    }

    #[test]
    fn test_elastic_conserves_momentum() {
        let (ma, mb) = (2.0, 0.5);
        let (va, vb) = (1.5, -4.0);
        let (na, nb) = Narrowphase::elastic_1d(va, ma, vb, mb);
        assert!(((ma * va + mb * vb) - (ma * na + mb * nb)).abs() < 1e-5);
    }

    #[test]
    fn test_ray_rect_hit() {
        let r = Rect::new(-1.0, -1.0, 2.0, 2.0);
        let (t, n) = Narrowphase::ray_rect(Vec2::new(-5.0, 0.0), Vec2::new(1.0, 0.0), &r).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert_eq!(n, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_ray_rect_parallel_miss_and_behind() {
        let r = Rect::new(-1.0, -1.0, 2.0, 2.0);
        assert!(Narrowphase::ray_rect(Vec2::new(-5.0, 2.0), Vec2::new(1.0, 0.0), &r).is_none());
        assert!(Narrowphase::ray_rect(Vec2::new(-5.0, 0.0), Vec2::new(-1.0, 0.0), &r).is_none());
    }

    #[test]
    fn test_ray_rect_origin_inside() {
        let r = Rect::new(-1.0, -1.0, 2.0, 2.0);
        let (t, n) = Narrowphase::ray_rect(Vec2::ZERO, Vec2::new(0.0, 1.0), &r).unwrap();
        assert_eq!(t, 0.0);
        assert_eq!(n, Vec2::ZERO);
    }
}
