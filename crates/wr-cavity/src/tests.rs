//! Unit tests for wr-cavity.
//!
//! All tests use hand-built walls and layouts; lengths are in feet.

#[cfg(test)]
mod helpers {
    use wr_core::{Vec3, Wall, WallId};

    use crate::{FramingLayout, HorizontalKind};

    pub const T: f64 = 0.125;

    /// A straight wall along +X starting at the origin.
    pub fn wall(length: f64, height: f64) -> Wall {
        Wall::from_baseline(WallId(1), Vec3::ZERO, Vec3::new(length, 0.0, 0.0), height, 0.5)
            .unwrap()
    }

    /// 4 ft × 8 ft wall framed with a 2 ft × 3 ft window:
    ///
    /// ```text
    ///  u: 0   .875 1.0  1.94 2.06  3.0 3.125    4.0
    ///     |end| A |king| C2 |cr| C4 |king| F |end|   6.5 – 7.875  (above header)
    ///     |   |   |    [ header 6.0 – 6.5  ]    |
    ///     |   |   |    [ window 3.0 – 6.0  ]    |
    ///     |   |   |    [ sill 2.875 – 3.0  ]    |
    ///     |   |   |  C1 |cr| C3 |    |   |      0.125 – 2.875 (below sill)
    /// ```
    pub fn window_layout() -> (Wall, FramingLayout) {
        let wall = wall(4.0, 8.0).with_opening(wr_core::Opening::new(1.0, 3.0, 3.0, 6.0));
        let layout = FramingLayout::new()
            .horizontal(HorizontalKind::BottomPlate, 0.0625, T, 0.0, 4.0)
            .horizontal(HorizontalKind::TopPlate, 7.9375, T, 0.0, 4.0)
            .stud(0.0625, T, 0.125, 7.875)
            .stud(0.9375, T, 0.125, 7.875)
            .stud(3.0625, T, 0.125, 7.875)
            .stud(3.9375, T, 0.125, 7.875)
            .horizontal(HorizontalKind::Header, 6.25, 0.5, 1.0, 3.0)
            .horizontal(HorizontalKind::Sill, 2.9375, T, 1.0, 3.0)
            .stud(2.0, T, 6.5, 7.875)
            .stud(2.0, T, 0.125, 2.875);
        (wall, layout)
    }

    pub fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }
}

// ── Derived mode ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod derived {
    use super::helpers::{approx, wall};
    use crate::{decompose, CavityConfig, CavityKind, SourceMode};

    #[test]
    fn ten_foot_wall_at_sixteen_inches() {
        // Members at 0, 16", 32", … 112", and the end member at 120".
        let cav = decompose(&wall(10.0, 8.0), &CavityConfig::default(), None).unwrap();
        assert_eq!(cav.len(), 8);
        assert_eq!(cav.source_mode, SourceMode::Derived);

        let first = &cav.cavities()[0];
        assert!(approx(first.u_left, 0.0625));
        assert!(approx(first.u_right, 16.0 / 12.0 - 0.0625));
        assert!(approx(first.v_bottom, 0.0));
        assert!(approx(first.v_top, 8.0));
        assert!(cav.cavities().iter().all(|c| c.kind == CavityKind::Full));

        let last = &cav.cavities()[7];
        assert!(approx(last.u_left, 112.0 / 12.0 + 0.0625));
        assert!(approx(last.u_right, 10.0 - 0.0625));
        assert_eq!(cav.find_cavity_for_uv(9.7, 4.0).map(|c| c.id.index()), Some(7));
    }

    #[test]
    fn end_member_lands_on_wall_length_once() {
        // 8 ft is an exact multiple of 16": no sliver bay at the end.
        let cav = decompose(&wall(8.0, 8.0), &CavityConfig::default(), None).unwrap();
        assert_eq!(cav.len(), 6);
        assert!(approx(cav.cavities()[5].u_right, 8.0 - 0.0625));
    }

    #[test]
    fn ids_follow_u_order() {
        let cav = decompose(&wall(10.0, 8.0), &CavityConfig::default(), None).unwrap();
        for (i, pair) in cav.cavities().windows(2).enumerate() {
            assert_eq!(pair[0].id.index(), i);
            assert!(pair[0].u_left < pair[1].u_left);
        }
    }

    #[test]
    fn half_spacing_offset_centers_bay_on_entry() {
        let config = CavityConfig {
            first_member_offset: Some(8.0 / 12.0),
            ..CavityConfig::default()
        };
        let cav = decompose(&wall(10.0, 8.0), &config, None).unwrap();
        let c = cav.find_cavity_for_uv(5.33, 3.0).unwrap();
        assert!((c.u_left - 4.67).abs() < 0.1, "u_left = {}", c.u_left);
        assert!((c.u_right - 6.00).abs() < 0.1, "u_right = {}", c.u_right);
        assert!(approx(c.u_left, 4.0 + 2.0 / 3.0 + 0.0625));
        assert!(approx(c.u_right, 6.0 - 0.0625));
    }

    #[test]
    fn default_offset_puts_stud_under_mid_wall_entry() {
        let cav = decompose(&wall(10.0, 8.0), &CavityConfig::default(), None).unwrap();
        assert!(cav.find_cavity_for_uv(5.33, 3.0).is_none());
        // Closer to the left face of the stud at 64".
        let c = cav.find_nearest_cavity(5.33, 3.0).unwrap();
        assert!(approx(c.u_right, 64.0 / 12.0 - 0.0625));
    }

    #[test]
    fn spacing_beyond_length_yields_empty_set() {
        let cav = decompose(&wall(10.0, 8.0), &CavityConfig::with_spacing(12.0), None).unwrap();
        assert!(cav.is_empty());
        assert!(cav.find_nearest_cavity(5.0, 4.0).is_none());
    }

    #[test]
    fn narrow_bays_are_dropped_not_clamped() {
        let config = CavityConfig {
            stud_spacing: 0.3,
            min_clear_width: 0.25,
            ..CavityConfig::default()
        };
        // Clear span 0.3 − 0.125 = 0.175 < 0.25.
        let cav = decompose(&wall(10.0, 8.0), &config, None).unwrap();
        assert!(cav.is_empty());
    }

    #[test]
    fn opening_splits_overlapped_bays() {
        let w = wall(10.0, 8.0).with_opening(wr_core::Opening::new(3.0, 6.0, 3.0, 7.0));
        let cav = decompose(&w, &CavityConfig::default(), None).unwrap();

        // Bays 3, 4, 5 overlap the opening → two cripple cavities each.
        assert_eq!(cav.len(), 11);
        let cripples: Vec<_> = cav
            .cavities()
            .iter()
            .filter(|c| c.kind == CavityKind::Cripple)
            .collect();
        assert_eq!(cripples.len(), 6);
        for c in &cripples {
            let below = approx(c.v_bottom, 0.0) && approx(c.v_top, 3.0 - 0.125);
            let above = approx(c.v_bottom, 7.0 + 0.125) && approx(c.v_top, 8.0);
            assert!(below || above, "unexpected cripple {c:?}");
        }
        // Nothing inside the opening.
        assert!(cav.find_cavity_for_uv(4.5, 5.0).is_none());
    }

    #[test]
    fn opening_leaving_too_little_headroom_removes_piece() {
        // Opening top at 7.8 + 0.125 allowance leaves < 0.25 above.
        let w = wall(10.0, 8.0).with_opening(wr_core::Opening::new(3.0, 6.0, 0.0, 7.8));
        let cav = decompose(&w, &CavityConfig::default(), None).unwrap();
        assert_eq!(cav.len(), 5);
    }
}

// ── Configuration and geometry errors ─────────────────────────────────────────

#[cfg(test)]
mod errors {
    use super::helpers::wall;
    use crate::{decompose, CavityConfig, CavityError, FramingLayout};

    #[test]
    fn zero_spacing_is_config_error() {
        let err = decompose(&wall(10.0, 8.0), &CavityConfig::with_spacing(0.0), None).unwrap_err();
        assert!(matches!(err, CavityError::Config { .. }));
        assert!(!err.is_malformed());
    }

    #[test]
    fn minimum_not_below_wall_dimension_is_config_error() {
        let config = CavityConfig { min_clear_height: 8.0, ..CavityConfig::default() };
        let err = decompose(&wall(10.0, 8.0), &config, None).unwrap_err();
        assert!(matches!(err, CavityError::Config { .. }));
    }

    #[test]
    fn zero_length_wall_is_geometry_error() {
        let mut w = wall(10.0, 8.0);
        w.length = 0.0;
        let err = decompose(&w, &CavityConfig::default(), None).unwrap_err();
        assert!(matches!(err, CavityError::Geometry(_)));
        assert!(!err.is_malformed());
        assert_eq!(err.wall(), Some(w.id));
    }

    #[test]
    fn negative_length_is_malformed() {
        let mut w = wall(10.0, 8.0);
        w.length = -4.0;
        let err = decompose(&w, &CavityConfig::default(), None).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn inverted_member_is_malformed() {
        let layout = FramingLayout::new().stud(1.0, 0.125, 7.0, 1.0);
        let err = decompose(&wall(10.0, 8.0), &CavityConfig::default(), Some(&layout)).unwrap_err();
        assert!(err.is_malformed());
    }
}

// ── Framing mode ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod framing {
    use super::helpers::{approx, wall, window_layout, T};
    use crate::{decompose, CavityConfig, CavityKind, FramingLayout, HorizontalKind, SourceMode};

    #[test]
    fn plain_bays_between_plates() {
        let layout = FramingLayout::new()
            .horizontal(HorizontalKind::BottomPlate, 0.0625, T, 0.0, 4.0)
            .horizontal(HorizontalKind::TopPlate, 7.9375, T, 0.0, 4.0)
            .stud(0.0625, T, 0.125, 7.875)
            .stud(4.0 / 3.0, T, 0.125, 7.875)
            .stud(8.0 / 3.0, T, 0.125, 7.875)
            .stud(3.9375, T, 0.125, 7.875);
        let cav = decompose(&wall(4.0, 8.0), &CavityConfig::default(), Some(&layout)).unwrap();

        assert_eq!(cav.len(), 3);
        assert_eq!(cav.source_mode, SourceMode::Framing);
        for c in cav.cavities() {
            assert!(approx(c.v_bottom, 0.125));
            assert!(approx(c.v_top, 7.875));
            assert_eq!(c.kind, CavityKind::Full);
            assert_eq!(c.source_mode, SourceMode::Framing);
        }
        assert!(approx(cav.cavities()[0].u_left, 0.125));
        assert!(approx(cav.cavities()[0].u_right, 4.0 / 3.0 - 0.0625));
    }

    #[test]
    fn window_yields_cripple_cavities() {
        let (w, layout) = window_layout();
        let cav = decompose(&w, &CavityConfig::default(), Some(&layout)).unwrap();
        let c = cav.cavities();
        assert_eq!(c.len(), 6);

        // Full-height bays on either side of the window.
        assert_eq!(c[0].kind, CavityKind::Full);
        assert!(approx(c[0].u_left, 0.125) && approx(c[0].u_right, 0.875));
        assert!(approx(c[0].v_bottom, 0.125) && approx(c[0].v_top, 7.875));
        assert_eq!(c[5].kind, CavityKind::Full);
        assert!(approx(c[5].u_left, 3.125));

        // Below sill / above header, split by the cripple studs.
        assert!(approx(c[1].u_left, 1.0) && approx(c[1].u_right, 1.9375));
        assert!(approx(c[1].v_bottom, 0.125) && approx(c[1].v_top, 2.875));
        assert!(approx(c[2].u_left, 1.0));
        assert!(approx(c[2].v_bottom, 6.5) && approx(c[2].v_top, 7.875));
        assert!(approx(c[3].u_left, 2.0625) && approx(c[3].u_right, 3.0));
        for cavity in &c[1..5] {
            assert_eq!(cavity.kind, CavityKind::Cripple);
        }

        // The window itself is not a cavity.
        assert!(cav.find_cavity_for_uv(2.0, 4.5).is_none());
    }

    #[test]
    fn cripple_zone_marks_cavity() {
        let layout = FramingLayout::new()
            .stud(0.0625, T, 0.0, 8.0)
            .stud(1.5, T, 0.0, 8.0)
            .cripple_zone(crate::CrippleZone { u_min: 0.0, u_max: 2.0, v_min: 0.0, v_max: 8.0 });
        let cav = decompose(&wall(4.0, 8.0), &CavityConfig::default(), Some(&layout)).unwrap();
        assert_eq!(cav.cavities()[0].kind, CavityKind::Cripple);
        // The void from the last stud to the open wall end is bounded by the
        // wall end itself.
        assert_eq!(cav.cavities()[1].kind, CavityKind::Full);
        assert!(approx(cav.cavities()[1].u_right, 4.0));
    }

    #[test]
    fn same_router_contract_for_both_modes() {
        let w = wall(4.0, 8.0);
        let derived = decompose(&w, &CavityConfig::default(), None).unwrap();
        let layout = FramingLayout::new()
            .stud(0.0, T, 0.0, 8.0)
            .stud(4.0 / 3.0, T, 0.0, 8.0)
            .stud(8.0 / 3.0, T, 0.0, 8.0)
            .stud(4.0, T, 0.0, 8.0);
        let framing = decompose(&w, &CavityConfig::default(), Some(&layout)).unwrap();

        assert_eq!(derived.len(), 3);
        assert_eq!(framing.len(), 3);
        for (d, f) in derived.cavities().iter().zip(framing.cavities()) {
            assert!(approx(d.u_left, f.u_left));
            assert!(approx(d.u_right, f.u_right));
            assert_ne!(d.source_mode, f.source_mode);
        }
    }
}

// ── Spatial queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod queries {
    use super::helpers::{wall, window_layout};
    use crate::{decompose, CavityConfig, SourceMode, WallCavities};

    fn window_cavities() -> WallCavities {
        let (w, layout) = window_layout();
        decompose(&w, &CavityConfig::default(), Some(&layout)).unwrap()
    }

    #[test]
    fn empty_set_keeps_caller_tolerance() {
        let w = wall(10.0, 8.0);
        let cav = WallCavities::empty(w.id, w.frame, SourceMode::Derived, 1e-4);
        assert!(cav.is_empty());
        assert_eq!(cav.tolerance(), 1e-4);
        assert!(cav.find_cavity_for_uv(1.0, 1.0).is_none());
    }

    #[test]
    fn point_inside_cavity() {
        let cav = window_cavities();
        assert_eq!(cav.find_cavity_for_uv(0.5, 4.0).unwrap().id.index(), 0);
        assert_eq!(cav.find_cavity_for_uv(1.5, 1.0).unwrap().id.index(), 1);
        assert_eq!(cav.find_cavity_for_uv(2.5, 7.0).unwrap().id.index(), 4);
    }

    #[test]
    fn boundary_point_is_inside() {
        let cav = window_cavities();
        assert_eq!(cav.find_cavity_for_uv(0.875, 4.0).unwrap().id.index(), 0);
        assert_eq!(cav.find_cavity_for_uv(0.5, 0.125).unwrap().id.index(), 0);
    }

    #[test]
    fn point_in_stud_falls_back_to_nearest() {
        let cav = window_cavities();
        assert!(cav.find_cavity_for_uv(0.9, 1.0).is_none());
        assert_eq!(cav.find_nearest_cavity(0.9, 1.0).unwrap().id.index(), 0);
        assert_eq!(cav.find_nearest_cavity(0.98, 1.0).unwrap().id.index(), 1);
    }

    #[test]
    fn nearest_tie_goes_to_lowest_id() {
        let cav = window_cavities();
        // Stud centerline between cavity 0 and cavity 1.
        let (c, d) = cav.nearest_with_distance(0.9375, 1.0).unwrap();
        assert_eq!(c.id.index(), 0);
        assert!((d - 0.0625).abs() < 1e-9);
    }

    #[test]
    fn adjacent_cavities_share_a_stud() {
        let cav = window_cavities();
        let ids = |i: usize| -> Vec<usize> {
            let c = &cav.cavities()[i];
            cav.find_adjacent_cavities(c).iter().map(|a| a.id.index()).collect()
        };
        assert_eq!(ids(0), vec![1, 2]);
        assert_eq!(ids(1), vec![0, 3]);
        assert_eq!(ids(4), vec![2, 5]);
        assert_eq!(ids(5), vec![3, 4]);
    }
}

// ── Batch ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch {
    use wr_core::WallId;

    use super::helpers::wall;
    use crate::{decompose_all, CavityConfig, CavityError, WallJob};

    #[test]
    fn failing_wall_does_not_stop_others() {
        let config = CavityConfig::default();
        let mut a = wall(10.0, 8.0);
        a.id = WallId(3);
        let mut b = wall(10.0, 0.2); // shorter than min_clear_height
        b.id = WallId(1);
        let mut c = wall(6.0, 8.0);
        c.id = WallId(2);

        let jobs = [
            WallJob::new(&a, &config, None),
            WallJob::new(&b, &config, None),
            WallJob::new(&c, &config, None),
        ];
        let batch = decompose_all(&jobs).unwrap();
        assert_eq!(batch.walls.len(), 2);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].0, WallId(1));
        assert!(matches!(batch.failures[0].1, CavityError::Config { .. }));
        let keys: Vec<_> = batch.walls.keys().copied().collect();
        assert_eq!(keys, vec![WallId(2), WallId(3)]);
        assert_eq!(batch.cavity_count(), 8 + 5);
    }

    #[test]
    fn malformed_wall_aborts_batch() {
        let config = CavityConfig::default();
        let good = wall(10.0, 8.0);
        let mut bad = wall(10.0, 8.0);
        bad.id = WallId(9);
        bad.height = f64::NAN;
        let jobs = [WallJob::new(&good, &config, None), WallJob::new(&bad, &config, None)];
        let err = decompose_all(&jobs).unwrap_err();
        assert!(err.is_malformed());
    }
}

// ── Randomized invariants ─────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use wr_core::{Opening, Uv, Wall};

    use super::helpers::wall;
    use crate::{decompose, CavityConfig, FramingLayout, HorizontalKind, WallCavities};

    fn random_wall(rng: &mut SmallRng) -> Wall {
        let length = rng.gen_range(3.0..30.0);
        let height = rng.gen_range(7.0..12.0);
        let mut w = wall(length, height);
        for _ in 0..rng.gen_range(0..3) {
            let u0 = rng.gen_range(0.0..length - 1.0);
            let u1 = (u0 + rng.gen_range(0.5..4.0)).min(length);
            let v0 = rng.gen_range(0.0..height - 1.0);
            let v1 = (v0 + rng.gen_range(0.5..5.0)).min(height);
            w.openings.push(Opening::new(u0, u1, v0, v1));
        }
        w
    }

    fn check(w: &Wall, config: &CavityConfig, cav: &WallCavities) {
        let tol = config.tolerance;
        let cs = cav.cavities();
        for (i, a) in cs.iter().enumerate() {
            assert!(a.width() >= config.min_clear_width - tol, "{a:?}");
            assert!(a.height() >= config.min_clear_height - tol, "{a:?}");
            assert!(a.u_left >= -tol && a.u_right <= w.length + tol);
            assert!(a.v_bottom >= -tol && a.v_top <= w.height + tol);
            for b in &cs[i + 1..] {
                assert!(!a.overlaps(b, tol), "overlap: {a:?} / {b:?}");
            }
            for o in &w.openings {
                let inside_u = a.u_left < o.u_max - tol && o.u_min < a.u_right - tol;
                let inside_v = a.v_bottom < o.v_max - tol && o.v_min < a.v_top - tol;
                assert!(!(inside_u && inside_v), "cavity {a:?} overlaps opening {o:?}");
            }
            // Every cavity is found at its own center.
            let c = a.center();
            assert_eq!(cav.find_cavity_for_uv(c.u, c.v).map(|x| x.id), Some(a.id));
            assert!(a.contains(Uv::new(c.u, c.v), 0.0));
        }
    }

    #[test]
    fn derived_cavities_never_overlap() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let w = random_wall(&mut rng);
            let config = CavityConfig {
                stud_spacing: rng.gen_range(0.8..2.5),
                ..CavityConfig::default()
            };
            let cav = decompose(&w, &config, None).unwrap();
            check(&w, &config, &cav);
        }
    }

    #[test]
    fn framing_cavities_never_overlap() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            let w = random_wall(&mut rng);
            let t = rng.gen_range(0.1..0.2);
            let mut layout = FramingLayout::new()
                .horizontal(HorizontalKind::BottomPlate, t / 2.0, t, 0.0, w.length)
                .horizontal(HorizontalKind::TopPlate, w.height - t / 2.0, t, 0.0, w.length);
            let mut u = 0.0;
            while u <= w.length {
                let v0 = if rng.gen_bool(0.2) { rng.gen_range(t..w.height / 2.0) } else { t };
                layout = layout.stud(u, t, v0, w.height - t);
                u += rng.gen_range(0.5..2.0);
            }
            for _ in 0..rng.gen_range(0..3) {
                let v = rng.gen_range(1.0..w.height - 1.0);
                let u0 = rng.gen_range(0.0..w.length / 2.0);
                layout = layout.horizontal(HorizontalKind::Blocking, v, t, u0, u0 + 1.5);
            }
            let config = CavityConfig::default();
            let cav = decompose(&w, &config, Some(&layout)).unwrap();
            check(&w, &config, &cav);
        }
    }
}

// ── Serialization ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod serde_roundtrip {
    use super::helpers::window_layout;
    use crate::{decompose, Cavity, CavityConfig, FramingLayout};

    #[test]
    fn cavity_list_roundtrip() {
        let (w, layout) = window_layout();
        let cav = decompose(&w, &CavityConfig::default(), Some(&layout)).unwrap();
        let json = serde_json::to_string(cav.cavities()).unwrap();
        let back: Vec<Cavity> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_slice(), cav.cavities());
    }

    #[test]
    fn layout_roundtrip() {
        let (_, layout) = window_layout();
        let json = serde_json::to_string(&layout).unwrap();
        let back: FramingLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
    }
}
