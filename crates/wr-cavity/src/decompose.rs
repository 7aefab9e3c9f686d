//! Wall → cavity decomposition.
//!
//! One entry point, [`decompose_with`], branches on [`CavitySource`]:
//!
//! - **Derived** synthesizes member centerlines at `0, offset, offset + s,
//!   offset + 2s, …` (offset defaults to one spacing) and closes with an end
//!   member at the wall length.  A cavity spans each adjacent pair, from wall base to wall top,
//!   minus any opening footprint plus a sill/header allowance of one member
//!   thickness.
//! - **Framing** sweeps a grid over every member face and opening edge,
//!   marks each grid cell solid or void, and merges void cells into maximal
//!   rectangles: first into horizontal runs per band, then stacking runs with
//!   identical u-bounds.
//!
//! Both branches drop (never clamp) candidates below the minimum clear width
//! or height, then sort by `u_left`, `v_bottom` and assign ids.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use wr_core::{CavityId, CoreError, Opening, Wall};

use crate::layout::{CrippleZone, HorizontalMember};
use crate::{
    Cavity, CavityConfig, CavityKind, CavityResult, FramingLayout, SourceMode, WallCavities,
};

// ── CavitySource ──────────────────────────────────────────────────────────────

/// Where member positions come from.
#[derive(Copy, Clone, Debug)]
pub enum CavitySource<'a> {
    /// Nominal stud spacing from the [`CavityConfig`].
    Derived,
    /// Exact framing from the framing generator.
    Framing(&'a FramingLayout),
}

impl<'a> From<Option<&'a FramingLayout>> for CavitySource<'a> {
    fn from(layout: Option<&'a FramingLayout>) -> Self {
        match layout {
            Some(l) => CavitySource::Framing(l),
            None => CavitySource::Derived,
        }
    }
}

impl CavitySource<'_> {
    pub fn mode(&self) -> SourceMode {
        match self {
            CavitySource::Derived => SourceMode::Derived,
            CavitySource::Framing(_) => SourceMode::Framing,
        }
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Decompose `wall` into cavities, using exact framing when supplied.
///
/// A wall with no producible cavities yields an empty set, not an error.
///
/// # Errors
///
/// [`CavityError::Config`](crate::CavityError::Config) for parameters that
/// do not fit the wall; [`CavityError::Geometry`](crate::CavityError::Geometry)
/// for degenerate or malformed wall/layout input.
pub fn decompose(
    wall: &Wall,
    config: &CavityConfig,
    layout: Option<&FramingLayout>,
) -> CavityResult<WallCavities> {
    decompose_with(wall, config, CavitySource::from(layout))
}

/// Decompose `wall` from an explicit [`CavitySource`].
pub fn decompose_with(
    wall: &Wall,
    config: &CavityConfig,
    source: CavitySource<'_>,
) -> CavityResult<WallCavities> {
    wall.validate(config.tolerance)?;
    config.validate(wall)?;

    let (candidates, adjacency_gap) = match source {
        CavitySource::Derived => (derived_candidates(wall, config), config.member_thickness),
        CavitySource::Framing(layout) => {
            validate_layout(wall, layout)?;
            let gap = layout
                .max_vertical_thickness()
                .unwrap_or(config.member_thickness);
            (framing_candidates(wall, config, layout), gap)
        }
    };

    let mode = source.mode();
    let tol = config.tolerance;
    let mut cavities: Vec<Cavity> = candidates
        .into_iter()
        .filter(|c| {
            let keep = c.width() >= config.min_clear_width - tol
                && c.height() >= config.min_clear_height - tol;
            if !keep {
                trace!(
                    wall = %wall.id,
                    u_left = c.u_left, u_right = c.u_right,
                    v_bottom = c.v_bottom, v_top = c.v_top,
                    "dropping candidate cavity below minimum clear size"
                );
            }
            keep
        })
        .map(|c| c.into_cavity(wall, mode))
        .collect();

    cavities.sort_by(|a, b| {
        a.u_left
            .total_cmp(&b.u_left)
            .then_with(|| a.v_bottom.total_cmp(&b.v_bottom))
    });

    debug!(wall = %wall.id, mode = mode.as_str(), cavities = cavities.len(), "decomposed wall");

    Ok(WallCavities::new(
        wall.id,
        wall.frame,
        mode,
        cavities,
        adjacency_gap + tol,
        tol,
    ))
}

// ── Candidate rectangles ──────────────────────────────────────────────────────

/// A cavity before filtering and numbering.
#[derive(Copy, Clone, Debug)]
struct Candidate {
    u_left: f64,
    u_right: f64,
    v_bottom: f64,
    v_top: f64,
    kind: CavityKind,
}

impl Candidate {
    fn width(&self) -> f64 {
        self.u_right - self.u_left
    }

    fn height(&self) -> f64 {
        self.v_top - self.v_bottom
    }

    fn into_cavity(self, wall: &Wall, mode: SourceMode) -> Cavity {
        Cavity {
            id: CavityId::INVALID,
            wall_id: wall.id,
            u_left: self.u_left,
            u_right: self.u_right,
            v_bottom: self.v_bottom,
            v_top: self.v_top,
            source_mode: mode,
            kind: self.kind,
        }
    }
}

// ── Derived mode ──────────────────────────────────────────────────────────────

/// Member centerlines: `0`, then `first + k·spacing` short of the wall
/// length, then a closing member at the wall end.  With no interior member
/// the wall yields no members at all.
fn member_centerlines(length: f64, config: &CavityConfig) -> Vec<f64> {
    let tol = config.tolerance;
    let spacing = config.stud_spacing;
    let first = config.first_interior_member();

    let mut out = vec![0.0];
    let mut k = 0u64;
    loop {
        let p = first + k as f64 * spacing;
        if p >= length - tol {
            break;
        }
        if p > tol {
            out.push(p);
        }
        k += 1;
    }
    if out.len() < 2 {
        return Vec::new();
    }
    out.push(length);
    out
}

fn derived_candidates(wall: &Wall, config: &CavityConfig) -> Vec<Candidate> {
    let tol = config.tolerance;
    let half = config.member_thickness * 0.5;
    let allowance = config.member_thickness;
    let members = member_centerlines(wall.length, config);

    let mut out = Vec::new();
    for pair in members.windows(2) {
        let u_left = pair[0] + half;
        let u_right = pair[1] - half;
        if u_right - u_left <= tol {
            continue;
        }

        let blocking: Vec<&Opening> = wall
            .openings
            .iter()
            .filter(|o| o.overlaps_u(u_left, u_right, tol))
            .collect();

        let mut bands = vec![(0.0, wall.height)];
        for o in &blocking {
            bands = subtract_interval(&bands, o.v_min - allowance, o.v_max + allowance, tol);
        }

        let kind = if blocking.is_empty() {
            CavityKind::Full
        } else {
            CavityKind::Cripple
        };
        out.extend(bands.into_iter().map(|(v_bottom, v_top)| Candidate {
            u_left,
            u_right,
            v_bottom,
            v_top,
            kind,
        }));
    }
    out
}

/// Remove `[lo, hi]` from a sorted list of disjoint intervals.
fn subtract_interval(bands: &[(f64, f64)], lo: f64, hi: f64, tol: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(bands.len() + 1);
    for &(a, b) in bands {
        if hi <= a + tol || lo >= b - tol {
            out.push((a, b));
            continue;
        }
        if lo > a + tol {
            out.push((a, lo));
        }
        if hi < b - tol {
            out.push((hi, b));
        }
    }
    out
}

// ── Framing mode ──────────────────────────────────────────────────────────────

fn validate_layout(wall: &Wall, layout: &FramingLayout) -> CavityResult<()> {
    let malformed = |reason: String| -> CavityResult<()> {
        Err(CoreError::Malformed { wall: wall.id, reason }.into())
    };
    for (i, m) in layout.vertical_members.iter().enumerate() {
        let finite = [m.u, m.thickness, m.v_start, m.v_end].iter().all(|x| x.is_finite());
        if !finite || m.thickness < 0.0 || m.v_start > m.v_end {
            return malformed(format!("vertical member {i} is malformed: {m:?}"));
        }
    }
    for (i, m) in layout.horizontal_members.iter().enumerate() {
        let finite = [m.v, m.thickness, m.u_start, m.u_end].iter().all(|x| x.is_finite());
        if !finite || m.thickness < 0.0 || m.u_start > m.u_end {
            return malformed(format!("horizontal member {i} is malformed: {m:?}"));
        }
    }
    Ok(())
}

/// Axis-aligned solid rectangle in the sweep.
#[derive(Copy, Clone)]
struct Solid {
    u0: f64,
    u1: f64,
    v0: f64,
    v1: f64,
}

impl Solid {
    #[inline]
    fn contains(&self, u: f64, v: f64) -> bool {
        u > self.u0 && u < self.u1 && v > self.v0 && v < self.v1
    }
}

fn framing_candidates(wall: &Wall, config: &CavityConfig, layout: &FramingLayout) -> Vec<Candidate> {
    let tol = config.tolerance;
    let (len, height) = (wall.length, wall.height);
    let clamp_u = |u: f64| u.clamp(0.0, len);
    let clamp_v = |v: f64| v.clamp(0.0, height);

    // ── Collect solids: members and openings ──────────────────────────────
    let mut solids: Vec<Solid> = Vec::with_capacity(
        layout.vertical_members.len() + layout.horizontal_members.len() + wall.openings.len(),
    );
    solids.extend(layout.vertical_members.iter().map(|m| Solid {
        u0: clamp_u(m.u_min()),
        u1: clamp_u(m.u_max()),
        v0: clamp_v(m.v_start),
        v1: clamp_v(m.v_end),
    }));
    solids.extend(layout.horizontal_members.iter().map(|m| Solid {
        u0: clamp_u(m.u_start),
        u1: clamp_u(m.u_end),
        v0: clamp_v(m.v_min()),
        v1: clamp_v(m.v_max()),
    }));
    solids.extend(wall.openings.iter().map(|o| Solid {
        u0: clamp_u(o.u_min),
        u1: clamp_u(o.u_max),
        v0: clamp_v(o.v_min),
        v1: clamp_v(o.v_max),
    }));

    // ── Grid edges ────────────────────────────────────────────────────────
    let mut u_edges = vec![0.0, len];
    let mut v_edges = vec![0.0, height];
    for s in &solids {
        u_edges.extend([s.u0, s.u1]);
        v_edges.extend([s.v0, s.v1]);
    }
    let u_edges = sorted_unique(u_edges, tol);
    let v_edges = sorted_unique(v_edges, tol);
    let nu = u_edges.len() - 1;
    let nv = v_edges.len() - 1;

    // ── Classify cells by their center ────────────────────────────────────
    let void = |i: usize, j: usize| {
        let u = (u_edges[i] + u_edges[i + 1]) * 0.5;
        let v = (v_edges[j] + v_edges[j + 1]) * 0.5;
        !solids.iter().any(|s| s.contains(u, v))
    };

    // ── Merge: horizontal runs per band, then stack identical runs ───────
    let mut rects: Vec<(usize, usize, usize, usize)> = Vec::new(); // (i0, i1, j0, j1) exclusive ends
    let mut open: BTreeMap<(usize, usize), usize> = BTreeMap::new();
    for j in 0..nv {
        let mut next_open = BTreeMap::new();
        let mut i = 0;
        while i < nu {
            if !void(i, j) {
                i += 1;
                continue;
            }
            let start = i;
            while i < nu && void(i, j) {
                i += 1;
            }
            let j0 = open.remove(&(start, i)).unwrap_or(j);
            next_open.insert((start, i), j0);
        }
        rects.extend(open.into_iter().map(|((i0, i1), j0)| (i0, i1, j0, j)));
        open = next_open;
    }
    rects.extend(open.into_iter().map(|((i0, i1), j0)| (i0, i1, j0, nv)));

    let openers: Vec<&HorizontalMember> = layout
        .horizontal_members
        .iter()
        .filter(|m| m.kind.frames_opening())
        .collect();

    rects
        .into_iter()
        .map(|(i0, i1, j0, j1)| {
            let mut c = Candidate {
                u_left: u_edges[i0],
                u_right: u_edges[i1],
                v_bottom: v_edges[j0],
                v_top: v_edges[j1],
                kind: CavityKind::Full,
            };
            if is_cripple(&c, &openers, &layout.cripple_zones, tol) {
                c.kind = CavityKind::Cripple;
            }
            c
        })
        .collect()
}

/// A framing cavity is a cripple cavity if it sits in a marked cripple zone
/// or directly above/below a header or sill.
fn is_cripple(
    c: &Candidate,
    openers: &[&HorizontalMember],
    zones: &[CrippleZone],
    tol: f64,
) -> bool {
    let cu = (c.u_left + c.u_right) * 0.5;
    let cv = (c.v_bottom + c.v_top) * 0.5;
    if zones
        .iter()
        .any(|z| cu > z.u_min && cu < z.u_max && cv > z.v_min && cv < z.v_max)
    {
        return true;
    }
    openers.iter().any(|m| {
        let u_overlap = c.u_left < m.u_end - tol && m.u_start < c.u_right - tol;
        let touches = (c.v_bottom - m.v_max()).abs() <= tol || (c.v_top - m.v_min()).abs() <= tol;
        u_overlap && touches
    })
}

/// Sort and merge values closer than `tol`.
fn sorted_unique(mut xs: Vec<f64>, tol: f64) -> Vec<f64> {
    xs.sort_by(f64::total_cmp);
    let mut out: Vec<f64> = Vec::with_capacity(xs.len());
    for x in xs {
        match out.last() {
            Some(&last) if x - last <= tol => {}
            _ => out.push(x),
        }
    }
    out
}
