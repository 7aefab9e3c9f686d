//! Exact framing layout supplied by the framing-generation stage.
//!
//! Only positions matter here; the solid geometry of the members lives
//! elsewhere.  All coordinates are wall-local.

/// Role of a horizontal member.  Headers and sills bound cripple cavities.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HorizontalKind {
    BottomPlate,
    TopPlate,
    Header,
    Sill,
    Blocking,
}

impl HorizontalKind {
    /// `true` for members that frame an opening.
    #[inline]
    pub fn frames_opening(self) -> bool {
        matches!(self, HorizontalKind::Header | HorizontalKind::Sill)
    }
}

/// A stud, king/jack stud, or cripple stud.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerticalMember {
    /// Centerline position along the wall.
    pub u: f64,
    pub thickness: f64,
    pub v_start: f64,
    pub v_end: f64,
}

impl VerticalMember {
    pub fn new(u: f64, thickness: f64, v_start: f64, v_end: f64) -> Self {
        Self { u, thickness, v_start, v_end }
    }

    #[inline]
    pub fn u_min(&self) -> f64 {
        self.u - self.thickness * 0.5
    }

    #[inline]
    pub fn u_max(&self) -> f64 {
        self.u + self.thickness * 0.5
    }
}

/// A plate, header, sill, or blocking member.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HorizontalMember {
    pub kind: HorizontalKind,
    /// Centerline height above the wall base.
    pub v: f64,
    pub thickness: f64,
    pub u_start: f64,
    pub u_end: f64,
}

impl HorizontalMember {
    pub fn new(kind: HorizontalKind, v: f64, thickness: f64, u_start: f64, u_end: f64) -> Self {
        Self { kind, v, thickness, u_start, u_end }
    }

    #[inline]
    pub fn v_min(&self) -> f64 {
        self.v - self.thickness * 0.5
    }

    #[inline]
    pub fn v_max(&self) -> f64 {
        self.v + self.thickness * 0.5
    }
}

/// Region the framing generator marks as a cripple zone (above a header or
/// below a sill).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrippleZone {
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

/// Member positions for one wall.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FramingLayout {
    pub vertical_members: Vec<VerticalMember>,
    pub horizontal_members: Vec<HorizontalMember>,
    pub cripple_zones: Vec<CrippleZone>,
}

impl FramingLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a full-height stud of `thickness` between `v_start` and `v_end`.
    pub fn stud(mut self, u: f64, thickness: f64, v_start: f64, v_end: f64) -> Self {
        self.vertical_members.push(VerticalMember::new(u, thickness, v_start, v_end));
        self
    }

    pub fn horizontal(
        mut self,
        kind: HorizontalKind,
        v: f64,
        thickness: f64,
        u_start: f64,
        u_end: f64,
    ) -> Self {
        self.horizontal_members
            .push(HorizontalMember::new(kind, v, thickness, u_start, u_end));
        self
    }

    pub fn cripple_zone(mut self, zone: CrippleZone) -> Self {
        self.cripple_zones.push(zone);
        self
    }

    /// Largest vertical member thickness, used as the adjacency gap.
    pub fn max_vertical_thickness(&self) -> Option<f64> {
        self.vertical_members
            .iter()
            .map(|m| m.thickness)
            .reduce(f64::max)
    }
}
