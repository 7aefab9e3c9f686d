//! Flat row types written by output backends.

use wr_cavity::Cavity;
use wr_route::Route;

/// One cavity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CavityRow {
    pub wall_id:     u32,
    pub cavity_id:   u32,
    pub u_left:      f64,
    pub u_right:     f64,
    pub v_bottom:    f64,
    pub v_top:       f64,
    pub source_mode: &'static str,
    pub kind:        &'static str,
}

impl From<&Cavity> for CavityRow {
    fn from(c: &Cavity) -> Self {
        Self {
            wall_id:     c.wall_id.0,
            cavity_id:   c.id.0,
            u_left:      c.u_left,
            u_right:     c.u_right,
            v_bottom:    c.v_bottom,
            v_top:       c.v_top,
            source_mode: c.source_mode.as_str(),
            kind:        c.kind.as_str(),
        }
    }
}

/// One route summary.  Optional columns are empty for unrouted connectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRow {
    pub connector_id:  u32,
    pub wall_id:       u32,
    pub system_type:   &'static str,
    pub pipe_radius:   f64,
    pub cavity_id:     Option<u32>,
    pub status:        &'static str,
    pub reason:        Option<&'static str>,
    pub entry_u:       f64,
    pub entry_v:       f64,
    pub exit_u:        Option<f64>,
    pub exit_v:        Option<f64>,
    pub exit_boundary: &'static str,
    pub column_u:      Option<f64>,
    pub half_width:    Option<f64>,
    pub approach:      &'static str,
    pub jog:           bool,
    pub length:        f64,
}

impl From<&Route> for RouteRow {
    fn from(r: &Route) -> Self {
        Self {
            connector_id:  r.connector_id.0,
            wall_id:       r.wall_id.0,
            system_type:   r.system_type.as_str(),
            pipe_radius:   r.pipe_radius,
            cavity_id:     r.cavity_id.map(|c| c.0),
            status:        r.status.as_str(),
            reason:        r.status.reason().map(|x| x.as_str()),
            entry_u:       r.entry_uv.u,
            entry_v:       r.entry_uv.v,
            exit_u:        r.exit_uv.map(|e| e.u),
            exit_v:        r.exit_uv.map(|e| e.v),
            exit_boundary: r.exit_boundary.as_str(),
            column_u:      r.column_u(),
            half_width:    r.claimed.map(|c| c.half_width),
            approach:      r.approach.as_str(),
            jog:           r.has_jog(),
            length:        r.length(),
        }
    }
}

/// One path vertex of a route, in both coordinate systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePointRow {
    pub connector_id: u32,
    /// Position along the path, from 0.
    pub seq:          u32,
    pub u:            f64,
    pub v:            f64,
    pub x:            f64,
    pub y:            f64,
    pub z:            f64,
}

impl RoutePointRow {
    /// All path vertices of `route`, in order.
    pub fn from_route(route: &Route) -> Vec<Self> {
        route
            .path
            .iter()
            .enumerate()
            .map(|(i, p)| Self {
                connector_id: route.connector_id.0,
                seq:          i as u32,
                u:            p.uv.u,
                v:            p.uv.v,
                x:            p.world.x,
                y:            p.world.y,
                z:            p.world.z,
            })
            .collect()
    }
}
