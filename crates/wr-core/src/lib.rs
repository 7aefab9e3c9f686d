//! `wr-core` — foundational types for the wall cavity router.
//!
//! This crate is a dependency of every other `wr-*` crate.  It has no `wr-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`ids`]       | `WallId`, `ConnectorId`, `CavityId`, `OwnerId`           |
//! | [`geo`]       | `Uv` (wall-local), `Vec3` / `Point3` (world)             |
//! | [`frame`]     | `WallFrame`, wall-local ↔ world transform                |
//! | [`wall`]      | `Wall`, `Opening`                                        |
//! | [`connector`] | `Connector`, `Domain`, `SystemType`, `ExitBoundary`      |
//! | [`error`]     | `CoreError`, `CoreResult`                                |
//!
//! # Units
//!
//! All lengths are in feet.  World up is `+Z`.  In the wall-local frame `u`
//! runs along the wall length from its start and `v` is height above the
//! wall base.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types (default). |

pub mod connector;
pub mod error;
pub mod frame;
pub mod geo;
pub mod ids;
pub mod wall;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use connector::{Connector, Domain, ExitBoundary, SystemType};
pub use error::{CoreError, CoreResult};
pub use frame::WallFrame;
pub use geo::{Point3, Uv, Vec3};
pub use ids::{CavityId, ConnectorId, OwnerId, WallId};
pub use wall::{Opening, Wall};
