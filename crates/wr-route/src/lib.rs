//! `wr-route` — two-phase cavity router.
//!
//! # Phases
//!
//! ```text
//! Phase 1  FixtureRouter   connector → nearest wall face within the search
//!                          radius → entry (u, v) + initial approach
//! Phase 2  WallRouter      per wall, connectors in a fixed order:
//!                          entry cavity → straight drop if the column is
//!                          free, else nearest free column with a jog
//! ```
//!
//! [`RoutePlanner`] chains cavity decomposition and both phases into one
//! batch call.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`assign`]    | `FixtureRouter`, `assign`, `WallAssignment`, `Approach`    |
//! | [`router`]    | `WallRouter`, `RoutingPass`                                |
//! | [`occupancy`] | `OccupancyRecord`, `ClaimedInterval`                       |
//! | [`route`]     | `Route`, `RoutePoint`, `RouteStatus`, `UnroutedReason`     |
//! | [`config`]    | `FixtureConfig`, `RouterConfig`, `ProcessingOrder`         |
//! | [`planner`]   | `RoutePlanner`, `RoutingOutcome`, `RoutingSummary`         |
//! | [`observer`]  | `RouteObserver`, `NoopObserver`                            |
//! | [`error`]     | `RouteError`, `RouteResult<T>`                             |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `serde`    | Serialize/deserialize routes, assignments, configs (default). |
//! | `parallel` | Phase 1 per connector and Phase 2 per wall on Rayon.       |

pub mod assign;
pub mod config;
pub mod error;
pub mod observer;
pub mod occupancy;
pub mod planner;
pub mod route;
pub mod router;


pub use assign::{approach_for, assign, Approach, FixtureRouter, WallAssignment};
pub use config::{FixtureConfig, ProcessingOrder, RouterConfig};
pub use error::{RouteError, RouteResult};
pub use observer::{NoopObserver, RouteObserver};
pub use occupancy::{ClaimedInterval, OccupancyRecord};
pub use planner::{RoutePlanner, RoutingOutcome, RoutingSummary};
pub use route::{Route, RoutePoint, RouteStatus, UnroutedReason};
pub use router::{RoutingPass, WallRouter};
