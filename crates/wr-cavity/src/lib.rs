//! `wr-cavity` — cavity decomposition and spatial cavity queries.
//!
//! A *cavity* is a rectangular void bounded by framing members in one wall.
//! Pipes may only run inside cavities, so the router enumerates the legal
//! voids first and then routes inside them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`cavity`]    | `Cavity`, `CavityKind`, `SourceMode`                        |
//! | [`config`]    | `CavityConfig`                                              |
//! | [`layout`]    | `FramingLayout` and its member records                     |
//! | [`decompose`] | `CavitySource`, `decompose`, `decompose_with`               |
//! | [`index`]     | `WallCavities` (ordered cavities + R-tree)                  |
//! | [`batch`]     | `WallJob`, `decompose_all`, `DecompositionBatch`            |
//! | [`error`]     | `CavityError`, `CavityResult<T>`                            |
//!
//! # Modes
//!
//! - **Derived**: members synthesized from nominal stud spacing.
//! - **Framing**: exact member positions from the framing generator.
//!
//! Both produce the same [`Cavity`] type; the router never looks at which
//! mode produced a cavity.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on public records (default). |
//! | `parallel` | Runs [`decompose_all`] on Rayon's thread pool.            |

pub mod batch;
pub mod cavity;
pub mod config;
pub mod decompose;
pub mod error;
pub mod index;
pub mod layout;

#[cfg(test)]
mod tests;

pub use batch::{decompose_all, DecompositionBatch, WallJob};
pub use cavity::{Cavity, CavityKind, SourceMode};
pub use config::CavityConfig;
pub use decompose::{decompose, decompose_with, CavitySource};
pub use error::{CavityError, CavityResult};
pub use index::WallCavities;
pub use layout::{CrippleZone, FramingLayout, HorizontalKind, HorizontalMember, VerticalMember};
