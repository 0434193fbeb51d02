//! `xw-behavior`: agent decision rules and intent types.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`intent`]  | `Intent` enum (`Hold`, `MoveTo`, `Exit`)                        |
//! | [`context`] | `SimContext<'a>` (read-only tick snapshot), `Geometry`          |
//! | [`model`]   | `BehaviorModel` trait                                           |
//! | [`rules`]   | `IntersectionRules`, the vehicle/emergency/pedestrian rules     |
//! | [`frozen`]  | `FrozenBehavior`, a model in which every agent holds            |
//!
//! # Design notes
//!
//! The tick loop in xw-sim runs in two phases:
//!
//! 1. **Decide** (optionally parallel): every live agent calls
//!    `BehaviorModel::decide` against one shared `&SimContext`.  No mutation.
//! 2. **Apply** (sequential): xw-sim consumes the intents and mutates the
//!    grid and the agent store.
//!
//! Because every read in phase 1 goes through the snapshot, the order in
//! which agents decide never changes what they decide.

pub mod context;
pub mod frozen;
pub mod intent;
pub mod model;
pub mod rules;


pub use context::{Geometry, SimContext};
pub use frozen::FrozenBehavior;
pub use intent::Intent;
pub use model::BehaviorModel;
pub use rules::IntersectionRules;
