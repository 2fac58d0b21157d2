//! Snapline Core Library
//!
//! Element alignment snapping for 2D canvas editors: while a shape is
//! dragged, its box corners and center are matched against the shapes in
//! view, the shape is pulled onto the nearest alignment and guide lines are
//! drawn on an overlay.

pub mod board;
pub mod candidates;
pub mod config;
pub mod error;
pub mod events;
pub mod guides;
pub mod host;
pub mod landmarks;
pub mod matcher;
pub mod snap;
pub mod viewport;

pub use board::{Board, Node, NodeId, Scene, Sky};
pub use candidates::{CandidateIndex, ShapeFilter};
pub use config::SnapConfig;
pub use error::{SnapError, SnapResult};
pub use events::{EventHub, EventKind, ListenerKey, Selection, SnapEvent, Subscriptions};
pub use guides::{GuideAxis, GuideRenderer, GuideStyle, Primitive, PrimitiveKey};
pub use host::{Overlay, SceneTree, SelectionSource, SnapApp};
pub use landmarks::{LandmarkSet, extract_group_landmarks, extract_landmarks};
pub use matcher::{AlignmentCandidate, SnapMatch, match_landmarks};
pub use snap::Snap;
pub use viewport::{ZoomLayer, shapes_in_viewport};
