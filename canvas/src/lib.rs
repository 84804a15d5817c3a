//! Erase-by-group drawing tool over an in-memory 2D scene graph.
//!
//! The user picks a shape, draws free-hand strokes that are clipped in real
//! time to the shape's bounding box, and on completion the strokes are grouped
//! with the shape so they act as a mask on it. The host layer wires raw
//! pointer events to [`engine::EngineCore`] and applies the returned
//! [`engine::Action`]s; rendering and persistence live outside this crate.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Event-driven facade over the board and the eraser |
//! | [`eraser`] | Selection state machine for the erase gesture |
//! | [`board`] | Scene, groups, drawing surface and selection overlay |
//! | [`scene`] | Shape variants and the ordered shape store |
//! | [`group`] | Named group lifecycle (create, attach, ungroup) |
//! | [`stroke`] | Pencil capture and stroke styles |
//! | [`geometry`] | Points, bounds and the selection-range test |
//! | [`hit`] | Hit-testing against shapes |
//! | [`input`] | Raw pointer/touch event normalization |
//! | [`config`] | Eraser configuration from the environment |
//! | [`consts`] | Shared constants (group prefix, default brush) |

pub mod board;
pub mod config;
pub mod consts;
pub mod engine;
pub mod eraser;
pub mod geometry;
pub mod group;
pub mod hit;
pub mod input;
pub mod scene;
pub mod stroke;
