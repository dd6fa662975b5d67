//! Grid geometry and interaction engine for the coach deck layout editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! editing session for one coach layout: mapping pointer input to grid cells,
//! running drag and resize gestures under collision and bounds rules, and
//! keeping the layout document and its editable JSON text in step. The host
//! page only wires DOM events to the engine and applies the resulting
//! [`engine::Action`]s.
//!
//! Everything except [`engine::Engine`] and [`render`] is plain Rust and runs
//! natively, which is how the headless CLI and the tests drive it.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Layout document, placed elements, and pure mutators |
//! | [`geometry`] | Footprints, collision, clamping, and gesture commits |
//! | [`viewport`] | Pixel/cell coordinate mapping |
//! | [`hit`] | Hit-testing against element bodies and resize handles |
//! | [`input`] | Pointer buttons, selection, and the gesture state machine |
//! | [`sync`] | Document/text synchronization |
//! | `lenient` | Field coercion for hand-edited layout files |
//! | [`catalog`] | Static element type registry and fallbacks |
//! | [`orientation`] | Degree-based orientation and legacy labels |
//! | [`render`] | Scene rendering to a 2D canvas |
//! | [`config`] | Pixel metrics |
//! | [`consts`] | Shared numeric constants |

pub mod catalog;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
mod lenient;
pub mod orientation;
pub mod render;
pub mod sync;
pub mod viewport;
