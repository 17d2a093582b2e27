//! Counselor UI crate - routing, declarative views, and the client event loop.
//!
//! Views are plain data built by pure functions in [`pages`]. The
//! [`client::Client`] turns binding activations into chat turns, record
//! submissions and route changes, then hands the fresh view to a
//! [`client::Renderer`].
//!
//! # Modules
//!
//! - [`router`]: location fragment and route resolution
//! - [`view`]: node tree, bindings, actions
//! - [`shell`]: brand bar, live clock, navigation pills
//! - [`pages`]: one view function per route
//! - [`charts`]: bar and pie chart data for the placements view
//! - [`content`]: static page content
//! - [`client`]: event dispatch and the `Renderer` seam

pub mod charts;
pub mod client;
pub mod content;
pub mod pages;
pub mod router;
pub mod shell;
pub mod view;

pub use client::{Activation, Client, ListenHandle, Notice, NoticeLevel, Renderer};
pub use pages::ViewState;
pub use router::{Location, Transition, ViewRouter};
pub use view::{Action, Binding, InputKind, Node, View};
