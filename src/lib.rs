//! # gilt-compose
//!
//! A composable widget core: capability (mixin) composition and process-driven
//! lifecycle orchestration.
//!
//! Widgets acquire independent behaviours (a title, an access key, an
//! indicator, a label, a busy counter) by attaching capabilities to their
//! element in order; method and property lookups resolve deterministically in
//! that order. Dialogs move between closed, opening, open and closing by
//! running ordered, abortable step pipelines.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed element tree the capabilities decorate
//! - **[`mixin`]**: Capability registry, the `Element` host, values, theme hook
//! - **[`capabilities`]**: Titled, AccessKeyed, Indicator, Labelled, Pending
//! - **[`process`]**: Steps and processes (sync, async, delay; first failure aborts)
//! - **[`widget`]**: Component trait and the lifecycle state machine
//! - **[`widgets`]**: ActionWidget, ButtonOptionWidget, MultioptionWidget
//! - **[`dialog`]**: Dialog controller, action sets, behaviour hooks
//! - **[`event`]**: Key events (from crossterm) and key bindings
//! - **[`testing`]**: Textual outlines for snapshot assertions

// Foundation
pub mod dom;
pub mod mixin;

// Composition
pub mod capabilities;

// Orchestration
pub mod process;
pub mod widget;

// Components
pub mod dialog;
pub mod widgets;

// Input
pub mod event;

// Test helpers
pub mod testing;
