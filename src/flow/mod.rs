//! # Screen Flow
//!
//! Intro → Title → NameEntry → Calendar → Celebration → Summary, strictly in
//! that order. [`state`] decides, [`controller`] acts, [`timers`] keeps track of
//! what is still scheduled.

pub mod controller;
pub mod state;
pub mod timers;

pub use controller::FlowController;
pub use state::{Effect, FetchPurpose, FlowEvent, FlowState, Notice, Screen, TimerKind, Transition};
pub use timers::TimerRegistry;
