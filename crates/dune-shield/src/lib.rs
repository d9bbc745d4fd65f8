//! Dune Filtering Facade
//!
//! Aggregates the request filter, navigation/dialog guards, and
//! page-context injections behind one host-facing surface.
//!
//! Flow:
//! 1. Host page events (request start, page start/finish, navigation,
//!    dialog) come in through [`Shield`]
//! 2. The facade dispatches to the relevant engine and returns a typed
//!    directive the host applies (serve empty body, cancel navigation,
//!    load a safe page, suppress a dialog)
//! 3. Blocked/stats notifications flow back to the host UI through
//!    [`Shield::poll_events`]

mod bridge;
mod dispatch;
mod facade;

pub use bridge::{PageDirective, PageEvent, ScriptCallback, ScriptHost};
pub use dispatch::{Injection, InjectionRegistry, ResultPolicy};
pub use facade::Shield;

pub use dune_filter::{Decision, FilterConfig, FilterEvent, PatternError, StatsSnapshot};
pub use dune_guard::{DialogDecision, DialogKind};
