//! Dune Navigation and Dialog Guards
//!
//! Stateful protection against hostile navigation:
//! - bounded navigation history with rapid-redirect-chain detection and
//!   forced rollback to an earlier safe page
//! - lexical popup/redirect URL blocking
//! - a pure mirror of the injected script-navigation hijack policy
//! - scam alert/confirm dialog suppression

mod dialog;
mod hijack;
mod history;
mod nav;

pub use dialog::{DialogDecision, DialogGuard, DialogKind};
pub use hijack::{should_suppress, ScriptNavKind};
pub use history::{NavigationEvent, NavigationHistory};
pub use nav::{NavigationGuard, PageStartOutcome};
