//! Script-navigation hijack policy.
//!
//! Pure mirror of the decision the injected navigation guard makes in the
//! page context: distinguish user-initiated navigation (shortly after a
//! pointer-down on a link) from script-initiated hijacks toward
//! suspicious targets. Keeping the decision here makes it testable
//! without a page.

/// Entry points the injected guard wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptNavKind {
    WindowOpen,
    PushState,
    LocationAssign,
    HrefSet,
}

impl ScriptNavKind {
    /// How long after a pointer-down this entry point still counts as
    /// user-initiated. `history.pushState` gets a longer window because
    /// single-page apps call it legitimately well after a click.
    pub fn grace_ms(self) -> u64 {
        match self {
            Self::PushState => 2_000,
            Self::WindowOpen | Self::LocationAssign | Self::HrefSet => 1_000,
        }
    }
}

/// Keywords marking a navigation target as a probable hijack destination.
const SUSPICIOUS_TARGETS: &[&str] = &["redirect", "track.php", "click.php"];

/// Decide whether a script-initiated navigation call should be suppressed.
///
/// Suppress only when both conditions hold: the call arrived past the
/// grace period of the last genuine link click, and the target looks
/// suspicious. Calls inside the grace period pass through unmodified.
pub fn should_suppress(kind: ScriptNavKind, target: &str, ms_since_pointer_down: u64) -> bool {
    if ms_since_pointer_down <= kind.grace_ms() {
        return false;
    }
    let target = target.to_lowercase();
    SUSPICIOUS_TARGETS.iter().any(|k| target.contains(k))
}
