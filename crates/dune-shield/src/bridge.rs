//! Host boundary types.
//!
//! The rendering engine is an external collaborator reached through a
//! narrow interface: it forwards page events in, and exposes a single
//! evaluate-script entry point whose result arrives asynchronously.

use dune_guard::DialogKind;

/// Callback receiving a script's single string result, or `None` when the
/// evaluation produced nothing usable.
pub type ScriptCallback = Box<dyn FnOnce(Option<String>) + Send>;

/// Page-context script execution provided by the host engine.
///
/// `eval` must run the source in the page's script environment and invoke
/// the callback with the result once available. The call itself must not
/// block the event thread.
pub trait ScriptHost {
    fn eval(&self, script: String, callback: ScriptCallback);
}

/// Host page events, in the order the engine reports them.
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// An outgoing resource request is about to be fetched.
    RequestStarted { url: String },
    /// A top-level navigation began.
    PageStarted { url: String },
    /// The page finished loading.
    PageFinished { url: String },
    /// A link/navigation is about to be followed.
    NavigationRequested { url: String },
    /// The page asked to show a modal dialog.
    DialogRequested {
        kind: DialogKind,
        url: String,
        message: String,
    },
}

/// What the host must do after reporting an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageDirective {
    /// Nothing to do; proceed normally.
    Continue,
    /// Serve an empty response body instead of fetching the resource.
    ServeEmptyResponse,
    /// Cancel the pending navigation.
    CancelNavigation,
    /// Abandon the pending navigation and load this URL instead.
    LoadInstead { url: String },
    /// Auto-dismiss the dialog as if cancelled.
    SuppressDialog,
}
