//! Host environment detection.

use std::fmt;

use crate::host::Host;

/// Globals that only exist on server-side hosts
const SERVER_MARKERS: [&str; 3] = ["Deno", "Bun", "process"];

/// A structured call-site API exposed by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSiteApi {
    /// `util.getCallSites` (Node 22.9+)
    GetCallSites,
    /// `util.getCallSite`, the name used by Node before 23.3
    GetCallSite,
}

impl CallSiteApi {
    /// Lookup order: the current name wins over the legacy one.
    pub const ALL: [CallSiteApi; 2] = [CallSiteApi::GetCallSites, CallSiteApi::GetCallSite];

    /// Where the API lives in the realm
    pub fn global_path(&self) -> &'static str {
        match self {
            CallSiteApi::GetCallSites => "util.getCallSites",
            CallSiteApi::GetCallSite => "util.getCallSite",
        }
    }
}

/// The family of host the code is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentKind {
    /// The host hands out structured call sites
    CallSiteCapable(CallSiteApi),
    /// A server host that only offers `Error.prototype.stack`
    ServerStackOnly,
    /// No server markers; paths are URLs with nothing to be relative to
    BrowserLike,
}

impl EnvironmentKind {
    /// Returns true if file references can be made relative to a directory
    pub fn supports_relative_paths(&self) -> bool {
        !matches!(self, EnvironmentKind::BrowserLike)
    }
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentKind::CallSiteCapable(api) => write!(f, "call-site ({})", api.global_path()),
            EnvironmentKind::ServerStackOnly => write!(f, "server stack text"),
            EnvironmentKind::BrowserLike => write!(f, "browser-like"),
        }
    }
}

/// Classify the host. Markers are checked in priority order and the first
/// match wins; a host with no markers at all is browser-like.
pub fn detect<H: Host + ?Sized>(host: &H) -> EnvironmentKind {
    if let Some(api) = CallSiteApi::ALL
        .into_iter()
        .find(|api| host.has_global(api.global_path()))
    {
        return EnvironmentKind::CallSiteCapable(api);
    }

    if SERVER_MARKERS.iter().any(|marker| host.has_global(marker)) {
        EnvironmentKind::ServerStackOnly
    } else {
        EnvironmentKind::BrowserLike
    }
}
