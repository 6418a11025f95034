//! # Bluetooth Permission Gate
//!
//! Printing needs permission to open Bluetooth connections. Granting is
//! asynchronous: a request is issued, and the answer arrives later through
//! a [`PermissionRequest`].
//!
//! Callers must not assume a request was granted; check again before every
//! transport attempt.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::transport::bluetooth::check_socket_access;

/// Request code tagged on Bluetooth-connect permission requests.
pub const BLUETOOTH_CONNECT_REQUEST: u32 = 1000;

/// Whether Bluetooth connections are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
}

/// A pending permission request.
pub struct PermissionRequest {
    code: u32,
    rx: Receiver<PermissionState>,
    result: Option<PermissionState>,
}

/// Completes a [`PermissionRequest`].
pub struct PermissionResponder {
    tx: Sender<PermissionState>,
}

impl PermissionResponder {
    /// Deliver the outcome. Ignored if the request was dropped.
    pub fn resolve(self, state: PermissionState) {
        let _ = self.tx.send(state);
    }
}

impl PermissionRequest {
    /// Create a pending request and the handle that completes it.
    pub fn channel(code: u32) -> (Self, PermissionResponder) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                code,
                rx,
                result: None,
            },
            PermissionResponder { tx },
        )
    }

    /// A request that is already answered.
    pub fn resolved(code: u32, state: PermissionState) -> Self {
        let (request, responder) = Self::channel(code);
        responder.resolve(state);
        request
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    /// The outcome, if it has arrived. Never blocks.
    ///
    /// A responder dropped without answering counts as denied.
    pub fn try_result(&mut self) -> Option<PermissionState> {
        if self.result.is_none() {
            self.result = match self.rx.try_recv() {
                Ok(state) => Some(state),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(PermissionState::Denied),
            };
        }
        self.result
    }

    /// Block up to `timeout` for the outcome.
    pub fn wait(&mut self, timeout: Duration) -> Option<PermissionState> {
        if self.result.is_none() {
            self.result = match self.rx.recv_timeout(timeout) {
                Ok(state) => Some(state),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => Some(PermissionState::Denied),
            };
        }
        self.result
    }
}

/// Source of Bluetooth permission decisions.
pub trait PermissionGate {
    /// Current state, without prompting.
    fn check(&self) -> PermissionState;

    /// Ask for permission. The answer arrives through the returned request.
    fn request(&self, code: u32) -> PermissionRequest;
}

impl<G: PermissionGate + ?Sized> PermissionGate for Box<G> {
    fn check(&self) -> PermissionState {
        (**self).check()
    }

    fn request(&self, code: u32) -> PermissionRequest {
        (**self).request(code)
    }
}

/// Always granted. Used with the simulated platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrantedPermission;

impl PermissionGate for GrantedPermission {
    fn check(&self) -> PermissionState {
        PermissionState::Granted
    }

    fn request(&self, code: u32) -> PermissionRequest {
        PermissionRequest::resolved(code, PermissionState::Granted)
    }
}

/// Decides by trying to open a Bluetooth socket.
///
/// On Linux access is governed by capabilities, group membership or a
/// sandbox policy, none of which can be granted from inside the process.
/// A request therefore re-checks on a background thread and reports what it
/// finds; the user fixes a denial outside the app and resumes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketPermission;

impl SocketPermission {
    fn current_state() -> PermissionState {
        match check_socket_access() {
            Ok(()) => PermissionState::Granted,
            Err(e) => {
                warn!(error = %e, "Bluetooth socket access denied");
                PermissionState::Denied
            }
        }
    }
}

impl PermissionGate for SocketPermission {
    fn check(&self) -> PermissionState {
        Self::current_state()
    }

    fn request(&self, code: u32) -> PermissionRequest {
        let (request, responder) = PermissionRequest::channel(code);
        debug!(code, "permission request issued");
        thread::spawn(move || responder.resolve(Self::current_state()));
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_then_resolved() {
        let (mut request, responder) = PermissionRequest::channel(BLUETOOTH_CONNECT_REQUEST);
        assert_eq!(request.code(), 1000);
        assert_eq!(request.try_result(), None);

        responder.resolve(PermissionState::Granted);
        assert_eq!(request.try_result(), Some(PermissionState::Granted));
        // Stays resolved
        assert_eq!(request.try_result(), Some(PermissionState::Granted));
    }

    #[test]
    fn test_dropped_responder_is_denied() {
        let (mut request, responder) = PermissionRequest::channel(7);
        drop(responder);
        assert_eq!(request.try_result(), Some(PermissionState::Denied));
    }

    #[test]
    fn test_wait_times_out() {
        let (mut request, _responder) = PermissionRequest::channel(7);
        assert_eq!(request.wait(Duration::from_millis(10)), None);
    }

    #[test]
    fn test_wait_for_background_answer() {
        let (mut request, responder) = PermissionRequest::channel(7);
        thread::spawn(move || responder.resolve(PermissionState::Denied));
        assert_eq!(
            request.wait(Duration::from_secs(5)),
            Some(PermissionState::Denied)
        );
    }

    #[test]
    fn test_granted_gate() {
        let gate = GrantedPermission;
        assert_eq!(gate.check(), PermissionState::Granted);
        let mut request = gate.request(BLUETOOTH_CONNECT_REQUEST);
        assert_eq!(request.try_result(), Some(PermissionState::Granted));
    }
}
