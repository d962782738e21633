// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::LifecycleError;
use crate::view::ViewState;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// Tracks whether the page owning a form is still shown.
///
/// Clones share the flag. Once unmounted, a form never mounts again.
#[derive(Debug, Clone, Default)]
pub struct MountHandle {
    unmounted: Arc<AtomicBool>,
}

impl MountHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the page as gone. Responses arriving afterwards are discarded.
    pub fn unmount(&self) {
        self.unmounted.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !self.unmounted.load(Ordering::SeqCst)
    }

    /// # Errors
    ///
    /// Returns `LifecycleError::Unmounted` once [`Self::unmount`] was called.
    pub fn ensure_mounted(&self) -> Result<(), LifecycleError> {
        if self.is_mounted() {
            Ok(())
        } else {
            Err(LifecycleError::Unmounted)
        }
    }
}

/// Holds the busy flag for one in-flight operation and releases it on drop,
/// including when the operation's future is dropped mid-request.
pub struct BusyGuard<'a> {
    flag: &'a AtomicBool,
    view: &'a watch::Sender<ViewState>,
    mount: &'a MountHandle,
}

impl<'a> BusyGuard<'a> {
    /// Takes the busy flag.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::Busy` if another operation holds it.
    pub fn acquire(
        flag: &'a AtomicBool,
        view: &'a watch::Sender<ViewState>,
        mount: &'a MountHandle,
    ) -> Result<Self, LifecycleError> {
        mount.ensure_mounted()?;
        if flag
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(LifecycleError::Busy);
        }
        view.send_modify(|state| state.busy = true);
        Ok(Self { flag, view, mount })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
        if self.mount.is_mounted() {
            self.view.send_modify(|state| state.busy = false);
        }
    }
}
