//! Reference-counted, process-wide windowing runtime.
//!
//! Windowing and graphics libraries typically need one-time global setup
//! and must not be initialized from several threads at once. A
//! [`SharedRuntime`] owns that global state for one backend:
//!
//! - the first [`acquire`](SharedRuntime::acquire) runs the initializer,
//! - every acquire returns a [`RuntimeLease`] and bumps the live count,
//! - dropping the last lease drops the runtime (its `Drop` is the teardown),
//! - [`RuntimeLease::lock_setup`] holds the same lock for per-window setup
//!   (window and context creation, reparenting), possibly across a call
//!   that only hands control back through a callback.
//!
//! Backends keep their `SharedRuntime` in a `static` built with
//! [`LazyLock`](std::sync::LazyLock), so the manager itself is created on
//! first use.
//!
//! ```text
//! render thread A ──acquire──┐            ┌──release── A
//!                            ▼            │
//!                    ┌───────────────┐    │
//!                    │ Mutex<State>  │◄───┘   refs: 0 → 1 → 2 → 1 → 0
//!                    │  runtime: R   │            init ▲        ▼ drop(R)
//!                    └───────────────┘
//! render thread B ──acquire──┘            └──release── B
//! ```

use std::sync::Arc;

use lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};

struct RuntimeState<R> {
    /// Live leases.
    refs: usize,
    /// Present while `refs > 0`.
    runtime: Option<R>,
}

/// Lazily initialized runtime shared by every live editor of one backend.
pub struct SharedRuntime<R> {
    state: Arc<Mutex<RuntimeState<R>>>,
}

impl<R> SharedRuntime<R> {
    /// Create an empty (uninitialized) runtime manager.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RuntimeState {
                refs: 0,
                runtime: None,
            })),
        }
    }

    /// Take a reference on the runtime, initializing it if this is the first.
    ///
    /// `init` runs with the lock held, so concurrent first acquirers never
    /// initialize twice. If `init` fails, nothing is counted and the next
    /// acquire tries again.
    pub fn acquire<E>(&self, init: impl FnOnce() -> Result<R, E>) -> Result<RuntimeLease<R>, E> {
        let mut state = self.state.lock();
        if state.runtime.is_none() {
            state.runtime = Some(init()?);
            tracing::debug!("shared windowing runtime initialized");
        }
        state.refs += 1;
        tracing::trace!(refs = state.refs, "runtime acquired");
        Ok(RuntimeLease {
            state: Arc::clone(&self.state),
        })
    }

    /// Number of outstanding leases.
    pub fn live_count(&self) -> usize {
        self.state.lock().refs
    }

    /// `true` while at least one lease keeps the runtime alive.
    pub fn is_initialized(&self) -> bool {
        self.state.lock().runtime.is_some()
    }
}

impl<R> Default for SharedRuntime<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// One reference on a [`SharedRuntime`]. Dropping it releases the reference.
///
/// Leases own their handle on the shared state, so a backend can move one
/// into a `'static` window handler and release it when the window goes away.
pub struct RuntimeLease<R> {
    state: Arc<Mutex<RuntimeState<R>>>,
}

impl<R> RuntimeLease<R> {
    /// Take the shared lock for per-window setup.
    ///
    /// Until the returned guard is dropped no other render thread can
    /// acquire, release or set up against this runtime. The guard owns its
    /// hold on the lock, so it can be moved into a window-builder callback
    /// and dropped once setup inside the callback is done. Do not release
    /// this lease while its guard is alive.
    pub fn lock_setup(&self) -> RuntimeSetup<R> {
        RuntimeSetup {
            state: self.state.lock_arc(),
        }
    }
}

/// Exclusive hold on a [`SharedRuntime`] during per-window setup.
pub struct RuntimeSetup<R> {
    state: ArcMutexGuard<RawMutex, RuntimeState<R>>,
}

impl<R> RuntimeSetup<R> {
    /// The runtime. Present while any lease is live.
    pub fn runtime(&mut self) -> Option<&mut R> {
        debug_assert!(
            self.state.runtime.is_some(),
            "runtime is initialized while a lease is live"
        );
        self.state.runtime.as_mut()
    }
}

impl<R> Drop for RuntimeLease<R> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        debug_assert!(state.refs > 0, "runtime lease released twice");
        state.refs = state.refs.saturating_sub(1);
        tracing::trace!(refs = state.refs, "runtime released");
        if state.refs == 0 {
            // Teardown happens in R's Drop, still under the lock.
            if state.runtime.take().is_some() {
                tracing::debug!("shared windowing runtime torn down");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counted(Arc<AtomicUsize>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn first_acquire_initializes_last_release_tears_down() {
        let teardowns = Arc::new(AtomicUsize::new(0));
        let inits = AtomicUsize::new(0);
        let shared = SharedRuntime::new();

        let init = || {
            inits.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(Counted(Arc::clone(&teardowns)))
        };

        let a = shared.acquire(init).unwrap();
        let b = shared.acquire(init).unwrap();
        assert_eq!(inits.load(Ordering::SeqCst), 1);
        assert_eq!(shared.live_count(), 2);

        drop(a);
        assert!(shared.is_initialized());
        assert_eq!(teardowns.load(Ordering::SeqCst), 0);

        drop(b);
        assert!(!shared.is_initialized());
        assert_eq!(shared.live_count(), 0);
        assert_eq!(teardowns.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reinitializes_after_full_release() {
        let inits = AtomicUsize::new(0);
        let shared = SharedRuntime::new();
        let init = || {
            inits.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(0u32)
        };

        drop(shared.acquire(init).unwrap());
        drop(shared.acquire(init).unwrap());
        assert_eq!(inits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_init_is_not_counted() {
        let shared: SharedRuntime<u32> = SharedRuntime::new();
        let result = shared.acquire(|| Err("no display"));
        assert!(matches!(result, Err("no display")));
        assert_eq!(shared.live_count(), 0);
        assert!(!shared.is_initialized());

        // A later acquire can still succeed.
        let lease = shared.acquire(|| Ok::<_, &str>(7)).unwrap();
        assert_eq!(lease.lock_setup().runtime().copied(), Some(7));
    }

    #[test]
    fn setup_guard_gives_mutable_access() {
        let shared = SharedRuntime::new();
        let lease = shared.acquire(|| Ok::<_, ()>(Vec::<u32>::new())).unwrap();
        lease.lock_setup().runtime().unwrap().push(1);
        lease.lock_setup().runtime().unwrap().push(2);
        assert_eq!(lease.lock_setup().runtime().cloned(), Some(vec![1, 2]));
    }

    #[test]
    fn setup_guard_blocks_other_acquirers() {
        let shared = Arc::new(SharedRuntime::new());
        let lease = shared.acquire(|| Ok::<_, ()>(0u32)).unwrap();
        let setup = lease.lock_setup();

        let (acquired_tx, acquired) = crossbeam_channel::bounded(1);
        let other = {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                let lease = shared.acquire(|| Ok::<_, ()>(1u32)).unwrap();
                acquired_tx.send(()).unwrap();
                drop(lease);
            })
        };

        // Moved to another thread, as a window-builder callback would.
        let holder = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(50));
            drop(setup);
        });
        assert!(
            acquired
                .recv_timeout(std::time::Duration::from_millis(20))
                .is_err()
        );

        holder.join().unwrap();
        acquired
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
        other.join().unwrap();
        assert_eq!(shared.live_count(), 1);
    }
}
