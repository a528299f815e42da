// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lodestone Hooks: ordered, independently cancelable callback registries.
//!
//! A [`Hooks`] value is a broadcast list: subscribers are invoked in
//! registration order and no result is aggregated. It is the one subscription
//! primitive shared by the rest of the Lodestone stack: pointer streams,
//! resize notifications, and repaint requests all go through it.
//!
//! ## Contract
//!
//! - [`Hooks::add`] registers a callback and returns a [`Hook`] handle.
//! - [`Hook::remove`] is idempotent: removing twice, removing an unknown
//!   hook, or removing after the registry has been dropped are all no-ops.
//! - [`Hooks::trigger`] invokes every callback that was registered when the
//!   trigger started, in insertion order. Callbacks added during a trigger
//!   are not invoked in that same pass; callbacks removed mid-pass are
//!   skipped if not yet reached. A callback may remove its own hook.
//! - [`Hooks::once`] removes its own subscription *before* invoking the user
//!   callback, so re-subscribing to the same registry from inside the
//!   callback cannot be re-entered by the in-flight dispatch.
//!
//! Callbacks are infallible `FnMut(&A)`; there is no error channel to
//! isolate, so one subscriber can never prevent the rest from running.
//!
//! ## Minimal example
//!
//! ```
//! use lodestone_hooks::Hooks;
//! use core::cell::Cell;
//! use std::rc::Rc;
//!
//! let hooks: Hooks<u32> = Hooks::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let seen2 = seen.clone();
//! let hook = hooks.add(move |n| seen2.set(seen2.get() + n));
//!
//! hooks.trigger(&3);
//! assert_eq!(seen.get(), 3);
//!
//! hook.remove();
//! hooks.trigger(&3);
//! assert_eq!(seen.get(), 3);
//! ```
//!
//! Cloning a `Hooks` value shares the underlying registry; this is how drag
//! sessions subscribe scoped listeners from inside other hook callbacks.
//! The whole type is single-threaded by design (see the concurrency notes in
//! the viewer crate): it is `Rc`-based and neither `Send` nor `Sync`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use smallvec::SmallVec;

/// Identifier for a registered hook.
///
/// Identifiers are allocated from a per-registry monotonic counter and are
/// never reused, so a stale [`Hook`] handle can never remove a hook it did
/// not create.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HookId(u64);

type Callback<A> = Rc<RefCell<dyn FnMut(&A)>>;

struct Entry<A: 'static> {
    id: HookId,
    cb: Callback<A>,
}

/// Registry state. Entries stay sorted by id, which is insertion order.
struct Registry<A: 'static> {
    entries: Vec<Entry<A>>,
    next: u64,
}

impl<A: 'static> Registry<A> {
    fn position(&self, id: HookId) -> Option<usize> {
        self.entries.binary_search_by_key(&id, |e| e.id).ok()
    }
}

/// An ordered broadcast list of callbacks.
///
/// See the [crate docs](crate) for the full contract. Cloning shares the
/// underlying registry.
pub struct Hooks<A: 'static> {
    inner: Rc<RefCell<Registry<A>>>,
}

impl<A: 'static> Hooks<A> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                entries: Vec::new(),
                next: 0,
            })),
        }
    }

    /// Registers `cb`, returning a handle that can cancel the subscription.
    pub fn add(&self, cb: impl FnMut(&A) + 'static) -> Hook<A> {
        let mut inner = self.inner.borrow_mut();
        let id = HookId(inner.next);
        inner.next += 1;
        inner.entries.push(Entry {
            id,
            cb: Rc::new(RefCell::new(cb)),
        });
        Hook {
            registry: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Registers `cb` to run at most once.
    ///
    /// The subscription is removed *before* `cb` is invoked, so a callback
    /// that re-subscribes to this registry will not be re-triggered by the
    /// dispatch that is already in flight.
    pub fn once(&self, cb: impl FnOnce(&A) + 'static) -> Hook<A> {
        let cb = RefCell::new(Some(cb));
        let own: Rc<RefCell<Option<Hook<A>>>> = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&own);
        let hook = self.add(move |arg| {
            if let Some(hook) = slot.borrow_mut().take() {
                hook.remove();
            }
            if let Some(cb) = cb.borrow_mut().take() {
                cb(arg);
            }
        });
        *own.borrow_mut() = Some(hook.clone());
        hook
    }

    /// Invokes every currently registered callback, in insertion order.
    ///
    /// The live entry list is snapshotted up front, so mutating the registry
    /// from inside a callback is safe: additions are deferred to the next
    /// trigger, removals take effect immediately for entries not yet
    /// reached. A callback that is already executing (a re-entrant trigger
    /// of the same registry) is skipped rather than re-entered.
    pub fn trigger(&self, arg: &A) {
        let snapshot: SmallVec<[(HookId, Callback<A>); 8]> = {
            let inner = self.inner.borrow();
            inner
                .entries
                .iter()
                .map(|e| (e.id, Rc::clone(&e.cb)))
                .collect()
        };
        for (id, cb) in snapshot {
            if self.inner.borrow().position(id).is_none() {
                continue;
            }
            if let Ok(mut cb) = cb.try_borrow_mut() {
                cb(arg);
            }
        }
    }

    /// Returns the number of registered hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Returns `true` if no hooks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }
}

impl<A: 'static> Default for Hooks<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> Clone for Hooks<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: 'static> fmt::Debug for Hooks<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").field("len", &self.len()).finish()
    }
}

/// Handle to a registered callback.
///
/// The registry exclusively owns the callback; the handle only identifies
/// it. Dropping the handle does not cancel the subscription; call
/// [`Hook::remove`] for that. Dropping the owning registry removes all of
/// its hooks implicitly, after which `remove` is a no-op.
pub struct Hook<A: 'static> {
    registry: Weak<RefCell<Registry<A>>>,
    id: HookId,
}

impl<A: 'static> Hook<A> {
    /// Cancels the subscription. Idempotent; a no-op once the hook is gone
    /// or the registry has been dropped.
    pub fn remove(&self) {
        if let Some(inner) = self.registry.upgrade() {
            let mut inner = inner.borrow_mut();
            if let Some(idx) = inner.position(self.id) {
                inner.entries.remove(idx);
            }
        }
    }

    /// Returns this hook's identifier.
    #[must_use]
    pub fn id(&self) -> HookId {
        self.id
    }
}

impl<A: 'static> Clone for Hook<A> {
    fn clone(&self) -> Self {
        Self {
            registry: Weak::clone(&self.registry),
            id: self.id,
        }
    }
}

impl<A: 'static> fmt::Debug for Hook<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cell::Cell;

    #[test]
    fn triggers_in_insertion_order() {
        let hooks: Hooks<()> = Hooks::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in [1, 2, 3] {
            let order = Rc::clone(&order);
            hooks.add(move |()| order.borrow_mut().push(tag));
        }

        hooks.trigger(&());
        assert_eq!(*order.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn trigger_passes_the_payload_through() {
        let hooks: Hooks<(f64, f64, &str)> = Hooks::new();
        let seen = Rc::new(RefCell::new(None));

        let seen2 = Rc::clone(&seen);
        hooks.add(move |&(x, y, tag)| *seen2.borrow_mut() = Some((x, y, tag)));

        hooks.trigger(&(800.0, 600.0, "resize"));
        assert_eq!(*seen.borrow(), Some((800.0, 600.0, "resize")));
    }

    #[test]
    fn add_then_remove_means_zero_invocations() {
        let hooks: Hooks<()> = Hooks::new();
        let count = Rc::new(Cell::new(0));

        let count2 = Rc::clone(&count);
        let hook = hooks.add(move |()| count2.set(count2.get() + 1));
        hook.remove();

        hooks.trigger(&());
        assert_eq!(count.get(), 0);
        assert!(hooks.is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let hooks: Hooks<()> = Hooks::new();
        let hook = hooks.add(|()| {});
        hook.remove();
        hook.remove();
        assert_eq!(hooks.len(), 0);
    }

    #[test]
    fn remove_after_registry_drop_is_a_no_op() {
        let hooks: Hooks<()> = Hooks::new();
        let hook = hooks.add(|()| {});
        drop(hooks);
        hook.remove();
    }

    #[test]
    fn callback_removing_its_own_hook_stops_future_invocations_only() {
        let hooks: Hooks<()> = Hooks::new();
        let own: Rc<RefCell<Option<Hook<()>>>> = Rc::new(RefCell::new(None));
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let own2 = Rc::clone(&own);
        let first2 = Rc::clone(&first);
        let hook = hooks.add(move |()| {
            first2.set(first2.get() + 1);
            if let Some(hook) = own2.borrow_mut().take() {
                hook.remove();
            }
        });
        *own.borrow_mut() = Some(hook);

        let second2 = Rc::clone(&second);
        hooks.add(move |()| second2.set(second2.get() + 1));

        hooks.trigger(&());
        hooks.trigger(&());

        // The self-removing callback ran once; its peer ran every time.
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn removal_mid_trigger_skips_entries_not_yet_reached() {
        let hooks: Hooks<()> = Hooks::new();
        let victim_runs = Rc::new(Cell::new(0));

        let victim_slot: Rc<RefCell<Option<Hook<()>>>> = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&victim_slot);
        hooks.add(move |()| {
            if let Some(victim) = slot.borrow_mut().take() {
                victim.remove();
            }
        });

        let victim_runs2 = Rc::clone(&victim_runs);
        let victim = hooks.add(move |()| victim_runs2.set(victim_runs2.get() + 1));
        *victim_slot.borrow_mut() = Some(victim);

        hooks.trigger(&());
        assert_eq!(victim_runs.get(), 0);
    }

    #[test]
    fn additions_mid_trigger_wait_for_the_next_pass() {
        let hooks: Hooks<()> = Hooks::new();
        let late_runs = Rc::new(Cell::new(0));

        let hooks2 = hooks.clone();
        let late_runs2 = Rc::clone(&late_runs);
        let armed = Cell::new(true);
        hooks.add(move |()| {
            if armed.replace(false) {
                let late_runs3 = Rc::clone(&late_runs2);
                hooks2.add(move |()| late_runs3.set(late_runs3.get() + 1));
            }
        });

        hooks.trigger(&());
        assert_eq!(late_runs.get(), 0, "added mid-pass, must not run this pass");

        hooks.trigger(&());
        assert_eq!(late_runs.get(), 1);
    }

    #[test]
    fn once_runs_once_and_unsubscribes_before_invoking() {
        let hooks: Hooks<u32> = Hooks::new();
        let runs = Rc::new(Cell::new(0));

        let hooks2 = hooks.clone();
        let runs2 = Rc::clone(&runs);
        hooks.once(move |&n| {
            runs2.set(runs2.get() + n);
            // Re-subscribe from inside the callback. The in-flight dispatch
            // must not invoke this new subscription.
            let runs3 = Rc::clone(&runs2);
            hooks2.add(move |&n| runs3.set(runs3.get() + n * 100));
        });

        hooks.trigger(&1);
        assert_eq!(runs.get(), 1);

        hooks.trigger(&1);
        assert_eq!(runs.get(), 101);
    }

    #[test]
    fn clones_share_the_registry() {
        let hooks: Hooks<()> = Hooks::new();
        let clone = hooks.clone();
        let count = Rc::new(Cell::new(0));

        let count2 = Rc::clone(&count);
        clone.add(move |()| count2.set(count2.get() + 1));

        hooks.trigger(&());
        assert_eq!(count.get(), 1);
        assert_eq!(hooks.len(), 1);
    }
}
