use std::sync::{Arc, RwLock, RwLockWriteGuard};

use super::invalidation::request_frame;
use super::runtime::{notify_signal_write, try_with_runtime, with_runtime, SignalId};

struct SignalInner<T> {
    id: SignalId,
    value: RwLock<T>,
}

/// A shared, observable cell.
///
/// Every clone points at the same value, which is how a host and a widget
/// share one piece of state (the drawer's open flag, for example) without
/// either side holding a private copy.
///
/// Reads inside an effect subscribe that effect; writes that change the value
/// re-run subscribed effects and request a frame. Values can be written from
/// any thread, but effects only run on the thread that created the signal;
/// a write from any other thread only requests a frame.
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        let id = with_runtime(|rt| rt.allocate_signal());
        Self {
            inner: Arc::new(SignalInner {
                id,
                value: RwLock::new(value),
            }),
        }
    }

    pub fn split(self) -> (ReadSignal<T>, WriteSignal<T>) {
        (
            ReadSignal {
                inner: self.inner.clone(),
            },
            WriteSignal { inner: self.inner },
        )
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.with(f)
    }

    pub fn with_untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.with_untracked(f)
    }

    /// True when both handles share the same cell.
    pub fn ptr_eq(&self, other: &Signal<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        self.inner.with(T::clone)
    }

    pub fn get_untracked(&self) -> T {
        self.inner.with_untracked(T::clone)
    }
}

impl<T: PartialEq> Signal<T> {
    /// Sets the value, notifying only when it actually changed.
    pub fn set(&self, value: T) {
        self.inner.set(value);
    }
}

impl<T: PartialEq + Clone> Signal<T> {
    /// Mutates the value in place, notifying only when it actually changed.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.inner.update(f);
    }
}

impl<T> SignalInner<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        try_with_runtime(|rt| rt.track_read(self.id));
        self.with_untracked(f)
    }

    fn with_untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        match self.value.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, T> {
        self.value.write().unwrap_or_else(|poisoned| {
            log::warn!("signal lock poisoned by an earlier panic, recovering");
            poisoned.into_inner()
        })
    }

    fn changed(&self) {
        notify_signal_write(self.id);
        request_frame();
    }
}

impl<T> Drop for SignalInner<T> {
    fn drop(&mut self) {
        try_with_runtime(|rt| rt.release_signal(self.id));
    }
}

impl<T: PartialEq> SignalInner<T> {
    fn set(&self, value: T) {
        let mut guard = self.write_guard();
        if *guard == value {
            return;
        }
        *guard = value;
        drop(guard);
        self.changed();
    }
}

impl<T: PartialEq + Clone> SignalInner<T> {
    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let mut guard = self.write_guard();
        let old_value = guard.clone();
        f(&mut guard);
        if *guard == old_value {
            return;
        }
        drop(guard);
        self.changed();
    }
}

/// Read-only handle to a signal.
pub struct ReadSignal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone> ReadSignal<T> {
    pub fn get(&self) -> T {
        self.inner.with(T::clone)
    }

    pub fn get_untracked(&self) -> T {
        self.inner.with_untracked(T::clone)
    }
}

/// Write-only handle to a signal.
pub struct WriteSignal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for WriteSignal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: PartialEq> WriteSignal<T> {
    pub fn set(&self, value: T) {
        self.inner.set(value);
    }
}

impl<T: PartialEq + Clone> WriteSignal<T> {
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.inner.update(f);
    }
}

pub fn create_signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}
