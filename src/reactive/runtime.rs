use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
}

static NEXT_RUNTIME_ID: AtomicUsize = AtomicUsize::new(0);

pub type EffectId = usize;

/// A signal slot, tagged with the runtime that allocated it.
///
/// Signals travel between threads, so a bare index is ambiguous: slot 3 on
/// one thread is unrelated to slot 3 on another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SignalId {
    runtime: usize,
    index: usize,
}

type EffectCallback = Rc<RefCell<Box<dyn FnMut()>>>;

struct EffectSlot {
    callback: Option<EffectCallback>,
    dependencies: HashSet<SignalId>,
}

/// Per-thread bookkeeping that links signals to the effects reading them.
///
/// Callbacks never run while the runtime itself is borrowed, so an effect
/// body is free to read and write signals. Slots of dropped signals and
/// disposed effects are reused.
pub struct Runtime {
    id: usize,
    current_effect: Option<EffectId>,
    pending_effects: Vec<EffectId>,
    effects: Vec<EffectSlot>,
    free_effects: Vec<EffectId>,
    signal_subscribers: Vec<HashSet<EffectId>>,
    free_signals: Vec<usize>,
    batch_depth: usize,
    flushing: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            id: NEXT_RUNTIME_ID.fetch_add(1, Ordering::Relaxed),
            current_effect: None,
            pending_effects: Vec::new(),
            effects: Vec::new(),
            free_effects: Vec::new(),
            signal_subscribers: Vec::new(),
            free_signals: Vec::new(),
            batch_depth: 0,
            flushing: false,
        }
    }

    /// Slot index of `signal_id` if this runtime owns it.
    fn local_index(&self, signal_id: SignalId) -> Option<usize> {
        (signal_id.runtime == self.id && signal_id.index < self.signal_subscribers.len())
            .then_some(signal_id.index)
    }

    pub fn allocate_signal(&mut self) -> SignalId {
        let index = match self.free_signals.pop() {
            Some(index) => index,
            None => {
                self.signal_subscribers.push(HashSet::new());
                self.signal_subscribers.len() - 1
            }
        };
        SignalId {
            runtime: self.id,
            index,
        }
    }

    /// Return a dropped signal's slot. Foreign ids are ignored.
    pub fn release_signal(&mut self, signal_id: SignalId) {
        let Some(index) = self.local_index(signal_id) else {
            return;
        };
        for effect_id in std::mem::take(&mut self.signal_subscribers[index]) {
            if let Some(slot) = self.effects.get_mut(effect_id) {
                slot.dependencies.remove(&signal_id);
            }
        }
        self.free_signals.push(index);
    }

    pub fn allocate_effect(&mut self, callback: Box<dyn FnMut()>) -> EffectId {
        let slot = EffectSlot {
            callback: Some(Rc::new(RefCell::new(callback))),
            dependencies: HashSet::new(),
        };
        match self.free_effects.pop() {
            Some(effect_id) => {
                self.effects[effect_id] = slot;
                effect_id
            }
            None => {
                self.effects.push(slot);
                self.effects.len() - 1
            }
        }
    }

    pub fn track_read(&mut self, signal_id: SignalId) {
        // Signals created on another thread are unknown to this runtime
        let Some(index) = self.local_index(signal_id) else {
            return;
        };
        if let Some(effect_id) = self.current_effect {
            self.signal_subscribers[index].insert(effect_id);
            self.effects[effect_id].dependencies.insert(signal_id);
        }
    }

    /// Queue every subscriber of `signal_id`. Returns true when the caller
    /// should flush right away (not batching and not already flushing).
    pub fn notify_write(&mut self, signal_id: SignalId) -> bool {
        let Some(index) = self.local_index(signal_id) else {
            return false;
        };
        for &effect_id in &self.signal_subscribers[index] {
            if !self.pending_effects.contains(&effect_id) {
                self.pending_effects.push(effect_id);
            }
        }
        self.batch_depth == 0 && !self.flushing && !self.pending_effects.is_empty()
    }

    pub fn subscriber_count(&self, signal_id: SignalId) -> usize {
        self.local_index(signal_id)
            .map_or(0, |index| self.signal_subscribers[index].len())
    }

    /// Number of signal slots ever allocated, live or free.
    pub fn signal_slots(&self) -> usize {
        self.signal_subscribers.len()
    }

    /// Number of effect slots ever allocated, live or free.
    pub fn effect_slots(&self) -> usize {
        self.effects.len()
    }

    fn unsubscribe(&mut self, effect_id: EffectId, dependencies: HashSet<SignalId>) {
        for signal_id in dependencies {
            if let Some(index) = self.local_index(signal_id) {
                self.signal_subscribers[index].remove(&effect_id);
            }
        }
    }

    fn begin_run(&mut self, effect_id: EffectId) -> Option<EffectCallback> {
        let slot = self.effects.get_mut(effect_id)?;
        let callback = slot.callback.clone()?;
        let old_deps = std::mem::take(&mut slot.dependencies);
        self.unsubscribe(effect_id, old_deps);
        Some(callback)
    }

    /// Unsubscribe an effect and free its slot.
    ///
    /// The callback is handed back so the caller drops it after releasing the
    /// runtime: dropping captured signals needs the runtime again.
    pub fn dispose_effect(&mut self, effect_id: EffectId) -> Option<EffectCallback> {
        let slot = self.effects.get_mut(effect_id)?;
        let callback = slot.callback.take()?;
        let dependencies = std::mem::take(&mut slot.dependencies);
        self.unsubscribe(effect_id, dependencies);
        self.pending_effects.retain(|id| *id != effect_id);
        self.free_effects.push(effect_id);
        Some(callback)
    }
}

pub fn with_runtime<F, R>(f: F) -> R
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

/// Access the runtime if it is not already borrowed on this thread and not
/// being torn down.
pub fn try_with_runtime<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME
        .try_with(|rt| rt.try_borrow_mut().ok().map(|mut runtime| f(&mut runtime)))
        .ok()
        .flatten()
}

/// Run one effect with dependency tracking.
pub fn run_effect(effect_id: EffectId) {
    let Some(callback) = with_runtime(|rt| rt.begin_run(effect_id)) else {
        return;
    };
    let previous = with_runtime(|rt| rt.current_effect.replace(effect_id));
    // A re-entrant run of the same effect is skipped, the outer run is still in progress
    if let Ok(mut callback) = callback.try_borrow_mut() {
        (**callback)();
    }
    with_runtime(|rt| rt.current_effect = previous);
}

/// Run pending effects until none are left.
pub fn flush_effects() {
    with_runtime(|rt| rt.flushing = true);
    while let Some(effect_id) = with_runtime(|rt| {
        if rt.pending_effects.is_empty() {
            None
        } else {
            Some(rt.pending_effects.remove(0))
        }
    }) {
        run_effect(effect_id);
    }
    with_runtime(|rt| rt.flushing = false);
}

/// Called by signals after a value change.
pub(crate) fn notify_signal_write(signal_id: SignalId) {
    if try_with_runtime(|rt| rt.notify_write(signal_id)).unwrap_or(false) {
        flush_effects();
    }
}

/// Group several writes so dependent effects run once at the end.
pub fn batch<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    with_runtime(|rt| rt.batch_depth += 1);
    let result = f();
    let should_flush = with_runtime(|rt| {
        rt.batch_depth -= 1;
        rt.batch_depth == 0 && !rt.flushing && !rt.pending_effects.is_empty()
    });
    if should_flush {
        flush_effects();
    }
    result
}
