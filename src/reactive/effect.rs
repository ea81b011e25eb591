use super::runtime::{run_effect, try_with_runtime, with_runtime, EffectId};

/// A subscription that re-runs its closure whenever a signal it read changes.
///
/// The closure runs once on creation to collect its dependencies. Dropping
/// the `Effect` unsubscribes it.
pub struct Effect {
    id: EffectId,
}

impl Effect {
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let id = with_runtime(|rt| rt.allocate_effect(Box::new(f)));
        run_effect(id);
        Self { id }
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        // The callback may own signals, whose drop needs the runtime
        let callback = try_with_runtime(|rt| rt.dispose_effect(self.id)).flatten();
        drop(callback);
    }
}

pub fn create_effect<F>(f: F) -> Effect
where
    F: FnMut() + 'static,
{
    Effect::new(f)
}
