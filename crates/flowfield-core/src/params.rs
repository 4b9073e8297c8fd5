//! Shared tunable state for the background.
//!
//! The store is a single-threaded observable cell: the whole
//! [`FlowParameters`] value is replaced on every write so readers never see a
//! half-updated struct, and subscribers are notified synchronously after each
//! effective change. Consumers hold a cheap clone of [`ParameterStore`] and
//! keep a [`Subscription`] guard alive for as long as they want updates.

use crate::constants::{DEFAULT_DENSITY, DEFAULT_INTENSITY, DEFAULT_WOBBLE};
use crate::error::FlowError;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

/// Normalized tunables, each in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowParameters {
    pub intensity: f32,
    pub density: f32,
    pub wobble: f32,
}

impl Default for FlowParameters {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_INTENSITY,
            density: DEFAULT_DENSITY,
            wobble: DEFAULT_WOBBLE,
        }
    }
}

impl FlowParameters {
    pub fn new(intensity: f32, density: f32, wobble: f32) -> Self {
        Self {
            intensity,
            density,
            wobble,
        }
        .clamped_onto(&Self::default())
    }

    /// Clamp every field into \[0, 1\]; NaN fields fall back to `fallback`.
    fn clamped_onto(self, fallback: &FlowParameters) -> Self {
        Self {
            intensity: clamp_unit(self.intensity).unwrap_or(fallback.intensity),
            density: clamp_unit(self.density).unwrap_or(fallback.density),
            wobble: clamp_unit(self.wobble).unwrap_or(fallback.wobble),
        }
    }
}

#[inline]
fn clamp_unit(v: f32) -> Option<f32> {
    (!v.is_nan()).then(|| v.clamp(0.0, 1.0))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowField {
    Intensity,
    Density,
    Wobble,
}

impl FlowField {
    pub const ALL: [FlowField; 3] = [FlowField::Intensity, FlowField::Density, FlowField::Wobble];

    pub fn label(self) -> &'static str {
        match self {
            FlowField::Intensity => "Intensity",
            FlowField::Density => "Density",
            FlowField::Wobble => "Wobble",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            FlowField::Intensity => "intensity",
            FlowField::Density => "density",
            FlowField::Wobble => "wobble",
        }
    }

    #[inline]
    pub fn get(self, params: &FlowParameters) -> f32 {
        match self {
            FlowField::Intensity => params.intensity,
            FlowField::Density => params.density,
            FlowField::Wobble => params.wobble,
        }
    }

    #[inline]
    pub fn with(self, mut params: FlowParameters, value: f32) -> FlowParameters {
        match self {
            FlowField::Intensity => params.intensity = value,
            FlowField::Density => params.density = value,
            FlowField::Wobble => params.wobble = value,
        }
        params
    }
}

impl FromStr for FlowField {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FlowField::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FlowError::UnknownField(s.to_string()))
    }
}

type Callback = Rc<dyn Fn(FlowParameters)>;

struct StoreInner {
    params: Cell<FlowParameters>,
    subscribers: RefCell<SmallVec<[(u64, Callback); 4]>>,
    next_id: Cell<u64>,
}

impl StoreInner {
    fn is_subscribed(&self, id: u64) -> bool {
        self.subscribers.borrow().iter().any(|(sid, _)| *sid == id)
    }
}

/// Observable holder of the current [`FlowParameters`].
#[derive(Clone)]
pub struct ParameterStore {
    inner: Rc<StoreInner>,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterStore")
            .field("params", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::with_params(FlowParameters::default())
    }

    pub fn with_params(params: FlowParameters) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                params: Cell::new(params.clamped_onto(&FlowParameters::default())),
                subscribers: RefCell::new(SmallVec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    #[inline]
    pub fn get(&self) -> FlowParameters {
        self.inner.params.get()
    }

    /// Clamp `value` into \[0, 1\] and store it. NaN is ignored.
    pub fn set(&self, field: FlowField, value: f32) -> FlowParameters {
        let current = self.get();
        match clamp_unit(value) {
            Some(v) => self.replace(field.with(current, v)),
            None => {
                log::debug!("[store] ignoring NaN for {}", field.key());
                current
            }
        }
    }

    /// Replace all three fields at once; subscribers see one notification.
    pub fn set_all(&self, params: FlowParameters) -> FlowParameters {
        let current = self.get();
        self.replace(params.clamped_onto(&current))
    }

    fn replace(&self, next: FlowParameters) -> FlowParameters {
        if next == self.get() {
            return next;
        }
        self.inner.params.set(next);
        self.notify();
        next
    }

    fn notify(&self) {
        // Callbacks may subscribe, unsubscribe or write back into the store.
        let snapshot: SmallVec<[(u64, Callback); 4]> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(id, cb)| (*id, cb.clone()))
            .collect();
        for (id, cb) in snapshot {
            if self.inner.is_subscribed(id) {
                cb(self.get());
            }
        }
    }

    /// Register `callback` for every effective change. The returned guard
    /// unsubscribes when dropped.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(FlowParameters) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));
        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }
}

/// Registration handle returned by [`ParameterStore::subscribe`].
pub struct Subscription {
    id: u64,
    store: Weak<StoreInner>,
}

impl Subscription {
    /// Safe to call any number of times.
    pub fn unsubscribe(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.subscribers.borrow_mut().retain(|(id, _)| *id != self.id);
        }
        self.store = Weak::new();
    }

    pub fn is_active(&self) -> bool {
        self.store
            .upgrade()
            .map(|inner| inner.is_subscribed(self.id))
            .unwrap_or(false)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_and_replaces_nan_with_defaults() {
        let p = FlowParameters::new(1.7, f32::NAN, -0.5);
        assert_eq!(p.intensity, 1.0);
        assert_eq!(p.density, DEFAULT_DENSITY);
        assert_eq!(p.wobble, 0.0);
    }

    #[test]
    fn nan_write_is_ignored() {
        let store = ParameterStore::new();
        let before = store.get();
        store.set(FlowField::Wobble, f32::NAN);
        assert_eq!(store.get(), before);
    }

    #[test]
    fn callback_writing_back_sees_latest_value() {
        let store = ParameterStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let writer = store.clone();
        let _a = store.subscribe(move |p| {
            if p.intensity > 0.9 {
                writer.set(FlowField::Intensity, 0.9);
            }
        });
        let seen_b = seen.clone();
        let _b = store.subscribe(move |p| seen_b.borrow_mut().push(p.intensity));
        store.set(FlowField::Intensity, 1.0);
        assert_eq!(store.get().intensity, 0.9);
        assert!(seen.borrow().iter().all(|v| (*v - 0.9).abs() < 1e-6));
    }

    #[test]
    fn field_parses_case_insensitively() {
        assert_eq!("Density".parse::<FlowField>(), Ok(FlowField::Density));
        assert_eq!(" wobble ".parse::<FlowField>(), Ok(FlowField::Wobble));
        assert!(matches!(
            "speed".parse::<FlowField>(),
            Err(FlowError::UnknownField(_))
        ));
    }
}
