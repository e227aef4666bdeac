use std::cell::Cell;

/// Something that shows whether a route request is running, typically by
/// disabling the fetch button
pub trait BusyIndicator {
    fn set_busy(&self, busy: bool);
}

impl BusyIndicator for leptos::WriteSignal<bool> {
    fn set_busy(&self, busy: bool) {
        leptos::SignalSet::set(self, busy);
    }
}

impl BusyIndicator for Cell<bool> {
    fn set_busy(&self, busy: bool) {
        self.set(busy);
    }
}

/// Counts outstanding requests and keeps the indicator busy while any is
/// running
pub struct InFlight<B: BusyIndicator> {
    active: Cell<usize>,
    indicator: B,
}

impl<B: BusyIndicator> InFlight<B> {
    pub fn new(indicator: B) -> Self {
        Self {
            active: Cell::new(0),
            indicator,
        }
    }

    /// Mark a request as started; it ends when the guard is dropped
    pub fn acquire(&self) -> InFlightGuard<'_, B> {
        let active = self.active.get() + 1;
        self.active.set(active);
        if active == 1 {
            self.indicator.set_busy(true);
        }
        InFlightGuard { owner: self }
    }

    pub fn is_busy(&self) -> bool {
        self.active.get() > 0
    }

    pub fn indicator(&self) -> &B {
        &self.indicator
    }
}

#[must_use = "the request counts as finished as soon as the guard is dropped"]
pub struct InFlightGuard<'a, B: BusyIndicator> {
    owner: &'a InFlight<B>,
}

impl<B: BusyIndicator> Drop for InFlightGuard<'_, B> {
    fn drop(&mut self) {
        let active = self.owner.active.get().saturating_sub(1);
        self.owner.active.set(active);
        if active == 0 {
            self.owner.indicator.set_busy(false);
        }
    }
}
