//! Migration pipeline: import into the tracker, then reconcile placeholders

mod importer;
mod reconcile;
mod throttle;

#[cfg(test)]
mod testing;

pub use importer::{ImportReport, Importer};
pub use reconcile::{ReconcileReport, Reconciler};
pub use throttle::{wait_duration, wait_for_rate_limit, Clock, SystemClock};

use crate::config::ImportSettings;

/// Everything a pipeline step needs, handed over at construction
pub struct MigrationContext<'a, T: ?Sized, C: ?Sized> {
    pub tracker: &'a T,
    pub clock: &'a C,
    pub settings: ImportSettings,
}

impl<'a, T: ?Sized, C: ?Sized> MigrationContext<'a, T, C> {
    pub fn new(tracker: &'a T, clock: &'a C, settings: ImportSettings) -> Self {
        Self {
            tracker,
            clock,
            settings,
        }
    }
}

impl<T: ?Sized, C: ?Sized> Clone for MigrationContext<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized, C: ?Sized> Copy for MigrationContext<'_, T, C> {}
