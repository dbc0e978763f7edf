//! Side channel for data-quality warnings raised while aggregating.

use tracing::warn;

use crate::polling::types::DistanceWarning;

/// Receives advisory warnings. Reporting never affects aggregation output.
pub trait DiagnosticsSink {
    fn report(&mut self, warning: DistanceWarning);
}

/// Emits each warning as a `tracing` event at `WARN` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn report(&mut self, warning: DistanceWarning) {
        let ward = warning.precinct.ward.map(|c| c.to_string());
        let division = warning.precinct.division.map(|c| c.to_string());
        let precinct = warning.precinct.precinct.map(|c| c.to_string());

        warn!(
            place_name = %warning.place_name,
            distance_m = warning.distance_m,
            ward = ward.as_deref().unwrap_or("-"),
            division = division.as_deref().unwrap_or("-"),
            precinct = precinct.as_deref().unwrap_or("-"),
            "Precinct location is far from its polling place"
        );
    }
}

impl DiagnosticsSink for Vec<DistanceWarning> {
    fn report(&mut self, warning: DistanceWarning) {
        self.push(warning);
    }
}

impl<S: DiagnosticsSink + ?Sized> DiagnosticsSink for &mut S {
    fn report(&mut self, warning: DistanceWarning) {
        (**self).report(warning);
    }
}
