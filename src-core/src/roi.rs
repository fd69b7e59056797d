//! What-if annual savings projection.
//!
//! Unlike the dashboard store, a failed projection clears the previous
//! figures instead of keeping them on screen.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::api::{RoiProjection, RoiRequest, SustainabilityApi};
use crate::error::ProjectionError;

pub const DEFAULT_KWH_PRICE_EUR: f64 = 0.25;
pub const DEFAULT_RUNS_PER_DAY: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiInput {
    pub kwh_price_eur: f64,
    pub runs_per_day: u32,
}

impl Default for RoiInput {
    fn default() -> Self {
        Self {
            kwh_price_eur: DEFAULT_KWH_PRICE_EUR,
            runs_per_day: DEFAULT_RUNS_PER_DAY,
        }
    }
}

impl RoiInput {
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !self.kwh_price_eur.is_finite() || self.kwh_price_eur < 0.0 {
            return Err(ProjectionError::InvalidInput(format!(
                "electricity price must be a non-negative number, got {}",
                self.kwh_price_eur
            )));
        }
        Ok(())
    }
}

impl From<RoiInput> for RoiRequest {
    fn from(input: RoiInput) -> Self {
        RoiRequest {
            kwh_price_eur: input.kwh_price_eur,
            runs_per_day: input.runs_per_day,
        }
    }
}

/// Requests ROI projections and holds the one currently displayed.
///
/// The latest request wins: a response for a request that has since been
/// superseded is dropped without touching the displayed projection.
pub struct RoiProjector<A> {
    api: Rc<A>,
    projection: RefCell<Option<RoiProjection>>,
    error: RefCell<Option<String>>,
    latest: Cell<u64>,
    in_flight: Cell<usize>,
}

/// Counts one outstanding request; released even if `calculate` is dropped.
struct Calculating<'a>(&'a Cell<usize>);

impl<'a> Calculating<'a> {
    fn enter(count: &'a Cell<usize>) -> Self {
        count.set(count.get() + 1);
        Self(count)
    }
}

impl Drop for Calculating<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

impl<A: SustainabilityApi> RoiProjector<A> {
    pub fn new(api: Rc<A>) -> Self {
        Self {
            api,
            projection: RefCell::new(None),
            error: RefCell::new(None),
            latest: Cell::new(0),
            in_flight: Cell::new(0),
        }
    }

    pub fn projection(&self) -> Option<RoiProjection> {
        *self.projection.borrow()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn is_calculating(&self) -> bool {
        self.in_flight.get() > 0
    }

    pub async fn calculate(&self, input: RoiInput) -> Result<RoiProjection, ProjectionError> {
        let id = self.latest.get() + 1;
        self.latest.set(id);

        if let Err(e) = input.validate() {
            self.projection.replace(None);
            self.error.replace(Some(e.to_string()));
            return Err(e);
        }

        info!(
            "Projecting ROI at {} EUR/kWh, {} runs/day",
            input.kwh_price_eur, input.runs_per_day
        );
        let result = {
            let _calculating = Calculating::enter(&self.in_flight);
            self.api.roi(&input.into()).await
        };

        if self.latest.get() != id {
            debug!("Dropping superseded ROI response");
            return Err(ProjectionError::Superseded);
        }

        match result {
            Ok(projection) => {
                self.projection.replace(Some(projection));
                self.error.replace(None);
                Ok(projection)
            }
            Err(e) => {
                warn!("ROI projection failed: {}", e);
                let err = ProjectionError::Failed(e);
                self.projection.replace(None);
                self.error.replace(Some(err.to_string()));
                Err(err)
            }
        }
    }
}
