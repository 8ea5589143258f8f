use std::cell::Cell;

use crate::error::GeometryError;

/// An arclength-indexed width function.
///
/// The domain is exactly `[0, total_length]` of the filleted centerline;
/// the assembler guarantees the profile is never queried outside it.
pub trait WidthProfile {
    /// Trace width at the given arclength from the path start.
    fn width_at(&self, arclength: f64) -> f64;
}

impl<F> WidthProfile for F
where
    F: Fn(f64) -> f64,
{
    fn width_at(&self, arclength: f64) -> f64 {
        self(arclength)
    }
}

/// A profile with the same width everywhere.
#[derive(Debug, Clone, Copy)]
pub struct ConstantWidth(pub f64);

impl WidthProfile for ConstantWidth {
    fn width_at(&self, _arclength: f64) -> f64 {
        self.0
    }
}

/// Linear taper from `start_width` at arclength 0 to `end_width` at
/// `length`, clamped outside that range.
#[derive(Debug, Clone, Copy)]
pub struct LinearTaper {
    pub start_width: f64,
    pub end_width: f64,
    pub length: f64,
}

impl WidthProfile for LinearTaper {
    fn width_at(&self, arclength: f64) -> f64 {
        if self.length <= 0.0 {
            return self.start_width;
        }
        let t = (arclength / self.length).clamp(0.0, 1.0);
        self.start_width + (self.end_width - self.start_width) * t
    }
}

/// Domain-enforcing view over a profile, scoped to one assembly pass.
///
/// Out-of-domain queries are recorded (first offender wins) and the
/// argument is clamped so the wrapped profile itself never sees a value
/// outside `[0, total_length]`. The assembler converts a recorded
/// violation into [`GeometryError::ProfileDomainViolation`] after the
/// pass; such a violation indicates an arclength bookkeeping defect, not
/// a recoverable input condition.
pub(crate) struct DomainGuard<'a> {
    inner: &'a dyn WidthProfile,
    total_length: f64,
    violation: Cell<Option<f64>>,
}

impl<'a> DomainGuard<'a> {
    pub(crate) fn new(inner: &'a dyn WidthProfile, total_length: f64) -> Self {
        Self {
            inner,
            total_length,
            violation: Cell::new(None),
        }
    }

    fn tolerance(&self) -> f64 {
        1e-9 * self.total_length.max(1.0)
    }

    /// Surfaces any recorded out-of-domain query.
    pub(crate) fn check(&self) -> Result<(), GeometryError> {
        match self.violation.get() {
            Some(arclength) => Err(GeometryError::ProfileDomainViolation {
                arclength,
                total_length: self.total_length,
            }),
            None => Ok(()),
        }
    }
}

impl WidthProfile for DomainGuard<'_> {
    fn width_at(&self, arclength: f64) -> f64 {
        let tol = self.tolerance();
        if (arclength < -tol || arclength > self.total_length + tol)
            && self.violation.get().is_none()
        {
            self.violation.set(Some(arclength));
        }
        self.inner.width_at(arclength.clamp(0.0, self.total_length))
    }
}
