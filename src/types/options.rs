//! Per-call options.

/// Default `offset` when listing measurements.
pub const DEFAULT_OFFSET: u64 = 0;

/// Default `limit` when listing measurements.
pub const DEFAULT_LIMIT: u64 = 1000;

/// Options for create operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Treat a conflict (409) as "already exists" instead of an error.
    ///
    /// Creating a source then returns the existing source; creating a
    /// measurement returns `None`.
    pub ignore_existing: bool,
}

impl CreateOptions {
    /// Options that tolerate an existing resource.
    pub fn ignore_existing() -> Self {
        Self {
            ignore_existing: true,
        }
    }

    /// Statuses the dispatcher should treat as benign.
    pub(crate) fn ignored_statuses(self) -> &'static [u16] {
        if self.ignore_existing {
            &[409]
        } else {
            &[]
        }
    }
}

/// Window of measurements to list. Passed through as query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementPage {
    /// Number of measurements to skip.
    pub offset: u64,
    /// Maximum number of measurements to return.
    pub limit: u64,
}

impl MeasurementPage {
    /// Creates a page window.
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }
}

impl Default for MeasurementPage {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(MeasurementPage::default(), MeasurementPage::new(0, 1000));
        assert!(!CreateOptions::default().ignore_existing);
        assert!(CreateOptions::default().ignored_statuses().is_empty());
        assert_eq!(CreateOptions::ignore_existing().ignored_statuses(), &[409]);
    }
}
