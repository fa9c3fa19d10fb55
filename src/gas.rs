use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result as AnyResult};

use crate::error::{TokenFactoryError, TokenFactoryResult};

/// Gas accounting for a single state transition.
pub trait GasMeter {
    fn consume_gas(&mut self, amount: u64, descriptor: &str) -> TokenFactoryResult<()>;

    fn gas_consumed(&self) -> u64;

    /// `None` means unlimited.
    fn limit(&self) -> Option<u64>;
}

/// Meters one state transition at a time. `reset` starts the next one and
/// keeps a running total across all of them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BasicGasMeter {
    limit: Option<u64>,
    consumed: u64,
    total: u64,
}

impl BasicGasMeter {
    pub fn infinite() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            consumed: 0,
            total: 0,
        }
    }

    pub fn reset(&mut self) {
        self.consumed = 0;
    }

    /// Gas consumed since the meter was created, across resets.
    pub fn total_consumed(&self) -> u64 {
        self.total
    }
}

impl GasMeter for BasicGasMeter {
    fn consume_gas(&mut self, amount: u64, descriptor: &str) -> TokenFactoryResult<()> {
        let wanted = self.consumed.saturating_add(amount);
        if let Some(limit) = self.limit {
            if wanted > limit {
                tracing::warn!(descriptor, limit, wanted, "out of gas");
                self.total = self.total.saturating_add(limit - self.consumed);
                self.consumed = limit;
                return Err(TokenFactoryError::OutOfGas {
                    descriptor: descriptor.to_string(),
                    limit,
                    wanted,
                });
            }
        }
        self.total = self.total.saturating_add(amount);
        self.consumed = wanted;
        Ok(())
    }

    fn gas_consumed(&self) -> u64 {
        self.consumed
    }

    fn limit(&self) -> Option<u64> {
        self.limit
    }
}

/// A [`BasicGasMeter`] shared between the multi-test modules and the test
/// driving them.
#[derive(Clone, Debug, Default)]
pub struct SharedGasMeter(Arc<Mutex<BasicGasMeter>>);

impl SharedGasMeter {
    pub fn new(meter: BasicGasMeter) -> Self {
        Self(Arc::new(Mutex::new(meter)))
    }

    /// Runs `f` with exclusive access to the meter.
    pub fn with<T>(&self, f: impl FnOnce(&mut BasicGasMeter) -> T) -> AnyResult<T> {
        let mut meter = self.0.lock().map_err(|_| anyhow!("gas meter lock poisoned"))?;
        Ok(f(&mut *meter))
    }

    /// Gas consumed by the last state transition.
    pub fn consumed(&self) -> AnyResult<u64> {
        self.with(|meter| meter.gas_consumed())
    }

    pub fn total_consumed(&self) -> AnyResult<u64> {
        self.with(|meter| meter.total_consumed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinite_meter_accumulates() {
        let mut meter = BasicGasMeter::infinite();
        meter.consume_gas(1_000, "first").unwrap();
        meter.consume_gas(2_000_000, "second").unwrap();
        assert_eq!(meter.gas_consumed(), 2_001_000);
        assert_eq!(meter.limit(), None);
    }

    #[test]
    fn limited_meter_runs_out() {
        let mut meter = BasicGasMeter::with_limit(1_500);
        meter.consume_gas(1_000, "first").unwrap();

        let err = meter.consume_gas(1_000, "second").unwrap_err();
        assert!(matches!(
            err,
            TokenFactoryError::OutOfGas {
                limit: 1_500,
                wanted: 2_000,
                ..
            }
        ));
        assert_eq!(meter.gas_consumed(), 1_500);
    }

    #[test]
    fn reset_starts_a_new_transition() {
        let mut meter = BasicGasMeter::with_limit(1_500);
        meter.consume_gas(1_000, "first").unwrap();
        meter.consume_gas(1_000, "second").unwrap_err();

        meter.reset();
        assert_eq!(meter.gas_consumed(), 0);
        meter.consume_gas(1_000, "third").unwrap();
        assert_eq!(meter.gas_consumed(), 1_000);
        assert_eq!(meter.total_consumed(), 2_500);
        assert_eq!(meter.limit(), Some(1_500));
    }

    #[test]
    fn shared_meter_is_shared() {
        let shared = SharedGasMeter::default();
        let clone = shared.clone();
        clone.with(|meter| meter.consume_gas(42, "test")).unwrap().unwrap();
        assert_eq!(shared.consumed().unwrap(), 42);
    }
}
