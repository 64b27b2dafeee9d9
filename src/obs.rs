//! Optional observability helpers for strategy flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `rdio_strategy.flow` with the `strategy`
//!   (OAuth version) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `rdio_strategy_flow_total` counter for every
//!   attempt/success/failure, labeled by `strategy`, `stage`, and `outcome`.
//!
//! Neither spans nor metrics carry token values or profile contents.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;
#[cfg(all(test, feature = "metrics"))] pub(crate) use metrics::StageRecorder;

// self
use crate::_prelude::*;

/// Strategy variants observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
	/// OAuth 1.0a strategy.
	Legacy,
	/// OAuth 2.0 strategy.
	Modern,
}
impl StrategyKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StrategyKind::Legacy => "legacy",
			StrategyKind::Modern => "modern",
		}
	}
}
impl Display for StrategyKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a strategy operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(StrategyKind::Legacy.to_string(), "legacy");
		assert_eq!(StrategyKind::Modern.as_str(), "modern");
		assert_eq!(FlowOutcome::Attempt.to_string(), "attempt");
	}
}
