//! Per-stage spans for strategy operations.
//!
//! A [`FlowSpan`] covers one stage of one strategy, such as the legacy `request_token`
//! call or the modern `begin` redirect. Opening it counts an attempt; closing it with
//! [`FlowSpan::finish`] or [`FlowSpan::succeed`] counts the outcome under the same labels.

// self
use crate::{
	_prelude::*,
	obs::{self, FlowOutcome, StrategyKind},
};

/// Future returned by [`FlowSpan::instrument`]; instrumented only with the `tracing` feature.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`FlowSpan::instrument`]; the input future when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// One strategy stage, traced as `rdio_strategy.flow` and counted per outcome.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	kind: StrategyKind,
	stage: &'static str,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Opens the span for `stage` and records an attempt.
	pub fn start(kind: StrategyKind, stage: &'static str) -> Self {
		obs::record_flow_outcome(kind, stage, FlowOutcome::Attempt);

		Self {
			kind,
			stage,
			#[cfg(feature = "tracing")]
			span: tracing::info_span!("rdio_strategy.flow", strategy = kind.as_str(), stage),
		}
	}

	/// Strategy this stage belongs to.
	pub fn kind(&self) -> StrategyKind {
		self.kind
	}

	/// Stage label, e.g. `user_profile`.
	pub fn stage(&self) -> &'static str {
		self.stage
	}

	/// Records success for stages that cannot fail.
	pub fn succeed(&self) {
		obs::record_flow_outcome(self.kind, self.stage, FlowOutcome::Success);
	}

	/// Records the outcome matching `result`.
	pub fn finish<T, E>(&self, result: &std::result::Result<T, E>) {
		let outcome = if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure };

		obs::record_flow_outcome(self.kind, self.stage, outcome);
	}

	/// Runs a synchronous stage body inside the span.
	pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Attaches the span to an async stage body across its `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn span_keeps_stage_labels() {
		let span = FlowSpan::start(StrategyKind::Legacy, "authorize_url");

		assert_eq!(span.kind(), StrategyKind::Legacy);
		assert_eq!(span.stage(), "authorize_url");
		assert_eq!(span.in_scope(|| "oauth_token=hh5s93j4hdidpola".len()), 27);

		span.succeed();
	}

	#[tokio::test]
	async fn instrumented_stage_yields_its_result() {
		let span = FlowSpan::start(StrategyKind::Modern, "exchange_code");
		let result: std::result::Result<&str, ()> =
			span.instrument(async { Ok("access-123") }).await;

		span.finish(&result);

		assert_eq!(result, Ok("access-123"));
	}
}
