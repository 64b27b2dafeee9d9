// self
use crate::obs::{FlowOutcome, StrategyKind};

/// Increments `rdio_strategy_flow_total` for one stage outcome when `metrics` is enabled.
pub fn record_flow_outcome(kind: StrategyKind, stage: &'static str, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"rdio_strategy_flow_total",
			"strategy" => kind.as_str(),
			"stage" => stage,
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, stage, outcome);
	}
}

/// Recorder that captures `(strategy, stage, outcome)` labels of every counter increment.
#[cfg(all(test, feature = "metrics"))]
#[derive(Debug, Default)]
pub(crate) struct StageRecorder(crate::_prelude::Mutex<Vec<(String, String, String)>>);
#[cfg(all(test, feature = "metrics"))]
impl StageRecorder {
	pub(crate) fn recorded(&self) -> Vec<(String, String, String)> {
		self.0.lock().clone()
	}
}
#[cfg(all(test, feature = "metrics"))]
impl metrics::Recorder for StageRecorder {
	fn describe_counter(&self, _: metrics::KeyName, _: Option<metrics::Unit>, _: metrics::SharedString) {}

	fn describe_gauge(&self, _: metrics::KeyName, _: Option<metrics::Unit>, _: metrics::SharedString) {}

	fn describe_histogram(
		&self,
		_: metrics::KeyName,
		_: Option<metrics::Unit>,
		_: metrics::SharedString,
	) {
	}

	fn register_counter(&self, key: &metrics::Key, _: &metrics::Metadata<'_>) -> metrics::Counter {
		let label = |name: &str| {
			key.labels()
				.find(|label| label.key() == name)
				.map(|label| label.value().to_owned())
				.unwrap_or_default()
		};

		self.0.lock().push((label("strategy"), label("stage"), label("outcome")));

		metrics::Counter::noop()
	}

	fn register_gauge(&self, _: &metrics::Key, _: &metrics::Metadata<'_>) -> metrics::Gauge {
		metrics::Gauge::noop()
	}

	fn register_histogram(&self, _: &metrics::Key, _: &metrics::Metadata<'_>) -> metrics::Histogram {
		metrics::Histogram::noop()
	}
}
