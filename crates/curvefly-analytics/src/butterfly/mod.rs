//! Duration-neutral 2s5s10s style butterfly and its rolling z-score signal.
//!
//! The belly carries weight one; each wing is sized to offset half of the
//! belly's duration, so parallel shifts roughly cancel and the composite
//! yield tracks curvature.

mod duration;
mod engine;
mod signal;
mod weights;

pub use duration::par_duration;
pub use engine::{ButterflyConfig, ButterflyEngine, ButterflyPoint, ButterflySeries};
pub use signal::{
    compute_signal, validate_window, SignalPoint, SignalSeries, SignalThresholds, TradeSignal,
    DEFAULT_ENTRY_THRESHOLD, DEFAULT_WINDOW, MAX_WINDOW,
};
pub use weights::{ButterflyWeights, BELLY_WEIGHT, WING_SCALE};
