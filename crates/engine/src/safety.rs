//! Safety validation - the all-or-nothing ratio gate.

use chainopt_core::ParamSet;

/// Smallest accepted proposed/current ratio.
pub const MIN_RATIO: f64 = 0.5;

/// Largest accepted proposed/current ratio.
pub const MAX_RATIO: f64 = 2.0;

/// Whether a proposed parameter set is safe relative to the current one.
///
/// Every parameter ratio must stay inside `[MIN_RATIO, MAX_RATIO]`; a single
/// out-of-bounds parameter vetoes the whole proposal. The gate never clamps -
/// a partially applied proposal would no longer match its reasoning text.
pub fn validate(current: &ParamSet, proposed: &ParamSet) -> bool {
    let ratios = [
        ("gas_limit", proposed.gas_limit as f64 / current.gas_limit as f64),
        ("block_time", proposed.block_time / current.block_time),
        (
            "max_tps",
            f64::from(proposed.max_tps) / f64::from(current.max_tps),
        ),
    ];

    for (name, ratio) in ratios {
        if !(MIN_RATIO..=MAX_RATIO).contains(&ratio) {
            tracing::debug!(parameter = name, ratio, "unsafe parameter change");
            return false;
        }
    }

    true
}
