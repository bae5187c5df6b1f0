/// Unit conversion module
///
/// Renders an inch value in the configured metric unit. Pure and
/// deterministic; the active profile decides factor, suffix, and precision.

use crate::config::ConversionProfile;

impl ConversionProfile {
    /// Convert `value` through this profile and render it as fixed-point
    /// text with the unit suffix, e.g. `1.0` -> `"25.4 mm"`.
    ///
    /// Values are non-negative in practice but a sign passes through
    /// unchanged.
    pub fn render(&self, value: f64) -> String {
        let converted = value * self.factor;
        format!("{:.prec$} {}", converted, self.suffix, prec = self.decimals)
    }
}
