/// Measurement parser module
///
/// Extracts a rainfall measurement (a decimal inch value plus any trailing
/// annotation) from free-form post text. Most posts are not measurements;
/// a miss is an expected outcome, not an error.

use regex::Regex;

/// Looser of the two rules: a leading decimal number, " inches", then
/// arbitrary trailing text captured as the annotation.
const BASIC_PATTERN: &str = r"^(\d*\.\d*) inches(.*)";

/// Stricter fallback for the other post style: a date-like prefix of digits
/// and slashes, ": ", the number, " inches", and nothing after.
const ADVANCED_PATTERN: &str = r"^[\d/]+: (\d*\.\d*) inches$";

/// A measurement recognized in a post.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMeasurement {
    /// Rainfall in inches as posted
    pub value: f64,
    /// Free text following the number, preserved verbatim apart from a
    /// stray leading ". " the source account often includes
    pub annotation: String,
}

/// Parser with its patterns compiled once at construction, so independent
/// runs and tests get isolated instances.
pub struct MeasurementParser {
    basic: Regex,
    advanced: Regex,
}

impl Default for MeasurementParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementParser {
    /// Compile the fixed pattern set. The patterns are constants known to be
    /// valid, so failure here is a programming error and panics at startup.
    pub fn new() -> Self {
        MeasurementParser {
            basic: Regex::new(BASIC_PATTERN).expect("basic pattern compiles"),
            advanced: Regex::new(ADVANCED_PATTERN).expect("advanced pattern compiles"),
        }
    }

    /// Parse post text into a measurement, or `None` when the text does not
    /// encode one.
    ///
    /// `""` and the exact literal `"Trace"` are recognized non-measurements
    /// ("Trace" is the source account's convention for rain detected but not
    /// measurable). A matched number that still fails to parse as a float
    /// (e.g. a bare ".") is downgraded to a miss as well.
    pub fn parse(&self, text: &str) -> Option<ParsedMeasurement> {
        let text = text.trim();

        if text.is_empty() {
            log::debug!("empty post text");
            return None;
        }
        if text == "Trace" {
            log::debug!("trace post, no measurable value");
            return None;
        }

        if let Some(caps) = self.basic.captures(text) {
            let value: f64 = match caps[1].parse() {
                Ok(v) => v,
                Err(e) => {
                    log::debug!("matched number {:?} failed to parse: {}", &caps[1], e);
                    return None;
                }
            };
            let mut annotation = caps.get(2).map_or("", |m| m.as_str());
            // Drop the stray period-space he sometimes puts after the unit
            if let Some(stripped) = annotation.strip_prefix(". ") {
                annotation = stripped;
            }
            return Some(ParsedMeasurement {
                value,
                annotation: annotation.to_string(),
            });
        }

        if let Some(caps) = self.advanced.captures(text) {
            let value: f64 = match caps[1].parse() {
                Ok(v) => v,
                Err(e) => {
                    log::debug!("matched number {:?} failed to parse: {}", &caps[1], e);
                    return None;
                }
            };
            return Some(ParsedMeasurement {
                value,
                annotation: String::new(),
            });
        }

        log::debug!("post text is not a measurement: {:?}", text);
        None
    }
}
