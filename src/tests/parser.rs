use crate::parser::MeasurementParser;

#[test]
fn test_basic_pattern_with_annotation() {
    let parser = MeasurementParser::new();
    let parsed = parser.parse("2.50 inches. Heavy rain").unwrap();
    assert_eq!(parsed.value, 2.50);
    assert_eq!(parsed.annotation, "Heavy rain");
}

#[test]
fn test_basic_pattern_strips_period_space_prefix_only() {
    let parser = MeasurementParser::new();
    // Annotation without the ". " artifact is preserved verbatim
    let parsed = parser.parse("0.75 inches so far today").unwrap();
    assert_eq!(parsed.value, 0.75);
    assert_eq!(parsed.annotation, " so far today");
}

#[test]
fn test_basic_pattern_no_annotation() {
    let parser = MeasurementParser::new();
    let parsed = parser.parse("1.10 inches").unwrap();
    assert_eq!(parsed.value, 1.10);
    assert_eq!(parsed.annotation, "");
}

#[test]
fn test_basic_pattern_trims_whitespace() {
    let parser = MeasurementParser::new();
    let parsed = parser.parse("   1.25 inches   ").unwrap();
    assert_eq!(parsed.value, 1.25);
    assert_eq!(parsed.annotation, "");
}

#[test]
fn test_basic_pattern_empty_integer_part() {
    let parser = MeasurementParser::new();
    let parsed = parser.parse(".5 inches").unwrap();
    assert_eq!(parsed.value, 0.5);
}

#[test]
fn test_basic_pattern_empty_fraction_part() {
    let parser = MeasurementParser::new();
    let parsed = parser.parse("3. inches").unwrap();
    assert_eq!(parsed.value, 3.0);
}

#[test]
fn test_bare_dot_is_a_miss_not_an_error() {
    let parser = MeasurementParser::new();
    // Matches the grammar but fails to parse as a number
    assert!(parser.parse(". inches").is_none());
}

#[test]
fn test_advanced_pattern() {
    let parser = MeasurementParser::new();
    let parsed = parser.parse("04/12: 1.25 inches").unwrap();
    assert_eq!(parsed.value, 1.25);
    assert_eq!(parsed.annotation, "");
}

#[test]
fn test_advanced_pattern_rejects_trailing_text() {
    let parser = MeasurementParser::new();
    assert!(parser.parse("04/12: 1.25 inches of rain").is_none());
}

#[test]
fn test_empty_text_is_a_miss() {
    let parser = MeasurementParser::new();
    assert!(parser.parse("").is_none());
}

#[test]
fn test_trace_sentinel_is_a_miss() {
    let parser = MeasurementParser::new();
    assert!(parser.parse("Trace").is_none());
    assert!(parser.parse("  Trace  ").is_none());
}

#[test]
fn test_trace_sentinel_is_case_sensitive() {
    let parser = MeasurementParser::new();
    // "trace" is not the sentinel; it's just unrelated text
    assert!(parser.parse("trace").is_none());
}

#[test]
fn test_unrelated_text_is_a_miss() {
    let parser = MeasurementParser::new();
    assert!(parser.parse("Sunny today").is_none());
    assert!(parser.parse("No rain expected this week").is_none());
}

#[test]
fn test_number_must_lead_the_text() {
    let parser = MeasurementParser::new();
    assert!(parser.parse("We got 2.50 inches today").is_none());
}
