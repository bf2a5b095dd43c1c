//! Test fixtures and common test data.

/// Canned payloads, one per recognized schema shape. The literal values in
/// `FLAT_NUMERIC` and `STRING_ENCODED` average to (20.90, 56.50), which the
/// aggregation tests assert against.
pub mod payloads {
    /// Shape 1: numeric `temp`/`hum`.
    pub const FLAT_NUMERIC: &str = r#"{"temp":20.1,"hum":55}"#;

    /// Shape 2: string-encoded `temperature`/`humidity`.
    pub const STRING_ENCODED: &str = r#"{"temperature":"21.7","humidity":"58"}"#;

    /// Shape 3: nested `weather` object with `t`/`h`.
    pub const NESTED: &str = r#"{"weather":{"t":22.5,"h":53.3}}"#;
}

/// Emits a payload in one of the three source formats, mimicking the
/// heterogeneous sources the service collects from.
pub fn payload_in_format(format: usize, temperature: f64, humidity: f64) -> String {
    match format % 3 {
        0 => format!(r#"{{ "temp": {:.1}, "hum": {:.0} }}"#, temperature, humidity),
        1 => format!(
            r#"{{ "temperature": "{:.1}", "humidity": "{:.0}" }}"#,
            temperature, humidity
        ),
        _ => format!(
            r#"{{ "weather": {{ "t": {:.1}, "h": {:.1} }} }}"#,
            temperature, humidity
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn test_all_formats_parse_to_the_same_reading() {
        for format in 0..3 {
            let payload = payload_in_format(format, 19.5, 48.0);
            let reading = parser::parse(&payload).unwrap();
            assert_eq!(reading.temperature, 19.5, "format {}", format);
            assert_eq!(reading.humidity, 48.0, "format {}", format);
        }
    }
}
