use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;

// Calendar units (years, months) are not accepted; the platform never emits them
// for video lengths and they have no fixed length in seconds.
static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)(?:\.\d+)?S)?)?$")
        .expect("Failed to compile duration regex")
});

/// Seconds per week, day, hour and minute, in capture-group order
const UNIT_SECONDS: [i64; 4] = [604_800, 86_400, 3_600, 60];

/// Parse an ISO-8601 duration (`PT1H2M3S`, `P1DT2H`, `P0D`) into whole seconds.
/// Fractional seconds are truncated.
pub fn parse_iso8601_duration(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    if trimmed == "P" || trimmed.ends_with('T') {
        bail!("Invalid ISO-8601 duration: {:?}", input);
    }

    let captures = DURATION_RE
        .captures(trimmed)
        .with_context(|| format!("Invalid ISO-8601 duration: {:?}", input))?;

    let whole = |idx: usize| -> Result<i64> {
        captures
            .get(idx)
            .map(|m| m.as_str().parse::<i64>())
            .transpose()
            .with_context(|| format!("Duration component out of range in {:?}", input))
            .map(|value| value.unwrap_or(0))
    };

    // Fractional seconds are dropped by the pattern
    let mut total = whole(5)?;
    for (idx, unit) in UNIT_SECONDS.iter().enumerate() {
        total = whole(idx + 1)?
            .checked_mul(*unit)
            .and_then(|component| total.checked_add(component))
            .with_context(|| format!("Duration component out of range in {:?}", input))?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_components() {
        assert_eq!(parse_iso8601_duration("PT1H2M3S").unwrap(), 3723);
        assert_eq!(parse_iso8601_duration("PT59S").unwrap(), 59);
        assert_eq!(parse_iso8601_duration("PT1M").unwrap(), 60);
        assert_eq!(parse_iso8601_duration("PT15M33S").unwrap(), 933);
    }

    #[test]
    fn test_day_and_week_components() {
        assert_eq!(parse_iso8601_duration("P1DT1S").unwrap(), 86_401);
        assert_eq!(parse_iso8601_duration("P1W").unwrap(), 604_800);
    }

    #[test]
    fn test_zero_length_live_stream() {
        assert_eq!(parse_iso8601_duration("P0D").unwrap(), 0);
        assert_eq!(parse_iso8601_duration("PT0S").unwrap(), 0);
    }

    #[test]
    fn test_fractional_seconds_truncate() {
        assert_eq!(parse_iso8601_duration("PT60.9S").unwrap(), 60);
    }

    #[test]
    fn test_rejects_malformed_input() {
        for bad in ["", "P", "PT", "1H", "PT1X", "P1Y", "P2M", "garbage"] {
            assert!(parse_iso8601_duration(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_oversized_components_are_errors() {
        for huge in ["PT9999999999999999H", "P99999999999999W", "PT99999999999999999999S", "P1DT9223372036854775807S"] {
            let err = parse_iso8601_duration(huge).unwrap_err();
            assert!(err.to_string().contains("out of range"), "{huge:?}: {err}");
        }
    }
}
