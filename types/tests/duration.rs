use std::collections::HashMap;

use tempo_types::{ClockFormatter, Duration, DurationError, DurationField, DurationFormatter};

fn d(seconds: i64, nanoseconds: i64) -> Duration {
    Duration::from_seconds_and_nanoseconds(seconds, nanoseconds).unwrap()
}

#[test]
fn construction_round_trips_components() {
    for (seconds, nanoseconds) in [(0, 0), (1, 1), (59, 999_999_999), (i64::MAX, 0)] {
        let duration = d(seconds, nanoseconds);
        assert_eq!(duration.seconds(), seconds as u64);
        assert_eq!(u64::from(duration.nanoseconds()), nanoseconds as u64);
    }
}

#[test]
fn invalid_components_name_the_field() {
    let cases = [
        ((-1, 0), "value for seconds must not be negative"),
        ((-1, 999_999_999), "value for seconds must not be negative"),
        ((0, -1), "value for nanoseconds must not be negative"),
        (
            (0, 1_000_000_000),
            "value for nanoseconds must not be greater than 999999999",
        ),
    ];
    for ((seconds, nanoseconds), message) in cases {
        let err = Duration::from_seconds_and_nanoseconds(seconds, nanoseconds).unwrap_err();
        assert_eq!(err.to_string(), message);
    }
}

#[test]
fn upper_bound_error_carries_limit() {
    let err = Duration::from_seconds_and_nanoseconds(3, 1_000_000_000).unwrap_err();
    let DurationError::TooLarge { field, limit } = err else {
        panic!("expected TooLarge, got {err:?}");
    };
    assert_eq!(field, DurationField::Nanoseconds);
    assert_eq!(limit, Duration::MAX_NANOSECONDS);
}

#[test]
fn default_rendering_examples() {
    assert_eq!(d(0, 0).as_string(None), "00:00:00.000000000");
    assert_eq!(d(3661, 500_000_000).as_string(None), "01:01:01.500000000");
    assert_eq!(d(3600, 0).as_string(None), "00:60:00.000000000");
    assert_eq!(d(59, 0).as_string(None), "00:00:59.000000000");
}

#[test]
fn supplied_formatter_bypasses_default() {
    let seconds_only = |duration: &Duration| format!("{}s", duration.seconds());
    let duration = d(3661, 500_000_000);
    assert_eq!(duration.as_string(Some(&seconds_only)), "3661s");
    assert_eq!(
        duration.as_string(Some(&ClockFormatter)),
        duration.as_string(None)
    );
}

#[test]
fn durations_work_as_map_keys() {
    let mut latencies: HashMap<Duration, &str> = HashMap::new();
    latencies.insert(d(1, 500), "first");
    latencies.insert(d(1, 500), "second");
    latencies.insert(d(1, 501), "third");
    assert_eq!(latencies.len(), 2);
    assert_eq!(latencies[&d(1, 500)], "second");
}

#[test]
fn serializes_as_default_string() {
    let json = serde_json::to_string(&d(3661, 500_000_000)).unwrap();
    assert_eq!(json, r#""01:01:01.500000000""#);
}

#[test]
fn deserializes_default_string() {
    let duration: Duration = serde_json::from_str(r#""00:60:00.000000007""#).unwrap();
    assert_eq!(duration, d(3600, 7));
}

#[test]
fn deserialize_rejects_non_clock_strings() {
    assert!(serde_json::from_str::<Duration>(r#""1.5s""#).is_err());
    assert!(serde_json::from_str::<Duration>(r#""00:00:00.1""#).is_err());
    assert!(serde_json::from_str::<Duration>("42").is_err());
}

#[test]
fn rendering_parses_back_to_the_same_value() {
    for duration in [
        d(0, 0),
        d(60, 1),
        d(61, 2),
        d(3600, 3),
        d(3660, 4),
        d(3661, 5),
        d(86_400, 999_999_999),
    ] {
        let rendered = duration.as_string(None);
        assert_eq!(rendered.parse::<Duration>().unwrap(), duration, "{rendered}");
    }
}
