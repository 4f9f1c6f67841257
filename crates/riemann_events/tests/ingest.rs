use std::io::{BufReader, Write};

use riemann_events::{
    forward, EventIngestor, Field, ForwardStats, LineRecordError, NormalizeConfig,
    NormalizeError, Number, ScalarKind, ScalarPolicy, WireEvent,
};

const STREAM: &str = concat!(
    r#"{"host": {"symbol": "web-1"}, "service": "api", "attributes": [[{"symbol": "env"}, "prod"], ["region", {"symbol": "us"}]], "value": 1}"#,
    "\n",
    r#"{"host": "web-2", "tags": ["canary", {"symbol": "eu"}], "time": 1700000000, "value": 0.25}"#,
    "\n",
    "\n",
    r#"{"host": "web-3", "attributes": {"shard": 7}}"#,
    "\n",
    r#"{"host": "web-4", "ttl": "soon"}"#,
    "\n",
);

fn ingest(data: &str, config: &NormalizeConfig) -> Vec<riemann_events::LineRecord<WireEvent>> {
    EventIngestor::new(data.as_bytes(), config).collect()
}

#[test]
fn stream_is_normalized_line_by_line() {
    let records = ingest(STREAM, &NormalizeConfig::default());
    let line_numbers: Vec<_> = records.iter().map(|r| r.line_number).collect();
    assert_eq!(line_numbers, vec![1, 2, 4, 5]);

    let first = records[0].outcome.as_ref().unwrap();
    assert_eq!(first.host.as_deref(), Some("web-1"));
    assert_eq!(
        first.attribute_pairs().collect::<Vec<_>>(),
        vec![("env", "prod"), ("region", "us")]
    );
    assert_eq!(first.value, Some(Number::Int(1)));

    let second = records[1].outcome.as_ref().unwrap();
    assert_eq!(second.tags, vec!["canary".to_string(), "eu".to_string()]);
    let json = serde_json::to_value(second).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "host": "web-2",
            "time": 1700000000,
            "tags": ["canary", "eu"],
            "metric": 0.25,
        })
    );

    let third = records[2].outcome.as_ref().unwrap();
    assert_eq!(third.attribute_pairs().collect::<Vec<_>>(), vec![("shard", "7")]);

    assert!(matches!(
        records[3].outcome,
        Err(LineRecordError::Normalize(NormalizeError::UnsupportedValue {
            field: Field::Ttl,
            kind: ScalarKind::Str,
        }))
    ));
}

#[test]
fn strict_config_rejects_numeric_attributes() {
    let config = NormalizeConfig {
        scalar_policy: ScalarPolicy::Strict,
        ..NormalizeConfig::default()
    };
    let records = ingest(STREAM, &config);
    assert!(matches!(
        records[2].outcome,
        Err(LineRecordError::Normalize(NormalizeError::UnsupportedValue {
            field: Field::AttributeValue,
            kind: ScalarKind::Number,
        }))
    ));
}

#[test]
fn oversized_lines_are_skipped_without_ending_the_stream() {
    let config = NormalizeConfig::from_toml_str("max_line_bytes = 32").unwrap();
    let long = format!("{{\"host\": \"{}\"}}", "x".repeat(64));
    let data = format!("{long}\n{{\"host\": \"short\"}}\n");

    let records = ingest(&data, &config);
    assert_eq!(records.len(), 2);
    assert!(matches!(
        records[0].outcome,
        Err(LineRecordError::LineTooLong {
            max_line_bytes: 32,
            ..
        })
    ));
    assert_eq!(
        records[1].outcome.as_ref().unwrap().host.as_deref(),
        Some("short")
    );
}

#[test]
fn file_backed_stream_forwards_into_sink() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(STREAM.as_bytes()).expect("write stream");
    file.flush().expect("flush stream");

    let reader = BufReader::new(file.reopen().expect("reopen"));
    let mut sink: Vec<WireEvent> = Vec::new();
    let stats = forward(
        EventIngestor::new(reader, &NormalizeConfig::default()),
        &mut sink,
    )
    .unwrap();

    assert_eq!(stats, ForwardStats { sent: 3, rejected: 1 });
    let hosts: Vec<_> = sink.iter().filter_map(|e| e.host.as_deref()).collect();
    assert_eq!(hosts, vec!["web-1", "web-2", "web-3"]);
}

#[test]
fn large_unsigned_time_and_repeated_attribute_keys_survive() {
    let data = concat!(
        r#"{"time": 18446744073709551615, "tags": null, "attributes": {"a": "1", "b": "2", "a": "3"}}"#,
        "\n",
    );
    let records = ingest(data, &NormalizeConfig::default());
    let event = records[0].outcome.as_ref().unwrap();
    assert_eq!(event.time, Some(Number::UInt(u64::MAX)));
    assert!(event.tags.is_empty());
    assert_eq!(
        event.attribute_pairs().collect::<Vec<_>>(),
        vec![("a", "1"), ("b", "2"), ("a", "3")]
    );
    assert_eq!(
        serde_json::to_value(event).unwrap()["time"],
        serde_json::json!(u64::MAX)
    );
}
