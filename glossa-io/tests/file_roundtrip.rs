use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;

use glossa_core::{Error, EventSource, RecordSink};
use glossa_io::{FileSource, JsonLineSink};

fn file_with(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn loads_a_json_array_file() {
    let file = file_with(r#"[{"client_name": "easyjet"}, {"client_name": "airliberty"}]"#);
    let mut source = FileSource::new(file.path());
    let records = source.load().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["client_name"], "easyjet");
}

#[tokio::test]
async fn loads_a_json_lines_file() {
    let file = file_with("{\"n\": 1}\n{\"n\": 2}\n{\"n\": 3}\n");
    let mut source = FileSource::new(file.path());
    let records = source.load().await.unwrap();
    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn loads_a_single_object_file() {
    let file = file_with(r#"{"n": 1}"#);
    let mut source = FileSource::new(file.path());
    let records = source.load().await.unwrap();
    assert_eq!(records, vec![json!({"n": 1})]);
}

#[tokio::test]
async fn rejects_an_undecodable_file() {
    let file = file_with("{\"n\": 1}\n<<garbage>>\n");
    let mut source = FileSource::new(file.path());
    let err = source.load().await.unwrap_err();
    assert!(matches!(err, Error::UnparseableSource(_)));
}

#[tokio::test]
async fn missing_file_surfaces_the_io_error() {
    let mut source = FileSource::new("/nonexistent/events.json");
    let err = source.load().await.unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[tokio::test]
async fn file_sink_appends_one_line_per_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.jsonl");
    let mut sink = JsonLineSink::file(&path);
    sink.emit(json!({"date": "2018-12-26 18:12:00", "average": 20.0}))
        .await
        .unwrap();
    sink.emit(json!({"date": "2018-12-26 18:13:00", "average": 25.5}))
        .await
        .unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["average"], 20.0);
}
