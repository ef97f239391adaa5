//! Debug snapshot of the most recent webhook call

use axum::http::HeaderMap;
use callsheet_domain::RecordId;
use serde_json::{json, Map, Value};
use std::path::Path;
use thiserror::Error;

/// Snapshot write error
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Failed to write the file
    #[error("Failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode the snapshot
    #[error("Failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Headers as a JSON object; non-UTF-8 values are decoded lossily
pub fn headers_to_json(headers: &HeaderMap) -> Value {
    let map: Map<String, Value> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
            )
        })
        .collect();
    Value::Object(map)
}

/// Overwrite `path` with `{"headers": ..., "body": ...}`, pretty-printed
///
/// The file is written beside `path` under a unique name and renamed into
/// place, so concurrent calls never leave an interleaved snapshot.
pub async fn write_snapshot(
    path: &Path,
    headers: &HeaderMap,
    body: &Value,
) -> Result<(), SnapshotError> {
    let snapshot = json!({
        "headers": headers_to_json(headers),
        "body": body,
    });
    let contents = serde_json::to_vec_pretty(&snapshot)?;

    let temp_path = path.with_extension(format!("{}.tmp", RecordId::new()));
    tokio::fs::write(&temp_path, contents).await?;
    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_snapshot_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_payload.json");

        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        let body = json!({"data": {"caller_name": "Jane"}});

        write_snapshot(&path, &headers, &body).await.unwrap();

        let written: Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(written["headers"]["content-type"], "application/json");
        assert_eq!(written["body"], body);
    }

    #[tokio::test]
    async fn test_snapshot_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_payload.json");
        let headers = HeaderMap::new();

        write_snapshot(&path, &headers, &json!({"n": 1})).await.unwrap();
        write_snapshot(&path, &headers, &json!({"n": 2})).await.unwrap();

        let written: Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(written["body"]["n"], 2);
    }

    #[tokio::test]
    async fn test_concurrent_snapshots_stay_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_payload.json");
        let filler = "x".repeat(64 * 1024);

        let writes = (0..16).map(|n| {
            let path = path.clone();
            let body = json!({"n": n, "filler": filler});
            tokio::spawn(async move { write_snapshot(&path, &HeaderMap::new(), &body).await })
        });
        for handle in writes.collect::<Vec<_>>() {
            handle.await.unwrap().unwrap();
        }

        let written: Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert!(written["body"]["n"].as_u64().unwrap() < 16);
        assert_eq!(written["body"]["filler"].as_str().unwrap().len(), 64 * 1024);

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn test_unwritable_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("last_payload.json");

        let result = write_snapshot(&path, &HeaderMap::new(), &json!({})).await;
        assert!(matches!(result, Err(SnapshotError::Io(_))));
    }

    #[test]
    fn test_non_utf8_header_is_lossy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-raw", HeaderValue::from_bytes(&[0x61, 0xff]).unwrap());
        assert_eq!(headers_to_json(&headers)["x-raw"], "a\u{FFFD}");
    }
}
