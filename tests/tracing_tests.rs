// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests verifying tracing output from validation, translation,
//! and config loading.

use std::io::Write as _;
use std::sync::{Arc, Mutex};

use stratum_config::load_config;
use stratum_error::{Details, ErrorCode, codes, not_found_error, validation_error};
use stratum_protocol::{GrpcTranslator, HttpTranslator, ProtocolTranslator};
use stratum_validate::{Field, Rule, validate};

// ---------------------------------------------------------------------------
// Shared log-capture infrastructure
// ---------------------------------------------------------------------------

/// Thread-safe buffer that captures tracing output.
#[derive(Clone, Default)]
struct LogBuf(Arc<Mutex<Vec<u8>>>);

impl LogBuf {
    fn contents(&self) -> String {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }

    fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }
}

impl std::io::Write for LogBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuf {
    type Writer = LogBuf;
    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Install a thread-local subscriber that captures all output into a
/// [`LogBuf`].  Hold the guard for the test duration.
fn setup_tracing() -> (LogBuf, tracing::subscriber::DefaultGuard) {
    let buf = LogBuf::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_target(true)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buf, guard)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn failing_rule_is_logged_with_field_and_code() {
    let (buf, _guard) = setup_tracing();
    let err = validate(&[Field::new("email", "nope", [Rule::required(), Rule::email()])]);
    assert!(err.is_some());
    assert!(buf.contains("stratum.validate"), "logs: {}", buf.contents());
    assert!(buf.contains("field failed validation"));
    assert!(buf.contains("field=email"));
    assert!(buf.contains("rule=\"email\"") || buf.contains("rule=email"));
    assert!(buf.contains("INVALID_EMAIL"));
}

#[test]
fn passing_validation_is_silent() {
    let (buf, _guard) = setup_tracing();
    assert!(validate(&[Field::new("email", "a@b.io", [Rule::email()])]).is_none());
    assert!(buf.contents().is_empty(), "unexpected logs: {}", buf.contents());
}

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

#[test]
fn fallback_resolution_is_logged() {
    let (buf, _guard) = setup_tracing();
    let err = not_found_error(ErrorCode::from_static("ORDER_NOT_FOUND"), "x", Details::new());
    assert_eq!(GrpcTranslator::new().translate_native(&err).grpc_code, 5);
    assert!(buf.contains("stratum.protocol"));
    assert!(buf.contains("no mapping for error code"));
    assert!(buf.contains("ORDER_NOT_FOUND"));
    assert!(buf.contains("grpc"));
}

#[test]
fn table_hit_is_silent() {
    let (buf, _guard) = setup_tracing();
    let err = validation_error(codes::INVALID_EMAIL, "x", Details::new());
    assert_eq!(HttpTranslator::new().translate_native(&err).http_status, 400);
    assert!(!buf.contains("no mapping"), "logs: {}", buf.contents());
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn loading_a_file_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stratum.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "[http.mapping]\nUSER_NOT_FOUND = 410").unwrap();

    let (buf, _guard) = setup_tracing();
    load_config(Some(&path)).unwrap();
    assert!(buf.contains("stratum.config"));
    assert!(buf.contains("loading config file"));
}
