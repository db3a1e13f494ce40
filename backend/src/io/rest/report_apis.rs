//! # REST API for Report Export
//!
//! Generates a child's progress report as PDF and sends it as a download.
//! The rendered bytes are spooled through a per-request temporary file in the
//! configured report directory; the file is removed once the response body
//! has been read back.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::domain::{DomainError, DomainResult, GeneratedReport};
use crate::AppState;
use shared::ReportRequest;

pub fn router() -> Router<AppState> {
    Router::new().route("/generate-example", post(generate_example_report))
}

/// Generate an example PDF report with goals and recent activities
pub async fn generate_example_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Response {
    info!("POST /api/reports/generate-example - child_id: {}", request.child_id);

    let report = match state.report_service.generate_report(&request.child_id).await {
        Ok(report) => report,
        Err(e) => {
            error!("Failed to generate report: {}", e);
            return e.into_response();
        }
    };

    let filename = report.filename.clone();
    match spool_report(&state.config.report_dir, report).await {
        Ok(bytes) => pdf_attachment(&filename, bytes),
        Err(e) => {
            error!("Failed to write report file: {}", e);
            e.into_response()
        }
    }
}

/// Keep only characters that are safe in a file name
fn file_safe(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Write the report to `report_<child>_<random>.pdf` under `report_dir` and
/// read it back. The random part keeps concurrent requests for the same child
/// apart.
pub async fn spool_report(report_dir: &Path, report: GeneratedReport) -> DomainResult<Vec<u8>> {
    let dir: PathBuf = report_dir.to_path_buf();
    let prefix = format!("report_{}_", file_safe(&report.child_id));
    let content = report.content;

    let spooled = tokio::task::spawn_blocking(move || -> std::io::Result<Vec<u8>> {
        std::fs::create_dir_all(&dir)?;
        let mut file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".pdf")
            .tempfile_in(&dir)?;
        file.write_all(&content)?;
        file.flush()?;
        std::fs::read(file.path())
    })
    .await;

    match spooled {
        Ok(Ok(bytes)) => Ok(bytes),
        Ok(Err(e)) => Err(DomainError::Internal(format!("Erro ao gerar PDF: {}", e))),
        Err(e) => Err(DomainError::Internal(format!("Erro ao gerar PDF: {}", e))),
    }
}

/// RFC 5987 `attr-char`: everything else is percent-encoded in `filename*`
const FILENAME_ATTR_CHARS: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Content-Disposition value for a download. Non-ASCII names get an ASCII
/// `filename` fallback plus the UTF-8 `filename*` form of RFC 6266.
fn content_disposition(filename: &str) -> String {
    if filename.is_ascii() {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        utf8_percent_encode(filename, FILENAME_ATTR_CHARS)
    )
}

fn pdf_attachment(filename: &str, bytes: Vec<u8>) -> Response {
    let disposition = content_disposition(filename);
    let disposition = match HeaderValue::from_str(&disposition) {
        Ok(value) => value,
        Err(e) => {
            return DomainError::Internal(format!("Erro ao gerar PDF: {}", e)).into_response();
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(child_id: &str) -> GeneratedReport {
        GeneratedReport {
            child_id: child_id.to_string(),
            filename: "relatorio_Ana.pdf".to_string(),
            content: b"%PDF-1.3 test".to_vec(),
        }
    }

    #[test]
    fn test_file_safe() {
        assert_eq!(file_safe("abc-123_x"), "abc-123_x");
        assert_eq!(file_safe("../../etc/passwd"), "______etc_passwd");
    }

    #[tokio::test]
    async fn test_spool_report_round_trips_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();

        let bytes = spool_report(dir.path(), report("c1")).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.3 test");

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn test_spool_report_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("reports").join("nested");

        let bytes = spool_report(&nested, report("c1")).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(nested.is_dir());
    }

    #[test]
    fn test_pdf_attachment_headers() {
        let response = pdf_attachment("relatorio_Ana.pdf", b"%PDF".to_vec());

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"relatorio_Ana.pdf\""
        );
    }

    #[test]
    fn test_non_ascii_filename_is_encoded() {
        let response = pdf_attachment("relatorio_João Conceição.pdf", b"%PDF".to_vec());

        let disposition = &response.headers()[header::CONTENT_DISPOSITION];
        assert!(disposition.to_str().is_ok());
        assert_eq!(
            disposition,
            "attachment; filename=\"relatorio_Jo_o Concei__o.pdf\"; \
             filename*=UTF-8''relatorio_Jo%C3%A3o%20Concei%C3%A7%C3%A3o.pdf"
        );
    }
}
