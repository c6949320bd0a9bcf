//! ログ配信API
//!
//! `/logs`, `/logs/{filename}`, `/logs/download/{filename}` エンドポイントを提供する。

use super::error::AppError;
use crate::common::error::VaultError;
use crate::logs::reader::INVALID_FILENAME_MESSAGE;
use crate::AppState;
use axum::{
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, StatusCode},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;

/// 一覧が空の場合のメッセージ
const NO_LOGS_MESSAGE: &str = "No logs found";

/// ログ一覧レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogListResponse {
    /// `.log` ファイル名（辞書順）
    pub logs: Vec<String>,
}

/// ログ内容レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogContentResponse {
    /// リクエストされたファイル名
    pub file: String,
    /// ファイル内容
    pub content: String,
}

/// `{filename}` パスパラメータ
///
/// デコード結果がUTF-8でない場合も構造化エラー（400）で返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilename(pub String);

impl<S> FromRequestParts<S> for LogFilename
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(filename)) => Ok(Self(filename)),
            Err(rejection) => {
                tracing::debug!("Rejected filename path parameter: {}", rejection);
                Err(VaultError::Validation(INVALID_FILENAME_MESSAGE.to_string()).into())
            }
        }
    }
}

/// GET /logs
pub async fn list_logs(State(state): State<AppState>) -> Result<Json<LogListResponse>, AppError> {
    let logs = state.log_catalog.list().await?;
    if logs.is_empty() {
        return Err(VaultError::NotFound(NO_LOGS_MESSAGE.to_string()).into());
    }

    Ok(Json(LogListResponse { logs }))
}

/// GET /logs/{filename}
pub async fn read_log(
    LogFilename(filename): LogFilename,
    State(state): State<AppState>,
) -> Result<Json<LogContentResponse>, AppError> {
    let content = state.log_reader.read(&filename).await?;

    Ok(Json(LogContentResponse {
        file: filename,
        content,
    }))
}

/// GET /logs/download/{filename}
///
/// ファイルをストリーミングで返す（`application/octet-stream` の添付ファイル）。
/// 本文はオープン時点のサイズまでで打ち切り、`Content-Length` と一致させる。
pub async fn download_log(
    LogFilename(filename): LogFilename,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let (file, len) = state.log_reader.open(&filename).await?;
    let body = Body::from_stream(ReaderStream::new(file.take(len)));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_DISPOSITION, content_disposition(&filename))
        .header(header::CONTENT_LENGTH, len)
        .body(body)
        .map_err(|e| VaultError::Internal(format!("Failed to build download response: {}", e)))?;

    Ok(response)
}

/// `Content-Disposition` を組み立てる
///
/// ASCII以外や引用符を含む名前は `filename` を置換した上で `filename*`（RFC 5987）を併記する。
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            ' '..='~' if c != '"' && c != '\\' => c,
            _ => '_',
        })
        .collect();

    if fallback == filename {
        format!("attachment; filename=\"{}\"", filename)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            percent_encode(filename)
        )
    }
}

fn percent_encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
