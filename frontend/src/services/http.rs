//! HTTP client for the catalog backend.
//!
//! Every call goes through [`HttpClient`], which:
//!
//! - prefixes paths with [`API_BASE_PATH`],
//! - aborts requests after [`REQUEST_TIMEOUT_MS`],
//! - turns each transport failure or non-2xx status into exactly one
//!   error notice.
//!
//! Callers therefore never raise notices for transport errors themselves;
//! they only reset their own busy state.

use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use web_sys::{AbortController, AbortSignal, File, FormData};

use crate::config::{API_BASE_PATH, FALLBACK_ERROR_MESSAGE, REQUEST_TIMEOUT_MS};
use crate::state::Notifier;
use crate::types::{AppError, AppResult};

/// How a non-2xx response is treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponsePolicy {
    /// Any non-2xx status is a transport error.
    Strict,
    /// A non-2xx response whose body still decodes as the expected type is
    /// returned as a domain answer. The status is still notified.
    AcceptDomainBody,
}

#[derive(Clone, Copy)]
pub struct HttpClient {
    base_path: &'static str,
    timeout_ms: u32,
    notifier: Notifier,
}

impl HttpClient {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            base_path: API_BASE_PATH,
            timeout_ms: REQUEST_TIMEOUT_MS,
            notifier,
        }
    }

    pub fn notifier(&self) -> Notifier {
        self.notifier
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }

    /// `GET` a JSON document.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> AppResult<T> {
        let result = self.try_get_json(path, query).await;
        self.intercept(path, result)
    }

    /// `GET` an opaque binary payload.
    pub async fn get_bytes(&self, path: &str, query: &[(&'static str, String)]) -> AppResult<Vec<u8>> {
        let result = self.try_get_bytes(path, query).await;
        self.intercept(path, result)
    }

    /// `POST` one file as multipart field `field`, expecting JSON back.
    pub async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        file: &File,
        policy: ResponsePolicy,
    ) -> AppResult<T> {
        let result = self.try_post_file(path, field, file, policy).await;
        self.intercept(path, result)
    }

    async fn try_get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> AppResult<T> {
        let guard = TimeoutGuard::arm(self.timeout_ms)?;
        let response = Request::get(&self.url(path))
            .query(query.iter().map(|(k, v)| (*k, v)))
            .abort_signal(Some(&guard.signal()))
            .send()
            .await
            .map_err(|e| guard.transport_error(e))?;
        self.read_json(path, response, ResponsePolicy::Strict, &guard).await
    }

    async fn try_get_bytes(&self, path: &str, query: &[(&'static str, String)]) -> AppResult<Vec<u8>> {
        let guard = TimeoutGuard::arm(self.timeout_ms)?;
        let response = Request::get(&self.url(path))
            .query(query.iter().map(|(k, v)| (*k, v)))
            .abort_signal(Some(&guard.signal()))
            .send()
            .await
            .map_err(|e| guard.transport_error(e))?;
        if !response.ok() {
            let body = response.text().await.ok();
            return Err(status_error(response.status(), body.as_deref()));
        }
        response.binary().await.map_err(|e| guard.transport_error(e))
    }

    async fn try_post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        file: &File,
        policy: ResponsePolicy,
    ) -> AppResult<T> {
        let form = FormData::new()
            .map_err(|e| AppError::Browser(format!("Failed to create FormData: {:?}", e)))?;
        form.append_with_blob(field, file)
            .map_err(|e| AppError::Browser(format!("Failed to append file: {:?}", e)))?;

        let guard = TimeoutGuard::arm(self.timeout_ms)?;
        let request = Request::post(&self.url(path))
            .abort_signal(Some(&guard.signal()))
            .body(form)
            .map_err(|e| AppError::Request(e.to_string()))?;
        let response = request.send().await.map_err(|e| guard.transport_error(e))?;
        self.read_json(path, response, policy, &guard).await
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        path: &str,
        response: Response,
        policy: ResponsePolicy,
        guard: &TimeoutGuard,
    ) -> AppResult<T> {
        let status = response.status();
        let ok = response.ok();
        let body = response.text().await.map_err(|e| guard.transport_error(e))?;

        match decode_body(ok, status, &body, policy) {
            Decoded::Value(value) => Ok(value),
            Decoded::DomainOnError(value, error) => {
                // Still a failed status: notify, but hand the report back
                self.report(path, &error);
                Ok(value)
            }
            Decoded::Failed(error) => Err(error),
        }
    }

    /// The single place where transport failures become notices.
    fn intercept<T>(&self, path: &str, result: AppResult<T>) -> AppResult<T> {
        if let Err(e) = &result {
            self.report(path, e);
        }
        result
    }

    fn report(&self, path: &str, error: &AppError) {
        log::error!("❌ {}{} failed: {:?}", self.base_path, path, error);
        self.notifier.error(error.to_string());
    }
}

/// What a response body turned out to be.
#[derive(Debug, PartialEq)]
pub enum Decoded<T> {
    /// 2xx with the expected shape.
    Value(T),
    /// Non-2xx whose body is still the expected domain report.
    DomainOnError(T, AppError),
    Failed(AppError),
}

/// Interprets a response body under `policy`.
pub fn decode_body<T: DeserializeOwned>(
    ok: bool,
    status: u16,
    body: &str,
    policy: ResponsePolicy,
) -> Decoded<T> {
    if ok {
        return match serde_json::from_str(body) {
            Ok(value) => Decoded::Value(value),
            Err(e) => Decoded::Failed(AppError::Decode(e.to_string())),
        };
    }
    let error = status_error(status, Some(body));
    if policy == ResponsePolicy::AcceptDomainBody {
        if let Ok(value) = serde_json::from_str::<T>(body) {
            log::warn!("Backend answered {} with a domain report", status);
            return Decoded::DomainOnError(value, error);
        }
    }
    Decoded::Failed(error)
}

/// Aborts the request it is attached to once the timeout fires.
///
/// Dropping the guard cancels the timer.
struct TimeoutGuard {
    controller: AbortController,
    timed_out: Rc<Cell<bool>>,
    timeout_ms: u32,
    _timer: Timeout,
}

impl TimeoutGuard {
    fn arm(timeout_ms: u32) -> AppResult<Self> {
        let controller = AbortController::new()
            .map_err(|e| AppError::Browser(format!("Failed to create AbortController: {:?}", e)))?;
        let timed_out = Rc::new(Cell::new(false));

        let flag = timed_out.clone();
        let abort = controller.clone();
        let timer = Timeout::new(timeout_ms, move || {
            flag.set(true);
            abort.abort();
        });

        Ok(Self {
            controller,
            timed_out,
            timeout_ms,
            _timer: timer,
        })
    }

    fn signal(&self) -> AbortSignal {
        self.controller.signal()
    }

    fn transport_error(&self, error: gloo_net::Error) -> AppError {
        if self.timed_out.get() {
            AppError::Timeout(self.timeout_ms / 1000)
        } else {
            AppError::Network(notice_text(None, Some(&error.to_string())))
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Error for a non-2xx response, worded the way the notice shows it.
pub fn status_error(status: u16, body: Option<&str>) -> AppError {
    let transport = format!("Request failed with status code {}", status);
    AppError::Status {
        status,
        message: notice_text(body, Some(&transport)),
    }
}

/// Picks the notice text: the backend's `message`, else the transport
/// error text, else a generic fallback.
pub fn notice_text(body: Option<&str>, transport: Option<&str>) -> String {
    body.and_then(backend_message)
        .or_else(|| {
            transport
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

fn backend_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()?
        .message
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImportOutcome;

    #[test]
    fn test_backend_message_wins() {
        let body = r#"{"status": 400, "message": "pageSize must be less than or equal to 100"}"#;
        assert_eq!(
            notice_text(Some(body), Some("Request failed with status code 400")),
            "pageSize must be less than or equal to 100"
        );
    }

    #[test]
    fn test_transport_text_when_no_message() {
        assert_eq!(
            notice_text(Some("<html>Bad Gateway</html>"), Some("Request failed with status code 502")),
            "Request failed with status code 502"
        );
        assert_eq!(
            notice_text(Some(r#"{"message": "  "}"#), Some("Failed to fetch")),
            "Failed to fetch"
        );
    }

    #[test]
    fn test_fallback_when_nothing_usable() {
        assert_eq!(notice_text(None, None), FALLBACK_ERROR_MESSAGE);
        assert_eq!(notice_text(Some(""), Some("   ")), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_status_error() {
        let error = status_error(500, Some(r#"{"message": "Database unavailable"}"#));
        assert_eq!(
            error,
            AppError::Status {
                status: 500,
                message: "Database unavailable".to_string()
            }
        );

        let error = status_error(404, None);
        assert_eq!(error.to_string(), "Request failed with status code 404");
    }

    #[test]
    fn test_domain_report_on_error_status_is_kept_and_reported() {
        let body = r#"{"totalRows": 3, "insertedCount": 1, "updatedCount": 0, "errorCount": 2,
            "errors": [
                {"row": 2, "field": "price", "message": "must be positive"},
                {"row": 3, "field": "status", "message": "unknown status"}
            ]}"#;

        match decode_body::<ImportOutcome>(false, 422, body, ResponsePolicy::AcceptDomainBody) {
            Decoded::DomainOnError(outcome, error) => {
                assert_eq!(outcome.error_count, 2);
                assert_eq!(error.to_string(), "Request failed with status code 422");
            }
            other => panic!("expected a domain report, got {:?}", other),
        }

        assert!(matches!(
            decode_body::<ImportOutcome>(false, 422, body, ResponsePolicy::Strict),
            Decoded::Failed(AppError::Status { status: 422, .. })
        ));
    }

    #[test]
    fn test_decode_body_on_success() {
        let body = r#"{"totalRows": 1, "insertedCount": 1, "updatedCount": 0, "errorCount": 0}"#;
        assert!(matches!(
            decode_body::<ImportOutcome>(true, 200, body, ResponsePolicy::AcceptDomainBody),
            Decoded::Value(_)
        ));
        assert!(matches!(
            decode_body::<ImportOutcome>(true, 200, "<html>", ResponsePolicy::Strict),
            Decoded::Failed(AppError::Decode(_))
        ));
        assert!(matches!(
            decode_body::<ImportOutcome>(false, 502, "<html>", ResponsePolicy::AcceptDomainBody),
            Decoded::Failed(AppError::Status { status: 502, .. })
        ));
    }
}
