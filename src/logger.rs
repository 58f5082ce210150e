use crate::{ApiRequest, ApiResponse};

/// Request/response snapshot attached to a logged failure.
///
/// The request is rendered with credential query values masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    pub request: String,
    pub response: Option<String>,
}

impl LogContext {
    pub fn new(request: &ApiRequest, response: Option<&ApiResponse>) -> Self {
        Self {
            request: request.to_string(),
            response: response.map(ToString::to_string),
        }
    }
}

/// Sink for adapter failures. Called once per failed operation, before the
/// error is returned. Implementations must not panic.
pub trait ErrorLogger: Send + Sync {
    fn log_error(&self, message: &str, context: &LogContext);
}

/// Forwards failures to `tracing` at `ERROR` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ErrorLogger for TracingLogger {
    fn log_error(&self, message: &str, context: &LogContext) {
        tracing::error!(
            request = %context.request,
            response = context.response.as_deref().unwrap_or("-"),
            "{message}"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use url::Url;

    use super::*;

    #[derive(Clone)]
    struct BufferingMakeWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    struct BufferWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for BufferingMakeWriter {
        type Writer = BufferWriter;

        fn make_writer(&'a self) -> Self::Writer {
            BufferWriter {
                buffer: Arc::clone(&self.buffer),
            }
        }
    }

    impl Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn tracing_logger_emits_masked_context() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::ERROR)
            .with_writer(BufferingMakeWriter {
                buffer: Arc::clone(&buffer),
            })
            .with_ansi(false)
            .without_time()
            .finish();

        let mut url = Url::parse("https://graph.facebook.com/oauth/access_token").unwrap();
        url.query_pairs_mut()
            .append_pair("client_id", "1234")
            .append_pair("client_secret", "secret");
        let context = LogContext::new(
            &ApiRequest::get(url),
            Some(&ApiResponse::ok(r#"{"xyz":"abcd"}"#)),
        );

        tracing::subscriber::with_default(subscriber, || {
            TracingLogger.log_error("missing access token", &context);
        });

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("ERROR"));
        assert!(output.contains("missing access token"));
        assert!(output.contains("client_id=1234"));
        assert!(!output.contains("client_secret=secret"));
    }

    #[test]
    fn context_without_response() {
        let request = ApiRequest::get(Url::parse("https://graph.facebook.com/me").unwrap());
        let context = LogContext::new(&request, None);
        assert_eq!(context.request, "GET https://graph.facebook.com/me");
        assert_eq!(context.response, None);
    }
}
