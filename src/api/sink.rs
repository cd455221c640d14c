//! Response sink: where status, headers, and body bytes go.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use http_body_util::Full;

use super::error::{Error, Result};

/// Buffered response sink.
///
/// Collects the status head, header map, and body bytes for one response.
/// The head is write-once: a second `write_head` is rejected, which is how
/// double-respond bugs in handlers surface. After the handler returns, the
/// dispatcher drains the buffer onto the wire with [`BufferedSink::into_http`].
#[derive(Debug, Default)]
pub struct BufferedSink {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl BufferedSink {
    /// Create an empty sink.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response header. Later values replace earlier ones.
    #[inline]
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Write the status head. Fails if a head was already written.
    pub fn write_head(&mut self, status: StatusCode) -> Result<()> {
        if self.status.is_some() {
            return Err(Error::HeadAlreadyWritten);
        }
        self.status = Some(status);
        Ok(())
    }

    /// Append body bytes. The head must have been written first.
    pub fn write_body(&mut self, bytes: &[u8]) -> Result<()> {
        if self.status.is_none() {
            return Err(Error::HeadNotWritten);
        }
        self.body.extend_from_slice(bytes);
        Ok(())
    }

    /// Whether a status head has been written.
    #[inline]
    pub fn head_written(&self) -> bool {
        self.status.is_some()
    }

    /// Get the status, if written.
    #[inline]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Get the headers set so far.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a header value by name.
    #[inline]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the buffered body bytes.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Convert the buffer into an `http` response.
    ///
    /// Returns `None` when no head was ever written (the handler never
    /// responded); the dispatcher maps that to a bare 500.
    pub fn into_http(self) -> Option<http::Response<Full<Bytes>>> {
        let status = self.status?;

        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = status;
        *res.headers_mut() = self.headers;
        Some(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_head_once() {
        let mut sink = BufferedSink::new();
        assert!(!sink.head_written());

        sink.write_head(StatusCode::OK).unwrap();
        assert!(sink.head_written());
        assert_eq!(sink.status(), Some(StatusCode::OK));

        let err = sink.write_head(StatusCode::NOT_FOUND).unwrap_err();
        assert!(matches!(err, Error::HeadAlreadyWritten));
        // First head wins.
        assert_eq!(sink.status(), Some(StatusCode::OK));
    }

    #[test]
    fn test_body_requires_head() {
        let mut sink = BufferedSink::new();
        let err = sink.write_body(b"early").unwrap_err();
        assert!(matches!(err, Error::HeadNotWritten));
        assert!(sink.body().is_empty());

        sink.write_head(StatusCode::OK).unwrap();
        sink.write_body(b"hello ").unwrap();
        sink.write_body(b"world").unwrap();
        assert_eq!(sink.body(), b"hello world");
    }

    #[test]
    fn test_headers() {
        let mut sink = BufferedSink::new();
        sink.set_header(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        assert_eq!(sink.header("content-type"), Some("application/json"));
        assert_eq!(sink.header("Content-Type"), Some("application/json"));
        assert_eq!(sink.header("x-missing"), None);
    }

    #[test]
    fn test_into_http() {
        let mut sink = BufferedSink::new();
        sink.write_head(StatusCode::CREATED).unwrap();
        sink.set_header(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        sink.write_body(b"{}\n").unwrap();

        let res = sink.into_http().unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers().get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn test_into_http_without_head() {
        let sink = BufferedSink::new();
        assert!(sink.into_http().is_none());
    }
}
