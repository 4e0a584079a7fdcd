use ulid::Ulid;

/// Generates an opaque correlation id for request tracing.
pub fn generate_request_id() -> String {
    Ulid::new().to_string()
}

/// Trims surrounding whitespace and percent-encodes the value for safe
/// embedding in a URL path segment or query component.
pub fn sanitize_parameter(value: &str) -> String {
    urlencoding::encode(value.trim()).into_owned()
}
