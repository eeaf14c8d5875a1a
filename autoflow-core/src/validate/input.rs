use crate::error::ValidationError;
use crate::validate::validator::{FILE_NAME_RE, SECRET_NAME_RE};

pub const MAX_FILE_NAME_BYTES: usize = 255;
pub const MAX_SECRET_NAME_BYTES: usize = 128;
pub const MAX_API_KEY_BYTES: usize = 512;
/// Upper bound for uploaded source text.
pub const MAX_CODE_BYTES: usize = 1024 * 1024;

pub fn validate_file_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::single("fileName", "must not be empty"));
    }
    if name.len() > MAX_FILE_NAME_BYTES {
        return Err(ValidationError::single(
            "fileName",
            format!("must be at most {MAX_FILE_NAME_BYTES} bytes"),
        ));
    }
    if name.contains("..") {
        return Err(ValidationError::single("fileName", "must not contain '..'"));
    }
    if !FILE_NAME_RE.is_match(name) {
        return Err(ValidationError::single(
            "fileName",
            "may only contain letters, digits, '.', '_' and '-' and must start with a letter or digit",
        ));
    }
    Ok(())
}

pub fn validate_secret_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::single("name", "must not be empty"));
    }
    if name.len() > MAX_SECRET_NAME_BYTES {
        return Err(ValidationError::single(
            "name",
            format!("must be at most {MAX_SECRET_NAME_BYTES} bytes"),
        ));
    }
    if !SECRET_NAME_RE.is_match(name) {
        return Err(ValidationError::single(
            "name",
            "must match ^[A-Z][A-Z0-9_]*$ (e.g. DATABASE_URL)",
        ));
    }
    Ok(())
}

pub fn validate_content_size(content: &str) -> Result<(), ValidationError> {
    if content.len() > MAX_CODE_BYTES {
        return Err(ValidationError::single(
            "content",
            format!("is {} bytes; limit is {MAX_CODE_BYTES}", content.len()),
        ));
    }
    Ok(())
}

/// Checks the shape of an API credential; it does not check that the key is valid server-side.
pub fn validate_api_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::single("apiKey", "is required"));
    }
    if key.len() > MAX_API_KEY_BYTES {
        return Err(ValidationError::single(
            "apiKey",
            format!("must be at most {MAX_API_KEY_BYTES} bytes"),
        ));
    }
    if !key.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(ValidationError::single(
            "apiKey",
            "must contain only visible ASCII characters",
        ));
    }
    Ok(())
}

/// Identifier interpolated into a URL path.
pub fn validate_path_segment(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::single(field, "must not be empty"));
    }
    if value.contains('/') {
        return Err(ValidationError::single(field, "must not contain '/'"));
    }
    // URL parsing collapses dot segments onto the parent path.
    if value == "." || value == ".." {
        return Err(ValidationError::single(field, "must not be '.' or '..'"));
    }
    Ok(())
}
