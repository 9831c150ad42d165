//! Pre-flight checks applied to every file before it is staged.

use crate::domain::entities::MediaType;
use crate::domain::errors::UploadError;

/// Largest accepted payload: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Checks a declared media type and byte size.
///
/// The format is checked first, so a disallowed type is reported as
/// `invalid-format` even when it is also too large.
///
/// # Errors
/// Returns [`UploadError::InvalidFormat`] or [`UploadError::TooLarge`].
pub fn validate(declared_type: &str, size: u64) -> Result<MediaType, UploadError> {
    let media_type = MediaType::from_mime(declared_type)
        .ok_or_else(|| UploadError::invalid_format(declared_type))?;

    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    Ok(media_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const MIB: u64 = 1024 * 1024;

    #[test_case("image/jpeg", 2 * MIB, MediaType::Jpeg ; "jpeg")]
    #[test_case("image/png", 2 * MIB, MediaType::Png ; "png")]
    #[test_case("image/webp", 0, MediaType::Webp ; "empty webp")]
    #[test_case("image/png", MAX_UPLOAD_BYTES, MediaType::Png ; "exactly at limit")]
    fn test_accepts(declared: &str, size: u64, expected: MediaType) {
        assert_eq!(validate(declared, size).unwrap(), expected);
    }

    #[test_case("image/gif" ; "gif")]
    #[test_case("image/svg+xml" ; "svg")]
    #[test_case("application/octet-stream" ; "unknown")]
    #[test_case("" ; "empty")]
    fn test_rejects_format(declared: &str) {
        let err = validate(declared, 1024).unwrap_err();
        assert_eq!(err.category(), "invalid-format");
    }

    #[test_case("image/jpeg" ; "jpeg")]
    #[test_case("image/png" ; "png")]
    #[test_case("image/webp" ; "webp")]
    fn test_rejects_oversize_for_every_format(declared: &str) {
        let err = validate(declared, 15 * MIB).unwrap_err();
        assert_eq!(
            err,
            UploadError::TooLarge {
                size: 15 * MIB,
                limit: MAX_UPLOAD_BYTES
            }
        );
    }

    #[test]
    fn test_one_byte_over_limit() {
        assert!(validate("image/png", MAX_UPLOAD_BYTES + 1).is_err());
    }

    #[test]
    fn test_format_checked_before_size() {
        let err = validate("image/gif", 15 * MIB).unwrap_err();
        assert_eq!(err.category(), "invalid-format");
    }
}
