use crate::error::{FibersheetError, FibersheetResult};

pub fn validate_file_type(file_name: &str, allowed_types: &[&str]) -> FibersheetResult<()> {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if !allowed_types.contains(&extension.to_lowercase().as_str()) {
        return Err(FibersheetError::validation(
            "file_type",
            format!(
                "File type '{}' not allowed. Allowed types: {}",
                extension,
                allowed_types.join(", ")
            ),
        ));
    }

    Ok(())
}

pub fn validate_file_size(file_size: usize, max_size: usize) -> FibersheetResult<()> {
    if file_size > max_size {
        return Err(FibersheetError::validation(
            "file_size",
            format!(
                "File size {} bytes exceeds maximum allowed size {} bytes",
                file_size, max_size
            ),
        ));
    }

    Ok(())
}
