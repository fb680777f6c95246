use thiserror::Error;

/// Errors that can occur with finding the config directory.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Unable to find the config directory for setlist.")]
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_str_eq;

    #[test]
    fn test_directory_error_display() {
        assert_str_eq!(
            DirectoryError::Config.to_string(),
            "Unable to find the config directory for setlist."
        );
    }
}
