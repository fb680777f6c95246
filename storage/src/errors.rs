use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Item not found.")]
    NotFound,
    #[error("Invalid id: {0}")]
    InvalidId(#[from] ulid::DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_str_eq;
    use rstest::rstest;

    #[test]
    fn test_not_found_display() {
        assert_str_eq!(Error::NotFound.to_string(), "Item not found.");
    }

    #[rstest]
    #[case(ulid::DecodeError::InvalidLength)]
    #[case(ulid::DecodeError::InvalidChar)]
    fn test_invalid_id_display(#[case] cause: ulid::DecodeError) {
        let expected = format!("Invalid id: {cause}");
        assert_str_eq!(Error::from(cause).to_string(), expected);
    }
}
