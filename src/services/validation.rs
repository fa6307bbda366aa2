use crate::errors::ValidationError;

/// Parsing and sanitising of raw form input
pub struct ValidationService;

impl ValidationService {
    /// Trim a submitted name and require it to be non-empty.
    pub fn validate_name(raw: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
        let trimmed = raw.unwrap_or_default().trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Required(field));
        }

        Ok(trimmed.to_string())
    }

    /// Parse a submitted price. A missing or empty price means 0.0.
    pub fn parse_price(raw: Option<&str>) -> Result<f64, ValidationError> {
        match raw {
            None | Some("") => Ok(0.0),
            Some(value) => value
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::MalformedPrice(value.to_string())),
        }
    }

    pub fn parse_category_id(raw: Option<&str>) -> Result<i32, ValidationError> {
        let value = raw.unwrap_or_default();
        value
            .trim()
            .parse::<i32>()
            .map_err(|_| ValidationError::MalformedCategoryId(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(
            ValidationService::validate_name(Some("  Red Dress "), "Product name").unwrap(),
            "Red Dress"
        );
    }

    #[test]
    fn test_validate_name_rejects_blank() {
        assert_eq!(
            ValidationService::validate_name(Some("   "), "Category name"),
            Err(ValidationError::Required("Category name"))
        );
        assert_eq!(
            ValidationService::validate_name(None, "Attribute name"),
            Err(ValidationError::Required("Attribute name"))
        );
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(ValidationService::parse_price(None).unwrap(), 0.0);
        assert_eq!(ValidationService::parse_price(Some("")).unwrap(), 0.0);
        assert_eq!(ValidationService::parse_price(Some("49.99")).unwrap(), 49.99);
        assert!(matches!(
            ValidationService::parse_price(Some("cheap")),
            Err(ValidationError::MalformedPrice(_))
        ));
    }

    #[test]
    fn test_parse_category_id() {
        assert_eq!(ValidationService::parse_category_id(Some(" 3 ")).unwrap(), 3);
        assert!(matches!(
            ValidationService::parse_category_id(Some("shoes")),
            Err(ValidationError::MalformedCategoryId(_))
        ));
        assert!(ValidationService::parse_category_id(None).is_err());
    }
}
