use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl CustomerDetails {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), phone: phone.into(), address: address.into() }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::MissingCustomerFields(missing.join(", ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CustomerDetails;
    use crate::errors::DomainError;

    #[test]
    fn blank_name_and_phone_are_reported_together() {
        let error = CustomerDetails::new("  ", "", "12 Market Road")
            .validate()
            .expect_err("blank fields should fail");

        assert_eq!(error, DomainError::MissingCustomerFields("name, phone".to_string()));
    }

    #[test]
    fn address_is_optional() {
        assert!(CustomerDetails::new("Asha", "98450 00000", "").validate().is_ok());
    }
}
