//! What the user has typed so far.

use crate::registration::pricing::{compute_price, NameError, PriceTier};

/// The two input fields of the mint form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub name: String,
    pub record: String,
}

impl RegistrationRequest {
    pub fn new(name: impl Into<String>, record: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record: record.into(),
        }
    }

    /// Price for the current name, if it is long enough to register.
    pub fn computed_price(&self) -> Result<PriceTier, NameError> {
        compute_price(&self.name)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.record.is_empty()
    }

    /// Reset both fields after a completed registration.
    pub fn clear(&mut self) {
        self.name.clear();
        self.record.clear();
    }
}
