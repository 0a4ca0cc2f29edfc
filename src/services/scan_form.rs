use serde::Serialize;

use crate::client::Client;
use crate::entity::scan_form::ScanForm;
use crate::error::{Error, Result};
use crate::utils::constants::PATH_SCAN_FORM;
use crate::validation::ValidationErrors;

#[derive(Debug, Serialize)]
struct ScanFormBody {
    tracking_number: String,
}

/// Trims every number and drops blanks.
pub fn normalize_tracking_numbers<I, S>(numbers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    numbers
        .into_iter()
        .map(|n| n.as_ref().trim().to_owned())
        .filter(|n| !n.is_empty())
        .collect()
}

pub struct ScanForms<'a> {
    client: &'a Client,
}

impl<'a> ScanForms<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Manifest for tracking numbers that all ship from the same address.
    pub async fn create<I, S>(&self, tracking_numbers: I) -> Result<Vec<ScanForm>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let numbers = normalize_tracking_numbers(tracking_numbers);
        if numbers.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("tracking_number", "at least one tracking number is required");
            return Err(Error::Validation(errors));
        }

        let body = ScanFormBody {
            tracking_number: numbers.join(","),
        };
        let forms: Option<Vec<ScanForm>> = self.client.call(PATH_SCAN_FORM, Some(&body)).await?;
        Ok(forms.unwrap_or_default())
    }
}
