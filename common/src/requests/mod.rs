use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::not_blank;

/// Body of every error response, and of plain acknowledgements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
    /// Which resolution step failed, on resolver 404s.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Links a form document into a year entry.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LinkFormRequest {
    #[validate(custom(function = "not_blank"))]
    pub form_id: String,
}

/// Opens a new training year and makes it current.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewYearRequest {
    #[validate(custom(function = "not_blank"))]
    pub year_label: String,
    #[serde(default)]
    pub academic_year: String,
}

/// `?year=` on the form resolution endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct YearQuery {
    pub year: Option<String>,
}

/// `?trainer=` on list endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrainerFilter {
    pub trainer: Option<String>,
}

/// `?link=true` on form creation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateFormQuery {
    #[serde(default)]
    pub link: bool,
}
