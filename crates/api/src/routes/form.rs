//! Form Schema Route

use axum::Json;
use encoding_registry::{CategoricalAttribute, NumericAttribute};
use serde::Serialize;

/// A dropdown of the applicant form
#[derive(Debug, Serialize)]
pub struct CategoricalField {
    pub feature: &'static str,
    pub caption: &'static str,
    pub options: Vec<&'static str>,
    pub default: &'static str,
}

/// A number input of the applicant form
#[derive(Debug, Serialize)]
pub struct NumericField {
    pub feature: &'static str,
    pub caption: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

/// Everything a client needs to render the form
#[derive(Debug, Serialize)]
pub struct FormSchema {
    pub categorical: Vec<CategoricalField>,
    pub numeric: Vec<NumericField>,
}

/// Get the form schema
pub async fn get_form() -> Json<FormSchema> {
    let categorical = CategoricalAttribute::ALL
        .into_iter()
        .map(|attribute| {
            let table = attribute.table();
            CategoricalField {
                feature: attribute.feature_name(),
                caption: attribute.caption(),
                options: table.labels().collect(),
                default: table.default_label(),
            }
        })
        .collect();

    let numeric = NumericAttribute::ALL
        .into_iter()
        .map(|attribute| {
            let domain = attribute.domain();
            NumericField {
                feature: attribute.feature_name(),
                caption: attribute.caption(),
                min: domain.min,
                max: domain.max,
                default: domain.default,
                step: domain.step,
            }
        })
        .collect();

    Json(FormSchema { categorical, numeric })
}
