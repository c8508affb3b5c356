use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use dealflow_core::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>();
    messages.sort();
    messages.join(", ")
}

/// The field named by a serde "missing field" message, if any.
fn missing_field(error_msg: &str) -> Option<&str> {
    error_msg
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
}

/// JSON extractor that runs `validator` rules after decoding.
///
/// A missing field is a 400 `Missing required field: <name>`; a rule
/// violation is a 422 listing the rule messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let error_msg = rejection.body_text();

                if let Some(field) = missing_field(&error_msg) {
                    return AppError::bad_request(format!("Missing required field: {}", field));
                }

                if error_msg.contains("invalid type") {
                    return AppError::bad_request("Invalid field type in request");
                }

                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::bad_request(
                        "Missing 'Content-Type: application/json' header",
                    );
                }

                AppError::bad_request("Invalid request body")
            })?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(format_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}
