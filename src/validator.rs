use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use tracing::debug;
use validator::ValidationErrors;

pub fn format_errors(errors: &ValidationErrors) -> String {
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

/// JSON body that is `None` when the body is absent or unreadable.
///
/// Handlers decide how a missing payload is reported, so this extractor
/// never rejects a request.
#[derive(Debug, Clone, Default)]
pub struct Payload<T>(pub Option<T>);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(Some(value))),
            Err(rejection) => {
                debug!(reason = %rejection.body_text(), "Request body treated as absent");
                Ok(Payload(None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polis_models::UpsertStudentDto;
    use validator::Validate;

    #[test]
    fn test_format_errors_names_fields() {
        let dto = UpsertStudentDto {
            first_name: String::new(),
            last_name: String::new(),
            email: Some("nope".into()),
            ..Default::default()
        };
        let message = format_errors(&dto.validate().unwrap_err());
        assert_eq!(
            message,
            "email is invalid, first_name is invalid, last_name is invalid"
        );
    }
}
