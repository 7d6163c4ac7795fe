use crate::error::ChemistError;
use crate::image::{ensure_accepted, input_image_setup, UploadedFile};
use crate::web::AppState;
use tracing::{error, warn};

pub const NO_IMAGE_MESSAGE: &str = "Please upload an image of the tablets.";

/// Inputs collected by the form
#[derive(Debug, Clone, Default)]
pub struct SubmitForm {
    pub upload: Option<UploadedFile>,
    pub user_input: String,
}

/// What the page shows after a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Analysis(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// `data:` URL of the uploaded image, when one was accepted
    pub preview: Option<String>,
    pub outcome: SubmitOutcome,
}

impl Submission {
    fn rejected(message: impl Into<String>) -> Self {
        Self {
            preview: None,
            outcome: SubmitOutcome::Error(message.into()),
        }
    }
}

/// Handle one submit action.
///
/// The image is checked before the API key, and no model call is made unless both are
/// present. Any failure from the model is turned into a displayed error.
pub async fn submit(state: &AppState, form: SubmitForm) -> Submission {
    let upload = match form.upload {
        Some(upload) if !upload.is_empty() => upload,
        _ => {
            warn!("Submit rejected: no image uploaded");
            return Submission::rejected(NO_IMAGE_MESSAGE);
        }
    };

    if let Err(e) = ensure_accepted(&upload) {
        warn!("Submit rejected: {}", e);
        return Submission::rejected(e.to_string());
    }

    let image = match input_image_setup(Some(upload)) {
        Ok(image) => image,
        Err(e) => return Submission::rejected(format!("An error occurred: {}", e)),
    };
    let preview = Some(image[0].to_data_url());

    let Some(broker) = state.broker.as_ref() else {
        warn!("Submit rejected: API key not configured");
        return Submission {
            preview,
            outcome: SubmitOutcome::Error(ChemistError::MissingApiKey.to_string()),
        };
    };

    let outcome = match broker.analyze(&image, &form.user_input).await {
        Ok(text) => SubmitOutcome::Analysis(text),
        Err(e) => {
            error!("Analysis failed: {}", e);
            SubmitOutcome::Error(format!("An error occurred: {}", e))
        }
    };

    Submission { preview, outcome }
}
