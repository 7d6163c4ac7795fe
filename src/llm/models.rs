use base64::Engine;
use serde::Serialize;

/// Inline image handed to the model: the declared MIME type and the untouched file bytes.
///
/// Serializes as the `{mime_type, data}` inline record, with `data` in base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePart {
    pub mime_type: String,
    #[serde(serialize_with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl ImagePart {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Base64 form of the bytes, as the wire format expects
    pub fn encoded_data(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// `data:` URL used to preview the upload in the page
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.encoded_data())
    }
}

/// One ordered element of an analysis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    Image(ImagePart),
}

impl ContentPart {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }
}

#[cfg(test)]
impl ContentPart {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImagePart> {
        match self {
            Self::Image(image) => Some(image),
            Self::Text(_) => None,
        }
    }
}

impl From<ImagePart> for ContentPart {
    fn from(image: ImagePart) -> Self {
        Self::Image(image)
    }
}

fn base64_bytes<S: serde::Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
}
