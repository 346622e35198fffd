use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures raised by a recognizer implementation while a request is being
/// handed over or its answer decoded.
#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("recognizer threw: {0}")]
    Js(String),

    #[error("could not serialize strokes: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("malformed match payload: {0}")]
    Decode(String),
}

impl From<JsValue> for RecognizerError {
    fn from(value: JsValue) -> Self {
        RecognizerError::Js(describe_js(&value))
    }
}

/// Outcome of a recognition request that produced no match list.
#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("recognition data is still loading")]
    NotReady,

    #[error("nothing has been drawn yet")]
    EmptyStrokes,

    #[error("a recognition request is already in flight")]
    Busy,

    #[error("recognizer did not answer within {0} ms")]
    Timeout(u32),

    #[error("recognizer dropped the request without answering")]
    Dropped,

    #[error(transparent)]
    Recognizer(#[from] RecognizerError),
}

impl RecognitionError {
    /// Guard rejections are prevented at the call site by disabled controls
    /// and are never shown to the user.
    pub fn is_input_guard(&self) -> bool {
        matches!(
            self,
            RecognitionError::NotReady | RecognitionError::EmptyStrokes | RecognitionError::Busy
        )
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Setup failures of the browser views.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("no window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    #[error("no element with id '{0}'")]
    MissingElement(String),

    #[error("canvas has no 2d context")]
    NoContext,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for ShellError {
    fn from(value: JsValue) -> Self {
        ShellError::Js(describe_js(&value))
    }
}

impl From<ShellError> for JsValue {
    fn from(err: ShellError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_classification() {
        assert!(RecognitionError::NotReady.is_input_guard());
        assert!(RecognitionError::EmptyStrokes.is_input_guard());
        assert!(RecognitionError::Busy.is_input_guard());
        assert!(!RecognitionError::Timeout(10).is_input_guard());
        assert!(!RecognitionError::Dropped.is_input_guard());
        assert!(!RecognitionError::Recognizer(RecognizerError::Decode("[]".into())).is_input_guard());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            RecognitionError::Timeout(250).to_string(),
            "recognizer did not answer within 250 ms"
        );
        assert_eq!(
            ShellError::MissingElement("pad".into()).to_string(),
            "no element with id 'pad'"
        );
    }
}
