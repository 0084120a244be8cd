use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum EffectError {
    #[error("No window available")]
    NoWindow,
    #[error("No document available")]
    NoDocument,
    #[error("Missing element: {0}")]
    MissingElement(&'static str),
    #[error("Expected more than one element for {selector}, found {found}")]
    TooFewElements { selector: &'static str, found: usize },
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for EffectError {
    fn from(value: JsValue) -> Self {
        EffectError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type EffectResult<T> = Result<T, EffectError>;

/// Turns a failed mount into an absent component.
pub fn optional<T>(name: &str, result: EffectResult<T>) -> Option<T> {
    match result {
        Ok(component) => {
            log::debug!("{} mounted", name);
            Some(component)
        }
        Err(e) => {
            log::debug!("{} disabled: {}", name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_keeps_mounted_components() {
        let mounted: EffectResult<u8> = Ok(7);
        assert_eq!(optional("thing", mounted), Some(7));
    }

    #[test]
    fn optional_drops_failed_mounts() {
        let failed: EffectResult<u8> = Err(EffectError::MissingElement(".hero-section"));
        assert_eq!(optional("thing", failed), None);
    }

    #[test]
    fn error_messages_name_the_selector() {
        let err = EffectError::TooFewElements { selector: ".testimonial-card", found: 1 };
        assert_eq!(
            err.to_string(),
            "Expected more than one element for .testimonial-card, found 1"
        );
    }
}
