use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A text to segment or analyze.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Text<'a> {
    pub text: Cow<'a, str>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserializes_text() {
        let text: Text = serde_json::from_str(r#"{ "text": "你好！" }"#).unwrap();
        assert_eq!(text.text, "你好！");
    }
}
