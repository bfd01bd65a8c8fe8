use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    pub gemini_color: String,
    pub chatgpt_color: String,
    pub question_color: String,
    pub start_color: String,
    pub text_light: String,
    pub text_muted: String,
    pub line_color: String,
}

impl Theme {
    /// Dark slate palette the decision tree is drawn with.
    pub fn dark() -> Self {
        Self {
            font_family: "DejaVu Sans, Inter, Segoe UI, system-ui, sans-serif".to_string(),
            background: "#0f172a".to_string(),
            gemini_color: "#10b981".to_string(),
            chatgpt_color: "#3b82f6".to_string(),
            question_color: "#1e293b".to_string(),
            start_color: "#334155".to_string(),
            text_light: "#f1f5f9".to_string(),
            text_muted: "#94a3b8".to_string(),
            line_color: "#334155".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
