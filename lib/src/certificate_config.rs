use serde::{Deserialize, Serialize};

/// Name placement parameters, forwarded verbatim to the webhook payload.
/// `pos_x`/`pos_y` are percentages of the template width/height.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateConfig {
    pub pos_x: f64,
    pub pos_y: f64,
    pub font_size: f64,
    pub font_color: String,
    pub font_family: String,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            pos_x: 50.0,
            pos_y: 50.0,
            font_size: 36.0,
            font_color: "#000000".to_string(),
            font_family: "Arial".to_string(),
        }
    }
}
