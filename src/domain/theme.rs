use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub id: Uuid,
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTheme {
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ThemeUpdate {
    pub name: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: Option<bool>,
}

impl ThemeUpdate {
    pub fn apply_to(&self, existing: &Theme) -> Theme {
        let mut merged = existing.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(color) = &self.primary_color {
            merged.primary_color = color.clone();
        }
        if let Some(color) = &self.secondary_color {
            merged.secondary_color = color.clone();
        }
        if let Some(font) = &self.font_family {
            merged.font_family = Some(font.clone());
        }
        if let Some(logo) = &self.logo_url {
            merged.logo_url = Some(logo.clone());
        }
        if let Some(is_active) = self.is_active {
            merged.is_active = is_active;
        }
        merged
    }
}

/// `#rgb` or `#rrggbb`.
pub fn is_hex_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}
