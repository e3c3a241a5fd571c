use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::activity::{ActivityEvent, ActivityLogger};
use crate::domain::errors::DomainError;
use crate::domain::ports::ThemeRepository;
use crate::domain::theme::{is_hex_color, NewTheme, Theme, ThemeUpdate};

const SOURCE: &str = "theme_service";

pub struct ThemeService<T> {
    repo: T,
    activity: Arc<dyn ActivityLogger>,
}

fn check_color(field: &str, value: &str) -> Result<(), DomainError> {
    if !is_hex_color(value) {
        return Err(DomainError::invalid(format!(
            "{} must be a hex color like #1a2b3c, got '{}'",
            field, value
        )));
    }
    Ok(())
}

impl<T: ThemeRepository> ThemeService<T> {
    pub fn new(repo: T, activity: Arc<dyn ActivityLogger>) -> Self {
        Self { repo, activity }
    }

    pub fn create_theme(&self, input: NewTheme) -> Result<Theme, DomainError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::invalid("theme name must not be empty"));
        }
        check_color("primary_color", &input.primary_color)?;
        check_color("secondary_color", &input.secondary_color)?;

        let now = Utc::now();
        let theme = self.repo.create(&Theme {
            id: Uuid::new_v4(),
            name,
            primary_color: input.primary_color,
            secondary_color: input.secondary_color,
            font_family: input.font_family,
            logo_url: input.logo_url,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        })?;

        self.activity
            .record(ActivityEvent::info(SOURCE, "theme.created").on("theme", theme.id));
        Ok(theme)
    }

    pub fn get_theme(&self, id: Uuid) -> Result<Theme, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Theme", id))
    }

    pub fn active_theme(&self) -> Result<Theme, DomainError> {
        self.repo
            .find_active()?
            .ok_or_else(|| DomainError::NotFound("Active theme".to_string()))
    }

    pub fn list_themes(&self) -> Result<Vec<Theme>, DomainError> {
        self.repo.list()
    }

    pub fn update_theme(&self, id: Uuid, update: ThemeUpdate) -> Result<Theme, DomainError> {
        let existing = self.get_theme(id)?;
        if let Some(color) = &update.primary_color {
            check_color("primary_color", color)?;
        }
        if let Some(color) = &update.secondary_color {
            check_color("secondary_color", color)?;
        }
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::invalid("theme name must not be empty"));
        }

        let mut merged = update.apply_to(&existing);
        merged.updated_at = Utc::now();
        let saved = self.repo.update(&merged)?;

        self.activity
            .record(ActivityEvent::info(SOURCE, "theme.updated").on("theme", id));
        Ok(saved)
    }

    pub fn delete_theme(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete(id)? {
            return Err(DomainError::not_found("Theme", id));
        }
        self.activity
            .record(ActivityEvent::info(SOURCE, "theme.deleted").on("theme", id));
        Ok(())
    }
}
