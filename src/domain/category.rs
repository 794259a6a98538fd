//! Categories group channels, like folders in the sidebar.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Color given to categories created without one
pub const DEFAULT_CATEGORY_COLOR: &str = "#8b5cf6";

/// A top-level grouping of channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable identifier, referenced by `Channel::category_id`
    pub id: String,

    /// Display name
    pub name: String,

    /// Icon tag resolved by whatever renders the sidebar
    pub icon: CategoryIcon,

    /// Display color (CSS hex)
    pub color: String,

    /// Whether the sidebar shows this category's channels
    pub is_expanded: bool,
}

impl Category {
    /// Create a category with the default icon and color.
    ///
    /// The id is `slug(name)` followed by a random 128-bit suffix, so two
    /// categories with the same name never collide.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = format!("{}-{}", slugify(&name), Uuid::new_v4().simple());

        Self {
            id,
            name,
            icon: CategoryIcon::Folder,
            color: DEFAULT_CATEGORY_COLOR.to_string(),
            is_expanded: true,
        }
    }

    /// Merge a partial update into this category
    pub fn apply(&mut self, update: CategoryUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(icon) = update.icon {
            self.icon = icon;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(is_expanded) = update.is_expanded {
            self.is_expanded = is_expanded;
        }
    }
}

/// Partial update for a category. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub icon: Option<CategoryIcon>,
    pub color: Option<String>,
    pub is_expanded: Option<bool>,
}

impl CategoryUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn icon(mut self, icon: CategoryIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn expanded(mut self, is_expanded: bool) -> Self {
        self.is_expanded = Some(is_expanded);
        self
    }
}

/// Icons a category can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryIcon {
    Server,
    TrendingUp,
    Palette,
    User,
    /// Also used for any tag this build does not know about
    #[serde(other)]
    Folder,
}

impl std::fmt::Display for CategoryIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryIcon::Server => write!(f, "Server"),
            CategoryIcon::TrendingUp => write!(f, "TrendingUp"),
            CategoryIcon::Palette => write!(f, "Palette"),
            CategoryIcon::User => write!(f, "User"),
            CategoryIcon::Folder => write!(f, "Folder"),
        }
    }
}

impl std::str::FromStr for CategoryIcon {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "server" => Ok(CategoryIcon::Server),
            "trendingup" => Ok(CategoryIcon::TrendingUp),
            "palette" => Ok(CategoryIcon::Palette),
            "user" => Ok(CategoryIcon::User),
            "folder" => Ok(CategoryIcon::Folder),
            _ => anyhow::bail!("Unknown category icon: {}", s),
        }
    }
}

/// Lowercase the name and collapse each whitespace run into a single `-`
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("DevOps"), "devops");
        assert_eq!(slugify("YouTube  Growth"), "youtube-growth");
        assert_eq!(slugify("  UX/UI "), "ux/ui");
    }

    #[test]
    fn test_new_category_defaults() {
        let category = Category::new("Machine Learning");

        assert!(category.id.starts_with("machine-learning-"));
        assert_eq!(category.name, "Machine Learning");
        assert_eq!(category.icon, CategoryIcon::Folder);
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);
        assert!(category.is_expanded);
    }

    #[test]
    fn test_same_name_gets_distinct_ids() {
        let a = Category::new("Music");
        let b = Category::new("Music");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_apply_partial_update() {
        let mut category = Category::new("Old");
        let id = category.id.clone();

        category.apply(CategoryUpdate::default().name("New").color("#000000"));

        assert_eq!(category.id, id);
        assert_eq!(category.name, "New");
        assert_eq!(category.color, "#000000");
        assert_eq!(category.icon, CategoryIcon::Folder);
        assert!(category.is_expanded);
    }

    #[test]
    fn test_unknown_icon_falls_back_to_folder() {
        let icon: CategoryIcon = serde_json::from_str("\"Rocket\"").unwrap();
        assert_eq!(icon, CategoryIcon::Folder);

        let icon: CategoryIcon = serde_json::from_str("\"TrendingUp\"").unwrap();
        assert_eq!(icon, CategoryIcon::TrendingUp);
    }

    #[test]
    fn test_icon_from_str() {
        assert_eq!("trending-up".parse::<CategoryIcon>().unwrap(), CategoryIcon::TrendingUp);
        assert_eq!("Server".parse::<CategoryIcon>().unwrap(), CategoryIcon::Server);
        assert!("rocket".parse::<CategoryIcon>().is_err());
    }
}
