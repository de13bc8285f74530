//! Dataset types shared by the prerender step and the view engine

use serde::{Deserialize, Serialize};

/// Site language. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Zh,
    En,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Zh => "zh",
            Lang::En => "en",
        }
    }

    /// Lenient parse used for query parameters and stored preferences.
    /// Only an exact "en" selects English.
    pub fn from_str(s: &str) -> Self {
        match s {
            "en" => Lang::En,
            _ => Lang::Zh,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Lang::Zh => Lang::En,
            Lang::En => Lang::Zh,
        }
    }

    /// Tools + experiences document, relative to the site root
    pub fn data_file(&self) -> &'static str {
        match self {
            Lang::Zh => "data.json",
            Lang::En => "data-en.json",
        }
    }

    /// Member projects document, relative to the site root
    pub fn projects_file(&self) -> &'static str {
        match self {
            Lang::Zh => "member-projects.json",
            Lang::En => "member-projects-en.json",
        }
    }
}

/// Content tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Tools,
    Experiences,
    Projects,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Tools, Tab::Experiences, Tab::Projects];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Tools => "tools",
            Tab::Experiences => "experiences",
            Tab::Projects => "projects",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "tools" => Some(Tab::Tools),
            "experiences" => Some(Tab::Experiences),
            "projects" => Some(Tab::Projects),
            _ => None,
        }
    }

    /// Projects carry no meaningful date, so the tab is never sorted
    pub fn is_sortable(&self) -> bool {
        !matches!(self, Tab::Projects)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// A recommended AI tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    /// Chinese name, present in the English dataset for member-project lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_zh: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub recommenders: Vec<String>,
    #[serde(default)]
    pub urls: Vec<String>,
}

/// A first-hand usage account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub sharers: Vec<String>,
}

/// A project built by a group member, keyed by tool name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProject {
    pub tool_name: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perk: Option<String>,
}

/// Combined tools + experiences document for one language
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
}

/// Member project with its description joined in from the matching tool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub tool_name: String,
    pub author: String,
    pub url: Option<String>,
    pub perk: Option<String>,
    pub description: String,
}
