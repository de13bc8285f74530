//! Structured data and inline dataset scripts injected into the page head

use serde::Serialize;
use serde_json::Value;

use crate::strings::Strings;
use crate::types::Tool;

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// JSON inside a `<script>` element must not contain a closing tag sequence
fn script_safe(json: String) -> String {
    json.replace("</", "<\\/")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WebSite<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
    alternate_name: &'a str,
    url: String,
    description: &'a str,
    in_language: [&'static str; 2],
}

/// WebSite block describing the site in the page's language
pub fn website_json_ld(strings: &Strings) -> serde_json::Result<String> {
    let site = WebSite {
        context: SCHEMA_CONTEXT,
        kind: "WebSite",
        name: strings.site_name,
        alternate_name: strings.json_ld_alternate_name,
        url: strings.page_url(),
        description: strings.json_ld_description,
        in_language: ["zh-CN", "en"],
    };
    let json = serde_json::to_string_pretty(&site)?;
    Ok(format!(
        "<script type=\"application/ld+json\">\n{}\n</script>",
        script_safe(json)
    ))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListItem<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    position: usize,
    name: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemList<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
    description: &'a str,
    number_of_items: usize,
    item_list_element: Vec<ListItem<'a>>,
}

/// ItemList of tools, positions starting at 1 in dataset order
pub fn item_list_json_ld(tools: &[Tool], strings: &Strings) -> serde_json::Result<String> {
    let items: Vec<ListItem> = tools
        .iter()
        .enumerate()
        .map(|(i, tool)| ListItem {
            kind: "ListItem",
            position: i + 1,
            name: &tool.name,
            description: &tool.description,
            url: tool.urls.first().map(String::as_str),
        })
        .collect();
    let list = ItemList {
        context: SCHEMA_CONTEXT,
        kind: "ItemList",
        name: strings.item_list_name,
        description: strings.item_list_description,
        number_of_items: items.len(),
        item_list_element: items,
    };
    let json = serde_json::to_string(&list)?;
    Ok(format!(
        "<script type=\"application/ld+json\">{}</script>",
        script_safe(json)
    ))
}

/// The four raw datasets, as read from disk
#[derive(Debug, Clone)]
pub struct InlineData {
    pub data_zh: Value,
    pub data_en: Value,
    pub projects_zh: Value,
    pub projects_en: Value,
}

impl InlineData {
    /// `window.__DATA_ZH__` and friends, so the page can start without fetching
    pub fn script(&self) -> serde_json::Result<String> {
        let globals = [
            ("__DATA_ZH__", &self.data_zh),
            ("__DATA_EN__", &self.data_en),
            ("__PROJECTS_ZH__", &self.projects_zh),
            ("__PROJECTS_EN__", &self.projects_en),
        ];
        let mut script = String::from("<script>\n");
        for (name, value) in globals {
            let json = script_safe(serde_json::to_string(value)?);
            script.push_str(&format!("window.{}={};\n", name, json));
        }
        script.push_str("</script>");
        Ok(script)
    }
}
