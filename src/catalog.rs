//! Loaded datasets with their lookup indices, plus the filter/sort rules shared by
//! the prerender step and the view engine.

use chrono::Month;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::types::{Dataset, Experience, Lang, MemberProject, Project, SortOrder, Tool};

/// One language's datasets, fully indexed.
///
/// Built in one step so a render never observes a dataset without its indices.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub lang: Lang,
    pub tools: Vec<Tool>,
    pub experiences: Vec<Experience>,
    pub projects: Vec<Project>,
    member_projects: HashMap<String, MemberProject>,
}

impl Catalog {
    pub fn build(lang: Lang, dataset: Dataset, members: Vec<MemberProject>) -> Self {
        let projects = join_projects(&dataset.tools, &members);

        // Later entries win for duplicate tool names
        let member_projects = members
            .into_iter()
            .map(|p| (p.tool_name.clone(), p))
            .collect();

        Self {
            lang,
            tools: dataset.tools,
            experiences: dataset.experiences,
            projects,
            member_projects,
        }
    }

    /// Member project for a tool, matched by its Chinese name when it has one
    pub fn member_project_for(&self, tool: &Tool) -> Option<&MemberProject> {
        let key = tool.name_zh.as_deref().unwrap_or(&tool.name);
        self.member_projects.get(key)
    }

    pub fn member_project_count(&self) -> usize {
        self.projects.len()
    }
}

/// Attach each project's tool description, matching `toolName` against a tool's
/// `name` or `nameZh`. Unmatched projects get an empty description.
pub fn join_projects(tools: &[Tool], members: &[MemberProject]) -> Vec<Project> {
    let mut by_name: HashMap<&str, &Tool> = HashMap::new();
    for tool in tools {
        by_name.insert(&tool.name, tool);
        if let Some(name_zh) = &tool.name_zh {
            by_name.insert(name_zh, tool);
        }
    }

    members
        .iter()
        .map(|p| Project {
            tool_name: p.tool_name.clone(),
            author: p.author.clone(),
            url: p.url.clone(),
            perk: p.perk.clone(),
            description: by_name
                .get(p.tool_name.as_str())
                .map(|t| t.description.clone())
                .unwrap_or_default(),
        })
        .collect()
}

fn zh_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([0-9]+)月([0-9]+)日").expect("valid regex"))
}

fn en_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Z][a-z]{2})\s+([0-9]+)").expect("valid regex"))
}

fn month_day_key(month: Option<u32>, day: &str) -> u32 {
    month
        .zip(day.parse::<u32>().ok())
        .and_then(|(m, d)| m.checked_mul(100)?.checked_add(d))
        .unwrap_or(0)
}

/// Sort key for "1月13日" or "Jan 13" style dates: `month * 100 + day`.
///
/// Year-unaware. Anything that matches neither format (including "") is 0 and sorts
/// as the earliest date. An unknown English month abbreviation counts as month 0.
pub fn date_key(date: &str) -> u32 {
    if date.is_empty() {
        return 0;
    }
    if let Some(caps) = zh_date_re().captures(date) {
        return month_day_key(caps[1].parse::<u32>().ok(), &caps[2]);
    }
    if let Some(caps) = en_date_re().captures(date) {
        let month = caps[1]
            .parse::<Month>()
            .map(|m| m.number_from_month())
            .unwrap_or(0);
        return month_day_key(Some(month), &caps[2]);
    }
    0
}

/// Anything with a display date
pub trait Dated {
    fn date(&self) -> &str;
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date(&self) -> &str {
        (**self).date()
    }
}

impl Dated for Tool {
    fn date(&self) -> &str {
        &self.date
    }
}

impl Dated for Experience {
    fn date(&self) -> &str {
        &self.date
    }
}

/// Stable sort by date key. Items with equal keys keep their relative order in both
/// directions.
pub fn sort_by_date<T: Dated>(items: &mut [T], order: SortOrder) {
    match order {
        SortOrder::Desc => items.sort_by(|a, b| date_key(b.date()).cmp(&date_key(a.date()))),
        SortOrder::Asc => items.sort_by_key(|item| date_key(item.date())),
    }
}

/// Search and person filter over one tab's items
pub trait Searchable {
    /// `query` is already trimmed and lowercased
    fn matches_text(&self, query: &str) -> bool;
    fn has_person(&self, person: &str) -> bool;
}

fn contains_lower(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(query)
}

impl Searchable for Tool {
    fn matches_text(&self, query: &str) -> bool {
        contains_lower(&self.name, query)
            || contains_lower(&self.description, query)
            || contains_lower(&self.recommenders.join(" "), query)
    }

    fn has_person(&self, person: &str) -> bool {
        self.recommenders.iter().any(|r| r == person)
    }
}

impl Searchable for Experience {
    fn matches_text(&self, query: &str) -> bool {
        contains_lower(&self.name, query)
            || contains_lower(&self.content, query)
            || contains_lower(&self.sharers.join(" "), query)
    }

    fn has_person(&self, person: &str) -> bool {
        self.sharers.iter().any(|s| s == person)
    }
}

impl Searchable for Project {
    fn matches_text(&self, query: &str) -> bool {
        contains_lower(&self.tool_name, query)
            || contains_lower(&self.description, query)
            || contains_lower(&self.author, query)
            || self.perk.as_deref().is_some_and(|p| contains_lower(p, query))
    }

    fn has_person(&self, person: &str) -> bool {
        self.author == person
    }
}

/// Active search text and person selection
#[derive(Debug, Clone, Default)]
pub struct Filter<'a> {
    query: String,
    person: Option<&'a str>,
}

impl<'a> Filter<'a> {
    pub fn new(query: &str, person: Option<&'a str>) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            person,
        }
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        if let Some(person) = self.person {
            if !item.has_person(person) {
                return false;
            }
        }
        self.query.is_empty() || item.matches_text(&self.query)
    }

    /// Person filter first, then text; input order is preserved
    pub fn apply<'i, T: Searchable>(&self, items: &'i [T]) -> Vec<&'i T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

/// Counts used in the page description
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteStats {
    pub tools: usize,
    pub experiences: usize,
    /// Distinct recommenders and sharers
    pub people: usize,
}

impl SiteStats {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut people: HashSet<&str> = HashSet::new();
        for tool in &dataset.tools {
            people.extend(tool.recommenders.iter().map(String::as_str));
        }
        for exp in &dataset.experiences {
            people.extend(exp.sharers.iter().map(String::as_str));
        }
        Self {
            tools: dataset.tools.len(),
            experiences: dataset.experiences.len(),
            people: people.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(name: &str, date: &str) -> Tool {
        Tool {
            name: name.to_string(),
            date: date.to_string(),
            ..Default::default()
        }
    }

    fn names(tools: &[Tool]) -> Vec<&str> {
        tools.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_date_key_formats() {
        assert_eq!(date_key("1月13日"), 113);
        assert_eq!(date_key("12月5日"), 1205);
        assert_eq!(date_key("1月16日-1月21日"), 116);
        assert_eq!(date_key("Jan 13"), 113);
        assert_eq!(date_key("Dec 31"), 1231);
        assert_eq!(date_key("Sep  2"), 902);
        assert_eq!(date_key("Foo 3"), 3);
        assert_eq!(date_key(""), 0);
        assert_eq!(date_key("yesterday"), 0);
        assert_eq!(date_key("jan 13"), 0);
        assert_eq!(date_key("99999999999月1日"), 0);
    }

    #[test]
    fn test_date_key_ascii_digits_only() {
        // Full-width and other Unicode digits are not date digits
        assert_eq!(date_key("１月1日，2月3日"), 203);
        assert_eq!(date_key("١月٢日"), 0);
        assert_eq!(date_key("Mar ３"), 0);
    }

    #[test]
    fn test_sort_desc_then_asc() {
        let mut tools = vec![tool("A", "3月1日"), tool("B", "1月20日")];
        sort_by_date(&mut tools, SortOrder::Desc);
        assert_eq!(names(&tools), ["A", "B"]);
        sort_by_date(&mut tools, SortOrder::Asc);
        assert_eq!(names(&tools), ["B", "A"]);
    }

    #[test]
    fn test_sort_orders_are_reverses() {
        let original = vec![
            tool("a", "2月3日"),
            tool("b", "Jan 9"),
            tool("c", "11月1日"),
            tool("d", ""),
            tool("e", "Mar 30"),
        ];
        let mut asc = original.clone();
        sort_by_date(&mut asc, SortOrder::Asc);
        let mut desc = original;
        sort_by_date(&mut desc, SortOrder::Desc);
        desc.reverse();
        assert_eq!(names(&asc), names(&desc));
        assert_eq!(names(&asc)[0], "d");
    }

    #[test]
    fn test_sort_is_stable() {
        let mut tools = vec![
            tool("first", "1月1日"),
            tool("newer", "2月1日"),
            tool("second", "Jan 1"),
            tool("third", "1月1日"),
        ];
        sort_by_date(&mut tools, SortOrder::Desc);
        assert_eq!(names(&tools), ["newer", "first", "second", "third"]);
        sort_by_date(&mut tools, SortOrder::Asc);
        assert_eq!(names(&tools), ["first", "second", "third", "newer"]);
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let tools = vec![tool("x", ""), tool("y", ""), tool("z", "")];
        let filter = Filter::new("   ", None);
        let kept: Vec<_> = filter.apply(&tools).into_iter().cloned().collect();
        assert_eq!(kept, tools);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let cursor = Tool {
            name: "Cursor".to_string(),
            description: "AI 编程工具".to_string(),
            ..Default::default()
        };
        let other = tool("Other", "");
        let filter = Filter::new("cursor", None);
        assert!(filter.matches(&cursor));
        assert!(!filter.matches(&other));

        let by_desc = Filter::new("编程", None);
        assert!(by_desc.matches(&cursor));
    }

    #[test]
    fn test_search_matches_joined_people() {
        let t = Tool {
            name: "T".to_string(),
            recommenders: vec!["Ann".to_string(), "Bo".to_string()],
            ..Default::default()
        };
        assert!(Filter::new("ann bo", None).matches(&t));
        assert!(!Filter::new("annbo", None).matches(&t));
    }

    #[test]
    fn test_person_filter_exact_and_and() {
        let tools = vec![
            Tool {
                name: "Claude".to_string(),
                recommenders: vec!["alice".to_string()],
                ..Default::default()
            },
            Tool {
                name: "Cursor".to_string(),
                recommenders: vec!["alice".to_string(), "bob".to_string()],
                ..Default::default()
            },
            Tool {
                name: "Copilot".to_string(),
                recommenders: vec!["alice2".to_string()],
                ..Default::default()
            },
        ];
        let by_person = Filter::new("", Some("alice"));
        assert_eq!(by_person.apply(&tools).len(), 2);

        let both = Filter::new("cursor", Some("alice"));
        let kept = both.apply(&tools);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Cursor");

        assert!(Filter::new("claude", Some("bob")).apply(&tools).is_empty());
    }

    #[test]
    fn test_project_search_and_author() {
        let p = Project {
            tool_name: "Widget".to_string(),
            author: "carol".to_string(),
            perk: Some("Free trial".to_string()),
            ..Default::default()
        };
        assert!(Filter::new("trial", None).matches(&p));
        assert!(Filter::new("CAROL", None).matches(&p));
        assert!(Filter::new("", Some("carol")).matches(&p));
        assert!(!Filter::new("", Some("Carol")).matches(&p));
    }

    #[test]
    fn test_join_projects() {
        let tools = vec![
            Tool {
                name: "Foo".to_string(),
                description: "foo desc".to_string(),
                ..Default::default()
            },
            Tool {
                name: "Bar EN".to_string(),
                name_zh: Some("巴".to_string()),
                description: "bar desc".to_string(),
                ..Default::default()
            },
        ];
        let members = vec![
            MemberProject {
                tool_name: "Foo".to_string(),
                author: "a".to_string(),
                ..Default::default()
            },
            MemberProject {
                tool_name: "巴".to_string(),
                author: "b".to_string(),
                ..Default::default()
            },
            MemberProject {
                tool_name: "Missing".to_string(),
                author: "c".to_string(),
                ..Default::default()
            },
        ];
        let projects = join_projects(&tools, &members);
        assert_eq!(projects[0].description, "foo desc");
        assert_eq!(projects[1].description, "bar desc");
        assert_eq!(projects[2].description, "");
    }

    #[test]
    fn test_member_project_lookup_prefers_name_zh() {
        let dataset = Dataset {
            tools: vec![Tool {
                name: "Widget".to_string(),
                name_zh: Some("小部件".to_string()),
                ..Default::default()
            }],
            experiences: vec![],
        };
        let members = vec![MemberProject {
            tool_name: "小部件".to_string(),
            author: "dan".to_string(),
            perk: Some("perk".to_string()),
            ..Default::default()
        }];
        let catalog = Catalog::build(Lang::En, dataset, members);
        let mp = catalog.member_project_for(&catalog.tools[0]).unwrap();
        assert_eq!(mp.author, "dan");
        assert_eq!(catalog.member_project_count(), 1);
    }

    #[test]
    fn test_stats_distinct_people() {
        let dataset = Dataset {
            tools: vec![Tool {
                name: "T".to_string(),
                recommenders: vec!["a".to_string(), "b".to_string()],
                ..Default::default()
            }],
            experiences: vec![Experience {
                name: "E".to_string(),
                sharers: vec!["b".to_string(), "c".to_string()],
                ..Default::default()
            }],
        };
        let stats = SiteStats::from_dataset(&dataset);
        assert_eq!(stats, SiteStats { tools: 1, experiences: 1, people: 3 });
        assert_eq!(SiteStats::from_dataset(&Dataset::default()).people, 0);
    }
}
