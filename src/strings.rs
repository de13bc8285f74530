//! Per-language UI and page metadata strings

use crate::catalog::SiteStats;
use crate::types::{Lang, SortOrder, Tab};

pub const BASE_URL: &str = "https://ainotes.lambdaintheshell.com";

/// Profile link kept verbatim inside the hero subtitle
pub const HERO_LINK_HTML: &str = r#"<a href="https://x.com/ZQInTheShell" target="_blank" rel="noopener">@ZQInTheShell <i data-lucide="external-link" class="w-3 h-3 inline" style="vertical-align: -0.05em;"></i></a>"#;

#[derive(Debug, PartialEq)]
pub struct Strings {
    pub lang: Lang,
    pub html_lang: &'static str,
    /// Path of this language's page below BASE_URL
    pub page_path: &'static str,
    pub title: &'static str,
    pub og_title: &'static str,
    pub og_description: &'static str,
    pub og_locale: &'static str,
    pub og_locale_alternate: &'static str,
    pub site_name: &'static str,
    pub twitter_title: &'static str,
    pub twitter_description: &'static str,
    pub json_ld_alternate_name: &'static str,
    pub json_ld_description: &'static str,
    pub keywords: &'static str,
    pub hero_subtitle: &'static str,
    pub hero_subtitle_end: &'static str,
    pub member_badge: &'static str,
    pub expand_text: &'static str,
    pub collapse_text: &'static str,
    pub tab_tools: &'static str,
    pub tab_experiences: &'static str,
    pub tab_projects: &'static str,
    pub sort_desc_label: &'static str,
    pub sort_asc_label: &'static str,
    pub sort_desc_title: &'static str,
    pub sort_asc_title: &'static str,
    pub sort_title: &'static str,
    pub search_placeholder: &'static str,
    pub clear_search_aria: &'static str,
    pub empty_heading: &'static str,
    pub empty_desc: &'static str,
    pub empty_clear_btn: &'static str,
    pub lang_toggle_text: &'static str,
    pub lang_toggle_aria: &'static str,
    pub item_list_name: &'static str,
    pub item_list_description: &'static str,
    pub load_error: &'static str,
}

static ZH: Strings = Strings {
    lang: Lang::Zh,
    html_lang: "zh-CN",
    page_path: "/",
    title: "边角聊 AI 讨论组知识库 | AI 工具推荐与使用经验",
    og_title: "边角聊 AI 讨论组知识库 - AI 工具推荐与使用经验",
    og_description: "群友们共同整理的 AI 工具推荐与一线使用经验，社区成员共同贡献。",
    og_locale: "zh_CN",
    og_locale_alternate: "en_US",
    site_name: "边角聊 AI 讨论组知识库",
    twitter_title: "边角聊 AI 讨论组知识库 - AI 工具推荐与使用经验",
    twitter_description: "AI 工具推荐与使用经验，社区成员共同整理。",
    json_ld_alternate_name: "LeftoverTalk AI Discussion Group Knowledge Base",
    json_ld_description: "社区成员分享的 AI 工具推荐与一线使用经验",
    keywords: "AI工具,AI讨论组,边角聊,LeftoverTalk,Claude,ChatGPT,Cursor,AI编程,AI使用经验,AI工具推荐",
    hero_subtitle: "群友们共同整理的 AI 工具推荐与一线使用经验。欢迎在推特关注和联系码农（",
    hero_subtitle_end: "）申请加入讨论组。",
    member_badge: "群友作品",
    expand_text: "展开全文",
    collapse_text: "收起",
    tab_tools: "工具",
    tab_experiences: "经验",
    tab_projects: "群友项目",
    sort_desc_label: "时间顺序 ↓",
    sort_asc_label: "时间顺序 ↑",
    sort_desc_title: "当前：从新到旧",
    sort_asc_title: "当前：从旧到新",
    sort_title: "按时间排序",
    search_placeholder: "搜索分享、成员...",
    clear_search_aria: "清除搜索",
    empty_heading: "没有找到结果",
    empty_desc: "试试调整搜索关键词或筛选条件。",
    empty_clear_btn: "清除所有筛选",
    lang_toggle_text: "EN",
    lang_toggle_aria: "Switch to English",
    item_list_name: "AI 工具推荐",
    item_list_description: "边角聊 AI 讨论组知识库成员推荐的 AI 工具列表",
    load_error: "数据加载失败，请通过本地 HTTP 服务器访问此页面。",
};

static EN: Strings = Strings {
    lang: Lang::En,
    html_lang: "en",
    page_path: "/en/",
    title: "LeftoverTalk AI Group Knowledge Base | AI Tool Recommendations & Experiences",
    og_title: "LeftoverTalk AI Group Knowledge Base - AI Tool Recommendations & Experiences",
    og_description: "AI tool recommendations and first-hand experiences curated by community members.",
    og_locale: "en_US",
    og_locale_alternate: "zh_CN",
    site_name: "LeftoverTalk AI Group Knowledge Base",
    twitter_title: "LeftoverTalk AI Group Knowledge Base - AI Tool Recommendations & Experiences",
    twitter_description: "AI tool recommendations and experiences curated by community members.",
    json_ld_alternate_name: "边角聊 AI 讨论组知识库",
    json_ld_description: "AI tool recommendations and first-hand experiences shared by community members",
    keywords: "AI tools,AI discussion group,LeftoverTalk,Claude,ChatGPT,Cursor,AI coding,AI experiences,AI tool recommendations",
    hero_subtitle: "AI tool recommendations and first-hand experiences curated by group members. Follow and DM the admin on Twitter (",
    hero_subtitle_end: ") to join the group.",
    member_badge: "Group Member Project",
    expand_text: "Show more",
    collapse_text: "Show less",
    tab_tools: "Tools",
    tab_experiences: "Experiences",
    tab_projects: "Group Member Projects",
    sort_desc_label: "Date ↓",
    sort_asc_label: "Date ↑",
    sort_desc_title: "Current: newest first",
    sort_asc_title: "Current: oldest first",
    sort_title: "Sort by date",
    search_placeholder: "Search posts, group members...",
    clear_search_aria: "Clear search",
    empty_heading: "No results found",
    empty_desc: "Try adjusting your search terms or filters.",
    empty_clear_btn: "Clear all filters",
    lang_toggle_text: "中",
    lang_toggle_aria: "切换到中文",
    item_list_name: "AI Tool Recommendations",
    item_list_description: "AI tools recommended by LeftoverTalk AI Group Knowledge Base members",
    load_error: "Failed to load data. Please access this page via a local HTTP server.",
};

pub fn strings(lang: Lang) -> &'static Strings {
    match lang {
        Lang::Zh => &ZH,
        Lang::En => &EN,
    }
}

impl Strings {
    pub fn page_url(&self) -> String {
        format!("{}{}", BASE_URL, self.page_path)
    }

    pub fn meta_description(&self, stats: &SiteStats) -> String {
        match self.lang {
            Lang::Zh => format!(
                "边角聊 AI 讨论组知识库 - {} 个 AI 工具推荐，{} 条使用经验，{} 位社区成员共同贡献。",
                stats.tools, stats.experiences, stats.people
            ),
            Lang::En => format!(
                "LeftoverTalk AI Group Knowledge Base - {} AI tool recommendations, {} first-hand experiences, contributed by {} community members.",
                stats.tools, stats.experiences, stats.people
            ),
        }
    }

    pub fn tab_label(&self, tab: Tab) -> &'static str {
        match tab {
            Tab::Tools => self.tab_tools,
            Tab::Experiences => self.tab_experiences,
            Tab::Projects => self.tab_projects,
        }
    }

    pub fn sort_label(&self, order: SortOrder) -> &'static str {
        match order {
            SortOrder::Desc => self.sort_desc_label,
            SortOrder::Asc => self.sort_asc_label,
        }
    }

    pub fn sort_state_title(&self, order: SortOrder) -> &'static str {
        match order {
            SortOrder::Desc => self.sort_desc_title,
            SortOrder::Asc => self.sort_asc_title,
        }
    }

    /// Hero subtitle markup: escaped text around the profile link
    pub fn hero_subtitle_html(&self) -> String {
        format!(
            "{}{}{}",
            crate::cards::html_escape(self.hero_subtitle),
            HERO_LINK_HTML,
            crate::cards::html_escape(self.hero_subtitle_end)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_description_uses_stats() {
        let stats = SiteStats {
            tools: 12,
            experiences: 5,
            people: 7,
        };
        let zh = strings(Lang::Zh).meta_description(&stats);
        assert!(zh.contains("12 个 AI 工具推荐"));
        assert!(zh.contains("7 位社区成员"));
        let en = strings(Lang::En).meta_description(&stats);
        assert!(en.contains("12 AI tool recommendations, 5 first-hand experiences"));
    }

    #[test]
    fn test_page_urls() {
        assert_eq!(strings(Lang::Zh).page_url(), format!("{}/", BASE_URL));
        assert_eq!(strings(Lang::En).page_url(), format!("{}/en/", BASE_URL));
    }

    #[test]
    fn test_hero_subtitle_keeps_link() {
        let html = strings(Lang::En).hero_subtitle_html();
        assert!(html.starts_with("AI tool recommendations"));
        assert!(html.contains(HERO_LINK_HTML));
        assert!(html.ends_with(") to join the group."));
    }
}
