//! Sample bundler output and datasets for tests

pub const TEMPLATE_HTML: &str = r##"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>边角聊 AI 讨论组</title>
  <meta name="description" content="边角聊 AI 讨论组 - 社区成员分享的 AI 工具与经验">
  <meta name="keywords" content="AI">
  <link rel="canonical" href="https://example.com/">
  <link rel="alternate" hreflang="zh-CN" href="https://ainotes.lambdaintheshell.com/">
  <link rel="alternate" hreflang="en" href="https://example.com/en/">
  <meta property="og:type" content="website">
  <meta property="og:title" content="placeholder">
  <meta property="og:description" content="placeholder">
  <meta property="og:url" content="https://example.com/">
  <meta property="og:locale" content="zh_CN">
  <meta property="og:locale:alternate" content="en_US">
  <meta property="og:site_name" content="placeholder">
  <meta name="twitter:card" content="summary">
  <meta name="twitter:title" content="placeholder">
  <meta name="twitter:description" content="placeholder">
  <script type="application/ld+json">
  {
    "@context": "https://schema.org",
    "@type": "WebSite",
    "name": "placeholder",
    "url": "https://example.com/"
  }
  </script>
  <script type="module" crossorigin src="/assets/index-abc123.js"></script>
  <link rel="stylesheet" crossorigin href="/assets/index-def456.css">
</head>
<body class="bg-bg text-text font-body">
  <header id="site-header" class="sticky top-0 z-10 bg-white/90 backdrop-blur">
    <div class="max-w-5xl mx-auto flex items-center gap-3 px-4 py-3">
      <img src="/logo-32.png" alt="边角聊 AI 讨论组" class="w-8 h-8">
      <div class="relative flex-1">
        <input id="search-input" type="search" class="w-full rounded-lg border px-3 py-2" placeholder="搜索分享、成员..." autocomplete="off">
        <button id="search-clear" class="hidden absolute right-2 top-2" aria-label="清除搜索"><i data-lucide="x" class="w-4 h-4"></i></button>
      </div>
      <button id="lang-toggle" class="text-sm font-medium px-2 py-1" aria-label="Switch to English">EN</button>
    </div>
  </header>
  <main class="max-w-5xl mx-auto px-4">
    <section class="py-8">
      <h1 class="font-heading text-2xl sm:text-3xl font-bold mb-2">边角聊 AI 讨论组</h1>
      <p class="text-muted text-base sm:text-lg">群友们共同整理的 AI 工具推荐与一线使用经验。欢迎在推特关注和联系码农（<a href="https://x.com/ZQInTheShell" target="_blank" rel="noopener">@ZQInTheShell <i data-lucide="external-link" class="w-3 h-3 inline" style="vertical-align: -0.05em;"></i></a>）申请加入讨论组。</p>
    </section>
    <nav class="flex items-center justify-between border-b border-border" role="tablist">
      <div class="flex">
        <button id="tab-tools" role="tab" aria-selected="true" class="tab-btn">
            <i data-lucide="wrench" class="w-4 h-4"></i>
            工具 <span id="tab-tools-count" class="text-xs">0</span>
        </button>
        <button id="tab-experiences" role="tab" aria-selected="false" class="tab-btn">
            <i data-lucide="lightbulb" class="w-4 h-4"></i>
            经验 <span id="tab-experiences-count" class="text-xs">0</span>
        </button>
        <button id="tab-projects" role="tab" aria-selected="false" class="tab-btn">
            <i data-lucide="users" class="w-4 h-4"></i>
            群友项目 <span id="tab-projects-count" class="text-xs">0</span>
        </button>
      </div>
      <button id="sort-btn" class="flex items-center gap-1 text-sm" title="按时间排序"><i data-lucide="arrow-down-up" class="w-4 h-4"></i><span id="sort-label">时间顺序 ↓</span></button>
    </nav>
    <div id="content-grid" class="grid grid-cols-1 md:grid-cols-2 gap-4 py-6"></div>
    <div id="empty-state" class="hidden text-center py-16">
      <h3 class="font-heading text-lg font-semibold mb-2">没有找到结果</h3>
      <p class="text-muted text-sm mb-4">试试调整搜索关键词或筛选条件。</p>
      <button id="clear-all-btn" class="text-cta text-sm font-medium">清除所有筛选</button>
    </div>
  </main>
  <footer class="border-t border-border py-6 px-4">
    <div class="max-w-5xl mx-auto text-center text-muted text-sm">
      边角聊 AI 讨论组 &middot; 社区知识库
    </div>
  </footer>
</body>
</html>
"##;

/// The bundler page with extra icons and elements around the localized text
pub fn decorated_template() -> String {
    TEMPLATE_HTML
        .replace(
            r#"<p class="text-muted text-base sm:text-lg">"#,
            r#"<p class="text-muted text-base sm:text-lg"><i data-lucide="sparkles" class="w-4 h-4 inline"></i> "#,
        )
        .replace(
            r#"class="tab-btn">
            <i data-lucide="wrench""#,
            r#"class="tab-btn">
            <span class="sr-only">1</span>
            <i data-lucide="wrench""#,
        )
        .replace(
            r#"<div id="empty-state" class="hidden text-center py-16">"#,
            r#"<div id="empty-state" class="hidden text-center py-16">
      <i data-lucide="search-x" class="w-10 h-10 mx-auto mb-3 text-muted"></i>"#,
        )
        .replace(
            r#"<footer class="border-t border-border py-6 px-4">"#,
            r##"<footer class="border-t border-border py-6 px-4">
    <a href="#top" class="sr-only">Back to top</a>"##,
        )
}

pub const DATA_ZH: &str = r#"{
  "tools": [
    {"name": "Claude", "description": "Anthropic 的 AI 助手", "date": "1月20日", "recommenders": ["阿明", "小红"], "urls": ["https://claude.ai"]},
    {"name": "Cursor", "description": "AI 编程工具", "date": "3月1日", "recommenders": ["小红"], "urls": ["https://www.cursor.com", "https://docs.cursor.com"]},
    {"name": "小部件", "description": "群友做的工具", "date": "2月14日", "recommenders": ["阿明"], "urls": []}
  ],
  "experiences": [
    {"name": "提示词技巧", "content": "先给出上下文，再提出要求。", "date": "2月2日", "sharers": ["老王"]},
    {"name": "长文", "content": "这是一段很长的经验分享。这是一段很长的经验分享。这是一段很长的经验分享。这是一段很长的经验分享。这是一段很长的经验分享。这是一段很长的经验分享。这是一段很长的经验分享。这是一段很长的经验分享。这是一段很长的经验分享。这是一段很长的经验分享。这是一段很长的经验分享。这是一段很长的经验分享。这是一段很长的经验分享。这是一段很长的经验分享。", "date": "1月5日", "sharers": ["小红", "老王"]}
  ]
}"#;

pub const DATA_EN: &str = r#"{
  "tools": [
    {"name": "Claude", "nameZh": "Claude", "description": "Anthropic's AI assistant", "date": "Jan 20", "recommenders": ["Ming", "Hong"], "urls": ["https://claude.ai"]},
    {"name": "Cursor", "nameZh": "Cursor", "description": "AI coding tool", "date": "Mar 1", "recommenders": ["Hong"], "urls": ["https://www.cursor.com"]},
    {"name": "Widget", "nameZh": "小部件", "description": "A tool built by a member", "date": "Feb 14", "recommenders": ["Ming"]}
  ],
  "experiences": [
    {"name": "Prompting tips", "content": "Give context first, then ask.", "date": "Feb 2", "sharers": ["Wang"]}
  ]
}"#;

pub const PROJECTS_ZH: &str = r#"[
  {"toolName": "小部件", "author": "阿明", "url": "https://widget.example.com", "perk": "群友八折"}
]"#;

pub const PROJECTS_EN: &str = r#"[
  {"toolName": "小部件", "author": "Ming", "url": "https://widget.example.com", "perk": "20% off for members"}
]"#;
