//! Keyword-to-category rule table consumed by the matcher.
//!
//! Rules are data, not code: an ordered list scanned linearly per candidate.
//! Declaration order is the priority order - product-specific keyword sets
//! come before generic ones so a candidate mentioning "trello" lands in
//! project management before a later "board" rule can claim it. Keywords are
//! stored lower-case; matching is substring containment.

/// One entry of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub keywords: &'static [&'static str],
    pub categories: [&'static str; 3],
}

/// Fallback labels when no rule wins.
pub const DEFAULT_CATEGORIES: &[&str] = &["developer-tools", "productivity", "utilities"];

/// The rule table, most specific first.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    // ------------------------------------------------------------------
    // Project & work management
    // ------------------------------------------------------------------
    CategoryRule {
        keywords: &["trello", "kanban"],
        categories: ["project-management", "task-management", "productivity"],
    },
    CategoryRule {
        keywords: &["jira", "issue tracking", "bug tracking"],
        categories: ["project-management", "developer-tools", "task-management"],
    },
    CategoryRule {
        keywords: &["asana", "monday.com", "clickup", "basecamp"],
        categories: ["project-management", "task-management", "productivity"],
    },
    CategoryRule {
        keywords: &["todoist", "to-do", "todo list"],
        categories: ["task-management", "productivity", "utilities"],
    },
    // ------------------------------------------------------------------
    // Communication
    // ------------------------------------------------------------------
    CategoryRule {
        keywords: &["slack", "microsoft teams", "team chat"],
        categories: ["team-chat", "communication", "productivity"],
    },
    CategoryRule {
        keywords: &["discord", "community chat"],
        categories: ["team-chat", "communication", "social-media"],
    },
    CategoryRule {
        keywords: &["zoom", "google meet", "video conferencing", "video call"],
        categories: ["video-conferencing", "communication", "productivity"],
    },
    CategoryRule {
        keywords: &["whatsapp", "telegram", "messenger", "instant messaging"],
        categories: ["messaging", "communication", "privacy"],
    },
    CategoryRule {
        keywords: &["twitter", "instagram", "social network", "social media"],
        categories: ["social-media", "communication", "marketing"],
    },
    // ------------------------------------------------------------------
    // Notes, docs, knowledge
    // ------------------------------------------------------------------
    CategoryRule {
        keywords: &["notion", "evernote", "onenote", "note-taking", "notes app"],
        categories: ["note-taking", "knowledge-base", "productivity"],
    },
    CategoryRule {
        keywords: &["confluence", "wiki"],
        categories: ["wiki", "documentation", "knowledge-base"],
    },
    CategoryRule {
        keywords: &["google docs", "microsoft word", "office suite", "word processor"],
        categories: ["office-suite", "documentation", "productivity"],
    },
    CategoryRule {
        keywords: &["docusign", "e-signature", "sign documents"],
        categories: ["documents", "legal", "productivity"],
    },
    // ------------------------------------------------------------------
    // Marketing, analytics, sales
    // ------------------------------------------------------------------
    CategoryRule {
        keywords: &["google analytics", "web analytics", "site analytics"],
        categories: ["analytics", "marketing", "privacy"],
    },
    CategoryRule {
        keywords: &["mailchimp", "newsletter", "email marketing", "email campaign"],
        categories: ["email", "marketing", "automation"],
    },
    CategoryRule {
        keywords: &["salesforce", "hubspot", "crm"],
        categories: ["crm", "sales", "marketing"],
    },
    CategoryRule {
        keywords: &["ahrefs", "semrush", "seo"],
        categories: ["seo", "marketing", "analytics"],
    },
    CategoryRule {
        keywords: &["zendesk", "freshdesk", "helpdesk", "help desk", "customer support"],
        categories: ["customer-support", "helpdesk", "crm"],
    },
    CategoryRule {
        keywords: &["intercom", "live chat", "chat widget"],
        categories: ["customer-support", "communication", "marketing"],
    },
    // ------------------------------------------------------------------
    // Files, storage, security
    // ------------------------------------------------------------------
    CategoryRule {
        keywords: &["dropbox", "file sync", "file sharing"],
        categories: ["file-storage", "file-sync", "backup"],
    },
    CategoryRule {
        keywords: &["google drive", "onedrive", "cloud storage"],
        categories: ["file-storage", "cloud-storage", "productivity"],
    },
    CategoryRule {
        keywords: &["1password", "lastpass", "password manager", "password"],
        categories: ["password-manager", "security", "privacy"],
    },
    CategoryRule {
        keywords: &["auth0", "okta", "single sign-on", "authentication", "identity provider"],
        categories: ["authentication", "identity", "security"],
    },
    CategoryRule {
        keywords: &["vpn"],
        categories: ["privacy", "security", "networking"],
    },
    // ------------------------------------------------------------------
    // Developer platforms
    // ------------------------------------------------------------------
    CategoryRule {
        keywords: &["github", "gitlab", "bitbucket", "git hosting", "code hosting"],
        categories: ["code-hosting", "version-control", "developer-tools"],
    },
    CategoryRule {
        keywords: &["circleci", "travis", "continuous integration", "ci/cd"],
        categories: ["ci-cd", "devops", "developer-tools"],
    },
    CategoryRule {
        keywords: &["datadog", "new relic", "monitoring", "uptime"],
        categories: ["monitoring", "observability", "devops"],
    },
    CategoryRule {
        keywords: &["splunk", "log management", "logging"],
        categories: ["logging", "observability", "monitoring"],
    },
    CategoryRule {
        keywords: &["firebase", "backend as a service", "baas"],
        categories: ["database", "hosting", "developer-tools"],
    },
    CategoryRule {
        keywords: &["heroku", "paas", "deploy apps"],
        categories: ["hosting", "devops", "ci-cd"],
    },
    CategoryRule {
        keywords: &["postman", "api client", "api testing"],
        categories: ["api-tools", "developer-tools", "integrations"],
    },
    // ------------------------------------------------------------------
    // Data & BI
    // ------------------------------------------------------------------
    CategoryRule {
        keywords: &["tableau", "power bi", "business intelligence", "dashboards"],
        categories: ["business-intelligence", "data-visualization", "analytics"],
    },
    CategoryRule {
        keywords: &["airtable", "smart table", "database spreadsheet"],
        categories: ["spreadsheets", "database", "no-code"],
    },
    CategoryRule {
        keywords: &["excel", "google sheets", "spreadsheet"],
        categories: ["spreadsheets", "office-suite", "productivity"],
    },
    // ------------------------------------------------------------------
    // Automation, forms, scheduling
    // ------------------------------------------------------------------
    CategoryRule {
        keywords: &["zapier", "ifttt", "workflow automation"],
        categories: ["automation", "integrations", "no-code"],
    },
    CategoryRule {
        keywords: &["typeform", "google forms", "surveymonkey", "survey", "form builder"],
        categories: ["forms", "surveys", "no-code"],
    },
    CategoryRule {
        keywords: &["calendly", "scheduling", "appointment booking"],
        categories: ["scheduling", "calendar", "productivity"],
    },
    // ------------------------------------------------------------------
    // Commerce & finance
    // ------------------------------------------------------------------
    CategoryRule {
        keywords: &["shopify", "woocommerce", "online store", "e-commerce", "ecommerce"],
        categories: ["e-commerce", "payments", "website-builder"],
    },
    CategoryRule {
        keywords: &["stripe", "paypal", "payment processing"],
        categories: ["payments", "finance", "e-commerce"],
    },
    CategoryRule {
        keywords: &["quickbooks", "xero", "accounting", "invoicing", "invoice"],
        categories: ["accounting", "invoicing", "finance"],
    },
    // ------------------------------------------------------------------
    // Web publishing & media
    // ------------------------------------------------------------------
    CategoryRule {
        keywords: &["squarespace", "wix", "webflow", "website builder", "landing page"],
        categories: ["website-builder", "cms", "no-code"],
    },
    CategoryRule {
        keywords: &["medium", "substack", "blogging", "blog platform"],
        categories: ["blogging", "cms", "website-builder"],
    },
    CategoryRule {
        keywords: &["figma", "sketch", "design tool", "prototyping"],
        categories: ["design", "prototyping", "productivity"],
    },
    CategoryRule {
        keywords: &["photoshop", "lightroom", "photo editing", "image editor"],
        categories: ["photo-editing", "design", "media"],
    },
    CategoryRule {
        keywords: &["premiere", "final cut", "video editing", "video editor"],
        categories: ["video-editing", "media", "design"],
    },
    CategoryRule {
        keywords: &["spotify", "music streaming"],
        categories: ["music", "streaming", "media"],
    },
    CategoryRule {
        keywords: &["youtube", "vimeo", "video hosting"],
        categories: ["streaming", "media", "hosting"],
    },
    CategoryRule {
        keywords: &["google maps", "mapping", "navigation"],
        categories: ["maps", "data-visualization", "utilities"],
    },
    CategoryRule {
        keywords: &["workday", "bamboohr", "recruiting", "applicant tracking"],
        categories: ["hr", "productivity", "automation"],
    },
    // ------------------------------------------------------------------
    // Generic catch-alls. Keep these last: their keywords appear inside
    // many descriptions and would otherwise shadow the specific rules.
    // ------------------------------------------------------------------
    CategoryRule {
        keywords: &["board"],
        categories: ["project-management", "collaboration", "productivity"],
    },
    CategoryRule {
        keywords: &["chat"],
        categories: ["communication", "messaging", "team-chat"],
    },
    CategoryRule {
        keywords: &["email"],
        categories: ["email", "communication", "productivity"],
    },
    CategoryRule {
        keywords: &["database"],
        categories: ["database", "developer-tools", "devops"],
    },
    CategoryRule {
        keywords: &["marketing"],
        categories: ["marketing", "analytics", "automation"],
    },
    CategoryRule {
        keywords: &["security"],
        categories: ["security", "privacy", "developer-tools"],
    },
    CategoryRule {
        keywords: &["developer", "programming", "code"],
        categories: ["developer-tools", "productivity", "utilities"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_lowercase() {
        for rule in CATEGORY_RULES {
            for keyword in rule.keywords {
                assert_eq!(
                    *keyword,
                    keyword.to_lowercase(),
                    "keyword {keyword:?} must be stored lower-case"
                );
            }
        }
    }

    #[test]
    fn defaults_are_three_labels() {
        assert_eq!(DEFAULT_CATEGORIES.len(), 3);
    }

    #[test]
    fn every_rule_has_keywords() {
        for rule in CATEGORY_RULES {
            assert!(!rule.keywords.is_empty());
        }
    }
}
