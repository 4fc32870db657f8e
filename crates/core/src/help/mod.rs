//! Help & support screen: searchable FAQs, tutorials and contact details
//!
//! Everything shown here ships with the app, so the screen needs no
//! signed-in user and never touches the store.

use parking_lot::RwLock;
use studybuddy_domain::utils::help::{
    default_faqs, default_tutorials, faq_categories, filter_faqs, Faq, Tutorial, ALL_CATEGORIES,
    SUPPORT_EMAIL,
};
use tracing::debug;

/// Tabs across the top of the help screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HelpTab {
    #[default]
    Faqs,
    Tutorials,
    Contact,
}

impl HelpTab {
    /// Tabs in display order.
    pub const ALL: [Self; 3] = [Self::Faqs, Self::Tutorials, Self::Contact];

    /// Tab caption.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Faqs => "FAQs",
            Self::Tutorials => "Tutorials",
            Self::Contact => "Contact",
        }
    }
}

/// Content and search state of the help screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpState {
    pub tab: HelpTab,
    pub faqs: Vec<Faq>,
    pub tutorials: Vec<Tutorial>,
    pub search: String,
    /// "All" or one FAQ category.
    pub category: String,
    /// Question of the FAQ shown expanded, if any.
    pub expanded: Option<&'static str>,
}

impl Default for HelpState {
    fn default() -> Self {
        Self {
            tab: HelpTab::default(),
            faqs: default_faqs(),
            tutorials: default_tutorials(),
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            expanded: None,
        }
    }
}

impl HelpState {
    /// FAQs matching the search text and category.
    #[must_use]
    pub fn visible_faqs(&self) -> Vec<Faq> {
        filter_faqs(&self.faqs, &self.search, &self.category)
    }

    /// Category chips, "All" first.
    #[must_use]
    pub fn categories(&self) -> Vec<&'static str> {
        faq_categories(&self.faqs)
    }

    /// Address listed on the contact tab.
    #[must_use]
    pub fn support_email(&self) -> &'static str {
        SUPPORT_EMAIL
    }
}

/// Controller of the help & support screen
#[derive(Debug, Default)]
pub struct HelpController {
    state: RwLock<HelpState>,
}

impl HelpController {
    /// Help screen with the shipped FAQs and tutorials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the selected tab, search and filter.
    pub fn state(&self) -> HelpState {
        self.state.read().clone()
    }

    /// Switch tabs; search and filter are kept.
    pub fn select_tab(&self, tab: HelpTab) {
        self.state.write().tab = tab;
    }

    /// Set the FAQ search text.
    pub fn set_search(&self, query: impl Into<String>) {
        let query = query.into();
        debug!(query = %query, "faq search");
        self.state.write().search = query;
    }

    /// Empty the search field.
    pub fn clear_search(&self) {
        self.state.write().search.clear();
    }

    /// Select a category chip. Unknown categories fall back to "All".
    pub fn set_category(&self, category: &str) {
        let mut state = self.state.write();
        state.category = if state.categories().iter().any(|known| *known == category) {
            category.to_string()
        } else {
            ALL_CATEGORIES.to_string()
        };
    }

    /// Expand the FAQ with `question`, or collapse it when already open.
    pub fn toggle_faq(&self, question: &str) {
        let mut state = self.state.write();
        let found = state.faqs.iter().find(|faq| faq.question == question).map(|faq| faq.question);
        state.expanded = if state.expanded == found { None } else { found };
    }
}
