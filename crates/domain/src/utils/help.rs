//! Help and support content with the FAQ search

use serde::Serialize;

/// Category filter value that matches every FAQ.
pub const ALL_CATEGORIES: &str = "All";

/// Address listed on the contact tab.
pub const SUPPORT_EMAIL: &str = "support@studybuddy.com";

/// A question with its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
    pub category: &'static str,
}

/// A titled list of steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tutorial {
    pub title: &'static str,
    pub description: &'static str,
    pub steps: &'static [&'static str],
}

const fn faq(question: &'static str, answer: &'static str, category: &'static str) -> Faq {
    Faq { question, answer, category }
}

/// The FAQs shipped with the app
#[must_use]
pub fn default_faqs() -> Vec<Faq> {
    vec![
        faq(
            "How do I create a study schedule?",
            "Go to the Schedule tab and tap the '+' button. Fill in the subject, date, time, and duration. Your schedule will appear in the calendar view.",
            "Scheduling",
        ),
        faq(
            "Can I set study goals?",
            "Yes! Visit the Progress tab to set daily, weekly, or monthly study goals. You can track your progress and see productivity statistics.",
            "Goals",
        ),
        faq(
            "How do I add notes to my study materials?",
            "In the Notes tab, tap the '+' button to create a new note. You can add text, links, attachments, and organize by subjects and tags.",
            "Notes",
        ),
        faq(
            "Can I sync my data across devices?",
            "Yes, your data is automatically synced when you're signed in to your account. Make sure you're connected to the internet.",
            "Sync",
        ),
        faq(
            "How do I change my password?",
            "Go to Settings > Account > Change Password. You'll need to enter your current password and then your new password twice.",
            "Account",
        ),
        faq(
            "Is there a dark mode?",
            "Yes! You can enable dark mode in Settings > Appearance > Theme. Choose from Light, Dark, or System default.",
            "Appearance",
        ),
        faq(
            "How do I delete my account?",
            "Contact our support team at support@studybuddy.com to request account deletion. We'll process your request within 7 business days.",
            "Account",
        ),
        faq(
            "Can I export my study data?",
            "Yes, you can export your notes and schedules in PDF format from the Settings > Data Export section.",
            "Data",
        ),
    ]
}

/// Step-by-step guides shown on the tutorials tab
#[must_use]
pub fn default_tutorials() -> Vec<Tutorial> {
    vec![
        Tutorial {
            title: "Getting Started",
            description: "Learn the basics of using StudyBuddy",
            steps: &[
                "Create your account and complete the setup",
                "Set your first study goal in the Progress tab",
                "Add your first study session in the Schedule tab",
                "Create your first note in the Notes tab",
                "Customize your preferences in Settings",
            ],
        },
        Tutorial {
            title: "Creating Effective Study Schedules",
            description: "Master the art of time management",
            steps: &[
                "Open the Schedule tab",
                "Tap the '+' button to add a new session",
                "Choose your subject and topic",
                "Set a realistic time duration",
                "Add breaks between long sessions",
                "Review and adjust your schedule regularly",
            ],
        },
        Tutorial {
            title: "Organizing Your Notes",
            description: "Keep your study materials neat and accessible",
            steps: &[
                "Go to the Notes tab",
                "Create notes for each subject",
                "Use tags to categorize topics",
                "Add links to online resources",
                "Attach images or documents",
                "Use the search function to find notes quickly",
            ],
        },
        Tutorial {
            title: "Tracking Your Progress",
            description: "Monitor your study habits and achievements",
            steps: &[
                "Visit the Progress tab",
                "Set specific, measurable goals",
                "Check in daily to mark completed sessions",
                "Review your weekly productivity stats",
                "Adjust goals based on your progress",
                "Celebrate your achievements!",
            ],
        },
    ]
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// FAQs whose question or answer contains `query` (case-insensitive) and
/// whose category equals `category`, or any category for
/// [`ALL_CATEGORIES`]. An empty query matches everything.
///
/// ```
/// use studybuddy_domain::utils::help::{default_faqs, filter_faqs, ALL_CATEGORIES};
///
/// let faqs = default_faqs();
/// let hits = filter_faqs(&faqs, "DARK MODE", ALL_CATEGORIES);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].category, "Appearance");
/// ```
#[must_use]
pub fn filter_faqs(faqs: &[Faq], query: &str, category: &str) -> Vec<Faq> {
    faqs.iter()
        .filter(|faq| {
            query.is_empty()
                || contains_ignore_case(faq.question, query)
                || contains_ignore_case(faq.answer, query)
        })
        .filter(|faq| category == ALL_CATEGORIES || faq.category == category)
        .cloned()
        .collect()
}

/// "All" followed by each category once, in first-seen order.
#[must_use]
pub fn faq_categories(faqs: &[Faq]) -> Vec<&'static str> {
    let mut categories = vec![ALL_CATEGORIES];
    for faq in faqs {
        if !categories.contains(&faq.category) {
            categories.push(faq.category);
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_covers_question_and_answer() {
        let faqs = default_faqs();

        let by_answer = filter_faqs(&faqs, "pdf", ALL_CATEGORIES);
        assert_eq!(by_answer.len(), 1);
        assert_eq!(by_answer[0].question, "Can I export my study data?");

        assert_eq!(filter_faqs(&faqs, "", ALL_CATEGORIES).len(), faqs.len());
        assert!(filter_faqs(&faqs, "quantum", ALL_CATEGORIES).is_empty());
    }

    #[test]
    fn category_narrows_the_search() {
        let faqs = default_faqs();

        assert_eq!(filter_faqs(&faqs, "", "Account").len(), 2);
        assert_eq!(filter_faqs(&faqs, "password", "Account").len(), 1);
        assert!(filter_faqs(&faqs, "password", "Notes").is_empty());
    }

    #[test]
    fn categories_start_with_all_and_are_unique() {
        let categories = faq_categories(&default_faqs());
        assert_eq!(
            categories,
            ["All", "Scheduling", "Goals", "Notes", "Sync", "Account", "Appearance", "Data"]
        );
    }
}
