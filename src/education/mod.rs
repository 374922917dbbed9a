//! Awareness content: the built-in sections plus whatever the backend serves.

use serde::Serialize;

use crate::api::EducationFeed;
use crate::core::{EducationCategory, MitigationItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    Individual,
    Organization,
}

impl Audience {
    pub fn toggle(self) -> Self {
        match self {
            Audience::Individual => Audience::Organization,
            Audience::Organization => Audience::Individual,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Audience::Individual => "For individuals",
            Audience::Organization => "For organizations",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub body: &'static str,
    pub cards: &'static [Card],
}

pub const BUILT_IN_SECTIONS: &[Section] = &[
    Section {
        title: "What is phishing?",
        body: "Scroll for the answer.",
        cards: &[],
    },
    Section {
        title: "A digital scam built to steal your identity.",
        body: "Attackers pose as an official party (a bank, a social network, your office) \
               and use fake links to lure you into handing over your password, PIN or \
               credit card details.",
        cards: &[],
    },
    Section {
        title: "Already clicked a phishing link? Do this now:",
        body: "",
        cards: &[
            Card {
                title: "Change your password",
                body: "Change the password of the affected account right away, and of any \
                       other account that shares it.",
            },
            Card {
                title: "Call your bank",
                body: "If financial data is involved, phone your bank immediately to block \
                       the card or account.",
            },
            Card {
                title: "Run an antivirus scan",
                body: "Make sure no malware was downloaded to your device automatically.",
            },
        ],
    },
    Section {
        title: "When in doubt, check first.",
        body: "Got a suspicious link? Analyze it before you open it: phishguard scan <URL>",
        cards: &[],
    },
];

/// Everything the `learn` command and the landing screen show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lesson {
    pub sections: &'static [Section],
    pub categories: Vec<EducationCategory>,
    pub individual: Vec<MitigationItem>,
    pub organization: Vec<MitigationItem>,
}

impl Lesson {
    pub fn built_in() -> Self {
        Self::from_feed(EducationFeed::default())
    }

    pub fn from_feed(feed: EducationFeed) -> Self {
        Self {
            sections: BUILT_IN_SECTIONS,
            categories: feed
                .categories
                .into_iter()
                .filter(|c| !c.category_type.trim().is_empty())
                .collect(),
            individual: feed.mitigations.individual,
            organization: feed.mitigations.organization,
        }
    }

    pub fn mitigations(&self, audience: Audience) -> &[MitigationItem] {
        match audience {
            Audience::Individual => &self.individual,
            Audience::Organization => &self.organization,
        }
    }

    pub fn has_fetched_content(&self) -> bool {
        !self.categories.is_empty() || !self.individual.is_empty() || !self.organization.is_empty()
    }
}
