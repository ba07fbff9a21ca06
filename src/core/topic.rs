//! Topic and difficulty choices offered on the start screen.
//!
//! Both are closed sets, so `configure` never sees an out-of-range value.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    #[default]
    DailyConversation,
    TravelAdventure,
    FoodDining,
    HobbiesFun,
    FeelingsEmotions,
    BusinessProfessional,
    IdiomsSlang,
}

impl Topic {
    pub const ALL: [Topic; 7] = [
        Topic::DailyConversation,
        Topic::TravelAdventure,
        Topic::FoodDining,
        Topic::HobbiesFun,
        Topic::FeelingsEmotions,
        Topic::BusinessProfessional,
        Topic::IdiomsSlang,
    ];

    /// Returns a human-readable label for display and for the prompt
    pub fn label(self) -> &'static str {
        match self {
            Topic::DailyConversation => "Daily Conversation",
            Topic::TravelAdventure => "Travel & Adventure",
            Topic::FoodDining => "Food & Dining",
            Topic::HobbiesFun => "Hobbies & Fun",
            Topic::FeelingsEmotions => "Feelings & Emotions",
            Topic::BusinessProfessional => "Business & Professional",
            Topic::IdiomsSlang => "Idioms & Slang",
        }
    }

    /// Cycles to the next topic (wraps around)
    pub fn next(self) -> Topic {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Cycles to the previous topic (wraps around)
    pub fn prev(self) -> Topic {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Vocabulary level requested from the generator.
#[derive(Serialize, Deserialize, ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Expert,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }

    pub fn next(self) -> Difficulty {
        match self {
            Difficulty::Beginner => Difficulty::Intermediate,
            Difficulty::Intermediate => Difficulty::Advanced,
            Difficulty::Advanced => Difficulty::Expert,
            Difficulty::Expert => Difficulty::Beginner,
        }
    }

    pub fn prev(self) -> Difficulty {
        match self {
            Difficulty::Beginner => Difficulty::Expert,
            Difficulty::Intermediate => Difficulty::Beginner,
            Difficulty::Advanced => Difficulty::Intermediate,
            Difficulty::Expert => Difficulty::Advanced,
        }
    }
}
