// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Canned recommendation content.

use crate::models::StressCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Music,
    Videos,
    Reading,
    Activities,
}

/// Which stress band an item is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationLevel {
    Low,
    Medium,
    High,
    All,
}

impl RecommendationLevel {
    pub fn matches(self, category: StressCategory) -> bool {
        matches!(
            (self, category),
            (Self::All, _)
                | (Self::Low, StressCategory::Low)
                | (Self::Medium, StressCategory::Moderate)
                | (Self::High, StressCategory::High)
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub description: &'static str,
    pub category: ContentCategory,
    pub level: RecommendationLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<&'static str>,
}

const fn item(
    title: &'static str,
    description: &'static str,
    category: ContentCategory,
    level: RecommendationLevel,
    link: Option<&'static str>,
) -> Recommendation {
    Recommendation {
        title,
        description,
        category,
        level,
        link,
    }
}

use ContentCategory::{Activities, Music, Reading, Videos};
use RecommendationLevel::{All, High, Low, Medium};

pub const CATALOG: &[Recommendation] = &[
    item(
        "Calming Classical Music",
        "Gentle piano and string compositions to reduce anxiety",
        Music,
        High,
        Some("/recommendations/music"),
    ),
    item(
        "Nature Sounds",
        "Relaxing sounds of rain, ocean waves, and forest ambience",
        Music,
        Medium,
        Some("/recommendations/music"),
    ),
    item(
        "Upbeat Instrumental",
        "Positive and energetic music to improve your mood",
        Music,
        Low,
        Some("/recommendations/music"),
    ),
    item(
        "Guided Meditation",
        "10-minute guided meditation for immediate stress relief",
        Videos,
        High,
        Some("/recommendations/videos"),
    ),
    item(
        "Progressive Muscle Relaxation",
        "Learn to release physical tension from your body",
        Videos,
        Medium,
        Some("/recommendations/videos"),
    ),
    item(
        "Mindful Walking Practice",
        "Transform your daily walk into a mindfulness practice",
        Videos,
        Low,
        Some("/recommendations/videos"),
    ),
    item(
        "Quick Stress Relief Techniques",
        "Simple techniques you can use anywhere, anytime",
        Reading,
        High,
        None,
    ),
    item(
        "Understanding Your Stress Triggers",
        "Learn to identify and manage your personal stress triggers",
        Reading,
        Medium,
        None,
    ),
    item(
        "Building Resilience",
        "Long-term strategies for stress management and prevention",
        Reading,
        Low,
        None,
    ),
    item(
        "3-Minute Breathing Space",
        "A quick mindfulness practice to help you pause and reset",
        Activities,
        All,
        Some("/recommendations/breathing-space"),
    ),
    item(
        "15-Minute Yoga Sequence",
        "Gentle stretches to release physical tension",
        Activities,
        Medium,
        None,
    ),
    item(
        "Mindful Tea Break",
        "Transform a simple tea break into a mindfulness practice",
        Activities,
        Low,
        None,
    ),
];

/// Catalog items for a stress band, optionally narrowed to one content category.
pub fn recommendations_for(
    stress: StressCategory,
    content: Option<ContentCategory>,
) -> Vec<&'static Recommendation> {
    CATALOG
        .iter()
        .filter(|rec| content.is_none_or(|c| rec.category == c))
        .filter(|rec| rec.level.matches(stress))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(recs: &[&Recommendation]) -> Vec<&'static str> {
        recs.iter().map(|r| r.title).collect()
    }

    #[test]
    fn test_high_stress_includes_all_level_items() {
        let recs = recommendations_for(StressCategory::High, None);
        assert_eq!(
            titles(&recs),
            vec![
                "Calming Classical Music",
                "Guided Meditation",
                "Quick Stress Relief Techniques",
                "3-Minute Breathing Space",
            ]
        );
    }

    #[test]
    fn test_content_filter() {
        let recs = recommendations_for(StressCategory::Moderate, Some(ContentCategory::Activities));
        assert_eq!(
            titles(&recs),
            vec!["3-Minute Breathing Space", "15-Minute Yoga Sequence"]
        );
    }
}
