//! Intent and slot names produced by the NLU grammar

pub const START_TOUR: &str = "start_tour";
pub const START_TOUR_WITH_PLACE: &str = "start_tour_with_place";
pub const START_ACTIVITY: &str = "start_activity";
pub const START_ACTIVITY_SHORT: &str = "start_activity_short";
pub const FIND_NEARBY_PLACE: &str = "find_nearby_place";
pub const CHANGE_THEME: &str = "change_theme";

/// Intents every tour scene reacts to
pub const GLOBAL_INTENTS: [&str; 5] = [
    START_TOUR,
    START_TOUR_WITH_PLACE,
    START_ACTIVITY,
    START_ACTIVITY_SHORT,
    FIND_NEARBY_PLACE,
];

pub const PLACE_SLOT: &str = "place";
pub const ACTIVITY_SLOT: &str = "activity";

/// Activity slot values
pub const QUEST: &str = "quest";
pub const QUIZ: &str = "quiz";
pub const ADVICE: &str = "advice";
