//! Points of interest of the kremlin tour

use serde::{Deserialize, Serialize};
use crate::utils::helpers::mentions;
use super::nearest::Coordinate;

/// The landmarks the tour knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    SpasskayaTower,
    SophiaCathedral,
    MillenniumMonument,
    YaroslavCourt,
}

/// A named point with a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub landmark: Landmark,
    pub name: &'static str,
    pub coordinate: Coordinate,
}

/// The static set the nearest-place resolver chooses among, in tie-break order
pub static POINTS_OF_INTEREST: [PointOfInterest; 4] = [
    PointOfInterest {
        landmark: Landmark::SpasskayaTower,
        name: "Спасская башня",
        coordinate: Coordinate::new(58.519722, 31.277222),
    },
    PointOfInterest {
        landmark: Landmark::SophiaCathedral,
        name: "Софийский собор",
        coordinate: Coordinate::new(58.522300, 31.275900),
    },
    PointOfInterest {
        landmark: Landmark::MillenniumMonument,
        name: "Памятник «Тысячелетие России»",
        coordinate: Coordinate::new(58.521300, 31.275400),
    },
    PointOfInterest {
        landmark: Landmark::YaroslavCourt,
        name: "Ярославово дворище",
        coordinate: Coordinate::new(58.518500, 31.284700),
    },
];

impl Landmark {
    pub const ALL: [Landmark; 4] = [
        Landmark::SpasskayaTower,
        Landmark::SophiaCathedral,
        Landmark::MillenniumMonument,
        Landmark::YaroslavCourt,
    ];

    /// Slot value and configuration key
    pub fn slug(self) -> &'static str {
        match self {
            Landmark::SpasskayaTower => "spasskaya_tower",
            Landmark::SophiaCathedral => "sophia_cathedral",
            Landmark::MillenniumMonument => "millennium_monument",
            Landmark::YaroslavCourt => "yaroslav_court",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|landmark| landmark.slug() == slug)
    }

    pub fn point(self) -> &'static PointOfInterest {
        match self {
            Landmark::SpasskayaTower => &POINTS_OF_INTEREST[0],
            Landmark::SophiaCathedral => &POINTS_OF_INTEREST[1],
            Landmark::MillenniumMonument => &POINTS_OF_INTEREST[2],
            Landmark::YaroslavCourt => &POINTS_OF_INTEREST[3],
        }
    }

    pub fn title(self) -> &'static str {
        self.point().name
    }

    pub fn coordinate(self) -> Coordinate {
        self.point().coordinate
    }

    /// Other ways users name the place
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Landmark::SpasskayaTower => &["спасская башня", "спасской башни", "спасская", "башня"],
            Landmark::SophiaCathedral => &["софийский собор", "софийского собора", "собор", "святая софия"],
            Landmark::MillenniumMonument => &["тысячелетие россии", "памятник", "тысячелетия россии"],
            Landmark::YaroslavCourt => &["ярославово дворище", "ярославова дворища", "дворище"],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Landmark::SpasskayaTower => {
                "Спасская башня - главный въезд в кремль. Через её ворота проезжали \
                 купеческие обозы, и, говорят, не один бочонок мёда оседал у стражи."
            }
            Landmark::SophiaCathedral => {
                "Софийский собор - старейший храм России, построенный в середине XI века. \
                 Рядом с ним стояли монастырские медоварни."
            }
            Landmark::MillenniumMonument => {
                "Памятник «Тысячелетие России» открыт в 1862 году. Среди фигур найдите \
                 Рюрика: по легенде, с его приходом в Новгород началась история страны."
            }
            Landmark::YaroslavCourt => {
                "Ярославово дворище - древний торг на Торговой стороне. Здесь продавали \
                 хмель и солод со всей новгородской земли."
            }
        }
    }

    /// Where to go for a drink after visiting the place
    pub fn venue(self) -> &'static str {
        match self {
            Landmark::SpasskayaTower => "пивной ресторан у Кремлёвского парка",
            Landmark::SophiaCathedral => "медовуху в погребке на Софийской площади",
            Landmark::MillenniumMonument => "крафтовый бар на Лидовой улице",
            Landmark::YaroslavCourt => "пивоварню на Торговой стороне",
        }
    }

    /// Find the landmark an utterance talks about
    pub fn find_in(normalized: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|landmark| {
            mentions(normalized, landmark.title())
                || landmark.aliases().iter().any(|alias| mentions(normalized, alias))
        })
    }
}
