//! Scene registry
//!
//! Maps the scene id persisted in the session state back to a scene. The
//! table is fixed at compile time; ids are checked for uniqueness when the
//! registry is built.

use std::collections::HashMap;
use tracing::{debug, warn};
use crate::places::Landmark;
use crate::utils::errors::{SkillError, Result};
use super::Scene;

/// Builds a fresh scene
pub type SceneConstructor = fn() -> Scene;

/// Every scene the dialog can be in
pub(super) const REGISTRATIONS: [SceneConstructor; 12] = [
    || Scene::Welcome,
    || Scene::HandleGeolocation,
    || Scene::StartTour,
    || Scene::Quest,
    || Scene::Quiz,
    || Scene::Advice,
    || Scene::UnknownActivity,
    || Scene::ActivityNotAllowed,
    || Scene::Place(Landmark::SpasskayaTower),
    || Scene::Place(Landmark::SophiaCathedral),
    || Scene::Place(Landmark::MillenniumMonument),
    || Scene::Place(Landmark::YaroslavCourt),
];

/// Lookup from persisted scene id to scene
#[derive(Debug, Clone)]
pub struct SceneRegistry {
    constructors: HashMap<&'static str, SceneConstructor>,
    default: SceneConstructor,
}

impl SceneRegistry {
    /// Registry over every scene, defaulting to the given id
    pub fn new(default_id: &str) -> Result<Self> {
        Self::from_table(&REGISTRATIONS, default_id)
    }

    /// Registry over a custom table
    pub fn from_table(table: &[SceneConstructor], default_id: &str) -> Result<Self> {
        let mut constructors = HashMap::with_capacity(table.len());

        for construct in table {
            let id = construct().id();
            if constructors.insert(id, *construct).is_some() {
                return Err(SkillError::DuplicateScene(id.to_string()));
            }
        }

        let default = *constructors
            .get(default_id)
            .ok_or_else(|| SkillError::UnknownScene(default_id.to_string()))?;

        debug!(scenes = constructors.len(), default = default_id, "Scene registry built");

        Ok(Self { constructors, default })
    }

    /// Scene for a persisted id; the default scene for unknown or missing ids
    pub fn resolve(&self, id: Option<&str>) -> Scene {
        let Some(id) = id else {
            return self.default_scene();
        };

        match self.constructors.get(id) {
            Some(construct) => construct(),
            None => {
                warn!(scene = id, "Unknown scene id in session state, using default scene");
                self.default_scene()
            }
        }
    }

    /// Scene for a persisted id, failing on unknown ids
    pub fn get(&self, id: &str) -> Result<Scene> {
        self.constructors
            .get(id)
            .map(|construct| construct())
            .ok_or_else(|| SkillError::UnknownScene(id.to_string()))
    }

    pub fn default_scene(&self) -> Scene {
        (self.default)()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}
