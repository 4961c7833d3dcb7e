use std::{
    collections::{BTreeSet, HashMap},
    fmt,
};

use serde::{Deserialize, Serialize};

use super::{Hero, HeroId};

/// Read-only access to the set of heroes a draft is played with.
///
/// Loading and refreshing the catalog is the job of whatever owns the data; the
/// drafting core only ever reads from it.
pub trait HeroCatalog: fmt::Debug + Send + Sync {
    /// All heroes, ordered by id.
    fn heroes(&self) -> &[Hero];

    fn hero(&self, id: HeroId) -> Option<&Hero> {
        self.heroes().iter().find(|hero| hero.id() == id)
    }

    /// Looks a hero up by internal or display name, ignoring ASCII case.
    fn hero_by_name(&self, name: &str) -> Option<&Hero> {
        self.heroes().iter().find(|hero| {
            hero.name().eq_ignore_ascii_case(name) || hero.display_name().eq_ignore_ascii_case(name)
        })
    }

    fn hero_ids(&self) -> BTreeSet<HeroId> {
        self.heroes().iter().map(Hero::id).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CatalogError {
    #[display("hero id {_0} appears more than once in the catalog")]
    DuplicateHeroId(#[error(not(source))] HeroId),
}

/// A catalog held entirely in memory.
///
/// Serializes as a plain JSON array of heroes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Hero>", into = "Vec<Hero>")]
pub struct InMemoryCatalog {
    heroes: Vec<Hero>,
    index: HashMap<HeroId, usize>,
}

impl InMemoryCatalog {
    pub fn new(mut heroes: Vec<Hero>) -> Result<Self, CatalogError> {
        heroes.sort_by_key(Hero::id);
        let mut index = HashMap::with_capacity(heroes.len());
        for (i, hero) in heroes.iter().enumerate() {
            if index.insert(hero.id(), i).is_some() {
                return Err(CatalogError::DuplicateHeroId(hero.id()));
            }
        }
        Ok(Self { heroes, index })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}

impl TryFrom<Vec<Hero>> for InMemoryCatalog {
    type Error = CatalogError;

    fn try_from(heroes: Vec<Hero>) -> Result<Self, Self::Error> {
        Self::new(heroes)
    }
}

impl From<InMemoryCatalog> for Vec<Hero> {
    fn from(catalog: InMemoryCatalog) -> Self {
        catalog.heroes
    }
}

impl HeroCatalog for InMemoryCatalog {
    fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    fn hero(&self, id: HeroId) -> Option<&Hero> {
        self.index.get(&id).map(|&i| &self.heroes[i])
    }
}
