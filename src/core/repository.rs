use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use async_trait::async_trait;
use crate::core::library::{LibraryError, LibraryResult};

#[async_trait]
pub trait Repository<Entity, Patch, Filter>: Sync + Send {
    // create an entity and return it as stored
    async fn create(&self, entity: &Entity) -> LibraryResult<Entity>;

    // apply the supplied fields of a patch and return the full entity
    async fn update(&self, id: &str, patch: &Patch) -> LibraryResult<Entity>;

    // get an entity
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> LibraryResult<usize>;

    // find all entities matching the predicate
    async fn query(&self, predicate: &Filter) -> LibraryResult<Vec<Entity>>;
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RepositoryStore {
    Postgres,
    InMemory,
}

impl FromStr for RepositoryStore {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(RepositoryStore::Postgres),
            "memory" | "in-memory" => Ok(RepositoryStore::InMemory),
            other => Err(LibraryError::runtime(
                format!("unknown repository store {:?}", other).as_str(), Some("configuration".to_string()))),
        }
    }
}

impl Display for RepositoryStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RepositoryStore::Postgres => write!(f, "postgres"),
            RepositoryStore::InMemory => write!(f, "memory"),
        }
    }
}
