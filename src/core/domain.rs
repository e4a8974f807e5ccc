use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;

pub const DEFAULT_LOG_FILTER: &str = "bookstore=info,catalog=info,tower_http=info";

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
}

// Configuration abstracts config options for the catalog service
#[derive(Debug, PartialEq, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub store: RepositoryStore,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub port: u16,
    pub log_filter: String,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            store: RepositoryStore::InMemory,
            database_url: None,
            max_connections: 5,
            port: 3000,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    pub fn from_env() -> LibraryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> LibraryResult<Self>
        where F: Fn(&str) -> Option<String> {
        let mut config = Configuration::new(
            lookup("BOOKSTORE_BRANCH").as_deref().unwrap_or("dev"));
        config.database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        config.store = match lookup("BOOKSTORE_STORE") {
            Some(store) => store.parse()?,
            None if config.database_url.is_some() => RepositoryStore::Postgres,
            None => RepositoryStore::InMemory,
        };
        if let Some(max) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = parse_number("DATABASE_MAX_CONNECTIONS", &max)?;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse_number("PORT", &port)?;
        }
        if let Some(filter) = lookup("RUST_LOG") {
            config.log_filter = filter;
        }
        if config.store == RepositoryStore::Postgres && config.database_url.is_none() {
            return Err(LibraryError::runtime(
                "DATABASE_URL is required for the postgres store", Some("configuration".to_string())));
        }
        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> LibraryResult<T> {
    value.trim().parse::<T>().map_err(|_| LibraryError::runtime(
        format!("invalid value {:?} for {}", value, key).as_str(), Some("configuration".to_string())))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::domain::{Configuration, DEFAULT_LOG_FILTER};
    use crate::core::library::LibraryError;
    use crate::core::repository::RepositoryStore;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!("test", config.branch_id.as_str());
        assert_eq!(RepositoryStore::InMemory, config.store);
        assert_eq!(3000, config.port);
        assert_eq!(5, config.max_connections);
        assert_eq!(DEFAULT_LOG_FILTER, config.log_filter.as_str());
        assert_eq!("0.0.0.0:3000", config.listen_addr());
    }

    #[tokio::test]
    async fn test_should_default_to_memory_without_database_url() {
        let config = Configuration::from_lookup(lookup(&[])).expect("should load config");
        assert_eq!("dev", config.branch_id.as_str());
        assert_eq!(RepositoryStore::InMemory, config.store);
    }

    #[tokio::test]
    async fn test_should_pick_postgres_with_database_url() {
        let config = Configuration::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/bookstore"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("PORT", "8080"),
            ("BOOKSTORE_BRANCH", "prod"),
        ])).expect("should load config");
        assert_eq!(RepositoryStore::Postgres, config.store);
        assert_eq!(Some("postgres://localhost/bookstore".to_string()), config.database_url);
        assert_eq!(12, config.max_connections);
        assert_eq!(8080, config.port);
        assert_eq!("prod", config.branch_id.as_str());
    }

    #[tokio::test]
    async fn test_should_reject_invalid_port() {
        let res = Configuration::from_lookup(lookup(&[("PORT", "eighty")]));
        assert!(matches!(res, Err(LibraryError::Runtime { .. })));
    }

    #[tokio::test]
    async fn test_should_require_url_for_postgres_store() {
        let res = Configuration::from_lookup(lookup(&[("BOOKSTORE_STORE", "postgres")]));
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn test_should_honor_explicit_memory_store() {
        let config = Configuration::from_lookup(lookup(&[
            ("BOOKSTORE_STORE", "memory"),
            ("DATABASE_URL", "postgres://localhost/bookstore"),
        ])).expect("should load config");
        assert_eq!(RepositoryStore::InMemory, config.store);
    }
}
