pub mod cache;
pub mod config;
pub mod movie;
pub mod remote;
pub mod repository;
pub mod search;
pub mod testing;

pub use cache::{CacheEntry, CacheError, CacheStats, MovieCache, SqliteMovieCache};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use movie::{Movie, MovieDetails, MovieKind, MovieSearchResult};
pub use remote::{MovieSource, OmdbClient, OmdbConfig, RemoteError};
pub use repository::MovieRepository;
pub use search::{
    PageFooter, SearchFailure, SearchPhase, SearchResults, SearchSession, SearchViewState,
};
