use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::db::memory::MemoryStore;
use crate::infrastructure::db::pool::DbPool;
use crate::infrastructure::db::postgres::PgStore;
use crate::infrastructure::db::store::Repository;
use crate::infrastructure::storage::FileStorage;
use crate::modules::actor::model::Actor;
use crate::modules::cinema_room::model::CinemaRoom;
use crate::modules::genre::model::Genre;
use crate::modules::movie::memory::MemoryMovieStore;
use crate::modules::movie::repository::MovieRepository;
use crate::modules::review::memory::MemoryReviewStore;
use crate::modules::review::repository::ReviewRepository;

/// One handle per persisted collection.
#[derive(Clone)]
pub struct Repositories {
    pub genres: Arc<dyn Repository<Genre>>,
    pub actors: Arc<dyn Repository<Actor>>,
    pub cinema_rooms: Arc<dyn Repository<CinemaRoom>>,
    pub movies: Arc<dyn MovieRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl Repositories {
    pub fn postgres(pool: DbPool) -> Self {
        let store = PgStore::new(pool);
        Self {
            genres: Arc::new(store.clone()),
            actors: Arc::new(store.clone()),
            cinema_rooms: Arc::new(store.clone()),
            movies: Arc::new(store.clone()),
            reviews: Arc::new(store),
        }
    }

    /// Process-local tables sharing rows the way the database does, so movie
    /// links and reviews see the same genres, actors, rooms and movies.
    pub fn in_memory() -> Self {
        let genres = MemoryStore::<Genre>::new();
        let actors = MemoryStore::<Actor>::new();
        let cinema_rooms = MemoryStore::<CinemaRoom>::new();
        let movies = MemoryStore::new();

        let movie_store = MemoryMovieStore::new(
            movies.clone(),
            genres.clone(),
            actors.clone(),
            cinema_rooms.clone(),
        );
        let review_store = MemoryReviewStore::new(MemoryStore::new(), movies);

        Self {
            genres: Arc::new(genres),
            actors: Arc::new(actors),
            cinema_rooms: Arc::new(cinema_rooms),
            movies: Arc::new(movie_store),
            reviews: Arc::new(review_store),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub genres: Arc<dyn Repository<Genre>>,
    pub actors: Arc<dyn Repository<Actor>>,
    pub cinema_rooms: Arc<dyn Repository<CinemaRoom>>,
    pub movies: Arc<dyn MovieRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub storage: Arc<dyn FileStorage>,
}

impl AppState {
    pub fn new(config: AppConfig, repositories: Repositories, storage: Arc<dyn FileStorage>) -> Self {
        Self {
            config,
            genres: repositories.genres,
            actors: repositories.actors,
            cinema_rooms: repositories.cinema_rooms,
            movies: repositories.movies,
            reviews: repositories.reviews,
            storage,
        }
    }
}
