use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::model::{CastMember, Movie, MovieDetails, MovieLinks};
use super::query::MovieQuery;
use super::repository::{MovieRepository, MovieSearch};
use crate::common::pagination::PageWindow;
use crate::infrastructure::db::memory::MemoryStore;
use crate::infrastructure::db::store::{Repository, StoreError};
use crate::modules::actor::model::Actor;
use crate::modules::cinema_room::model::CinemaRoom;
use crate::modules::genre::model::Genre;

/// Movie aggregate over the shared in-memory tables. Links to rows that were
/// deleted later are skipped on read, matching a cascading delete.
#[derive(Clone)]
pub struct MemoryMovieStore {
    movies: MemoryStore<Movie>,
    genres: MemoryStore<Genre>,
    actors: MemoryStore<Actor>,
    cinema_rooms: MemoryStore<CinemaRoom>,
    links: Arc<RwLock<HashMap<i64, MovieLinks>>>,
}

impl MemoryMovieStore {
    pub fn new(
        movies: MemoryStore<Movie>,
        genres: MemoryStore<Genre>,
        actors: MemoryStore<Actor>,
        cinema_rooms: MemoryStore<CinemaRoom>,
    ) -> Self {
        Self {
            movies,
            genres,
            actors,
            cinema_rooms,
            links: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Join records currently stored for `movie_id`.
    pub async fn links_of(&self, movie_id: i64) -> MovieLinks {
        self.links
            .read()
            .await
            .get(&movie_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn check_references(&self, links: &MovieLinks) -> Result<(), StoreError> {
        for link in &links.genres {
            if !self.genres.contains(link.genre_id).await {
                return Err(StoreError::ReferentialIntegrity(format!("genre {}", link.genre_id)));
            }
        }
        for link in &links.actors {
            if !self.actors.contains(link.actor_id).await {
                return Err(StoreError::ReferentialIntegrity(format!("actor {}", link.actor_id)));
            }
        }
        for link in &links.cinema_rooms {
            if !self.cinema_rooms.contains(link.cinema_room_id).await {
                return Err(StoreError::ReferentialIntegrity(format!(
                    "cinema room {}",
                    link.cinema_room_id
                )));
            }
        }
        Ok(())
    }

    async fn live_genre_ids(&self, links: &MovieLinks) -> Vec<i64> {
        let mut ids = Vec::new();
        for id in links.genre_ids() {
            if self.genres.contains(id).await {
                ids.push(id);
            }
        }
        ids
    }

    async fn details(&self, movie: Movie) -> Result<MovieDetails, StoreError> {
        let links = self.links_of(movie.id).await;

        let mut genres = Vec::new();
        for link in &links.genres {
            if let Some(genre) = self.genres.find(link.genre_id).await? {
                genres.push(genre);
            }
        }
        genres.sort_by_key(|g| g.id);

        let mut credits = links.actors.clone();
        credits.sort_by_key(|a| a.order);
        let mut cast = Vec::new();
        for credit in credits {
            if let Some(actor) = self.actors.find(credit.actor_id).await? {
                cast.push(CastMember {
                    actor_id: actor.id,
                    name: actor.name,
                    photo: actor.photo,
                    character: credit.character,
                    order: credit.order,
                });
            }
        }

        let mut cinema_room_ids = Vec::new();
        for link in &links.cinema_rooms {
            if self.cinema_rooms.contains(link.cinema_room_id).await {
                cinema_room_ids.push(link.cinema_room_id);
            }
        }
        cinema_room_ids.sort_unstable();

        Ok(MovieDetails {
            movie,
            genres,
            cast,
            cinema_room_ids,
        })
    }
}

#[async_trait]
impl Repository<Movie> for MemoryMovieStore {
    async fn count(&self) -> Result<i64, StoreError> {
        self.movies.count().await
    }

    async fn list(&self, window: Option<PageWindow>) -> Result<Vec<Movie>, StoreError> {
        self.movies.list(window).await
    }

    async fn find(&self, id: i64) -> Result<Option<Movie>, StoreError> {
        self.movies.find(id).await
    }

    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        self.movies.exists(id).await
    }

    async fn insert(&self, movie: Movie) -> Result<Movie, StoreError> {
        self.movies.insert(movie).await
    }

    async fn update(&self, movie: &Movie) -> Result<(), StoreError> {
        self.movies.update(movie).await
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.movies.delete(id).await?;
        self.links.write().await.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl MovieRepository for MemoryMovieStore {
    async fn search(&self, query: &MovieQuery) -> Result<MovieSearch, StoreError> {
        let mut matched = Vec::new();
        for movie in self.movies.snapshot().await {
            let links = self.links_of(movie.id).await;
            let genre_ids = self.live_genre_ids(&links).await;
            if query.matches(&movie, &genre_ids) {
                matched.push(movie);
            }
        }

        let total = matched.len() as i64;
        query.sort(&mut matched);
        let page = match query.window {
            Some(window) => window.slice(matched),
            None => matched,
        };

        let mut items = Vec::with_capacity(page.len());
        for movie in page {
            items.push(self.details(movie).await?);
        }
        Ok(MovieSearch { items, total })
    }

    async fn find_details(&self, id: i64) -> Result<Option<MovieDetails>, StoreError> {
        match self.movies.find(id).await? {
            Some(movie) => Ok(Some(self.details(movie).await?)),
            None => Ok(None),
        }
    }

    async fn create_with_links(&self, movie: Movie, links: MovieLinks) -> Result<Movie, StoreError> {
        self.check_references(&links).await?;

        let stored = self.movies.insert(movie).await?;
        self.links
            .write()
            .await
            .insert(stored.id, links.for_movie(stored.id));
        Ok(stored)
    }

    async fn replace_with_links(&self, movie: &Movie, links: MovieLinks) -> Result<(), StoreError> {
        self.check_references(&links).await?;

        self.movies.update(movie).await?;
        self.links
            .write()
            .await
            .insert(movie.id, links.for_movie(movie.id));
        Ok(())
    }
}
