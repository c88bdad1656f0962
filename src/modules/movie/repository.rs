use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::query_builder::Separated;
use sqlx::{FromRow, PgConnection, Postgres, QueryBuilder};

use super::model::{CastMember, Movie, MovieDetails, MovieLinks};
use super::query::MovieQuery;
use crate::infrastructure::db::postgres::{insert_row, push_window, update_row, PgStore, PgTable};
use crate::infrastructure::db::store::{Entity, Repository, StoreError};
use crate::modules::genre::model::Genre;

impl Entity for Movie {
    const NAME: &'static str = "Movie";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl PgTable for Movie {
    const TABLE: &'static str = "movies";
    const COLUMNS: &'static [&'static str] = &["title", "in_cinema", "release_date", "poster"];

    fn bind_columns<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.title.clone());
        values.push_bind(self.in_cinema);
        values.push_bind(self.release_date);
        values.push_bind(self.poster.clone());
    }
}

/// One page of search results and the match count before paging.
#[derive(Debug, Default)]
pub struct MovieSearch {
    pub items: Vec<MovieDetails>,
    pub total: i64,
}

/// The movie aggregate: rows plus their genre, cast and room links.
#[async_trait]
pub trait MovieRepository: Repository<Movie> {
    async fn search(&self, query: &MovieQuery) -> Result<MovieSearch, StoreError>;

    async fn find_details(&self, id: i64) -> Result<Option<MovieDetails>, StoreError>;

    /// Inserts the movie and its links atomically. Returns the stored row.
    async fn create_with_links(&self, movie: Movie, links: MovieLinks) -> Result<Movie, StoreError>;

    /// Overwrites the movie row and replaces all of its links atomically.
    async fn replace_with_links(&self, movie: &Movie, links: MovieLinks) -> Result<(), StoreError>;
}

#[derive(FromRow)]
struct GenreLinkRow {
    movie_id: i64,
    #[sqlx(flatten)]
    genre: Genre,
}

#[derive(FromRow)]
struct CastRow {
    movie_id: i64,
    #[sqlx(flatten)]
    member: CastMember,
}

impl PgStore {
    async fn load_details(&self, movies: Vec<Movie>) -> Result<Vec<MovieDetails>, StoreError> {
        if movies.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = movies.iter().map(|m| m.id).collect();

        let genre_rows = sqlx::query_as::<_, GenreLinkRow>(
            r#"
            SELECT mg.movie_id, g.id, g.name
            FROM movies_genres mg
            JOIN genres g ON g.id = mg.genre_id
            WHERE mg.movie_id = ANY($1)
            ORDER BY g.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let cast_rows = sqlx::query_as::<_, CastRow>(
            r#"
            SELECT ma.movie_id, ma.actor_id, a.name, a.photo, ma.character, ma.actor_order
            FROM movies_actors ma
            JOIN actors a ON a.id = ma.actor_id
            WHERE ma.movie_id = ANY($1)
            ORDER BY ma.actor_order
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let room_rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT movie_id, cinema_room_id
            FROM movies_cinema_rooms
            WHERE movie_id = ANY($1)
            ORDER BY cinema_room_id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut genres: HashMap<i64, Vec<Genre>> = HashMap::new();
        for row in genre_rows {
            genres.entry(row.movie_id).or_default().push(row.genre);
        }
        let mut cast: HashMap<i64, Vec<CastMember>> = HashMap::new();
        for row in cast_rows {
            cast.entry(row.movie_id).or_default().push(row.member);
        }
        let mut rooms: HashMap<i64, Vec<i64>> = HashMap::new();
        for (movie_id, room_id) in room_rows {
            rooms.entry(movie_id).or_default().push(room_id);
        }

        Ok(movies
            .into_iter()
            .map(|movie| MovieDetails {
                genres: genres.remove(&movie.id).unwrap_or_default(),
                cast: cast.remove(&movie.id).unwrap_or_default(),
                cinema_room_ids: rooms.remove(&movie.id).unwrap_or_default(),
                movie,
            })
            .collect())
    }
}

async fn insert_links(conn: &mut PgConnection, movie_id: i64, links: &MovieLinks) -> Result<(), sqlx::Error> {
    if !links.genres.is_empty() {
        let genre_ids: Vec<i64> = links.genres.iter().map(|g| g.genre_id).collect();
        sqlx::query(
            r#"
            INSERT INTO movies_genres (movie_id, genre_id)
            SELECT $1, unnest($2::bigint[])
            "#,
        )
        .bind(movie_id)
        .bind(&genre_ids)
        .execute(&mut *conn)
        .await?;
    }

    if !links.actors.is_empty() {
        let actor_ids: Vec<i64> = links.actors.iter().map(|a| a.actor_id).collect();
        let characters: Vec<String> = links.actors.iter().map(|a| a.character.clone()).collect();
        let orders: Vec<i32> = links.actors.iter().map(|a| a.order).collect();
        sqlx::query(
            r#"
            INSERT INTO movies_actors (movie_id, actor_id, character, actor_order)
            SELECT $1, t.actor_id, t.character, t.actor_order
            FROM unnest($2::bigint[], $3::text[], $4::int[]) AS t(actor_id, character, actor_order)
            "#,
        )
        .bind(movie_id)
        .bind(&actor_ids)
        .bind(&characters)
        .bind(&orders)
        .execute(&mut *conn)
        .await?;
    }

    if !links.cinema_rooms.is_empty() {
        let room_ids: Vec<i64> = links.cinema_rooms.iter().map(|r| r.cinema_room_id).collect();
        sqlx::query(
            r#"
            INSERT INTO movies_cinema_rooms (movie_id, cinema_room_id)
            SELECT $1, unnest($2::bigint[])
            "#,
        )
        .bind(movie_id)
        .bind(&room_ids)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

async fn clear_links(conn: &mut PgConnection, movie_id: i64) -> Result<(), sqlx::Error> {
    for table in ["movies_genres", "movies_actors", "movies_cinema_rooms"] {
        let sql = format!("DELETE FROM {table} WHERE movie_id = $1");
        sqlx::query(&sql).bind(movie_id).execute(&mut *conn).await?;
    }
    Ok(())
}

#[async_trait]
impl MovieRepository for PgStore {
    async fn search(&self, query: &MovieQuery) -> Result<MovieSearch, StoreError> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM movies m");
        query.push_conditions(&mut count_qb);
        let total: i64 = count_qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT m.* FROM movies m");
        query.push_conditions(&mut qb);
        query.push_order(&mut qb);
        push_window(&mut qb, query.window);
        let movies = qb.build_query_as::<Movie>().fetch_all(&self.pool).await?;

        Ok(MovieSearch {
            items: self.load_details(movies).await?,
            total,
        })
    }

    async fn find_details(&self, id: i64) -> Result<Option<MovieDetails>, StoreError> {
        let Some(movie) = Repository::<Movie>::find(self, id).await? else {
            return Ok(None);
        };
        Ok(self.load_details(vec![movie]).await?.pop())
    }

    async fn create_with_links(&self, movie: Movie, links: MovieLinks) -> Result<Movie, StoreError> {
        let mut tx = self.pool.begin().await?;

        let stored = insert_row(&mut *tx, &movie).await?;
        insert_links(&mut *tx, stored.id, &links).await?;

        tx.commit().await?;
        Ok(stored)
    }

    async fn replace_with_links(&self, movie: &Movie, links: MovieLinks) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        update_row(&mut *tx, movie).await?;
        clear_links(&mut *tx, movie.id).await?;
        insert_links(&mut *tx, movie.id, &links).await?;

        tx.commit().await?;
        Ok(())
    }
}
