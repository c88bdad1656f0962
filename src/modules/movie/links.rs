//! Turns the identifier lists of a movie write into join records.

use std::collections::HashSet;

use super::model::{MovieActor, MovieCinemaRoom, MovieGenre, MovieLinks};
use crate::common::validation::FieldError;

/// One `{actorId, character}` entry of the submitted cast.
#[derive(Debug, Clone, PartialEq)]
pub struct Credit {
    pub actor_id: i64,
    pub character: String,
}

impl MovieLinks {
    /// Builds the join records for `movie_id`. Cast ordinals follow submission
    /// order starting at 0. Repeated genre or room ids collapse to one record;
    /// a repeated actor is rejected since its role would be ambiguous.
    pub fn build(
        movie_id: i64,
        genre_ids: &[i64],
        credits: &[Credit],
        cinema_room_ids: &[i64],
    ) -> Result<Self, Vec<FieldError>> {
        let mut seen = HashSet::new();
        let duplicates: Vec<i64> = credits
            .iter()
            .filter(|c| !seen.insert(c.actor_id))
            .map(|c| c.actor_id)
            .collect();
        if !duplicates.is_empty() {
            return Err(vec![FieldError::new(
                "actors",
                format!("Actors may appear only once; repeated ids: {duplicates:?}"),
            )]);
        }

        let genres = unique(genre_ids)
            .map(|genre_id| MovieGenre { movie_id, genre_id })
            .collect();

        let actors = credits
            .iter()
            .zip(0..)
            .map(|(credit, order)| MovieActor {
                movie_id,
                actor_id: credit.actor_id,
                character: credit.character.clone(),
                order,
            })
            .collect();

        let cinema_rooms = unique(cinema_room_ids)
            .map(|cinema_room_id| MovieCinemaRoom {
                movie_id,
                cinema_room_id,
            })
            .collect();

        Ok(Self {
            genres,
            actors,
            cinema_rooms,
        })
    }

    /// Points every record at `movie_id`, for links built before the movie had an id.
    pub fn for_movie(mut self, movie_id: i64) -> Self {
        self.genres.iter_mut().for_each(|g| g.movie_id = movie_id);
        self.actors.iter_mut().for_each(|a| a.movie_id = movie_id);
        self.cinema_rooms.iter_mut().for_each(|r| r.movie_id = movie_id);
        self
    }

    pub fn genre_ids(&self) -> Vec<i64> {
        self.genres.iter().map(|g| g.genre_id).collect()
    }
}

fn unique(ids: &[i64]) -> impl Iterator<Item = i64> + '_ {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(move |id| seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credit(actor_id: i64, character: &str) -> Credit {
        Credit {
            actor_id,
            character: character.into(),
        }
    }

    fn orders(links: &MovieLinks) -> Vec<(i64, i32)> {
        links.actors.iter().map(|a| (a.actor_id, a.order)).collect()
    }

    #[test]
    fn ordinals_follow_submission_order() {
        let links = MovieLinks::build(9, &[], &[credit(1, "Hero"), credit(2, "Villain")], &[]).unwrap();
        assert_eq!(orders(&links), vec![(1, 0), (2, 1)]);

        let reversed = MovieLinks::build(9, &[], &[credit(2, "Villain"), credit(1, "Hero")], &[]).unwrap();
        assert_eq!(orders(&reversed), vec![(2, 0), (1, 1)]);
    }

    #[test]
    fn ordinals_are_contiguous_from_zero() {
        let cast: Vec<_> = (10..15).map(|id| credit(id, "Extra")).collect();
        let links = MovieLinks::build(1, &[], &cast, &[]).unwrap();

        let ordinals: Vec<i32> = links.actors.iter().map(|a| a.order).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn repeated_genres_collapse() {
        let links = MovieLinks::build(3, &[4, 2, 4], &[], &[7, 7]).unwrap();
        assert_eq!(links.genre_ids(), vec![4, 2]);
        assert_eq!(links.cinema_rooms.len(), 1);
        assert!(links.genres.iter().all(|g| g.movie_id == 3));
    }

    #[test]
    fn repeated_actor_is_rejected() {
        let errors = MovieLinks::build(1, &[], &[credit(5, "A"), credit(5, "B")], &[]).unwrap_err();
        assert_eq!(errors[0].field, "actors");
    }

    #[test]
    fn for_movie_rewrites_owner() {
        let links = MovieLinks::build(0, &[1], &[credit(2, "Lead")], &[3]).unwrap().for_movie(42);
        assert_eq!(links.genres[0].movie_id, 42);
        assert_eq!(links.actors[0].movie_id, 42);
        assert_eq!(links.cinema_rooms[0].movie_id, 42);
    }
}
