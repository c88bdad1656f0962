//! Runtime movie search: free-form filter parameters in, a checked query out.
//! Order-by names go through an allow-list; nothing from the caller is ever
//! spliced into SQL text.

use std::cmp::Ordering;

use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};
use time::Date;
use tracing::warn;
use utoipa::IntoParams;

use super::model::Movie;
use crate::common::pagination::{
    PageWindow, PaginationQuery, DEFAULT_ELEMENTS_PER_PAGE, DEFAULT_PAGE,
};

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MoviesFilter {
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size, capped at 50. Zero or less disables paging.
    #[serde(default = "default_elements_per_page")]
    pub elements_per_page: i64,
    /// Substring of the title, case-insensitive
    pub title: Option<String>,
    /// Only movies currently showing
    #[serde(default)]
    pub in_cinema: bool,
    /// Only movies released after today
    #[serde(default)]
    pub next_premiers: bool,
    /// Only movies linked to this genre; 0 means any
    #[serde(default)]
    pub genre_id: i64,
    /// id, title, inCinema or releaseDate
    pub order_by: Option<String>,
    /// asc (default) or desc
    pub order_type: Option<String>,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_elements_per_page() -> i64 {
    DEFAULT_ELEMENTS_PER_PAGE
}

impl Default for MoviesFilter {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            elements_per_page: DEFAULT_ELEMENTS_PER_PAGE,
            title: None,
            in_cinema: false,
            next_premiers: false,
            genre_id: 0,
            order_by: None,
            order_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Anything other than a descending token sorts ascending.
    pub fn parse(token: Option<&str>) -> Self {
        match token.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("desc" | "descending") => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Movie fields a caller may order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieSortField {
    Id,
    Title,
    InCinema,
    ReleaseDate,
}

impl MovieSortField {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "incinema" | "in_cinema" => Some(Self::InCinema),
            "releasedate" | "release_date" => Some(Self::ReleaseDate),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Id => "m.id",
            Self::Title => "m.title",
            Self::InCinema => "m.in_cinema",
            Self::ReleaseDate => "m.release_date",
        }
    }

    fn compare(self, a: &Movie, b: &Movie) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Title => a.title.cmp(&b.title),
            Self::InCinema => a.in_cinema.cmp(&b.in_cinema),
            Self::ReleaseDate => a.release_date.cmp(&b.release_date),
        }
    }
}

/// A validated search. Predicates combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieQuery {
    pub title: Option<String>,
    pub in_cinema: bool,
    pub released_after: Option<Date>,
    pub genre_id: Option<i64>,
    pub order: Option<(MovieSortField, SortDirection)>,
    pub window: Option<PageWindow>,
    /// Order-by name that was not on the allow-list and got dropped.
    pub rejected_order_field: Option<String>,
}

impl MovieQuery {
    pub fn compose(filter: &MoviesFilter, today: Date) -> Self {
        let mut query = Self {
            title: filter
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            in_cinema: filter.in_cinema,
            released_after: filter.next_premiers.then_some(today),
            genre_id: (filter.genre_id != 0).then_some(filter.genre_id),
            window: PaginationQuery::new(filter.page, filter.elements_per_page).window(),
            ..Self::default()
        };

        if let Some(name) = filter.order_by.as_deref().filter(|n| !n.trim().is_empty()) {
            match MovieSortField::parse(name) {
                Some(field) => {
                    query.order = Some((field, SortDirection::parse(filter.order_type.as_deref())));
                }
                None => {
                    warn!(order_by = %name, "Order by field not found; returning results unordered");
                    query.rejected_order_field = Some(name.to_string());
                }
            }
        }

        query
    }

    /// Every movie, one page at a time, in store order.
    pub fn page(pagination: PaginationQuery) -> Self {
        Self {
            window: pagination.normalized().window(),
            ..Self::default()
        }
    }

    pub fn showing(limit: i64) -> Self {
        Self {
            in_cinema: true,
            window: Some(PageWindow::first(limit)),
            ..Self::default()
        }
    }

    pub fn premiering_after(today: Date, limit: i64) -> Self {
        Self {
            released_after: Some(today),
            window: Some(PageWindow::first(limit)),
            ..Self::default()
        }
    }

    /// In-memory form of the WHERE clause. `genre_ids` are the movie's linked genres.
    pub fn matches(&self, movie: &Movie, genre_ids: &[i64]) -> bool {
        if let Some(title) = &self.title {
            if !movie.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }
        if self.in_cinema && !movie.in_cinema {
            return false;
        }
        if let Some(date) = self.released_after {
            if movie.release_date <= date {
                return false;
            }
        }
        if let Some(genre_id) = self.genre_id {
            if !genre_ids.contains(&genre_id) {
                return false;
            }
        }
        true
    }

    /// In-memory form of the ORDER BY clause. Rows without an order keep
    /// their store order.
    pub fn sort(&self, rows: &mut [Movie]) {
        if let Some((field, direction)) = self.order {
            rows.sort_by(|a, b| {
                let ord = field.compare(a, b);
                let ord = match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                };
                ord.then(a.id.cmp(&b.id))
            });
        }
    }

    /// Appends the WHERE clause for a query over `movies m`.
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut keyword = " WHERE ";

        if let Some(title) = &self.title {
            qb.push(keyword)
                .push("m.title ILIKE ")
                .push_bind(format!("%{}%", escape_like(title)));
            keyword = " AND ";
        }
        if self.in_cinema {
            qb.push(keyword).push("m.in_cinema = TRUE");
            keyword = " AND ";
        }
        if let Some(date) = self.released_after {
            qb.push(keyword).push("m.release_date > ").push_bind(date);
            keyword = " AND ";
        }
        if let Some(genre_id) = self.genre_id {
            qb.push(keyword)
                .push("EXISTS (SELECT 1 FROM movies_genres mg WHERE mg.movie_id = m.id AND mg.genre_id = ")
                .push_bind(genre_id)
                .push(")");
        }
    }

    pub fn push_order(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self.order {
            Some((field, direction)) => {
                qb.push(" ORDER BY ")
                    .push(field.column())
                    .push(" ")
                    .push(direction.keyword())
                    .push(", m.id");
            }
            None => {
                qb.push(" ORDER BY m.id");
            }
        }
    }
}

fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 06 - 01);

    fn movie(id: i64, title: &str, in_cinema: bool, release_date: Date) -> Movie {
        Movie {
            id,
            title: title.into(),
            in_cinema,
            release_date,
            poster: None,
        }
    }

    fn filter() -> MoviesFilter {
        MoviesFilter::default()
    }

    #[test]
    fn empty_filter_only_pages() {
        let query = MovieQuery::compose(&filter(), TODAY);
        assert_eq!(query.window, Some(PageWindow { offset: 0, limit: 10 }));
        assert_eq!(query.order, None);
        assert!(query.matches(&movie(1, "Alien", false, TODAY), &[]));
    }

    #[test]
    fn page_size_is_clamped_and_zero_disables_paging() {
        let mut f = filter();
        f.elements_per_page = 500;
        f.page = 3;
        let query = MovieQuery::compose(&f, TODAY);
        assert_eq!(query.window, Some(PageWindow { offset: 100, limit: 50 }));

        f.elements_per_page = 0;
        assert_eq!(MovieQuery::compose(&f, TODAY).window, None);
    }

    #[test]
    fn predicates_combine() {
        let mut f = filter();
        f.title = Some("ali".into());
        f.in_cinema = true;
        f.next_premiers = true;
        f.genre_id = 4;
        let query = MovieQuery::compose(&f, TODAY);

        let future = date!(2024 - 12 - 25);
        assert!(query.matches(&movie(1, "Alien Romulus", true, future), &[2, 4]));
        assert!(!query.matches(&movie(2, "Alien Romulus", false, future), &[4]));
        assert!(!query.matches(&movie(3, "Alien Romulus", true, TODAY), &[4]));
        assert!(!query.matches(&movie(4, "Alien Romulus", true, future), &[2]));
        assert!(!query.matches(&movie(5, "Heat", true, future), &[4]));
    }

    #[test]
    fn unknown_order_field_is_dropped() {
        let mut f = filter();
        f.order_by = Some("nonexistentField".into());
        let query = MovieQuery::compose(&f, TODAY);

        assert_eq!(query.order, None);
        assert_eq!(query.rejected_order_field.as_deref(), Some("nonexistentField"));
    }

    #[test]
    fn direction_defaults_to_ascending() {
        assert_eq!(SortDirection::parse(None), SortDirection::Ascending);
        assert_eq!(SortDirection::parse(Some("sideways")), SortDirection::Ascending);
        assert_eq!(SortDirection::parse(Some("DESC")), SortDirection::Descending);
        assert_eq!(SortDirection::parse(Some("descending")), SortDirection::Descending);
    }

    #[test]
    fn sorts_by_allowed_field() {
        let mut f = filter();
        f.order_by = Some("releaseDate".into());
        f.order_type = Some("desc".into());
        let query = MovieQuery::compose(&f, TODAY);

        let mut rows = vec![
            movie(1, "A", false, date!(2001 - 01 - 01)),
            movie(2, "B", false, date!(2010 - 01 - 01)),
            movie(3, "C", false, date!(2005 - 01 - 01)),
        ];
        query.sort(&mut rows);
        let ids: Vec<i64> = rows.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn unordered_sort_keeps_store_order() {
        let mut rows = vec![movie(2, "B", false, TODAY), movie(1, "A", false, TODAY)];
        MovieQuery::default().sort(&mut rows);
        assert_eq!(rows[0].id, 2);
    }

    #[test]
    fn sql_binds_caller_values() {
        let mut f = filter();
        f.title = Some("50%_off".into());
        f.genre_id = 2;
        f.order_by = Some("title".into());
        let query = MovieQuery::compose(&f, TODAY);

        let mut qb = QueryBuilder::<Postgres>::new("SELECT m.* FROM movies m");
        query.push_conditions(&mut qb);
        query.push_order(&mut qb);
        let sql = qb.sql();

        assert!(sql.contains("m.title ILIKE $1"));
        assert!(sql.contains("mg.genre_id = $2"));
        assert!(sql.ends_with("ORDER BY m.title ASC, m.id"));
        assert!(!sql.contains("50%"));
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
    }
}
