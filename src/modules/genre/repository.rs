use sqlx::query_builder::Separated;
use sqlx::Postgres;

use super::model::Genre;
use crate::infrastructure::db::postgres::PgTable;
use crate::infrastructure::db::store::Entity;

impl Entity for Genre {
    const NAME: &'static str = "Genre";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl PgTable for Genre {
    const TABLE: &'static str = "genres";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn bind_columns<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.name.clone());
    }
}
