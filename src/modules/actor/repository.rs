use sqlx::query_builder::Separated;
use sqlx::Postgres;

use super::model::Actor;
use crate::infrastructure::db::postgres::PgTable;
use crate::infrastructure::db::store::Entity;

impl Entity for Actor {
    const NAME: &'static str = "Actor";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl PgTable for Actor {
    const TABLE: &'static str = "actors";
    const COLUMNS: &'static [&'static str] = &["name", "date_of_birth", "photo"];

    fn bind_columns<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.name.clone());
        values.push_bind(self.date_of_birth);
        values.push_bind(self.photo.clone());
    }
}
