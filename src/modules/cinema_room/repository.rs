use sqlx::query_builder::Separated;
use sqlx::Postgres;

use super::model::CinemaRoom;
use crate::infrastructure::db::postgres::PgTable;
use crate::infrastructure::db::store::Entity;

impl Entity for CinemaRoom {
    const NAME: &'static str = "Cinema room";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl PgTable for CinemaRoom {
    const TABLE: &'static str = "cinema_rooms";
    const COLUMNS: &'static [&'static str] = &["name", "latitude", "longitude"];

    fn bind_columns<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.name.clone());
        values.push_bind(self.latitude);
        values.push_bind(self.longitude);
    }
}
