use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use entity::{event::PLACEHOLDERS, prelude::*};
use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use search::EventFilter;

use crate::active_models::{prelude::*, *};
use crate::response::{within, Response};

use self::event::Column;

#[derive(Clone, Debug)]
pub struct EventRepository {
    /// Shared handle; the mock connection used in tests is not `Clone`.
    db: Arc<DatabaseConnection>,
    timeout: Duration,
}

impl EventRepository {
    pub fn new(db: Arc<DatabaseConnection>, timeout: Duration) -> Self {
        Self { db, timeout }
    }
}

impl From<event::Model> for EventEntity {
    fn from(value: event::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            artist: value.artist,
            date: value.date,
            time: value.time,
            venue: value.venue,
            city: value.city,
            provincia: value.provincia,
            country: value.country,
            description: value.description,
            source_url: value.source_url,
            verified: value.verified,
            night_plan: value.night_plan,
        }
    }
}

impl EventRepository {
    /// Candidates for a search, ordered by date. Text matching and
    /// deduplication happen in [`search::select`].
    pub async fn find(
        &self,
        filter: &EventFilter,
    ) -> Response<Vec<EventEntity>> {
        let query = Event::find()
            .filter(filter_condition(filter))
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id);

        let events = within(self.timeout, "find", query.all(self.db.as_ref())).await?;

        Ok(events.into_iter().map(EventEntity::from).collect())
    }

    pub async fn count_upcoming(
        &self,
        today: NaiveDate,
        hide_incomplete: bool,
    ) -> Response<u64> {
        let query =
            Event::find().filter(upcoming_condition(today, hide_incomplete));

        within(self.timeout, "count upcoming", query.count(self.db.as_ref())).await
    }

    pub async fn find_by_id(&self, id: &str) -> Response<Option<EventEntity>> {
        let query = Event::find_by_id(id.to_string());

        let event =
            within(self.timeout, "find by id", query.one(self.db.as_ref())).await?;

        Ok(event.map(EventEntity::from))
    }

    /// Events whose city contains `destination`, in `[from, to]`.
    pub async fn find_in_city_between(
        &self,
        destination: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Response<Vec<EventEntity>> {
        let query = Event::find()
            .filter(contains_ci(Column::City, destination))
            .filter(Column::Date.between(from, to))
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id);

        let events =
            within(self.timeout, "find in city", query.all(self.db.as_ref())).await?;

        Ok(events.into_iter().map(EventEntity::from).collect())
    }

    /// Overwrites the cached night plan. Concurrent writers store the same
    /// kind of content, so the last one wins.
    pub async fn save_night_plan(
        &self,
        id: &str,
        content: &str,
    ) -> Response<()> {
        let update = Event::update_many()
            .col_expr(Column::NightPlan, Expr::value(content.to_string()))
            .filter(Column::Id.eq(id));

        within(self.timeout, "save night plan", update.exec(self.db.as_ref())).await?;

        Ok(())
    }
}

fn filter_condition(filter: &EventFilter) -> Condition {
    let mut condition = Condition::all().add(Column::Date.gte(filter.date_from));

    if let Some(date_to) = filter.date_to {
        condition = condition.add(Column::Date.lte(date_to));
    }

    for location in &filter.locations {
        condition = condition.add(
            Condition::any()
                .add(contains_ci(Column::City, location))
                .add(contains_ci(Column::Provincia, location)),
        );
    }

    for country in &filter.countries {
        condition =
            condition.add(lower(Column::Country).eq(country.to_lowercase()));
    }

    for artist in &filter.artists {
        condition = condition.add(contains_ci(Column::Artist, artist));
    }

    if filter.hide_incomplete {
        condition = condition.add(complete());
    }

    condition
}

fn upcoming_condition(today: NaiveDate, hide_incomplete: bool) -> Condition {
    let condition = Condition::all().add(Column::Date.gte(today));

    if hide_incomplete {
        condition.add(complete())
    } else {
        condition
    }
}

fn complete() -> Condition {
    [Column::Name, Column::Artist, Column::Time, Column::Venue]
        .into_iter()
        .fold(Condition::all(), |condition, column| {
            condition
                .add(column.is_not_null())
                .add(column.is_not_in(PLACEHOLDERS))
        })
}

fn lower(column: Column) -> Expr {
    Expr::expr(Func::lower(Expr::col(column)))
}

fn contains_ci(column: Column, needle: &str) -> SimpleExpr {
    lower(column).like(format!("%{}%", escape_like(&needle.to_lowercase())))
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use sea_orm::{
        DatabaseBackend, MockDatabase, MockExecResult, QueryTrait, Value,
    };
    use search::{plan, EventQuery, SearchConfig, SearchPlan};

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn filter(query: EventQuery) -> EventFilter {
        let config = SearchConfig::default();
        match plan(&query, date("2025-08-01"), &config).unwrap() {
            SearchPlan::Run(filter) => filter,
            SearchPlan::Clarify(c) => panic!("unexpected clarification: {c:?}"),
        }
    }

    fn sql(condition: Condition) -> String {
        Event::find()
            .filter(condition)
            .build(DatabaseBackend::Postgres)
            .to_string()
    }

    fn model(id: &str, day: &str) -> event::Model {
        event::Model {
            id: id.to_string(),
            name: Some("Gala flamenca".to_string()),
            artist: Some("Mayte".to_string()),
            date: date(day),
            time: Some("21:00".to_string()),
            venue: Some("Teatro Lope de Vega".to_string()),
            city: Some("Triana".to_string()),
            provincia: Some("Sevilla".to_string()),
            source_url: Some("http://x".to_string()),
            verified: true,
            ..Default::default()
        }
    }

    fn repository(db: MockDatabase) -> EventRepository {
        EventRepository::new(
            Arc::new(db.into_connection()),
            Duration::from_secs(1),
        )
    }

    #[test]
    fn test_city_matches_city_or_provincia() {
        // Arrange
        let filter = filter(EventQuery {
            city: Some("Sevilla".to_string()),
            ..Default::default()
        });

        // Act
        let sql = sql(filter_condition(&filter));

        // Assert
        assert!(sql.contains(r#"LOWER("city") LIKE '%sevilla%'"#), "{sql}");
        assert!(sql.contains(r#"LOWER("provincia") LIKE '%sevilla%'"#));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn test_date_range_and_country() {
        let filter = filter(EventQuery {
            country: Some("España".to_string()),
            timeframe: Some("week".to_string()),
            ..Default::default()
        });

        let sql = sql(filter_condition(&filter));

        assert!(sql.contains(r#""date" >= '2025-08-01'"#), "{sql}");
        assert!(sql.contains(r#""date" <= '2025-08-08'"#));
        assert!(sql.contains(r#"LOWER("country") = 'españa'"#));
    }

    #[test]
    fn test_incomplete_records_are_excluded() {
        let sql = sql(upcoming_condition(date("2025-08-01"), true));

        assert!(sql.contains(r#""venue" IS NOT NULL"#), "{sql}");
        assert!(sql.contains(r#""name" NOT IN ('', 'N/A')"#));
    }

    #[test]
    fn test_count_condition_can_include_incomplete() {
        let sql = sql(upcoming_condition(date("2025-08-01"), false));

        assert!(sql.contains(r#""date" >= '2025-08-01'"#), "{sql}");
        assert!(!sql.contains("N/A"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%_real\\"), "100\\%\\_real\\\\");
        assert_eq!(escape_like("Jerez"), "Jerez");
    }

    #[tokio::test]
    async fn test_find_maps_rows() {
        // Arrange
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                model("a", "2025-08-05"),
                model("b", "2025-08-06"),
            ]]);
        let repository = repository(db);

        // Act
        let events = repository
            .find(&filter(EventQuery::default()))
            .await
            .unwrap();

        // Assert
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "a");
        assert_eq!(events[0].provincia.as_deref(), Some("Sevilla"));
        assert!(events[0].verified);
        assert!(events[0].has_source());
    }

    #[tokio::test]
    async fn test_count_upcoming() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(3)),
            )])]]);
        let repository = repository(db);

        let total = repository
            .count_upcoming(date("2025-08-01"), true)
            .await
            .unwrap();

        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<event::Model>::new()]);
        let repository = repository(db);

        let event = repository.find_by_id("missing").await.unwrap();

        assert!(event.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_one_connection() {
        // Arrange
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model("a", "2025-08-05")]])
            .append_query_results([vec![model("b", "2025-08-06")]]);
        let repository = repository(db);
        let clone = repository.clone();

        // Act
        let first = repository.find_by_id("a").await.unwrap();
        let second = clone.find_by_id("b").await.unwrap();

        // Assert
        assert_eq!(first.map(|event| event.id).as_deref(), Some("a"));
        assert_eq!(second.map(|event| event.id).as_deref(), Some("b"));
        assert!(Arc::ptr_eq(&repository.db, &clone.db));
    }

    #[tokio::test]
    async fn test_save_night_plan() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]);
        let repository = repository(db);

        let result = repository.save_night_plan("a", "## Plan").await;

        assert!(result.is_ok());
    }
}
