//! Table management board

use tracing::{error, info, warn};

use crate::api::{BookingRequest, NewTable, SeatingApi};
use crate::model::{Booking, Person, Table, DEFAULT_TABLE_CAPACITY};
use crate::{Error, Result};

use super::SyncPolicy;

/// Every table of the event, as the admin sees them
#[derive(Debug, Clone)]
pub struct TableBoard {
    tables: Vec<Table>,
    sync: SyncPolicy,
}

impl TableBoard {
    pub fn new(tables: Vec<Table>) -> Self {
        Self {
            tables,
            sync: SyncPolicy::default(),
        }
    }

    /// Fetch every table
    pub async fn load(api: &dyn SeatingApi) -> Result<Self> {
        let tables = api.load_tables().await.map_err(|e| {
            error!("Loading tables failed: {}", e);
            e
        })?;
        Ok(Self::new(tables))
    }

    /// Set the sync policy
    pub fn with_sync(mut self, sync: SyncPolicy) -> Self {
        self.sync = sync;
        self
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn find(&self, table_id: i64) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub fn find_by_number(&self, number: u32) -> Option<&Table> {
        self.tables.iter().find(|t| t.number == number)
    }

    /// Create a table and add it to the board
    pub async fn create(&mut self, api: &dyn SeatingApi, number: u32, name: &str) -> Result<Table> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("a table name is required".to_string()));
        }

        let request = NewTable {
            number,
            name: name.to_string(),
        };
        let created = api.create_table(&request).await.map_err(|e| {
            error!("Creating table {} failed: {}", number, e);
            e
        })?;

        let table = match (self.sync, created.id) {
            (SyncPolicy::PatchLocal, Some(id)) => {
                let table = Table {
                    id,
                    number: created
                        .number
                        .and_then(|n| u32::try_from(n).ok())
                        .unwrap_or(number),
                    name: created.name.unwrap_or(request.name),
                    seats_number: created
                        .seats_number
                        .and_then(|n| u32::try_from(n).ok())
                        .unwrap_or(DEFAULT_TABLE_CAPACITY),
                    total_seats_booked: 0,
                };
                self.tables.push(table.clone());
                table
            }
            _ => {
                // No id in the response: only the API knows it
                self.refresh(api).await?;
                self.find_by_number(number).cloned().ok_or_else(|| {
                    Error::NotFound(format!("table {} after creation", number))
                })?
            }
        };

        info!("Created table {} ({})", table.number, table.name);
        Ok(table)
    }

    /// Reservations that deleting a table would affect
    pub async fn impacted_bookings(&self, api: &dyn SeatingApi, table_id: i64) -> Result<Vec<Booking>> {
        api.bookings_by_table(table_id).await.map_err(|e| {
            error!("Loading reservations of table {} failed: {}", table_id, e);
            e
        })
    }

    /// Delete a table
    pub async fn delete(&mut self, api: &dyn SeatingApi, table_id: i64) -> Result<()> {
        if let Err(e) = api.delete_table(table_id).await {
            error!("Deleting table {} failed: {}", table_id, e);
            return Err(e);
        }

        match self.sync {
            SyncPolicy::PatchLocal => self.tables.retain(|t| t.id != table_id),
            SyncPolicy::Refetch => self.refresh(api).await?,
        }
        info!("Deleted table {}", table_id);
        Ok(())
    }

    /// Take a table out of the catalog by booking its remaining seats for the admin
    pub async fn disable(&mut self, api: &dyn SeatingApi, admin: &Person, table_id: i64) -> Result<()> {
        let table = self
            .find(table_id)
            .ok_or_else(|| Error::NotFound(format!("table {}", table_id)))?;
        if table.is_full() {
            warn!("Table {} is already full", table.number);
            return Err(Error::InvalidInput(format!(
                "table {} is already unavailable",
                table.number
            )));
        }

        let request = BookingRequest {
            table_id,
            person_id: admin.id,
        };
        if let Err(e) = api.create_booking(&request).await {
            error!("Disabling table {} failed: {}", table_id, e);
            return Err(e);
        }

        match self.sync {
            SyncPolicy::PatchLocal => {
                if let Some(table) = self.tables.iter_mut().find(|t| t.id == table_id) {
                    table.total_seats_booked = table.seats_number;
                }
            }
            SyncPolicy::Refetch => self.refresh(api).await?,
        }
        info!("Disabled table {}", table_id);
        Ok(())
    }

    async fn refresh(&mut self, api: &dyn SeatingApi) -> Result<()> {
        self.tables = api.load_tables().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CreatedTable;
    use crate::testing::{admin, FakeApi};

    fn sample() -> Vec<Table> {
        vec![
            Table::new(10, 1, "Lilas").with_booked(4),
            Table::new(11, 2, "Roses").with_booked(10),
        ]
    }

    #[tokio::test]
    async fn test_load() {
        let api = FakeApi::new().with_tables(sample());
        let board = TableBoard::load(&api).await.unwrap();
        assert_eq!(board.tables().len(), 2);
        assert_eq!(board.find_by_number(2).unwrap().id, 11);
    }

    #[tokio::test]
    async fn test_create_appends_table() {
        let api = FakeApi::new().with_tables(sample());
        let mut board = TableBoard::new(sample());

        let table = board.create(&api, 3, "  Tulipes ").await.unwrap();

        assert_eq!(table.number, 3);
        assert_eq!(table.name, "Tulipes");
        assert_eq!(table.seats_number, DEFAULT_TABLE_CAPACITY);
        assert_eq!(table.total_seats_booked, 0);
        assert_eq!(board.tables().len(), 3);
        assert_eq!(api.call_count("load_tables"), 0);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let api = FakeApi::new();
        let mut board = TableBoard::new(Vec::new());
        assert!(matches!(
            board.create(&api, 3, " ").await,
            Err(Error::InvalidInput(_))
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_refetch() {
        let api = FakeApi::new().with_tables(sample());
        let mut board = TableBoard::new(sample()).with_sync(SyncPolicy::Refetch);

        let table = board.create(&api, 3, "Tulipes").await.unwrap();
        assert_eq!(table.number, 3);
        assert_eq!(board.tables().len(), 3);
        assert_eq!(api.call_count("load_tables"), 1);
    }

    #[tokio::test]
    async fn test_create_without_id_in_response_refetches() {
        struct NoIdApi(FakeApi);

        #[async_trait::async_trait]
        impl SeatingApi for NoIdApi {
            async fn log_in(&self, c: &crate::api::Credentials) -> Result<crate::api::LoginResponse> {
                self.0.log_in(c).await
            }
            async fn load_tables(&self) -> Result<Vec<Table>> {
                self.0.load_tables().await
            }
            async fn create_table(&self, table: &NewTable) -> Result<CreatedTable> {
                self.0.create_table(table).await?;
                Ok(CreatedTable::default())
            }
            async fn delete_table(&self, id: i64) -> Result<()> {
                self.0.delete_table(id).await
            }
            async fn load_bookings(&self) -> Result<Vec<Booking>> {
                self.0.load_bookings().await
            }
            async fn bookings_by_person(&self, id: i64) -> Result<Vec<Booking>> {
                self.0.bookings_by_person(id).await
            }
            async fn bookings_by_table(&self, id: i64) -> Result<Vec<Booking>> {
                self.0.bookings_by_table(id).await
            }
            async fn create_booking(&self, r: &BookingRequest) -> Result<()> {
                self.0.create_booking(r).await
            }
            async fn update_booking(&self, id: i64, u: &crate::api::BookingUpdate) -> Result<()> {
                self.0.update_booking(id, u).await
            }
            async fn delete_bookings_for_person(&self, id: i64) -> Result<()> {
                self.0.delete_bookings_for_person(id).await
            }
            async fn send_recap_mail(&self) -> Result<()> {
                self.0.send_recap_mail().await
            }
            async fn send_mail(&self, m: &crate::api::MailMessage) -> Result<()> {
                self.0.send_mail(m).await
            }
        }

        let api = NoIdApi(FakeApi::new().with_tables(sample()));
        let mut board = TableBoard::new(sample());

        let table = board.create(&api, 3, "Tulipes").await.unwrap();
        assert_eq!(table.number, 3);
        assert!(table.id >= 100);
        assert_eq!(api.0.call_count("load_tables"), 1);
    }

    #[tokio::test]
    async fn test_impacted_bookings_then_delete() {
        let api = FakeApi::new()
            .with_tables(sample())
            .with_bookings(vec![
                Booking::new(1, 7, 10, 2).with_person("Jeanne", "Dupont"),
                Booking::new(2, 8, 11, 4).with_person("Paul", "Martin"),
            ]);
        let mut board = TableBoard::new(sample());

        let impacted = board.impacted_bookings(&api, 10).await.unwrap();
        assert_eq!(impacted.len(), 1);
        assert_eq!(impacted[0].last_name(), "Dupont");

        board.delete(&api, 10).await.unwrap();
        assert!(board.find(10).is_none());
        assert_eq!(board.tables().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_table() {
        let api = FakeApi::new();
        api.fail("delete_table");
        let mut board = TableBoard::new(sample());

        assert!(board.delete(&api, 10).await.is_err());
        assert!(board.find(10).is_some());
    }

    #[tokio::test]
    async fn test_disable_books_table_for_admin() {
        let api = FakeApi::new();
        let mut board = TableBoard::new(sample());

        board.disable(&api, &admin(1), 10).await.unwrap();

        assert!(board.find(10).unwrap().is_full());
        let bookings = api.bookings.lock().unwrap().clone();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].person_id(), Some(1));
        assert_eq!(bookings[0].table_id(), Some(10));
    }

    #[tokio::test]
    async fn test_disable_refuses_full_table() {
        let api = FakeApi::new();
        let mut board = TableBoard::new(sample());

        assert!(matches!(
            board.disable(&api, &admin(1), 11).await,
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            board.disable(&api, &admin(1), 99).await,
            Err(Error::NotFound(_))
        ));
        assert!(api.calls().is_empty());
    }
}
