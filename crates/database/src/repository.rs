use crate::error::DbError;
use crate::store::LedgerStore;
use core_types::{ClientId, ClientRecord, Expense, Investment, Sale, Yield};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Changes an administrator can make to a client's account. `None` keeps the
/// current value.
#[derive(Debug, Clone, Default)]
pub struct ClientUpdate {
    pub business_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// The `ClientRepository` owns every client record and is the only thing that
/// mutates them.
///
/// Reads hand out shared references. Writes are copy-on-write: the affected
/// record is cloned, the clone is changed, and it replaces the original only
/// once the whole map has been written back to the store. The last write wins.
#[derive(Debug)]
pub struct ClientRepository<S: LedgerStore> {
    store: S,
    key: String,
    clients: BTreeMap<ClientId, ClientRecord>,
}

impl<S: LedgerStore> ClientRepository<S> {
    /// Reads the client map stored under `key`.
    ///
    /// A missing key yields the default dataset. So does a value that does not
    /// parse, after logging a warning; the corrupt value is overwritten by the
    /// next mutation.
    pub fn load(store: S, key: impl Into<String>) -> Result<Self, DbError> {
        let key = key.into();
        let clients = match store.get(&key)? {
            Some(raw) => match serde_json::from_str::<BTreeMap<ClientId, ClientRecord>>(&raw) {
                Ok(clients) => clients,
                Err(e) => {
                    tracing::warn!(error = %e, key = %key, "Stored ledger is corrupt, loading the default dataset.");
                    default_clients()
                }
            },
            None => {
                tracing::info!(key = %key, "No stored ledger found, starting from the default dataset.");
                default_clients()
            }
        };

        Ok(Self { store, key, clients })
    }

    pub fn clients(&self) -> impl Iterator<Item = &ClientRecord> {
        self.clients.values()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn get(&self, client_id: &str) -> Option<&ClientRecord> {
        self.clients.get(client_id)
    }

    pub fn require(&self, client_id: &str) -> Result<&ClientRecord, DbError> {
        self.get(client_id)
            .ok_or_else(|| DbError::ClientNotFound(client_id.to_string()))
    }

    /// The first client whose username and password both match exactly.
    pub fn find_by_credentials(&self, username: &str, password: &str) -> Option<&ClientRecord> {
        self.clients
            .values()
            .find(|c| c.username == username && c.password == password)
    }

    // --- Clients ---

    /// Registers a new client with an empty ledger and returns its id.
    pub fn add_client(
        &mut self,
        business_name: &str,
        username: &str,
        password: &str,
    ) -> Result<ClientId, DbError> {
        self.ensure_username_free(username, None)?;

        let id = format!("client-{}", Uuid::new_v4().simple());
        let record = ClientRecord::new(id.clone(), business_name, username, password);
        self.commit(record)?;

        tracing::info!(client_id = %id, business = %business_name, "Client added.");
        Ok(id)
    }

    pub fn update_client(&mut self, client_id: &str, changes: ClientUpdate) -> Result<(), DbError> {
        if let Some(username) = &changes.username {
            self.ensure_username_free(username, Some(client_id))?;
        }
        self.update(client_id, |record| {
            if let Some(name) = changes.business_name {
                record.business_name = name;
            }
            if let Some(username) = changes.username {
                record.username = username;
            }
            if let Some(password) = changes.password {
                record.password = password;
            }
            Ok(())
        })
    }

    /// Removes a client and its entire ledger, returning the removed record.
    pub fn delete_client(&mut self, client_id: &str) -> Result<ClientRecord, DbError> {
        let removed = self
            .clients
            .remove(client_id)
            .ok_or_else(|| DbError::ClientNotFound(client_id.to_string()))?;

        if let Err(e) = self.persist() {
            self.clients.insert(removed.id.clone(), removed);
            return Err(e);
        }

        tracing::info!(client_id = %client_id, "Client deleted.");
        Ok(removed)
    }

    // --- Ledger records ---

    /// Appends a sale. Rejected when its revenue or variable cost, or the
    /// client's totals with it, no longer fit in a `Decimal`.
    pub fn add_sale(&mut self, client_id: &str, sale: Sale) -> Result<(), DbError> {
        self.update(client_id, |record| {
            record.sales.push(sale);
            let revenue = checked_total(record.sales.iter().map(Sale::checked_revenue));
            let costs = checked_total(record.sales.iter().map(Sale::checked_variable_cost));
            match (revenue, costs) {
                (Some(_), Some(_)) => Ok(()),
                _ => Err(DbError::AmountOutOfRange("sale")),
            }
        })
    }

    pub fn remove_sale(&mut self, client_id: &str, sale_id: Uuid) -> Result<(), DbError> {
        self.update(client_id, |record| {
            remove_by(&mut record.sales, "sale", sale_id, |s| s.id)
        })
    }

    pub fn add_expense(&mut self, client_id: &str, expense: Expense) -> Result<(), DbError> {
        self.update(client_id, |record| {
            record.expenses.push(expense);
            checked_total(record.expenses.iter().map(|e| Some(e.amount)))
                .map(|_| ())
                .ok_or(DbError::AmountOutOfRange("expense"))
        })
    }

    pub fn remove_expense(&mut self, client_id: &str, expense_id: Uuid) -> Result<(), DbError> {
        self.update(client_id, |record| {
            remove_by(&mut record.expenses, "expense", expense_id, |e| e.id)
        })
    }

    pub fn add_investment(&mut self, client_id: &str, investment: Investment) -> Result<(), DbError> {
        self.update(client_id, |record| {
            record.investments.push(investment);
            checked_total(record.investments.iter().map(|i| Some(i.initial_value)))
                .map(|_| ())
                .ok_or(DbError::AmountOutOfRange("investment"))
        })
    }

    pub fn remove_investment(&mut self, client_id: &str, investment_id: Uuid) -> Result<(), DbError> {
        self.update(client_id, |record| {
            remove_by(&mut record.investments, "investment", investment_id, |i| i.id)
        })
    }

    /// Appends a yield to one of the client's investments.
    pub fn add_yield(
        &mut self,
        client_id: &str,
        investment_id: Uuid,
        entry: Yield,
    ) -> Result<(), DbError> {
        self.update(client_id, |record| {
            let investment = record
                .investments
                .iter_mut()
                .find(|i| i.id == investment_id)
                .ok_or_else(|| DbError::RecordNotFound {
                    kind: "investment",
                    id: investment_id.to_string(),
                })?;
            investment.yields.push(entry);
            let yields = record
                .investments
                .iter()
                .flat_map(|i| i.yields.iter().map(|y| Some(y.amount)));
            checked_total(yields)
                .map(|_| ())
                .ok_or(DbError::AmountOutOfRange("yield"))
        })
    }

    // --- Internals ---

    /// Applies `change` to a copy of the record and swaps the copy in once it
    /// has been persisted. On any error the stored state is left untouched.
    fn update<F>(&mut self, client_id: &str, change: F) -> Result<(), DbError>
    where
        F: FnOnce(&mut ClientRecord) -> Result<(), DbError>,
    {
        let mut draft = self.require(client_id)?.clone();
        change(&mut draft)?;
        self.commit(draft)?;
        tracing::debug!(client_id = %client_id, "Client record updated.");
        Ok(())
    }

    fn commit(&mut self, record: ClientRecord) -> Result<(), DbError> {
        let id = record.id.clone();
        let previous = self.clients.insert(id.clone(), record);

        if let Err(e) = self.persist() {
            match previous {
                Some(old) => self.clients.insert(id, old),
                None => self.clients.remove(&id),
            };
            return Err(e);
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), DbError> {
        let raw = serde_json::to_string(&self.clients)?;
        self.store.put(&self.key, &raw)
    }

    fn ensure_username_free(&self, username: &str, except: Option<&str>) -> Result<(), DbError> {
        let taken = self
            .clients
            .values()
            .any(|c| c.username == username && Some(c.id.as_str()) != except);
        if taken {
            return Err(DbError::DuplicateUsername(username.to_string()));
        }
        Ok(())
    }
}

/// Sums the values, or `None` if any is missing or the sum overflows.
fn checked_total(mut values: impl Iterator<Item = Option<Decimal>>) -> Option<Decimal> {
    values.try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value?))
}

fn remove_by<T>(
    items: &mut Vec<T>,
    kind: &'static str,
    id: Uuid,
    id_of: impl Fn(&T) -> Uuid,
) -> Result<(), DbError> {
    let before = items.len();
    items.retain(|item| id_of(item) != id);
    if items.len() == before {
        return Err(DbError::RecordNotFound {
            kind,
            id: id.to_string(),
        });
    }
    Ok(())
}

/// The dataset a fresh installation starts with: a single demo business.
pub fn default_clients() -> BTreeMap<ClientId, ClientRecord> {
    let demo = ClientRecord::new("pyme-demo", "Empresa Demo S.A.", "pyme1", "123");
    BTreeMap::from([(demo.id.clone(), demo)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore};
    use chrono::NaiveDate;
    use core_types::{ExpenseKind, InvestmentKind};
    use rust_decimal_macros::dec;

    const KEY: &str = "finance_pro_data_v4";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fresh() -> (MemoryStore, ClientRepository<MemoryStore>) {
        let store = MemoryStore::new();
        let repo = ClientRepository::load(store.clone(), KEY).unwrap();
        (store, repo)
    }

    /// A store whose writes always fail.
    struct ReadOnlyStore;

    impl LedgerStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, DbError> {
            Ok(None)
        }

        fn put(&self, _key: &str, _value: &str) -> Result<(), DbError> {
            Err(DbError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn empty_store_starts_with_the_demo_client() {
        let (store, repo) = fresh();
        let demo = repo.require("pyme-demo").unwrap();
        assert_eq!(demo.business_name, "Empresa Demo S.A.");
        assert_eq!(demo.username, "pyme1");
        assert!(demo.sales.is_empty());
        // Nothing is written until the first mutation.
        assert_eq!(store.get(KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_store_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store.put(KEY, "[1, 2, 3]").unwrap();
        let repo = ClientRepository::load(store, KEY).unwrap();
        assert_eq!(repo.len(), 1);
        assert!(repo.get("pyme-demo").is_some());
    }

    #[test]
    fn mutations_are_persisted_and_reloadable() {
        let (store, mut repo) = fresh();
        let sale = Sale::new("Widget", dec!(100), 2, dec!(10), date(2024, 1, 10));
        let sale_id = sale.id;
        repo.add_sale("pyme-demo", sale).unwrap();
        repo.add_expense(
            "pyme-demo",
            Expense::new("Rent", dec!(50), ExpenseKind::Fixed, "premises", date(2024, 1, 1)),
        )
        .unwrap();

        let reloaded = ClientRepository::load(store, KEY).unwrap();
        let demo = reloaded.require("pyme-demo").unwrap();
        assert_eq!(demo.sales.len(), 1);
        assert_eq!(demo.sales[0].id, sale_id);
        assert_eq!(demo.expenses[0].kind, ExpenseKind::Fixed);
    }

    #[test]
    fn reads_taken_before_an_update_are_unaffected() {
        let (_store, mut repo) = fresh();
        let before = repo.require("pyme-demo").unwrap().clone();

        repo.add_sale("pyme-demo", Sale::new("Widget", dec!(5), 1, dec!(0), date(2024, 1, 2)))
            .unwrap();

        assert!(before.sales.is_empty());
        assert_eq!(repo.require("pyme-demo").unwrap().sales.len(), 1);
    }

    #[test]
    fn removing_records() {
        let (_store, mut repo) = fresh();
        let sale = Sale::new("Widget", dec!(5), 1, dec!(0), date(2024, 1, 2));
        let sale_id = sale.id;
        repo.add_sale("pyme-demo", sale).unwrap();

        repo.remove_sale("pyme-demo", sale_id).unwrap();
        assert!(repo.require("pyme-demo").unwrap().sales.is_empty());

        let err = repo.remove_sale("pyme-demo", sale_id).unwrap_err();
        assert!(matches!(err, DbError::RecordNotFound { kind: "sale", .. }));
    }

    #[test]
    fn yields_attach_to_their_investment() {
        let (_store, mut repo) = fresh();
        let van = Investment::new("Van", InvestmentKind::Vehicle, dec!(18000), date(2022, 5, 3));
        let van_id = van.id;
        repo.add_investment("pyme-demo", van).unwrap();

        repo.add_yield("pyme-demo", van_id, Yield::new(date(2024, 1, 31), dec!(250), None, "Rental"))
            .unwrap();
        let demo = repo.require("pyme-demo").unwrap();
        assert_eq!(demo.investments[0].cumulative_yield(), dec!(250));

        let missing = repo.add_yield(
            "pyme-demo",
            Uuid::new_v4(),
            Yield::new(date(2024, 2, 1), dec!(1), None, ""),
        );
        assert!(matches!(missing, Err(DbError::RecordNotFound { kind: "investment", .. })));
    }

    #[test]
    fn client_lifecycle() {
        let (_store, mut repo) = fresh();
        let id = repo.add_client("Panadería Sol", "sol", "pan").unwrap();
        assert!(id.starts_with("client-"));
        assert_eq!(repo.find_by_credentials("sol", "pan").unwrap().id, id);

        repo.update_client(
            &id,
            ClientUpdate {
                password: Some("nuevo".to_string()),
                ..ClientUpdate::default()
            },
        )
        .unwrap();
        assert!(repo.find_by_credentials("sol", "pan").is_none());
        assert_eq!(repo.require(&id).unwrap().business_name, "Panadería Sol");

        let removed = repo.delete_client(&id).unwrap();
        assert_eq!(removed.username, "sol");
        assert!(matches!(repo.delete_client(&id), Err(DbError::ClientNotFound(_))));
    }

    #[test]
    fn usernames_stay_unique() {
        let (_store, mut repo) = fresh();
        assert!(matches!(
            repo.add_client("Copycat", "pyme1", "x"),
            Err(DbError::DuplicateUsername(_))
        ));

        let id = repo.add_client("Other", "other", "x").unwrap();
        let clash = repo.update_client(
            &id,
            ClientUpdate {
                username: Some("pyme1".to_string()),
                ..ClientUpdate::default()
            },
        );
        assert!(matches!(clash, Err(DbError::DuplicateUsername(_))));
        // Keeping one's own username is not a clash.
        repo.update_client(
            "pyme-demo",
            ClientUpdate {
                username: Some("pyme1".to_string()),
                ..ClientUpdate::default()
            },
        )
        .unwrap();
    }

    #[test]
    fn failed_write_leaves_state_untouched() {
        let mut repo = ClientRepository::load(ReadOnlyStore, KEY).unwrap();
        let result = repo.add_sale("pyme-demo", Sale::new("Widget", dec!(5), 1, dec!(0), date(2024, 1, 2)));

        assert!(matches!(result, Err(DbError::Io(_))));
        assert!(repo.require("pyme-demo").unwrap().sales.is_empty());
        assert!(repo.delete_client("pyme-demo").is_err());
        assert!(repo.get("pyme-demo").is_some());
    }

    #[test]
    fn amounts_beyond_the_decimal_range_are_rejected() {
        let (store, mut repo) = fresh();

        let oversized = Sale::new("Yacht", dec!(10000000000000000000000000), 10_000, dec!(0), date(2024, 1, 2));
        assert!(matches!(
            repo.add_sale("pyme-demo", oversized),
            Err(DbError::AmountOutOfRange("sale"))
        ));

        // Each sale fits on its own, but the ledger total would not.
        let large = Sale::new("Yacht", dec!(50000000000000000000000000), 1_000, dec!(0), date(2024, 1, 2));
        repo.add_sale("pyme-demo", large.clone()).unwrap();
        assert!(repo.add_sale("pyme-demo", Sale::new("Yacht", large.price, 1_000, dec!(0), date(2024, 1, 3))).is_err());
        assert_eq!(repo.require("pyme-demo").unwrap().sales, vec![large]);

        repo.add_expense("pyme-demo", Expense::new("Rent", Decimal::MAX, ExpenseKind::Fixed, "General", date(2024, 1, 2)))
            .unwrap();
        assert!(matches!(
            repo.add_expense("pyme-demo", Expense::new("Rent", dec!(1), ExpenseKind::Fixed, "General", date(2024, 1, 3))),
            Err(DbError::AmountOutOfRange("expense"))
        ));

        // The persisted ledger only holds the accepted records.
        let reloaded = ClientRepository::load(store, KEY).unwrap();
        let demo = reloaded.require("pyme-demo").unwrap();
        assert_eq!(demo.sales.len(), 1);
        assert_eq!(demo.expenses.len(), 1);
    }

    #[test]
    fn unknown_client_is_reported() {
        let (_store, mut repo) = fresh();
        let result = repo.add_expense(
            "nobody",
            Expense::new("Rent", dec!(1), ExpenseKind::Fixed, "x", date(2024, 1, 1)),
        );
        assert!(matches!(result, Err(DbError::ClientNotFound(id)) if id == "nobody"));
    }

    #[test]
    fn file_backed_repository_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            let mut repo = ClientRepository::load(store, KEY).unwrap();
            repo.add_client("Ferretería", "ferre", "clavo").unwrap();
        }
        let store = FileStore::open(dir.path()).unwrap();
        let repo = ClientRepository::load(store, KEY).unwrap();
        assert_eq!(repo.len(), 2);
        assert!(repo.find_by_credentials("ferre", "clavo").is_some());
    }
}
