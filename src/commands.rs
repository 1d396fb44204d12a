use crate::display;
use crate::{
    Cli, ClientsCommand, Commands, ExpensesCommand, InvestmentsCommand, PeriodArgs,
    PortalCommand, SalesCommand, SimulateArgs, SummaryArgs,
};
use advisor::FinancialAdvisor;
use analytics::{compare, simulate, MetricsEngine};
use anyhow::{bail, Context, Result};
use auth::{authenticate, share_message, Session};
use configuration::Config;
use core_types::{ClientRecord, DateFilter, Expense, Investment, Sale, Yield};
use database::{ClientRepository, ClientUpdate, FileStore, LedgerStore, PortalSettings};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Opens the file store named in the configuration, logs in and runs one command.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let store = FileStore::open(&config.storage.data_dir).with_context(|| {
        format!(
            "Failed to open data directory {}",
            config.storage.data_dir.display()
        )
    })?;
    tracing::debug!(data_dir = %store.dir().display(), "Store opened.");

    let (Some(username), Some(password)) = (cli.username.as_deref(), cli.password.as_deref())
    else {
        bail!("Credentials are required: pass --username and --password or set FINANCEPRO_USERNAME/FINANCEPRO_PASSWORD");
    };

    let mut app = App::open(store, config)?;
    app.login(username, password)?;
    let output = app.execute(cli.command, cli.client.as_deref()).await?;
    println!("{output}");
    Ok(())
}

/// One logged-in invocation: the loaded ledger plus the caller's session.
pub struct App<S: LedgerStore + Clone> {
    config: Config,
    store: S,
    repo: ClientRepository<S>,
    engine: MetricsEngine,
    session: Option<Session>,
}

impl<S: LedgerStore + Clone> App<S> {
    pub fn open(store: S, config: Config) -> Result<Self> {
        let repo = ClientRepository::load(store.clone(), config.storage.ledger_key.clone())
            .context("Failed to load the client ledger")?;
        Ok(Self {
            config,
            store,
            repo,
            engine: MetricsEngine::new(),
            session: None,
        })
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<&Session> {
        let session = authenticate(username, password, &self.config.admin, &self.repo)?;
        Ok(self.session.insert(session))
    }

    fn session(&self) -> Result<&Session> {
        self.session.as_ref().context("Not logged in")
    }

    /// The client record the session may act on, honoring `--client`.
    fn target(&self, requested: Option<&str>) -> Result<&ClientRecord> {
        let id = self.session()?.resolve_client(requested)?;
        Ok(self.repo.require(&id)?)
    }

    pub async fn execute(&mut self, command: Commands, client: Option<&str>) -> Result<String> {
        match command {
            Commands::Login => self.describe_session(),
            Commands::Summary(args) => self.summary(args, client),
            Commands::Simulate(args) => self.simulate(args, client),
            Commands::Advise(period) => self.advise(period, client).await,
            Commands::Sales(cmd) => self.sales(cmd, client),
            Commands::Expenses(cmd) => self.expenses(cmd, client),
            Commands::Investments(cmd) => self.investments(cmd, client),
            Commands::Clients(cmd) => self.clients(cmd),
            Commands::Portal(cmd) => self.portal(cmd),
        }
    }

    fn describe_session(&self) -> Result<String> {
        let session = self.session()?;
        match &session.client_id {
            Some(id) => {
                let client = self.repo.require(id)?;
                Ok(format!(
                    "Logged in as {} ({}, client {})",
                    session.username, client.business_name, client.id
                ))
            }
            None => Ok(format!(
                "Logged in as {} (administrator, {} clients)",
                session.username,
                self.repo.len()
            )),
        }
    }

    // --- Reports ---

    fn summary(&self, args: SummaryArgs, client: Option<&str>) -> Result<String> {
        let record = self.target(client)?;
        let filter = args.period.filter();
        let current = self.engine.summarize_client(record, &filter);

        let reference_filter = DateFilter::from_bounds(args.compare_from, args.compare_to);
        let reference = match reference_filter {
            DateFilter::AllTime => None,
            DateFilter::Between(_) => Some(self.engine.summarize_client(record, &reference_filter)),
        };

        if args.json {
            return Ok(serde_json::to_string_pretty(&current)?);
        }

        let comparison = reference.as_ref().map(|r| compare(&current, r));
        let table = display::summary_table(
            &current,
            reference.as_ref().zip(comparison.as_ref()),
        );

        let mut out = format!("{} | {}\n", record.business_name, filter);
        if reference.is_some() {
            out.push_str(&format!("Compared with {reference_filter}\n"));
        }
        out.push_str(&table.to_string());
        Ok(out)
    }

    fn simulate(&self, args: SimulateArgs, client: Option<&str>) -> Result<String> {
        let record = self.target(client)?;
        let filter = args.period.filter();
        let summary = self.engine.summarize_client(record, &filter);
        let outcome = simulate(&summary, &record.sales, args.price_pct, args.volume_pct);
        Ok(format!(
            "{} | price {}%, volume {}%\n{}",
            filter,
            args.price_pct,
            args.volume_pct,
            display::simulation_table(&summary, &outcome)
        ))
    }

    async fn advise(&self, period: PeriodArgs, client: Option<&str>) -> Result<String> {
        let record = self.target(client)?;
        let summary = self.engine.summarize_client(record, &period.filter());
        let advisor = FinancialAdvisor::from_config(&self.config.advisor);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        spinner.set_message("Consulting the AI advisor...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let advice = advisor.advice(&summary).await;

        spinner.finish_and_clear();
        Ok(advice)
    }

    // --- Ledger ---

    fn sales(&mut self, cmd: SalesCommand, client: Option<&str>) -> Result<String> {
        let id = self.target(client)?.id.clone();
        match cmd {
            SalesCommand::List => Ok(display::sales_table(&self.repo.require(&id)?.sales).to_string()),
            SalesCommand::Add { name, price, quantity, unit_cost, date } => {
                let sale = Sale::new(name, price, quantity, unit_cost, date);
                let sale_id = sale.id;
                self.repo.add_sale(&id, sale)?;
                Ok(format!("Sale {sale_id} recorded."))
            }
            SalesCommand::Remove { id: sale_id } => {
                self.repo.remove_sale(&id, sale_id)?;
                Ok(format!("Sale {sale_id} removed."))
            }
        }
    }

    fn expenses(&mut self, cmd: ExpensesCommand, client: Option<&str>) -> Result<String> {
        let id = self.target(client)?.id.clone();
        match cmd {
            ExpensesCommand::List => {
                Ok(display::expenses_table(&self.repo.require(&id)?.expenses).to_string())
            }
            ExpensesCommand::Add { description, amount, kind, category, date } => {
                let expense = Expense::new(description, amount, kind, category, date);
                let expense_id = expense.id;
                self.repo.add_expense(&id, expense)?;
                Ok(format!("Expense {expense_id} recorded."))
            }
            ExpensesCommand::Remove { id: expense_id } => {
                self.repo.remove_expense(&id, expense_id)?;
                Ok(format!("Expense {expense_id} removed."))
            }
        }
    }

    fn investments(&mut self, cmd: InvestmentsCommand, client: Option<&str>) -> Result<String> {
        let id = self.target(client)?.id.clone();
        match cmd {
            InvestmentsCommand::List => {
                Ok(display::investments_table(&self.repo.require(&id)?.investments).to_string())
            }
            InvestmentsCommand::Add { name, kind, value, date } => {
                let investment = Investment::new(name, kind, value, date);
                let investment_id = investment.id;
                self.repo.add_investment(&id, investment)?;
                Ok(format!("Investment {investment_id} recorded."))
            }
            InvestmentsCommand::AddYield { investment, amount, date, percentage, comment } => {
                self.repo
                    .add_yield(&id, investment, Yield::new(date, amount, percentage, comment))?;
                Ok(format!("Yield recorded against {investment}."))
            }
            InvestmentsCommand::Remove { id: investment_id } => {
                self.repo.remove_investment(&id, investment_id)?;
                Ok(format!("Investment {investment_id} removed."))
            }
        }
    }

    // --- Administration ---

    fn clients(&mut self, cmd: ClientsCommand) -> Result<String> {
        self.session()?.require_admin()?;
        match cmd {
            ClientsCommand::List(period) => {
                let filter = period.filter();
                let rows: Vec<_> = self
                    .repo
                    .clients()
                    .map(|c| (c, self.engine.summarize_client(c, &filter)))
                    .collect();
                Ok(format!("{filter}\n{}", display::clients_table(&rows)))
            }
            ClientsCommand::Add { business_name, login, secret } => {
                let id = self.repo.add_client(&business_name, &login, &secret)?;
                Ok(format!("Client {id} created."))
            }
            ClientsCommand::Update { id, business_name, login, secret } => {
                let changes = ClientUpdate {
                    business_name,
                    username: login,
                    password: secret,
                };
                self.repo.update_client(&id, changes)?;
                Ok(format!("Client {id} updated."))
            }
            ClientsCommand::Remove { id } => {
                let removed = self.repo.delete_client(&id)?;
                Ok(format!("Client {} ({}) removed.", removed.id, removed.business_name))
            }
            ClientsCommand::Share { id } => {
                let client = self.repo.require(&id)?;
                let settings = PortalSettings::load(&self.store, &self.config.storage.settings_key)?;
                Ok(share_message(client, settings.public_url.as_deref()))
            }
        }
    }

    fn portal(&mut self, cmd: PortalCommand) -> Result<String> {
        self.session()?.require_admin()?;
        let key = &self.config.storage.settings_key;
        match cmd {
            PortalCommand::Show => {
                let settings = PortalSettings::load(&self.store, key)?;
                Ok(format!(
                    "Public URL: {}",
                    settings.public_url.as_deref().unwrap_or("(not set)")
                ))
            }
            PortalCommand::SetUrl { url } => {
                let mut settings = PortalSettings::load(&self.store, key)?;
                let url = url.trim().to_string();
                settings.public_url = (!url.is_empty()).then_some(url);
                settings.save(&self.store, key)?;
                tracing::info!(url = ?settings.public_url, "Portal URL updated.");
                Ok("Portal URL saved.".to_string())
            }
        }
    }
}
