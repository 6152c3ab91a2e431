//! Application state management for incomeview
//!
//! This module contains the main application state, handling keyboard input,
//! data loading, and the derived statements view.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{info, warn};

use crate::cache::{StatementFetcher, Statements};
use crate::cli::{normalize_ticker, StartupConfig};
use crate::data::{IncomeStatementClient, Period, StatementField};
use crate::pipeline::{
    derive_view, parse_amount_bound, parse_date_bound, Bounds, FilterCriteria, FilterInputError,
    RangeEnd, SortKey, StatementView,
};

/// State of the current statements request
#[derive(Debug, Clone)]
pub enum LoadState {
    /// A request is in flight
    Loading,
    /// Statements were fetched (possibly an empty list)
    Loaded(Statements),
    /// The request failed; holds the message shown to the user
    Failed(&'static str),
}

/// Which widget receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are shortcuts
    Normal,
    /// Editing the ticker input
    Ticker,
    /// Editing the filter panel
    Filter,
}

/// One text box of the filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterInput {
    DateFrom,
    DateTo,
    RevenueMin,
    RevenueMax,
    NetIncomeMin,
    NetIncomeMax,
}

impl FilterInput {
    /// All inputs in focus order
    pub const ALL: [FilterInput; 6] = [
        FilterInput::DateFrom,
        FilterInput::DateTo,
        FilterInput::RevenueMin,
        FilterInput::RevenueMax,
        FilterInput::NetIncomeMin,
        FilterInput::NetIncomeMax,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterInput::DateFrom => "Date from",
            FilterInput::DateTo => "Date to",
            FilterInput::RevenueMin => "Lower Revenue",
            FilterInput::RevenueMax => "Upper Revenue",
            FilterInput::NetIncomeMin => "Lower Net Income",
            FilterInput::NetIncomeMax => "Upper Net Income",
        }
    }

    fn index(&self) -> usize {
        FilterInput::ALL
            .iter()
            .position(|input| input == self)
            .unwrap_or(0)
    }

    fn accepts(&self, c: char) -> bool {
        match self {
            FilterInput::DateFrom | FilterInput::DateTo => c.is_ascii_digit() || c == '-',
            _ => c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E'),
        }
    }
}

/// Draft text of the filter panel; only applied on request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInputs {
    values: [String; 6],
}

impl FilterInputs {
    pub fn get(&self, input: FilterInput) -> &str {
        &self.values[input.index()]
    }

    pub fn set(&mut self, input: FilterInput, value: impl Into<String>) {
        self.values[input.index()] = value.into();
    }

    fn get_mut(&mut self, input: FilterInput) -> &mut String {
        &mut self.values[input.index()]
    }

    /// Parses every input into filter criteria
    pub fn to_criteria(&self) -> Result<FilterCriteria, FilterInputError> {
        Ok(FilterCriteria {
            date: Bounds::new(
                parse_date_bound(self.get(FilterInput::DateFrom), RangeEnd::Start)?,
                parse_date_bound(self.get(FilterInput::DateTo), RangeEnd::End)?,
            ),
            revenue: Bounds::new(
                parse_amount_bound(self.get(FilterInput::RevenueMin))?,
                parse_amount_bound(self.get(FilterInput::RevenueMax))?,
            ),
            net_income: Bounds::new(
                parse_amount_bound(self.get(FilterInput::NetIncomeMin))?,
                parse_amount_bound(self.get(FilterInput::NetIncomeMax))?,
            ),
        })
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Ticker whose statements are requested
    pub ticker: String,
    /// Reporting period of the request
    pub period: Period,
    /// Ticker text being typed; submitted separately so typing does not refetch
    pub ticker_input: String,
    pub input_mode: InputMode,
    pub load_state: LoadState,
    /// Draft filter text
    pub filter_inputs: FilterInputs,
    /// Focused filter input while in filter mode
    pub filter_focus: FilterInput,
    /// Filters currently applied to the table
    pub active_filters: FilterCriteria,
    pub sort_key: SortKey,
    /// Filtered and sorted statements, present once data has loaded
    pub view: Option<StatementView>,
    /// First visible table row
    pub scroll_offset: usize,
    /// Transient message for invalid input
    pub status_message: Option<String>,
    /// Flag indicating a fetch should run on the next loop iteration
    pub refresh_requested: bool,
    /// Timestamp of last successful load
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    fetcher: StatementFetcher,
}

impl App {
    /// Creates a new App from the startup configuration
    pub fn new(config: &StartupConfig) -> Self {
        let client = match &config.base_url {
            Some(base_url) => IncomeStatementClient::with_base_url(base_url, &config.api_key),
            None => IncomeStatementClient::new(&config.api_key),
        };
        let fetcher = StatementFetcher::new(client, config.cache_ttl);
        Self::with_fetcher(&config.ticker, config.period, fetcher)
    }

    /// Creates a new App with a custom fetcher
    pub fn with_fetcher(ticker: &str, period: Period, fetcher: StatementFetcher) -> Self {
        Self {
            ticker: ticker.to_string(),
            period,
            ticker_input: ticker.to_string(),
            input_mode: InputMode::Normal,
            load_state: LoadState::Loading,
            filter_inputs: FilterInputs::default(),
            filter_focus: FilterInput::DateFrom,
            active_filters: FilterCriteria::default(),
            sort_key: SortKey::default(),
            view: None,
            scroll_offset: 0,
            status_message: None,
            refresh_requested: true,
            last_refresh: None,
            show_help: false,
            should_quit: false,
            fetcher,
        }
    }

    /// Switches to the loading state so it can be drawn before a fetch
    pub fn mark_loading(&mut self) {
        self.load_state = LoadState::Loading;
        self.view = None;
    }

    /// Fetches statements for the current ticker and period
    ///
    /// Served from the cache while the previous response is fresh.
    pub async fn load_statements(&mut self) {
        self.refresh_requested = false;
        self.mark_loading();

        match self.fetcher.fetch(&self.ticker, self.period).await {
            Ok(statements) => {
                info!(ticker = %self.ticker, count = statements.len(), "statements loaded");
                self.load_state = LoadState::Loaded(statements);
                self.last_refresh = Some(Local::now());
            }
            Err(e) => {
                warn!(ticker = %self.ticker, error = %e, "failed to load statements");
                self.load_state = LoadState::Failed(e.user_message());
            }
        }

        self.scroll_offset = 0;
        self.recompute_view();
    }

    /// Re-runs the filter/sort pipeline over the loaded statements
    pub fn recompute_view(&mut self) {
        self.view = match &self.load_state {
            LoadState::Loaded(statements) => Some(derive_view(
                statements,
                &self.active_filters,
                self.sort_key,
            )),
            _ => None,
        };
        let max_offset = self.row_count().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// Number of displayable table rows
    pub fn row_count(&self) -> usize {
        self.view.as_ref().map_or(0, |view| view.rows().len())
    }

    /// Number of statements hidden by the active filters
    pub fn hidden_count(&self) -> usize {
        self.view.as_ref().map_or(0, |view| view.hidden)
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q` or `Esc`: Quit the application
    /// - `t` or `/`: Edit the ticker (`Enter` submits, `Esc` cancels)
    /// - `f`: Edit filters (`Tab`/`↑`/`↓` move, `Enter` applies, `Esc` leaves)
    /// - `c`: Reset filters
    /// - `1`-`6`: Sort by column, toggling direction
    /// - `↑`/`k`, `↓`/`j`: Scroll the table
    /// - `p`: Switch between annual and quarterly statements
    /// - `r`: Reload the current ticker
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        match self.input_mode {
            InputMode::Ticker => self.handle_ticker_key(key_event),
            InputMode::Filter => self.handle_filter_key(key_event),
            InputMode::Normal => self.handle_normal_key(key_event),
        }
    }

    fn handle_normal_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('t') | KeyCode::Char('/') => {
                self.status_message = None;
                self.input_mode = InputMode::Ticker;
            }
            KeyCode::Char('f') => {
                self.status_message = None;
                self.input_mode = InputMode::Filter;
            }
            KeyCode::Char('c') => {
                self.reset_filters();
            }
            KeyCode::Char(c @ '1'..='6') => {
                let position = c.to_digit(10).unwrap_or(1) as usize;
                if let Some(field) = StatementField::from_position(position) {
                    self.sort_by(field);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.scroll_offset + 1 < self.row_count() {
                    self.scroll_offset += 1;
                }
            }
            KeyCode::Char('p') => {
                self.period = match self.period {
                    Period::Annual => Period::Quarter,
                    Period::Quarter => Period::Annual,
                };
                self.refresh_requested = true;
            }
            KeyCode::Char('r') => {
                self.refresh_requested = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    fn handle_ticker_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => self.submit_ticker(),
            KeyCode::Esc => {
                self.ticker_input = self.ticker.clone();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.ticker_input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_alphanumeric() || c == '.' || c == '-' => {
                self.ticker_input.push(c.to_ascii_uppercase());
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => self.apply_filter_inputs(),
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => self.move_filter_focus(1),
            KeyCode::BackTab | KeyCode::Up => self.move_filter_focus(FilterInput::ALL.len() - 1),
            KeyCode::Backspace => {
                self.filter_inputs.get_mut(self.filter_focus).pop();
            }
            KeyCode::Char(c) if self.filter_focus.accepts(c) => {
                self.filter_inputs.get_mut(self.filter_focus).push(c);
            }
            _ => {}
        }
    }

    fn move_filter_focus(&mut self, step: usize) {
        let count = FilterInput::ALL.len();
        let next = (self.filter_focus.index() + step) % count;
        self.filter_focus = FilterInput::ALL[next];
    }

    /// Makes the typed ticker the active one and requests a load
    pub fn submit_ticker(&mut self) {
        match normalize_ticker(&self.ticker_input) {
            Ok(ticker) => {
                self.ticker_input = ticker.clone();
                self.ticker = ticker;
                self.status_message = None;
                self.input_mode = InputMode::Normal;
                self.refresh_requested = true;
            }
            Err(e) => {
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Applies the draft filter text; invalid text leaves active filters as they were
    pub fn apply_filter_inputs(&mut self) {
        match self.filter_inputs.to_criteria() {
            Ok(criteria) => {
                self.active_filters = criteria;
                self.status_message = None;
                self.input_mode = InputMode::Normal;
                self.recompute_view();
            }
            Err(e) => {
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Clears draft and active filters
    pub fn reset_filters(&mut self) {
        self.filter_inputs = FilterInputs::default();
        self.active_filters = FilterCriteria::default();
        self.status_message = None;
        self.recompute_view();
    }

    /// Sorts by `field`, toggling direction if it is already active
    pub fn sort_by(&mut self, field: StatementField) {
        self.sort_key = self.sort_key.toggle(field);
        self.recompute_view();
    }
}
