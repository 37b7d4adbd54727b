#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Frontend settings contract for the Tally application.
//!
//! Layout: `model.rs` (typed settings models and payloads), `validate.rs`
//! (JSON boundary validation), `defaults.rs` (built-in default values),
//! `store.rs` (in-memory `SettingsStore` applying validated updates).

pub mod defaults;
pub mod error;
pub mod model;
pub mod store;
pub mod validate;

pub use defaults::{
    DEFAULT_DECIMAL_SEPARATOR, DEFAULT_ITEMS_PER_PAGE, DEFAULT_QUERY_PERIOD,
    DEFAULT_THOUSAND_SEPARATOR,
};
pub use error::{SettingsError, SettingsResult};
pub use model::{
    AssetSymbol, CurrencyLocation, ExplorerEndpoints, ExplorersSettings, FrontendSettingsPayload,
    ProfitLossTimeframe, Quarter, RefreshPeriod, SettingsState, TIMEFRAME_REMEMBER,
    TimeFramePeriod, TimeFrameSetting,
};
pub use store::{AppliedSettings, SettingsSnapshot, SettingsStore};
pub use validate::{payload_from_value, settings_from_value};
