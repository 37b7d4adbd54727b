//! Built-in default values used to seed a fresh settings store.

use chrono::{Datelike, Utc};

use crate::model::{
    CurrencyLocation, ExplorersSettings, ProfitLossTimeframe, Quarter, RefreshPeriod,
    SettingsState, TimeFramePeriod, TimeFrameSetting,
};

/// Default background query polling interval.
pub const DEFAULT_QUERY_PERIOD: u32 = 5;
/// Default thousands grouping character.
pub const DEFAULT_THOUSAND_SEPARATOR: &str = ",";
/// Default decimal separator character.
pub const DEFAULT_DECIMAL_SEPARATOR: &str = ".";
/// Default pagination page size.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;

impl Default for ProfitLossTimeframe {
    fn default() -> Self {
        Self {
            year: Utc::now().year().to_string(),
            quarter: Quarter::All,
        }
    }
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            defi_setup_done: false,
            timeframe_setting: TimeFrameSetting::Remember,
            last_known_timeframe: TimeFramePeriod::All,
            query_period: DEFAULT_QUERY_PERIOD,
            profit_loss_report_period: ProfitLossTimeframe::default(),
            thousand_separator: DEFAULT_THOUSAND_SEPARATOR.to_string(),
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR.to_string(),
            currency_location: CurrencyLocation::After,
            refresh_period: RefreshPeriod::DISABLED,
            explorers: ExplorersSettings::default(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}
