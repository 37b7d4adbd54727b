//! Typed settings models and partial-update payloads.
//!
//! # Design
//! - Pure data carriers shared by the validation layer and the store.
//! - Finite token sets are closed enums so invalid values cannot be
//!   constructed once a document has crossed the boundary.
//! - `SettingsState` keeps every field required while
//!   `FrontendSettingsPayload` mirrors it with every field optional; the
//!   split guarantees a merge can never leave a field unset.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire name of the one-time DeFi setup completion flag.
pub const DEFI_SETUP_DONE: &str = "defiSetupDone";
/// Wire name of the active timeframe preference.
pub const TIMEFRAME_SETTING: &str = "timeframeSetting";
/// Wire name of the concrete fallback timeframe.
pub const LAST_KNOWN_TIMEFRAME: &str = "lastKnownTimeframe";
/// Wire name of the background query polling interval.
pub const QUERY_PERIOD: &str = "queryPeriod";
/// Wire name of the profit/loss reporting scope.
pub const PROFIT_LOSS_PERIOD: &str = "profitLossReportPeriod";
/// Wire name of the thousands grouping character.
pub const THOUSAND_SEPARATOR: &str = "thousandSeparator";
/// Wire name of the decimal separator character.
pub const DECIMAL_SEPARATOR: &str = "decimalSeparator";
/// Wire name of the currency symbol placement.
pub const CURRENCY_LOCATION: &str = "currencyLocation";
/// Wire name of the auto-refresh interval.
pub const REFRESH_PERIOD: &str = "refreshPeriod";
/// Wire name of the per-asset block explorer overrides.
pub const EXPLORERS: &str = "explorers";
/// Wire name of the pagination page size.
pub const ITEMS_PER_PAGE: &str = "itemsPerPage";

/// Token used to request "remember the last used timeframe".
pub const TIMEFRAME_REMEMBER: &str = "REMEMBER";

/// One selectable chart time range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeFramePeriod {
    /// The full recorded history.
    #[serde(rename = "All")]
    All,
    /// The trailing year.
    #[serde(rename = "1Y")]
    Year,
    /// The trailing three months.
    #[serde(rename = "3M")]
    ThreeMonths,
    /// The trailing month.
    #[serde(rename = "1M")]
    Month,
    /// The trailing two weeks.
    #[serde(rename = "2W")]
    TwoWeeks,
    /// The trailing week.
    #[serde(rename = "1W")]
    Week,
}

impl TimeFramePeriod {
    /// Every selectable period, in display order.
    pub const VALUES: [Self; 6] = [
        Self::All,
        Self::Year,
        Self::ThreeMonths,
        Self::Month,
        Self::TwoWeeks,
        Self::Week,
    ];

    /// Render the period as its wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Year => "1Y",
            Self::ThreeMonths => "3M",
            Self::Month => "1M",
            Self::TwoWeeks => "2W",
            Self::Week => "1W",
        }
    }

    /// Parse a wire token into a period, if it is a member of the set.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::VALUES
            .into_iter()
            .find(|period| period.as_str() == token)
    }
}

/// The user's timeframe preference: a fixed period or the remember sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFrameSetting {
    /// Reuse whatever period was last selected.
    Remember,
    /// Always open charts on a fixed period.
    Period(TimeFramePeriod),
}

impl TimeFrameSetting {
    /// Render the setting as its wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Remember => TIMEFRAME_REMEMBER,
            Self::Period(period) => period.as_str(),
        }
    }

    /// Parse a wire token into a setting, if it is a member of the set.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        if token == TIMEFRAME_REMEMBER {
            return Some(Self::Remember);
        }
        TimeFramePeriod::from_token(token).map(Self::Period)
    }
}

// The sentinel and the period tokens share one string namespace on the wire,
// so the serde representation is a plain string rather than a tagged enum.
impl Serialize for TimeFrameSetting {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TimeFrameSetting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Self::from_token(&token).ok_or_else(|| {
            serde::de::Error::custom(format!("unrecognized timeframe token '{token}'"))
        })
    }
}

/// A fiscal quarter selector for profit/loss reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Quarter {
    /// January through March.
    Q1,
    /// April through June.
    Q2,
    /// July through September.
    Q3,
    /// October through December.
    Q4,
    /// The whole year.
    #[serde(rename = "ALL")]
    All,
}

impl Quarter {
    /// Every selectable quarter, in display order.
    pub const VALUES: [Self; 5] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4, Self::All];

    /// Render the quarter as its wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
            Self::All => "ALL",
        }
    }

    /// Parse a wire token into a quarter, if it is a member of the set.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::VALUES
            .into_iter()
            .find(|quarter| quarter.as_str() == token)
    }
}

/// Year plus quarter pair scoping the profit/loss views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProfitLossTimeframe {
    /// Numeric year rendered as text (e.g. `"2026"`). Must not be empty.
    pub year: String,
    /// Quarter within the year, or the whole year.
    pub quarter: Quarter,
}

/// Placement of the currency symbol relative to the amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyLocation {
    /// Symbol precedes the amount.
    Before,
    /// Symbol follows the amount.
    After,
}

impl CurrencyLocation {
    /// Render the location as its wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }

    /// Parse a wire token into a location, if it is a member of the set.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            _ => None,
        }
    }
}

/// Auto-refresh interval preference. Zero means refresh is disabled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct RefreshPeriod(pub u32);

impl RefreshPeriod {
    /// Sentinel interval meaning auto-refresh is turned off.
    pub const DISABLED: Self = Self(0);

    /// Whether auto-refresh is turned off.
    #[must_use]
    pub const fn is_disabled(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for RefreshPeriod {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Asset symbols that accept block explorer overrides. The set is closed;
/// supporting a new asset means extending this enum, not just the data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetSymbol {
    /// Ethereum Classic.
    Etc,
    /// Ethereum.
    Eth,
    /// Bitcoin.
    Btc,
    /// Kusama.
    Ksm,
}

impl AssetSymbol {
    /// Every supported asset symbol.
    pub const VALUES: [Self; 4] = [Self::Etc, Self::Eth, Self::Btc, Self::Ksm];

    /// Render the symbol as its wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Etc => "ETC",
            Self::Eth => "ETH",
            Self::Btc => "BTC",
            Self::Ksm => "KSM",
        }
    }

    /// Parse a wire token into a symbol, if it is a member of the set.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::VALUES
            .into_iter()
            .find(|symbol| symbol.as_str() == token)
    }
}

/// Override URL templates for viewing activity on a block explorer.
///
/// Templates are opaque strings at this layer; placeholder substitution is
/// the responsibility of the view code that renders the links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ExplorerEndpoints {
    /// URL template for transaction pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<String>,
    /// URL template for address pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ExplorerEndpoints {
    /// Returns true when neither endpoint is overridden.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.transaction.is_none() && self.address.is_none()
    }
}

/// Per-asset explorer overrides. One optional slot per supported asset keeps
/// unknown symbols unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ExplorersSettings {
    /// Ethereum Classic overrides.
    #[serde(rename = "ETC", default, skip_serializing_if = "Option::is_none")]
    pub etc: Option<ExplorerEndpoints>,
    /// Ethereum overrides.
    #[serde(rename = "ETH", default, skip_serializing_if = "Option::is_none")]
    pub eth: Option<ExplorerEndpoints>,
    /// Bitcoin overrides.
    #[serde(rename = "BTC", default, skip_serializing_if = "Option::is_none")]
    pub btc: Option<ExplorerEndpoints>,
    /// Kusama overrides.
    #[serde(rename = "KSM", default, skip_serializing_if = "Option::is_none")]
    pub ksm: Option<ExplorerEndpoints>,
}

impl ExplorersSettings {
    /// Overrides recorded for the given asset, when present.
    #[must_use]
    pub const fn get(&self, asset: AssetSymbol) -> Option<&ExplorerEndpoints> {
        match asset {
            AssetSymbol::Etc => self.etc.as_ref(),
            AssetSymbol::Eth => self.eth.as_ref(),
            AssetSymbol::Btc => self.btc.as_ref(),
            AssetSymbol::Ksm => self.ksm.as_ref(),
        }
    }

    /// Record or replace the overrides for the given asset.
    pub fn set(&mut self, asset: AssetSymbol, endpoints: ExplorerEndpoints) {
        let slot = match asset {
            AssetSymbol::Etc => &mut self.etc,
            AssetSymbol::Eth => &mut self.eth,
            AssetSymbol::Btc => &mut self.btc,
            AssetSymbol::Ksm => &mut self.ksm,
        };
        *slot = Some(endpoints);
    }

    /// Returns true when no asset carries an override.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.etc.is_none() && self.eth.is_none() && self.btc.is_none() && self.ksm.is_none()
    }
}

/// The complete, fully populated settings object held by the store.
///
/// Constructed once from defaults or a validated saved document and replaced
/// wholesale by validated merges afterwards; individual fields are never
/// mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsState {
    /// Whether the one-time DeFi setup flow has completed.
    pub defi_setup_done: bool,
    /// Active timeframe preference for charts.
    pub timeframe_setting: TimeFrameSetting,
    /// Concrete period to fall back to when the remember sentinel is active.
    pub last_known_timeframe: TimeFramePeriod,
    /// Polling interval for background data queries.
    pub query_period: u32,
    /// Year and quarter scoping profit/loss views.
    pub profit_loss_report_period: ProfitLossTimeframe,
    /// Thousands grouping character used when formatting amounts.
    pub thousand_separator: String,
    /// Decimal separator character used when formatting amounts.
    pub decimal_separator: String,
    /// Placement of the currency symbol relative to the amount.
    pub currency_location: CurrencyLocation,
    /// Auto-refresh interval; zero disables refreshing.
    pub refresh_period: RefreshPeriod,
    /// Per-asset block explorer URL overrides.
    pub explorers: ExplorersSettings,
    /// Pagination page size for tables.
    pub items_per_page: u32,
}

impl SettingsState {
    /// Wire names of the settings fields, in declaration order.
    pub const FIELD_NAMES: [&'static str; 11] = [
        DEFI_SETUP_DONE,
        TIMEFRAME_SETTING,
        LAST_KNOWN_TIMEFRAME,
        QUERY_PERIOD,
        PROFIT_LOSS_PERIOD,
        THOUSAND_SEPARATOR,
        DECIMAL_SEPARATOR,
        CURRENCY_LOCATION,
        REFRESH_PERIOD,
        EXPLORERS,
        ITEMS_PER_PAGE,
    ];

    /// Produce a new state taking each payload value where present and the
    /// current value otherwise. Total by construction: the result can never
    /// have an unset field, and merging the same payload twice yields the
    /// same state as merging it once.
    #[must_use]
    pub fn merged(&self, payload: &FrontendSettingsPayload) -> Self {
        Self {
            defi_setup_done: payload.defi_setup_done.unwrap_or(self.defi_setup_done),
            timeframe_setting: payload.timeframe_setting.unwrap_or(self.timeframe_setting),
            last_known_timeframe: payload
                .last_known_timeframe
                .unwrap_or(self.last_known_timeframe),
            query_period: payload.query_period.unwrap_or(self.query_period),
            profit_loss_report_period: payload
                .profit_loss_report_period
                .clone()
                .unwrap_or_else(|| self.profit_loss_report_period.clone()),
            thousand_separator: payload
                .thousand_separator
                .clone()
                .unwrap_or_else(|| self.thousand_separator.clone()),
            decimal_separator: payload
                .decimal_separator
                .clone()
                .unwrap_or_else(|| self.decimal_separator.clone()),
            currency_location: payload.currency_location.unwrap_or(self.currency_location),
            refresh_period: payload.refresh_period.unwrap_or(self.refresh_period),
            explorers: payload
                .explorers
                .clone()
                .unwrap_or_else(|| self.explorers.clone()),
            items_per_page: payload.items_per_page.unwrap_or(self.items_per_page),
        }
    }
}

/// Partial update request applied to a [`SettingsState`].
///
/// Mirrors the state field for field with every entry optional; absent
/// fields mean "leave unchanged".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FrontendSettingsPayload {
    /// Optional update for the DeFi setup completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defi_setup_done: Option<bool>,
    /// Optional update for the timeframe preference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe_setting: Option<TimeFrameSetting>,
    /// Optional update for the fallback timeframe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_known_timeframe: Option<TimeFramePeriod>,
    /// Optional update for the background query interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_period: Option<u32>,
    /// Optional update for the profit/loss reporting scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_loss_report_period: Option<ProfitLossTimeframe>,
    /// Optional update for the thousands grouping character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thousand_separator: Option<String>,
    /// Optional update for the decimal separator character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_separator: Option<String>,
    /// Optional update for the currency symbol placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_location: Option<CurrencyLocation>,
    /// Optional update for the auto-refresh interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_period: Option<RefreshPeriod>,
    /// Optional replacement for the explorer overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorers: Option<ExplorersSettings>,
    /// Optional update for the pagination page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u32>,
}

impl FrontendSettingsPayload {
    /// Returns true when no field update was provided.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.defi_setup_done.is_none()
            && self.timeframe_setting.is_none()
            && self.last_known_timeframe.is_none()
            && self.query_period.is_none()
            && self.profit_loss_report_period.is_none()
            && self.thousand_separator.is_none()
            && self.decimal_separator.is_none()
            && self.currency_location.is_none()
            && self.refresh_period.is_none()
            && self.explorers.is_none()
            && self.items_per_page.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_state() -> SettingsState {
        SettingsState {
            defi_setup_done: false,
            timeframe_setting: TimeFrameSetting::Remember,
            last_known_timeframe: TimeFramePeriod::All,
            query_period: 5,
            profit_loss_report_period: ProfitLossTimeframe {
                year: "2026".to_string(),
                quarter: Quarter::All,
            },
            thousand_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            currency_location: CurrencyLocation::After,
            refresh_period: RefreshPeriod::DISABLED,
            explorers: ExplorersSettings::default(),
            items_per_page: 10,
        }
    }

    #[test]
    fn timeframe_tokens_round_trip() {
        for period in TimeFramePeriod::VALUES {
            assert_eq!(TimeFramePeriod::from_token(period.as_str()), Some(period));
        }
        assert_eq!(
            TimeFrameSetting::from_token("REMEMBER"),
            Some(TimeFrameSetting::Remember)
        );
        assert_eq!(
            TimeFrameSetting::from_token("2W"),
            Some(TimeFrameSetting::Period(TimeFramePeriod::TwoWeeks))
        );
        assert!(TimeFrameSetting::from_token("2Y").is_none());
    }

    #[test]
    fn timeframe_setting_serializes_as_plain_token() {
        let remember = serde_json::to_value(TimeFrameSetting::Remember).unwrap();
        assert_eq!(remember, json!("REMEMBER"));
        let fixed =
            serde_json::to_value(TimeFrameSetting::Period(TimeFramePeriod::Year)).unwrap();
        assert_eq!(fixed, json!("1Y"));

        let parsed: TimeFrameSetting = serde_json::from_value(json!("3M")).unwrap();
        assert_eq!(parsed, TimeFrameSetting::Period(TimeFramePeriod::ThreeMonths));
        assert!(serde_json::from_value::<TimeFrameSetting>(json!("NEVER")).is_err());
    }

    #[test]
    fn quarter_and_currency_tokens_round_trip() {
        for quarter in Quarter::VALUES {
            assert_eq!(Quarter::from_token(quarter.as_str()), Some(quarter));
        }
        assert!(Quarter::from_token("Q5").is_none());
        assert_eq!(
            CurrencyLocation::from_token("before"),
            Some(CurrencyLocation::Before)
        );
        assert!(CurrencyLocation::from_token("middle").is_none());
    }

    #[test]
    fn asset_symbols_are_a_closed_set() {
        for symbol in AssetSymbol::VALUES {
            assert_eq!(AssetSymbol::from_token(symbol.as_str()), Some(symbol));
        }
        assert!(AssetSymbol::from_token("XRP").is_none());
        assert!(AssetSymbol::from_token("eth").is_none());
    }

    #[test]
    fn explorers_get_and_set_agree() {
        let mut explorers = ExplorersSettings::default();
        assert!(explorers.is_empty());
        explorers.set(
            AssetSymbol::Btc,
            ExplorerEndpoints {
                transaction: None,
                address: Some("https://blockstream.info/address/{address}".to_string()),
            },
        );
        assert!(!explorers.is_empty());
        let endpoints = explorers.get(AssetSymbol::Btc).expect("override present");
        assert!(endpoints.transaction.is_none());
        assert!(explorers.get(AssetSymbol::Ksm).is_none());
    }

    #[test]
    fn refresh_period_zero_means_disabled() {
        assert!(RefreshPeriod::DISABLED.is_disabled());
        assert!(RefreshPeriod::default().is_disabled());
        assert!(!RefreshPeriod::from(30).is_disabled());
    }

    #[test]
    fn merge_with_empty_payload_is_identity() {
        let state = sample_state();
        let payload = FrontendSettingsPayload::default();
        assert!(payload.is_empty());
        assert_eq!(state.merged(&payload), state);
    }

    #[test]
    fn merge_replaces_only_present_fields() {
        let state = sample_state();
        let payload = FrontendSettingsPayload {
            items_per_page: Some(25),
            ..FrontendSettingsPayload::default()
        };

        let merged = state.merged(&payload);
        assert_eq!(merged.items_per_page, 25);
        assert_eq!(merged.query_period, state.query_period);
        assert_eq!(merged.timeframe_setting, state.timeframe_setting);
        assert_eq!(merged.explorers, state.explorers);

        let again = merged.merged(&payload);
        assert_eq!(again, merged);
    }

    #[test]
    fn state_serializes_with_wire_field_names() {
        let value = serde_json::to_value(sample_state()).unwrap();
        let object = value.as_object().expect("state serializes to an object");
        assert_eq!(object.len(), SettingsState::FIELD_NAMES.len());
        for field in SettingsState::FIELD_NAMES {
            assert!(object.contains_key(field), "missing wire field {field}");
        }
    }

    #[test]
    fn payload_rejects_unknown_keys_on_deserialize() {
        let result = serde_json::from_value::<FrontendSettingsPayload>(json!({
            "itemsPerPage": 25,
            "theme": "dark",
        }));
        assert!(result.is_err());
    }
}
