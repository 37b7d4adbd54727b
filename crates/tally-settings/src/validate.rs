//! Structural validation for settings documents arriving as JSON.
//!
//! Saved settings blobs and frontend update payloads both cross the store
//! boundary as `serde_json::Value`. The helpers here check those documents
//! field by field so every rejection names the offending field instead of
//! surfacing a generic deserialization failure.

use serde_json::{Map, Value};

use crate::error::{SettingsError, SettingsResult};
use crate::model::{
    AssetSymbol, CURRENCY_LOCATION, CurrencyLocation, DECIMAL_SEPARATOR, DEFI_SETUP_DONE,
    EXPLORERS, ExplorerEndpoints, ExplorersSettings, FrontendSettingsPayload, ITEMS_PER_PAGE,
    LAST_KNOWN_TIMEFRAME, PROFIT_LOSS_PERIOD, ProfitLossTimeframe, QUERY_PERIOD, Quarter,
    REFRESH_PERIOD, RefreshPeriod, SettingsState, THOUSAND_SEPARATOR, TIMEFRAME_SETTING,
    TimeFramePeriod, TimeFrameSetting,
};

/// Validate a document as a complete [`SettingsState`].
///
/// Succeeds only when the document is an object carrying exactly the closed
/// settings field set, every field present and valid. Unknown keys are
/// rejected; the contract treats the field set as closed in both directions.
///
/// # Errors
///
/// Returns [`SettingsError::MissingField`] for an absent field,
/// [`SettingsError::UnknownField`] for a key outside the set, and
/// [`SettingsError::InvalidField`] when a value fails its own constraint.
pub fn settings_from_value(value: &Value) -> SettingsResult<SettingsState> {
    let object = as_object(value, "settings")?;
    reject_unknown_keys(object)?;

    Ok(SettingsState {
        defi_setup_done: parse_bool(require(object, DEFI_SETUP_DONE)?, DEFI_SETUP_DONE)?,
        timeframe_setting: parse_timeframe_setting(require(object, TIMEFRAME_SETTING)?)?,
        last_known_timeframe: parse_timeframe_period(require(object, LAST_KNOWN_TIMEFRAME)?)?,
        query_period: parse_interval(require(object, QUERY_PERIOD)?, QUERY_PERIOD)?,
        profit_loss_report_period: parse_profit_loss(require(object, PROFIT_LOSS_PERIOD)?)?,
        thousand_separator: parse_separator(require(object, THOUSAND_SEPARATOR)?, THOUSAND_SEPARATOR)?,
        decimal_separator: parse_separator(require(object, DECIMAL_SEPARATOR)?, DECIMAL_SEPARATOR)?,
        currency_location: parse_currency_location(require(object, CURRENCY_LOCATION)?)?,
        refresh_period: RefreshPeriod(parse_interval(
            require(object, REFRESH_PERIOD)?,
            REFRESH_PERIOD,
        )?),
        explorers: parse_explorers(require(object, EXPLORERS)?)?,
        items_per_page: parse_page_size(require(object, ITEMS_PER_PAGE)?)?,
    })
}

/// Validate a document as a partial [`FrontendSettingsPayload`].
///
/// Every present key must belong to the settings field set and carry a valid
/// value; absent keys are always acceptable, including the empty object.
///
/// # Errors
///
/// Returns [`SettingsError::UnknownField`] for a key outside the set and
/// [`SettingsError::InvalidField`] when a present value fails its own
/// constraint.
pub fn payload_from_value(value: &Value) -> SettingsResult<FrontendSettingsPayload> {
    let object = as_object(value, "payload")?;
    let mut payload = FrontendSettingsPayload::default();

    for (key, entry) in object {
        match key.as_str() {
            DEFI_SETUP_DONE => payload.defi_setup_done = Some(parse_bool(entry, DEFI_SETUP_DONE)?),
            TIMEFRAME_SETTING => payload.timeframe_setting = Some(parse_timeframe_setting(entry)?),
            LAST_KNOWN_TIMEFRAME => {
                payload.last_known_timeframe = Some(parse_timeframe_period(entry)?);
            }
            QUERY_PERIOD => payload.query_period = Some(parse_interval(entry, QUERY_PERIOD)?),
            PROFIT_LOSS_PERIOD => {
                payload.profit_loss_report_period = Some(parse_profit_loss(entry)?);
            }
            THOUSAND_SEPARATOR => {
                payload.thousand_separator = Some(parse_separator(entry, THOUSAND_SEPARATOR)?);
            }
            DECIMAL_SEPARATOR => {
                payload.decimal_separator = Some(parse_separator(entry, DECIMAL_SEPARATOR)?);
            }
            CURRENCY_LOCATION => payload.currency_location = Some(parse_currency_location(entry)?),
            REFRESH_PERIOD => {
                payload.refresh_period = Some(RefreshPeriod(parse_interval(entry, REFRESH_PERIOD)?));
            }
            EXPLORERS => payload.explorers = Some(parse_explorers(entry)?),
            ITEMS_PER_PAGE => payload.items_per_page = Some(parse_page_size(entry)?),
            other => {
                return Err(SettingsError::UnknownField {
                    field: other.to_string(),
                });
            }
        }
    }

    Ok(payload)
}

fn as_object<'a>(value: &'a Value, field: &str) -> SettingsResult<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| invalid(field, value, "must be an object"))
}

fn require<'a>(object: &'a Map<String, Value>, field: &str) -> SettingsResult<&'a Value> {
    object.get(field).ok_or_else(|| SettingsError::MissingField {
        field: field.to_string(),
    })
}

fn reject_unknown_keys(object: &Map<String, Value>) -> SettingsResult<()> {
    for key in object.keys() {
        if !SettingsState::FIELD_NAMES.contains(&key.as_str()) {
            return Err(SettingsError::UnknownField { field: key.clone() });
        }
    }
    Ok(())
}

fn invalid(field: &str, value: &Value, reason: &'static str) -> SettingsError {
    SettingsError::InvalidField {
        field: field.to_string(),
        value: Some(value.to_string()),
        reason,
    }
}

fn parse_bool(value: &Value, field: &str) -> SettingsResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| invalid(field, value, "must be a boolean"))
}

fn parse_string<'a>(value: &'a Value, field: &str) -> SettingsResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| invalid(field, value, "must be a string"))
}

/// Non-negative integer used for polling and refresh intervals. Zero is a
/// valid value and means the interval is disabled.
fn parse_interval(value: &Value, field: &str) -> SettingsResult<u32> {
    let raw = value
        .as_i64()
        .ok_or_else(|| invalid(field, value, "must be an integer"))?;
    if raw < 0 {
        return Err(invalid(field, value, "must not be negative"));
    }
    u32::try_from(raw).map_err(|_| invalid(field, value, "must fit within 32-bit unsigned range"))
}

fn parse_page_size(value: &Value) -> SettingsResult<u32> {
    let size = parse_interval(value, ITEMS_PER_PAGE)?;
    if size == 0 {
        return Err(invalid(ITEMS_PER_PAGE, value, "must be a positive integer"));
    }
    Ok(size)
}

fn parse_separator(value: &Value, field: &str) -> SettingsResult<String> {
    let separator = parse_string(value, field)?;
    if separator.is_empty() {
        return Err(invalid(field, value, "must not be empty"));
    }
    Ok(separator.to_string())
}

fn parse_timeframe_setting(value: &Value) -> SettingsResult<TimeFrameSetting> {
    let token = parse_string(value, TIMEFRAME_SETTING)?;
    TimeFrameSetting::from_token(token).ok_or_else(|| {
        invalid(
            TIMEFRAME_SETTING,
            value,
            "must be REMEMBER or one of All, 1Y, 3M, 1M, 2W, 1W",
        )
    })
}

fn parse_timeframe_period(value: &Value) -> SettingsResult<TimeFramePeriod> {
    let token = parse_string(value, LAST_KNOWN_TIMEFRAME)?;
    TimeFramePeriod::from_token(token).ok_or_else(|| {
        invalid(
            LAST_KNOWN_TIMEFRAME,
            value,
            "must be one of All, 1Y, 3M, 1M, 2W, 1W",
        )
    })
}

fn parse_currency_location(value: &Value) -> SettingsResult<CurrencyLocation> {
    let token = parse_string(value, CURRENCY_LOCATION)?;
    CurrencyLocation::from_token(token)
        .ok_or_else(|| invalid(CURRENCY_LOCATION, value, "must be 'before' or 'after'"))
}

fn parse_profit_loss(value: &Value) -> SettingsResult<ProfitLossTimeframe> {
    let object = as_object(value, PROFIT_LOSS_PERIOD)?;
    for key in object.keys() {
        if key != "year" && key != "quarter" {
            return Err(SettingsError::UnknownField {
                field: format!("{PROFIT_LOSS_PERIOD}.{key}"),
            });
        }
    }

    let year_field = format!("{PROFIT_LOSS_PERIOD}.year");
    let year_value = object
        .get("year")
        .ok_or_else(|| SettingsError::MissingField {
            field: year_field.clone(),
        })?;
    let year = parse_string(year_value, &year_field)?;
    if year.is_empty() {
        return Err(SettingsError::InvalidField {
            field: year_field,
            value: Some(year_value.to_string()),
            reason: "must not be empty",
        });
    }

    let quarter_field = format!("{PROFIT_LOSS_PERIOD}.quarter");
    let quarter_value = object
        .get("quarter")
        .ok_or_else(|| SettingsError::MissingField {
            field: quarter_field.clone(),
        })?;
    let quarter_token = parse_string(quarter_value, &quarter_field)?;
    let quarter = Quarter::from_token(quarter_token).ok_or_else(|| SettingsError::InvalidField {
        field: quarter_field,
        value: Some(quarter_value.to_string()),
        reason: "must be one of Q1, Q2, Q3, Q4, ALL",
    })?;

    Ok(ProfitLossTimeframe {
        year: year.to_string(),
        quarter,
    })
}

fn parse_explorers(value: &Value) -> SettingsResult<ExplorersSettings> {
    let object = as_object(value, EXPLORERS)?;
    let mut explorers = ExplorersSettings::default();

    for (key, entry) in object {
        let field = format!("{EXPLORERS}.{key}");
        let Some(asset) = AssetSymbol::from_token(key) else {
            return Err(SettingsError::UnknownField { field });
        };
        explorers.set(asset, parse_endpoints(entry, &field)?);
    }

    Ok(explorers)
}

fn parse_endpoints(value: &Value, field: &str) -> SettingsResult<ExplorerEndpoints> {
    let object = as_object(value, field)?;
    let mut endpoints = ExplorerEndpoints::default();

    for (key, entry) in object {
        let entry_field = format!("{field}.{key}");
        match key.as_str() {
            "transaction" => {
                endpoints.transaction = Some(parse_url_template(entry, &entry_field)?);
            }
            "address" => endpoints.address = Some(parse_url_template(entry, &entry_field)?),
            _ => return Err(SettingsError::UnknownField { field: entry_field }),
        }
    }

    Ok(endpoints)
}

// Placeholder substitution is a rendering concern; the contract only asks for
// a non-empty template string here.
fn parse_url_template(value: &Value, field: &str) -> SettingsResult<String> {
    let template = parse_string(value, field)?;
    if template.trim().is_empty() {
        return Err(invalid(field, value, "must not be empty"));
    }
    Ok(template.to_string())
}
