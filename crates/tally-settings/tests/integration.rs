use serde_json::json;
use tally_settings::{
    AssetSymbol, FrontendSettingsPayload, Quarter, RefreshPeriod, SettingsError, SettingsState,
    SettingsStore, TimeFramePeriod, TimeFrameSetting, payload_from_value, settings_from_value,
};

#[test]
fn store_applies_json_payloads_end_to_end() -> anyhow::Result<()> {
    let store = SettingsStore::default();
    let initial = store.snapshot();
    assert_eq!(initial.revision, 0);
    assert_eq!(initial.settings.items_per_page, 10);

    let applied = store.apply_value(&json!({
        "defiSetupDone": true,
        "timeframeSetting": "1Y",
        "itemsPerPage": 25,
        "refreshPeriod": 120,
        "explorers": {
            "BTC": { "address": "https://x/{address}" },
            "ETH": {
                "transaction": "https://etherscan.io/tx/{tx}",
                "address": "https://etherscan.io/address/{address}"
            }
        },
        "profitLossReportPeriod": { "year": "2025", "quarter": "Q4" }
    }))?;

    assert!(applied.changed);
    assert_eq!(applied.revision, 1);
    assert!(applied.settings.defi_setup_done);
    assert_eq!(
        applied.settings.timeframe_setting,
        TimeFrameSetting::Period(TimeFramePeriod::Year)
    );
    assert_eq!(applied.settings.items_per_page, 25);
    assert_eq!(applied.settings.refresh_period, RefreshPeriod::from(120));
    assert_eq!(applied.settings.profit_loss_report_period.quarter, Quarter::Q4);
    let btc = applied
        .settings
        .explorers
        .get(AssetSymbol::Btc)
        .expect("BTC override recorded");
    assert_eq!(btc.address.as_deref(), Some("https://x/{address}"));

    // Untouched fields keep their seeded values.
    assert_eq!(
        applied.settings.thousand_separator,
        initial.settings.thousand_separator
    );
    assert_eq!(
        applied.settings.currency_location,
        initial.settings.currency_location
    );

    // Every state the store produces satisfies the full contract.
    let round_tripped = settings_from_value(&serde_json::to_value(&applied.settings)?)?;
    assert_eq!(round_tripped, applied.settings);
    Ok(())
}

#[test]
fn merge_identity_and_idempotence() -> anyhow::Result<()> {
    let state = SettingsState::default();

    let empty = payload_from_value(&json!({}))?;
    assert!(empty.is_empty());
    assert_eq!(state.merged(&empty), state);

    let payload = payload_from_value(&json!({
        "itemsPerPage": 25,
        "decimalSeparator": ","
    }))?;
    let once = state.merged(&payload);
    let twice = once.merged(&payload);
    assert_eq!(once, twice);
    assert_eq!(once.items_per_page, 25);
    assert_eq!(once.decimal_separator, ",");
    assert_eq!(once.thousand_separator, state.thousand_separator);
    Ok(())
}

#[test]
fn rejections_name_the_offending_field() {
    let err = payload_from_value(&json!({ "timeframeSetting": "INVALID_TOKEN" }))
        .expect_err("invalid token");
    assert!(matches!(
        err,
        SettingsError::InvalidField { ref field, .. } if field == "timeframeSetting"
    ));

    let err = payload_from_value(&json!({ "explorers": { "XRP": {} } }))
        .expect_err("asset outside the closed set");
    assert!(matches!(
        err,
        SettingsError::UnknownField { ref field } if field == "explorers.XRP"
    ));

    let err =
        payload_from_value(&json!({ "refreshPeriod": -1 })).expect_err("negative interval");
    assert!(matches!(
        err,
        SettingsError::InvalidField { ref field, .. } if field == "refreshPeriod"
    ));

    let ok = payload_from_value(&json!({ "refreshPeriod": 0 })).expect("disabled interval");
    assert_eq!(ok.refresh_period, Some(RefreshPeriod::DISABLED));
}

#[test]
fn restore_round_trips_through_the_persistence_shape() -> anyhow::Result<()> {
    let store = SettingsStore::default();
    store.apply(&FrontendSettingsPayload {
        timeframe_setting: Some(TimeFrameSetting::Period(TimeFramePeriod::TwoWeeks)),
        last_known_timeframe: Some(TimeFramePeriod::TwoWeeks),
        items_per_page: Some(50),
        ..FrontendSettingsPayload::default()
    });
    let saved = serde_json::to_value(&store.snapshot().settings)?;

    let fresh = SettingsStore::default();
    let restored = fresh.restore_value(&saved)?;
    assert!(restored.changed);
    assert_eq!(restored.settings, store.snapshot().settings);
    assert_eq!(
        restored.settings.timeframe_setting,
        TimeFrameSetting::Period(TimeFramePeriod::TwoWeeks)
    );
    Ok(())
}

#[test]
fn every_single_field_removal_fails_restore() -> anyhow::Result<()> {
    let saved = serde_json::to_value(SettingsState::default())?;

    for field in SettingsState::FIELD_NAMES {
        let mut document = saved.clone();
        document
            .as_object_mut()
            .expect("state serializes to an object")
            .remove(field);

        let store = SettingsStore::default();
        let err = store
            .restore_value(&document)
            .expect_err("document with a removed field must not validate");
        assert_eq!(
            err,
            SettingsError::MissingField {
                field: field.to_string()
            }
        );
    }
    Ok(())
}
