use snitchit_api_models::{AlertType, Interval};
use snitchit_config::{
    ConfigError, Plan, config_file_path, ensure_plan_permits, load_file_config, parse_alert_type,
    parse_interval, parse_plan,
};
use snitchit_test_support::fixtures::{SAMPLE_CONFIG_YAML, write_config};

#[test]
fn sample_config_resolves_to_a_permitted_triple() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_config(dir.path(), "config.yaml", SAMPLE_CONFIG_YAML);

    let path = config_file_path(dir.path(), std::path::Path::new("config"));
    let file = load_file_config(&path)?.ok_or_else(|| anyhow::anyhow!("config missing"))?;

    let plan = parse_plan(file.plan.as_deref().unwrap_or("free"))?;
    let alert = parse_alert_type(file.alert.as_deref().unwrap_or("basic"))?;
    let interval = file.interval.as_deref().map(parse_interval).transpose()?;

    assert_eq!(plan, Plan::Large);
    assert_eq!(alert, AlertType::Smart);
    assert_eq!(interval, Some(Interval::Hourly));
    ensure_plan_permits(plan, alert, interval)?;
    Ok(())
}

#[test]
fn smart_alerts_on_free_plan_are_rejected() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_config(
        dir.path(),
        "config.yaml",
        "plan: free\nalert: smart\ninterval: monthly\n",
    );
    let file = load_file_config(&path)?.ok_or_else(|| anyhow::anyhow!("config missing"))?;

    let plan = parse_plan(file.plan.as_deref().unwrap_or_default())?;
    let alert = parse_alert_type(file.alert.as_deref().unwrap_or_default())?;
    let interval = file.interval.as_deref().map(parse_interval).transpose()?;

    let err = ensure_plan_permits(plan, alert, interval)
        .err()
        .ok_or_else(|| anyhow::anyhow!("free plan should reject smart alerts"))?;
    assert!(matches!(err, ConfigError::PlanCombination { .. }));
    Ok(())
}
