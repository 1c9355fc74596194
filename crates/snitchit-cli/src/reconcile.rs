//! Minimal-patch computation for the update path.
//!
//! Comparison is always remote vs desired: an unspecified desired field keeps
//! the remote value, a specified one is staged only when it differs.

use std::collections::BTreeSet;

use snitchit_api_models::{AlertType, Snitch, SnitchPatch};
use snitchit_config::{ConfigResult, DesiredConfig, Plan, ensure_plan_permits};

/// Fields of `desired` that differ from `remote`.
pub(crate) fn compute_patch(remote: &Snitch, desired: &DesiredConfig) -> SnitchPatch {
    SnitchPatch {
        name: desired
            .name
            .as_ref()
            .filter(|name| **name != remote.name)
            .cloned(),
        notes: desired
            .notes
            .as_ref()
            .filter(|notes| **notes != remote.notes)
            .cloned(),
        interval: desired
            .interval
            .filter(|interval| remote.interval_kind() != Some(*interval)),
        alert_type: desired
            .alert_type
            .filter(|alert| remote.alert_kind() != Some(*alert)),
        tags: desired
            .tags
            .as_ref()
            .filter(|tags| !same_tag_set(tags, &remote.tags))
            .cloned(),
    }
}

fn same_tag_set(left: &[String], right: &[String]) -> bool {
    left.iter().collect::<BTreeSet<_>>() == right.iter().collect::<BTreeSet<_>>()
}

/// Re-check the plan matrix against the triple the snitch will have after
/// `patch` is applied. Only runs when the patch touches interval or alert type.
///
/// # Errors
///
/// Returns [`snitchit_config::ConfigError::PlanCombination`] when the effective
/// triple is not allowed.
pub(crate) fn validate_patch(remote: &Snitch, patch: &SnitchPatch, plan: Plan) -> ConfigResult<()> {
    if patch.interval.is_none() && patch.alert_type.is_none() {
        return Ok(());
    }
    let alert = patch
        .alert_type
        .or_else(|| remote.alert_kind())
        .unwrap_or(AlertType::Basic);
    let interval = patch.interval.or_else(|| remote.interval_kind());
    ensure_plan_permits(plan, alert, interval)
}
