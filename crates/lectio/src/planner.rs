//! Reading plan tracker.
//!
//! Owns the built-in plan catalog, the user's active plans, and the per-day
//! completion sets. The completion set is authoritative; each day's
//! `completed` flag is a cache the UI updates through the edge-triggered
//! `mark_day_*` operations, and `restore` realigns the two at startup.
//!
//! Every mutation persists through the [`StateStore`] immediately,
//! last-writer-wins. A persistence failure is logged and never rolls back
//! in-memory state: the session stays consistent even when the disk does
//! not.
//!
//! All mutating methods take `&mut self`, so writes for the same plan-day
//! key are serialized by ownership — the embedding app keeps the tracker on
//! its one foreground context and no locking is needed.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::watch;
use tracing::warn;

use lectio_core::error::PlanError;
use lectio_core::models::{ActivePlan, Plan, PlanDay, UnitKey};
use lectio_core::progress::{self, DayTransition};
use lectio_core::store::{completed_units_key, StateStore, ACTIVE_PLANS_KEY};

use crate::catalog;
use crate::content::ContentStore;

pub struct ReadingPlanTracker {
    store: Arc<ContentStore>,
    state: Arc<dyn StateStore>,
    catalog: Vec<Plan>,
    active: Vec<ActivePlan>,
    completions: HashMap<(String, u32), BTreeSet<UnitKey>>,
    active_tx: watch::Sender<Vec<ActivePlan>>,
}

impl ReadingPlanTracker {
    pub fn new(store: Arc<ContentStore>, state: Arc<dyn StateStore>) -> Self {
        let (active_tx, _) = watch::channel(Vec::new());
        ReadingPlanTracker {
            store,
            state,
            catalog: catalog::builtin_plans(),
            active: Vec::new(),
            completions: HashMap::new(),
            active_tx,
        }
    }

    /// Reload active plans and their completion sets from the state store.
    ///
    /// Corrupt entries are skipped with a warning rather than failing the
    /// session; only backend I/O errors propagate. Cached `completed` flags
    /// are realigned with actual completion afterwards.
    pub async fn restore(&mut self) -> Result<()> {
        if let Some(raw) = self.state.get(ACTIVE_PLANS_KEY).await? {
            match serde_json::from_str::<Vec<ActivePlan>>(&raw) {
                Ok(plans) => self.active = plans,
                Err(err) => warn!(error = %err, "skipping corrupt active plan list"),
            }
        }

        self.completions.clear();
        let day_keys: Vec<(String, u32)> = self
            .active
            .iter()
            .flat_map(|ap| {
                let plan_id = ap.plan.id.clone();
                ap.plan
                    .days
                    .iter()
                    .map(move |d| (plan_id.clone(), d.day_number))
                    .collect::<Vec<_>>()
            })
            .collect();

        for (plan_id, day_number) in day_keys {
            let key = completed_units_key(&plan_id, day_number);
            let Some(raw) = self.state.get(&key).await? else {
                continue;
            };
            let entries: Vec<String> = match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(key = %key, error = %err, "skipping corrupt completion set");
                    continue;
                }
            };
            let mut set = BTreeSet::new();
            for encoded in entries {
                match UnitKey::decode(&encoded) {
                    Some(unit) => {
                        set.insert(unit);
                    }
                    None => warn!(key = %key, entry = %encoded, "skipping unrecognized completion entry"),
                }
            }
            if !set.is_empty() {
                self.completions.insert((plan_id, day_number), set);
            }
        }

        self.reconcile_cached_flags();
        self.publish();
        Ok(())
    }

    pub fn catalog(&self) -> &[Plan] {
        &self.catalog
    }

    pub fn catalog_plan(&self, plan_id: &str) -> Option<&Plan> {
        self.catalog.iter().find(|p| p.id == plan_id)
    }

    pub fn active_plans(&self) -> &[ActivePlan] {
        &self.active
    }

    /// Observe the active plan list reactively.
    pub fn subscribe_active(&self) -> watch::Receiver<Vec<ActivePlan>> {
        self.active_tx.subscribe()
    }

    /// Start a catalog plan: deep-copy it with every day reset, append it to
    /// the active list, and persist. Starting a plan that is already active
    /// is rejected — remove it first to reset progress.
    pub async fn start(&mut self, plan_id: &str) -> Result<(), PlanError> {
        if self.active.iter().any(|ap| ap.plan.id == plan_id) {
            return Err(PlanError::AlreadyActive(plan_id.to_string()));
        }
        let Some(entry) = self.catalog_plan(plan_id) else {
            return Err(PlanError::UnknownPlan(plan_id.to_string()));
        };

        let mut plan = entry.clone();
        for day in &mut plan.days {
            day.completed = false;
            day.completed_at = None;
        }
        let day_numbers: Vec<u32> = plan.days.iter().map(|d| d.day_number).collect();

        self.active.push(ActivePlan {
            plan,
            started_at: Utc::now(),
        });

        // A previous run of this plan may have left per-day sets behind;
        // clear them so the fresh copy starts from zero.
        for day_number in day_numbers {
            self.completions.remove(&(plan_id.to_string(), day_number));
            self.persist(&completed_units_key(plan_id, day_number), "[]")
                .await;
        }

        self.persist_active().await;
        self.publish();
        Ok(())
    }

    /// Delete an active plan and persist the reduced list. Persisted
    /// completion sets are left orphaned; they are ignored, not erased.
    pub async fn remove(&mut self, plan_id: &str) -> Result<(), PlanError> {
        let pos = self
            .active
            .iter()
            .position(|ap| ap.plan.id == plan_id)
            .ok_or_else(|| PlanError::UnknownPlan(plan_id.to_string()))?;
        self.active.remove(pos);
        self.completions.retain(|(id, _), _| id.as_str() != plan_id);
        self.persist_active().await;
        self.publish();
        Ok(())
    }

    /// Flip membership of `unit` in the day's completion set and persist the
    /// set. Returns the edge-triggered transition of the actual-completion
    /// predicate; the caller applies it via [`mark_day_completed`] /
    /// [`mark_day_incomplete`] so the cached flag follows the transition,
    /// not every toggle.
    ///
    /// [`mark_day_completed`]: ReadingPlanTracker::mark_day_completed
    /// [`mark_day_incomplete`]: ReadingPlanTracker::mark_day_incomplete
    pub async fn toggle_unit(
        &mut self,
        plan_id: &str,
        day_number: u32,
        unit: UnitKey,
    ) -> Result<DayTransition, PlanError> {
        let (estimated, covered) = {
            let ap = self
                .active
                .iter()
                .find(|ap| ap.plan.id == plan_id)
                .ok_or_else(|| PlanError::UnknownPlan(plan_id.to_string()))?;
            let day = ap.day(day_number).ok_or_else(|| PlanError::UnknownDay {
                plan_id: plan_id.to_string(),
                day_number,
            })?;
            (self.day_estimated(day), progress::day_covers(day, &unit))
        };
        if !covered {
            return Err(PlanError::UnitNotInDay {
                plan_id: plan_id.to_string(),
                day_number,
                unit: unit.encode(),
            });
        }

        let set = self
            .completions
            .entry((plan_id.to_string(), day_number))
            .or_default();
        let before = progress::is_actually_complete(set.len(), estimated);
        progress::toggle(set, unit);
        let after = progress::is_actually_complete(set.len(), estimated);

        let encoded: Vec<String> = set.iter().map(UnitKey::encode).collect();
        match serde_json::to_string(&encoded) {
            Ok(raw) => {
                self.persist(&completed_units_key(plan_id, day_number), &raw)
                    .await;
            }
            Err(err) => warn!(error = %err, "failed to serialize completion set"),
        }

        Ok(DayTransition::between(before, after))
    }

    /// Set the cached `completed` flag after a `false → true` transition.
    /// No-op when the flag already matches (edge-triggered).
    pub async fn mark_day_completed(
        &mut self,
        plan_id: &str,
        day_number: u32,
    ) -> Result<(), PlanError> {
        self.set_cached_flag(plan_id, day_number, true).await
    }

    /// Set the cached `completed` flag after a `true → false` transition.
    pub async fn mark_day_incomplete(
        &mut self,
        plan_id: &str,
        day_number: u32,
    ) -> Result<(), PlanError> {
        self.set_cached_flag(plan_id, day_number, false).await
    }

    /// The single source of truth: the completion set has reached the day's
    /// estimated sub-unit total. Unknown plans and days are simply not
    /// complete.
    pub fn is_day_actually_complete(&self, plan_id: &str, day_number: u32) -> bool {
        let Some(ap) = self.active.iter().find(|ap| ap.plan.id == plan_id) else {
            return false;
        };
        let Some(day) = ap.day(day_number) else {
            return false;
        };
        self.day_actual(&ap.plan.id, day)
    }

    /// First day in day-number order that is not actually complete; `None`
    /// when the plan is finished or unknown.
    pub fn next_unread_day(&self, plan_id: &str) -> Option<&PlanDay> {
        let ap = self.active.iter().find(|ap| ap.plan.id == plan_id)?;
        let mut days: Vec<&PlanDay> = ap.plan.days.iter().collect();
        days.sort_by_key(|d| d.day_number);
        days.into_iter().find(|d| !self.day_actual(&ap.plan.id, d))
    }

    pub fn actual_completed_days(&self, plan_id: &str) -> usize {
        let Some(ap) = self.active.iter().find(|ap| ap.plan.id == plan_id) else {
            return 0;
        };
        ap.plan
            .days
            .iter()
            .filter(|d| self.day_actual(&ap.plan.id, d))
            .count()
    }

    /// Fraction of actually-complete days, in `[0, 1]`. An empty or unknown
    /// plan yields `0`, never `NaN`.
    pub fn actual_progress(&self, plan_id: &str) -> f64 {
        let Some(ap) = self.active.iter().find(|ap| ap.plan.id == plan_id) else {
            return 0.0;
        };
        progress::progress_fraction(self.actual_completed_days(plan_id), ap.plan.days.len())
    }

    /// The day's completion set, if any unit has ever been toggled.
    pub fn completed_units(&self, plan_id: &str, day_number: u32) -> Option<&BTreeSet<UnitKey>> {
        self.completions.get(&(plan_id.to_string(), day_number))
    }

    fn day_estimated(&self, day: &PlanDay) -> usize {
        day.references
            .iter()
            .map(|r| self.store.estimated_unit_count(r))
            .sum()
    }

    fn day_actual(&self, plan_id: &str, day: &PlanDay) -> bool {
        let completed = self
            .completions
            .get(&(plan_id.to_string(), day.day_number))
            .map_or(0, BTreeSet::len);
        progress::is_actually_complete(completed, self.day_estimated(day))
    }

    fn reconcile_cached_flags(&mut self) {
        let mut stale: Vec<(usize, u32, bool)> = Vec::new();
        for (pos, ap) in self.active.iter().enumerate() {
            for day in &ap.plan.days {
                let actual = self.day_actual(&ap.plan.id, day);
                if day.completed != actual {
                    stale.push((pos, day.day_number, actual));
                }
            }
        }
        for (pos, day_number, actual) in stale {
            if let Some(day) = self.active[pos].day_mut(day_number) {
                day.completed = actual;
                if !actual {
                    day.completed_at = None;
                }
            }
        }
    }

    async fn set_cached_flag(
        &mut self,
        plan_id: &str,
        day_number: u32,
        completed: bool,
    ) -> Result<(), PlanError> {
        let changed = {
            let ap = self
                .active
                .iter_mut()
                .find(|ap| ap.plan.id == plan_id)
                .ok_or_else(|| PlanError::UnknownPlan(plan_id.to_string()))?;
            let day = ap.day_mut(day_number).ok_or_else(|| PlanError::UnknownDay {
                plan_id: plan_id.to_string(),
                day_number,
            })?;
            if day.completed == completed {
                false
            } else {
                day.completed = completed;
                day.completed_at = if completed { Some(Utc::now()) } else { None };
                true
            }
        };
        if changed {
            self.persist_active().await;
            self.publish();
        }
        Ok(())
    }

    async fn persist_active(&self) {
        match serde_json::to_string(&self.active) {
            Ok(raw) => self.persist(ACTIVE_PLANS_KEY, &raw).await,
            Err(err) => warn!(error = %err, "failed to serialize active plans"),
        }
    }

    async fn persist(&self, key: &str, value: &str) {
        if let Err(err) = self.state.put(key, value).await {
            warn!(key = %key, error = %err, "failed to persist plan state");
        }
    }

    fn publish(&self) {
        self.active_tx.send_replace(self.active.clone());
    }
}
