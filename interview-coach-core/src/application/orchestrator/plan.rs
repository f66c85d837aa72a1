//! Per-call execution plans.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::config::Tier;
use crate::infrastructure::model::ModelRegistry;

/// Source of randomness for ordering primary providers.
pub trait ProviderShuffle: Send + Sync {
    fn shuffle(&self, names: &mut [String]);
}

/// Thread-local RNG. The production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomShuffle;

impl ProviderShuffle for RandomShuffle {
    fn shuffle(&self, names: &mut [String]) {
        names.shuffle(&mut rand::thread_rng());
    }
}

/// Reproducible order: every call shuffles with a fresh RNG from `seed`.
#[derive(Debug, Clone, Copy)]
pub struct SeededShuffle(pub u64);

impl ProviderShuffle for SeededShuffle {
    fn shuffle(&self, names: &mut [String]) {
        names.shuffle(&mut StdRng::seed_from_u64(self.0));
    }
}

/// Keeps registration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepOrder;

impl ProviderShuffle for KeepOrder {
    fn shuffle(&self, _names: &mut [String]) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAttempt {
    pub provider: String,
    pub tier: Tier,
}

/// Ordered provider names for one orchestration call.
///
/// Primary providers come first in shuffled order, fallback providers follow
/// in registration order. Only registered providers ever appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionPlan {
    attempts: Vec<PlannedAttempt>,
}

impl ExecutionPlan {
    pub fn build(registry: &ModelRegistry, shuffle: &dyn ProviderShuffle) -> Self {
        let mut primary: Vec<String> = registry
            .names(Tier::Primary)
            .into_iter()
            .map(str::to_string)
            .collect();
        shuffle.shuffle(&mut primary);

        let attempts = primary
            .into_iter()
            .map(|provider| PlannedAttempt {
                provider,
                tier: Tier::Primary,
            })
            .chain(
                registry
                    .names(Tier::Fallback)
                    .into_iter()
                    .map(|name| PlannedAttempt {
                        provider: name.to_string(),
                        tier: Tier::Fallback,
                    }),
            )
            .collect();

        Self { attempts }
    }

    pub fn names(&self) -> Vec<&str> {
        self.attempts.iter().map(|a| a.provider.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlannedAttempt> {
        self.attempts.iter()
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}
