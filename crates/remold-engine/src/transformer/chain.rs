//! Transformer chain composition and execution.

use remold_core::context::TransformContext;
use remold_core::value::AnyValue;

use super::TransformerUnit;
use super::descriptor::Transformer;
use crate::error::{TransformError, TransformResult};

/// Tracing target for chain execution.
const TRACING_TARGET: &str = "remold_engine::chain";

/// State of one chain execution.
///
/// Transitions are strictly sequential and non-resumable: a run moves from
/// `NotStarted` through `Running` per hop to either `Succeeded` or `Failed`,
/// and a finished run is never resumed or reused. Hop positions are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ChainState {
    /// No hop has run yet.
    NotStarted,
    /// The hop at the carried position is executing.
    Running(usize),
    /// Every hop completed.
    Succeeded,
    /// The hop at the carried position failed; no later hop ran.
    Failed(usize),
}

/// An ordered sequence of transformers executed as a single unit.
///
/// Execution pipes the output of each hop into the next one and passes the
/// same [`TransformContext`] instance to every hop — no snapshotting, no
/// isolation. State written by one hop is visible to all later ones.
#[derive(Debug, Clone, Default)]
pub struct TransformerChain {
    steps: Vec<Transformer>,
}

impl TransformerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hop to the chain.
    pub fn add_step(&mut self, step: Transformer) {
        self.steps.push(step);
    }

    /// Returns the number of hops.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns whether the chain has no hops.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the hops in execution order.
    pub fn steps(&self) -> &[Transformer] {
        &self.steps
    }
}

impl TransformerUnit for TransformerChain {
    fn apply(&self, value: AnyValue, ctx: &mut TransformContext) -> TransformResult<AnyValue> {
        let mut state = ChainState::NotStarted;
        tracing::trace!(
            target: TRACING_TARGET,
            state = %state,
            hops = self.steps.len(),
            "Starting chain execution"
        );

        let mut current = value;
        for (idx, step) in self.steps.iter().enumerate() {
            let position = idx + 1;
            state = ChainState::Running(position);
            tracing::trace!(
                target: TRACING_TARGET,
                state = %state,
                hop = position,
                edge = %step.key(),
                transformer = step.name(),
                "Executing chain hop"
            );

            current = match step.apply(current, ctx) {
                Ok(next) => next,
                Err(err) => {
                    state = ChainState::Failed(position);
                    tracing::debug!(
                        target: TRACING_TARGET,
                        state = %state,
                        hop = position,
                        edge = %step.key(),
                        "Chain hop failed"
                    );
                    return Err(position_error(err, position, step));
                }
            };
        }

        state = ChainState::Succeeded;
        tracing::trace!(target: TRACING_TARGET, state = %state, "Chain execution completed");
        Ok(current)
    }
}

/// Rewraps a hop failure with its position and edge types within the chain.
fn position_error(err: TransformError, position: usize, step: &Transformer) -> TransformError {
    match err {
        TransformError::Execution {
            from, to, name, cause, ..
        } => TransformError::Execution {
            hop: position,
            from,
            to,
            name,
            cause,
        },
        other => TransformError::Execution {
            hop: position,
            from: step.key().from,
            to: step.key().to,
            name: step.name().to_owned(),
            cause: Box::new(other),
        },
    }
}
