//! Card behaviors and the records produced by applying them.

use serde::{Deserialize, Serialize};

use super::condition::ResourceCondition;
use crate::core::{PlayerId, ResourceKind};
use crate::triggers::{Trigger, TriggerMode};

/// Alternative input/output set the player picks between.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Choice {
    pub inputs: Vec<ResourceCondition>,
    pub outputs: Vec<ResourceCondition>,
}

/// One behavior of a card: when it fires, what it costs, what it yields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardBehavior {
    pub triggers: Vec<Trigger>,
    pub inputs: Vec<ResourceCondition>,
    pub outputs: Vec<ResourceCondition>,
    pub choices: Vec<Choice>,
}

impl CardBehavior {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    #[must_use]
    pub fn with_input(mut self, input: ResourceCondition) -> Self {
        self.inputs.push(input);
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: ResourceCondition) -> Self {
        self.outputs.push(output);
        self
    }

    #[must_use]
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Activated by the player as an action.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.triggers.iter().any(|t| t.mode == TriggerMode::Manual)
    }

    /// Fires on its own (on play, at start, or on an event).
    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.triggers.iter().any(|t| t.mode != TriggerMode::Manual)
    }

    /// Auto behavior that waits for a game event.
    #[must_use]
    pub fn is_passive_effect(&self) -> bool {
        self.triggers
            .iter()
            .any(|t| t.mode == TriggerMode::Auto && t.condition.is_some())
    }

    /// Base inputs/outputs followed by those of the chosen option.
    ///
    /// An out-of-range or absent choice yields the base lists only.
    #[must_use]
    pub fn extract_inputs_outputs(
        &self,
        choice: Option<usize>,
    ) -> (Vec<ResourceCondition>, Vec<ResourceCondition>) {
        let mut inputs = self.inputs.clone();
        let mut outputs = self.outputs.clone();
        if let Some(chosen) = choice.and_then(|i| self.choices.get(i)) {
            inputs.extend(chosen.inputs.iter().cloned());
            outputs.extend(chosen.outputs.iter().cloned());
        }
        (inputs, outputs)
    }
}

/// What an output actually applied, after scaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedOutput {
    #[serde(rename = "resourceType")]
    pub kind: ResourceKind,
    pub amount: i32,
    #[serde(rename = "isScaled")]
    pub scaled: bool,
}

/// Notification that a player's behavior resolved, for the UI layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredEffect {
    /// Card or project name.
    pub source: String,
    pub player: PlayerId,
    pub outputs: Vec<ResourceCondition>,
}
