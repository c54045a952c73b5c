use evalexpr::*;
#[cfg(not(test))]
use tracing::{trace, warn};
#[cfg(test)]
use {println as trace, println as warn};

use crate::{
    model::{ExpressionRule, Feature, ScorerResult},
    scorers::Scorer,
};

pub struct ExpressionBasedScorer {
    expressions: Vec<ExpressionRule>,
}

impl ExpressionBasedScorer {
    pub fn new() -> Self {
        Self { expressions: Vec::new() }
    }

    pub fn new_with_expressions(expressions: Vec<ExpressionRule>) -> Self {
        Self { expressions }
    }

    fn setup_context(&self, features: &[Feature]) -> HashMapContext {
        let mut context: HashMapContext = HashMapContext::new();

        for feature in features {
            let value = (*feature.value).clone();
            trace!("Setting feature: {} = {:?}", feature.name, value);

            if let Err(e) = context.set_value(feature.name.clone(), value.into()) {
                warn!("Error setting feature {}: {}", feature.name, e);
            }
        }

        context
    }

    // The rule's score when the expression holds, 0 otherwise
    fn value_to_score(&self, rule: &ExpressionRule, value: Value) -> i32 {
        match value {
            Value::Boolean(true) => rule.score,
            Value::Boolean(false) => 0,
            _ => {
                warn!("Expression '{}' produced non-boolean result: {:?}", rule.name, value);
                0
            }
        }
    }
}

impl Default for ExpressionBasedScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for ExpressionBasedScorer {
    fn score(&self, features: &[Feature]) -> Vec<ScorerResult> {
        let context = self.setup_context(features);
        let mut results = Vec::with_capacity(self.expressions.len());

        for rule in &self.expressions {
            trace!("Evaluating expression: {} = {}", rule.name, rule.rule);

            match eval_with_context(&rule.rule, &context) {
                Ok(value) => {
                    let score = self.value_to_score(rule, value);
                    results.push(ScorerResult {
                        name: rule.name.clone(),
                        score,
                    });
                }
                Err(e) => {
                    warn!("Error evaluating expression '{}': {}", rule.rule, e);
                }
            }
        }

        results
    }
}
