use processing::{model::ExpressionRule, scorers::ExpressionBasedScorer};

pub const UNRECONCILED_LARGE_TRANSFER: &str = "Unreconciled large transfer";

/// Large TRANSFER/CASH_OUT from a funded account where neither the debit nor
/// the credit side adds up. Balances are compared exactly, without tolerance.
const UNRECONCILED_LARGE_TRANSFER_RULE: &str = "(transaction_type == \"TRANSFER\" || transaction_type == \"CASH_OUT\") \
    && oldbalanceOrg > 0.0 \
    && amount > 100000.0 \
    && (oldbalanceOrg - amount) != newbalanceOrig \
    && (newbalanceDest - oldbalanceDest) != amount";

pub fn get_expression_based_scorer() -> ExpressionBasedScorer {
    let expressions = vec![ExpressionRule {
        name: UNRECONCILED_LARGE_TRANSFER.to_string(),
        description: "Transfer or cash-out above 100,000 whose origin and destination balances \
            do not reconcile with the amount"
            .to_string(),
        rule: UNRECONCILED_LARGE_TRANSFER_RULE.to_string(),
        score: 100,
    }];

    ExpressionBasedScorer::new_with_expressions(expressions)
}
